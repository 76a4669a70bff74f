use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("parameter '{0}' is out of range")]
    Range(&'static str),

    #[error("unknown environment '{0}'")]
    UnknownEnvironment(String),

    #[error(
        "max path loss {max_loss_db:.1} dB is below the {floor_db:.1} dB model loss at 1 km"
    )]
    BelowFloor { max_loss_db: f64, floor_db: f64 },
}
