use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkBudgetError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("parameter '{0}' is out of range")]
    Range(&'static str),

    #[error("no allowable path loss remains under the stated margins (MAPL {mapl_db:.1} dB)")]
    Infeasible { mapl_db: f64 },
}
