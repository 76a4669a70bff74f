use thiserror::Error;

#[derive(Error, Debug)]
pub enum DimensionError {
    #[error("parameter '{0}' is out of range")]
    InvalidParameter(&'static str),

    #[error("unknown technology '{0}'")]
    UnknownTechnology(String),

    #[error("offered demand exceeds representable cell capacity")]
    CapacityUnbounded,

    #[error("{0}")]
    Model(#[from] hata::ModelError),

    #[error("{0}")]
    LinkBudget(#[from] linkbudget::LinkBudgetError),
}

impl From<erlang::ErlangError> for DimensionError {
    fn from(err: erlang::ErlangError) -> Self {
        match err {
            erlang::ErlangError::Range(field) => DimensionError::InvalidParameter(field),
            erlang::ErlangError::Unbounded(_) => DimensionError::CapacityUnbounded,
        }
    }
}
