use thiserror::Error;

use lotto645_data::ValidationError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no draws to predict from")]
    EmptyHistory,

    #[error("draw {0} has no successor")]
    DrawNoOverflow(u32),
}
