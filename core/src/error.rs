use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EvalResult<T> = Result<T, EvalError>;
