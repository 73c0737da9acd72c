use thiserror::Error;

pub type AdSimResult<T> = Result<T, AdSimError>;

#[derive(Error, Debug)]
pub enum AdSimError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AdSimError {
    /// Machine-readable error kind, mapped to a transport status by the API layer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Config(_) | Self::Serialization(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
