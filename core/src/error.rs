use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Root cause '{label}' appears more than once in the catalog")]
    DuplicateCategory { label: String },

    #[error("Fallback label '{label}' is not a catalog category")]
    UnknownFallbackLabel { label: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type InsightResult<T> = Result<T, InsightError>;
