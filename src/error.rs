//! Error types for the decision engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Entity not found: {0}")]
    EntityNotFound(u32),

    #[error("Evaluation failed for {0}: {1}")]
    Evaluation(u32, String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    /// A card reported as playable has no legal target although targeting is mandatory
    #[error("Playable card {0} has no legal target")]
    NoValidTarget(u32),

    /// A card reported as playable has no eligible attachment host
    #[error("Playable card {0} has no eligible host")]
    NoEligibleHost(u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AiError {
    /// Fatal errors mean the playability check and the target/host
    /// enumeration disagree. They abort the decision instead of being
    /// downgraded to a placeholder candidate.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AiError::NoValidTarget(_) | AiError::NoEligibleHost(_))
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AiError>;
