use thiserror::Error;

/// Error type for PIN hashing operations.
#[derive(Debug, Clone, Error)]
pub enum PinError {
    #[error("PIN hashing failed: {0}")]
    HashingFailed(String),

    #[error("PIN verification failed: {0}")]
    VerificationFailed(String),
}
