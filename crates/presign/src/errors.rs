use thiserror::Error;

/// Errors raised by the pre-signing staging area.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreSignError {
    /// Another pre-signing run holds the latch. Callers must back off, not queue.
    #[error("a pre-signing operation is already in progress")]
    SigningInProgress,
}
