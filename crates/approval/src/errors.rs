use thiserror::Error;

use crate::WindowId;

/// Provider error code for a request the user declined.
pub const USER_REJECTED_CODE: i32 = 4001;

/// Provider error code for a failure on the wallet side.
pub const INTERNAL_ERROR_CODE: i32 = -32603;

/// Why a pending approval did not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    #[error("user rejected the request: {0}")]
    UserRejected(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApprovalError {
    pub fn code(&self) -> i32 {
        match self {
            Self::UserRejected(_) => USER_REJECTED_CODE,
            Self::Internal(_) => INTERNAL_ERROR_CODE,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::UserRejected(_))
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::UserRejected(reason) | Self::Internal(reason) => reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window {0} not found")]
    NotFound(WindowId),

    #[error("window backend: {0}")]
    Backend(String),
}
