//! Bodies returned by the `/api/v1/contacts` endpoints besides contacts themselves.

use serde::{Deserialize, Serialize};

/// Error body carrying the human-readable failure message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Result of a successful delete.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedResponse {
    pub deleted: bool,
}
