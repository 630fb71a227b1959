use serde_json::Value;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::forms::contact::ContactForm;
use crate::http::{ApiResponse, TransportError};
use crate::models::remote_error::RemoteErrorBody;

/// Failures surfaced by repository operations.
///
/// The `Display` output of every variant is meant to be shown to the user as is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Client-side validation failed; no request was sent.
    #[error("{0}")]
    InvalidInput(String),

    #[error("A contact with email {0} already exists in this agenda.")]
    DuplicateEmail(String),

    #[error("Contact id is missing.")]
    MissingIdentifier,

    /// The service answered with a non-success status after all fallbacks.
    #[error("{message}")]
    RemoteRejected { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No HTTP response was obtained at all.
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Builds a [`RepositoryError::RemoteRejected`] from a failed response.
    ///
    /// `context` prefixes the status-derived message used when the body carries
    /// nothing readable.
    pub fn rejected(response: &ApiResponse, context: Option<&str>) -> Self {
        RepositoryError::RemoteRejected {
            status: response.status,
            message: failure_message(response, context),
        }
    }
}

/// Readable message for a failed response.
///
/// A JSON body is searched for `msg`, `message`, `details[0]`, the joined
/// `detail[].msg` entries and a plain `detail` string, and yields the status
/// message when none is present. A body that is not JSON is returned as is,
/// and an empty one also yields the status message.
pub fn failure_message(response: &ApiResponse, context: Option<&str>) -> String {
    let status_message = || match context {
        Some(context) => format!("{context} (HTTP {})", response.status),
        None => format!("HTTP {}", response.status),
    };

    let text = response.body.trim();
    if text.is_empty() {
        return status_message();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => serde_json::from_value::<RemoteErrorBody>(value)
            .ok()
            .and_then(|body| body.message())
            .unwrap_or_else(status_message),
        Ok(_) => status_message(),
        Err(_) => text.to_string(),
    }
}

impl From<FormError> for RepositoryError {
    fn from(err: FormError) -> Self {
        RepositoryError::InvalidInput(ContactForm::describe_error(&err))
    }
}

impl From<TransportError> for RepositoryError {
    fn from(err: TransportError) -> Self {
        RepositoryError::Transport(err.0)
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::InvalidInput(err.to_string())
    }
}
