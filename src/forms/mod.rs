//! Form definitions backing the contact routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod contact;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),
}

impl FormError {
    /// Message of the first failing field, checked in `field_order`.
    pub fn first_message(&self, field_order: &[&str]) -> String {
        match self {
            FormError::Validation(errors) => {
                let field_errors = errors.field_errors();
                field_order
                    .iter()
                    .find_map(|field| {
                        let error = field_errors.get(*field)?.first()?;
                        Some(
                            error
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("{field} is invalid.")),
                        )
                    })
                    .unwrap_or_else(|| self.to_string())
            }
        }
    }
}
