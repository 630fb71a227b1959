use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::ContactId;

/// Canonical contact as seen by the address book views.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Contact {
    /// Absent until the remote service has stored the contact.
    pub id: Option<ContactId>,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenda_slug: Option<String>,
    /// Remote fields without a canonical counterpart, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    /// Trimmed, lower-cased email used for duplicate detection.
    pub fn normalized_email(&self) -> Option<String> {
        self.email
            .as_deref()
            .map(normalize_email)
            .filter(|email| !email.is_empty())
    }
}

/// Validated contact data ready to be mapped onto a remote write request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Lower-cases and trims an email for case-insensitive comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
