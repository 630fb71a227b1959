use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::contact::{Contact, NewContact};
use crate::forms::FormError;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));
static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{6,}$").expect("phone pattern compiles"));

const FIELD_ORDER: [&str; 4] = ["full_name", "email", "phone", "address"];

/// How much the client checks before letting a write reach the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Name and email are required.
    #[default]
    Lenient,
    /// Every field is required and email/phone must be well-formed.
    Strict,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
/// Contact form as submitted by the create/edit views.
pub struct ContactForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Validate)]
struct LenientFields {
    #[validate(length(min = 1, message = "Full name and email are required."))]
    full_name: String,
    #[validate(length(min = 1, message = "Full name and email are required."))]
    email: String,
}

#[derive(Validate)]
struct StrictFields {
    #[validate(length(min = 1, message = "All fields are required."))]
    full_name: String,
    #[validate(
        length(min = 1, message = "All fields are required."),
        regex(path = *EMAIL_SHAPE, message = "Invalid email address.")
    )]
    email: String,
    #[validate(
        length(min = 1, message = "All fields are required."),
        regex(path = *PHONE_SHAPE, message = "Invalid phone number.")
    )]
    phone: String,
    #[validate(length(min = 1, message = "All fields are required."))]
    address: String,
}

impl ContactForm {
    /// Trims the form, checks it against `policy` and builds the write payload.
    pub fn to_new_contact(&self, policy: ValidationPolicy) -> Result<NewContact, FormError> {
        let phone = match policy {
            ValidationPolicy::Lenient => self.phone.trim().to_string(),
            ValidationPolicy::Strict => self.phone.split_whitespace().collect(),
        };
        let new_contact = NewContact {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone,
            address: self.address.trim().to_string(),
        };

        match policy {
            ValidationPolicy::Lenient => LenientFields {
                full_name: new_contact.full_name.clone(),
                email: new_contact.email.clone(),
            }
            .validate()?,
            ValidationPolicy::Strict => StrictFields {
                full_name: new_contact.full_name.clone(),
                email: new_contact.email.clone(),
                phone: new_contact.phone.clone(),
                address: new_contact.address.clone(),
            }
            .validate()?,
        }

        Ok(new_contact)
    }

    /// Human-readable message for a validation failure of this form.
    pub fn describe_error(error: &FormError) -> String {
        error.first_message(&FIELD_ORDER)
    }
}

impl From<&Contact> for ContactForm {
    /// Prefills the edit form from a stored contact.
    fn from(contact: &Contact) -> Self {
        Self {
            full_name: contact.full_name.clone(),
            email: contact.email.clone().unwrap_or_default(),
            phone: contact.phone.clone().unwrap_or_default(),
            address: contact.address.clone().unwrap_or_default(),
        }
    }
}
