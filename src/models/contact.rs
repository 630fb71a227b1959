//! Wire representation of contacts exchanged with the remote service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::contact::{Contact as DomainContact, NewContact as DomainNewContact};
use crate::domain::types::ContactId;

/// Contact record as returned by list, create and update calls.
///
/// The service has been observed to name the identifier `id`, `contact_id`,
/// `uid` or `_id`, and the display name `name` or `full_name`. Values are kept
/// as raw JSON because their types vary between records.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub contact_id: Option<Value>,
    #[serde(default)]
    pub uid: Option<Value>,
    #[serde(default, rename = "_id")]
    pub underscore_id: Option<Value>,
    #[serde(default)]
    pub full_name: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub agenda_slug: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a successful list call. Records are decoded one by one afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContactList {
    Wrapped { contacts: Vec<Value> },
    Bare(Vec<Value>),
}

impl ContactList {
    pub fn into_records(self) -> Vec<Value> {
        match self {
            ContactList::Wrapped { contacts } => contacts,
            ContactList::Bare(contacts) => contacts,
        }
    }
}

/// Body of create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda_slug: Option<&'a str>,
}

impl<'a> ContactPayload<'a> {
    pub fn new(contact: &'a DomainNewContact, agenda_slug: Option<&'a str>) -> Self {
        Self {
            name: contact.full_name.as_str(),
            email: contact.email.as_str(),
            phone: contact.phone.as_str(),
            address: contact.address.as_str(),
            agenda_slug,
        }
    }
}

/// Text of a scalar value; numbers and booleans are rendered as JSON.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn contact_id(value: Value) -> Option<ContactId> {
    match value {
        Value::String(s) => ContactId::new(s).ok(),
        Value::Number(n) => ContactId::new(n.to_string()).ok(),
        _ => None,
    }
}

/// Scalar values become text; structured ones are kept under `key` in `extra`.
fn pass_through(
    key: &str,
    value: Option<Value>,
    extra: &mut Map<String, Value>,
) -> Option<String> {
    let value = value?;
    let text = scalar_text(&value);
    if text.is_none() {
        extra.insert(key.to_string(), value);
    }
    text
}

impl From<Contact> for DomainContact {
    fn from(wire: Contact) -> Self {
        let mut extra = wire.extra;

        let id = [wire.id, wire.contact_id, wire.uid, wire.underscore_id]
            .into_iter()
            .flatten()
            .find_map(contact_id);

        let full_name = pass_through("full_name", wire.full_name, &mut extra)
            .filter(|s| !s.is_empty());
        let name = pass_through("name", wire.name, &mut extra).filter(|s| !s.is_empty());

        Self {
            id,
            full_name: full_name.or(name).unwrap_or_default(),
            email: pass_through("email", wire.email, &mut extra),
            phone: pass_through("phone", wire.phone, &mut extra),
            address: pass_through("address", wire.address, &mut extra),
            agenda_slug: pass_through("agenda_slug", wire.agenda_slug, &mut extra),
            extra,
        }
    }
}
