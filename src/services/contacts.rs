//! Services coordinating contact list workflows.

use crate::domain::contact::{Contact, normalize_email};
use crate::domain::types::ContactId;
use crate::forms::contact::ContactForm;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactReader, ContactWriter};

/// Returns the contacts of the configured agenda in server order.
pub async fn list_contacts<R>(repo: &R) -> RepositoryResult<Vec<Contact>>
where
    R: ContactReader + ?Sized + Sync,
{
    repo.list_contacts().await.map_err(|err| {
        log::error!("Failed to list contacts: {err}");
        err
    })
}

/// Creates or updates a contact, refusing emails already used by another
/// contact of the agenda.
pub async fn save_contact<R>(
    repo: &R,
    form: ContactForm,
    id: Option<ContactId>,
) -> RepositoryResult<Contact>
where
    R: ContactReader + ContactWriter + ?Sized + Sync,
{
    let candidate = normalize_email(&form.email);
    if !candidate.is_empty() {
        let existing = repo.list_contacts().await.map_err(|err| {
            log::error!("Failed to load contacts for duplicate check: {err}");
            err
        })?;

        let taken = existing
            .iter()
            .filter(|contact| id.is_none() || contact.id != id)
            .any(|contact| contact.normalized_email().as_deref() == Some(candidate.as_str()));

        if taken {
            return Err(RepositoryError::DuplicateEmail(form.email.trim().to_string()));
        }
    }

    repo.upsert_contact(form, id).await.map_err(|err| {
        log::error!("Failed to save contact: {err}");
        err
    })
}

/// Removes a contact from the agenda.
pub async fn delete_contact<R>(repo: &R, id: Option<ContactId>) -> RepositoryResult<bool>
where
    R: ContactWriter + ?Sized + Sync,
{
    repo.delete_contact(id).await.map_err(|err| {
        log::error!("Failed to delete contact: {err}");
        err
    })
}
