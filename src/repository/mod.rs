use async_trait::async_trait;

use crate::domain::contact::Contact;
use crate::domain::types::{AgendaSlug, ContactId};
use crate::forms::contact::{ContactForm, ValidationPolicy};
use crate::http::{HttpTransport, ReqwestTransport};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
use crate::repository::errors::RepositoryResult;

pub mod agenda;
pub mod contact;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Outcome of provisioning an agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgendaListing {
    /// Raw body of the successful contact list read.
    Contacts(String),
    /// The agenda is still absent after creation was requested.
    Missing,
}

/// Per-agenda behaviour of a [`RemoteRepository`].
#[derive(Debug, Clone)]
pub struct AgendaSettings {
    pub slug: AgendaSlug,
    pub validation: ValidationPolicy,
    /// Also send the agenda slug inside create/update bodies.
    pub attach_agenda_slug: bool,
}

impl AgendaSettings {
    pub fn new(slug: AgendaSlug) -> Self {
        Self {
            slug,
            validation: ValidationPolicy::default(),
            attach_agenda_slug: false,
        }
    }

    pub fn validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    pub fn attach_agenda_slug(mut self, attach: bool) -> Self {
        self.attach_agenda_slug = attach;
        self
    }
}

#[async_trait]
pub trait AgendaProvisioner {
    /// Makes sure the agenda exists, creating it when the list read 404s.
    async fn ensure_agenda(&self, slug: &AgendaSlug) -> RepositoryResult<AgendaListing>;
}

#[async_trait]
pub trait ContactReader {
    async fn list_contacts(&self) -> RepositoryResult<Vec<Contact>>;
}

#[async_trait]
pub trait ContactWriter {
    /// Creates the contact when `id` is `None`, updates it otherwise.
    async fn upsert_contact(
        &self,
        form: ContactForm,
        id: Option<ContactId>,
    ) -> RepositoryResult<Contact>;
    async fn delete_contact(&self, id: Option<ContactId>) -> RepositoryResult<bool>;
}

/// Repository talking to the remote contact service through `T`.
///
/// Holds no state besides its settings; every call goes to the service.
#[derive(Debug, Clone)]
pub struct RemoteRepository<T> {
    transport: T,
    settings: AgendaSettings,
}

impl<T: HttpTransport> RemoteRepository<T> {
    pub fn new(transport: T, settings: AgendaSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &AgendaSettings {
        &self.settings
    }
}

/// Repository used by the HTTP server.
pub type ContactsRepository = RemoteRepository<ReqwestTransport>;

#[cfg(feature = "server")]
impl RemoteRepository<ReqwestTransport> {
    /// Builds the repository described by the server configuration.
    pub fn from_config(config: &ServerConfig) -> RepositoryResult<Self> {
        let slug = AgendaSlug::new(config.agenda_slug.as_str())?;
        let transport = ReqwestTransport::new(&config.service_url, config.request_timeout())?;
        let settings = AgendaSettings::new(slug)
            .validation(config.validation)
            .attach_agenda_slug(config.attach_agenda_slug);
        Ok(Self::new(transport, settings))
    }
}
