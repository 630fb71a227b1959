//! Helpers shared by the integration tests.
#![allow(dead_code)]

use pushkind_contacts::domain::types::AgendaSlug;
use pushkind_contacts::forms::contact::ContactForm;
use pushkind_contacts::http::ReqwestTransport;
use pushkind_contacts::repository::{AgendaSettings, ContactsRepository};
use wiremock::MockServer;

pub const SLUG: &str = "sasha";

/// Base URL of the fake contact service, mounted under `/contact`.
pub fn service_url(server: &MockServer) -> String {
    format!("{}/contact", server.uri())
}

pub fn agenda_path(slug: &str) -> String {
    format!("/contact/agendas/{slug}")
}

pub fn contacts_path(slug: &str) -> String {
    format!("/contact/agendas/{slug}/contacts")
}

/// Repository for `settings`, talking to `server`.
pub fn repository_with(server: &MockServer, settings: AgendaSettings) -> ContactsRepository {
    let transport = ReqwestTransport::new(&service_url(server), None).expect("valid url");
    ContactsRepository::new(transport, settings)
}

pub fn repository(server: &MockServer) -> ContactsRepository {
    repository_with(
        server,
        AgendaSettings::new(AgendaSlug::new(SLUG).expect("valid slug")),
    )
}

pub fn ada_form() -> ContactForm {
    ContactForm {
        full_name: " Ada Lovelace ".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+34 600 123 123".to_string(),
        address: "Calle Falsa 123".to_string(),
    }
}
