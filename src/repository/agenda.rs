use async_trait::async_trait;
use reqwest::Method;

use crate::domain::types::AgendaSlug;
use crate::http::{ApiRequest, HttpTransport};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AgendaListing, AgendaProvisioner, RemoteRepository};

fn list_request(slug: &AgendaSlug) -> ApiRequest {
    ApiRequest::new(Method::GET, ["agendas", slug.as_str(), "contacts"])
}

#[async_trait]
impl<T: HttpTransport> AgendaProvisioner for RemoteRepository<T> {
    async fn ensure_agenda(&self, slug: &AgendaSlug) -> RepositoryResult<AgendaListing> {
        let mut response = self.transport.send(list_request(slug)).await?;

        if response.is_not_found() {
            log::info!("Agenda {slug} not found, creating it");
            let created = self
                .transport
                .send(ApiRequest::new(Method::POST, ["agendas", slug.as_str()]))
                .await?;

            if created.is_conflict() {
                log::warn!("Agenda {slug} was created concurrently");
            } else if !created.is_success() {
                return Err(RepositoryError::rejected(
                    &created,
                    Some("could not create agenda"),
                ));
            }

            response = self.transport.send(list_request(slug)).await?;
            if response.is_not_found() {
                log::warn!("Agenda {slug} still missing after creation, treating it as empty");
                return Ok(AgendaListing::Missing);
            }
        }

        if !response.is_success() {
            return Err(RepositoryError::rejected(
                &response,
                Some("error listing contacts"),
            ));
        }

        Ok(AgendaListing::Contacts(response.body))
    }
}
