use async_trait::async_trait;
use reqwest::Method;

use crate::domain::contact::Contact;
use crate::domain::types::ContactId;
use crate::forms::contact::ContactForm;
use crate::http::{ApiRequest, ApiResponse, HttpTransport};
use crate::models::contact::{Contact as WireContact, ContactList, ContactPayload};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AgendaListing, AgendaProvisioner, ContactReader, ContactWriter, RemoteRepository,
};

impl<T: HttpTransport> RemoteRepository<T> {
    fn scoped_contact(&self, method: Method, id: &ContactId) -> ApiRequest {
        ApiRequest::new(
            method,
            [
                "agendas",
                self.settings.slug.as_str(),
                "contacts",
                id.as_str(),
            ],
        )
    }

    fn flat_contact(method: Method, id: &ContactId) -> ApiRequest {
        ApiRequest::new(method, ["contacts", id.as_str()])
    }

    /// Sends the agenda-scoped request and retries once on the flat endpoint
    /// if the service does not know the contact under the agenda.
    async fn send_with_fallback(
        &self,
        scoped: ApiRequest,
        flat: ApiRequest,
    ) -> RepositoryResult<ApiResponse> {
        let scoped_path = scoped.path();
        let response = self.transport.send(scoped).await?;
        if !response.is_not_found() {
            return Ok(response);
        }

        log::warn!(
            "{} {scoped_path} returned 404, retrying {}",
            flat.method,
            flat.path()
        );
        Ok(self.transport.send(flat).await?)
    }
}

/// Parses the body of a successful create or update call.
fn parse_written_contact(response: &ApiResponse) -> RepositoryResult<Contact> {
    if response.body.trim().is_empty() {
        return Err(RepositoryError::MalformedResponse(format!(
            "empty body (HTTP {})",
            response.status
        )));
    }
    let wire: WireContact = serde_json::from_str(&response.body)
        .map_err(|e| RepositoryError::MalformedResponse(e.to_string()))?;
    Ok(wire.into())
}

/// Parses a list body, treating unknown shapes as an empty agenda.
///
/// Records are decoded independently; one that is not a JSON object is
/// skipped without affecting the others.
fn parse_contact_list(body: &str) -> Vec<Contact> {
    if body.trim().is_empty() {
        return Vec::new();
    }
    let records = match serde_json::from_str::<ContactList>(body) {
        Ok(list) => list.into_records(),
        Err(e) => {
            log::warn!("Ignoring unrecognized contact list body: {e}");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<WireContact>(record) {
            Ok(wire) => Some(wire.into()),
            Err(e) => {
                log::warn!("Skipping unrecognized contact record: {e}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl<T: HttpTransport> ContactReader for RemoteRepository<T> {
    async fn list_contacts(&self) -> RepositoryResult<Vec<Contact>> {
        match self.ensure_agenda(&self.settings.slug).await? {
            AgendaListing::Missing => Ok(Vec::new()),
            AgendaListing::Contacts(body) => Ok(parse_contact_list(&body)),
        }
    }
}

#[async_trait]
impl<T: HttpTransport> ContactWriter for RemoteRepository<T> {
    async fn upsert_contact(
        &self,
        form: ContactForm,
        id: Option<ContactId>,
    ) -> RepositoryResult<Contact> {
        let new_contact = form.to_new_contact(self.settings.validation)?;
        let agenda_slug = self
            .settings
            .attach_agenda_slug
            .then(|| self.settings.slug.as_str());
        let body = serde_json::to_value(ContactPayload::new(&new_contact, agenda_slug))
            .map_err(|e| RepositoryError::InvalidInput(e.to_string()))?;

        let response = match id {
            Some(id) => {
                self.send_with_fallback(
                    self.scoped_contact(Method::PUT, &id).json(body.clone()),
                    Self::flat_contact(Method::PUT, &id).json(body),
                )
                .await?
            }
            None => {
                self.ensure_agenda(&self.settings.slug).await?;
                let request = ApiRequest::new(
                    Method::POST,
                    ["agendas", self.settings.slug.as_str(), "contacts"],
                )
                .json(body);
                self.transport.send(request).await?
            }
        };

        if !response.is_success() {
            return Err(RepositoryError::rejected(&response, None));
        }

        parse_written_contact(&response)
    }

    async fn delete_contact(&self, id: Option<ContactId>) -> RepositoryResult<bool> {
        let id = id.ok_or(RepositoryError::MissingIdentifier)?;

        let response = self
            .send_with_fallback(
                self.scoped_contact(Method::DELETE, &id),
                Self::flat_contact(Method::DELETE, &id),
            )
            .await?;

        if !response.is_success() {
            return Err(RepositoryError::rejected(
                &response,
                Some("could not delete contact"),
            ));
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::AgendaSlug;
    use crate::forms::contact::ValidationPolicy;
    use crate::repository::AgendaSettings;
    use crate::repository::mock::{MockTransport, ScriptedTransport};

    fn settings() -> AgendaSettings {
        AgendaSettings::new(AgendaSlug::new("sasha").unwrap())
    }

    fn repository<T: HttpTransport>(transport: T) -> RemoteRepository<T> {
        RemoteRepository::new(transport, settings())
    }

    fn ada_form() -> ContactForm {
        ContactForm {
            full_name: "  Ada Lovelace ".to_string(),
            email: " ada@example.com ".to_string(),
            phone: "600 123 123".to_string(),
            address: " Calle Falsa 123 ".to_string(),
        }
    }

    fn id(value: &str) -> ContactId {
        ContactId::new(value).unwrap()
    }

    #[tokio::test]
    async fn list_of_missing_agenda_is_empty() {
        let transport = ScriptedTransport::new([
            ApiResponse::new(404, ""),
            ApiResponse::new(201, ""),
            ApiResponse::new(404, ""),
        ]);

        let contacts = repository(transport).list_contacts().await.unwrap();

        assert!(contacts.is_empty());
    }

    #[tokio::test]
    async fn list_normalizes_wrapped_records() {
        let transport = ScriptedTransport::new([ApiResponse::new(
            200,
            json!({"slug": "sasha", "contacts": [{"id": 1, "name": "Ada", "email": "a@b.com"}]})
                .to_string(),
        )]);

        let contacts = repository(transport).list_contacts().await.unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].full_name, "Ada");
        assert_eq!(contacts[0].email.as_deref(), Some("a@b.com"));
        assert_eq!(contacts[0].id, Some(id("1")));
    }

    #[tokio::test]
    async fn list_keeps_server_order_of_bare_arrays() {
        let transport = ScriptedTransport::new([ApiResponse::new(
            200,
            json!([{"name": "Zoe"}, {"name": "Ada"}, {"full_name": "Bob"}]).to_string(),
        )]);

        let names: Vec<_> = repository(transport)
            .list_contacts()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.full_name)
            .collect();

        assert_eq!(names, vec!["Zoe", "Ada", "Bob"]);
    }

    #[tokio::test]
    async fn loosely_typed_records_are_all_listed() {
        let transport = ScriptedTransport::new([ApiResponse::new(
            200,
            json!({"contacts": [
                {"id": 1, "name": "Ada", "email": "a@b.com"},
                {"id": 2, "name": "Bob", "email": "b@b.com", "phone": 600123123},
                "not a record",
                {"id": 3, "name": "Eve", "address": {"city": "Madrid"}}
            ]})
            .to_string(),
        )]);

        let contacts = repository(transport).list_contacts().await.unwrap();

        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[1].phone.as_deref(), Some("600123123"));
        assert_eq!(contacts[2].extra.get("address"), Some(&json!({"city": "Madrid"})));
    }

    #[tokio::test]
    async fn loosely_typed_write_response_is_accepted() {
        let transport = ScriptedTransport::new([ApiResponse::new(
            200,
            json!({"id": 4, "name": "Ada Lovelace", "phone": 600123123, "agenda_slug": null})
                .to_string(),
        )]);

        let contact = repository(transport)
            .upsert_contact(ada_form(), Some(id("4")))
            .await
            .unwrap();

        assert_eq!(contact.id, Some(id("4")));
        assert_eq!(contact.phone.as_deref(), Some("600123123"));
    }

    #[tokio::test]
    async fn unparsable_list_is_empty() {
        let transport = ScriptedTransport::new([ApiResponse::new(200, "<html>oops</html>")]);

        let contacts = repository(transport).list_contacts().await.unwrap();

        assert!(contacts.is_empty());
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);
        let repo = repository(transport);

        let form = ContactForm {
            full_name: "   ".to_string(),
            ..ada_form()
        };
        let err = repo.upsert_contact(form, None).await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::InvalidInput("Full name and email are required.".to_string())
        );
    }

    #[tokio::test]
    async fn strict_policy_rejects_bad_phone_before_any_request() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);
        let repo = RemoteRepository::new(
            transport,
            settings().validation(ValidationPolicy::Strict),
        );

        let form = ContactForm {
            phone: "12 34".to_string(),
            ..ada_form()
        };
        let err = repo.upsert_contact(form, Some(id("3"))).await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::InvalidInput("Invalid phone number.".to_string())
        );
    }

    #[tokio::test]
    async fn create_provisions_then_posts_once() {
        let transport = ScriptedTransport::new([
            ApiResponse::new(200, "[]"),
            ApiResponse::new(
                201,
                json!({"id": 9, "name": "Ada Lovelace", "email": "ada@example.com"}).to_string(),
            ),
        ]);
        let repo = repository(transport);

        let contact = repo.upsert_contact(ada_form(), None).await.unwrap();

        assert_eq!(contact.full_name, "Ada Lovelace");
        assert_eq!(contact.id, Some(id("9")));
        assert_eq!(
            repo.transport.calls(),
            vec![
                (Method::GET, "/agendas/sasha/contacts".to_string()),
                (Method::POST, "/agendas/sasha/contacts".to_string()),
            ]
        );
        assert_eq!(
            repo.transport.requests()[1].body,
            Some(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "phone": "600 123 123",
                "address": "Calle Falsa 123"
            }))
        );
    }

    #[tokio::test]
    async fn slug_is_attached_when_configured() {
        let transport = ScriptedTransport::new([
            ApiResponse::new(200, "[]"),
            ApiResponse::new(201, json!({"id": 1, "name": "Ada Lovelace"}).to_string()),
        ]);
        let repo = RemoteRepository::new(transport, settings().attach_agenda_slug(true));

        repo.upsert_contact(ada_form(), None).await.unwrap();

        let body = repo.transport.requests()[1].body.clone().unwrap();
        assert_eq!(body["agenda_slug"], json!("sasha"));
    }

    #[tokio::test]
    async fn update_does_not_provision() {
        let transport = ScriptedTransport::new([ApiResponse::new(
            200,
            json!({"id": 4, "name": "Ada Lovelace"}).to_string(),
        )]);
        let repo = repository(transport);

        let contact = repo.upsert_contact(ada_form(), Some(id("4"))).await.unwrap();

        assert_eq!(contact.id, Some(id("4")));
        assert_eq!(
            repo.transport.calls(),
            vec![(Method::PUT, "/agendas/sasha/contacts/4".to_string())]
        );
    }

    #[tokio::test]
    async fn update_falls_back_to_flat_endpoint() {
        let transport = ScriptedTransport::new([
            ApiResponse::new(404, ""),
            ApiResponse::new(200, json!({"contact_id": "4", "name": "Ada"}).to_string()),
        ]);
        let repo = repository(transport);

        let contact = repo.upsert_contact(ada_form(), Some(id("4"))).await.unwrap();

        assert_eq!(contact.id, Some(id("4")));
        assert_eq!(
            repo.transport.calls(),
            vec![
                (Method::PUT, "/agendas/sasha/contacts/4".to_string()),
                (Method::PUT, "/contacts/4".to_string()),
            ]
        );
        assert_eq!(
            repo.transport.requests()[0].body,
            repo.transport.requests()[1].body
        );
    }

    #[tokio::test]
    async fn failed_fallback_surfaces_its_own_error() {
        let transport = ScriptedTransport::new([
            ApiResponse::new(404, r#"{"detail": "Agenda not found"}"#),
            ApiResponse::new(404, r#"{"detail": "Contact not found"}"#),
        ]);

        let err = repository(transport)
            .upsert_contact(ada_form(), Some(id("4")))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RepositoryError::RemoteRejected {
                status: 404,
                message: "Contact not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn validation_errors_from_service_are_translated() {
        let transport = ScriptedTransport::new([
            ApiResponse::new(200, "[]"),
            ApiResponse::new(
                422,
                json!({"detail": [{"loc": ["body", "phone"], "msg": "field required"}]})
                    .to_string(),
            ),
        ]);

        let err = repository(transport)
            .upsert_contact(ada_form(), None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "field required");
    }

    #[tokio::test]
    async fn empty_write_response_is_malformed() {
        let transport = ScriptedTransport::new([ApiResponse::new(200, "")]);

        let err = repository(transport)
            .upsert_contact(ada_form(), Some(id("4")))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn delete_without_id_is_rejected() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);

        let err = repository(transport).delete_contact(None).await.unwrap_err();

        assert_eq!(err, RepositoryError::MissingIdentifier);
    }

    #[tokio::test]
    async fn delete_retries_flat_endpoint() {
        let transport = ScriptedTransport::new([
            ApiResponse::new(404, ""),
            ApiResponse::new(204, ""),
        ]);
        let repo = repository(transport);

        assert!(repo.delete_contact(Some(id("4"))).await.unwrap());
        assert_eq!(
            repo.transport.calls(),
            vec![
                (Method::DELETE, "/agendas/sasha/contacts/4".to_string()),
                (Method::DELETE, "/contacts/4".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn delete_failure_uses_status_message() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.method == Method::DELETE)
            .times(1)
            .returning(|_| Ok(ApiResponse::new(500, "")));

        let err = repository(transport)
            .delete_contact(Some(id("4")))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "could not delete contact (HTTP 500)");
    }

    #[tokio::test]
    async fn round_trip_preserves_contact_fields() {
        let stored = json!({
            "id": 2,
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "+34 600 123 123",
            "address": "Calle Falsa 123"
        });
        let transport = ScriptedTransport::new([
            ApiResponse::new(200, json!([stored]).to_string()),
            ApiResponse::new(200, stored.to_string()),
        ]);
        let repo = repository(transport);

        let contact = repo.list_contacts().await.unwrap().remove(0);
        repo.upsert_contact(ContactForm::from(&contact), contact.id.clone())
            .await
            .unwrap();

        let body = repo.transport.requests()[1].body.clone().unwrap();
        assert_eq!(body["email"], stored["email"]);
        assert_eq!(body["phone"], stored["phone"]);
        assert_eq!(body["address"], stored["address"]);
        assert_eq!(body["name"], stored["name"]);
    }
}
