use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::types::ContactId;
use crate::dto::api::DeletedResponse;
use crate::forms::contact::ContactForm;
use crate::repository::ContactsRepository;
use crate::repository::errors::RepositoryError;
use crate::routes::error_response;
use crate::services::contacts;

/// Path ids are opaque; a blank one cannot address a contact.
fn path_id(raw: String) -> Result<ContactId, RepositoryError> {
    ContactId::new(raw).map_err(|_| RepositoryError::MissingIdentifier)
}

#[get("/v1/contacts")]
pub async fn api_v1_contacts(repo: web::Data<ContactsRepository>) -> impl Responder {
    match contacts::list_contacts(repo.get_ref()).await {
        Ok(contacts) => HttpResponse::Ok().json(contacts),
        Err(e) => error_response(&e),
    }
}

#[post("/v1/contacts")]
pub async fn api_v1_create_contact(
    form: web::Json<ContactForm>,
    repo: web::Data<ContactsRepository>,
) -> impl Responder {
    match contacts::save_contact(repo.get_ref(), form.into_inner(), None).await {
        Ok(contact) => HttpResponse::Created().json(contact),
        Err(e) => error_response(&e),
    }
}

#[put("/v1/contacts/{id}")]
pub async fn api_v1_update_contact(
    id: web::Path<String>,
    form: web::Json<ContactForm>,
    repo: web::Data<ContactsRepository>,
) -> impl Responder {
    let id = match path_id(id.into_inner()) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match contacts::save_contact(repo.get_ref(), form.into_inner(), Some(id)).await {
        Ok(contact) => HttpResponse::Ok().json(contact),
        Err(e) => error_response(&e),
    }
}

#[delete("/v1/contacts/{id}")]
pub async fn api_v1_delete_contact(
    id: web::Path<String>,
    repo: web::Data<ContactsRepository>,
) -> impl Responder {
    let id = match path_id(id.into_inner()) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match contacts::delete_contact(repo.get_ref(), Some(id)).await {
        Ok(deleted) => HttpResponse::Ok().json(DeletedResponse { deleted }),
        Err(e) => error_response(&e),
    }
}
