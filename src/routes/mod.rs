//! HTTP handlers exposed to the address book views.

use actix_web::{HttpResponse, error, web};

use crate::dto::api::ErrorResponse;
use crate::repository::errors::RepositoryError;

pub mod api;

/// Maps a repository failure onto a JSON error response.
pub fn error_response(err: &RepositoryError) -> HttpResponse {
    let body = ErrorResponse::new(err.to_string());
    match err {
        RepositoryError::InvalidInput(_) => HttpResponse::UnprocessableEntity().json(body),
        RepositoryError::DuplicateEmail(_) => HttpResponse::Conflict().json(body),
        RepositoryError::MissingIdentifier => HttpResponse::BadRequest().json(body),
        RepositoryError::RemoteRejected { .. } | RepositoryError::MalformedResponse(_) => {
            HttpResponse::BadGateway().json(body)
        }
        RepositoryError::Transport(_) => HttpResponse::ServiceUnavailable().json(body),
    }
}

/// JSON extractor settings reporting unreadable bodies in the API error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
        error::InternalError::from_response(err, response).into()
    })
}
