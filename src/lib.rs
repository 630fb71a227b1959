#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::ContactsRepository;
#[cfg(feature = "server")]
use crate::routes::api::{
    api_v1_contacts, api_v1_create_contact, api_v1_delete_contact, api_v1_update_contact,
};

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod http;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;

/// Registers the contact API under `/api` on an existing app.
#[cfg(feature = "server")]
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(routes::json_config())
            .service(api_v1_contacts)
            .service(api_v1_create_contact)
            .service(api_v1_update_contact)
            .service(api_v1_delete_contact),
    );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = ContactsRepository::from_config(&server_config).map_err(|e| {
        std::io::Error::other(format!("Failed to configure contact repository: {e}"))
    })?;
    let repo = web::Data::new(repo);

    log::info!(
        "Serving agenda {} from {}",
        repo.settings().slug,
        server_config.service_url
    );

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure_api)
            .app_data(repo.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
