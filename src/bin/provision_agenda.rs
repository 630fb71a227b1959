//! One-shot command making sure the configured agenda exists on the remote service.

use dotenvy::dotenv;

use pushkind_contacts::models::config::load_server_config;
use pushkind_contacts::repository::{AgendaListing, AgendaProvisioner, ContactsRepository};

#[actix_web::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_server_config() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let repo = match ContactsRepository::from_config(&server_config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Failed to configure contact repository: {err}");
            std::process::exit(1);
        }
    };

    let slug = repo.settings().slug.clone();
    match repo.ensure_agenda(&slug).await {
        Ok(AgendaListing::Contacts(_)) => log::info!("Agenda {slug} is ready"),
        Ok(AgendaListing::Missing) => {
            log::warn!("Agenda {slug} was requested but the service still reports it missing")
        }
        Err(err) => {
            log::error!("Failed to provision agenda {slug}: {err}");
            std::process::exit(1);
        }
    }
}
