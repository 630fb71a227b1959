//! Configuration model loaded from external sources.

use std::env;
use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::forms::contact::ValidationPolicy;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the HTTP server and the maintenance binaries.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Root of the remote contact service, e.g. `https://host/contact`.
    pub service_url: String,
    pub agenda_slug: String,
    #[serde(default)]
    pub validation: ValidationPolicy,
    /// Also send the agenda slug inside create/update bodies.
    #[serde(default)]
    pub attach_agenda_slug: bool,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Loads `config/default.yaml`, the `APP_ENV` profile and `APP_*` variables.
pub fn load_server_config() -> Result<ServerConfig, ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<ServerConfig>()
}
