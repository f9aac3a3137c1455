//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every section has defaults, so an empty configuration still
//! yields a runnable (development) setup.

pub mod app;
pub mod auth;
pub mod database;
pub mod gate;
pub mod invitation;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::database::DatabaseConfig;
use self::gate::GateConfig;
use self::invitation::InvitationConfig;
use self::logging::LoggingConfig;
use self::session::SessionConfig;

use crate::error::AppError;

/// Environment variable prefix for overrides (`CLUBHUB__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "CLUBHUB";

/// Environment variable selecting the overlay file (`config/{env}.toml`).
pub const ENV_SELECTOR: &str = "CLUBHUB_ENV";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session cookie settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Request gate settings.
    #[serde(default)]
    pub gate: GateConfig,
    /// Invitation settings.
    #[serde(default)]
    pub invitation: InvitationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, the `config/{env}` overlay and environment
    /// variables prefixed with `CLUBHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load using the environment named by `CLUBHUB_ENV` (default `development`).
    pub fn load_from_env() -> Result<Self, AppError> {
        let env = std::env::var(ENV_SELECTOR).unwrap_or_else(|_| "development".to_string());
        Self::load(&env)
    }
}
