#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email_address, validate_non_empty_string, validate_range, validate_socket_addr,
    validate_url,
};
use serde::{Deserialize, Serialize};

pub use crate::adapters::web3forms::DEFAULT_ENDPOINT;
pub use crate::domain::ports::DEFAULT_ACCESS_KEY_VAR;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use env::EnvConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SITE_NAME: &str = "home care";
pub const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 10;
pub const MAX_RELAY_TIMEOUT_SECS: u64 = 120;

/// Settings for the HTTP listener, separate from the relay behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub expose_diagnostics: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            allowed_origins: Vec::new(),
            expose_diagnostics: false,
        }
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

impl ServerSettings {
    pub fn validate(&self) -> Result<()> {
        validate_socket_addr("listen_addr", &self.listen_addr)?;
        for origin in &self.allowed_origins {
            validate_url("allowed_origins", origin)?;
        }
        Ok(())
    }
}

/// Checks every source of configuration has to pass.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("relay_endpoint", config.relay_endpoint())?;
    validate_email_address("recipient", config.recipient())?;
    validate_email_address("contact_email", config.contact_email())?;
    validate_non_empty_string("access_key_var", config.access_key_var())?;
    validate_non_empty_string("site_name", config.site_name())?;
    validate_range(
        "relay_timeout_secs",
        config.relay_timeout().as_secs(),
        1,
        MAX_RELAY_TIMEOUT_SECS,
    )?;

    if config.access_key().is_none() {
        tracing::warn!(
            "⚠️ {} is not set; submissions will be logged but not relayed until it is",
            config.access_key_var()
        );
    }
    Ok(())
}
