use crate::config::{
    validate_provider, ServerSettings, DEFAULT_ACCESS_KEY_VAR, DEFAULT_ENDPOINT,
    DEFAULT_LISTEN_ADDR, DEFAULT_RELAY_TIMEOUT_SECS, DEFAULT_SITE_NAME,
};
use crate::domain::ports::{ConfigProvider, RelayFailurePolicy};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "consultation-relay")]
#[command(about = "Serves the consultation form endpoint and relays requests by email")]
pub struct CliConfig {
    /// Load settings from a TOML file instead of the flags below
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub relay_endpoint: String,

    /// Mailbox that receives consultation requests
    #[arg(long, env = "CONSULTATION_RECIPIENT", default_value = "")]
    pub recipient: String,

    /// Environment variable holding the email API access key
    #[arg(long, default_value = DEFAULT_ACCESS_KEY_VAR)]
    pub access_key_var: String,

    /// Address shown to submitters when relaying fails (defaults to the recipient)
    #[arg(long)]
    pub contact_email: Option<String>,

    #[arg(long)]
    pub contact_phone: Option<String>,

    #[arg(long, default_value = DEFAULT_SITE_NAME)]
    pub site_name: String,

    /// fail-loudly or acknowledge-and-log
    #[arg(long, default_value = "fail-loudly")]
    pub failure_policy: RelayFailurePolicy,

    #[arg(long, default_value_t = DEFAULT_RELAY_TIMEOUT_SECS)]
    pub relay_timeout_secs: u64,

    #[arg(long = "allowed-origin")]
    pub allowed_origins: Vec<String>,

    /// Mount GET /api/relay-status
    #[arg(long)]
    pub expose_diagnostics: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings {
            listen_addr: self.listen_addr.clone(),
            allowed_origins: self.allowed_origins.clone(),
            expose_diagnostics: self.expose_diagnostics,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn relay_endpoint(&self) -> &str {
        &self.relay_endpoint
    }

    fn recipient(&self) -> &str {
        &self.recipient
    }

    fn access_key_var(&self) -> &str {
        &self.access_key_var
    }

    fn contact_email(&self) -> &str {
        self.contact_email.as_deref().unwrap_or(&self.recipient)
    }

    fn contact_phone(&self) -> Option<&str> {
        self.contact_phone.as_deref()
    }

    fn site_name(&self) -> &str {
        &self.site_name
    }

    fn failure_policy(&self) -> RelayFailurePolicy {
        self.failure_policy
    }

    fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.relay_timeout_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.server_settings().validate()?;
        validate_provider(self)?;
        tracing::info!("✅ CLI configuration validation passed");
        Ok(())
    }
}
