use crate::config::{
    validate_provider, ServerSettings, DEFAULT_ACCESS_KEY_VAR, DEFAULT_ENDPOINT,
    DEFAULT_RELAY_TIMEOUT_SECS, DEFAULT_SITE_NAME,
};
use crate::domain::ports::{ConfigProvider, RelayFailurePolicy};
use crate::utils::error::{ConsultationError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern compiles"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub relay: RelayConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub recipient: String,
    pub endpoint: Option<String>,
    pub access_key_var: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub failure_policy: Option<RelayFailurePolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub site_name: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConsultationError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ConsultationError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the variable's value; unknown variables are left
    /// as written so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn relay_endpoint(&self) -> &str {
        self.relay.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn recipient(&self) -> &str {
        &self.relay.recipient
    }

    fn access_key_var(&self) -> &str {
        self.relay
            .access_key_var
            .as_deref()
            .unwrap_or(DEFAULT_ACCESS_KEY_VAR)
    }

    fn contact_email(&self) -> &str {
        self.contact.email.as_deref().unwrap_or(&self.relay.recipient)
    }

    fn contact_phone(&self) -> Option<&str> {
        self.contact.phone.as_deref()
    }

    fn site_name(&self) -> &str {
        self.contact.site_name.as_deref().unwrap_or(DEFAULT_SITE_NAME)
    }

    fn failure_policy(&self) -> RelayFailurePolicy {
        self.relay.failure_policy.unwrap_or_default()
    }

    fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.relay.timeout_seconds.unwrap_or(DEFAULT_RELAY_TIMEOUT_SECS))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.server.validate()?;
        validate_provider(self)
    }
}
