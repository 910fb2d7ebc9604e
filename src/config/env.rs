use crate::config::{
    validate_provider, ServerSettings, DEFAULT_ACCESS_KEY_VAR, DEFAULT_ENDPOINT,
    DEFAULT_LISTEN_ADDR, DEFAULT_RELAY_TIMEOUT_SECS, DEFAULT_SITE_NAME,
};
use crate::domain::ports::{ConfigProvider, RelayFailurePolicy};
use crate::utils::error::{ConsultationError, Result};
use crate::utils::validation::Validate;
use std::env;
use std::time::Duration;

/// Configuration taken entirely from process environment variables.
///
/// Used by the Lambda entry point, where there are no flags.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub listen_addr: String,
    pub relay_endpoint: String,
    pub recipient: String,
    pub access_key_var: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub site_name: String,
    pub failure_policy: RelayFailurePolicy,
    pub relay_timeout_secs: u64,
}

impl EnvConfig {
    /// # Required
    /// - `CONSULTATION_RECIPIENT`
    ///
    /// # Optional
    /// - `LISTEN_ADDR`, `RELAY_ENDPOINT`, `ACCESS_KEY_VAR`, `CONTACT_EMAIL`
    ///   (defaults to the recipient), `CONTACT_PHONE`, `SITE_NAME`,
    ///   `RELAY_FAILURE_POLICY`, `RELAY_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any name → value lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let recipient =
            get("CONSULTATION_RECIPIENT").ok_or_else(|| ConsultationError::MissingConfigError {
                field: "CONSULTATION_RECIPIENT".to_string(),
            })?;

        let failure_policy = match get("RELAY_FAILURE_POLICY") {
            Some(raw) => raw.parse::<RelayFailurePolicy>().map_err(|reason| {
                ConsultationError::InvalidConfigValueError {
                    field: "RELAY_FAILURE_POLICY".to_string(),
                    value: raw.clone(),
                    reason,
                }
            })?,
            None => RelayFailurePolicy::default(),
        };

        let relay_timeout_secs = match get("RELAY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConsultationError::InvalidConfigValueError {
                    field: "RELAY_TIMEOUT_SECS".to_string(),
                    value: raw.clone(),
                    reason: format!("not a whole number of seconds: {}", e),
                }
            })?,
            None => DEFAULT_RELAY_TIMEOUT_SECS,
        };

        Ok(Self {
            listen_addr: get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            relay_endpoint: get("RELAY_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            contact_email: get("CONTACT_EMAIL").unwrap_or_else(|| recipient.clone()),
            recipient,
            access_key_var: get("ACCESS_KEY_VAR")
                .unwrap_or_else(|| DEFAULT_ACCESS_KEY_VAR.to_string()),
            contact_phone: get("CONTACT_PHONE"),
            site_name: get("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
            failure_policy,
            relay_timeout_secs,
        })
    }

    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings {
            listen_addr: self.listen_addr.clone(),
            ..Default::default()
        }
    }
}

impl ConfigProvider for EnvConfig {
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
        &self.contact_email
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

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        self.server_settings().validate()?;
        tracing::info!("✅ Environment configuration validation passed");
        Ok(())
    }
}
