use crate::domain::model::OutboundEmail;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ACCESS_KEY_VAR: &str = "WEB3FORMS_ACCESS_KEY";

/// What the handler tells the submitter when the relay cannot deliver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelayFailurePolicy {
    /// 500 with a direct-contact fallback.
    #[default]
    FailLoudly,
    /// 200 "we will contact you"; the logged payload is the only record.
    AcknowledgeAndLog,
}

impl FromStr for RelayFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-loudly" => Ok(Self::FailLoudly),
            "acknowledge-and-log" => Ok(Self::AcknowledgeAndLog),
            other => Err(format!(
                "unknown relay failure policy '{}' (expected fail-loudly or acknowledge-and-log)",
                other
            )),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn relay_endpoint(&self) -> &str;
    fn recipient(&self) -> &str;
    fn access_key_var(&self) -> &str;
    fn contact_email(&self) -> &str;
    fn contact_phone(&self) -> Option<&str>;
    fn site_name(&self) -> &str;
    fn failure_policy(&self) -> RelayFailurePolicy;
    fn relay_timeout(&self) -> Duration;

    /// Read on every call so a key added to the environment is picked up
    /// without a restart.
    fn access_key(&self) -> Option<String> {
        std::env::var(self.access_key_var())
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[async_trait]
pub trait EmailRelay: Send + Sync {
    /// Deliver one message. `Ok` only when the provider confirmed delivery.
    async fn send(&self, email: &OutboundEmail, access_key: &str) -> Result<()>;
}
