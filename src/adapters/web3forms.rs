use crate::domain::model::OutboundEmail;
use crate::domain::ports::EmailRelay;
use crate::utils::error::{ConsultationError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Serialize)]
struct SubmitPayload<'a> {
    access_key: &'a str,
    #[serde(flatten)]
    email: &'a OutboundEmail,
}

#[derive(Debug, Deserialize)]
struct SubmitReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Relays messages through the Web3Forms submit API.
#[derive(Debug, Clone)]
pub struct Web3FormsRelay {
    client: Client,
    endpoint: String,
}

impl Web3FormsRelay {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("consultation-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl EmailRelay for Web3FormsRelay {
    async fn send(&self, email: &OutboundEmail, access_key: &str) -> Result<()> {
        tracing::debug!("Relaying consultation email to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&SubmitPayload { access_key, email })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Relay response status: {}", status);

        let body = response.text().await?;
        let reply: Option<SubmitReply> = serde_json::from_str(&body).ok();

        match reply {
            Some(reply) if status.is_success() && reply.success => Ok(()),
            Some(reply) => Err(ConsultationError::RelayRejected {
                status: status.as_u16(),
                body: reply.message.unwrap_or(body),
            }),
            None => Err(ConsultationError::RelayRejected {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
