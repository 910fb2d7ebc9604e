//! Client side of the consultation flow: an HTTP client for the endpoint and
//! the form controller that drives it.

pub mod form;

use crate::domain::model::{ConsultationRequest, SubmissionResponse};
use crate::utils::error::Result;
use reqwest::Client;

pub use form::{ConsultationForm, FormStatus};

/// Status and (when it parsed) body of the endpoint's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerReply {
    pub status: u16,
    pub body: Option<SubmissionResponse>,
}

impl ServerReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.body.as_ref().is_some_and(|body| body.success)
    }
}

#[derive(Debug, Clone)]
pub struct ConsultationClient {
    http: Client,
    endpoint: String,
}

impl ConsultationClient {
    pub fn new(endpoint: impl Into<String>, user_agent: &str) -> Result<Self> {
        let http = Client::builder().user_agent(user_agent).build()?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the request once. `Err` means the request never got an answer.
    pub async fn submit(&self, request: &ConsultationRequest) -> Result<ServerReply> {
        tracing::debug!("Submitting consultation request to: {}", self.endpoint);
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice::<SubmissionResponse>(&bytes).ok();

        Ok(ServerReply { status, body })
    }
}
