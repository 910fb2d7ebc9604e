use serde::{Deserialize, Deserializer, Serialize};

pub const RELATIONSHIP_NOT_SPECIFIED: &str = "Not specified";
pub const CARE_RECIPIENT_NOT_SPECIFIED: &str = "Not specified";

/// One inbound care enquiry as the form sends it.
///
/// Absent keys deserialize to empty values so a missing field surfaces as a
/// validation failure instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsultationRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub area: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub care_type: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub relationship: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub care_recipient_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub urgency: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
    pub consent: bool,
    /// Hidden from people; anything in it marks the sender as automated.
    #[serde(deserialize_with = "null_as_empty")]
    pub honeypot: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConsultationRequest {
    pub fn is_trapped(&self) -> bool {
        !self.honeypot.is_empty()
    }
}

/// A request after sanitization. Field order follows `ConsultationRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedConsultation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub area: String,
    pub care_type: String,
    pub relationship: String,
    pub care_recipient_name: String,
    pub urgency: String,
    pub message: String,
    pub consent: bool,
}

impl SanitizedConsultation {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// What gets handed to the email provider, minus the access key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub to: String,
    pub from_name: String,
    pub subject: String,
    pub message: String,
    pub reply_to: String,
}

/// Body of every answer from the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Status code plus body, independent of the HTTP framework serving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: SubmissionResponse,
}

/// The parts of an inbound HTTP request the handler looks at.
#[derive(Debug, Clone, Copy)]
pub struct InboundSubmission<'a> {
    pub user_agent: Option<&'a str>,
    pub forwarded_for: Option<&'a str>,
    pub body: &'a [u8],
}
