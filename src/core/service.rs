use crate::core::message::compose_email;
use crate::core::sanitize::sanitize;
use crate::core::screening::{screen_user_agent, validate_consultation};
use crate::domain::model::{
    ConsultationRequest, HandlerResponse, InboundSubmission, OutboundEmail, SanitizedConsultation,
    SubmissionResponse,
};
use crate::domain::ports::{ConfigProvider, EmailRelay, RelayFailurePolicy};
use crate::utils::error::{ConsultationError, ErrorCategory, Result, GENERIC_FAILURE};
use chrono::{DateTime, SecondsFormat, Utc};

pub const SUBMITTED_MESSAGE: &str = "Consultation request submitted successfully!";
pub const DEFERRED_MESSAGE: &str =
    "Thank you! We have received your request and will contact you within 24 hours.";
pub const RELAY_FAILURE_MESSAGE: &str =
    "There was an issue sending your request. Please contact us directly.";

/// How a submission that reached a 200 answer was actually handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// The provider confirmed delivery.
    Relayed,
    /// Honeypot was filled; nothing was sent.
    Trapped,
    /// Delivery failed under `AcknowledgeAndLog`; the log holds the request.
    Deferred,
}

impl Acceptance {
    pub fn message(self) -> &'static str {
        match self {
            Acceptance::Relayed | Acceptance::Trapped => SUBMITTED_MESSAGE,
            Acceptance::Deferred => DEFERRED_MESSAGE,
        }
    }
}

pub struct ConsultationService<R: EmailRelay, C: ConfigProvider> {
    relay: R,
    config: C,
}

impl<R: EmailRelay, C: ConfigProvider> ConsultationService<R, C> {
    pub fn new(relay: R, config: C) -> Self {
        Self { relay, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Run one submission end to end and produce the answer for the caller.
    pub async fn handle(&self, submission: InboundSubmission<'_>) -> HandlerResponse {
        match self.process(submission).await {
            Ok(acceptance) => HandlerResponse {
                status: 200,
                body: SubmissionResponse::accepted(acceptance.message()),
            },
            Err(err) => self.reject(&err),
        }
    }

    pub async fn process(&self, submission: InboundSubmission<'_>) -> Result<Acceptance> {
        screen_user_agent(submission.user_agent)?;

        let request: ConsultationRequest = serde_json::from_slice(submission.body)?;

        if request.is_trapped() {
            tracing::warn!(
                origin = submission.forwarded_for.unwrap_or("unknown"),
                "🍯 Honeypot filled, acknowledging without relay"
            );
            return Ok(Acceptance::Trapped);
        }

        let request = validate_consultation(sanitize(&request))?;

        let submitted_at = Utc::now();
        let email = compose_email(
            &request,
            self.config.recipient(),
            self.config.site_name(),
            submitted_at,
            submission.forwarded_for,
        );

        match self.relay_email(&email).await {
            Ok(()) => {
                tracing::info!("✅ Consultation request relayed to {}", self.config.recipient());
                Ok(Acceptance::Relayed)
            }
            Err(err) => {
                log_for_follow_up(&request, submitted_at, &err);
                match self.config.failure_policy() {
                    RelayFailurePolicy::FailLoudly => Err(err),
                    RelayFailurePolicy::AcknowledgeAndLog => Ok(Acceptance::Deferred),
                }
            }
        }
    }

    async fn relay_email(&self, email: &OutboundEmail) -> Result<()> {
        let access_key =
            self.config
                .access_key()
                .ok_or_else(|| ConsultationError::RelayNotConfigured {
                    var: self.config.access_key_var().to_string(),
                })?;
        self.relay.send(email, &access_key).await
    }

    /// The answer for a failed submission. Internals never reach the body.
    pub fn reject(&self, err: &ConsultationError) -> HandlerResponse {
        let body = match err.category() {
            ErrorCategory::Bot => {
                tracing::warn!("🤖 {}", err);
                SubmissionResponse::rejected(err.user_friendly_message())
            }
            ErrorCategory::Client => {
                tracing::debug!("Submission rejected: {}", err);
                SubmissionResponse::rejected(err.user_friendly_message())
            }
            ErrorCategory::Relay => SubmissionResponse::rejected(format!(
                "{} {}",
                err.user_friendly_message(),
                self.contact_line()
            ))
            .with_message(RELAY_FAILURE_MESSAGE),
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!("❌ Error processing consultation request: {}", err);
                SubmissionResponse::rejected(GENERIC_FAILURE)
            }
        };

        HandlerResponse {
            status: err.status_code(),
            body,
        }
    }

    fn contact_line(&self) -> String {
        match self.config.contact_phone() {
            Some(phone) => format!(
                "Please contact us directly at {} or call {}.",
                self.config.contact_email(),
                phone
            ),
            None => format!(
                "Please contact us directly at {}.",
                self.config.contact_email()
            ),
        }
    }
}

/// Everything needed to answer the enquiry by hand when the relay failed.
fn log_for_follow_up(
    request: &SanitizedConsultation,
    submitted_at: DateTime<Utc>,
    err: &ConsultationError,
) {
    tracing::error!(
        "❌ Consultation relay failed: {} (Category: {:?}, Severity: {:?})",
        err,
        err.category(),
        err.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());
    tracing::error!(
        name = %request.full_name(),
        email = %request.email,
        phone = %request.phone,
        area = %request.area,
        care_type = %request.care_type,
        relationship = %request.relationship,
        care_recipient = %request.care_recipient_name,
        urgency = %request.urgency,
        enquiry = %request.message,
        submitted_at = %submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        "📧 Consultation request held for manual processing"
    );
}
