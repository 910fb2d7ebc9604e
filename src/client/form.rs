use crate::client::ConsultationClient;
use crate::domain::model::ConsultationRequest;
use crate::domain::options::{CareType, Relationship, Urgency};

pub const FALLBACK_ERROR: &str = "Something went wrong. Please try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success(String),
    Error(String),
}

/// Which page the form sits on. The contact page asks fewer questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Consultation,
    Contact,
}

#[derive(Debug, Clone)]
pub struct ConsultationForm {
    fields: ConsultationRequest,
    status: FormStatus,
    variant: Variant,
}

impl Default for ConsultationForm {
    fn default() -> Self {
        Self::consultation()
    }
}

impl ConsultationForm {
    /// The full consultation form. Fields stay filled after a success.
    pub fn consultation() -> Self {
        Self {
            fields: ConsultationRequest::default(),
            status: FormStatus::Idle,
            variant: Variant::Consultation,
        }
    }

    /// The shorter contact form: no recipient name, urgency preset, cleared
    /// after a success.
    pub fn contact() -> Self {
        Self {
            fields: Self::contact_defaults(),
            status: FormStatus::Idle,
            variant: Variant::Contact,
        }
    }

    fn contact_defaults() -> ConsultationRequest {
        ConsultationRequest {
            urgency: Urgency::JustExploring.label().to_string(),
            ..Default::default()
        }
    }

    pub fn fields(&self) -> &ConsultationRequest {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ConsultationRequest {
        &mut self.fields
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn select_care_type(&mut self, care_type: CareType) {
        self.fields.care_type = care_type.label().to_string();
    }

    pub fn select_relationship(&mut self, relationship: Relationship) {
        self.fields.relationship = relationship.label().to_string();
    }

    pub fn select_urgency(&mut self, urgency: Urgency) {
        self.fields.urgency = urgency.label().to_string();
    }

    /// The browser's `required` checks. Advisory only; the server re-checks.
    pub fn check_shape(&self) -> Result<(), String> {
        let f = &self.fields;
        let mut required = vec![
            ("First name", &f.first_name),
            ("Last name", &f.last_name),
            ("Email", &f.email),
            ("Phone", &f.phone),
            ("Area", &f.area),
            ("Type of care", &f.care_type),
            ("Urgency", &f.urgency),
        ];
        if self.variant == Variant::Consultation {
            required.push(("Relationship", &f.relationship));
        }

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| *label)
            .collect();
        if !missing.is_empty() {
            return Err(format!("Please fill in: {}.", missing.join(", ")));
        }
        if !f.email.contains('@') {
            return Err("Please enter a valid email address.".to_string());
        }
        if !f.consent {
            return Err("Please provide consent to proceed.".to_string());
        }
        Ok(())
    }

    /// Submit once and settle on `Success` or `Error`. No retry.
    pub async fn submit(&mut self, client: &ConsultationClient) -> &FormStatus {
        if let Err(problem) = self.check_shape() {
            self.status = FormStatus::Error(problem);
            return &self.status;
        }

        self.status = FormStatus::Submitting;
        if self.variant == Variant::Contact {
            self.fields.care_recipient_name.clear();
            self.fields.urgency = Urgency::JustExploring.label().to_string();
        }

        self.status = match client.submit(&self.fields).await {
            Ok(reply) if reply.is_success() => {
                let message = reply
                    .body
                    .and_then(|body| body.message)
                    .unwrap_or_default();
                if self.variant == Variant::Contact {
                    self.fields = Self::contact_defaults();
                }
                FormStatus::Success(message)
            }
            Ok(reply) => {
                tracing::debug!("Consultation endpoint answered {}", reply.status);
                let error = reply
                    .body
                    .and_then(|body| body.error)
                    .filter(|error| !error.is_empty())
                    .unwrap_or_else(|| FALLBACK_ERROR.to_string());
                FormStatus::Error(error)
            }
            Err(err) => {
                tracing::warn!("Consultation submission did not reach the server: {}", err);
                FormStatus::Error(NETWORK_ERROR.to_string())
            }
        };
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(mut form: ConsultationForm) -> ConsultationForm {
        let fields = form.fields_mut();
        fields.first_name = "Margaret".to_string();
        fields.last_name = "Okafor".to_string();
        fields.email = "margaret@example.co.uk".to_string();
        fields.phone = "07544 152585".to_string();
        fields.area = "Leeds".to_string();
        fields.consent = true;
        form.select_care_type(CareType::PersonalCare);
        form
    }

    #[test]
    fn test_consultation_form_requires_relationship_and_urgency() {
        let form = filled(ConsultationForm::consultation());
        let problem = form.check_shape().unwrap_err();
        assert_eq!(problem, "Please fill in: Urgency, Relationship.");

        let mut form = form;
        form.select_urgency(Urgency::Immediately);
        form.select_relationship(Relationship::SonOrDaughter);
        assert!(form.check_shape().is_ok());
    }

    #[test]
    fn test_contact_form_presets_urgency() {
        let form = filled(ConsultationForm::contact());
        assert_eq!(form.fields().urgency, "Just exploring options");
        assert!(form.check_shape().is_ok());
    }

    #[test]
    fn test_consent_is_required() {
        let mut form = filled(ConsultationForm::contact());
        form.fields_mut().consent = false;
        assert_eq!(
            form.check_shape().unwrap_err(),
            "Please provide consent to proceed."
        );
    }

    #[tokio::test]
    async fn test_shape_failure_never_reaches_network() {
        // Port 9 (discard) on localhost: any real request would fail with a
        // network error, which is not what we expect here.
        let client = ConsultationClient::new("http://127.0.0.1:9/api/consultation", "test-agent/1.0")
            .unwrap();
        let mut form = ConsultationForm::consultation();
        let status = form.submit(&client).await.clone();
        assert!(matches!(status, FormStatus::Error(ref m) if m.starts_with("Please fill in:")));
    }
}
