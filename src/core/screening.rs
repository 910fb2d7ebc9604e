use crate::domain::model::{SanitizedConsultation, RELATIONSHIP_NOT_SPECIFIED};
use crate::utils::error::{ConsultationError, Result};
use crate::utils::validation::{has_min_chars, is_valid_email, is_valid_phone};

pub const MIN_USER_AGENT_CHARS: usize = 10;
pub const MIN_NAME_CHARS: usize = 2;

/// Reject callers that do not identify themselves like a browser would.
pub fn screen_user_agent(user_agent: Option<&str>) -> Result<()> {
    match user_agent {
        None => Err(ConsultationError::SuspectedBot {
            reason: "missing user agent".to_string(),
        }),
        Some(agent) if agent.chars().count() < MIN_USER_AGENT_CHARS => {
            Err(ConsultationError::SuspectedBot {
                reason: format!("user agent too short ({} chars)", agent.chars().count()),
            })
        }
        Some(_) => Ok(()),
    }
}

/// Check a sanitized request, defaulting the optional relationship.
///
/// Checks run in a fixed order and the first failure wins, so the submitter
/// always sees the same message for the same input.
pub fn validate_consultation(mut request: SanitizedConsultation) -> Result<SanitizedConsultation> {
    let required = [
        ("firstName", &request.first_name),
        ("lastName", &request.last_name),
        ("email", &request.email),
        ("phone", &request.phone),
        ("area", &request.area),
        ("careType", &request.care_type),
        ("urgency", &request.urgency),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(ConsultationError::validation(
            field,
            "Please fill in all required fields.",
        ));
    }

    if request.relationship.is_empty() {
        request.relationship = RELATIONSHIP_NOT_SPECIFIED.to_string();
    }

    if !is_valid_email(&request.email) {
        return Err(ConsultationError::validation(
            "email",
            "Please enter a valid email address.",
        ));
    }

    if !is_valid_phone(&request.phone) {
        return Err(ConsultationError::validation(
            "phone",
            "Please enter a valid phone number.",
        ));
    }

    if !request.consent {
        return Err(ConsultationError::validation(
            "consent",
            "Please provide consent to proceed.",
        ));
    }

    if !has_min_chars(&request.first_name, MIN_NAME_CHARS)
        || !has_min_chars(&request.last_name, MIN_NAME_CHARS)
    {
        return Err(ConsultationError::validation(
            "name",
            "Please enter a valid name.",
        ));
    }

    Ok(request)
}
