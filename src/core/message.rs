use crate::domain::model::{OutboundEmail, SanitizedConsultation, CARE_RECIPIENT_NOT_SPECIFIED};
use chrono::{DateTime, SecondsFormat, Utc};

pub fn compose_subject(request: &SanitizedConsultation) -> String {
    format!("New Consultation Request from {}", request.full_name())
}

pub fn compose_body(
    request: &SanitizedConsultation,
    site_name: &str,
    submitted_at: DateTime<Utc>,
    forwarded_for: Option<&str>,
) -> String {
    let recipient = non_empty_or(&request.care_recipient_name, CARE_RECIPIENT_NOT_SPECIFIED);
    let message = non_empty_or(&request.message, "No additional message provided.");
    let origin = forwarded_for
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or("Unknown");

    format!(
        "NEW CONSULTATION REQUEST
========================

CONTACT INFORMATION
-------------------
Name: {name}
Email: {email}
Phone: {phone}
Area: {area}

CARE DETAILS
------------
Type of Care: {care_type}
Relationship: {relationship}
Care Recipient: {recipient}
Urgency: {urgency}

MESSAGE
-------
{message}

========================
This request was submitted via the {site_name} website.
Submitted at: {submitted_at}
IP: {origin}
Please respond within 24 hours.",
        name = request.full_name(),
        email = request.email,
        phone = request.phone,
        area = request.area,
        care_type = request.care_type,
        relationship = request.relationship,
        urgency = request.urgency,
        submitted_at = submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

pub fn compose_email(
    request: &SanitizedConsultation,
    to: &str,
    site_name: &str,
    submitted_at: DateTime<Utc>,
    forwarded_for: Option<&str>,
) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        from_name: request.full_name(),
        subject: compose_subject(request),
        message: compose_body(request, site_name, submitted_at, forwarded_for),
        reply_to: request.email.clone(),
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> SanitizedConsultation {
        SanitizedConsultation {
            first_name: "Margaret".to_string(),
            last_name: "Okafor".to_string(),
            email: "margaret@example.co.uk".to_string(),
            phone: "07544 152585".to_string(),
            area: "Leeds".to_string(),
            care_type: "Respite Care".to_string(),
            relationship: "Son/Daughter".to_string(),
            care_recipient_name: String::new(),
            urgency: "Immediately".to_string(),
            message: String::new(),
            consent: true,
        }
    }

    #[test]
    fn test_email_envelope() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 9, 30, 0).unwrap();
        let email = compose_email(&request(), "office@example.com", "Example Care", at, None);

        assert_eq!(email.to, "office@example.com");
        assert_eq!(email.from_name, "Margaret Okafor");
        assert_eq!(email.reply_to, "margaret@example.co.uk");
        assert_eq!(email.subject, "New Consultation Request from Margaret Okafor");
    }

    #[test]
    fn test_body_fallbacks_and_footer() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 9, 30, 0).unwrap();
        let body = compose_body(&request(), "Example Care", at, Some(" 203.0.113.9 "));

        assert!(body.starts_with("NEW CONSULTATION REQUEST"));
        assert!(body.contains("Care Recipient: Not specified"));
        assert!(body.contains("No additional message provided."));
        assert!(body.contains("submitted via the Example Care website."));
        assert!(body.contains("Submitted at: 2026-03-04T09:30:00.000Z"));
        assert!(body.contains("IP: 203.0.113.9"));

        let body = compose_body(&request(), "Example Care", at, None);
        assert!(body.contains("IP: Unknown"));
    }
}
