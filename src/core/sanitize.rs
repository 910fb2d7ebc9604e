use crate::domain::model::{ConsultationRequest, SanitizedConsultation};
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_FIELD_CHARS: usize = 1000;

static ANGLE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>]").expect("angle bracket pattern compiles"));
static SCRIPT_PROTOCOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("script protocol pattern compiles"));
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+=").expect("event handler pattern compiles"));

/// Strip markup-ish fragments, trim, and cap at [`MAX_FIELD_CHARS`] characters.
///
/// Removal runs until nothing more matches: deleting one fragment can splice
/// its neighbours into a new one (`javajavascript:script:`).
pub fn sanitize_input(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let pass = ANGLE_BRACKETS.replace_all(&current, "");
        let pass = SCRIPT_PROTOCOL.replace_all(&pass, "");
        let pass = EVENT_HANDLER.replace_all(&pass, "").into_owned();
        if pass == current {
            break;
        }
        current = pass;
    }
    current.trim().chars().take(MAX_FIELD_CHARS).collect()
}

pub fn sanitize(request: &ConsultationRequest) -> SanitizedConsultation {
    SanitizedConsultation {
        first_name: sanitize_input(&request.first_name),
        last_name: sanitize_input(&request.last_name),
        email: sanitize_input(&request.email).to_lowercase(),
        phone: sanitize_input(&request.phone),
        area: sanitize_input(&request.area),
        care_type: sanitize_input(&request.care_type),
        relationship: sanitize_input(&request.relationship),
        care_recipient_name: sanitize_input(&request.care_recipient_name),
        urgency: sanitize_input(&request.urgency),
        message: sanitize_input(&request.message),
        consent: request.consent,
    }
}
