use crate::utils::error::{ConsultationError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// ASCII digits, spaces, dashes, plus and parentheses; 10 to 20 of them.
// `\d` would also admit Arabic-Indic and full-width digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s\-+()]{10,20}$").expect("phone pattern compiles"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email) && email.len() <= MAX_EMAIL_LENGTH
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ConsultationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConsultationError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ConsultationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_email_address(field_name: &str, email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(ConsultationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: email.to_string(),
            reason: "Not a valid email address".to_string(),
        });
    }
    Ok(())
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<()> {
    addr.parse::<std::net::SocketAddr>()
        .map(|_| ())
        .map_err(|e| ConsultationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConsultationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ConsultationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("jane.doe+care@example.co.uk"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaced out@example.com"));
        assert!(!is_valid_email("nodot@example"));

        let long_local = "a".repeat(250);
        assert!(!is_valid_email(&format!("{}@b.co", long_local)));
    }

    #[test]
    fn test_phone_shape() {
        assert!(is_valid_phone("07544 152585"));
        assert!(is_valid_phone("+44 (0) 7544-152585"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("0754415258x"));
        assert!(!is_valid_phone("0123456789012345678901"));
        assert!(!is_valid_phone("٠٧٥٤٤١٥٢٥٨٥"));
        assert!(!is_valid_phone("０７５４４１５２５８５"));
    }

    #[test]
    fn test_min_chars_counts_characters() {
        assert!(has_min_chars("Jo", 2));
        assert!(!has_min_chars("J", 2));
        assert!(has_min_chars("Zoë", 3));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("relay_endpoint", "https://api.web3forms.com/submit").is_ok());
        assert!(validate_url("relay_endpoint", "http://localhost:8080/submit").is_ok());
        assert!(validate_url("relay_endpoint", "").is_err());
        assert!(validate_url("relay_endpoint", "invalid-url").is_err());
        assert!(validate_url("relay_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("listen_addr", "0.0.0.0:3000").is_ok());
        assert!(validate_socket_addr("listen_addr", "localhost").is_err());
    }
}
