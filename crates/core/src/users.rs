//! User account validation.

use std::sync::OnceLock;

use regex::Regex;

/// Maximum length of an email address in characters.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of a first or last name in characters.
pub const MAX_NAME_LENGTH: usize = 150;

/// Validate an email address.
///
/// Intentionally permissive: one `@`, a non-empty local part, and a domain
/// with at least one dot. Deliverability is the mail system's problem.
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(format!(
            "Email exceeds maximum length of {MAX_EMAIL_LENGTH} characters"
        ));
    }
    if re.is_match(email) {
        Ok(())
    } else {
        Err("Enter a valid email address".to_string())
    }
}

/// Validate a first or last name: may be empty, must fit the length bound.
pub fn validate_person_name(name: &str) -> Result<(), String> {
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}
