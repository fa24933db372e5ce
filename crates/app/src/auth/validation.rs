//! Registration field validation.

use std::collections::BTreeMap;

use crate::auth::NewRegistration;

/// Validation messages keyed by request field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const USERNAME_MAX_CHARS: usize = 150;

const BLANK: &str = "This field may not be blank.";

/// Check a registration payload, collecting every problem rather than stopping at the first.
///
/// # Errors
///
/// Returns the per-field messages when any field is invalid.
pub fn validate_registration(registration: &NewRegistration) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Some(message) = username_error(&registration.username) {
        errors.entry("username".to_string()).or_default().push(message);
    }

    if !registration.email.is_empty() && !looks_like_email(&registration.email) {
        errors
            .entry("email".to_string())
            .or_default()
            .push("Enter a valid email address.".to_string());
    }

    if registration.password.is_empty() {
        errors
            .entry("password".to_string())
            .or_default()
            .push(BLANK.to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn username_error(username: &str) -> Option<String> {
    if username.trim().is_empty() {
        return Some(BLANK.to_string());
    }

    if username.chars().count() > USERNAME_MAX_CHARS {
        return Some(format!(
            "Ensure this field has no more than {USERNAME_MAX_CHARS} characters."
        ));
    }

    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');

    if !username.chars().all(allowed) {
        return Some(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .to_string(),
        );
    }

    None
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !domain.ends_with('.')
}
