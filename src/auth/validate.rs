//! Field validators for the auth and profile forms.
//!
//! DESIGN
//! ======
//! Pure, synchronous, allocation-free checks so forms can run them on every
//! input event. Each validator returns `Ok(())` or a fixed message suitable
//! for inline display next to the field. Network-side constraints (duplicate
//! email, weak password per platform policy) are handled separately when the
//! platform rejects the call.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const PHONE_MIN: usize = 10;
const PHONE_MAX: usize = 15;
const PASSWORD_MIN: usize = 6;

/// Letters and spaces only, 2–50 characters. Empty input gets its own
/// message so forms can distinguish "missing" from "malformed".
pub fn validate_name(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Name is required.");
    }
    let len = value.chars().count();
    if len < NAME_MIN || len > NAME_MAX || !value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err("Name must be 2-50 letters and spaces.");
    }
    Ok(())
}

/// 10–15 digits, any leading digit.
pub fn validate_phone(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Phone number is required.");
    }
    if !digits_in_range(value, PHONE_MIN, PHONE_MAX) {
        return Err("Phone number must be 10-15 digits.");
    }
    Ok(())
}

/// 10–15 digits with a mobile prefix digit of 6–9. Used by the provider
/// contact step, which collects a reachable mobile number rather than any
/// phone line.
pub fn validate_mobile(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Mobile number is required.");
    }
    if !digits_in_range(value, PHONE_MIN, PHONE_MAX) || !matches!(value.as_bytes()[0], b'6'..=b'9') {
        return Err("Mobile number must be 10-15 digits starting with 6-9.");
    }
    Ok(())
}

/// Lightweight shape check: exactly one `@` with at least one `.` after it.
/// Deliverability is the platform's problem.
pub fn validate_email(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Email is required.");
    }
    let mut parts = value.split('@');
    let (local, domain) = (parts.next().unwrap_or(""), parts.next().unwrap_or(""));
    let well_formed =
        parts.next().is_none() && !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.');
    if well_formed { Ok(()) } else { Err("Enter a valid email address.") }
}

/// Local minimum-length check; the platform enforces its own policy on top.
pub fn validate_password(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Password is required.");
    }
    if value.chars().count() < PASSWORD_MIN {
        return Err("Password must be at least 6 characters.");
    }
    Ok(())
}

/// Non-empty check with a caller-supplied message, for selects and
/// kind-specific fields.
pub fn validate_required<'a>(value: &str, message: &'a str) -> Result<(), &'a str> {
    if value.trim().is_empty() { Err(message) } else { Ok(()) }
}

fn digits_in_range(value: &str, min: usize, max: usize) -> bool {
    value.len() >= min && value.len() <= max && value.bytes().all(|b| b.is_ascii_digit())
}
