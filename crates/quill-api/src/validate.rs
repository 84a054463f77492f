//! Input-shape validation with human-readable messages. Each helper appends
//! to the caller's error list; the caller turns a non-empty list into one
//! Validation failure with the messages joined by spaces.

/// Require a non-empty field, returning its value when present.
pub fn required<'a>(field: &str, value: Option<&'a str>, errors: &mut Vec<String>) -> Option<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(format!("The {field} field is required."));
            None
        }
    }
}

pub fn max_length(field: &str, value: &str, max: usize, errors: &mut Vec<String>) {
    if value.chars().count() > max {
        errors.push(format!(
            "The {field} field must not be greater than {max} characters."
        ));
    }
}

/// Structural email check: one `@`, a non-empty local part, and a dotted
/// domain. Deliberately permissive beyond that.
pub fn is_valid_email(value: &str) -> bool {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// At least 8 characters with one lowercase letter, one uppercase letter,
/// and one digit.
pub fn password_complexity(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
}
