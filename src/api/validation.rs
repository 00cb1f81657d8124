use crate::error::{AppError, FieldErrors};

pub const URL_MAX_LENGTH: usize = 50;
pub const TITLE_MAX_LENGTH: usize = 100;
pub const BODY_MAX_LENGTH: usize = 10_000;
pub const SEO_MAX_LENGTH: usize = 156;

pub const INVALID_URL: &str = "Invalid URL: Use only letters, numbers and dashes.";

/// Reject requests that do not carry the configured service token.
pub fn check_service_token(provided: &str, expected: &str) -> Result<(), AppError> {
    if provided != expected {
        return Err(AppError::Auth("Invalid service token".into()));
    }
    Ok(())
}

/// Validate a url slug and return it lowercased.
///
/// Users may type mixed case; slugs are always stored lowercase.
pub fn validate_slug(errors: &mut FieldErrors, field: &str, value: &str) -> String {
    validate_length(errors, field, value, 1, URL_MAX_LENGTH);
    if !value.is_empty() && !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        errors.add(field, INVALID_URL);
    }
    value.to_lowercase()
}

/// Record a message when `value` has fewer than `min` or more than `max`
/// characters.
pub fn validate_length(errors: &mut FieldErrors, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min {
        if min == 1 {
            errors.add(field, format!("{field} is required"));
        } else {
            errors.add(field, format!("must contain at least {min} characters"));
        }
    } else if len > max {
        errors.add(field, format!("must contain at most {max} characters"));
    }
}

/// Like [`validate_length`] for optional fields; blank input becomes `None`.
pub fn validate_optional(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    max: usize,
) -> Option<String> {
    let value = value.filter(|v| !v.trim().is_empty())?;
    validate_length(errors, field, &value, 0, max);
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_token() {
        assert!(check_service_token("abc", "abc").is_ok());
        assert!(matches!(
            check_service_token("abd", "abc"),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_slug_is_lowercased() {
        let mut errors = FieldErrors::new();
        assert_eq!(validate_slug(&mut errors, "url", "Alfa-Romeo-4C"), "alfa-romeo-4c");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_slug_rejects_other_characters() {
        for bad in ["alfa romeo", "alfa_romeo", "alfa/romeo", "citroën"] {
            let mut errors = FieldErrors::new();
            validate_slug(&mut errors, "url", bad);
            assert_eq!(errors.get("url"), [INVALID_URL.to_string()], "{bad}");
        }
    }

    #[test]
    fn test_slug_length_bounds() {
        let mut errors = FieldErrors::new();
        validate_slug(&mut errors, "url", "");
        assert_eq!(errors.get("url"), ["url is required".to_string()]);

        let mut errors = FieldErrors::new();
        validate_slug(&mut errors, "url", &"a".repeat(URL_MAX_LENGTH));
        assert!(errors.is_empty());

        let mut errors = FieldErrors::new();
        validate_slug(&mut errors, "url", &"a".repeat(URL_MAX_LENGTH + 1));
        assert_eq!(errors.get("url"), ["must contain at most 50 characters".to_string()]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut errors = FieldErrors::new();
        validate_length(&mut errors, "title", &"é".repeat(TITLE_MAX_LENGTH), 1, TITLE_MAX_LENGTH);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_optional_blank_becomes_none() {
        let mut errors = FieldErrors::new();
        assert_eq!(validate_optional(&mut errors, "seo", Some("  ".into()), SEO_MAX_LENGTH), None);
        assert_eq!(validate_optional(&mut errors, "seo", None, SEO_MAX_LENGTH), None);
        assert!(errors.is_empty());

        let too_long = "x".repeat(SEO_MAX_LENGTH + 1);
        assert!(validate_optional(&mut errors, "seo", Some(too_long), SEO_MAX_LENGTH).is_some());
        assert_eq!(errors.get("seo").len(), 1);
    }
}
