/// Shared validation rules for post content
///
/// Both create and update run the same rules, and both persist trimmed
/// values, so the stored content can never be padded or blank.
use std::borrow::Cow;
use validator::ValidationError;

/// Maximum title length in characters (after trimming)
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum description length in characters (after trimming)
pub const DESCRIPTION_MAX_CHARS: usize = 10_000;

/// Title must be non-empty after trimming and at most 200 characters
pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    trimmed_length_rule(
        value,
        TITLE_MAX_CHARS,
        "title is required",
        "title must be at most 200 characters",
    )
}

/// Description must be non-empty after trimming and at most 10000 characters
pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    trimmed_length_rule(
        value,
        DESCRIPTION_MAX_CHARS,
        "description is required",
        "description must be at most 10000 characters",
    )
}

fn trimmed_length_rule(
    value: &str,
    max_chars: usize,
    empty_message: &'static str,
    overflow_message: &'static str,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed(empty_message));
        return Err(error);
    }

    if trimmed.chars().count() > max_chars {
        let mut error = ValidationError::new("length");
        error.message = Some(Cow::Borrowed(overflow_message));
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_at_limit_passes() {
        let title = "a".repeat(TITLE_MAX_CHARS);
        assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn title_over_limit_fails() {
        let title = "a".repeat(TITLE_MAX_CHARS + 1);
        let err = validate_title(&title).unwrap_err();
        assert_eq!(err.code, "length");
    }

    #[test]
    fn empty_title_fails() {
        let err = validate_title("").unwrap_err();
        assert_eq!(err.code, "required");
    }

    #[test]
    fn whitespace_only_title_fails() {
        let err = validate_title("   \t  ").unwrap_err();
        assert_eq!(err.code, "required");
    }

    #[test]
    fn surrounding_whitespace_does_not_count_against_the_limit() {
        let padded = format!("  {}  ", "a".repeat(TITLE_MAX_CHARS));
        assert!(validate_title(&padded).is_ok());
    }

    #[test]
    fn length_is_measured_in_characters_not_bytes() {
        // 200 multibyte characters are within the limit even though the
        // byte length is far larger.
        let title = "あ".repeat(TITLE_MAX_CHARS);
        assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn description_boundaries() {
        assert!(validate_description(&"d".repeat(DESCRIPTION_MAX_CHARS)).is_ok());
        assert!(validate_description(&"d".repeat(DESCRIPTION_MAX_CHARS + 1)).is_err());
        assert!(validate_description(" ").is_err());
    }
}
