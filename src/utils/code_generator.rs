//! Short code generation and validation utilities.
//!
//! Generated codes use lowercase letters and digits. User-supplied codes may be
//! any ASCII alphanumeric string of 1-10 characters that does not collide with
//! a route.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Alphabet for generated codes.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes (36^8, about 2.8e12 combinations).
pub const GENERATED_CODE_LENGTH: usize = 8;

/// Maximum length of a user-supplied code.
pub const MAX_CODE_LENGTH: usize = 10;

/// Codes that would be shadowed by fixed routes.
const RESERVED_CODES: &[&str] = &["urls", "shorturls", "stats", "health"];

/// Generates a random short code from the thread-local RNG.
///
/// Uniqueness is not guaranteed here; [`crate::domain::Registry`] retries
/// under its lock until the code is free.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` matches the code format: ASCII alphanumeric, 1-10 characters.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-10 characters
/// - Allowed characters: ASCII letters and digits
/// - Cannot be a reserved route name (compared case-insensitively)
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Shortcode must be 1-10 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !is_valid_code(code) {
        return Err(AppError::bad_request(
            "Shortcode can only contain letters and digits",
            json!({ "shortcode": code }),
        ));
    }

    if RESERVED_CODES.iter().any(|r| r.eq_ignore_ascii_case(code)) {
        return Err(AppError::bad_request(
            "This shortcode is reserved",
            json!({ "shortcode": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_uses_alphabet() {
        let code = generate_code();
        assert!(
            code.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_generated_codes_pass_format_check() {
        for _ in 0..100 {
            assert!(is_valid_code(&generate_code()));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_is_valid_code_bounds() {
        assert!(is_valid_code("a"));
        assert!(is_valid_code("abcde12345"));
        assert!(is_valid_code("MixedCase1"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("abcde123456"));
    }

    #[test]
    fn test_validate_custom_code_accepts_short_codes() {
        assert!(validate_custom_code("abc").is_ok());
        assert!(validate_custom_code("x1").is_ok());
    }

    #[test]
    fn test_validate_too_long() {
        let err = validate_custom_code("abcdefghijk").unwrap_err();
        assert!(err.to_string().contains("1-10 characters"));
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_special_characters() {
        let err = validate_custom_code("my-code").unwrap_err();
        assert!(err.to_string().contains("letters and digits"));

        assert!(validate_custom_code("my code").is_err());
        assert!(validate_custom_code("código").is_err());
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
        assert!(validate_custom_code("STATS").is_err());
    }
}
