//! Short code generation and validation.
//!
//! Codes are 6-8 characters drawn from the 62-character alphanumeric alphabet.
//! Generation is not cryptographically secure; collisions are handled by the
//! allocator's retry loop, not here.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Characters a short code may contain.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 7;

pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 8;

/// Compiled pattern every stored code must match.
pub static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("valid code regex"));

/// Generates a random code of [`DEFAULT_CODE_LENGTH`] characters.
pub fn generate_code() -> String {
    generate_code_with_length(DEFAULT_CODE_LENGTH)
}

/// Generates a random code of `length` characters using the thread-local RNG.
pub fn generate_code_with_length(length: usize) -> String {
    generate_code_with(&mut rand::rng(), length)
}

/// Generates a code from the given randomness source.
///
/// Each character is drawn independently and uniformly from [`ALPHABET`].
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Returns true iff `code` is 6-8 ASCII letters or digits.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Validates a caller-provided code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is not 6-8 alphanumeric characters.
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code(code) {
        return Err(AppError::bad_request(
            "Code must be 6-8 alphanumeric characters",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
