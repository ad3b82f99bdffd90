//! Canadian Social Insurance Number (SIN) validation primitives.
//!
//! This crate is the single source of truth for SIN validation, used by the
//! `sin-validator` batch engine and the `sin` CLI.
//!
//! A SIN is nine ASCII digits. Digits are weighted `1, 2, 1, 2, 1, 2, 1, 2, 1`
//! from left to right; a doubled digit above 9 is replaced by the sum of its
//! digits, and the total must be a multiple of 10.
//!
//! ```
//! use sin_id::{DisplayState, Validity, classify};
//!
//! assert_eq!(classify("046454286"), Validity::Valid);
//! assert_eq!(
//!     DisplayState::from_validity(classify("123456789")).text(),
//!     " Invalid SIN Number... "
//! );
//! ```

mod display;
mod field;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub use display::{DisplayState, INVALID_TEXT, VALID_TEXT};
pub use field::SinField;

/// Number of digits in a SIN.
pub const SIN_LENGTH: usize = 9;

/// Errors from SIN validation.
///
/// Every variant maps to [`Validity::Invalid`]; the variants only exist to
/// explain *why* a value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinIdError {
    /// The input was empty.
    #[error("SIN is empty")]
    Empty,

    /// The input contains something other than an ASCII digit.
    #[error("Invalid character '{found}' at position {position}; a SIN contains only digits")]
    NonDigit {
        /// 1-based character position of the offending character.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// The input has the wrong number of digits.
    #[error("Wrong length (got {len} digits, expected {SIN_LENGTH})")]
    Length {
        /// Number of digits found.
        len: usize,
    },

    /// The check digit does not match the first eight digits.
    #[error("Checksum mismatch (expected check digit {expected}, found {found})")]
    Checksum {
        /// Check digit computed from the first eight digits.
        expected: u8,
        /// Check digit present in the input.
        found: u8,
    },
}

/// Outcome of classifying an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    /// Nine digits satisfying the checksum.
    Valid,
    /// Anything else.
    Invalid,
}

impl Validity {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }

    /// The dialog state shown for this outcome.
    #[must_use]
    pub fn display_state(self) -> DisplayState {
        DisplayState::from_validity(self)
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }
}

/// A validated Social Insurance Number.
///
/// Only obtainable through [`validate_sin`] or [`FromStr`], so holding a `Sin`
/// means the checksum passed. Serializes as the bare nine digits; `Display`
/// uses the grouped `046 454 286` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sin {
    digits: String,
}

impl Sin {
    /// The nine digits without separators.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Numbers starting with 9 are issued to temporary residents.
    #[must_use]
    pub fn is_temporary_resident(&self) -> bool {
        self.digits.starts_with('9')
    }
}

impl fmt::Display for Sin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // All bytes are ASCII digits, so byte slicing is on char boundaries.
        write!(
            f,
            "{} {} {}",
            &self.digits[0..3],
            &self.digits[3..6],
            &self.digits[6..9]
        )
    }
}

impl FromStr for Sin {
    type Err = SinIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_sin(s)
    }
}

impl AsRef<str> for Sin {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Weighted value of the digit at `index` (0-based).
///
/// Odd positions are doubled; a doubled value above 9 is reduced by 9, which
/// equals the sum of its two digits.
#[inline]
fn weighted(index: usize, digit: u8) -> u32 {
    let value = u32::from(digit);
    if index % 2 == 1 {
        let doubled = value * 2;
        if doubled > 9 { doubled - 9 } else { doubled }
    } else {
        value
    }
}

/// Weighted sum of a run of ASCII digits, starting at position 0.
fn weighted_sum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(i, b)| weighted(i, b - b'0'))
        .sum()
}

/// Compute the check digit for the first eight digits of a SIN.
///
/// Returns `None` unless `body` is exactly eight ASCII digits.
#[must_use]
pub fn check_digit(body: &str) -> Option<u8> {
    let bytes = body.as_bytes();
    if bytes.len() != SIN_LENGTH - 1 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let remainder = weighted_sum(bytes) % 10;
    // The ninth position has weight 1, so the digit closes the gap to a multiple of 10.
    u8::try_from((10 - remainder) % 10).ok()
}

/// Validate a SIN string and explain any failure.
///
/// The input is checked exactly as given; callers that accept user text
/// should trim it first (see [`SinField::blur`]).
///
/// # Errors
/// Returns the first [`SinIdError`] found, checking in order: empty input,
/// non-digit characters, length, checksum.
pub fn validate_sin(input: &str) -> Result<Sin, SinIdError> {
    if input.is_empty() {
        return Err(SinIdError::Empty);
    }

    if let Some((i, c)) = input.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(SinIdError::NonDigit {
            position: i + 1,
            found: c,
        });
    }

    // Only ASCII digits remain, so the byte length is the digit count.
    let bytes = input.as_bytes();
    if bytes.len() != SIN_LENGTH {
        return Err(SinIdError::Length { len: bytes.len() });
    }

    if weighted_sum(bytes) % 10 != 0 {
        let expected = check_digit(&input[..SIN_LENGTH - 1]).unwrap_or_default();
        return Err(SinIdError::Checksum {
            expected,
            found: bytes[SIN_LENGTH - 1] - b'0',
        });
    }

    Ok(Sin {
        digits: input.to_owned(),
    })
}

/// Whether `input` is a well-formed SIN.
#[inline]
#[must_use]
pub fn is_valid_sin(input: &str) -> bool {
    validate_sin(input).is_ok()
}

/// Classify `input` as [`Validity::Valid`] or [`Validity::Invalid`].
///
/// Never fails: malformed input of any kind is simply `Invalid`.
#[must_use]
pub fn classify(input: &str) -> Validity {
    Validity::from(is_valid_sin(input))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    // ---- classify ----

    #[test]
    fn test_reference_valid_sin() {
        assert_eq!(classify("046454286"), Validity::Valid);
    }

    #[test]
    fn test_reference_invalid_sin() {
        assert_eq!(classify("123456789"), Validity::Invalid);
    }

    #[test]
    fn test_other_valid_numbers() {
        assert!(is_valid_sin("130692544"));
        assert!(is_valid_sin("912345675"));
    }

    #[test]
    fn test_all_zeros_satisfies_checksum() {
        assert_eq!(classify("000000000"), Validity::Valid);
    }

    #[test]
    fn test_empty_is_invalid() {
        assert_eq!(classify(""), Validity::Invalid);
    }

    #[test]
    fn test_separators_and_whitespace_are_invalid() {
        assert_eq!(classify("046 454 286"), Validity::Invalid);
        assert_eq!(classify("046-454-286"), Validity::Invalid);
        assert_eq!(classify(" 046454286"), Validity::Invalid);
        assert_eq!(classify("046454286\n"), Validity::Invalid);
    }

    #[test]
    fn test_non_ascii_digits_are_invalid() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert_eq!(
            classify("\u{660}\u{664}\u{666}\u{664}\u{665}\u{664}\u{662}\u{668}\u{666}"),
            Validity::Invalid
        );
    }

    #[test]
    fn test_classify_is_idempotent() {
        for input in ["046454286", "123456789", "", "abc"] {
            let first = classify(input);
            for _ in 0..3 {
                assert_eq!(classify(input), first, "input {input:?}");
            }
        }
    }

    #[test]
    fn test_single_digit_change_breaks_checksum() {
        let valid = "046454286";
        for pos in 0..SIN_LENGTH {
            for d in b'0'..=b'9' {
                let mut bytes = valid.as_bytes().to_vec();
                if bytes[pos] == d {
                    continue;
                }
                bytes[pos] = d;
                let mutated = String::from_utf8(bytes).unwrap();
                assert!(!is_valid_sin(&mutated), "{mutated} should be invalid");
            }
        }
    }

    // ---- check_digit ----

    #[test]
    fn test_check_digit_known_values() {
        assert_eq!(check_digit("04645428"), Some(6));
        assert_eq!(check_digit("12345678"), Some(2));
        assert_eq!(check_digit("00000000"), Some(0));
    }

    #[test]
    fn test_check_digit_rejects_bad_body() {
        assert_eq!(check_digit(""), None);
        assert_eq!(check_digit("1234567"), None);
        assert_eq!(check_digit("123456789"), None);
        assert_eq!(check_digit("1234567a"), None);
    }

    #[test]
    fn test_check_digit_is_the_only_passing_digit() {
        for n in (0_u32..100_000_000).step_by(7_919_371) {
            let body = format!("{n:08}");
            let expected = check_digit(&body).unwrap();
            for d in 0..=9_u8 {
                let candidate = format!("{body}{d}");
                assert_eq!(is_valid_sin(&candidate), d == expected, "{candidate}");
            }
        }
    }

    // ---- validate_sin diagnostics ----

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate_sin(""), Err(SinIdError::Empty));
    }

    #[test]
    fn test_validate_non_digit_reports_first_position() {
        let err = validate_sin("04645x2y6").unwrap_err();
        assert_eq!(
            err,
            SinIdError::NonDigit {
                position: 6,
                found: 'x'
            }
        );
        assert!(err.to_string().contains("position 6"), "got: {err}");
    }

    #[test]
    fn test_validate_non_digit_checked_before_length() {
        let err = validate_sin("12a").unwrap_err();
        assert!(matches!(err, SinIdError::NonDigit { position: 3, .. }));
    }

    #[test]
    fn test_validate_wrong_length() {
        assert_eq!(
            validate_sin("04645428"),
            Err(SinIdError::Length { len: 8 })
        );
        assert_eq!(
            validate_sin("0464542860"),
            Err(SinIdError::Length { len: 10 })
        );
    }

    #[test]
    fn test_validate_checksum_mismatch() {
        let err = validate_sin("123456789").unwrap_err();
        assert_eq!(
            err,
            SinIdError::Checksum {
                expected: 2,
                found: 9
            }
        );
        assert!(
            err.to_string().contains("expected check digit 2"),
            "got: {err}"
        );
    }

    // ---- Sin ----

    #[test]
    fn test_sin_display_is_grouped() {
        let sin: Sin = "046454286".parse().unwrap();
        assert_eq!(sin.to_string(), "046 454 286");
        assert_eq!(sin.as_str(), "046454286");
    }

    #[test]
    fn test_sin_temporary_resident() {
        assert!(validate_sin("912345675").unwrap().is_temporary_resident());
        assert!(!validate_sin("046454286").unwrap().is_temporary_resident());
    }

    #[test]
    fn test_sin_serializes_as_digits() {
        let sin = validate_sin("130692544").unwrap();
        assert_eq!(serde_json::to_string(&sin).unwrap(), r#""130692544""#);
    }

    #[test]
    fn test_validity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Validity::Invalid).unwrap(),
            r#""invalid""#
        );
    }

    #[test]
    fn test_validity_from_bool() {
        assert_eq!(Validity::from(true), Validity::Valid);
        assert_eq!(Validity::from(false), Validity::Invalid);
        assert!(Validity::Valid.is_valid());
        assert!(!Validity::Invalid.is_valid());
    }
}
