//! Candidate normalization: turn raw discovered text into the string that is
//! handed to `sin_id::validate_sin`.

/// Separators accepted between the three digit groups of a SIN.
const GROUP_SEPARATORS: &[u8] = b" -";

/// A discovered candidate, before and after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The raw text as found.
    pub original: String,
    /// The text to validate.
    pub normalized: String,
}

/// Normalize a raw candidate.
///
/// The value is always trimmed. With `strip_groups`, a `3-3-3` grouped value
/// using one separator consistently (`046 454 286`, `046-454-286`) is
/// collapsed to its digits. Anything else is left as is so that validation
/// reports the real problem.
#[must_use]
pub fn normalize_candidate(raw: &str, strip_groups: bool) -> Candidate {
    let trimmed = raw.trim();
    let normalized = if strip_groups {
        strip_group_separators(trimmed).unwrap_or_else(|| trimmed.to_owned())
    } else {
        trimmed.to_owned()
    };
    Candidate {
        original: raw.to_owned(),
        normalized,
    }
}

fn strip_group_separators(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    if bytes.len() != 11 {
        return None;
    }
    let sep = bytes[3];
    if !GROUP_SEPARATORS.contains(&sep) || bytes[7] != sep {
        return None;
    }
    let digits: String = value
        .char_indices()
        .filter(|(i, _)| *i != 3 && *i != 7)
        .map(|(_, c)| c)
        .collect();
    digits.bytes().all(|b| b.is_ascii_digit()).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let c = normalize_candidate("  046454286 \r", false);
        assert_eq!(c.normalized, "046454286");
        assert_eq!(c.original, "  046454286 \r");
    }

    #[test]
    fn test_strict_keeps_separators() {
        let c = normalize_candidate("046 454 286", false);
        assert_eq!(c.normalized, "046 454 286");
    }

    #[test]
    fn test_strips_space_groups() {
        assert_eq!(
            normalize_candidate("046 454 286", true).normalized,
            "046454286"
        );
    }

    #[test]
    fn test_strips_hyphen_groups() {
        assert_eq!(
            normalize_candidate("046-454-286", true).normalized,
            "046454286"
        );
    }

    #[test]
    fn test_mixed_separators_left_alone() {
        assert_eq!(
            normalize_candidate("046 454-286", true).normalized,
            "046 454-286"
        );
    }

    #[test]
    fn test_wrong_grouping_left_alone() {
        assert_eq!(
            normalize_candidate("0464 54 286", true).normalized,
            "0464 54 286"
        );
        assert_eq!(
            normalize_candidate("04a-454-286", true).normalized,
            "04a-454-286"
        );
    }
}
