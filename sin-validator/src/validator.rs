//! Candidate validation shared by every discovery format.

use serde::Serialize;
use sin_id::{DisplayState, Sin, SinIdError, Validity, validate_sin};

use crate::normalize::{Candidate, normalize_candidate};

/// Where a candidate was found inside a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// 1-indexed; 0 for JSON.
    pub line: usize,
    /// 1-indexed character column; 0 for JSON.
    pub column: usize,
    /// Empty for text formats.
    pub json_path: String,
}

/// A candidate together with its validation result.
#[derive(Debug, Clone)]
pub struct Finding {
    pub location: Location,
    pub candidate: Candidate,
    pub result: Result<Sin, SinIdError>,
}

/// Normalize and validate one raw candidate.
pub fn check_candidate(raw: &str, strip_groups: bool, location: Location) -> Finding {
    let candidate = normalize_candidate(raw, strip_groups);
    let result = validate_sin(&candidate.normalized);
    Finding {
        location,
        candidate,
        result,
    }
}

/// Outcome of validating one in-memory value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValueOutcome {
    /// The value as given.
    pub value: String,
    /// The value after trimming and separator normalization.
    pub normalized: String,
    pub validity: Validity,
    /// Dialog text for the outcome.
    pub display_text: &'static str,
    /// Reason for rejection; `None` when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValueOutcome {
    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        self.validity.display_state()
    }
}

impl From<Finding> for ValueOutcome {
    fn from(finding: Finding) -> Self {
        let validity = Validity::from(finding.result.is_ok());
        Self {
            value: finding.candidate.original,
            normalized: finding.candidate.normalized,
            validity,
            display_text: validity.display_state().text(),
            error: finding.result.err().map(|e| e.to_string()),
        }
    }
}
