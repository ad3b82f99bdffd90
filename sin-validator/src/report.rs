//! Validation report types.

use std::path::PathBuf;

use serde::Serialize;
use sin_id::Sin;

use crate::error::{ScanError, ValidationError};

/// A valid SIN found during a run (only recorded when `report_valid` is set).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidEntry {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub json_path: String,
    pub sin: Sin,
}

/// Result of a validation run.
///
/// Check both `validation_errors` and `scan_errors`: a non-empty
/// `scan_errors` means some files were never looked at.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Number of files successfully scanned (read + parsed).
    pub scanned_files: usize,
    /// Number of files that could not be scanned (read/parse failures).
    pub failed_files: usize,
    /// Number of candidate values checked across all scanned files.
    pub checked_values: usize,
    /// Whether every checked value was valid AND no scan errors occurred.
    pub ok: bool,
    /// Invalid values found in scanned files.
    pub validation_errors: Vec<ValidationError>,
    /// Files that could not be read or parsed.
    pub scan_errors: Vec<ScanError>,
    /// Valid values, when requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub valid_entries: Vec<ValidEntry>,
}

impl ValidationReport {
    /// Total number of files attempted (scanned + failed).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.scanned_files + self.failed_files
    }

    /// Number of invalid values found.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.validation_errors.len()
    }

    /// Number of values that passed.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.checked_values - self.validation_errors.len()
    }
}
