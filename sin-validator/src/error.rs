//! Error types for SIN validation runs.

use std::path::PathBuf;

use serde::Serialize;
use sin_id::SinIdError;

/// The kind of scan-level failure that prevented a file from being validated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content could not be parsed as valid JSON.
    JsonParseError,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The resolved path is outside the scan root (symlink escape).
    OutsideRoot,
    /// A resource limit (`max_files` or `max_total_bytes`) was reached, truncating the scan.
    LimitExceeded,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A file that could not be validated at all.
///
/// Distinct from [`ValidationError`], which is a value that was found and
/// rejected. Callers must treat scan errors as failures: the run did not
/// cover everything it was asked to.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    pub file: PathBuf,
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [scan error] {}", self.file.display(), self.message)
    }
}

/// Why a candidate was rejected, one variant per [`SinIdError`] class.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ValidationErrorKind {
    /// The value was empty after trimming.
    Empty,
    /// The value contains a character other than an ASCII digit.
    Format,
    /// The value has the wrong number of digits.
    Length,
    /// The check digit does not match.
    Checksum,
}

impl From<&SinIdError> for ValidationErrorKind {
    fn from(err: &SinIdError) -> Self {
        match err {
            SinIdError::Empty => Self::Empty,
            SinIdError::NonDigit { .. } => Self::Format,
            SinIdError::Length { .. } => Self::Length,
            SinIdError::Checksum { .. } => Self::Checksum,
        }
    }
}

/// A single invalid SIN found in a file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidationError {
    /// File path where the value was found
    pub file: PathBuf,
    /// Line number (1-indexed) for text files; 0 for JSON
    pub line: usize,
    /// Column number (1-indexed) for text files; 0 for JSON
    pub column: usize,
    /// JSON path (e.g., "$.employees[2].sin") for JSON files; empty for text
    pub json_path: String,
    /// The raw value as it appeared in the file
    pub raw_value: String,
    /// The value after trimming and separator normalization
    pub normalized_value: String,
    /// Class of the rejection
    pub kind: ValidationErrorKind,
    /// Human-readable reason for rejection
    pub error: String,
}

impl ValidationError {
    /// Format the error for human-readable output.
    ///
    /// For text errors: `{file}:{line}:{column}: {error} [{raw_value}]`
    /// For JSON errors: `{file}: {error} [{raw_value}] (at {json_path})`
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        if self.line > 0 && self.column > 0 {
            format!(
                "{}:{}:{}: {} [{}]",
                self.file.display(),
                self.line,
                self.column,
                self.error,
                self.raw_value
            )
        } else if !self.json_path.is_empty() {
            format!(
                "{}: {} [{}] (at {})",
                self.file.display(),
                self.error,
                self.raw_value,
                self.json_path
            )
        } else {
            format!(
                "{}: {} [{}]",
                self.file.display(),
                self.error,
                self.raw_value
            )
        }
    }
}
