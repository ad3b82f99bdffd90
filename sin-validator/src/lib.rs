//! # sin-validator
//!
//! Batch validator for Canadian Social Insurance Numbers found in data files.
//!
//! The **core validation** (normalization, checksum, reporting) is
//! independent of the **input strategy**; the filesystem scanner is the one
//! strategy provided.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use sin_validator::{FsSourceConfig, InputMode, ValidationConfig, validate_fs};
//!
//! let mut fs_config = FsSourceConfig::default();
//! fs_config.paths = vec![PathBuf::from("exports")];
//! fs_config.exclude = vec!["archive/*".to_owned()];
//!
//! let mut validation_config = ValidationConfig::default();
//! validation_config.input_mode = InputMode::Lenient;
//!
//! let report = validate_fs(&fs_config, &validation_config).unwrap();
//! println!("Values checked: {}", report.checked_values);
//! println!("Invalid values: {}", report.errors_count());
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
mod format;
mod normalize;
pub mod output;
mod report;
mod strategy;
mod validator;

use std::path::Path;

use tracing::{debug, info, warn};

pub use config::{DEFAULT_JSON_KEYS, DiscoveryMode, FsSourceConfig, InputMode, ValidationConfig};
pub use error::{ScanError, ScanErrorKind, ValidationError, ValidationErrorKind};
pub use report::{ValidEntry, ValidationReport};
pub use validator::ValueOutcome;

use strategy::ContentFormat;
use strategy::fs::{ScanResult, content_format_for, find_files, read_file_bounded};
use validator::{Finding, Location, check_candidate};

/// Validate in-memory values, one outcome per value in input order.
///
/// Values are trimmed; grouped forms are accepted when the config
/// normalizes groups (see [`ValidationConfig::normalizes_groups`]).
#[must_use]
pub fn validate_values<I, S>(values: I, config: &ValidationConfig) -> Vec<ValueOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let strip_groups = config.normalizes_groups();
    values
        .into_iter()
        .map(|v| ValueOutcome::from(check_candidate(v.as_ref(), strip_groups, Location::default())))
        .collect()
}

/// Validate SINs found in files on disk.
///
/// This is the primary public API.
///
/// # Arguments
///
/// * `fs_config` - Filesystem-specific source options (paths, exclude, limits)
/// * `validation_config` - Core validation config (input mode, discovery mode, JSON keys)
///
/// # Errors
///
/// Returns an error if `fs_config.paths` is empty or if any provided path does not exist.
/// Returns `Ok` with `scanned_files: 0` if paths exist but contain no scannable files.
/// Scan failures (unreadable files, parse errors, etc.) are reported in `report.scan_errors`.
pub fn validate_fs(
    fs_config: &FsSourceConfig,
    validation_config: &ValidationConfig,
) -> anyhow::Result<ValidationReport> {
    if fs_config.paths.is_empty() {
        anyhow::bail!("No paths provided for validation");
    }

    for path in &fs_config.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let (files, mut scan_errors) = find_files(fs_config);
    info!(files = files.len(), "discovered files to scan");

    let mut report = ValidationReport {
        scanned_files: 0,
        failed_files: scan_errors.len(),
        checked_values: 0,
        ok: true,
        validation_errors: Vec::new(),
        scan_errors: Vec::new(),
        valid_entries: Vec::new(),
    };
    let mut total_bytes: u64 = 0;

    for file_path in &files {
        if report.files_attempted() >= fs_config.max_files {
            warn!(max_files = fs_config.max_files, "file limit reached");
            scan_errors.push(ScanError {
                file: file_path.clone(),
                kind: ScanErrorKind::LimitExceeded,
                message: format!(
                    "Scan aborted: max_files limit ({}) reached; remaining files not scanned",
                    fs_config.max_files
                ),
            });
            report.failed_files += 1;
            break;
        }

        let content = match read_file_bounded(file_path, fs_config.max_file_size) {
            ScanResult::Ok(c) => c,
            ScanResult::Err(e) => {
                scan_errors.push(e);
                report.failed_files += 1;
                continue;
            }
        };

        let file_bytes = content.len() as u64;
        if total_bytes.saturating_add(file_bytes) > fs_config.max_total_bytes {
            warn!(
                max_total_bytes = fs_config.max_total_bytes,
                "byte limit reached"
            );
            scan_errors.push(ScanError {
                file: file_path.clone(),
                kind: ScanErrorKind::LimitExceeded,
                message: format!(
                    "Scan aborted: max_total_bytes limit ({}) reached; remaining files not scanned",
                    fs_config.max_total_bytes
                ),
            });
            report.failed_files += 1;
            break;
        }
        total_bytes = total_bytes.saturating_add(file_bytes);

        let findings = match content_format_for(file_path) {
            Some(ContentFormat::Text) => {
                format::text::scan_text_content(&content, validation_config, false)
            }
            Some(ContentFormat::Csv) => {
                format::text::scan_text_content(&content, validation_config, true)
            }
            Some(ContentFormat::Json) => {
                match format::json::scan_json_content(&content, file_path, validation_config) {
                    Ok(findings) => findings,
                    Err(scan_err) => {
                        scan_errors.push(scan_err);
                        report.failed_files += 1;
                        continue;
                    }
                }
            }
            None => continue,
        };

        debug!(
            file = %file_path.display(),
            candidates = findings.len(),
            "scanned file"
        );
        report.scanned_files += 1;
        record_findings(&mut report, file_path, findings, validation_config.report_valid);
    }

    report.scan_errors = scan_errors;
    report.ok = report.validation_errors.is_empty() && report.scan_errors.is_empty();
    Ok(report)
}

fn record_findings(
    report: &mut ValidationReport,
    file: &Path,
    findings: Vec<Finding>,
    report_valid: bool,
) {
    report.checked_values += findings.len();
    for finding in findings {
        let Finding {
            location,
            candidate,
            result,
        } = finding;
        match result {
            Ok(sin) if report_valid => report.valid_entries.push(ValidEntry {
                file: file.to_owned(),
                line: location.line,
                column: location.column,
                json_path: location.json_path,
                sin,
            }),
            Ok(_) => {}
            Err(e) => report.validation_errors.push(ValidationError {
                file: file.to_owned(),
                line: location.line,
                column: location.column,
                json_path: location.json_path,
                raw_value: candidate.original,
                normalized_value: candidate.normalized,
                kind: ValidationErrorKind::from(&e),
                error: e.to_string(),
            }),
        }
    }
}
