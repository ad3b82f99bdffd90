//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport`.
//! Colour is left to the CLI layer.

use std::io::Write;

use crate::error::ValidationErrorKind;
use crate::report::ValidationReport;

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  SIN VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files scanned:  {}", report.scanned_files)?;
    writeln!(writer, "  Files failed:   {}", report.failed_files)?;
    writeln!(writer, "  Values checked: {}", report.checked_values)?;
    writeln!(writer, "  Invalid values: {}", report.errors_count())?;
    writeln!(writer)?;

    if !report.scan_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  SCAN ERRORS (files that could not be validated)")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for scan_err in &report.scan_errors {
            writeln!(writer, "{}", scan_err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.validation_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  INVALID SIN NUMBERS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for error in &report.validation_errors {
            writeln!(writer, "{}", error.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.valid_entries.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  VALID SIN NUMBERS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for entry in &report.valid_entries {
            if entry.json_path.is_empty() {
                writeln!(
                    writer,
                    "{}:{}:{}: {}",
                    entry.file.display(),
                    entry.line,
                    entry.column,
                    entry.sin
                )?;
            } else {
                writeln!(
                    writer,
                    "{}: {} (at {})",
                    entry.file.display(),
                    entry.sin,
                    entry.json_path
                )?;
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} value(s) in {} file(s) are valid SIN numbers",
            report.checked_values, report.scanned_files
        )?;
    } else {
        if !report.scan_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} file(s) could not be scanned; the run is incomplete",
                report.failed_files
            )?;
        }
        if !report.validation_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} invalid SIN number(s) found",
                report.errors_count()
            )?;
            writeln!(writer)?;
            writeln!(writer, "  To fix:")?;

            let has_kind = |kind: ValidationErrorKind| {
                report.validation_errors.iter().any(|e| e.kind == kind)
            };

            if has_kind(ValidationErrorKind::Empty) {
                writeln!(
                    writer,
                    "    - Empty values are not valid SINs; fill them in or remove the blank entries"
                )?;
            }
            if has_kind(ValidationErrorKind::Format) || has_kind(ValidationErrorKind::Length) {
                writeln!(writer, "    - A SIN is exactly 9 digits with no other characters")?;
                writeln!(
                    writer,
                    "    - Use --lenient to accept grouped forms (046 454 286, 046-454-286)"
                )?;
            }
            if has_kind(ValidationErrorKind::Checksum) {
                writeln!(
                    writer,
                    "    - Checksum failures usually mean a mistyped or transposed digit"
                )?;
            }
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
