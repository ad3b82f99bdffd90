//! Plain-text and CSV scanner for SIN candidates.
//!
//! `Lines` discovery treats every record as a candidate (a line, or a CSV
//! field containing a digit). `Heuristic` discovery runs a regex over each
//! line and keeps only SIN-shaped tokens that are not part of a longer run of
//! digits.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{DiscoveryMode, ValidationConfig};
use crate::validator::{Finding, Location, check_candidate};

/// Nine digits, optionally grouped `3-3-3` by a space or hyphen.
///
/// Mixed separators (`046 454-286`) also match, so such a token is reported
/// as invalid rather than skipped. Digit boundaries are checked by [`find_sin_tokens`]
/// since the regex crate has no lookaround.
static SIN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"[0-9]{3}[ -]?[0-9]{3}[ -]?[0-9]{3}") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid discovery regex: {err}"),
    }
});

/// Number of characters in `s[..byte_offset]`, plus one.
fn char_column(s: &str, byte_offset: usize) -> usize {
    s[..byte_offset].chars().count() + 1
}

/// Find SIN-shaped tokens in `text`, returning `(byte_offset, token)` pairs.
///
/// A match touching another digit is rejected and the search resumes one
/// character after its start, so a SIN preceded by an unrelated digit group
/// (`unit 123 046454286`) is still found.
pub fn find_sin_tokens(text: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while let Some(m) = SIN_SHAPE.find_at(text, pos) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        if before.is_none_or(|c| !c.is_ascii_digit()) && after.is_none_or(|c| !c.is_ascii_digit()) {
            tokens.push((m.start(), m.as_str()));
            pos = m.end();
        } else {
            // Matches start on an ASCII digit, so one byte is one character.
            pos = m.start() + 1;
        }
    }
    tokens
}

/// Split a CSV record on commas outside double quotes, returning
/// `(byte_offset, field)` pairs. Quotes are kept in the field.
fn split_csv_fields(line: &str) -> Vec<(usize, &str)> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, b) in line.bytes().enumerate() {
        match b {
            // An escaped `""` toggles twice.
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                fields.push((start, &line[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push((start, &line[start..]));
    fields
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(field: &str) -> &str {
    let trimmed = field.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(field)
}

/// Scan text content. With `csv`, each comma-separated field is a record.
pub fn scan_text_content(content: &str, config: &ValidationConfig, csv: bool) -> Vec<Finding> {
    let strip_groups = config.normalizes_groups();
    let mut findings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;

        if config.discovery_mode == DiscoveryMode::Heuristic {
            for (offset, token) in find_sin_tokens(line) {
                findings.push(check_candidate(
                    token,
                    true,
                    Location {
                        line: line_num,
                        column: char_column(line, offset),
                        json_path: String::new(),
                    },
                ));
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if csv {
            for (field_offset, field) in split_csv_fields(line) {
                if !field.bytes().any(|b| b.is_ascii_digit()) {
                    continue;
                }
                let leading = field.len() - field.trim_start().len();
                findings.push(check_candidate(
                    unquote(field),
                    strip_groups,
                    Location {
                        line: line_num,
                        column: char_column(line, field_offset + leading),
                        json_path: String::new(),
                    },
                ));
            }
        } else {
            let leading = line.len() - line.trim_start().len();
            findings.push(check_candidate(
                line,
                strip_groups,
                Location {
                    line: line_num,
                    column: char_column(line, leading),
                    json_path: String::new(),
                },
            ));
        }
    }

    findings
}
