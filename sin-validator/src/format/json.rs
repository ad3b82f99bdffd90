//! JSON file scanner for SIN candidates.
//!
//! Walks the value tree. In `Lines` mode only values under a configured SIN
//! key are candidates (arrays under such a key included); in `Heuristic`
//! mode every string value is searched for SIN-shaped tokens.

use std::path::Path;

use serde_json::Value;

use crate::config::{DiscoveryMode, ValidationConfig};
use crate::error::{ScanError, ScanErrorKind};
use crate::format::text::find_sin_tokens;
use crate::validator::{Finding, Location, check_candidate};

/// Scan JSON content for SIN candidates.
///
/// # Errors
///
/// Returns a `ScanError` if the content is not valid JSON.
pub fn scan_json_content(
    content: &str,
    path: &Path,
    config: &ValidationConfig,
) -> Result<Vec<Finding>, ScanError> {
    let value: Value = serde_json::from_str(content).map_err(|e| ScanError {
        file: path.to_owned(),
        kind: ScanErrorKind::JsonParseError,
        message: format!("JSON parse error: {e}"),
    })?;

    let mut findings = Vec::new();
    walk_json_value(&value, config, "$", false, &mut findings);
    Ok(findings)
}

fn is_sin_key(config: &ValidationConfig, key: &str) -> bool {
    config.json_keys.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn json_location(json_path: &str) -> Location {
    Location {
        line: 0,
        column: 0,
        json_path: json_path.to_owned(),
    }
}

/// Walk a JSON value tree collecting findings.
///
/// `under_sin_key` is true when the nearest enclosing object key is one of
/// `config.json_keys`.
fn walk_json_value(
    value: &Value,
    config: &ValidationConfig,
    json_path: &str,
    under_sin_key: bool,
    findings: &mut Vec<Finding>,
) {
    let heuristic = config.discovery_mode == DiscoveryMode::Heuristic;
    let strip_groups = config.normalizes_groups();

    match value {
        Value::String(s) if heuristic => {
            for (_, token) in find_sin_tokens(s) {
                findings.push(check_candidate(token, true, json_location(json_path)));
            }
        }
        Value::String(s) => {
            let any_string = config.json_keys.is_empty() && s.bytes().any(|b| b.is_ascii_digit());
            if under_sin_key || any_string {
                findings.push(check_candidate(s, strip_groups, json_location(json_path)));
            }
        }
        // Numbers lose leading zeros, which is itself worth reporting.
        Value::Number(n) if under_sin_key && !heuristic => {
            findings.push(check_candidate(
                &n.to_string(),
                strip_groups,
                json_location(json_path),
            ));
        }
        Value::Object(map) => {
            for (key, val) in map {
                let child_path = format!("{json_path}.{key}");
                walk_json_value(val, config, &child_path, is_sin_key(config, key), findings);
            }
        }
        Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                let child_path = format!("{json_path}[{i}]");
                walk_json_value(val, config, &child_path, under_sin_key, findings);
            }
        }
        Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}
