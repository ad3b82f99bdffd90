//! Configuration types for SIN validation.
//!
//! Split into core validation config (universal) and source-specific config
//! (how content is discovered). The core API does not leak filesystem
//! concerns.

use std::path::PathBuf;

/// How a raw candidate is turned into the digit string that gets validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputMode {
    /// After trimming, the candidate must be nine bare digits.
    #[default]
    Strict,
    /// Also accept the grouped `046 454 286` and `046-454-286` forms.
    /// The separator must be the same in both places.
    Lenient,
}

/// Controls how SIN candidates are discovered in file content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiscoveryMode {
    /// Each record is one candidate: a line of a text file, a field of a CSV
    /// line, or a value under a SIN key in JSON (default).
    #[default]
    Lines,
    /// A regex finds SIN-shaped tokens anywhere in free text, including every
    /// JSON string value. Grouped tokens are always normalized.
    Heuristic,
}

/// JSON object keys whose values are treated as SINs by default.
pub const DEFAULT_JSON_KEYS: &[&str] = &["sin", "sin_number", "social_insurance_number"];

/// Core validation config, independent of where content comes from.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ValidationConfig {
    pub input_mode: InputMode,
    pub discovery_mode: DiscoveryMode,
    /// JSON object keys (case-insensitive) holding SINs in `Lines` mode.
    /// When empty, every JSON string containing a digit is a candidate.
    pub json_keys: Vec<String>,
    /// Also list valid values in the report. Off by default since the
    /// report would then contain the numbers themselves.
    pub report_valid: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            input_mode: InputMode::default(),
            discovery_mode: DiscoveryMode::default(),
            json_keys: DEFAULT_JSON_KEYS.iter().map(|k| (*k).to_owned()).collect(),
            report_valid: false,
        }
    }
}

impl ValidationConfig {
    /// Whether grouped forms are normalized for this config.
    #[must_use]
    pub fn normalizes_groups(&self) -> bool {
        self.input_mode == InputMode::Lenient || self.discovery_mode == DiscoveryMode::Heuristic
    }
}

/// Filesystem-specific source options.
///
/// NOTE: `paths` is required and must be non-empty. Default scan roots are a
/// CLI concern, not baked into the library.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Paths to scan (files or directories). Required, must be non-empty.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format).
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links.
    ///
    /// **Defaults to `false`**. Following symlinks allows escaping the scan
    /// root and reading unrelated files.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Maximum total number of files to scan (default: `100_000`).
    pub max_files: usize,
    /// Maximum total bytes to read across all files (default: 512 MB).
    pub max_total_bytes: u64,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
            max_files: 100_000,
            max_total_bytes: 536_870_912,
        }
    }
}
