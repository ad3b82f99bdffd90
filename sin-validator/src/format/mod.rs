//! Format-specific scanners for SIN discovery.
//!
//! - `text`: plain text and CSV records, plus the heuristic token finder
//! - `json`: JSON tree-walker

pub mod json;
pub mod text;
