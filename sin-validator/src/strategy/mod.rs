//! Validation source strategies.
//!
//! Only the filesystem strategy exists so far, exposed through the concrete
//! `validate_fs()` API.

pub mod fs;

/// Content format for dispatching to the correct scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Text,
    Csv,
    Json,
}
