//! Library half of the `sin` command-line tool.
//!
//! Kept separate from `main.rs` so commands can be driven from tests with
//! in-memory readers and writers.

pub mod cli;
pub mod logging;
pub mod session;
