//! Interactive replay of the SIN input field.
//!
//! Each input line is typed into the field and committed, and the dialog
//! text is printed, the same way the field behaves when it loses focus.

use std::io::{BufRead, Write};

use sin_id::{DisplayState, SinField};
use tracing::debug;

/// Prompt printed before each line when the session is interactive.
pub const PROMPT: &str = "SIN> ";

/// Counts from a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub committed: usize,
    pub valid: usize,
}

/// Run a session until end of input.
///
/// # Errors
///
/// Returns an error if reading from `input` or writing to `out` fails.
pub fn run_session(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    prompt: bool,
) -> anyhow::Result<SessionSummary> {
    let mut field = SinField::new();
    let mut summary = SessionSummary::default();
    let mut line = String::new();

    loop {
        if prompt {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        field.set_value(line.trim_end_matches(['\r', '\n']));
        let state = field.blur();
        debug!(valid = state == DisplayState::Valid, "value committed");

        summary.committed += 1;
        if state == DisplayState::Valid {
            summary.valid += 1;
        }
        writeln!(out, "{}", state.text())?;
    }

    if prompt {
        writeln!(out)?;
    }
    Ok(summary)
}
