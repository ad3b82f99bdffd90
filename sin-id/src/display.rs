//! Dialog text shown for a validation outcome.

use std::fmt;

use serde::Serialize;

use crate::Validity;

/// Dialog text for a valid SIN. The surrounding spaces are part of the text.
pub const VALID_TEXT: &str = " Valid SIN Number... ";

/// Dialog text for an invalid SIN. The surrounding spaces are part of the text.
pub const INVALID_TEXT: &str = " Invalid SIN Number... ";

/// Which dialog is shown after a value is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    Valid,
    Invalid,
}

impl DisplayState {
    #[must_use]
    pub fn from_validity(validity: Validity) -> Self {
        match validity {
            Validity::Valid => Self::Valid,
            Validity::Invalid => Self::Invalid,
        }
    }

    /// The literal dialog text.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Valid => VALID_TEXT,
            Self::Invalid => INVALID_TEXT,
        }
    }
}

impl From<Validity> for DisplayState {
    fn from(validity: Validity) -> Self {
        Self::from_validity(validity)
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
