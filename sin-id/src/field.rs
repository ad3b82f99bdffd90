//! State of a SIN input field with its validity dialog.
//!
//! The value is edited freely; validation only happens when the value is
//! committed (the field loses focus). The dialog keeps showing the outcome of
//! the last commit until the next one.

use crate::{DisplayState, classify};

/// A single-line SIN input and the dialog derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinField {
    value: String,
    dialog: Option<DisplayState>,
}

impl SinField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw value. Does not revalidate.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Commit the current value: trim it, classify it and show the dialog.
    pub fn blur(&mut self) -> DisplayState {
        let state = DisplayState::from_validity(classify(self.value.trim()));
        self.dialog = Some(state);
        state
    }

    /// The raw value as entered.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The dialog from the last commit, if any.
    #[must_use]
    pub fn dialog(&self) -> Option<DisplayState> {
        self.dialog
    }

    #[must_use]
    pub fn dialog_text(&self) -> Option<&'static str> {
        self.dialog.map(DisplayState::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_shows_no_dialog() {
        let field = SinField::new();
        assert_eq!(field.value(), "");
        assert_eq!(field.dialog(), None);
        assert_eq!(field.dialog_text(), None);
    }

    #[test]
    fn test_blur_valid_number_shows_valid_dialog() {
        let mut field = SinField::new();
        field.set_value("046454286");
        assert_eq!(field.blur(), DisplayState::Valid);
        assert_eq!(field.dialog_text(), Some(" Valid SIN Number... "));
    }

    #[test]
    fn test_blur_invalid_number_shows_invalid_dialog() {
        let mut field = SinField::new();
        field.set_value("123456789");
        field.blur();
        assert_eq!(field.dialog_text(), Some(" Invalid SIN Number... "));
    }

    #[test]
    fn test_blur_trims_input() {
        let mut field = SinField::new();
        field.set_value("  046454286\t");
        assert_eq!(field.blur(), DisplayState::Valid);
        assert_eq!(field.value(), "  046454286\t");
    }

    #[test]
    fn test_blur_empty_is_invalid() {
        let mut field = SinField::new();
        assert_eq!(field.blur(), DisplayState::Invalid);
    }

    #[test]
    fn test_set_value_keeps_previous_dialog_until_blur() {
        let mut field = SinField::new();
        field.set_value("046454286");
        field.blur();

        field.set_value("123456789");
        assert_eq!(field.dialog(), Some(DisplayState::Valid));

        field.blur();
        assert_eq!(field.dialog(), Some(DisplayState::Invalid));
    }
}
