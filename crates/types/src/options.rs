//! Picker configuration.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Options accepted when a picker is attached to a field
///
/// Only `transparency`, `immediate_input`, `select_color_close` and
/// `outside_click_close` change picker behavior; the rest are visibility
/// hints for the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerOptions {
    /// Show and honor the alpha track
    #[serde(default = "default_true")]
    pub transparency: bool,
    /// Raise `input` on every drag step
    #[serde(default = "default_true")]
    pub immediate_input: bool,
    /// Show both buttons, overriding the per-button flags
    #[serde(default = "default_true")]
    pub show_buttons: bool,
    #[serde(default = "default_true")]
    pub show_change_button: bool,
    #[serde(default = "default_true")]
    pub show_cancel_button: bool,
    /// Raise `close` when the user clicks outside the popup
    #[serde(default)]
    pub outside_click_close: bool,
    /// Raise `change` when a square or alpha drag is released
    #[serde(default)]
    pub select_color_close: bool,
    /// Show the before/after compare swatch
    #[serde(default = "default_true")]
    pub show_compare: bool,
}

impl PickerOptions {
    pub fn button_visibility(&self) -> ButtonVisibility {
        ButtonVisibility::resolve(self)
    }
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            transparency: true,
            immediate_input: true,
            show_buttons: true,
            show_change_button: true,
            show_cancel_button: true,
            outside_click_close: false,
            select_color_close: false,
            show_compare: true,
        }
    }
}

/// Which parts of the button row the view should display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonVisibility {
    pub row: bool,
    pub change: bool,
    pub cancel: bool,
}

impl ButtonVisibility {
    pub fn resolve(options: &PickerOptions) -> Self {
        if options.show_buttons {
            return Self {
                row: true,
                change: true,
                cancel: true,
            };
        }
        let change = options.show_change_button;
        let cancel = options.show_cancel_button;
        Self {
            row: change || cancel,
            change,
            cancel,
        }
    }
}
