//! Picker popup and its binding to a text field

mod binding;
mod placement;
mod popup;

pub use binding::{ColorPicker, FieldHost, TextField, UsageError};
pub use placement::popup_position;
pub use popup::PickerPopup;
