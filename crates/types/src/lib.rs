//! scp-types: Shared data types for the scp color picker.
//!
//! This crate holds the leaf layer: the RGBA color value and its text codec,
//! the hue ramp table, track identifiers and picker options. Nothing here
//! knows about geometry or events.

pub mod color;
pub mod hue;
pub mod options;
pub mod track;

// Re-export commonly used types at the crate root for convenience
pub use color::{ColorFormatError, Rgba};
pub use hue::{HueStop, HUE_STOPS};
pub use options::{ButtonVisibility, PickerOptions};
pub use track::{round_rate, PointerRates, TrackId};
