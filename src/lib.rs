//! scp: a color picker core that drives a text field
//!
//! This library provides:
//! - The picker popup state machine and its listeners
//! - Binding of a popup to a text field
//! - Popup placement relative to the field
//! - Configuration management
//!
//! Color math, the drag controller and the notifier live in `scp-core`;
//! colors, the hue ramp and options live in `scp-types`.

pub mod config;
pub mod picker;

// Re-export commonly used types
pub use config::AppConfig;
pub use picker::{ColorPicker, PickerPopup, TextField, UsageError};
pub use scp_core::{EventKind, HitTarget, Point, TrackGeometry};
pub use scp_types::{ColorFormatError, PickerOptions, Rgba, TrackId};
