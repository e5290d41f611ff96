//! scp-core: Pointer mapping, drag handling and notifications for scp.
//!
//! Everything here is independent of any rendering toolkit. The view feeds
//! in pointer events plus a [`TrackGeometry`] and gets colors and
//! notifications back.

pub mod drag;
pub mod geometry;
pub mod mapper;
pub mod notifier;

pub use drag::{DragController, DragUpdate, HandleOffsets, HitTarget, InteractionState};
pub use geometry::{FixedGeometry, Point, Rect, Size, TrackGeometry};
pub use mapper::{color_to_pointers, pointer_to_color, value_to_pointers, RecoveredPointers};
pub use notifier::{EventKind, EventNotifier, Listener, ListenerError};
