//! Pointer drag state machine.
//!
//! A press on a track's range or handle starts a drag on that track; moves
//! update the track's rate until the release, which may land anywhere.
//! The controller owns the pointer rates, so every press and move yields the
//! color the handles now describe.

use crate::geometry::{clamp_offset, offset_to_rate, rate_to_offset, Point, TrackGeometry};
use crate::mapper;
use log::{debug, trace};
use scp_types::{PointerRates, Rgba, TrackId};

/// Whether a drag is in progress, and on which track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(TrackId),
}

/// Element a press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The track's range surface
    Range(TrackId),
    /// The handle sitting on the track
    Handle(TrackId),
}

impl HitTarget {
    pub fn track(&self) -> TrackId {
        match self {
            HitTarget::Range(track) | HitTarget::Handle(track) => *track,
        }
    }
}

/// Outcome of a press or move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    pub track: TrackId,
    /// Handle's horizontal offset, `None` for single-axis tracks
    pub offset_x: Option<f64>,
    pub offset_y: f64,
    pub color: Rgba,
}

/// Handle offsets the view should render, per track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleOffsets {
    pub hue: f64,
    pub square: Point,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    state: InteractionState,
    rates: PointerRates,
    cursor: Point,
    transparency: bool,
}

impl DragController {
    pub fn new(transparency: bool) -> Self {
        Self {
            state: InteractionState::Idle,
            rates: PointerRates::default(),
            cursor: Point::default(),
            transparency,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    pub fn rates(&self) -> PointerRates {
        self.rates
    }

    /// Last pointer position seen by a press or move
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn transparency(&self) -> bool {
        self.transparency
    }

    pub fn set_transparency(&mut self, transparency: bool) {
        self.transparency = transparency;
    }

    /// Color described by the current handle positions
    pub fn color(&self) -> Rgba {
        mapper::pointer_to_color(&self.rates, self.transparency)
    }

    /// Move the hue and alpha handles to match `color`
    ///
    /// The square handle keeps its position.
    pub fn sync_to_color(&mut self, color: &Rgba) {
        let recovered = mapper::color_to_pointers(color);
        self.rates = recovered.apply_to(self.rates);
        debug!("Pointers synced to {}: {:?}", color, self.rates);
    }

    /// Start dragging the track under `target` and apply the press position
    pub fn press(
        &mut self,
        target: HitTarget,
        at: Point,
        geometry: &dyn TrackGeometry,
    ) -> DragUpdate {
        let track = target.track();
        if let InteractionState::Dragging(previous) = self.state {
            debug!("Press on {} while dragging {}, switching", track, previous);
        }
        trace!("Drag start on {} at ({}, {})", track, at.x, at.y);
        self.state = InteractionState::Dragging(track);
        self.update(track, at, geometry)
    }

    /// Apply a pointer move; ignored unless a drag is in progress
    pub fn pointer_move(&mut self, at: Point, geometry: &dyn TrackGeometry) -> Option<DragUpdate> {
        match self.state {
            InteractionState::Dragging(track) => Some(self.update(track, at, geometry)),
            InteractionState::Idle => None,
        }
    }

    /// End the drag, returning the track that was being dragged
    pub fn release(&mut self) -> Option<TrackId> {
        match std::mem::take(&mut self.state) {
            InteractionState::Dragging(track) => {
                trace!("Drag end on {}", track);
                Some(track)
            }
            InteractionState::Idle => None,
        }
    }

    /// Where each handle sits inside its track for the current rates
    pub fn handle_offsets(&self, geometry: &dyn TrackGeometry) -> HandleOffsets {
        let vertical = |track: TrackId, rate: f64| {
            let bounds = geometry.bounds(track);
            let handle = geometry.handle_size(track);
            rate_to_offset(rate, bounds.height, handle.height)
        };
        let square = geometry.bounds(TrackId::Square);
        let square_handle = geometry.handle_size(TrackId::Square);
        HandleOffsets {
            hue: vertical(TrackId::Hue, self.rates.hue),
            square: Point::new(
                rate_to_offset(self.rates.square_x, square.width, square_handle.width),
                rate_to_offset(self.rates.square_y, square.height, square_handle.height),
            ),
            alpha: vertical(TrackId::Alpha, self.rates.alpha),
        }
    }

    fn update(&mut self, track: TrackId, at: Point, geometry: &dyn TrackGeometry) -> DragUpdate {
        self.cursor = at;
        let bounds = geometry.bounds(track);
        let handle = geometry.handle_size(track);

        let offset_x = track
            .uses_x()
            .then(|| clamp_offset(at.x, bounds.x, bounds.width, handle.width));
        let offset_y = clamp_offset(at.y, bounds.y, bounds.height, handle.height);
        let rate_y = offset_to_rate(offset_y, bounds.height, handle.height);

        match track {
            TrackId::Hue => self.rates.hue = rate_y,
            TrackId::Alpha => self.rates.alpha = rate_y,
            TrackId::Square => {
                if let Some(offset_x) = offset_x {
                    self.rates.square_x = offset_to_rate(offset_x, bounds.width, handle.width);
                }
                self.rates.square_y = rate_y;
            }
        }

        DragUpdate {
            track,
            offset_x,
            offset_y,
            color: self.color(),
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(true)
    }
}
