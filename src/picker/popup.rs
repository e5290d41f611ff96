//! The picker popup: current value, compare value, drag state and listeners.
//!
//! All methods take `&self`; state lives behind a `RefCell` that is never
//! borrowed while listeners run, so a listener may call back into the popup.

use log::{debug, warn};
use scp_core::{
    DragController, EventKind, EventNotifier, HandleOffsets, HitTarget, InteractionState,
    ListenerError, Point, TrackGeometry,
};
use scp_types::{ColorFormatError, PickerOptions, PointerRates, Rgba, TrackId};
use std::cell::RefCell;

struct PopupState {
    options: PickerOptions,
    value: String,
    compare_value: Option<String>,
    drag: DragController,
    visible: bool,
}

pub struct PickerPopup {
    state: RefCell<PopupState>,
    notifier: EventNotifier,
}

impl PickerPopup {
    pub fn new(options: PickerOptions) -> Self {
        let drag = DragController::new(options.transparency);
        let value = drag.color().to_string();
        Self {
            state: RefCell::new(PopupState {
                options,
                value,
                compare_value: None,
                drag,
                visible: false,
            }),
            notifier: EventNotifier::new(),
        }
    }

    pub fn notifier(&self) -> &EventNotifier {
        &self.notifier
    }

    pub fn options(&self) -> PickerOptions {
        self.state.borrow().options.clone()
    }

    pub fn set_options(&self, options: PickerOptions) {
        let mut state = self.state.borrow_mut();
        state.drag.set_transparency(options.transparency);
        state.options = options;
    }

    /// Current color string
    pub fn value(&self) -> String {
        self.state.borrow().value.clone()
    }

    /// Replace the current value and move the hue and alpha handles to it
    ///
    /// On a parse error nothing changes.
    pub fn set_value(&self, value: &str) -> Result<(), ColorFormatError> {
        let color = Rgba::parse(value).map_err(|e| {
            warn!("Rejected color value: {}", e);
            e
        })?;
        let mut state = self.state.borrow_mut();
        state.drag.sync_to_color(&color);
        state.value = value.to_string();
        Ok(())
    }

    /// Value captured when the popup was opened
    pub fn compare_value(&self) -> Option<String> {
        self.state.borrow().compare_value.clone()
    }

    pub fn set_compare_value(&self, value: &str) {
        self.state.borrow_mut().compare_value = Some(value.to_string());
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// Show the popup for `value`, remembering it as the compare value
    pub fn open(&self, value: &str) -> Result<(), ColorFormatError> {
        self.set_value(value)?;
        let mut state = self.state.borrow_mut();
        state.compare_value = Some(value.to_string());
        state.visible = true;
        debug!("Popup opened with {}", value);
        Ok(())
    }

    pub fn hide(&self) {
        let mut state = self.state.borrow_mut();
        state.visible = false;
        debug!("Popup hidden with {}", state.value);
    }

    pub fn rates(&self) -> PointerRates {
        self.state.borrow().drag.rates()
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.state.borrow().drag.state()
    }

    pub fn handle_offsets(&self, geometry: &dyn TrackGeometry) -> HandleOffsets {
        self.state.borrow().drag.handle_offsets(geometry)
    }

    /// Pure hue under the hue handle; the square's background
    pub fn hue_swatch(&self) -> Rgba {
        let rate = self.state.borrow().drag.rates().hue;
        Rgba::from_rgb(scp_core::mapper::hue_color(rate), 1.0)
    }

    /// Opaque end of the alpha ramp for the current square color
    pub fn alpha_swatch(&self) -> Rgba {
        let rates = self.state.borrow().drag.rates();
        scp_core::pointer_to_color(&rates, false)
    }

    /// Pointer pressed on a track's range or handle
    pub fn press(&self, target: HitTarget, at: Point, geometry: &dyn TrackGeometry) {
        let immediate = {
            let mut state = self.state.borrow_mut();
            if !state.visible {
                return;
            }
            if target.track() == TrackId::Alpha && !state.options.transparency {
                return;
            }
            let update = state.drag.press(target, at, geometry);
            state.value = update.color.to_string();
            state.options.immediate_input
        };
        if immediate {
            self.notifier.dispatch(EventKind::Input);
        }
    }

    /// Pointer moved anywhere; only matters during a drag
    pub fn pointer_move(&self, at: Point, geometry: &dyn TrackGeometry) {
        let immediate = {
            let mut state = self.state.borrow_mut();
            match state.drag.pointer_move(at, geometry) {
                Some(update) => {
                    state.value = update.color.to_string();
                    state.options.immediate_input
                }
                None => false,
            }
        };
        if immediate {
            self.notifier.dispatch(EventKind::Input);
        }
    }

    /// Pointer released anywhere
    ///
    /// Ending a square or alpha drag commits the value when
    /// `select_color_close` is set.
    pub fn release(&self) {
        let commit = {
            let mut state = self.state.borrow_mut();
            let released = state.drag.release();
            matches!(released, Some(track) if track != TrackId::Hue)
                && state.options.select_color_close
        };
        if commit {
            self.notifier.dispatch(EventKind::Change);
        }
    }

    /// The change button
    pub fn press_change(&self) -> Vec<ListenerError> {
        self.notifier.dispatch(EventKind::Change)
    }

    /// The cancel button
    pub fn press_cancel(&self) -> Vec<ListenerError> {
        self.notifier.dispatch(EventKind::Close)
    }

    /// A click landed outside the popup and its field
    pub fn click_outside(&self) {
        let close = {
            let state = self.state.borrow();
            state.visible && state.options.outside_click_close
        };
        if close {
            self.notifier.dispatch(EventKind::Close);
        }
    }
}

impl Default for PickerPopup {
    fn default() -> Self {
        Self::new(PickerOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scp_core::FixedGeometry;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter(popup: &PickerPopup, kind: EventKind) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        popup.notifier().listen(kind, move |_| {
            count_clone.set(count_clone.get() + 1);
            Ok(())
        });
        count
    }

    fn opened(options: PickerOptions, value: &str) -> PickerPopup {
        let popup = PickerPopup::new(options);
        popup.open(value).unwrap();
        popup
    }

    #[test]
    fn test_initial_value_is_red() {
        let popup = PickerPopup::default();
        assert_eq!(popup.value(), "#ff0000");
        assert!(!popup.is_visible());
    }

    #[test]
    fn test_set_value_rejects_garbage() {
        let popup = opened(PickerOptions::default(), "#00ffff");
        let before = popup.rates();
        assert!(popup.set_value("not a color").is_err());
        assert_eq!(popup.value(), "#00ffff");
        assert_eq!(popup.rates(), before);
    }

    #[test]
    fn test_drag_raises_input_per_step() {
        let popup = opened(PickerOptions::default(), "#ff0000");
        let inputs = counter(&popup, EventKind::Input);
        let g = FixedGeometry::default();

        popup.press(HitTarget::Range(TrackId::Square), Point::new(100.0, 80.0), &g);
        popup.pointer_move(Point::new(120.0, 90.0), &g);
        popup.pointer_move(Point::new(0.0, 0.0), &g);
        assert_eq!(inputs.get(), 3);
        assert_eq!(popup.value(), "#ffffff");

        popup.release();
        popup.pointer_move(Point::new(50.0, 50.0), &g);
        assert_eq!(inputs.get(), 3);
    }

    #[test]
    fn test_no_input_without_immediate_input() {
        let options = PickerOptions {
            immediate_input: false,
            ..Default::default()
        };
        let popup = opened(options, "#ff0000");
        let inputs = counter(&popup, EventKind::Input);
        let g = FixedGeometry::default();

        popup.press(HitTarget::Handle(TrackId::Square), Point::new(0.0, 0.0), &g);
        assert_eq!(inputs.get(), 0);
        assert_eq!(popup.value(), "#ffffff");
    }

    #[test]
    fn test_release_commits_except_for_hue() {
        let options = PickerOptions {
            select_color_close: true,
            ..Default::default()
        };
        let popup = opened(options, "#ff0000");
        let changes = counter(&popup, EventKind::Change);
        let g = FixedGeometry::default();

        popup.press(HitTarget::Range(TrackId::Hue), Point::new(210.0, 40.0), &g);
        popup.release();
        assert_eq!(changes.get(), 0);

        popup.press(HitTarget::Range(TrackId::Alpha), Point::new(240.0, 40.0), &g);
        popup.release();
        assert_eq!(changes.get(), 1);

        // a stray release without a drag commits nothing
        popup.release();
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_alpha_track_ignored_without_transparency() {
        let options = PickerOptions {
            transparency: false,
            ..Default::default()
        };
        let popup = opened(options, "#ff0000");
        let g = FixedGeometry::default();
        popup.press(HitTarget::Range(TrackId::Alpha), Point::new(240.0, 500.0), &g);
        assert_eq!(popup.interaction_state(), InteractionState::Idle);
        assert_eq!(popup.value(), "#ff0000");
    }

    #[test]
    fn test_hidden_popup_ignores_presses() {
        let popup = PickerPopup::default();
        let g = FixedGeometry::default();
        popup.press(HitTarget::Range(TrackId::Square), Point::new(0.0, 0.0), &g);
        assert_eq!(popup.interaction_state(), InteractionState::Idle);
    }

    #[test]
    fn test_outside_click_closes_only_when_enabled() {
        let popup = opened(PickerOptions::default(), "#ff0000");
        let closes = counter(&popup, EventKind::Close);
        popup.click_outside();
        assert_eq!(closes.get(), 0);

        popup.set_options(PickerOptions {
            outside_click_close: true,
            ..Default::default()
        });
        popup.click_outside();
        assert_eq!(closes.get(), 1);

        popup.hide();
        popup.click_outside();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_listener_can_set_value_during_dispatch() {
        let popup = Rc::new(opened(PickerOptions::default(), "#ff0000"));
        let weak = Rc::downgrade(&popup);
        popup.notifier().listen(EventKind::Input, move |_| {
            if let Some(popup) = weak.upgrade() {
                popup.set_value("#00ff00")?;
            }
            Ok(())
        });
        let g = FixedGeometry::default();
        popup.press(HitTarget::Range(TrackId::Square), Point::new(0.0, 0.0), &g);
        assert_eq!(popup.value(), "#00ff00");
        assert_eq!(popup.rates().hue, 0.33);
    }

    #[test]
    fn test_hue_press_keeps_alpha_from_value() {
        let popup = opened(PickerOptions::default(), "rgba(255,0,0,0.1)");
        let g = FixedGeometry::default();
        popup.press(HitTarget::Handle(TrackId::Hue), Point::new(216.0, 0.0), &g);
        assert_eq!(popup.value(), "rgba(255,0,0,0.1)");
        popup.release();
    }

    #[test]
    fn test_swatches() {
        let popup = opened(PickerOptions::default(), "rgba(0,255,255,0.5)");
        assert_eq!(popup.hue_swatch().to_string(), "#00ffff");
        assert!(popup.alpha_swatch().is_opaque());
    }

    #[test]
    fn test_buttons() {
        let popup = opened(PickerOptions::default(), "#ff0000");
        let changes = counter(&popup, EventKind::Change);
        let closes = counter(&popup, EventKind::Close);
        assert!(popup.press_change().is_empty());
        assert!(popup.press_cancel().is_empty());
        assert_eq!((changes.get(), closes.get()), (1, 1));
    }
}
