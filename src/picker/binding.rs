//! Binding between a text field and a picker popup.
//!
//! The binding opens the popup with the field's value, copies the popup's
//! value back on `input` and `change`, and restores the value captured at
//! open time on `close`.

use super::popup::PickerPopup;
use log::{debug, warn};
use scp_core::{EventKind, Listener};
use scp_types::{ColorFormatError, PickerOptions};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// A text input the picker reads from and writes to
pub trait TextField {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// Looks up text fields by selector
pub trait FieldHost {
    fn query(&self, selector: &str) -> Option<Rc<dyn TextField>>;
}

/// Misuse when attaching a picker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("selector is empty")]
    EmptySelector,
    #[error("no field matches selector {0:?}")]
    FieldNotFound(String),
}

struct Binding {
    field: RefCell<Option<Rc<dyn TextField>>>,
    popup: PickerPopup,
    options: RefCell<PickerOptions>,
    listener: RefCell<Option<Listener>>,
}

/// A picker attached to one text field at a time
#[derive(Clone)]
pub struct ColorPicker {
    inner: Rc<Binding>,
}

impl ColorPicker {
    pub fn new(field: Rc<dyn TextField>, options: PickerOptions) -> Self {
        let picker = Self {
            inner: Rc::new(Binding {
                field: RefCell::new(None),
                popup: PickerPopup::new(options.clone()),
                options: RefCell::new(options),
                listener: RefCell::new(None),
            }),
        };
        picker.set_field(field);
        picker
    }

    /// Attach to the field `selector` names in `host`
    pub fn attach(
        host: &dyn FieldHost,
        selector: &str,
        options: PickerOptions,
    ) -> Result<Self, UsageError> {
        if selector.trim().is_empty() {
            return Err(UsageError::EmptySelector);
        }
        let field = host
            .query(selector)
            .ok_or_else(|| UsageError::FieldNotFound(selector.to_string()))?;
        Ok(Self::new(field, options))
    }

    pub fn popup(&self) -> &PickerPopup {
        &self.inner.popup
    }

    pub fn options(&self) -> PickerOptions {
        self.inner.options.borrow().clone()
    }

    /// New options take effect the next time the popup opens
    pub fn set_options(&self, options: PickerOptions) {
        *self.inner.options.borrow_mut() = options;
    }

    pub fn is_connected(&self) -> bool {
        self.inner.field.borrow().is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.popup.is_visible()
    }

    pub fn value(&self) -> String {
        self.inner.popup.value()
    }

    pub fn set_value(&self, value: &str) -> Result<(), ColorFormatError> {
        self.inner.popup.set_value(value)
    }

    /// Move the picker to `field`, detaching from the previous one
    pub fn set_field(&self, field: Rc<dyn TextField>) {
        self.disconnect();
        *self.inner.field.borrow_mut() = Some(field);

        let weak: Weak<Binding> = Rc::downgrade(&self.inner);
        let listener: Listener = Rc::new(move |kind: EventKind| -> anyhow::Result<()> {
            if let Some(inner) = weak.upgrade() {
                ColorPicker { inner }.handle_event(kind);
            }
            Ok(())
        });
        for kind in EventKind::ALL {
            self.inner.popup.notifier().subscribe(kind, listener.clone());
        }
        *self.inner.listener.borrow_mut() = Some(listener);
    }

    /// Hide the popup and release the field
    pub fn disconnect(&self) {
        if !self.is_connected() {
            return;
        }
        self.hide();
        if let Some(listener) = self.inner.listener.borrow_mut().take() {
            for kind in EventKind::ALL {
                self.inner.popup.notifier().unsubscribe(kind, &listener);
            }
        }
        self.inner.field.borrow_mut().take();
        debug!("Picker disconnected");
    }

    /// Open the popup on the field's current value
    ///
    /// Does nothing when already open. If the field holds an unparsable
    /// color the popup stays closed and the error is returned.
    pub fn show(&self) -> Result<(), ColorFormatError> {
        let Some(field) = self.field() else {
            return Ok(());
        };
        if self.inner.popup.is_visible() {
            return Ok(());
        }
        let value = field.value();
        self.inner.popup.set_options(self.options());
        self.inner.popup.open(&value)
    }

    /// Close the popup, leaving its value in the field
    pub fn hide(&self) {
        let Some(field) = self.field() else {
            return;
        };
        if !self.inner.popup.is_visible() {
            return;
        }
        field.set_value(&self.inner.popup.value());
        self.inner.popup.hide();
    }

    fn field(&self) -> Option<Rc<dyn TextField>> {
        self.inner.field.borrow().clone()
    }

    fn handle_event(&self, kind: EventKind) {
        let Some(field) = self.field() else {
            return;
        };
        match kind {
            EventKind::Input => field.set_value(&self.inner.popup.value()),
            EventKind::Change => {
                field.set_value(&self.inner.popup.value());
                self.hide();
            }
            EventKind::Close => {
                if let Some(original) = self.inner.popup.compare_value() {
                    field.set_value(&original);
                    if let Err(e) = self.inner.popup.set_value(&original) {
                        warn!("Could not revert picker to {:?}: {}", original, e);
                    }
                }
                self.hide();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scp_core::{FixedGeometry, HitTarget, Point};
    use scp_types::TrackId;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryField {
        value: RefCell<String>,
    }

    impl MemoryField {
        fn with(value: &str) -> Rc<Self> {
            Rc::new(Self {
                value: RefCell::new(value.to_string()),
            })
        }
    }

    impl TextField for MemoryField {
        fn value(&self) -> String {
            self.value.borrow().clone()
        }

        fn set_value(&self, value: &str) {
            *self.value.borrow_mut() = value.to_string();
        }
    }

    struct Page {
        fields: HashMap<String, Rc<MemoryField>>,
    }

    impl FieldHost for Page {
        fn query(&self, selector: &str) -> Option<Rc<dyn TextField>> {
            self.fields
                .get(selector)
                .map(|f| f.clone() as Rc<dyn TextField>)
        }
    }

    #[test]
    fn test_square_drag_commits_on_release() {
        let field = MemoryField::with("#ff0000");
        let options = PickerOptions {
            select_color_close: true,
            ..Default::default()
        };
        let picker = ColorPicker::new(field.clone(), options);

        let changes = Rc::new(RefCell::new(Vec::new()));
        let changes_clone = changes.clone();
        let weak = Rc::downgrade(&picker.inner);
        picker.popup().notifier().listen(EventKind::Change, move |_| {
            if let Some(inner) = weak.upgrade() {
                changes_clone.borrow_mut().push(inner.popup.value());
            }
            Ok(())
        });

        picker.show().unwrap();
        let rates = picker.popup().rates();
        assert!(rates.hue.abs() < 0.01);
        assert!(rates.alpha.abs() < 0.01);

        let g = FixedGeometry::default();
        picker
            .popup()
            .press(HitTarget::Handle(TrackId::Square), Point::new(0.0, 1000.0), &g);
        assert_eq!(picker.value(), "#000000");
        assert_eq!(field.value(), "#000000");

        picker.popup().release();
        assert_eq!(*changes.borrow(), vec!["#000000".to_string()]);
        assert_eq!(field.value(), "#000000");
        assert!(!picker.is_visible());
    }

    #[test]
    fn test_cancel_reverts_field() {
        let field = MemoryField::with("#00ffff");
        let picker = ColorPicker::new(field.clone(), PickerOptions::default());
        picker.show().unwrap();

        let g = FixedGeometry::default();
        picker
            .popup()
            .press(HitTarget::Range(TrackId::Square), Point::new(0.0, 0.0), &g);
        picker.popup().release();
        assert_eq!(field.value(), "#ffffff");

        picker.popup().press_cancel();
        assert_eq!(field.value(), "#00ffff");
        assert_eq!(picker.value(), "#00ffff");
        assert!(!picker.is_visible());
    }

    #[test]
    fn test_change_button_commits_and_hides() {
        let field = MemoryField::with("rgb(10,20,30)");
        let picker = ColorPicker::new(field.clone(), PickerOptions::default());
        picker.show().unwrap();
        picker.set_value("#abcdef").unwrap();
        picker.popup().press_change();
        assert_eq!(field.value(), "#abcdef");
        assert!(!picker.is_visible());
    }

    #[test]
    fn test_show_is_idempotent_and_rejects_bad_field() {
        let field = MemoryField::with("#ff0000");
        let picker = ColorPicker::new(field.clone(), PickerOptions::default());
        picker.show().unwrap();
        field.set_value("garbage");
        // already open: field is not re-read
        assert!(picker.show().is_ok());
        picker.hide();
        assert_eq!(field.value(), "#ff0000");

        field.set_value("garbage");
        assert!(picker.show().is_err());
        assert!(!picker.is_visible());
    }

    #[test]
    fn test_rebinding_moves_listeners() {
        let first = MemoryField::with("#ff0000");
        let second = MemoryField::with("#0000ff");
        let picker = ColorPicker::new(first.clone(), PickerOptions::default());
        assert_eq!(picker.popup().notifier().listener_count(EventKind::Input), 1);

        picker.set_field(second.clone());
        assert_eq!(picker.popup().notifier().listener_count(EventKind::Input), 1);
        picker.show().unwrap();
        assert_eq!(picker.popup().rates().hue, 0.67);

        picker.disconnect();
        assert!(!picker.is_connected());
        assert_eq!(picker.popup().notifier().listener_count(EventKind::Close), 0);
        assert_eq!(first.value(), "#ff0000");
    }

    #[test]
    fn test_attach_by_selector() {
        let mut fields = HashMap::new();
        fields.insert("#color".to_string(), MemoryField::with("#ff0000"));
        let page = Page { fields };

        assert!(ColorPicker::attach(&page, "#color", PickerOptions::default()).is_ok());
        assert_eq!(
            ColorPicker::attach(&page, "  ", PickerOptions::default()).err(),
            Some(UsageError::EmptySelector)
        );
        assert_eq!(
            ColorPicker::attach(&page, "#missing", PickerOptions::default()).err(),
            Some(UsageError::FieldNotFound("#missing".to_string()))
        );
    }
}
