//! Event notifier for `input`, `change` and `close`.
//!
//! Listeners are kept per kind in registration order. Dispatch works on a
//! snapshot of the list, so a listener may subscribe, unsubscribe or poke the
//! picker while it runs.

use log::error;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Kind of notification raised by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The value changed during a drag
    Input,
    /// The value was committed
    Change,
    /// The picker was dismissed and the value reverted
    Close,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Input, EventKind::Change, EventKind::Close];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Close => "close",
        }
    }

    fn index(&self) -> usize {
        match self {
            EventKind::Input => 0,
            EventKind::Change => 1,
            EventKind::Close => 2,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback registered for an event kind
pub type Listener = Rc<dyn Fn(EventKind) -> anyhow::Result<()>>;

/// A listener failed during dispatch
#[derive(Debug, Error)]
#[error("{kind} listener #{position} failed")]
pub struct ListenerError {
    pub kind: EventKind,
    pub position: usize,
    #[source]
    pub source: anyhow::Error,
}

/// Ordered listener lists, one per [`EventKind`]
#[derive(Default)]
pub struct EventNotifier {
    listeners: RefCell<[Vec<Listener>; 3]>,
}

impl EventNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the list for `kind`
    pub fn subscribe(&self, kind: EventKind, listener: Listener) {
        self.listeners.borrow_mut()[kind.index()].push(listener);
    }

    /// Wrap a closure, subscribe it, and return the handle for unsubscribing
    pub fn listen<F>(&self, kind: EventKind, f: F) -> Listener
    where
        F: Fn(EventKind) -> anyhow::Result<()> + 'static,
    {
        let listener: Listener = Rc::new(f);
        self.subscribe(kind, listener.clone());
        listener
    }

    /// Remove the first registration of `listener` for `kind`
    ///
    /// Returns false when it was not registered.
    pub fn unsubscribe(&self, kind: EventKind, listener: &Listener) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let list = &mut listeners[kind.index()];
        match list.iter().position(|l| Rc::ptr_eq(l, listener)) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow()[kind.index()].len()
    }

    /// Invoke every listener for `kind` in registration order
    ///
    /// Listeners report failure by returning `Err`. Those failures are logged
    /// and collected and never stop the remaining listeners from running. A
    /// listener that panics unwinds through the dispatch.
    pub fn dispatch(&self, kind: EventKind) -> Vec<ListenerError> {
        let snapshot: Vec<Listener> = self.listeners.borrow()[kind.index()].clone();
        let mut failures = Vec::new();
        for (position, listener) in snapshot.iter().enumerate() {
            if let Err(source) = listener(kind) {
                let err = ListenerError {
                    kind,
                    position,
                    source,
                };
                error!("{}: {:#}", err, err.source);
                failures.push(err);
            }
        }
        failures
    }
}

impl fmt::Debug for EventNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        f.debug_struct("EventNotifier")
            .field("input", &listeners[0].len())
            .field("change", &listeners[1].len())
            .field("close", &listeners[2].len())
            .finish()
    }
}
