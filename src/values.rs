use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Observable numeric cell
// ---------------------------------------------------------------------------

/// Handle returned by [`ObservableValue::sub`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(f64)>;

/// Single-threaded observable `f64`.
///
/// Subscribers are notified synchronously, in subscription order, only when
/// `set` actually changes the value. Handlers may read or write the cell
/// they are subscribed to.
pub struct ObservableValue {
    value: Cell<f64>,
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler)>>,
}

impl ObservableValue {
    pub fn new(initial: f64) -> Self {
        Self {
            value: Cell::new(initial),
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn get(&self) -> f64 {
        self.value.get()
    }

    pub fn set(&self, value: f64) {
        if self.value.get() == value {
            return;
        }
        self.value.set(value);
        // Snapshot so handlers can (un)subscribe while being notified.
        let handlers: Vec<Handler> = self.handlers.borrow().iter().map(|(_, h)| Rc::clone(h)).collect();
        for handler in handlers {
            handler(value);
        }
    }

    pub fn sub(&self, handler: impl Fn(f64) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let handler: Handler = Rc::new(handler);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsub(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(h, _)| *h != id);
        handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl Default for ObservableValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for ObservableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableValue")
            .field("value", &self.value.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Autopilot selected values shared between directors
// ---------------------------------------------------------------------------

/// Values shared by every director of one autopilot. Pass around as
/// `Rc<ApValues>`.
#[derive(Debug, Default)]
pub struct ApValues {
    /// Altitude preselected by the crew, feet.
    pub selected_altitude: ObservableValue,
    /// Altitude latched when altitude capture activates, feet.
    pub captured_altitude: ObservableValue,
}

impl ApValues {
    pub fn new(selected_altitude: f64) -> Self {
        Self {
            selected_altitude: ObservableValue::new(selected_altitude),
            captured_altitude: ObservableValue::default(),
        }
    }

    pub fn shared(selected_altitude: f64) -> Rc<Self> {
        Rc::new(Self::new(selected_altitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_only_on_change() {
        let cell = ObservableValue::new(1000.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        cell.sub(move |v| sink.borrow_mut().push(v));

        cell.set(1000.0);
        cell.set(2000.0);
        cell.set(2000.0);
        cell.set(3000.0);
        assert_eq!(*seen.borrow(), vec![2000.0, 3000.0]);
        assert_eq!(cell.get(), 3000.0);
    }

    #[test]
    fn unsub_stops_notifications() {
        let cell = ObservableValue::default();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = cell.sub(move |_| c.set(c.get() + 1));
        cell.set(1.0);
        assert!(cell.unsub(id));
        assert!(!cell.unsub(id));
        cell.set(2.0);
        assert_eq!(count.get(), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn handler_may_write_back() {
        let values = ApValues::shared(0.0);
        let v = Rc::clone(&values);
        values.selected_altitude.sub(move |alt| v.captured_altitude.set(alt.round()));
        values.selected_altitude.set(4999.6);
        assert_eq!(values.captured_altitude.get(), 5000.0);
    }
}
