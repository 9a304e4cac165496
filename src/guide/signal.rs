//! Tour Signals
//!
//! Notification payloads delivered to engine subscribers, plus the
//! subscriber registry itself. Signals form a closed set, so presentation
//! adapters match on the variant instead of inspecting untyped payloads.

use log::debug;

use crate::tour::model::TourStep;

/// Notification emitted after every successful engine transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourSignal {
    /// No tour is active
    Idle,

    /// A tour is active; carries the full current step for rendering
    Active {
        tour_id: String,
        step_index: usize,
        step: TourStep,
    },

    /// The named tour just ran past its last step
    Completed { tour_id: String },
}

impl TourSignal {
    /// Returns the tour this signal refers to, if any.
    pub fn tour_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Active { tour_id, .. } | Self::Completed { tour_id } => Some(tour_id),
        }
    }

    /// Returns the current step, if the signal carries one.
    pub fn step(&self) -> Option<&TourStep> {
        match self {
            Self::Active { step, .. } => Some(step),
            _ => None,
        }
    }
}

/// Handle identifying one subscription; pass back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type SubscriberFn = Box<dyn Fn(&TourSignal) + Send>;

/// Registry of engine subscribers.
///
/// Handlers are invoked synchronously, in registration order, with a shared
/// reference to each signal. Unsubscribing an id that was never registered
/// (or already removed) is a no-op.
#[derive(Default)]
pub struct SubscriberSet {
    next_id: u64,
    entries: Vec<(SubscriberId, SubscriberFn)>,
}

impl SubscriberSet {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler and returns its handle.
    pub fn subscribe(&mut self, handler: impl Fn(&TourSignal) + Send + 'static) -> SubscriberId {
        self.next_id += 1;
        let id = SubscriberId(self.next_id);
        self.entries.push((id, Box::new(handler)));
        debug!("Subscriber {:?} registered ({} total)", id, self.entries.len());
        id
    }

    /// Removes a handler. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        if self.entries.len() < before {
            debug!("Subscriber {:?} removed ({} remain)", id, self.entries.len());
        }
    }

    /// Delivers a signal to every handler in registration order.
    pub fn notify(&self, signal: &TourSignal) {
        for (_, handler) in &self.entries {
            handler(signal);
        }
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberSet")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}
