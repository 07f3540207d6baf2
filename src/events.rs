//! Outbound notifications from the controller to its parent view.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::UnboundedSender;

/// Notification emitted by the carousel.
#[derive(Clone, Debug, PartialEq)]
pub enum CarouselEvent<T> {
    /// The user picked an item; the parent is expected to open its detail view.
    ItemSelected(T),

    /// The displayed index changed. Informational only.
    IndexChanged(usize),
}

impl<T> CarouselEvent<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ItemSelected(_) => "item_selected",
            Self::IndexChanged(_) => "index_changed",
        }
    }
}

/// Destination for carousel notifications.
pub trait EventSink<T>: Send {
    fn emit(&mut self, event: CarouselEvent<T>);
}

/// Sink that drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardEvents;

impl<T> EventSink<T> for DiscardEvents {
    fn emit(&mut self, _event: CarouselEvent<T>) {}
}

impl<T: Send> EventSink<T> for UnboundedSender<CarouselEvent<T>> {
    fn emit(&mut self, event: CarouselEvent<T>) {
        let name = event.name();
        if self.send(event).is_err() {
            tracing::trace!(event = name, "event receiver dropped, notification discarded");
        }
    }
}

/// In-memory sink whose clones share one log.
///
/// # Example
///
/// ```rust
/// use carousel::events::{CarouselEvent, EventLog, EventSink};
///
/// let log = EventLog::new();
/// let mut sink = log.clone();
/// sink.emit(CarouselEvent::<&str>::IndexChanged(2));
///
/// assert_eq!(log.index_changes(), vec![2]);
/// ```
#[derive(Debug)]
pub struct EventLog<T> {
    events: Arc<Mutex<Vec<CarouselEvent<T>>>>,
}

impl<T> Clone for EventLog<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T> Default for EventLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventLog<T> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CarouselEvent<T>>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Indices carried by `IndexChanged`, oldest first.
    pub fn index_changes(&self) -> Vec<usize> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                CarouselEvent::IndexChanged(index) => Some(*index),
                CarouselEvent::ItemSelected(_) => None,
            })
            .collect()
    }
}

impl<T: Clone> EventLog<T> {
    pub fn events(&self) -> Vec<CarouselEvent<T>> {
        self.lock().clone()
    }

    /// Items carried by `ItemSelected`, oldest first.
    pub fn selected(&self) -> Vec<T> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                CarouselEvent::ItemSelected(item) => Some(item.clone()),
                CarouselEvent::IndexChanged(_) => None,
            })
            .collect()
    }
}

impl<T: Send> EventSink<T> for EventLog<T> {
    fn emit(&mut self, event: CarouselEvent<T>) {
        self.lock().push(event);
    }
}
