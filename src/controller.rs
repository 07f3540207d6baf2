//! The carousel controller.
//!
//! `Carousel` owns the item list, the navigation state, the pause flag and
//! the single auto-advance timer slot. It is synchronous: time only matters
//! when [`Carousel::poll_timer`] is called, which applies the tick that is
//! due according to the controller's [`Clock`]. The async shell in
//! [`crate::service`] calls it whenever the timer deadline passes.

use crate::clock::{Clock, TokioClock};
use crate::config::builder::duration_to_millis;
use crate::config::{validate_interval, CarouselConfig, ConfigError};
use crate::core::{
    CarouselState, Direction, IndexTransition, ItemClass, NavigationHistory, TransitionCause,
};
use crate::events::{CarouselEvent, DiscardEvents, EventSink};
use crate::timer::AutoAdvanceTimer;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

/// Serializable view of a controller at one moment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    pub id: Uuid,
    pub current: usize,
    pub previous: Option<usize>,
    pub direction: Direction,
    pub len: usize,
    pub paused: bool,
    pub auto_rotate: bool,
    pub show_controls: bool,
    pub timer_active: bool,
    pub disposed: bool,
}

/// Circular carousel controller with an optional auto-advance timer.
///
/// Navigation never fails: an empty list turns every move into a no-op and
/// out-of-range jumps are clamped. After [`dispose`](Self::dispose) every
/// operation is ignored and no timer is ever started again.
///
/// # Example
///
/// ```rust
/// use carousel::clock::ManualClock;
/// use carousel::config::CarouselConfig;
/// use carousel::controller::Carousel;
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let mut carousel = Carousel::with_clock(
///     vec!["one", "two", "three"],
///     CarouselConfig::default(),
///     clock.clone(),
/// );
///
/// clock.advance(Duration::from_millis(5000));
/// assert_eq!(carousel.poll_timer(), 1);
/// assert_eq!(carousel.current_item(), Some(&"two"));
///
/// carousel.go_to_previous();
/// assert_eq!(carousel.current_index(), 0);
/// ```
pub struct Carousel<T, K = TokioClock> {
    id: Uuid,
    items: Vec<T>,
    state: CarouselState,
    config: CarouselConfig,
    paused: bool,
    disposed: bool,
    timer: Option<AutoAdvanceTimer>,
    generation: u64,
    history: NavigationHistory,
    sink: Box<dyn EventSink<T>>,
    clock: K,
}

impl<T: Clone + Send + 'static> Carousel<T, TokioClock> {
    /// Create a controller driven by tokio's clock.
    pub fn new(items: Vec<T>, config: CarouselConfig) -> Self {
        Self::with_clock(items, config, TokioClock)
    }
}

impl<T: Clone + Send + 'static, K: Clock> Carousel<T, K> {
    /// Create a controller at the first item, starting the timer if
    /// auto-rotation is enabled.
    pub fn with_clock(items: Vec<T>, config: CarouselConfig, clock: K) -> Self {
        let mut carousel = Self {
            id: Uuid::new_v4(),
            items,
            state: CarouselState::new(),
            history: NavigationHistory::with_limit(config.history_limit),
            config,
            paused: false,
            disposed: false,
            timer: None,
            generation: 0,
            sink: Box::new(DiscardEvents),
            clock,
        };
        debug!(
            carousel = %carousel.id,
            len = carousel.items.len(),
            auto_rotate = carousel.config.auto_rotate,
            "carousel created"
        );
        carousel.restart_if_running();
        carousel
    }

    /// Route notifications to `sink` instead of discarding them.
    pub fn with_sink(mut self, sink: impl EventSink<T> + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Show the next item, wrapping after the last one.
    pub fn go_to_next(&mut self) {
        if self.ignore_when_disposed("go_to_next") {
            return;
        }
        if let Some(next) = self.state.forward(self.items.len()) {
            self.apply(next, TransitionCause::Manual);
            self.restart_if_running();
        }
    }

    /// Show the previous item, wrapping before the first one.
    pub fn go_to_previous(&mut self) {
        if self.ignore_when_disposed("go_to_previous") {
            return;
        }
        if let Some(next) = self.state.backward(self.items.len()) {
            self.apply(next, TransitionCause::Manual);
            self.restart_if_running();
        }
    }

    /// Show the item at `index`, clamped into range rather than wrapped.
    pub fn go_to_index(&mut self, index: i64) {
        if self.ignore_when_disposed("go_to_index") {
            return;
        }
        if let Some(next) = self.state.jump(index, self.items.len()) {
            self.apply(next, TransitionCause::Manual);
            self.restart_if_running();
        }
    }

    /// Apply the auto-advance tick if one is due, returning how many
    /// advances happened (0 or 1).
    ///
    /// Ticks missed by a late poll are skipped rather than replayed, so a
    /// poll after a long stall moves at most one slide. Ticks do not restart
    /// the timer; the cadence set when it started continues.
    pub fn poll_timer(&mut self) -> usize {
        if self.disposed {
            return 0;
        }
        let now = self.clock.now();
        let due = self.timer.as_mut().is_some_and(|timer| timer.take_due(now));
        if !due {
            return 0;
        }

        match self.state.forward(self.items.len()) {
            Some(next) => {
                self.apply(next, TransitionCause::AutoAdvance);
                1
            }
            None => 0,
        }
    }

    // ------------------------------------------------------------------
    // Timer control
    // ------------------------------------------------------------------

    /// Stop auto-advancing until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if self.ignore_when_disposed("pause") {
            return;
        }
        self.paused = true;
        self.cancel_timer();
    }

    /// Clear the pause flag and restart the timer if auto-rotation is on.
    pub fn resume(&mut self) {
        if self.ignore_when_disposed("resume") {
            return;
        }
        self.paused = false;
        if self.config.auto_rotate {
            self.start_timer();
        }
    }

    /// Cancel the timer for good. Every later call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel_timer();
        self.disposed = true;
        info!(carousel = %self.id, "carousel disposed");
    }

    // ------------------------------------------------------------------
    // External updates
    // ------------------------------------------------------------------

    /// Replace the whole item list and return to the first item.
    pub fn replace_items(&mut self, items: Vec<T>) {
        if self.ignore_when_disposed("replace_items") {
            return;
        }
        self.items = items;
        self.state = self.state.reset();
        debug!(carousel = %self.id, len = self.items.len(), "items replaced");
        self.restart_if_running();
    }

    /// Enable or disable auto-rotation. Setting the current value leaves
    /// the countdown untouched.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        if self.ignore_when_disposed("set_auto_rotate") || enabled == self.config.auto_rotate {
            return;
        }
        self.config.auto_rotate = enabled;
        if enabled && !self.paused {
            self.start_timer();
        } else {
            self.cancel_timer();
        }
    }

    /// Change the auto-advance period, restarting a running timer at the
    /// new cadence. Invalid periods leave the configuration unchanged and
    /// the current period leaves the countdown untouched.
    pub fn set_interval(&mut self, interval: Duration) -> Result<(), ConfigError> {
        let millis = duration_to_millis(interval);
        validate_interval(Duration::from_millis(millis))?;
        if self.ignore_when_disposed("set_interval")
            || millis == self.config.auto_advance_interval_ms
        {
            return Ok(());
        }
        self.config.auto_advance_interval_ms = millis;
        self.restart_if_running();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Notify the parent that `item` was picked.
    pub fn select(&mut self, item: T) {
        if self.ignore_when_disposed("select") {
            return;
        }
        debug!(carousel = %self.id, index = self.state.current(), "item selected");
        self.sink.emit(CarouselEvent::ItemSelected(item));
    }

    /// Select the displayed item. Returns `false` when there is none.
    pub fn select_current(&mut self) -> bool {
        match self.current_item().cloned() {
            Some(item) if !self.disposed => {
                self.select(item);
                true
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Displayed index; 0 when the list is empty.
    pub fn current_index(&self) -> usize {
        self.state.current()
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.state.previous()
    }

    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn current_item(&self) -> Option<&T> {
        self.items.get(self.state.current())
    }

    /// Transition style for the item at `index`.
    pub fn item_class(&self, index: usize) -> ItemClass {
        ItemClass::of(&self.state, index)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.is_some()
    }

    /// When the live timer fires next, if there is one.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(AutoAdvanceTimer::next_due)
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            id: self.id,
            current: self.state.current(),
            previous: self.state.previous(),
            direction: self.state.direction(),
            len: self.items.len(),
            paused: self.paused,
            auto_rotate: self.config.auto_rotate,
            show_controls: self.config.show_controls,
            timer_active: self.timer.is_some(),
            disposed: self.disposed,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn apply(&mut self, next: CarouselState, cause: TransitionCause) {
        let from = self.state.current();
        self.state = next;
        self.history = self.history.record(IndexTransition {
            from,
            to: next.current(),
            direction: next.direction(),
            cause,
            timestamp: Utc::now(),
        });
        debug!(
            carousel = %self.id,
            from,
            to = next.current(),
            direction = %next.direction(),
            ?cause,
            "index changed"
        );
        self.sink.emit(CarouselEvent::IndexChanged(next.current()));
    }

    fn restart_if_running(&mut self) {
        if self.config.auto_rotate && !self.paused {
            self.start_timer();
        }
    }

    /// Replace the timer slot with a fresh timer. Lists of 0 or 1 items
    /// only get the old timer cancelled.
    fn start_timer(&mut self) {
        self.cancel_timer();
        if self.disposed || self.items.len() <= 1 {
            return;
        }

        let period = self.config.auto_advance_interval();
        if let Err(error) = validate_interval(period) {
            warn!(carousel = %self.id, %error, "auto-advance timer not started");
            return;
        }

        self.generation += 1;
        self.timer = Some(AutoAdvanceTimer::start(
            self.clock.now(),
            period,
            self.generation,
        ));
        debug!(
            carousel = %self.id,
            generation = self.generation,
            period_ms = self.config.auto_advance_interval_ms,
            "auto-advance timer started"
        );
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(
                carousel = %self.id,
                generation = timer.generation(),
                "auto-advance timer cancelled"
            );
        }
    }

    fn ignore_when_disposed(&self, operation: &'static str) -> bool {
        if self.disposed {
            trace!(carousel = %self.id, operation, "ignored after dispose");
        }
        self.disposed
    }
}
