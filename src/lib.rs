//! Carousel: a circular carousel controller with an auto-advance timer
//!
//! The controller keeps a zero-based index into an externally supplied list
//! of items, wraps around when stepping past either end, and optionally
//! advances on its own at a fixed interval. The parent view hears about it
//! through two notifications: an item was selected, or the index changed.
//!
//! # Core Concepts
//!
//! - **State**: Pure index arithmetic via [`CarouselState`]
//! - **Timer**: At most one repeating [`timer::AutoAdvanceTimer`], replaced
//!   wholesale on every restart
//! - **Controller**: [`Carousel`] ties state, timer and notifications together
//! - **Service**: [`CarouselService`] runs a controller on a tokio task
//!
//! # Example
//!
//! ```rust
//! use carousel::clock::ManualClock;
//! use carousel::events::EventLog;
//! use carousel::{Carousel, CarouselConfig, CarouselEvent};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let log = EventLog::new();
//! let mut carousel = Carousel::with_clock(
//!     vec!["keynote", "workshop", "meetup"],
//!     CarouselConfig::default(),
//!     clock.clone(),
//! )
//! .with_sink(log.clone());
//!
//! // Manual navigation at t=2s restarts the 5s countdown.
//! clock.advance(Duration::from_secs(2));
//! carousel.go_to_next();
//!
//! clock.advance(Duration::from_secs(3));
//! assert_eq!(carousel.poll_timer(), 0);
//!
//! clock.advance(Duration::from_secs(2));
//! assert_eq!(carousel.poll_timer(), 1);
//! assert_eq!(carousel.current_index(), 2);
//!
//! carousel.select_current();
//! assert_eq!(log.events().last(), Some(&CarouselEvent::ItemSelected("meetup")));
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod core;
pub mod events;
pub mod service;
pub mod timer;

// Re-export commonly used types
pub use config::{CarouselConfig, ConfigError};
pub use controller::{Carousel, CarouselSnapshot};
pub use self::core::{CarouselState, Direction, ItemClass, NavigationHistory};
pub use events::{CarouselEvent, EventSink};
pub use service::{CarouselHandle, CarouselService, ServiceError};
