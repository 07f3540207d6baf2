//! Core carousel types and logic.
//!
//! This module contains the pure part of the controller:
//! - Index arithmetic via `CarouselState`
//! - Transition-style classification via `ItemClass`
//! - Bounded navigation history
//!
//! Nothing in here touches a clock, a timer or a channel.

mod history;
mod presentation;
mod state;

pub use history::{IndexTransition, NavigationHistory, TransitionCause};
pub use presentation::ItemClass;
pub use state::{CarouselState, Direction};
