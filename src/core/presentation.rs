//! Transition-style classification for rendering slides.
//!
//! A pure query over [`CarouselState`]: the view asks which style each slide
//! should carry and animates accordingly.

use super::state::{CarouselState, Direction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Style of a single slide relative to the current transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemClass {
    /// The displayed slide.
    Active,
    /// The slide that just left after moving forward.
    ExitLeft,
    /// The slide that just left after moving back.
    ExitRight,
    /// Waiting slide, entering from the right on forward movement.
    EnterRight,
    /// Waiting slide, entering from the left on backward movement.
    EnterLeft,
}

impl ItemClass {
    /// Classify the slide at `index`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carousel::core::{CarouselState, ItemClass};
    ///
    /// let state = CarouselState::new().forward(3).unwrap();
    ///
    /// assert_eq!(ItemClass::of(&state, 1), ItemClass::Active);
    /// assert_eq!(ItemClass::of(&state, 0), ItemClass::ExitLeft);
    /// assert_eq!(ItemClass::of(&state, 2), ItemClass::EnterRight);
    /// ```
    pub fn of(state: &CarouselState, index: usize) -> Self {
        if index == state.current() {
            return Self::Active;
        }

        match (state.previous() == Some(index), state.direction()) {
            (true, Direction::Next) => Self::ExitLeft,
            (true, Direction::Prev) => Self::ExitRight,
            (false, Direction::Next) => Self::EnterRight,
            (false, Direction::Prev) => Self::EnterLeft,
        }
    }

    /// CSS-style class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::ExitLeft => "exit-left",
            Self::ExitRight => "exit-right",
            Self::EnterRight => "enter-right",
            Self::EnterLeft => "enter-left",
        }
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
