//! Pure navigation state for a circular carousel.
//!
//! `CarouselState` is an immutable value describing which slide is showing,
//! which slide was showing before the last transition, and which way the last
//! transition went. Every operation returns a new state and never panics,
//! whatever the list length or requested index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the most recent transition.
///
/// Only used to pick a transition style; it carries no navigation meaning.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Next,
    Prev,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a carousel within a list of `len` items.
///
/// # Example
///
/// ```rust
/// use carousel::core::{CarouselState, Direction};
///
/// let state = CarouselState::new();
/// let state = state.backward(5).unwrap();
///
/// assert_eq!(state.current(), 4);
/// assert_eq!(state.previous(), Some(0));
/// assert_eq!(state.direction(), Direction::Prev);
///
/// // Jumps clamp instead of wrapping.
/// let state = state.jump(999, 5).unwrap();
/// assert_eq!(state.current(), 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CarouselState {
    current: usize,
    previous: Option<usize>,
    direction: Direction,
}

impl CarouselState {
    /// State at the first slide with no previous slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the displayed slide. Always 0 for an empty list.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index displayed before the last transition, `None` before any.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one slide forward, wrapping past the end.
    ///
    /// Returns `None` when `len` is zero.
    pub fn forward(&self, len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            current: (self.current % len + 1) % len,
            previous: Some(self.current),
            direction: Direction::Next,
        })
    }

    /// Move one slide back, wrapping before the start.
    ///
    /// Returns `None` when `len` is zero.
    pub fn backward(&self, len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            current: (self.current % len + len - 1) % len,
            previous: Some(self.current),
            direction: Direction::Prev,
        })
    }

    /// Jump to `index`, clamped into `[0, len - 1]`.
    ///
    /// Unlike [`forward`](Self::forward) and [`backward`](Self::backward)
    /// this never wraps: negative indices land on the first slide and
    /// indices past the end land on the last one. The direction is `Next`
    /// only when the target lies after the current slide.
    ///
    /// Returns `None` when `len` is zero.
    pub fn jump(&self, index: i64, len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        let last = len - 1;
        let target = if index <= 0 {
            0
        } else {
            usize::try_from(index).map_or(last, |i| i.min(last))
        };
        let direction = if target > self.current {
            Direction::Next
        } else {
            Direction::Prev
        };
        Some(Self {
            current: target,
            previous: Some(self.current),
            direction,
        })
    }

    /// Back to the first slide with the previous slide forgotten.
    ///
    /// The direction of the last transition is kept.
    pub fn reset(&self) -> Self {
        Self {
            current: 0,
            previous: None,
            direction: self.direction,
        }
    }
}
