//! Navigation history tracking.
//!
//! Keeps a bounded, immutable record of index transitions for analytics and
//! diagnostics. Recording never mutates an existing history.

use super::state::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What triggered a transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionCause {
    /// `go_to_next`, `go_to_previous` or `go_to_index`.
    Manual,
    /// A tick of the auto-advance timer.
    AutoAdvance,
}

/// Record of a single index change.
///
/// # Example
///
/// ```rust
/// use carousel::core::{Direction, IndexTransition, TransitionCause};
/// use chrono::Utc;
///
/// let transition = IndexTransition {
///     from: 0,
///     to: 1,
///     direction: Direction::Next,
///     cause: TransitionCause::AutoAdvance,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexTransition {
    /// Index displayed before the transition
    pub from: usize,
    /// Index displayed after the transition
    pub to: usize,
    pub direction: Direction,
    pub cause: TransitionCause,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of index transitions, capped at `limit` entries.
///
/// Oldest entries are dropped first once the cap is reached. A limit of zero
/// keeps nothing.
///
/// # Example
///
/// ```rust
/// use carousel::core::{Direction, IndexTransition, NavigationHistory, TransitionCause};
/// use chrono::Utc;
///
/// let history = NavigationHistory::with_limit(2);
/// let step = |from, to| IndexTransition {
///     from,
///     to,
///     direction: Direction::Next,
///     cause: TransitionCause::Manual,
///     timestamp: Utc::now(),
/// };
///
/// let history = history.record(step(0, 1)).record(step(1, 2)).record(step(2, 3));
///
/// assert_eq!(history.transitions().len(), 2);
/// assert_eq!(history.get_path(), vec![1, 2, 3]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationHistory {
    transitions: Vec<IndexTransition>,
    limit: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }
}

impl NavigationHistory {
    pub const DEFAULT_LIMIT: usize = 50;

    /// Create an empty history keeping at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a transition, returning a new history.
    ///
    /// The original history is left untouched.
    pub fn record(&self, transition: IndexTransition) -> Self {
        if self.limit == 0 {
            return self.clone();
        }

        let overflow = (self.transitions.len() + 1).saturating_sub(self.limit);
        let mut transitions: Vec<IndexTransition> =
            self.transitions.iter().skip(overflow).cloned().collect();
        transitions.push(transition);
        Self {
            transitions,
            limit: self.limit,
        }
    }

    /// Indices visited: the `from` of the oldest retained transition, then
    /// the `to` of each transition.
    pub fn get_path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the oldest and newest retained transitions.
    ///
    /// `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Number of retained transitions caused by the timer.
    pub fn auto_advance_count(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.cause == TransitionCause::AutoAdvance)
            .count()
    }

    pub fn transitions(&self) -> &[IndexTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&IndexTransition> {
        self.transitions.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: usize, to: usize, cause: TransitionCause) -> IndexTransition {
        IndexTransition {
            from,
            to,
            direction: Direction::Next,
            cause,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = NavigationHistory::default();
        assert!(history.transitions().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.limit(), NavigationHistory::DEFAULT_LIMIT);
    }

    #[test]
    fn record_is_immutable() {
        let history = NavigationHistory::default();
        let recorded = history.record(transition(0, 1, TransitionCause::Manual));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(recorded.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_index_sequence() {
        let history = NavigationHistory::default()
            .record(transition(0, 1, TransitionCause::AutoAdvance))
            .record(transition(1, 2, TransitionCause::Manual));

        assert_eq!(history.get_path(), vec![0, 1, 2]);
    }

    #[test]
    fn limit_drops_oldest_first() {
        let mut history = NavigationHistory::with_limit(3);
        for i in 0..10 {
            history = history.record(transition(i, i + 1, TransitionCause::Manual));
        }

        assert_eq!(history.transitions().len(), 3);
        assert_eq!(history.get_path(), vec![7, 8, 9, 10]);
        assert_eq!(history.last().map(|t| t.to), Some(10));
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let history =
            NavigationHistory::with_limit(0).record(transition(0, 1, TransitionCause::Manual));
        assert!(history.transitions().is_empty());
    }

    #[test]
    fn counts_auto_advances() {
        let history = NavigationHistory::default()
            .record(transition(0, 1, TransitionCause::AutoAdvance))
            .record(transition(1, 0, TransitionCause::Manual))
            .record(transition(0, 1, TransitionCause::AutoAdvance));

        assert_eq!(history.auto_advance_count(), 2);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let mut first = transition(0, 1, TransitionCause::Manual);
        first.timestamp = start;
        let mut second = transition(1, 2, TransitionCause::Manual);
        second.timestamp = start + chrono::Duration::milliseconds(250);

        let history = NavigationHistory::default().record(first).record(second);

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history =
            NavigationHistory::default().record(transition(3, 4, TransitionCause::AutoAdvance));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: NavigationHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
