//! Error types for deck-core.
//!
//! The engine has no I/O, so there are no retryable or fatal errors. Two
//! families exist:
//!
//! - [`ConfigError`]: a [`crate::DeckConfig`] or `initialize` argument that
//!   cannot drive the engine. Returned to the caller.
//! - [`Rejection`]: an event that is not valid for the current state (flip
//!   while dragging, pointer-down while committing, a duplicate completion
//!   callback). Component APIs return it so the reason is observable in
//!   tests; [`crate::SwipeController`] logs and swallows it so gesture
//!   handling stays forgiving of races between touch callbacks and
//!   animation completions.

use crate::card::InteractionState;

/// Invalid engine configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("visible depth must be at least 1")]
    ZeroDepth,
}

/// An event that was ignored because it is not valid in the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("no gesture session is active")]
    NoActiveGesture,

    #[error("a gesture session is already active")]
    GestureInProgress,

    #[error("only the top card accepts interaction")]
    NotTopCard,

    #[error("card is busy ({state})")]
    CardBusy { state: InteractionState },

    #[error("card is not being dragged")]
    NotDragging,

    #[error("card has no commit in flight")]
    NotCommitting,

    #[error("a flip animation is already running")]
    FlipInProgress,

    #[error("card has already been removed")]
    AlreadyRemoved,

    #[error("visible window is empty")]
    EmptyWindow,

    #[error("card belongs to a previous initialization")]
    StaleCard,
}

impl Rejection {
    /// Stable identifier for logging and tests.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoActiveGesture => "no_active_gesture",
            Self::GestureInProgress => "gesture_in_progress",
            Self::NotTopCard => "not_top_card",
            Self::CardBusy { .. } => "card_busy",
            Self::NotDragging => "not_dragging",
            Self::NotCommitting => "not_committing",
            Self::FlipInProgress => "flip_in_progress",
            Self::AlreadyRemoved => "already_removed",
            Self::EmptyWindow => "empty_window",
            Self::StaleCard => "stale_card",
        }
    }

    /// Returns true if the rejection means a duplicate of an event that
    /// already took effect, rather than an event arriving too early.
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::AlreadyRemoved | Self::StaleCard)
    }
}
