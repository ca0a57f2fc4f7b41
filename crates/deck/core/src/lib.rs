//! Swipeable card queue engine.
//!
//! `deck-core` turns raw pointer motion into committed swipe decisions, drives
//! the per-card visual state (drag-follow, fling-out, snap-back, flip), and
//! keeps a bounded visible window over an unbounded logical queue of items.
//! It performs no I/O and never spawns timers: hosts feed pointer events and
//! a clock into [`session::SwipeController`], render [`stack::VisibleCard`]s
//! from `peek_window()`, and receive [`session::SwipeEvent`]s through a
//! [`session::SwipeObserver`].
//!
//! Modules are organized leaves first:
//! - [`gesture`] interprets pointer samples into drag/commit/cancel updates
//! - [`card`] is the per-card visual state machine
//! - [`stack`] owns the visible window and the item source
//! - [`session`] coordinates the three and emits domain events
pub mod animation;
pub mod card;
pub mod config;
pub mod error;
pub mod gesture;
pub mod item;
pub mod session;
pub mod stack;

pub use animation::{Timestamp, Tween};
pub use card::{CardMachine, CardSignal, CardVisualState, FaceState, InteractionState};
pub use config::DeckConfig;
pub use error::{ConfigError, Rejection};
pub use gesture::{GestureInterpreter, GestureSession, GestureUpdate, SwipeDirection};
pub use item::{Item, ItemId, ItemSource, QueueEntry, cycling};
pub use session::{SwipeCommitted, SwipeController, SwipeEvent, SwipeObserver};
pub use stack::{CardKey, CardStack, VisibleCard};
