//! Swipe session coordination.
//!
//! [`SwipeController`] is the only component with side effects visible to
//! collaborators. It routes pointer events through the
//! [`GestureInterpreter`], applies the resulting updates to the top card's
//! [`crate::CardMachine`], and, when a commit animation completes, consumes
//! the top card from the [`CardStack`] and tells the [`SwipeObserver`].
//!
//! Events that are invalid for the current state are logged at `debug` and
//! otherwise ignored.

use tracing::{debug, info, trace, warn};

use crate::animation::Timestamp;
use crate::card::CardSignal;
use crate::config::DeckConfig;
use crate::error::{ConfigError, Rejection};
use crate::gesture::{GestureInterpreter, GestureUpdate, SwipeDirection};
use crate::item::{Item, ItemSource};
use crate::stack::{CardKey, CardStack, VisibleCard};

/// A committed swipe, emitted exactly once per consumed card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeCommitted<T> {
    pub direction: SwipeDirection,
    pub item: Item<T>,
    pub sequence_index: u64,
}

/// Domain events in emission order, for observers that record them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeEvent<T> {
    Committed(SwipeCommitted<T>),
    ExhaustionReached,
}

/// Receives domain events from the controller.
///
/// Called synchronously on the commit path: implementations must hand work
/// off (channel, queue) rather than block on network or storage.
pub trait SwipeObserver<T> {
    fn on_swipe_committed(&mut self, event: SwipeCommitted<T>);

    /// The visible window became empty. Emitted once per initialization.
    fn on_exhausted(&mut self);
}

impl<T> SwipeObserver<T> for Vec<SwipeEvent<T>> {
    fn on_swipe_committed(&mut self, event: SwipeCommitted<T>) {
        self.push(SwipeEvent::Committed(event));
    }

    fn on_exhausted(&mut self) {
        self.push(SwipeEvent::ExhaustionReached);
    }
}

/// Top-level coordinator for one swipeable deck.
pub struct SwipeController<T, O> {
    config: DeckConfig,
    gesture: GestureInterpreter,
    stack: CardStack<T>,
    observer: O,
    exhaustion_signalled: bool,
    last_consumed: Option<u64>,
}

impl<T, O> SwipeController<T, O>
where
    O: SwipeObserver<T>,
{
    /// Creates a controller with an empty, uninitialized deck.
    pub fn new(config: DeckConfig, observer: O) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            gesture: GestureInterpreter::new(&config),
            config,
            stack: CardStack::new(),
            observer,
            exhaustion_signalled: false,
            last_consumed: None,
        })
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Loads a new source with the configured visible depth.
    pub fn initialize<S>(&mut self, source: S) -> Result<(), ConfigError>
    where
        S: ItemSource<T> + 'static,
    {
        self.initialize_with_depth(source, self.config.visible_depth)
    }

    /// Loads a new source, discarding the current window and any gesture.
    ///
    /// An empty source signals exhaustion immediately.
    pub fn initialize_with_depth<S>(&mut self, source: S, depth: usize) -> Result<(), ConfigError>
    where
        S: ItemSource<T> + 'static,
    {
        self.stack.initialize(source, depth)?;
        self.gesture.reset();
        self.exhaustion_signalled = false;
        self.last_consumed = None;
        info!(
            generation = self.stack.generation(),
            depth,
            visible = self.stack.len(),
            "deck initialized"
        );
        self.signal_exhaustion_if_empty();
        Ok(())
    }

    pub fn top_card(&self) -> Option<&VisibleCard<T>> {
        self.stack.top_card()
    }

    /// Read-only snapshot of the visible window, top card first.
    pub fn peek_window(&self) -> impl ExactSizeIterator<Item = &VisibleCard<T>> {
        self.stack.peek_window()
    }

    pub fn stack(&self) -> &CardStack<T> {
        &self.stack
    }

    /// True when the window is empty; only `initialize` brings cards back.
    pub fn is_exhausted(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn pointer_down(&mut self, target: CardKey, x: f32, at: Timestamp) {
        let result = self.try_pointer_down(target, x, at);
        ignore("pointer_down", result);
    }

    pub fn pointer_move(&mut self, x: f32, at: Timestamp) {
        let result = self.try_pointer_move(x, at);
        ignore("pointer_move", result);
    }

    pub fn pointer_up(&mut self, at: Timestamp) {
        let result = self
            .gesture
            .on_pointer_up(at)
            .and_then(|update| self.apply_terminal(update, at));
        ignore("pointer_up", result);
    }

    pub fn pointer_cancel(&mut self, at: Timestamp) {
        let result = self
            .gesture
            .on_pointer_cancel()
            .and_then(|update| self.apply_terminal(update, at));
        ignore("pointer_cancel", result);
    }

    /// Flips `target` between its front and back face.
    pub fn request_flip(&mut self, target: CardKey, at: Timestamp) {
        let result = self.try_request_flip(target, at);
        ignore("request_flip", result);
    }

    /// Advances the top card's animations to `now`. A finished commit
    /// animation consumes the card and emits [`SwipeCommitted`].
    pub fn tick(&mut self, now: Timestamp) {
        let Some(top) = self.stack.top_card_mut() else {
            return;
        };
        let key = top.key();
        match top.machine_mut().advance(now) {
            Some(CardSignal::CommitFinished(direction)) => self.finish_commit(direction),
            Some(CardSignal::Settled) => trace!(?key, "snap-back settled"),
            None => {}
        }
    }

    /// Completion callback for hosts that run their own commit animation.
    ///
    /// Duplicate and stale callbacks are ignored: each commit produces one
    /// window mutation and one domain event.
    pub fn complete_commit(&mut self, target: CardKey) {
        let result = self.try_complete_commit(target);
        ignore("complete_commit", result);
    }

    fn try_pointer_down(&mut self, target: CardKey, x: f32, at: Timestamp) -> Result<(), Rejection> {
        let top = self.require_top(target)?;
        let visual = *top.visual();
        self.gesture.on_pointer_down(x, at, &visual)
    }

    fn try_pointer_move(&mut self, x: f32, at: Timestamp) -> Result<(), Rejection> {
        let Some(GestureUpdate::Drag { delta_x }) = self.gesture.on_pointer_move(x, at)? else {
            return Ok(());
        };
        let Some(top) = self.stack.top_card_mut() else {
            self.gesture.reset();
            return Err(Rejection::EmptyWindow);
        };
        top.machine_mut().drag(delta_x, &self.config)
    }

    fn apply_terminal(&mut self, update: GestureUpdate, at: Timestamp) -> Result<(), Rejection> {
        let top = self.stack.top_card_mut().ok_or(Rejection::EmptyWindow)?;
        match update {
            GestureUpdate::Commit {
                direction,
                delta_x,
                velocity_x,
            } => {
                top.machine_mut().commit(direction, at, &self.config)?;
                debug!(
                    id = %top.item().id,
                    %direction,
                    delta_x,
                    velocity_x,
                    "commit started"
                );
                Ok(())
            }
            GestureUpdate::Cancel => top.machine_mut().cancel(at, &self.config),
            GestureUpdate::Drag { .. } => Ok(()),
        }
    }

    fn try_request_flip(&mut self, target: CardKey, at: Timestamp) -> Result<(), Rejection> {
        self.require_top(target)?;
        if self.gesture.is_active() {
            return Err(Rejection::GestureInProgress);
        }
        let top = self.stack.top_card_mut().ok_or(Rejection::EmptyWindow)?;
        top.machine_mut().request_flip(at, &self.config)
    }

    fn try_complete_commit(&mut self, target: CardKey) -> Result<(), Rejection> {
        if target.generation != self.stack.generation() {
            return Err(Rejection::StaleCard);
        }
        if self
            .last_consumed
            .is_some_and(|consumed| target.sequence_index <= consumed)
        {
            return Err(Rejection::AlreadyRemoved);
        }
        let top = self.stack.top_card_mut().ok_or(Rejection::EmptyWindow)?;
        if top.key() != target {
            return Err(Rejection::NotTopCard);
        }
        let direction = top.machine_mut().complete_commit()?;
        self.finish_commit(direction);
        Ok(())
    }

    fn require_top(&self, target: CardKey) -> Result<&VisibleCard<T>, Rejection> {
        if target.generation != self.stack.generation() {
            return Err(Rejection::StaleCard);
        }
        let top = self.stack.top_card().ok_or(Rejection::EmptyWindow)?;
        if top.key() == target {
            Ok(top)
        } else {
            Err(Rejection::NotTopCard)
        }
    }

    fn finish_commit(&mut self, direction: SwipeDirection) {
        let Some(entry) = self.stack.consume_top() else {
            warn!(%direction, "commit finished with an empty window");
            return;
        };

        debug_assert!(
            self.last_consumed
                .is_none_or(|consumed| consumed < entry.sequence_index),
            "entries must be consumed in increasing sequence order"
        );
        self.last_consumed = Some(entry.sequence_index);

        info!(
            id = %entry.item.id,
            sequence_index = entry.sequence_index,
            %direction,
            remaining = self.stack.len(),
            "swipe committed"
        );
        self.observer.on_swipe_committed(SwipeCommitted {
            direction,
            item: entry.item,
            sequence_index: entry.sequence_index,
        });
        self.signal_exhaustion_if_empty();
    }

    fn signal_exhaustion_if_empty(&mut self) {
        if self.stack.is_empty() && !self.exhaustion_signalled {
            self.exhaustion_signalled = true;
            info!(generation = self.stack.generation(), "deck exhausted");
            self.observer.on_exhausted();
        }
    }
}

fn ignore(event: &'static str, result: Result<(), Rejection>) {
    if let Err(rejection) = result {
        debug!(event, reason = rejection.as_str(), "event ignored");
    }
}
