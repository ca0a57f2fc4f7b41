//! Bounded visible window over an unbounded item queue.
//!
//! [`CardStack`] pulls items from an injected [`ItemSource`] into a window
//! of at most `depth` cards. Position 0 is the top (interactive) card;
//! higher positions sit further back. Consuming the top card shifts every
//! other card forward by one and refills the back from the source until the
//! source runs dry, after which the window simply shrinks.

use std::collections::VecDeque;

use tracing::debug;

use crate::card::{CardMachine, CardVisualState};
use crate::error::ConfigError;
use crate::item::{Item, ItemSource, QueueEntry};

/// Identifies a visible card across re-initializations of the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardKey {
    pub generation: u32,
    pub sequence_index: u64,
}

/// A card currently in the visible window.
#[derive(Debug)]
pub struct VisibleCard<T> {
    entry: QueueEntry<T>,
    stack_depth: usize,
    generation: u32,
    machine: CardMachine,
}

impl<T> VisibleCard<T> {
    pub fn entry(&self) -> &QueueEntry<T> {
        &self.entry
    }

    pub fn item(&self) -> &Item<T> {
        &self.entry.item
    }

    pub fn sequence_index(&self) -> u64 {
        self.entry.sequence_index
    }

    /// 0 for the top card, increasing toward the back.
    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }

    pub fn is_top(&self) -> bool {
        self.stack_depth == 0
    }

    pub fn key(&self) -> CardKey {
        CardKey {
            generation: self.generation,
            sequence_index: self.entry.sequence_index,
        }
    }

    pub fn visual(&self) -> &CardVisualState {
        self.machine.visual()
    }

    pub fn machine(&self) -> &CardMachine {
        &self.machine
    }

    pub(crate) fn machine_mut(&mut self) -> &mut CardMachine {
        &mut self.machine
    }
}

/// Owns the item source and the visible window.
pub struct CardStack<T> {
    source: Option<Box<dyn ItemSource<T>>>,
    window: VecDeque<VisibleCard<T>>,
    depth: usize,
    next_sequence: u64,
    generation: u32,
}

impl<T> Default for CardStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CardStack<T> {
    /// Creates an empty, uninitialized stack.
    pub fn new() -> Self {
        Self {
            source: None,
            window: VecDeque::new(),
            depth: 0,
            next_sequence: 0,
            generation: 0,
        }
    }

    /// Replaces the source and fills a fresh window of `depth` cards.
    ///
    /// Any previous window is discarded and the generation advances, so
    /// [`CardKey`]s handed out before this call no longer match.
    pub fn initialize<S>(&mut self, source: S, depth: usize) -> Result<(), ConfigError>
    where
        S: ItemSource<T> + 'static,
    {
        if depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }

        self.generation = self.generation.wrapping_add(1);
        self.window.clear();
        self.depth = depth;
        self.next_sequence = 0;
        self.source = Some(Box::new(source));
        self.refill();

        debug!(
            generation = self.generation,
            depth,
            filled = self.window.len(),
            "stack initialized"
        );
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// True once the source has reported that it has no further items.
    pub fn is_source_exhausted(&self) -> bool {
        self.source.is_none()
    }

    pub fn top_card(&self) -> Option<&VisibleCard<T>> {
        self.window.front()
    }

    pub(crate) fn top_card_mut(&mut self) -> Option<&mut VisibleCard<T>> {
        self.window.front_mut()
    }

    /// Cards in window order, top first.
    pub fn peek_window(&self) -> impl ExactSizeIterator<Item = &VisibleCard<T>> {
        self.window.iter()
    }

    pub fn get(&self, key: CardKey) -> Option<&VisibleCard<T>> {
        self.window.iter().find(|card| card.key() == key)
    }

    /// Removes the top card, shifts the rest forward, and refills the back.
    ///
    /// Returns `None` when the window is empty.
    pub fn consume_top(&mut self) -> Option<QueueEntry<T>> {
        let removed = self.window.pop_front()?;
        for card in &mut self.window {
            card.stack_depth -= 1;
        }
        self.refill();
        Some(removed.entry)
    }

    fn refill(&mut self) {
        while self.window.len() < self.depth {
            let Some(source) = self.source.as_mut() else {
                break;
            };
            let Some(item) = source.next_item() else {
                debug!(
                    generation = self.generation,
                    pulled = self.next_sequence,
                    "item source exhausted"
                );
                self.source = None;
                break;
            };

            let sequence_index = self.next_sequence;
            self.next_sequence += 1;
            self.window.push_back(VisibleCard {
                entry: QueueEntry {
                    item,
                    sequence_index,
                },
                stack_depth: self.window.len(),
                generation: self.generation,
                machine: CardMachine::new(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::cycling;

    fn items(count: usize) -> Vec<Item<usize>> {
        (0..count).map(|i| Item::new(format!("item-{i}"), i)).collect()
    }

    fn depths<T>(stack: &CardStack<T>) -> Vec<usize> {
        stack.peek_window().map(VisibleCard::stack_depth).collect()
    }

    fn sequence<T>(stack: &CardStack<T>) -> Vec<u64> {
        stack.peek_window().map(VisibleCard::sequence_index).collect()
    }

    #[test]
    fn initialize_fills_to_depth() {
        let mut stack = CardStack::new();
        stack.initialize(items(10).into_iter(), 3).unwrap();

        assert_eq!(stack.len(), 3);
        assert_eq!(depths(&stack), [0, 1, 2]);
        assert_eq!(sequence(&stack), [0, 1, 2]);
        assert!(stack.top_card().unwrap().is_top());
    }

    #[test]
    fn short_source_fills_partially() {
        let mut stack = CardStack::new();
        stack.initialize(items(2).into_iter(), 3).unwrap();
        assert_eq!(stack.len(), 2);
        assert!(stack.is_source_exhausted());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let mut stack = CardStack::new();
        assert_eq!(
            stack.initialize(items(3).into_iter(), 0),
            Err(ConfigError::ZeroDepth)
        );
        assert_eq!(stack.generation(), 0);
    }

    #[test]
    fn consume_shifts_and_replenishes() {
        let mut stack = CardStack::new();
        stack.initialize(items(5).into_iter(), 3).unwrap();

        let removed = stack.consume_top().unwrap();
        assert_eq!(removed.sequence_index, 0);
        assert_eq!(removed.item.payload, 0);
        assert_eq!(depths(&stack), [0, 1, 2]);
        assert_eq!(sequence(&stack), [1, 2, 3]);
    }

    #[test]
    fn window_shrinks_after_source_runs_dry() {
        let mut stack = CardStack::new();
        stack.initialize(items(4).into_iter(), 3).unwrap();

        stack.consume_top().unwrap();
        assert_eq!(stack.len(), 3);
        stack.consume_top().unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(depths(&stack), [0, 1]);
        stack.consume_top().unwrap();
        stack.consume_top().unwrap();
        assert!(stack.is_empty());
        assert!(stack.top_card().is_none());
        assert!(stack.consume_top().is_none());
    }

    #[test]
    fn cycling_source_never_exhausts() {
        let mut stack = CardStack::new();
        stack.initialize(cycling(items(2)), 3).unwrap();
        assert_eq!(stack.len(), 3);

        for _ in 0..10 {
            stack.consume_top().unwrap();
            assert_eq!(stack.len(), 3);
        }
        assert_eq!(sequence(&stack), [10, 11, 12]);
        assert_eq!(stack.top_card().unwrap().item().payload, 0);
    }

    #[test]
    fn reinitialize_bumps_generation() {
        let mut stack = CardStack::new();
        stack.initialize(items(3).into_iter(), 3).unwrap();
        let old_key = stack.top_card().unwrap().key();

        stack.initialize(items(3).into_iter(), 2).unwrap();
        let new_key = stack.top_card().unwrap().key();

        assert_eq!(old_key.sequence_index, new_key.sequence_index);
        assert_ne!(old_key, new_key);
        assert!(stack.get(old_key).is_none());
        assert_eq!(stack.len(), 2);
    }
}
