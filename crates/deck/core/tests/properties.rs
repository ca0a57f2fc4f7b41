//! Property-based tests for gesture outcomes and window invariants.

use deck_core::{
    DeckConfig, InteractionState, Item, SwipeController, SwipeDirection, SwipeEvent, Timestamp,
};
use proptest::prelude::*;

type Deck = SwipeController<usize, Vec<SwipeEvent<usize>>>;

fn deck(count: usize, depth: usize) -> Deck {
    let config = DeckConfig::default().with_visible_depth(depth);
    let mut deck = SwipeController::new(config, Vec::new()).unwrap();
    let items: Vec<_> = (0..count).map(|i| Item::new(format!("item-{i}"), i)).collect();
    deck.initialize(items.into_iter()).unwrap();
    deck
}

fn committed_indices(deck: &Deck) -> Vec<u64> {
    deck.observer()
        .iter()
        .filter_map(|event| match event {
            SwipeEvent::Committed(committed) => Some(committed.sequence_index),
            SwipeEvent::ExhaustionReached => None,
        })
        .collect()
}

/// Swipes the top card past the distance threshold and lets the animation finish.
fn commit_top(deck: &mut Deck, direction: SwipeDirection, start: u64) {
    let key = deck.top_card().unwrap().key();
    deck.pointer_down(key, 0.0, Timestamp(start));
    deck.pointer_move(direction.sign() * 150.0, Timestamp(start + 300));
    deck.pointer_up(Timestamp(start + 300));
    deck.tick(Timestamp(start + 1_000));
}

proptest! {
    /// Offsets stay inside the distance threshold and consecutive samples are
    /// far enough apart in time that the release velocity stays under the
    /// velocity threshold.
    #[test]
    fn sub_threshold_drags_return_to_rest(
        offsets in prop::collection::vec(-59.0f32..59.0, 1..12),
        gaps in prop::collection::vec(300u64..1_000, 12),
    ) {
        let mut deck = deck(3, 3);
        let key = deck.top_card().unwrap().key();
        let mut now = 0;

        deck.pointer_down(key, 400.0, Timestamp(now));
        for (offset, gap) in offsets.iter().zip(&gaps) {
            now += gap;
            deck.pointer_move(400.0 + offset, Timestamp(now));
        }
        deck.pointer_up(Timestamp(now));
        deck.tick(Timestamp(now + 10_000));

        let top = deck.top_card().unwrap();
        prop_assert_eq!(top.key(), key);
        prop_assert_eq!(top.visual().interaction, InteractionState::Idle);
        prop_assert_eq!(top.visual().translation_x, 0.0);
        prop_assert!(deck.observer().is_empty());
    }

    #[test]
    fn far_releases_commit_once_in_drag_direction(
        distance in 61.0f32..600.0,
        rightward in any::<bool>(),
        duration in 1u64..5_000,
        extra_callbacks in 0usize..4,
    ) {
        let mut deck = deck(5, 3);
        let key = deck.top_card().unwrap().key();
        let delta = if rightward { distance } else { -distance };

        deck.pointer_down(key, 1_000.0, Timestamp(0));
        deck.pointer_move(1_000.0 + delta, Timestamp(duration));
        deck.pointer_up(Timestamp(duration));
        deck.tick(Timestamp(duration + 1_000));
        for _ in 0..extra_callbacks {
            deck.complete_commit(key);
            deck.tick(Timestamp(duration + 2_000));
        }

        let events = deck.observer();
        prop_assert_eq!(events.len(), 1);
        let expected = if rightward { SwipeDirection::Right } else { SwipeDirection::Left };
        match &events[0] {
            SwipeEvent::Committed(committed) => {
                prop_assert_eq!(committed.direction, expected);
                prop_assert_eq!(committed.sequence_index, 0);
            }
            SwipeEvent::ExhaustionReached => prop_assert!(false, "unexpected exhaustion"),
        }
        prop_assert_eq!(deck.top_card().unwrap().sequence_index(), 1);
    }

    #[test]
    fn window_stays_full_and_consumption_is_monotonic(
        count in 0usize..30,
        depth in 1usize..6,
        directions in prop::collection::vec(any::<bool>(), 0..40),
    ) {
        let mut deck = deck(count, depth);
        prop_assert_eq!(deck.peek_window().len(), depth.min(count));

        let mut consumed = 0usize;
        for (round, rightward) in directions.into_iter().enumerate() {
            if deck.is_exhausted() {
                break;
            }
            let direction = if rightward { SwipeDirection::Right } else { SwipeDirection::Left };
            commit_top(&mut deck, direction, round as u64 * 2_000);
            consumed += 1;

            let remaining = count - consumed;
            prop_assert_eq!(deck.peek_window().len(), depth.min(remaining));
            for (position, card) in deck.peek_window().enumerate() {
                prop_assert_eq!(card.stack_depth(), position);
            }
        }

        let indices = committed_indices(&deck);
        prop_assert_eq!(indices.len(), consumed);
        prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(indices.iter().enumerate().all(|(i, index)| *index == i as u64));

        let exhaustions = deck
            .observer()
            .iter()
            .filter(|event| matches!(event, SwipeEvent::ExhaustionReached))
            .count();
        prop_assert_eq!(exhaustions, usize::from(deck.is_exhausted()));
    }
}
