//! Forwards deck events to the frame loop and keeps a running tally.
use deck_core::{SwipeCommitted, SwipeDirection, SwipeEvent, SwipeObserver};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::feed::Token;

pub type DeckEvent = SwipeEvent<Token>;

/// Observer that pushes every deck event onto an unbounded channel.
///
/// The controller calls observers synchronously from inside `tick`, so the
/// frame loop drains the channel on its own schedule instead.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<DeckEvent>,
}

impl ChannelObserver {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DeckEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, event: DeckEvent) {
        if self.tx.send(event).is_err() {
            warn!("deck event receiver dropped");
        }
    }
}

impl SwipeObserver<Token> for ChannelObserver {
    fn on_swipe_committed(&mut self, event: SwipeCommitted<Token>) {
        self.forward(SwipeEvent::Committed(event));
    }

    fn on_exhausted(&mut self) {
        self.forward(SwipeEvent::ExhaustionReached);
    }
}

/// Decisions made so far in the current session.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    pub liked: Vec<Token>,
    pub passed: Vec<Token>,
    pub last: Option<(SwipeDirection, String)>,
    pub exhausted: bool,
}

impl Tally {
    pub fn record(&mut self, event: DeckEvent) {
        match event {
            SwipeEvent::Committed(committed) => {
                let token = committed.item.payload;
                info!(
                    direction = %committed.direction,
                    symbol = %token.symbol,
                    sequence_index = committed.sequence_index,
                    "swipe recorded"
                );
                self.last = Some((committed.direction, token.symbol.clone()));
                match committed.direction {
                    SwipeDirection::Right => self.liked.push(token),
                    SwipeDirection::Left => self.passed.push(token),
                }
            }
            SwipeEvent::ExhaustionReached => {
                info!(
                    liked = self.liked.len(),
                    passed = self.passed.len(),
                    "feed exhausted"
                );
                self.exhausted = true;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
