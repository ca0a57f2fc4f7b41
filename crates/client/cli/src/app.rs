//! Frame loop tying terminal input, the deck engine, and rendering together.
//!
//! Every frame drains pending terminal events into pointer calls, advances
//! deck animations with the elapsed clock, records emitted swipe events,
//! and redraws.
use anyhow::{Context, Result};
use crossterm::event;
use deck_core::{SwipeController, Timestamp};
use tokio::{
    sync::mpsc,
    time::{self, Duration, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    config::CliConfig,
    feed::{Feed, Token},
    input::{InputAction, InputHandler},
    observer::{ChannelObserver, DeckEvent, Tally},
    presentation::{
        terminal::Tui,
        ui::{self, DeckView},
        widgets::deck::DeckLayout,
    },
};

pub type Deck = SwipeController<Token, ChannelObserver>;

pub struct App {
    config: CliConfig,
    deck: Deck,
    events: mpsc::UnboundedReceiver<DeckEvent>,
    feed: Feed,
    tally: Tally,
    input: InputHandler,
    layout: DeckLayout,
    started: Instant,
}

impl App {
    pub fn new(config: CliConfig, feed: Feed) -> Result<Self> {
        let (observer, events) = ChannelObserver::channel();
        let mut deck = SwipeController::new(config.deck.clone(), observer)
            .context("invalid deck configuration")?;
        deck.initialize(feed.source())
            .context("failed to initialize deck")?;

        Ok(Self {
            config,
            deck,
            events,
            feed,
            tally: Tally::default(),
            input: InputHandler::new(),
            layout: DeckLayout::default(),
            started: Instant::now(),
        })
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<Tally> {
        let mut ticker = time::interval(Duration::from_millis(self.config.ui.frame_interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            if self.handle_input_tick()? {
                break;
            }
            self.deck.tick(self.now());
            self.drain_events();
            self.render(terminal)?;
        }

        info!(
            liked = self.tally.liked.len(),
            passed = self.tally.passed.len(),
            "session finished"
        );
        Ok(self.tally)
    }

    fn now(&self) -> Timestamp {
        let elapsed = self.started.elapsed().as_millis();
        Timestamp::from_millis(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }

    /// Applies every pending terminal event. Returns `true` on quit.
    fn handle_input_tick(&mut self) -> Result<bool> {
        while event::poll(Duration::from_millis(0))? {
            let action = self.input.handle(event::read()?);
            if self.apply(action)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn apply(&mut self, action: InputAction) -> Result<bool> {
        let now = self.now();
        match action {
            InputAction::PointerDown { column, row } => {
                if self.layout.hits_top_card(column, row)
                    && let Some(top) = self.deck.top_card()
                {
                    let key = top.key();
                    let x = self.config.ui.column_to_units(column);
                    self.deck.pointer_down(key, x, now);
                }
            }
            InputAction::PointerMove { column } => {
                let x = self.config.ui.column_to_units(column);
                self.deck.pointer_move(x, now);
            }
            InputAction::PointerUp => self.deck.pointer_up(now),
            InputAction::PointerCancel => self.deck.pointer_cancel(now),
            InputAction::Flip => {
                if let Some(top) = self.deck.top_card() {
                    let key = top.key();
                    self.deck.request_flip(key, now);
                }
            }
            InputAction::Restart => self.restart()?,
            InputAction::Quit => return Ok(true),
            InputAction::Redraw | InputAction::None => {}
        }
        Ok(false)
    }

    fn restart(&mut self) -> Result<()> {
        // Events from the previous run belong to the old tally.
        self.drain_events();
        info!(
            liked = self.tally.liked.len(),
            passed = self.tally.passed.len(),
            "restarting feed"
        );
        self.tally.reset();
        self.deck
            .initialize(self.feed.source())
            .context("failed to restart deck")?;
        Ok(())
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "deck event");
            self.tally.record(event);
        }
    }

    fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let view = DeckView {
            deck: &self.deck,
            tally: &self.tally,
            ui: &self.config.ui,
        };
        self.layout = ui::render(terminal, &view)?;
        Ok(())
    }
}
