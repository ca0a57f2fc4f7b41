//! Frame layout and panel composition.
use anyhow::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::Deck;
use crate::config::UiConfig;
use crate::observer::Tally;
use crate::presentation::{
    terminal::Tui,
    widgets::{
        deck::{self, DeckLayout},
        footer, header,
    },
};

/// Everything a frame needs to read.
pub struct DeckView<'a> {
    pub deck: &'a Deck,
    pub tally: &'a Tally,
    pub ui: &'a UiConfig,
}

/// Draws one frame and returns where the top card landed.
pub fn render(terminal: &mut Tui, view: &DeckView<'_>) -> Result<DeckLayout> {
    let mut layout = DeckLayout::default();
    terminal.draw(|frame| layout = render_frame(frame, view))?;
    Ok(layout)
}

fn render_frame(frame: &mut Frame, view: &DeckView<'_>) -> DeckLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], view.deck, view.tally);
    let layout = deck::render(frame, chunks[1], view.deck, view.ui);
    footer::render(frame, chunks[2], view.deck.is_exhausted());
    layout
}
