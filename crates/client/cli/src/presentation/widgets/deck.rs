//! Deck panel: the visible window drawn back to front.
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use super::card;
use crate::app::Deck;
use crate::config::UiConfig;

/// Where the top card sits at rest, used to hit-test pointer presses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeckLayout {
    pub top_card: Option<Rect>,
}

impl DeckLayout {
    pub fn hits_top_card(&self, column: u16, row: u16) -> bool {
        self.top_card
            .is_some_and(|rect| card::contains(rect, column, row))
    }
}

pub fn render(frame: &mut Frame, area: Rect, deck: &Deck, ui: &UiConfig) -> DeckLayout {
    let behind = deck.peek_window().len().saturating_sub(1);
    let base = card::resting_rect(area, u16::try_from(behind).unwrap_or(u16::MAX));

    if deck.top_card().is_none() {
        render_empty(frame, base);
        return DeckLayout::default();
    }

    // Back to front so the top card paints last.
    let cards: Vec<_> = deck.peek_window().collect();
    for visible in cards.into_iter().rev() {
        if !visible.is_top() {
            let depth = u16::try_from(visible.stack_depth()).unwrap_or(u16::MAX);
            if let Some(rect) = card::behind_rect(base, depth, area) {
                card::render_back(frame, rect);
            }
            continue;
        }

        let visual = visible.visual();
        let offset = ui.units_to_columns(visual.translation_x);
        if let Some(rect) = card::moved_rect(base, offset, visual.face_scale, area) {
            card::render_top(frame, rect, visible);
        }
    }

    DeckLayout {
        top_card: Some(base),
    }
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::raw(""),
        Line::styled(
            "No more tokens",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "Press r to start over",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_layout_hits_nothing() {
        assert!(!DeckLayout::default().hits_top_card(0, 0));
    }

    #[test]
    fn layout_hits_inside_top_card() {
        let layout = DeckLayout {
            top_card: Some(Rect::new(5, 5, 10, 4)),
        };
        assert!(layout.hits_top_card(5, 5));
        assert!(layout.hits_top_card(14, 8));
        assert!(!layout.hits_top_card(15, 8));
    }
}
