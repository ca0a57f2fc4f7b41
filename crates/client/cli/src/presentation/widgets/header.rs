//! Header widget displaying the running tally and last decision.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::Deck;
use crate::observer::Tally;
use crate::presentation::theme;

/// Render the header panel with liked/passed counts and window depth.
pub fn render(frame: &mut Frame, area: Rect, deck: &Deck, tally: &Tally) {
    let mut spans = vec![
        Span::styled(
            "Swipe Deck",
            Style::default()
                .fg(theme::ACCENT_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Liked: "),
        Span::styled(
            tally.liked.len().to_string(),
            Style::default().fg(theme::LIKE_COLOR),
        ),
        Span::raw(" | Passed: "),
        Span::styled(
            tally.passed.len().to_string(),
            Style::default().fg(theme::PASS_COLOR),
        ),
        Span::raw(" | Stack: "),
        Span::styled(
            format!("{}/{}", deck.peek_window().len(), deck.config().visible_depth),
            Style::default().fg(Color::Yellow),
        ),
    ];

    if let Some((direction, symbol)) = &tally.last {
        let verb = if direction.is_like() { "liked" } else { "passed" };
        spans.push(Span::raw(" | Last: "));
        spans.push(Span::styled(
            format!("{verb} {symbol}"),
            Style::default().fg(theme::direction_color(*direction)),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
