//! Footer widget displaying key bindings.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the footer panel with controls for the current deck state.
pub fn render(frame: &mut Frame, area: Rect, exhausted: bool) {
    let text = if exhausted {
        Line::from(vec![
            Span::raw("Feed exhausted | "),
            Span::raw("[r] Restart | "),
            Span::raw("[q] Quit"),
        ])
    } else {
        Line::from(vec![
            Span::raw("[Drag] Swipe card | "),
            Span::raw("[f/Space] Flip | "),
            Span::raw("[r] Restart | "),
            Span::raw("[q] Quit"),
        ])
    };

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
