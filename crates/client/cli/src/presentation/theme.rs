//! Colors and overlay styling for the deck UI.
use deck_core::{InteractionState, SwipeDirection};
use ratatui::style::{Color, Modifier, Style};

pub const LIKE_COLOR: Color = Color::Green;
pub const PASS_COLOR: Color = Color::Red;
pub const BACK_CARD_COLOR: Color = Color::DarkGray;
pub const ACCENT_COLOR: Color = Color::Cyan;

pub fn direction_color(direction: SwipeDirection) -> Color {
    match direction {
        SwipeDirection::Right => LIKE_COLOR,
        SwipeDirection::Left => PASS_COLOR,
    }
}

/// Style for a LIKE/PASS stamp, or `None` while it should stay hidden.
///
/// Terminals have no alpha channel, so opacity is bucketed into modifiers.
pub fn overlay_style(color: Color, alpha: f32) -> Option<Style> {
    if alpha <= 0.0 {
        return None;
    }

    let style = Style::default().fg(color);
    Some(if alpha >= 1.0 {
        style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else if alpha >= 0.5 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style.add_modifier(Modifier::DIM)
    })
}

/// Border style for the top card.
pub fn top_border(interaction: InteractionState, committed: Option<SwipeDirection>) -> Style {
    match (interaction, committed) {
        (InteractionState::Committing, Some(direction)) => {
            Style::default().fg(direction_color(direction))
        }
        (InteractionState::Dragging, _) => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::White),
    }
}

pub fn back_border() -> Style {
    Style::default().fg(BACK_CARD_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_overlay_has_no_style() {
        assert_eq!(overlay_style(LIKE_COLOR, 0.0), None);
        assert_eq!(overlay_style(LIKE_COLOR, -0.3), None);
    }

    #[test]
    fn overlay_strength_follows_alpha() {
        let faint = overlay_style(PASS_COLOR, 0.2).unwrap();
        let strong = overlay_style(PASS_COLOR, 0.7).unwrap();
        let full = overlay_style(PASS_COLOR, 1.0).unwrap();

        assert!(faint.add_modifier.contains(Modifier::DIM));
        assert!(strong.add_modifier.contains(Modifier::BOLD));
        assert!(!strong.add_modifier.contains(Modifier::REVERSED));
        assert!(full.add_modifier.contains(Modifier::REVERSED));
    }
}
