//! Card geometry and single-card rendering.
use deck_core::{FaceState, VisibleCard};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use crate::feed::Token;
use crate::presentation::theme;

pub const CARD_WIDTH: u16 = 34;
pub const CARD_HEIGHT: u16 = 11;

/// Resting rectangle of the top card, centered in `area`.
///
/// Leaves `depth_rows` rows below the card for the cards stacked behind it.
pub fn resting_rect(area: Rect, depth_rows: u16) -> Rect {
    let width = CARD_WIDTH.min(area.width);
    let height = CARD_HEIGHT.min(area.height.saturating_sub(depth_rows));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height.saturating_sub(height + depth_rows)) / 2;
    Rect::new(x, y, width, height)
}

/// Rectangle of a card `depth` positions behind the top card.
pub fn behind_rect(base: Rect, depth: u16, bounds: Rect) -> Option<Rect> {
    let inset = depth.saturating_mul(2);
    if inset.saturating_mul(2) >= base.width {
        return None;
    }
    let rect = Rect::new(base.x + inset, base.y + depth, base.width - inset * 2, base.height);
    visible(rect.intersection(bounds))
}

/// Top card rectangle after horizontal translation and flip narrowing.
pub fn moved_rect(base: Rect, offset_columns: i32, face_scale: f32, bounds: Rect) -> Option<Rect> {
    let width = (f32::from(base.width) * face_scale.clamp(0.0, 1.0)).round() as i32;
    if width <= 0 {
        return None;
    }

    let left = i32::from(base.x) + (i32::from(base.width) - width) / 2 + offset_columns;
    let right = left + width;
    let clipped_left = left.max(i32::from(bounds.x));
    let clipped_right = right.min(i32::from(bounds.right()));
    if clipped_right <= clipped_left {
        return None;
    }

    let rect = Rect::new(
        clipped_left as u16,
        base.y,
        (clipped_right - clipped_left) as u16,
        base.height,
    );
    visible(rect.intersection(bounds))
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

fn visible(rect: Rect) -> Option<Rect> {
    (rect.width > 0 && rect.height > 0).then_some(rect)
}

/// Draws an unlabeled card peeking out from behind the stack.
pub fn render_back(frame: &mut Frame, rect: Rect) {
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::back_border()),
        rect,
    );
}

/// Draws the interactive card with its current pose and overlays.
pub fn render_top(frame: &mut Frame, rect: Rect, card: &VisibleCard<Token>) {
    let visual = card.visual();
    let token = &card.item().payload;

    let mut block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme::top_border(
            visual.interaction,
            card.machine().committed_direction(),
        ))
        .title(Line::from(stamps(visual.like_overlay_alpha, visual.pass_overlay_alpha)))
        .title_alignment(Alignment::Center);
    if visual.rotation_deg.abs() >= 0.05 {
        block = block.title_bottom(
            Line::from(format!(" tilt {:+.1}\u{b0} ", visual.rotation_deg)).centered(),
        );
    }

    let body = match visual.face {
        FaceState::FrontShown => front_face(token, card.sequence_index()),
        FaceState::BackShown => back_face(token),
    };

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rect,
    );
}

fn stamps(like_alpha: f32, pass_alpha: f32) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if let Some(style) = theme::overlay_style(theme::PASS_COLOR, pass_alpha) {
        spans.push(Span::styled(" PASS ", style));
    }
    if let Some(style) = theme::overlay_style(theme::LIKE_COLOR, like_alpha) {
        spans.push(Span::styled(" LIKE ", style));
    }
    spans
}

fn front_face(token: &Token, sequence_index: u64) -> Vec<Line<'_>> {
    vec![
        Line::raw(""),
        Line::styled(
            token.symbol.as_str(),
            Style::default()
                .fg(theme::ACCENT_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(token.name.as_str()),
        Line::raw(""),
        Line::styled(
            format!("#{}", sequence_index + 1),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]
}

fn back_face(token: &Token) -> Vec<Line<'_>> {
    let blurb = if token.blurb.is_empty() {
        "No description."
    } else {
        token.blurb.as_str()
    };
    vec![
        Line::styled(
            token.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(blurb),
    ]
}
