//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field needs, borders included
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline() {
        6
    } else {
        3
    }
}

/// Draw a form field
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let color = if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let cursor = Span::styled(if is_active { "▌" } else { "" }, Style::default().fg(color));

    let value = field.display_value();
    let mut lines: Vec<Line> = if value.is_empty() {
        // Placeholder only while unfocused so the cursor sits at column 0
        let placeholder = if is_active { "" } else { field.placeholder() };
        vec![Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        // split('\n') keeps a trailing empty line so the cursor follows a newline
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(color))))
            .collect()
    };
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor);
    }

    let title = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let content = Paragraph::new(lines).block(block);
    let content = if field.is_multiline() {
        content.wrap(Wrap { trim: false })
    } else {
        content
    };
    frame.render_widget(content, area);
}
