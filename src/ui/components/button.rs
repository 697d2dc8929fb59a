//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
fn render_button(frame: &mut Frame, area: Rect, content: &str, text_style: Style, border: Color) {
    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    frame.render_widget(paragraph.block(block), area);
}

/// Render a sidebar button for a route
pub fn render_sidebar_button(
    frame: &mut Frame,
    area: Rect,
    key: &str,
    label: &str,
    is_selected: bool,
) {
    let (text_style, border) = if is_selected {
        (
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Color::Cyan,
        )
    } else {
        (Style::default(), Color::DarkGray)
    };
    render_button(frame, area, &format!("{key} {label}"), text_style, border);
}

/// Render a button in a form's action panel
///
/// `accent` colors the label when the button is not selected. Disabled
/// buttons are dimmed regardless of selection.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Color,
) {
    let (text_style, border) = if !is_enabled {
        (Style::default().fg(Color::DarkGray), Color::DarkGray)
    } else if is_selected {
        (
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            accent,
        )
    } else {
        (Style::default().fg(accent), Color::DarkGray)
    };
    render_button(frame, area, label, text_style, border);
}
