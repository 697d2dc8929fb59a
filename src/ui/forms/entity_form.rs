//! Entity form rendering

use super::field_renderer::{draw_field, field_height};
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{EntityForm, FormMessage, MessageKind};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a form with its action panel on the right
pub fn draw(frame: &mut Frame, area: Rect, form: &EntityForm) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(22), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], form);
    draw_action_panel(frame, main_chunks[1], form);
}

fn draw_form(frame: &mut Frame, area: Rect, form: &EntityForm) {
    let form_focused = !form.is_buttons_row_active();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(format!(" {} ", form.kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    constraints.push(Constraint::Length(2)); // Message
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (index, field) in form.fields.iter().enumerate() {
        draw_field(frame, chunks[index], field, form.active_field_index == index);
    }

    let message_area = chunks[form.fields.len()];
    if let Some(line) = message_line(form) {
        frame.render_widget(
            Paragraph::new(line).wrap(Wrap { trim: true }),
            message_area,
        );
    }
}

/// The line under the fields: pending indicator or last result
fn message_line(form: &EntityForm) -> Option<Line<'static>> {
    if form.submitting {
        return Some(Line::from(Span::styled(
            "Submitting…",
            Style::default().fg(Color::Yellow),
        )));
    }
    form.message.as_ref().map(|FormMessage { kind, text }| {
        let color = match kind {
            MessageKind::Success => Color::Green,
            MessageKind::Failure | MessageKind::Error => Color::Red,
        };
        Line::from(Span::styled(
            text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    })
}

fn draw_action_panel(frame: &mut Frame, area: Rect, form: &EntityForm) {
    let is_focused = form.is_buttons_row_active();
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit (primary)
            Constraint::Length(BUTTON_HEIGHT), // Cancel
            Constraint::Length(1),
            Constraint::Min(0), // Shortcut help
        ])
        .split(inner_area);

    render_action_button(
        frame,
        button_chunks[0],
        form.kind.submit_label(),
        is_focused && form.selected_button == 0,
        !form.submitting,
        Color::Green,
    );
    render_action_button(
        frame,
        button_chunks[1],
        "Cancel",
        is_focused && form.selected_button == 1,
        true,
        Color::Gray,
    );

    let help = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{SUBMIT_SHORTCUT}: submit"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(help, button_chunks[3]);
}
