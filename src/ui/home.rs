//! Home screen: route menu

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" GIN Admin ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Session
            Constraint::Min(0),    // Routes
        ])
        .margin(1)
        .split(inner);

    let session = if app.state.logged_in {
        Line::from(vec![
            Span::styled("Logged in", Style::default().fg(Color::Green)),
            Span::styled("  (o: log out)", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            "Not logged in. Requests are sent without a valid token.",
            Style::default().fg(Color::Yellow),
        ))
    };
    frame.render_widget(
        Paragraph::new(vec![
            session,
            Line::from(Span::styled(
                format!("API: {}", app.api_url),
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        chunks[0],
    );

    let lines: Vec<Line> = View::ROUTES
        .iter()
        .enumerate()
        .map(|(index, view)| {
            let selected = index == app.state.selected_index;
            let marker = if selected { "▸ " } else { "  " };
            let label_style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{} ", index + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<18}", view.label()), label_style),
                Span::styled(view.path(), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[1]);
}
