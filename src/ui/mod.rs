//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;

use crate::app::App;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (sidebar_area, main_area) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar_area, app);

    // Form views carry a mounted form; everything else is the home menu
    match &app.state.form {
        Some(form) => forms::draw(frame, main_area, form),
        None => home::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Modal errors on top of everything
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.queued_errors());
    }
}
