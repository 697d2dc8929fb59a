//! Application state definitions

use super::forms::{EntityForm, Form};
use super::route::View;
use std::collections::VecDeque;

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Home menu selection (index into `View::ROUTES`)
    pub selected_index: usize,

    /// Form mounted for the current view, if it is a form view
    pub form: Option<EntityForm>,
    next_form_id: u64,

    /// An access token is present in client storage
    pub logged_in: bool,

    // Modal error queue
    errors: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Mount a fresh form for the current view, discarding the previous one
    pub fn mount_form(&mut self) {
        self.form = self.current_view.form_kind().map(|kind| {
            self.next_form_id += 1;
            let mut form = EntityForm::new(kind);
            form.id = self.next_form_id;
            form
        });
    }

    pub fn next_form_field(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.next_field();
        }
    }

    pub fn prev_form_field(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.prev_field();
        }
    }

    /// Handle a typed character in the active field
    pub fn form_input_char(&mut self, c: char) {
        if let Some(field) = self.form.as_mut().and_then(|f| f.get_active_field_mut()) {
            field.push_char(c);
        }
    }

    /// Handle backspace in the active field
    pub fn form_backspace(&mut self) {
        if let Some(field) = self.form.as_mut().and_then(|f| f.get_active_field_mut()) {
            field.pop_char();
        }
    }

    /// Push an error message to the modal queue
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error currently displayed
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Errors queued behind the current one
    pub fn queued_errors(&self) -> usize {
        self.errors.len().saturating_sub(1)
    }
}
