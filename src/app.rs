//! Application state and core logic

use crate::api::{
    clear_tokens, login, prepare, store_tokens, submit, ApiClient, ApiClientTrait, Credentials,
    LoginOutcome, PrepareError, Submission, SubmitOutcome, SubmitRequest,
};
use crate::config::Settings;
use crate::state::{AppState, MessageKind, View};
use crate::storage::ClientStorage;
use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Result of a finished request, tagged with the form that sent it
#[derive(Debug)]
struct SubmissionEvent {
    form_id: u64,
    result: SubmissionResult,
}

#[derive(Debug)]
enum SubmissionResult {
    Entity {
        request: SubmitRequest,
        outcome: SubmitOutcome,
    },
    Login(LoginOutcome),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// API client shared with in-flight submissions
    api: Arc<dyn ApiClientTrait>,
    /// Base URL shown in the status bar
    pub api_url: String,
    /// Client storage holding the access token
    storage: ClientStorage,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message, cleared on the next key press
    pub status_message: Option<String>,
    events_tx: UnboundedSender<SubmissionEvent>,
    events_rx: UnboundedReceiver<SubmissionEvent>,
}

impl App {
    /// Create a new App instance from resolved settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = ApiClient::new(&settings.api_base_url, settings.request_timeout)?;
        let storage = ClientStorage::open_default()
            .ok_or_else(|| anyhow!("Could not determine a data directory for client storage"))?;
        tracing::info!(
            api = %client.base_url(),
            storage = %storage.path().display(),
            "Starting"
        );
        Ok(Self::with_client(
            Arc::new(client),
            storage,
            settings.api_base_url.clone(),
            settings.initial_view,
        ))
    }

    /// Create an App around an existing client
    pub fn with_client(
        api: Arc<dyn ApiClientTrait>,
        storage: ClientStorage,
        api_url: String,
        initial_view: View,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            state: AppState::default(),
            api,
            api_url,
            storage,
            quit: false,
            status_message: None,
            events_tx,
            events_rx,
        };
        app.refresh_login_state();
        app.state.current_view = initial_view;
        app.state.mount_form();
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// A request for the mounted form is in flight
    pub fn is_submitting(&self) -> bool {
        self.state.form.as_ref().is_some_and(|f| f.submitting)
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    fn refresh_login_state(&mut self) {
        self.state.logged_in = Credentials::from_storage(&self.storage)
            .access_token()
            .is_some();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        // Clear any status messages on key press
        self.status_message = None;

        if self.state.current_view.is_form_view() {
            self.handle_form_key(key);
        } else {
            self.handle_home_key(key);
        }
    }

    /// Navigate to a new view, mounting a fresh form
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
        self.state.mount_form();
    }

    /// Go back to the previous non-form view
    pub fn go_back(&mut self) {
        let mut target = View::Home;
        while let Some(view) = self.state.view_history.pop() {
            if !view.is_form_view() {
                target = view;
                break;
            }
        }
        self.state.current_view = target;
        self.state.mount_form();
    }

    /// Handle keys on the home screen
    fn handle_home_key(&mut self, key: KeyEvent) {
        let routes = View::ROUTES;
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(routes.len()),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(view) = routes.get(index) {
                    self.state.selected_index = index;
                    self.navigate(*view);
                }
            }
            KeyCode::Enter => {
                if let Some(view) = routes.get(self.state.selected_index) {
                    self.navigate(*view);
                }
            }
            KeyCode::Char('o') => self.logout(),
            _ => {}
        }
    }

    /// Handle keys in a form view
    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.form.as_ref() else {
            return;
        };
        let on_action_panel = form.is_buttons_row_active();
        let selected_button = form.selected_button;
        // Values are frozen while a request for them is in flight
        let editable = !on_action_panel && !form.submitting;
        let active_multiline = form
            .fields
            .get(form.active_field_index)
            .is_some_and(|f| f.is_multiline());
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Tab => self.state.next_form_field(),
            KeyCode::BackTab => self.state.prev_form_field(),
            // Up/Down for action panel navigation
            KeyCode::Up | KeyCode::Char('k') if on_action_panel => {
                if let Some(form) = self.state.form.as_mut() {
                    form.prev_button();
                }
            }
            KeyCode::Down | KeyCode::Char('j') if on_action_panel => {
                if let Some(form) = self.state.form.as_mut() {
                    form.next_button();
                }
            }
            // Button order: 0=Submit, 1=Cancel
            KeyCode::Enter if on_action_panel => match selected_button {
                0 => self.submit_current_form(),
                _ => self.go_back(),
            },
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if ctrl => self.submit_current_form(),
            KeyCode::Char('w') if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit_current_form()
            }
            KeyCode::Esc => self.go_back(),
            // Form field input (only when not on action panel)
            KeyCode::Char(c) if editable && !ctrl => self.state.form_input_char(c),
            KeyCode::Backspace if editable => self.state.form_backspace(),
            // Enter adds a newline in multi-line fields and submits from single-line ones
            KeyCode::Enter if active_multiline && editable => self.state.form_input_char('\n'),
            KeyCode::Enter if !active_multiline => self.submit_current_form(),
            _ => {}
        }
    }

    /// Validate the mounted form and send it in the background
    fn submit_current_form(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };

        let submission = match prepare(form) {
            Ok(submission) => submission,
            Err(PrepareError::Field(err)) => {
                // Same effect as a blocked native form: no request
                self.status_message = Some(err.to_string());
                return;
            }
            Err(err) => {
                self.push_error(format!("Could not prepare request: {err}"));
                return;
            }
        };

        if !form.begin_submit() {
            tracing::debug!(form_id = form.id, "Submission already in flight, ignoring");
            self.status_message = Some("Already submitting…".to_string());
            return;
        }
        let form_id = form.id;
        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();

        match submission {
            Submission::Entity(request) => {
                let credentials = Credentials::from_storage(&self.storage);
                tokio::spawn(async move {
                    let outcome = submit(api.as_ref(), &request, &credentials).await;
                    let _ = events.send(SubmissionEvent {
                        form_id,
                        result: SubmissionResult::Entity { request, outcome },
                    });
                });
            }
            Submission::Login(request) => {
                tokio::spawn(async move {
                    let outcome = login(api.as_ref(), &request).await;
                    let _ = events.send(SubmissionEvent {
                        form_id,
                        result: SubmissionResult::Login(outcome),
                    });
                });
            }
        }
    }

    /// Apply the results of finished submissions
    pub fn poll_submissions(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_submission(event);
        }
    }

    fn apply_submission(&mut self, event: SubmissionEvent) {
        let message = match &event.result {
            SubmissionResult::Entity { request, outcome } => outcome.message(request),
            SubmissionResult::Login(outcome) => {
                if let LoginOutcome::LoggedIn(tokens) = outcome {
                    if let Err(e) = store_tokens(&self.storage, tokens) {
                        tracing::error!("Could not store tokens: {e}");
                        self.push_error(format!("Could not save access token: {e}"));
                    }
                    self.refresh_login_state();
                }
                outcome.message()
            }
        };

        match self.state.form.as_mut() {
            Some(form) if form.id == event.form_id => {
                let succeeded = message.kind == MessageKind::Success;
                form.finish_submit(message);
                if succeeded {
                    form.reset_values();
                }
            }
            _ => {
                tracing::debug!(
                    form_id = event.form_id,
                    "Form closed before its response arrived: {}",
                    message.text
                );
            }
        }
    }

    /// Remove stored tokens
    fn logout(&mut self) {
        match clear_tokens(&self.storage) {
            Ok(()) => {
                tracing::info!("Logged out");
                self.status_message = Some("Logged out.".to_string());
            }
            Err(e) => self.push_error(format!("Could not clear access token: {e}")),
        }
        self.refresh_login_state();
    }

    /// Wait for the next finished submission and apply it
    #[cfg(test)]
    async fn next_submission(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply_submission(event);
        }
    }
}
