//! Form state management
//!
//! Every screen of the admin client is one `EntityForm`; `FormKind` holds
//! the per-screen field definitions.

use super::field::{FieldError, FieldKind, FormField};
use chrono::NaiveDate;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
}

/// The forms reachable from the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    Signup,
    Formation,
    Stage,
    Realisation,
    Partenaire,
    Service,
}

impl FormKind {
    /// Heading shown above the form
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Admin Signup",
            Self::Formation => "Add Formation",
            Self::Stage => "Add Stage",
            Self::Realisation => "Add Realisation",
            Self::Partenaire => "Add Partenaire",
            Self::Service => "Add Service",
        }
    }

    /// Label of the submit button
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Sign Up",
            _ => self.title(),
        }
    }

    /// Field definitions in display order
    pub fn fields(&self) -> Vec<FormField> {
        use FieldKind::*;
        let defs: &[(&str, &str, FieldKind)] = match self {
            Self::Login => &[("email", "Email", Email), ("password", "Password", Password)],
            Self::Signup => &[
                ("email", "Email", Email),
                ("first_name", "First Name", Text),
                ("last_name", "Last Name", Text),
                ("password", "Password", Password),
                ("password_confirm", "Confirm Password", Password),
            ],
            Self::Formation => &[
                ("title", "Title", Text),
                ("description", "Description", Multiline),
                ("start_date", "Start Date", Date),
                ("end_date", "End Date", Date),
                ("location", "Location", Text),
            ],
            Self::Stage => &[
                ("title", "Title", Text),
                ("description", "Description", Multiline),
                ("company", "Company", Text),
            ],
            Self::Realisation => &[
                ("project", "Project", Text),
                ("company", "Company", Text),
                ("review", "Review", Multiline),
                ("person_type", "Person Type", Text),
            ],
            Self::Partenaire => &[("name", "Name", Text), ("website", "Website", Url)],
            Self::Service => &[
                ("name", "Name", Text),
                ("description", "Description", Multiline),
            ],
        };
        defs.iter()
            .map(|(name, label, kind)| FormField::new(name, label, *kind))
            .collect()
    }
}

/// Which bucket a result message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Failure,
    Error,
}

/// Message rendered under a form after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Number of buttons in the action row (0=Submit, 1=Cancel)
pub const BUTTON_COUNT: usize = 2;

/// State of the form currently on screen
#[derive(Debug, Clone)]
pub struct EntityForm {
    /// Identifies this instance so late responses for a discarded form are dropped
    pub id: u64,
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
    pub selected_button: usize,
    pub message: Option<FormMessage>,
    /// A request for this form is in flight
    pub submitting: bool,
}

impl EntityForm {
    pub fn new(kind: FormKind) -> Self {
        Self {
            id: 0,
            kind,
            fields: kind.fields(),
            active_field_index: 0,
            selected_button: 0,
            message: None,
            submitting: false,
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % BUTTON_COUNT;
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = BUTTON_COUNT - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Set a field value by name
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> Result<(), FieldError> {
        let field = self
            .field_mut(name)
            .ok_or_else(|| FieldError::Unknown(name.to_string()))?;
        field.set_text(value);
        Ok(())
    }

    /// Field value by name
    pub fn text(&self, name: &str) -> Result<&str, FieldError> {
        self.field(name)
            .map(FormField::as_text)
            .ok_or_else(|| FieldError::Unknown(name.to_string()))
    }

    /// Field value by name, parsed as a date
    pub fn date(&self, name: &str) -> Result<NaiveDate, FieldError> {
        self.field(name)
            .ok_or_else(|| FieldError::Unknown(name.to_string()))?
            .as_date()
    }

    /// Check every field; focus moves to the first invalid one
    pub fn validate(&mut self) -> Result<(), FieldError> {
        for (index, field) in self.fields.iter().enumerate() {
            if let Err(err) = field.validate() {
                self.active_field_index = index;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Mark a request as started. Returns false if one is already pending.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        self.message = None;
        true
    }

    /// Record the outcome of the pending request
    pub fn finish_submit(&mut self, message: FormMessage) {
        self.submitting = false;
        self.message = Some(message);
    }

    /// Clear all values, keeping the message
    pub fn reset_values(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active_field_index = 0;
        self.selected_button = 0;
    }
}

impl Form for EntityForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields + buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
}
