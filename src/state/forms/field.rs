//! Form field value objects

use chrono::NaiveDate;
use reqwest::Url;
use thiserror::Error;

/// Input type of a field, mirroring the HTML input types of the web forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// `YYYY-MM-DD`
    Date,
    Url,
    Email,
    Password,
}

/// A field refused by the native input checks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{label}: please fill out this field")]
    Missing { label: String },
    #[error("{label}: enter a date as YYYY-MM-DD")]
    InvalidDate { label: String },
    #[error("{label}: enter a URL")]
    InvalidUrl { label: String },
    #[error("{label}: enter an email address")]
    InvalidEmail { label: String },
    #[error("unknown field `{0}`")]
    Unknown(String),
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    value: String,
}

impl FormField {
    /// Create a new required field
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: true,
            value: String::new(),
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::Multiline
    }

    /// Get the raw text value
    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Set the text value
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if c == '\n' && !self.is_multiline() {
            return;
        }
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Password => "•".repeat(self.value.chars().count()),
            _ => self.value.clone(),
        }
    }

    /// Placeholder shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self.kind {
            FieldKind::Date => "YYYY-MM-DD",
            FieldKind::Url => "https://",
            FieldKind::Email => "name@example.com",
            _ => "(empty)",
        }
    }

    /// Parse the value as a date
    pub fn as_date(&self) -> Result<NaiveDate, FieldError> {
        NaiveDate::parse_from_str(self.value.trim(), "%Y-%m-%d").map_err(|_| {
            FieldError::InvalidDate {
                label: self.label.clone(),
            }
        })
    }

    /// Run the checks a browser applies to the matching input before submit
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.value.is_empty() {
            if self.required {
                return Err(FieldError::Missing {
                    label: self.label.clone(),
                });
            }
            return Ok(());
        }

        match self.kind {
            FieldKind::Date => self.as_date().map(|_| ()),
            FieldKind::Url => Url::parse(self.value.trim())
                .map(|_| ())
                .map_err(|_| FieldError::InvalidUrl {
                    label: self.label.clone(),
                }),
            FieldKind::Email => {
                if is_email(self.value.trim()) {
                    Ok(())
                } else {
                    Err(FieldError::InvalidEmail {
                        label: self.label.clone(),
                    })
                }
            }
            FieldKind::Text | FieldKind::Multiline | FieldKind::Password => Ok(()),
        }
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
