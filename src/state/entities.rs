//! Records submitted to the GIN API
//!
//! Each record knows its collection endpoint and maps its fields onto the
//! payload keys the backend expects through serde renames.

use super::forms::{EntityForm, FieldError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A record that can be created through the authenticated submit cycle
pub trait Entity: Serialize {
    /// Collection endpoint the record is POSTed to
    const PATH: &'static str;
    /// Name used in the result messages
    const NAME: &'static str;

    /// Build the record from a validated form
    fn from_form(form: &EntityForm) -> Result<Self, FieldError>
    where
        Self: Sized;

    fn success_message() -> String {
        format!("{} added successfully!", Self::NAME)
    }

    fn failure_message() -> String {
        format!("Failed to add {}.", Self::NAME.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formation {
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "date_debut")]
    pub start_date: NaiveDate,
    #[serde(rename = "date_fin")]
    pub end_date: NaiveDate,
    #[serde(rename = "lieu")]
    pub location: String,
}

impl Entity for Formation {
    const PATH: &'static str = "/api/formations/";
    const NAME: &'static str = "Formation";

    fn from_form(form: &EntityForm) -> Result<Self, FieldError> {
        Ok(Self {
            title: form.text("title")?.to_string(),
            description: form.text("description")?.to_string(),
            start_date: form.date("start_date")?,
            end_date: form.date("end_date")?,
            location: form.text("location")?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "entreprise")]
    pub company: String,
}

impl Entity for Stage {
    const PATH: &'static str = "/api/stages/";
    const NAME: &'static str = "Stage";

    fn from_form(form: &EntityForm) -> Result<Self, FieldError> {
        Ok(Self {
            title: form.text("title")?.to_string(),
            description: form.text("description")?.to_string(),
            company: form.text("company")?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Realisation {
    #[serde(rename = "projet")]
    pub project: String,
    #[serde(rename = "entreprise")]
    pub company: String,
    #[serde(rename = "avis")]
    pub review: String,
    #[serde(rename = "type_personne")]
    pub person_type: String,
}

impl Entity for Realisation {
    const PATH: &'static str = "/api/realisations/";
    const NAME: &'static str = "Realisation";

    fn from_form(form: &EntityForm) -> Result<Self, FieldError> {
        Ok(Self {
            project: form.text("project")?.to_string(),
            company: form.text("company")?.to_string(),
            review: form.text("review")?.to_string(),
            person_type: form.text("person_type")?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partenaire {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "site_web")]
    pub website: String,
}

impl Entity for Partenaire {
    const PATH: &'static str = "/api/partenaires/";
    const NAME: &'static str = "Partenaire";

    fn from_form(form: &EntityForm) -> Result<Self, FieldError> {
        Ok(Self {
            name: form.text("name")?.to_string(),
            website: form.text("website")?.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    #[serde(rename = "nom")]
    pub name: String,
    pub description: String,
}

impl Entity for Service {
    const PATH: &'static str = "/api/services/";
    const NAME: &'static str = "Service";

    fn from_form(form: &EntityForm) -> Result<Self, FieldError> {
        Ok(Self {
            name: form.text("name")?.to_string(),
            description: form.text("description")?.to_string(),
        })
    }
}

/// Account creation; the backend only accepts it from an admin token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSignup {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

impl Entity for AdminSignup {
    const PATH: &'static str = "/api/accounts/users/";
    const NAME: &'static str = "Account";

    fn from_form(form: &EntityForm) -> Result<Self, FieldError> {
        Ok(Self {
            email: form.text("email")?.trim().to_string(),
            first_name: form.text("first_name")?.to_string(),
            last_name: form.text("last_name")?.to_string(),
            password: form.text("password")?.to_string(),
            password_confirm: form.text("password_confirm")?.to_string(),
        })
    }

    fn success_message() -> String {
        "Account created successfully!".to_string()
    }

    fn failure_message() -> String {
        "Failed to create account.".to_string()
    }
}

/// Body of the token endpoint; the backend authenticates by email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_form(form: &EntityForm) -> Result<Self, FieldError> {
        Ok(Self {
            email: form.text("email")?.trim().to_string(),
            password: form.text("password")?.to_string(),
        })
    }
}

/// Token pair returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}
