//! Authenticated submit cycle
//!
//! One function serves every entity: POST the JSON payload with the bearer
//! header, then sort the result into success, rejection or failure. Only
//! the status decides; the response body plays no part in the outcome.

use super::credentials::Credentials;
use super::error::{ApiError, StatusClass};
use super::traits::{ApiClientTrait, ApiRequest};
use crate::state::{
    AdminSignup, Entity, EntityForm, FieldError, FormKind, FormMessage, Formation, LoginRequest,
    MessageKind, Partenaire, Realisation, Service, Stage,
};
use serde_json::Value;
use thiserror::Error;

/// Shown when the request itself could not be completed
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";

/// An entity record ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub path: &'static str,
    pub payload: Value,
    pub success_message: String,
    pub failure_message: String,
}

impl SubmitRequest {
    pub fn for_entity<E: Entity>(entity: &E) -> Result<Self, serde_json::Error> {
        Ok(Self {
            path: E::PATH,
            payload: serde_json::to_value(entity)?,
            success_message: E::success_message(),
            failure_message: E::failure_message(),
        })
    }
}

/// What a validated form turns into
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Entity(SubmitRequest),
    Login(LoginRequest),
}

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Validate a form and build its submission
pub fn prepare(form: &mut EntityForm) -> Result<Submission, PrepareError> {
    form.validate()?;
    let form = &*form;
    let request = match form.kind {
        FormKind::Login => return Ok(Submission::Login(LoginRequest::from_form(form)?)),
        FormKind::Signup => SubmitRequest::for_entity(&AdminSignup::from_form(form)?)?,
        FormKind::Formation => SubmitRequest::for_entity(&Formation::from_form(form)?)?,
        FormKind::Stage => SubmitRequest::for_entity(&Stage::from_form(form)?)?,
        FormKind::Realisation => SubmitRequest::for_entity(&Realisation::from_form(form)?)?,
        FormKind::Partenaire => SubmitRequest::for_entity(&Partenaire::from_form(form)?)?,
        FormKind::Service => SubmitRequest::for_entity(&Service::from_form(form)?)?,
    };
    Ok(Submission::Entity(request))
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx
    Created { status: u16 },
    /// Any other status; the class is kept for diagnostics only
    Rejected { status: u16, class: StatusClass },
    /// The request could not be sent or completed
    Failed(ApiError),
}

impl SubmitOutcome {
    /// Fixed message for the outcome
    pub fn message(&self, request: &SubmitRequest) -> FormMessage {
        match self {
            Self::Created { .. } => {
                FormMessage::new(MessageKind::Success, request.success_message.clone())
            }
            Self::Rejected { .. } => {
                FormMessage::new(MessageKind::Failure, request.failure_message.clone())
            }
            Self::Failed(_) => FormMessage::new(MessageKind::Error, GENERIC_ERROR_MESSAGE),
        }
    }
}

/// Send one entity submission. Exactly one request, no retry.
pub async fn submit(
    client: &dyn ApiClientTrait,
    request: &SubmitRequest,
    credentials: &Credentials,
) -> SubmitOutcome {
    let api_request = ApiRequest {
        path: request.path.to_string(),
        body: request.payload.clone(),
        authorization: Some(credentials.authorization_header()),
    };

    tracing::info!(
        path = request.path,
        has_token = credentials.access_token().is_some(),
        "Submitting"
    );

    match client.post_json(api_request).await {
        Ok(response) if response.is_success() => {
            tracing::info!(path = request.path, status = response.status, "Created");
            SubmitOutcome::Created {
                status: response.status,
            }
        }
        Ok(response) => {
            let class = StatusClass::of(response.status);
            tracing::warn!(
                path = request.path,
                status = response.status,
                ?class,
                "Submission rejected"
            );
            SubmitOutcome::Rejected {
                status: response.status,
                class,
            }
        }
        Err(err) => {
            tracing::warn!(path = request.path, "Submission failed: {err}");
            SubmitOutcome::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::traits::{ApiResponse, MockApiClientTrait};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn service_request() -> SubmitRequest {
        SubmitRequest::for_entity(&Service {
            name: "Audit".to_string(),
            description: "Audit SI".to_string(),
        })
        .unwrap()
    }

    fn responding(status: u16) -> MockApiClientTrait {
        let mut mock = MockApiClientTrait::new();
        mock.expect_post_json().times(1).returning(move |_| {
            Ok(ApiResponse {
                status,
                body: String::new(),
            })
        });
        mock
    }

    #[test]
    fn test_for_entity_carries_path_and_messages() {
        let request = service_request();
        assert_eq!(request.path, "/api/services/");
        assert_eq!(request.payload, json!({"nom": "Audit", "description": "Audit SI"}));
        assert_eq!(request.success_message, "Service added successfully!");
        assert_eq!(request.failure_message, "Failed to add service.");
    }

    #[test]
    fn test_prepare_blocks_on_missing_field() {
        let mut form = EntityForm::new(FormKind::Stage);
        form.set_text("title", "Stage").unwrap();
        let err = prepare(&mut form).unwrap_err();
        assert!(matches!(err, PrepareError::Field(FieldError::Missing { .. })));
        assert_eq!(form.active_field_index, 1);
    }

    #[test]
    fn test_prepare_formation_maps_keys() {
        let mut form = EntityForm::new(FormKind::Formation);
        form.set_text("title", "Rust").unwrap();
        form.set_text("description", "Bases").unwrap();
        form.set_text("start_date", "2024-05-02").unwrap();
        form.set_text("end_date", "2024-05-03").unwrap();
        form.set_text("location", "Thiès").unwrap();

        let Submission::Entity(request) = prepare(&mut form).unwrap() else {
            panic!("expected an entity submission");
        };
        assert_eq!(request.path, "/api/formations/");
        assert_eq!(
            request.payload,
            json!({
                "titre": "Rust",
                "description": "Bases",
                "date_debut": "2024-05-02",
                "date_fin": "2024-05-03",
                "lieu": "Thiès",
            })
        );
    }

    #[test]
    fn test_prepare_login() {
        let mut form = EntityForm::new(FormKind::Login);
        form.set_text("email", " admin@gin.sn ").unwrap();
        form.set_text("password", "pw").unwrap();
        assert_eq!(
            prepare(&mut form).unwrap(),
            Submission::Login(LoginRequest {
                email: "admin@gin.sn".to_string(),
                password: "pw".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_submit_sends_payload_with_bearer_header() {
        let mut mock = MockApiClientTrait::new();
        mock.expect_post_json()
            .withf(|req| {
                req.path == "/api/services/"
                    && req.body == json!({"nom": "Audit", "description": "Audit SI"})
                    && req.authorization.as_deref() == Some("Bearer abc")
            })
            .times(1)
            .returning(|_| {
                Ok(ApiResponse {
                    status: 201,
                    body: "{}".to_string(),
                })
            });

        let request = service_request();
        let outcome = submit(&mock, &request, &Credentials::new(Some("abc".to_string()))).await;
        assert_eq!(outcome, SubmitOutcome::Created { status: 201 });
        assert_eq!(
            outcome.message(&request),
            FormMessage::new(MessageKind::Success, "Service added successfully!")
        );
    }

    #[tokio::test]
    async fn test_submit_without_token_sends_bearer_null() {
        let mut mock = MockApiClientTrait::new();
        mock.expect_post_json()
            .withf(|req| req.authorization.as_deref() == Some("Bearer null"))
            .times(1)
            .returning(|_| {
                Ok(ApiResponse {
                    status: 401,
                    body: String::new(),
                })
            });

        let outcome = submit(&mock, &service_request(), &Credentials::default()).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                status: 401,
                class: StatusClass::ClientError
            }
        );
    }

    #[test]
    fn test_client_and_server_errors_share_failure_message() {
        let request = service_request();
        for status in [400, 403, 500, 503] {
            let mock = responding(status);
            let outcome =
                tokio_test::block_on(submit(&mock, &request, &Credentials::default()));
            assert_eq!(
                outcome.message(&request),
                FormMessage::new(MessageKind::Failure, "Failed to add service.")
            );
        }
    }

    #[test]
    fn test_rejected_records_status_class() {
        let request = service_request();
        let outcome = tokio_test::block_on(submit(
            &responding(502),
            &request,
            &Credentials::default(),
        ));
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                status: 502,
                class: StatusClass::ServerError
            }
        );
    }

    #[tokio::test]
    async fn test_transport_failure_gives_generic_error() {
        let mut mock = MockApiClientTrait::new();
        mock.expect_post_json()
            .times(1)
            .returning(|_| Err(ApiError::Request("connection refused".to_string())));

        let request = service_request();
        let outcome = submit(&mock, &request, &Credentials::default()).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(
            outcome.message(&request),
            FormMessage::new(
                MessageKind::Error,
                "An error occurred. Please try again later."
            )
        );
    }

    #[tokio::test]
    async fn test_timeout_is_generic_error() {
        let mut mock = MockApiClientTrait::new();
        mock.expect_post_json()
            .times(1)
            .returning(|_| Err(ApiError::Timeout));

        let outcome = submit(&mock, &service_request(), &Credentials::default()).await;
        assert_eq!(outcome, SubmitOutcome::Failed(ApiError::Timeout));
    }
}
