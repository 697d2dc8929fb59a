//! Token login and logout

use super::error::ApiError;
use super::submit::GENERIC_ERROR_MESSAGE;
use super::traits::{ApiClientTrait, ApiRequest};
use crate::state::{FormMessage, LoginRequest, MessageKind, TokenPair};
use crate::storage::{ClientStorage, StorageError, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// Token endpoint (simplejwt pair view)
pub const TOKEN_PATH: &str = "/api/token/";

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
pub const LOGIN_FAILURE_MESSAGE: &str = "Invalid email or password.";

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn(TokenPair),
    Rejected { status: u16 },
    Failed(ApiError),
}

impl LoginOutcome {
    pub fn message(&self) -> FormMessage {
        match self {
            Self::LoggedIn(_) => FormMessage::new(MessageKind::Success, LOGIN_SUCCESS_MESSAGE),
            Self::Rejected { .. } => FormMessage::new(MessageKind::Failure, LOGIN_FAILURE_MESSAGE),
            Self::Failed(_) => FormMessage::new(MessageKind::Error, GENERIC_ERROR_MESSAGE),
        }
    }
}

/// Exchange credentials for a token pair. No `Authorization` header is sent.
pub async fn login(client: &dyn ApiClientTrait, request: &LoginRequest) -> LoginOutcome {
    let body = match serde_json::to_value(request) {
        Ok(body) => body,
        Err(e) => return LoginOutcome::Failed(ApiError::UnexpectedBody(e.to_string())),
    };

    tracing::info!(email = %request.email, "Logging in");
    let response = match client
        .post_json(ApiRequest {
            path: TOKEN_PATH.to_string(),
            body,
            authorization: None,
        })
        .await
    {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!("Login request failed: {err}");
            return LoginOutcome::Failed(err);
        }
    };

    if !response.is_success() {
        tracing::warn!(status = response.status, "Login rejected");
        return LoginOutcome::Rejected {
            status: response.status,
        };
    }

    match serde_json::from_str::<TokenPair>(&response.body) {
        Ok(tokens) => {
            tracing::info!("Login succeeded");
            LoginOutcome::LoggedIn(tokens)
        }
        Err(e) => {
            tracing::warn!("Login response without tokens: {e}");
            LoginOutcome::Failed(ApiError::UnexpectedBody(e.to_string()))
        }
    }
}

/// Persist a token pair for later submissions
pub fn store_tokens(storage: &ClientStorage, tokens: &TokenPair) -> Result<(), StorageError> {
    storage.set(ACCESS_TOKEN_KEY, &tokens.access)?;
    match &tokens.refresh {
        Some(refresh) => storage.set(REFRESH_TOKEN_KEY, refresh),
        None => storage.remove(REFRESH_TOKEN_KEY),
    }
}

/// Forget the stored tokens
pub fn clear_tokens(storage: &ClientStorage) -> Result<(), StorageError> {
    storage.remove(ACCESS_TOKEN_KEY)?;
    storage.remove(REFRESH_TOKEN_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::traits::{ApiResponse, MockApiClientTrait};
    use serde_json::json;

    fn request() -> LoginRequest {
        LoginRequest {
            email: "admin@gin.sn".to_string(),
            password: "pw".to_string(),
        }
    }

    fn answering(status: u16, body: &'static str) -> MockApiClientTrait {
        let mut mock = MockApiClientTrait::new();
        mock.expect_post_json()
            .withf(|req| {
                req.path == TOKEN_PATH
                    && req.authorization.is_none()
                    && req.body == json!({"email": "admin@gin.sn", "password": "pw"})
            })
            .times(1)
            .returning(move |_| {
                Ok(ApiResponse {
                    status,
                    body: body.to_string(),
                })
            });
        mock
    }

    #[tokio::test]
    async fn test_login_success_parses_tokens() {
        let mock = answering(200, r#"{"access": "acc", "refresh": "ref"}"#);
        let outcome = login(&mock, &request()).await;
        assert_eq!(
            outcome,
            LoginOutcome::LoggedIn(TokenPair {
                access: "acc".to_string(),
                refresh: Some("ref".to_string()),
            })
        );
        assert_eq!(outcome.message().text, "Login successful!");
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let mock = answering(401, r#"{"detail": "No active account"}"#);
        let outcome = login(&mock, &request()).await;
        assert_eq!(outcome, LoginOutcome::Rejected { status: 401 });
        assert_eq!(outcome.message().kind, MessageKind::Failure);
    }

    #[tokio::test]
    async fn test_login_success_without_token_is_error() {
        let mock = answering(200, "<html></html>");
        let outcome = login(&mock, &request()).await;
        assert!(matches!(
            outcome,
            LoginOutcome::Failed(ApiError::UnexpectedBody(_))
        ));
        assert_eq!(outcome.message().text, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_store_and_clear_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ClientStorage::at(dir.path().join("storage.json"));

        store_tokens(
            &storage,
            &TokenPair {
                access: "acc".to_string(),
                refresh: Some("ref".to_string()),
            },
        )
        .unwrap();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("acc"));
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("ref"));

        store_tokens(
            &storage,
            &TokenPair {
                access: "acc2".to_string(),
                refresh: None,
            },
        )
        .unwrap();
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).unwrap(), None);

        clear_tokens(&storage).unwrap();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
    }
}
