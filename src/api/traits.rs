//! Trait abstraction for the API client to enable mocking in tests

use super::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

/// A JSON POST to one API endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Absolute path on the API host, e.g. `/api/stages/`
    pub path: String,
    pub body: Value,
    /// Full `Authorization` header value, if the endpoint needs one
    pub authorization: Option<String>,
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for API client operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// Send one request; no retries
    async fn post_json(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}
