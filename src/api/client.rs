//! HTTP client for the GIN API
//!
//! Thin wrapper over a shared `reqwest::Client`: one POST per call, JSON
//! body, optional bearer header. Once a status arrives the call succeeds,
//! even if the body cannot be read.

use super::error::ApiError;
use super::traits::{ApiClientTrait, ApiRequest, ApiResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::time::Duration;

/// Client for the GIN REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gin-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path against the base URL
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::InvalidUrl {
            url: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn post_json(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(&request.path)?;

        let mut builder = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&request.body);

        if let Some(authorization) = &request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        tracing::debug!(%url, "POST");
        let response = builder.send().await?;
        let status = response.status().as_u16();
        // The status decides the outcome; an unreadable body is left empty
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%url, status, "Could not read response body: {e}");
                String::new()
            }
        };
        tracing::debug!(%url, status, bytes = body.len(), "response received");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, capture the raw request, answer with `status`
    async fn serve_once(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let body = "{\"detail\": \"ignored\"}";
        serve_raw(format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ))
        .await
    }

    /// Accept one connection, capture the raw request, write `response` verbatim and close
    async fn serve_raw(response: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8(raw).unwrap()
        });

        (format!("http://{addr}"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let err = ApiClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));

        let err = ApiClient::new("mailto:admin@gin.sn", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = ApiClient::new("http://127.0.0.1:8000", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint("/api/formations/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/formations/"
        );
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8000/");
    }

    #[tokio::test]
    async fn test_post_sends_headers_and_json_body() {
        let (base, server) = serve_once("201 Created").await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();

        let response = client
            .post_json(ApiRequest {
                path: "/api/services/".to_string(),
                body: json!({"nom": "Audit", "description": "Audit SI"}),
                authorization: Some("Bearer tok123".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert!(response.is_success());

        let raw = server.await.unwrap();
        let lower = raw.to_ascii_lowercase();
        assert!(raw.starts_with("POST /api/services/ HTTP/1.1\r\n"));
        assert!(lower.contains("content-type: application/json\r\n"));
        assert!(lower.contains("authorization: bearer tok123\r\n"));

        let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent, json!({"nom": "Audit", "description": "Audit SI"}));
    }

    #[tokio::test]
    async fn test_post_without_authorization() {
        let (base, server) = serve_once("400 Bad Request").await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();

        let response = client
            .post_json(ApiRequest {
                path: "/api/token/".to_string(),
                body: json!({"email": "a@b.c", "password": "x"}),
                authorization: None,
            })
            .await
            .unwrap();

        assert_eq!(response.status, 400);
        assert!(!response.is_success());
        assert!(response.body.contains("ignored"));

        let raw = server.await.unwrap().to_ascii_lowercase();
        assert!(!raw.contains("authorization:"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let err = client
            .post_json(ApiRequest {
                path: "/api/stages/".to_string(),
                body: json!({}),
                authorization: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
    }

    fn truncated(status_line: &str) -> String {
        format!("HTTP/1.1 {status_line}\r\nContent-Length: 1000\r\nConnection: close\r\n\r\nshort")
    }

    #[tokio::test]
    async fn test_truncated_body_keeps_status() {
        for (status_line, status) in [("201 Created", 201), ("500 Internal Server Error", 500)] {
            let (base, server) = serve_raw(truncated(status_line)).await;
            let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();

            let response = client
                .post_json(ApiRequest {
                    path: "/api/services/".to_string(),
                    body: json!({"nom": "Audit", "description": "Audit SI"}),
                    authorization: Some("Bearer tok".to_string()),
                })
                .await
                .unwrap();

            assert_eq!(response.status, status);
            assert_eq!(response.body, "");
            server.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_truncated_body_lands_in_status_bucket() {
        use crate::api::credentials::Credentials;
        use crate::api::submit::{submit, SubmitOutcome, SubmitRequest};
        use crate::state::Service;

        let request = SubmitRequest::for_entity(&Service {
            name: "Audit".to_string(),
            description: "Audit SI".to_string(),
        })
        .unwrap();

        let (base, server) = serve_raw(truncated("201 Created")).await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();
        let outcome = submit(&client, &request, &Credentials::default()).await;
        assert_eq!(outcome, SubmitOutcome::Created { status: 201 });
        assert_eq!(outcome.message(&request).text, "Service added successfully!");
        server.await.unwrap();

        let (base, server) = serve_raw(truncated("500 Internal Server Error")).await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();
        let outcome = submit(&client, &request, &Credentials::default()).await;
        assert!(matches!(outcome, SubmitOutcome::Rejected { status: 500, .. }));
        assert_eq!(outcome.message(&request).text, "Failed to add service.");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_truncated_login_body_is_unexpected() {
        use crate::api::auth::{login, LoginOutcome};
        use crate::state::LoginRequest;

        let (base, server) = serve_raw(truncated("200 OK")).await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();
        let outcome = login(
            &client,
            &LoginRequest {
                email: "admin@gin.sn".to_string(),
                password: "pw".to_string(),
            },
        )
        .await;
        assert!(matches!(
            outcome,
            LoginOutcome::Failed(ApiError::UnexpectedBody(_))
        ));
        server.await.unwrap();
    }
}
