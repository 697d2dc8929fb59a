//! Bearer credential passed explicitly to every submission

use crate::storage::{ClientStorage, ACCESS_TOKEN_KEY};
use std::fmt;

/// Access token as read from client storage at submit time
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    access_token: Option<String>,
}

impl Credentials {
    pub fn new(access_token: Option<String>) -> Self {
        Self { access_token }
    }

    /// Read the current token. An unreadable store counts as no token.
    pub fn from_storage(storage: &ClientStorage) -> Self {
        match storage.get(ACCESS_TOKEN_KEY) {
            Ok(access_token) => Self::new(access_token),
            Err(e) => {
                tracing::warn!("Could not read access token: {e}");
                Self::default()
            }
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// `Authorization` header value. A missing token is sent as the literal
    /// `null`, the same value a browser reads from empty local storage.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token.as_deref().unwrap_or("null"))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
