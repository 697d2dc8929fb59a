//! API client module for the GIN REST endpoints

mod auth;
mod client;
mod credentials;
mod error;
mod submit;
mod traits;

pub use auth::{clear_tokens, login, store_tokens, LoginOutcome};
pub use client::ApiClient;
pub use credentials::Credentials;
pub use submit::{prepare, submit, PrepareError, Submission, SubmitOutcome, SubmitRequest};
pub use traits::ApiClientTrait;

#[cfg(test)]
pub use error::ApiError;
#[cfg(test)]
pub use traits::{ApiResponse, MockApiClientTrait};
