//! REST API client module.
//!
//! This module provides the `ApiClient` for the dashboard backend: token
//! login and refresh against the `/api/token/` endpoints, plus an
//! authenticated request path that attaches the stored access token and
//! retries once after a transparent refresh when the server answers 401.

pub mod client;
pub mod error;
pub mod request;

pub use client::ApiClient;
pub use error::ApiError;
pub use request::AuthenticatedRequest;
