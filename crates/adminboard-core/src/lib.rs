//! Core library for adminboard.
//!
//! This crate holds everything that is not terminal rendering:
//!
//! - `auth`: the persisted access/refresh token pair and the `Session` that owns it
//! - `api`: the `ApiClient` (login, refresh, logout, authenticated requests)
//! - `routes`: the screen table and the login guard
//! - `config`: application configuration and directory discovery
//! - `models`: the sample data behind the dashboard views
//! - `utils`: small formatting helpers

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;
pub mod utils;

pub use api::{ApiClient, ApiError, AuthenticatedRequest};
pub use auth::{FileTokenStore, MemoryTokenStore, Session, TokenKind, TokenPair, TokenStore};
pub use config::Config;
pub use routes::{AuthState, Navigation, Route};
