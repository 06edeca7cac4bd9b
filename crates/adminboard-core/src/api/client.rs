//! API client for the dashboard backend.
//!
//! The client owns the `Session` and is the only code that writes tokens:
//! `login` stores a new pair, `refresh_token` replaces the access token,
//! `logout` clears both. `execute` is the authenticated request path.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::auth::{Session, TokenKind};
use crate::config::Config;

use super::{ApiError, AuthenticatedRequest};

// ============================================================================
// Constants
// ============================================================================

/// Token obtain endpoint: `{username, password}` -> `{access, refresh}`
const LOGIN_PATH: &str = "/api/token/";

/// Token refresh endpoint: `{refresh}` -> `{access}`
const REFRESH_PATH: &str = "/api/token/refresh/";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    refresh: Option<String>,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    #[serde(default)]
    access: Option<String>,
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

/// API client for the dashboard backend.
/// Clone is cheap - reqwest::Client and Session are both shared handles.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a client with no request timeout
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        Self::build(base_url, session, None)
    }

    /// Create a client that gives up on requests after `timeout`
    pub fn with_timeout(base_url: &str, session: Session, timeout: Duration) -> Result<Self> {
        Self::build(base_url, session, Some(timeout))
    }

    /// Create a client from the resolved configuration
    pub fn from_config(config: &Config, session: Session) -> Result<Self> {
        Self::build(&config.api_base_url(), session, config.request_timeout())
    }

    fn build(base_url: &str, session: Session, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Exchange credentials for a token pair.
    ///
    /// Returns true and stores both tokens only if the server answered with a
    /// non-empty `access` and `refresh`. Every failure is logged and reported
    /// as false, with the store left untouched.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        match self.request_token_pair(username, password).await {
            Ok(Some((access, refresh))) => {
                self.session.store_pair(&access, &refresh);
                info!(username = username, "Login successful");
                true
            }
            Ok(None) => {
                warn!("Login response did not contain both tokens");
                false
            }
            Err(e) => {
                error!(error = %e, "Login error");
                false
            }
        }
    }

    async fn request_token_pair(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<(String, String)>, ApiError> {
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let response = Self::check_response(response).await?;

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse login response: {}", e)))?;

        Ok(non_empty(body.access).zip(non_empty(body.refresh)))
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Returns false without touching the network when no refresh token is
    /// stored. The refresh token itself is never replaced.
    pub async fn refresh_token(&self) -> bool {
        let Some(refresh) = self.session.refresh_token() else {
            debug!("No refresh token stored, skipping refresh");
            return false;
        };

        match self.request_access_token(&refresh).await {
            Ok(Some(access)) => {
                self.session.set_token(TokenKind::Access, &access);
                debug!("Access token refreshed");
                true
            }
            Ok(None) => {
                warn!("Refresh response did not contain an access token");
                false
            }
            Err(e) => {
                error!(error = %e, "Token refresh error");
                false
            }
        }
    }

    async fn request_access_token(&self, refresh: &str) -> Result<Option<String>, ApiError> {
        let response = self
            .client
            .post(self.url(REFRESH_PATH))
            .json(&RefreshRequest { refresh })
            .send()
            .await?;

        let response = Self::check_response(response).await?;

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse refresh response: {}", e)))?;

        Ok(non_empty(body.access))
    }

    /// Forget both tokens. Safe to call when already logged out.
    pub fn logout(&self) {
        self.session.clear();
        info!("Logged out");
    }

    /// Whether an access token is stored. Presence only, not validity.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // =========================================================================
    // Authenticated requests
    // =========================================================================

    /// Send a request with the stored access token attached.
    ///
    /// A 401 on a request that has not been retried yet triggers one
    /// `refresh_token()`. If that succeeds the request is sent once more with
    /// the new token and its outcome returned as-is; otherwise the first
    /// `ApiError::Unauthorized` is returned. Other non-2xx statuses map
    /// through `ApiError::from_status`.
    ///
    /// Concurrent 401s are not coalesced: each triggers its own refresh.
    pub async fn execute(&self, mut request: AuthenticatedRequest) -> Result<Response, ApiError> {
        self.attach_credential(&mut request)?;
        let response = self.dispatch(&request).await?;

        if response.status() == StatusCode::UNAUTHORIZED && request.mark_retried() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let rejection = ApiError::from_status(status, &body);

            debug!(path = request.path(), "Unauthorized, attempting token refresh");
            if !self.refresh_token().await {
                warn!(path = request.path(), "Token refresh failed, surfacing rejection");
                return Err(rejection);
            }

            self.attach_credential(&mut request)?;
            let retry = self.dispatch(&request).await?;
            return Self::check_response(retry).await;
        }

        Self::check_response(response).await
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(AuthenticatedRequest::get(path)).await?;
        Self::decode(path, response).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.execute(AuthenticatedRequest::post(path, body)?).await?;
        Self::decode(path, response).await
    }

    fn attach_credential(&self, request: &mut AuthenticatedRequest) -> Result<(), ApiError> {
        if let Some(token) = self.session.access_token() {
            request.set_bearer(&token)?;
        }
        Ok(())
    }

    async fn dispatch(&self, request: &AuthenticatedRequest) -> Result<Response, ApiError> {
        let mut builder = self
            .client
            .request(request.method().clone(), self.url(request.path()))
            .headers(request.headers().clone());

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
        response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}
