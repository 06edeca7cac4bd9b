use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;

use super::ApiError;

/// One logical outbound request.
///
/// Carries its own headers and a `retried` flag. The flag flips from false to
/// true at most once, which is what limits the refresh-and-retry path to a
/// single re-dispatch.
#[derive(Debug, Clone)]
pub struct AuthenticatedRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl AuthenticatedRequest {
    /// `path` is relative to the client's base URL, e.g. `/api/users/`
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Self::new(Method::POST, path).with_json(body)
    }

    /// Attach a JSON body
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to encode body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn with_header(mut self, name: HeaderName, value: &str) -> Result<Self, ApiError> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid {} header: {}", name, e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Set `Authorization: Bearer <token>`, replacing any previous credential
    pub fn set_bearer(&mut self, token: &str) -> Result<(), ApiError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid bearer token: {}", e)))?;
        value.set_sensitive(true);
        self.headers.insert(header::AUTHORIZATION, value);
        Ok(())
    }

    /// The bearer token currently attached, if any
    pub fn bearer(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// Mark the request as retried. Returns false if it already was.
    pub fn mark_retried(&mut self) -> bool {
        if self.retried {
            return false;
        }
        self.retried = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_flag_flips_once() {
        let mut request = AuthenticatedRequest::get("/api/users/");
        assert!(!request.is_retried());
        assert!(request.mark_retried());
        assert!(request.is_retried());
        assert!(!request.mark_retried());
        assert!(request.is_retried());
    }

    #[test]
    fn test_clone_keeps_retry_flag() {
        let mut request = AuthenticatedRequest::get("/x");
        request.mark_retried();
        assert!(request.clone().is_retried());
    }

    #[test]
    fn test_set_bearer_replaces_previous() {
        let mut request = AuthenticatedRequest::get("/x");
        assert_eq!(request.bearer(), None);

        request.set_bearer("A").unwrap();
        assert_eq!(request.bearer(), Some("A"));

        request.set_bearer("A2").unwrap();
        assert_eq!(request.bearer(), Some("A2"));
        assert_eq!(request.headers().get_all(header::AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn test_set_bearer_rejects_control_chars() {
        let mut request = AuthenticatedRequest::get("/x");
        assert!(matches!(
            request.set_bearer("bad\ntoken"),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_post_encodes_json_body() {
        let request =
            AuthenticatedRequest::post("/api/reports/", &serde_json::json!({ "range": "q3" }))
                .unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.body().unwrap()["range"], "q3");
    }

    #[test]
    fn test_with_header() {
        let request = AuthenticatedRequest::get("/x")
            .with_header(header::ACCEPT, "application/json")
            .unwrap();
        assert_eq!(request.headers().get(header::ACCEPT).unwrap(), "application/json");
    }
}
