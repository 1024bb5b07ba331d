//! Response snapshots.
//!
//! A [`Response`] is an immutable capture of one HTTP exchange: status code,
//! headers, and the body read to completion as text. Snapshots are produced
//! by the transport and consumed by redirect following and expectation
//! evaluation.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::transport::TransportError;

/// Immutable snapshot of a single HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: String,
}

impl Response {
    /// Build a snapshot with the given status and body and no headers.
    ///
    /// Intended for fabricating fixtures in tests; production snapshots come
    /// from the transport.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Add a header to a fabricated snapshot.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Drain a live response into a snapshot.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, TransportError> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response body as text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Header value by name, case-insensitive. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// Whether the status code is a redirect (300-399).
    pub fn is_redirect(&self) -> bool {
        (300..=399).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::LOCATION;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response =
            Response::new(302, "").with_header(LOCATION, HeaderValue::from_static("/next"));

        assert_eq!(response.header("Location"), Some("/next"));
        assert_eq!(response.header("LOCATION"), Some("/next"));
        assert_eq!(response.location(), Some("/next"));
    }

    #[test]
    fn test_missing_header() {
        let response = Response::new(200, "ok");
        assert_eq!(response.header("location"), None);
        assert_eq!(response.location(), None);
    }

    #[test]
    fn test_redirect_boundaries() {
        assert!(!Response::new(299, "").is_redirect());
        assert!(Response::new(300, "").is_redirect());
        assert!(Response::new(399, "").is_redirect());
        assert!(!Response::new(400, "").is_redirect());
    }

    #[test]
    fn test_accessors() {
        let response = Response::new(404, "not found");
        assert_eq!(response.status(), 404);
        assert_eq!(response.body(), "not found");
    }
}
