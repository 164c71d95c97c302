//! Generic REST client.
//!
//! Fallback HTTP client for engine endpoints that the structured clients do not
//! cover. Every request builds its own HTTP client, so no connection outlives
//! the call that opened it.

use reqwest::{header::CONTENT_TYPE, Method};
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::SearchError;

/// Body returned by a successful REST call.
#[derive(Debug, Clone, PartialEq)]
pub enum RestResponse {
    /// The response declared `application/json` and was parsed.
    Json(Value),
    /// Any other content type, returned as raw text.
    Text(String),
}

impl RestResponse {
    /// The parsed JSON body, if the response was JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// The raw text body, if the response was not JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Convert into a JSON value; text bodies become JSON strings.
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }
}

/// HTTP client for ad hoc requests against a search engine's REST API.
///
/// # Example
///
/// ```ignore
/// let rest = GeneralRestClient::new("https://localhost:9200/", None, None, false);
/// let stats = rest.get("/_nodes/stats", None).await?;
/// ```
#[derive(Clone)]
pub struct GeneralRestClient {
    base_url: String,
    auth: Option<(String, String)>,
    verify_certs: bool,
}

impl GeneralRestClient {
    /// Create a client for `base_url`.
    ///
    /// Trailing slashes are trimmed from the base URL. Basic auth is only used
    /// when both `username` and `password` are non-empty.
    pub fn new(
        base_url: &str,
        username: Option<&str>,
        password: Option<&str>,
        verify_certs: bool,
    ) -> Self {
        let auth = match (username, password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.to_string(), pass.to_string()))
            }
            _ => None,
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            verify_certs,
        }
    }

    /// The base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry basic auth credentials.
    pub fn has_auth(&self) -> bool {
        self.auth.is_some()
    }

    /// Whether TLS certificates are verified.
    pub fn verify_certs(&self) -> bool {
        self.verify_certs
    }

    /// Full URL for `path`, with exactly one slash after the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the decoded body.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method, case-insensitive (e.g. "get", "POST")
    /// * `path` - Path relative to the base URL
    /// * `params` - Optional query string parameters
    /// * `body` - Optional JSON body
    ///
    /// # Returns
    ///
    /// * `Ok(RestResponse::Json)` - If the response content type is `application/json`
    /// * `Ok(RestResponse::Text)` - For any other content type
    /// * `Err(SearchError::HttpStatus)` - If the server answered with a non-success status
    /// * `Err(SearchError)` - If the request could not be sent or the JSON body is malformed
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        params: Option<&[(String, String)]>,
        body: Option<&Value>,
    ) -> Result<RestResponse, SearchError> {
        let method = Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|_| SearchError::invalid_request(format!("Invalid HTTP method: {}", method)))?;
        let url = self.endpoint(path);

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!self.verify_certs)
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let mut request = client.request(method.clone(), &url);
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some((user, pass)) = &self.auth {
            request = request.basic_auth(user, Some(pass));
        }

        debug!(method = %method, url = %url, "Sending REST request");

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, url = %url, body = %error_body, "REST request failed");
            return Err(SearchError::http_status(status.as_u16(), error_body));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let value = response
                .json::<Value>()
                .await
                .map_err(|e| SearchError::parse(e.to_string()))?;
            Ok(RestResponse::Json(value))
        } else {
            let text = response
                .text()
                .await
                .map_err(|e| SearchError::connection(e.to_string()))?;
            Ok(RestResponse::Text(text))
        }
    }

    /// `GET path` with optional query parameters.
    pub async fn get(
        &self,
        path: &str,
        params: Option<&[(String, String)]>,
    ) -> Result<RestResponse, SearchError> {
        self.request("GET", path, params, None).await
    }

    /// `POST path` with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<RestResponse, SearchError> {
        self.request("POST", path, None, body).await
    }

    /// `PUT path` with an optional JSON body.
    pub async fn put(&self, path: &str, body: Option<&Value>) -> Result<RestResponse, SearchError> {
        self.request("PUT", path, None, body).await
    }

    /// `DELETE path`.
    pub async fn delete(&self, path: &str) -> Result<RestResponse, SearchError> {
        self.request("DELETE", path, None, None).await
    }
}

impl std::fmt::Debug for GeneralRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralRestClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.as_ref().map(|(user, _)| user))
            .field("verify_certs", &self.verify_certs)
            .finish()
    }
}
