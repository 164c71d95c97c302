//! Search error types.
//!
//! This module defines the errors raised by the engine adapters and the
//! generic REST client.

use thiserror::Error;

/// Errors that can occur while talking to a search engine.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Failed to build a client or reach the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The engine answered with a non-success HTTP status.
    #[error("HTTP request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request could not be built (bad method, bad URL, ...).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The cloud id could not be decoded.
    #[error("Invalid cloud id: {0}")]
    InvalidCloudId(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an HTTP status error.
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an invalid cloud id error.
    pub fn invalid_cloud_id(msg: impl Into<String>) -> Self {
        Self::InvalidCloudId(msg.into())
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = SearchError::http_status(500, "boom");

        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.to_string(),
            "HTTP request failed with status 500: boom"
        );
    }

    #[test]
    fn test_status_absent_for_other_errors() {
        assert!(SearchError::connection("refused").status().is_none());
        assert!(SearchError::parse("eof").status().is_none());
    }
}
