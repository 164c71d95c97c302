//! # Search Client
//!
//! Unified client factory for Elasticsearch and OpenSearch.
//!
//! `create_search_client` resolves connection settings from the environment
//! and returns a [`SearchClient`] bundling the engine's structured client with
//! a generic REST client for endpoints the structured client does not cover.

pub mod client;
pub mod config;

pub use client::{
    create_search_client, create_search_client_with_options, resolve_base_url, ClientOptions,
    InsecureTlsWarnings, SearchClient,
};
pub use search_client_repository::{
    EngineClient, GeneralRestClient, RestResponse, SearchEngineClient, SearchError,
};
pub use search_client_shared::{ConnectionConfig, EngineKind, SearchClientConfig};

use thiserror::Error;

/// Errors that can occur while creating or using a search client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The requested engine kind is not supported.
    #[error("Unsupported engine type: {0}")]
    UnsupportedEngine(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The generic REST client was not initialized.
    #[error("Generic REST client is not available: no base URL could be derived")]
    RestUnavailable,

    /// Search engine error.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}

impl ClientError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
