//! Search engine client trait definition.
//!
//! This module defines the engine-neutral interface implemented by the
//! Elasticsearch and OpenSearch adapters, allowing callers (and tests) to work
//! against either engine through the same surface.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use search_client_shared::EngineKind;

/// Abstract interface for structured search engine operations.
///
/// Request and response bodies are passed through as JSON; building queries is
/// left to the caller. For anything not covered here, use the native client
/// exposed by the concrete adapter.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// Non-success HTTP statuses are reported as `SearchError::HttpStatus`, except
/// where a method documents that a 404 is treated as success.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// The engine this client talks to.
    fn engine(&self) -> EngineKind;

    /// Fetch the cluster root information (name, version, tagline).
    async fn info(&self) -> Result<Value, SearchError>;

    /// Check whether the cluster is healthy.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the cluster status is green or yellow
    /// * `Ok(false)` - If the cluster status is red or missing
    /// * `Err(SearchError)` - If the health endpoint could not be queried
    async fn health_check(&self) -> Result<bool, SearchError>;

    /// Run a search request against an index.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let body = json!({ "query": { "match": { "name": "blockchain" } } });
    /// let response = client.search("entities", body).await?;
    /// println!("{}", response["hits"]["total"]["value"]);
    /// ```
    async fn search(&self, index: &str, body: Value) -> Result<Value, SearchError>;

    /// Index (create or replace) a document under the given id.
    async fn index_document(&self, index: &str, id: &str, body: Value) -> Result<(), SearchError>;

    /// Fetch a document's `_source`.
    ///
    /// Returns `Ok(None)` if the document (or the index) does not exist.
    async fn get_document(&self, index: &str, id: &str) -> Result<Option<Value>, SearchError>;

    /// Delete a document. A missing document is not an error.
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError>;

    /// Create an index with the given settings and mappings.
    async fn create_index(&self, index: &str, body: Value) -> Result<(), SearchError>;

    /// Delete an index. A missing index is not an error.
    async fn delete_index(&self, index: &str) -> Result<(), SearchError>;

    /// Check whether an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;
}

/// Interpret a cluster health response body.
pub(crate) fn is_healthy(health: &Value) -> bool {
    matches!(
        health.get("status").and_then(Value::as_str),
        Some("green") | Some("yellow")
    )
}
