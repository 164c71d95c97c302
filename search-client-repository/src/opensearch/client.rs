//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use ::opensearch::{
    auth::Credentials,
    cert::CertificateValidation,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    OpenSearch,
};
use tracing::{info, warn};

use crate::engine_impl::impl_search_engine_client;
use crate::errors::SearchError;
use crate::hosts::parse_hosts;
use search_client_shared::EngineKind;

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::hosts(
///     &["https://localhost:9200".to_string()],
///     Some(("admin", "admin")),
///     false,
/// )?;
/// let healthy = client.health_check().await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a client for a list of hosts.
    ///
    /// The OpenSearch transport connects to a single node, so only the first
    /// host is used.
    ///
    /// # Arguments
    ///
    /// * `hosts` - Cluster node URLs (e.g., "https://localhost:9200")
    /// * `auth` - Optional basic auth `(username, password)`
    /// * `verify_certs` - Whether to validate TLS certificates
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If a host is invalid or transport setup fails
    pub fn hosts(
        hosts: &[String],
        auth: Option<(&str, &str)>,
        verify_certs: bool,
    ) -> Result<Self, SearchError> {
        let mut urls = parse_hosts(hosts)?;
        if urls.len() > 1 {
            warn!(
                ignored = urls.len() - 1,
                "OpenSearch transport uses the first host only"
            );
        }

        let mut builder = TransportBuilder::new(SingleNodeConnectionPool::new(urls.remove(0)))
            .disable_proxy();
        if let Some((username, password)) = auth {
            builder = builder.auth(Credentials::Basic(
                username.to_string(),
                password.to_string(),
            ));
        }
        if !verify_certs {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        info!(
            hosts = ?hosts,
            basic_auth = auth.is_some(),
            verify_certs,
            "OpenSearch client initialized with hosts"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// The underlying OpenSearch client, for APIs not covered by the trait.
    pub fn inner(&self) -> &OpenSearch {
        &self.client
    }
}

impl_search_engine_client!(OpenSearchClient, opensearch, EngineKind::OpenSearch, "opensearch");
