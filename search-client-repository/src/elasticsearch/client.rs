//! Elasticsearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the official Elasticsearch Rust client, for both self-managed
//! clusters and Elastic Cloud deployments.

use ::elasticsearch::{
    auth::Credentials,
    cert::CertificateValidation,
    http::transport::{SingleNodeConnectionPool, Transport, TransportBuilder},
    Elasticsearch,
};
use tracing::{info, warn};

use crate::cloud_id::{decode_api_key, normalize_cloud_id};
use crate::engine_impl::impl_search_engine_client;
use crate::errors::SearchError;
use crate::hosts::parse_hosts;
use search_client_shared::EngineKind;

/// Elasticsearch client implementation.
///
/// # Example
///
/// ```ignore
/// let client = ElasticsearchClient::cloud("my-deployment:ZXhhbXBsZS5jb20kYWJj", "encoded-key")?;
/// let info = client.info().await?;
/// println!("{}", info["version"]["number"]);
/// ```
pub struct ElasticsearchClient {
    client: Elasticsearch,
}

impl ElasticsearchClient {
    /// Create a client for an Elastic Cloud deployment.
    ///
    /// Certificates are always verified for cloud deployments. Cloud ids
    /// without a `<name>:` prefix are accepted.
    ///
    /// # Arguments
    ///
    /// * `cloud_id` - The deployment's cloud id
    /// * `api_key` - Base64 encoded `<id>:<api_key>`, as shown by Kibana
    ///
    /// # Returns
    ///
    /// * `Ok(ElasticsearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the API key is malformed or the cloud id is
    ///   rejected by the transport
    pub fn cloud(cloud_id: &str, api_key: &str) -> Result<Self, SearchError> {
        let (key_id, key_secret) = decode_api_key(api_key)?;

        let transport = Transport::cloud(
            &normalize_cloud_id(cloud_id),
            Credentials::ApiKey(key_id, key_secret),
        )
        .map_err(|e| SearchError::connection(e.to_string()))?;

        info!("Elasticsearch client initialized with Cloud ID");

        Ok(Self {
            client: Elasticsearch::new(transport),
        })
    }

    /// Create a client for a self-managed cluster.
    ///
    /// The Elasticsearch transport connects to a single node, so only the
    /// first host is used.
    ///
    /// # Arguments
    ///
    /// * `hosts` - Cluster node URLs (e.g., "https://localhost:9200")
    /// * `auth` - Optional basic auth `(username, password)`
    /// * `verify_certs` - Whether to validate TLS certificates
    ///
    /// # Returns
    ///
    /// * `Ok(ElasticsearchClient)` - A new client instance
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
                "Elasticsearch transport uses the first host only"
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
            "Elasticsearch client initialized with hosts"
        );

        Ok(Self {
            client: Elasticsearch::new(transport),
        })
    }

    /// The underlying Elasticsearch client, for APIs not covered by the trait.
    pub fn inner(&self) -> &Elasticsearch {
        &self.client
    }
}

impl_search_engine_client!(
    ElasticsearchClient,
    elasticsearch,
    EngineKind::Elasticsearch,
    "elasticsearch"
);
