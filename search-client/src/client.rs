//! Composite search client construction.

use tracing::{debug, info, warn};

use crate::config;
use crate::ClientError;
use search_client_repository::{
    decode_cloud_base_url, ElasticsearchClient, EngineClient, GeneralRestClient,
    OpenSearchClient,
};
use search_client_shared::{ConnectionConfig, EngineKind, SearchClientConfig};

/// What to report when TLS certificate verification is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsecureTlsWarnings {
    /// Only note it at debug level.
    #[default]
    Suppress,
    /// Emit a warning for each client constructed without verification.
    Warn,
}

/// Observability options applied while constructing a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientOptions {
    /// Handling of the insecure-connection warning.
    pub insecure_tls: InsecureTlsWarnings,
}

impl ClientOptions {
    /// Options that warn when certificate verification is disabled.
    pub fn warn_insecure() -> Self {
        Self {
            insecure_tls: InsecureTlsWarnings::Warn,
        }
    }
}

/// Client bundling the structured engine client and the generic REST client.
///
/// # Example
///
/// ```ignore
/// use search_client::{create_search_client, SearchEngineClient};
///
/// let client = create_search_client("opensearch")?;
/// let healthy = client.client().health_check().await?;
///
/// if let Some(rest) = client.general_client() {
///     let stats = rest.get("/_nodes/stats", None).await?;
/// }
/// ```
pub struct SearchClient {
    engine: EngineKind,
    config: SearchClientConfig,
    client: EngineClient,
    general_client: Option<GeneralRestClient>,
}

impl SearchClient {
    /// Construct the structured client and, when a base URL can be derived,
    /// the generic REST client.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchClient)` - The composite client
    /// * `Err(ClientError::UnsupportedEngine)` - If the engine kind is not recognized
    /// * `Err(ClientError)` - If the structured client cannot be built
    pub fn new(config: SearchClientConfig, options: ClientOptions) -> Result<Self, ClientError> {
        let engine = EngineKind::parse(&config.engine_kind)
            .ok_or_else(|| ClientError::UnsupportedEngine(config.engine_kind.clone()))?;

        let verify_certs = config.connection.verify_certs();
        if !verify_certs {
            match options.insecure_tls {
                InsecureTlsWarnings::Warn => {
                    warn!(engine = %engine, "TLS certificate verification is disabled")
                }
                InsecureTlsWarnings::Suppress => {
                    debug!(engine = %engine, "TLS certificate verification is disabled")
                }
            }
        }

        let (client, base_url): (EngineClient, Option<String>) =
            match (engine, &config.connection) {
                (EngineKind::Elasticsearch, ConnectionConfig::Cloud { cloud_id, api_key }) => {
                    let base_url = resolve_base_url(&config.connection);
                    let client = ElasticsearchClient::cloud(cloud_id, api_key)?;
                    (client.into(), base_url)
                }
                (EngineKind::Elasticsearch, ConnectionConfig::Hosts { hosts, .. }) => {
                    let client = ElasticsearchClient::hosts(
                        hosts,
                        config.connection.basic_auth(),
                        verify_certs,
                    )?;
                    (client.into(), resolve_base_url(&config.connection))
                }
                (EngineKind::OpenSearch, ConnectionConfig::Hosts { hosts, .. }) => {
                    let client = OpenSearchClient::hosts(
                        hosts,
                        config.connection.basic_auth(),
                        verify_certs,
                    )?;
                    (client.into(), resolve_base_url(&config.connection))
                }
                (EngineKind::OpenSearch, ConnectionConfig::Cloud { .. }) => {
                    return Err(ClientError::config(
                        "Elastic Cloud credentials are not supported for opensearch",
                    ));
                }
            };

        let general_client = match base_url {
            Some(base_url) => {
                let (username, password) = match config.connection.basic_auth() {
                    Some((user, pass)) => (Some(user), Some(pass)),
                    None => (None, None),
                };
                Some(GeneralRestClient::new(
                    &base_url,
                    username,
                    password,
                    verify_certs,
                ))
            }
            None => {
                warn!(
                    engine = %engine,
                    "GeneralRestClient was not initialized due to missing base_url"
                );
                None
            }
        };

        info!(
            engine = %engine,
            cloud = config.connection.is_cloud(),
            rest_client = general_client.is_some(),
            "Search client initialized"
        );

        Ok(Self {
            engine,
            config,
            client,
            general_client,
        })
    }

    /// The engine this client talks to.
    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    /// The configuration the client was built from.
    pub fn config(&self) -> &SearchClientConfig {
        &self.config
    }

    /// The structured engine client.
    pub fn client(&self) -> &EngineClient {
        &self.client
    }

    /// The generic REST client, if a base URL could be derived.
    pub fn general_client(&self) -> Option<&GeneralRestClient> {
        self.general_client.as_ref()
    }

    /// Base URL used by the generic REST client.
    pub fn base_url(&self) -> Option<&str> {
        self.general_client.as_ref().map(GeneralRestClient::base_url)
    }

    /// The generic REST client, or `ClientError::RestUnavailable`.
    pub fn rest(&self) -> Result<&GeneralRestClient, ClientError> {
        self.general_client
            .as_ref()
            .ok_or(ClientError::RestUnavailable)
    }
}

/// Derive the REST base URL for a connection.
///
/// Cloud connections decode it from the cloud id; host connections use the
/// first host. Decoding failures are logged and yield `None`.
pub fn resolve_base_url(connection: &ConnectionConfig) -> Option<String> {
    match connection {
        ConnectionConfig::Cloud { cloud_id, .. } => match decode_cloud_base_url(cloud_id) {
            Ok(base_url) => Some(base_url),
            Err(e) => {
                warn!(error = %e, "Failed to parse base_url from cloud_id");
                None
            }
        },
        ConnectionConfig::Hosts { hosts, .. } => hosts.first().cloned(),
    }
}

/// Create a search client for `engine_kind` from the environment.
///
/// Configuration is read as described in [`config::from_env`].
///
/// # Errors
///
/// Returns `ClientError::UnsupportedEngine` for anything other than
/// `"elasticsearch"` or `"opensearch"`.
pub fn create_search_client(engine_kind: &str) -> Result<SearchClient, ClientError> {
    create_search_client_with_options(engine_kind, ClientOptions::default())
}

/// Create a search client for `engine_kind` from the environment, with explicit options.
pub fn create_search_client_with_options(
    engine_kind: &str,
    options: ClientOptions,
) -> Result<SearchClient, ClientError> {
    SearchClient::new(config::from_env(engine_kind), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_client_repository::{SearchEngineClient, SearchError};

    fn hosts_config(engine_kind: &str, hosts: &[&str]) -> SearchClientConfig {
        SearchClientConfig::new(
            engine_kind,
            ConnectionConfig::Hosts {
                hosts: hosts.iter().map(|h| h.to_string()).collect(),
                username: Some("admin".to_string()),
                password: Some("secret".to_string()),
                verify_certs: false,
            },
        )
    }

    fn encode(value: &str) -> String {
        use base64::{engine::general_purpose, Engine as _};
        general_purpose::STANDARD.encode(value)
    }

    fn cloud_id(payload: &str) -> String {
        format!("deployment:{}", encode(payload))
    }

    fn cloud_config(cloud_id: String, api_key: String) -> SearchClientConfig {
        SearchClientConfig::new(
            "elasticsearch",
            ConnectionConfig::Cloud { cloud_id, api_key },
        )
    }

    #[test]
    fn test_hosts_client_for_each_engine() {
        for engine in EngineKind::ALL {
            let client = SearchClient::new(
                hosts_config(engine.as_str(), &["https://a:9200/", "https://b:9200"]),
                ClientOptions::default(),
            )
            .unwrap();

            assert_eq!(client.engine(), engine);
            assert_eq!(client.client().engine(), engine);

            let rest = client.general_client().expect("rest client");
            assert_eq!(rest.base_url(), "https://a:9200");
            assert!(rest.has_auth());
            assert!(!rest.verify_certs());
        }
    }

    #[test]
    fn test_unsupported_engine() {
        let result = SearchClient::new(
            hosts_config("solr", &["http://solr:8983"]),
            ClientOptions::warn_insecure(),
        );

        match result {
            Err(ClientError::UnsupportedEngine(kind)) => assert_eq!(kind, "solr"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected unsupported engine error"),
        }
    }

    #[test]
    fn test_unsupported_engine_message() {
        let err = ClientError::UnsupportedEngine("solr".to_string());
        assert_eq!(err.to_string(), "Unsupported engine type: solr");
    }

    #[test]
    fn test_cloud_base_url() {
        let connection = ConnectionConfig::Cloud {
            cloud_id: cloud_id("region$abc123.region.gcp.example.com"),
            api_key: "key".to_string(),
        };

        assert_eq!(
            resolve_base_url(&connection).as_deref(),
            Some("https://abc123.region.gcp.example.com")
        );
    }

    #[test]
    fn test_malformed_cloud_id_has_no_base_url() {
        let connection = ConnectionConfig::Cloud {
            cloud_id: "deployment:%%%".to_string(),
            api_key: "key".to_string(),
        };

        assert!(resolve_base_url(&connection).is_none());
    }

    #[test]
    fn test_hosts_base_url_is_first_host() {
        let connection = ConnectionConfig::hosts(["https://first:9200", "https://second:9200"]);

        assert_eq!(
            resolve_base_url(&connection).as_deref(),
            Some("https://first:9200")
        );
        assert!(resolve_base_url(&ConnectionConfig::hosts(Vec::<String>::new())).is_none());
    }

    #[test]
    fn test_cloud_config_rejected_for_opensearch() {
        let config = SearchClientConfig::new(
            "opensearch",
            ConnectionConfig::Cloud {
                cloud_id: cloud_id("region$abc.example.com"),
                api_key: "key".to_string(),
            },
        );

        assert!(matches!(
            SearchClient::new(config, ClientOptions::default()),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_empty_host_list_fails() {
        let result = SearchClient::new(hosts_config("opensearch", &[]), ClientOptions::default());

        assert!(matches!(result, Err(ClientError::Search(_))));
    }

    #[test]
    fn test_cloud_client() {
        let config = cloud_config(
            cloud_id("us-central1.gcp.cloud.es.io$abc123$def456"),
            encode("key-id:key-secret"),
        );

        let client = SearchClient::new(config, ClientOptions::warn_insecure()).unwrap();
        let rest = client.general_client().expect("rest client");

        assert_eq!(client.engine(), EngineKind::Elasticsearch);
        assert!(client.client().as_elasticsearch().is_some());
        assert_eq!(rest.base_url(), "https://abc123");
        assert!(rest.verify_certs());
        assert!(!rest.has_auth());
    }

    #[test]
    fn test_cloud_id_without_name_has_no_rest_client() {
        let config = cloud_config(
            encode("us-central1.gcp.cloud.es.io$abc123$def456"),
            encode("key-id:key-secret"),
        );

        let client = SearchClient::new(config, ClientOptions::default()).unwrap();

        assert!(client.client().as_elasticsearch().is_some());
        assert!(client.general_client().is_none());
        assert!(client.base_url().is_none());
        assert!(matches!(client.rest(), Err(ClientError::RestUnavailable)));
    }

    #[test]
    fn test_cloud_client_rejects_malformed_api_key() {
        let config = cloud_config(
            cloud_id("us-central1.gcp.cloud.es.io$abc123$def456"),
            "key".to_string(),
        );

        assert!(matches!(
            SearchClient::new(config, ClientOptions::default()),
            Err(ClientError::Search(SearchError::ConnectionError(_)))
        ));
    }

    #[test]
    fn test_create_search_client_from_environment() {
        let _guard = config::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        std::env::set_var("OPENSEARCH_HOSTS", "http://env-host:9200, http://other:9200");
        let result = create_search_client("opensearch");
        std::env::remove_var("OPENSEARCH_HOSTS");

        let client = result.unwrap();
        assert_eq!(client.engine(), EngineKind::OpenSearch);
        assert_eq!(client.base_url(), Some("http://env-host:9200"));
        assert_eq!(
            client.config().connection.host_list(),
            ["http://env-host:9200", "http://other:9200"]
        );
    }

    #[test]
    fn test_create_search_client_unsupported_engine() {
        let _guard = config::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        assert!(matches!(
            create_search_client("solr"),
            Err(ClientError::UnsupportedEngine(kind)) if kind == "solr"
        ));
    }

    #[test]
    fn test_config_is_retained() {
        let config = hosts_config("opensearch", &["https://os:9200"]);
        let client = SearchClient::new(config.clone(), ClientOptions::default()).unwrap();

        assert_eq!(client.config(), &config);
        assert_eq!(client.base_url(), Some("https://os:9200"));
        assert!(client.rest().is_ok());
    }

    #[tokio::test]
    async fn test_rest_pass_through_uses_first_host() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let body = r#"[{"index":"entities"}]"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });

        let config = SearchClientConfig::new(
            "opensearch",
            ConnectionConfig::hosts([format!("http://{}/", addr)]),
        );
        let client = SearchClient::new(config, ClientOptions::default()).unwrap();

        let response = client
            .rest()
            .unwrap()
            .get("/_cat/indices", None)
            .await
            .unwrap();
        let raw = server.await.unwrap();

        assert!(raw.starts_with("GET /_cat/indices HTTP/1.1"), "got: {}", raw);
        assert_eq!(
            response.as_json(),
            Some(&serde_json::json!([{ "index": "entities" }]))
        );
    }
}
