//! Structured client for either supported engine.

use async_trait::async_trait;
use serde_json::Value;

use crate::elasticsearch::ElasticsearchClient;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::OpenSearchClient;
use search_client_shared::EngineKind;

/// The structured client held by a composite search client, tagged by engine.
pub enum EngineClient {
    Elasticsearch(ElasticsearchClient),
    OpenSearch(OpenSearchClient),
}

impl EngineClient {
    /// The Elasticsearch adapter, if this is an Elasticsearch client.
    pub fn as_elasticsearch(&self) -> Option<&ElasticsearchClient> {
        match self {
            Self::Elasticsearch(client) => Some(client),
            Self::OpenSearch(_) => None,
        }
    }

    /// The OpenSearch adapter, if this is an OpenSearch client.
    pub fn as_opensearch(&self) -> Option<&OpenSearchClient> {
        match self {
            Self::Elasticsearch(_) => None,
            Self::OpenSearch(client) => Some(client),
        }
    }

    fn adapter(&self) -> &dyn SearchEngineClient {
        match self {
            Self::Elasticsearch(client) => client,
            Self::OpenSearch(client) => client,
        }
    }
}

impl From<ElasticsearchClient> for EngineClient {
    fn from(client: ElasticsearchClient) -> Self {
        Self::Elasticsearch(client)
    }
}

impl From<OpenSearchClient> for EngineClient {
    fn from(client: OpenSearchClient) -> Self {
        Self::OpenSearch(client)
    }
}

#[async_trait]
impl SearchEngineClient for EngineClient {
    fn engine(&self) -> EngineKind {
        self.adapter().engine()
    }

    async fn info(&self) -> Result<Value, SearchError> {
        self.adapter().info().await
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        self.adapter().health_check().await
    }

    async fn search(&self, index: &str, body: Value) -> Result<Value, SearchError> {
        self.adapter().search(index, body).await
    }

    async fn index_document(&self, index: &str, id: &str, body: Value) -> Result<(), SearchError> {
        self.adapter().index_document(index, id, body).await
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<Option<Value>, SearchError> {
        self.adapter().get_document(index, id).await
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError> {
        self.adapter().delete_document(index, id).await
    }

    async fn create_index(&self, index: &str, body: Value) -> Result<(), SearchError> {
        self.adapter().create_index(index, body).await
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchError> {
        self.adapter().delete_index(index).await
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        self.adapter().index_exists(index).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local() -> Vec<String> {
        vec!["http://localhost:9200".to_string()]
    }

    #[test]
    fn test_engine_tag_matches_variant() {
        let es: EngineClient = ElasticsearchClient::hosts(&local(), None, false)
            .unwrap()
            .into();
        let os: EngineClient = OpenSearchClient::hosts(&local(), None, false)
            .unwrap()
            .into();

        assert_eq!(es.engine(), EngineKind::Elasticsearch);
        assert!(es.as_elasticsearch().is_some());
        assert!(es.as_opensearch().is_none());

        assert_eq!(os.engine(), EngineKind::OpenSearch);
        assert!(os.as_opensearch().is_some());
        assert!(os.as_elasticsearch().is_none());
    }
}
