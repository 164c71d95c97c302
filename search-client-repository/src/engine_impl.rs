//! `SearchEngineClient` implementation shared by the native client adapters.
//!
//! The `elasticsearch` and `opensearch` crates expose the same request
//! builders under different crate paths, so one macro generates the status
//! handling and trait methods for both adapters.

/// Implement `SearchEngineClient` for an adapter wrapping a native client in a
/// field named `client`.
///
/// * `$client` - The adapter type
/// * `$krate` - The native client crate (`elasticsearch` or `opensearch`)
/// * `$engine` - The `EngineKind` reported by the adapter
/// * `$label` - Engine name used in log events
macro_rules! impl_search_engine_client {
    ($client:ty, $krate:ident, $engine:expr, $label:literal) => {
        impl $client {
            /// Return the response if its status is a success, or `allow_missing` and 404.
            async fn check(
                response: ::$krate::http::response::Response,
                operation: &str,
                allow_missing: bool,
            ) -> Result<Option<::$krate::http::response::Response>, $crate::errors::SearchError> {
                let status = response.status_code();
                if status.is_success() {
                    return Ok(Some(response));
                }
                if allow_missing && status.as_u16() == 404 {
                    return Ok(None);
                }

                let error_body = response.text().await.unwrap_or_default();
                ::tracing::error!(
                    engine = $label,
                    status = %status,
                    body = %error_body,
                    operation,
                    "Search engine request failed"
                );
                Err($crate::errors::SearchError::http_status(
                    status.as_u16(),
                    error_body,
                ))
            }

            /// Check the status and parse the JSON body.
            async fn read_json(
                response: ::$krate::http::response::Response,
                operation: &str,
            ) -> Result<::serde_json::Value, $crate::errors::SearchError> {
                match Self::check(response, operation, false).await? {
                    Some(response) => response
                        .json::<::serde_json::Value>()
                        .await
                        .map_err(|e| $crate::errors::SearchError::parse(e.to_string())),
                    None => Err($crate::errors::SearchError::parse(format!(
                        "empty {} response",
                        operation
                    ))),
                }
            }
        }

        #[::async_trait::async_trait]
        impl $crate::interfaces::SearchEngineClient for $client {
            fn engine(&self) -> ::search_client_shared::EngineKind {
                $engine
            }

            async fn info(&self) -> Result<::serde_json::Value, $crate::errors::SearchError> {
                let response = self
                    .client
                    .info()
                    .send()
                    .await
                    .map_err(|e| $crate::errors::SearchError::connection(e.to_string()))?;

                Self::read_json(response, "info").await
            }

            async fn health_check(&self) -> Result<bool, $crate::errors::SearchError> {
                let response = self
                    .client
                    .cluster()
                    .health(::$krate::cluster::ClusterHealthParts::None)
                    .send()
                    .await
                    .map_err(|e| $crate::errors::SearchError::connection(e.to_string()))?;

                let health = Self::read_json(response, "health").await?;
                ::tracing::debug!(engine = $label, status = ?health.get("status"), "Cluster health");
                Ok($crate::interfaces::is_healthy(&health))
            }

            async fn search(
                &self,
                index: &str,
                body: ::serde_json::Value,
            ) -> Result<::serde_json::Value, $crate::errors::SearchError> {
                let response = self
                    .client
                    .search(::$krate::SearchParts::Index(&[index]))
                    .body(body)
                    .send()
                    .await
                    .map_err(|e| $crate::errors::SearchError::connection(e.to_string()))?;

                Self::read_json(response, "search").await
            }

            async fn index_document(
                &self,
                index: &str,
                id: &str,
                body: ::serde_json::Value,
            ) -> Result<(), $crate::errors::SearchError> {
                let response = self
                    .client
                    .index(::$krate::IndexParts::IndexId(index, id))
                    .body(body)
                    .send()
                    .await
                    .map_err(|e| $crate::errors::SearchError::connection(e.to_string()))?;

                Self::check(response, "index", false).await?;
                ::tracing::debug!(index, id, "Document indexed");
                Ok(())
            }

            async fn get_document(
                &self,
                index: &str,
                id: &str,
            ) -> Result<Option<::serde_json::Value>, $crate::errors::SearchError> {
                let response = self
                    .client
                    .get(::$krate::GetParts::IndexId(index, id))
                    .send()
                    .await
                    .map_err(|e| $crate::errors::SearchError::connection(e.to_string()))?;

                match Self::check(response, "get", true).await? {
                    Some(response) => {
                        let mut doc = response
                            .json::<::serde_json::Value>()
                            .await
                            .map_err(|e| $crate::errors::SearchError::parse(e.to_string()))?;
                        Ok(doc.get_mut("_source").map(::serde_json::Value::take))
                    }
                    None => Ok(None),
                }
            }

            async fn delete_document(
                &self,
                index: &str,
                id: &str,
            ) -> Result<(), $crate::errors::SearchError> {
                let response = self
                    .client
                    .delete(::$krate::DeleteParts::IndexId(index, id))
                    .send()
                    .await
                    .map_err(|e| $crate::errors::SearchError::connection(e.to_string()))?;

                // 404 is acceptable - document may not exist
                Self::check(response, "delete", true).await?;
                ::tracing::debug!(index, id, "Document deleted");
                Ok(())
            }

            async fn create_index(
                &self,
                index: &str,
                body: ::serde_json::Value,
            ) -> Result<(), $crate::errors::SearchError> {
                let response = self
                    .client
                    .indices()
                    .create(::$krate::indices::IndicesCreateParts::Index(index))
                    .body(body)
                    .send()
                    .await
                    .map_err(|e| $crate::errors::SearchError::connection(e.to_string()))?;

                Self::check(response, "create_index", false).await?;
                ::tracing::info!(engine = $label, index, "Index created");
                Ok(())
            }

            async fn delete_index(&self, index: &str) -> Result<(), $crate::errors::SearchError> {
                let response = self
                    .client
                    .indices()
                    .delete(::$krate::indices::IndicesDeleteParts::Index(&[index]))
                    .send()
                    .await
                    .map_err(|e| $crate::errors::SearchError::connection(e.to_string()))?;

                Self::check(response, "delete_index", true).await?;
                ::tracing::info!(engine = $label, index, "Index deleted");
                Ok(())
            }

            async fn index_exists(&self, index: &str) -> Result<bool, $crate::errors::SearchError> {
                let response = self
                    .client
                    .indices()
                    .exists(::$krate::indices::IndicesExistsParts::Index(&[index]))
                    .send()
                    .await
                    .map_err(|e| $crate::errors::SearchError::connection(e.to_string()))?;

                Ok(Self::check(response, "index_exists", true).await?.is_some())
            }
        }
    };
}

pub(crate) use impl_search_engine_client;
