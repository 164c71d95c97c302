//! # Search Client Repository
//!
//! This crate provides the engine adapters behind the unified search client:
//! the `SearchEngineClient` trait with Elasticsearch and OpenSearch
//! implementations, the `EngineClient` variant that holds either one, and a
//! generic REST client for endpoints the structured clients do not expose.

pub mod cloud_id;
pub mod elasticsearch;
pub mod engine_client;
mod engine_impl;
pub mod errors;
mod hosts;
pub mod interfaces;
pub mod opensearch;
pub mod rest;

pub use crate::cloud_id::{decode_api_key, decode_cloud_base_url, normalize_cloud_id};
pub use crate::elasticsearch::ElasticsearchClient;
pub use crate::engine_client::EngineClient;
pub use crate::errors::SearchError;
pub use crate::interfaces::SearchEngineClient;
pub use crate::opensearch::OpenSearchClient;
pub use crate::rest::{GeneralRestClient, RestResponse};
