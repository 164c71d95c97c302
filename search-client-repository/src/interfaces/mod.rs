//! Interface definitions for the search engine clients.
//!
//! This module defines the abstract `SearchEngineClient` trait that both engine
//! adapters implement, so callers can swap backends or inject mocks.

mod search_engine_client;

pub use search_engine_client::SearchEngineClient;
pub(crate) use search_engine_client::is_healthy;
