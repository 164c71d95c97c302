//! # Search Client Shared
//!
//! Plain configuration types shared by the search client crates: the
//! supported engine kinds and the resolved connection settings.

pub mod config;
pub mod engine;

pub use config::{ConnectionConfig, SearchClientConfig, DEFAULT_HOSTS};
pub use engine::EngineKind;
