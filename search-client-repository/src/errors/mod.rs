//! Error types for the search client repository.

mod search_error;

pub use search_error::SearchError;
