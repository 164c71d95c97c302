//! Supported search engine kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The search engines a client can be created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Elasticsearch, either self-hosted or on Elastic Cloud.
    Elasticsearch,
    /// OpenSearch, the Elasticsearch fork.
    OpenSearch,
}

impl EngineKind {
    /// All supported engine kinds.
    pub const ALL: [EngineKind; 2] = [EngineKind::Elasticsearch, EngineKind::OpenSearch];

    /// Parse an engine kind from its lowercase name.
    ///
    /// Returns `None` for anything other than `"elasticsearch"` or `"opensearch"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "elasticsearch" => Some(Self::Elasticsearch),
            "opensearch" => Some(Self::OpenSearch),
            _ => None,
        }
    }

    /// The lowercase name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elasticsearch => "elasticsearch",
            Self::OpenSearch => "opensearch",
        }
    }

    /// Prefix of the environment variables read for this engine (e.g. `OPENSEARCH`).
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::Elasticsearch => "ELASTICSEARCH",
            Self::OpenSearch => "OPENSEARCH",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_engines() {
        assert_eq!(
            EngineKind::parse("elasticsearch"),
            Some(EngineKind::Elasticsearch)
        );
        assert_eq!(EngineKind::parse("opensearch"), Some(EngineKind::OpenSearch));
    }

    #[test]
    fn test_parse_unknown_engine() {
        assert_eq!(EngineKind::parse("solr"), None);
        assert_eq!(EngineKind::parse(""), None);
        assert_eq!(EngineKind::parse("OpenSearch"), None);
    }

    #[test]
    fn test_env_prefix_matches_uppercased_name() {
        for kind in EngineKind::ALL {
            assert_eq!(kind.env_prefix(), kind.as_str().to_uppercase());
        }
    }

    #[test]
    fn test_serde_uses_lowercase_name() {
        let json = serde_json::to_string(&EngineKind::OpenSearch).unwrap();
        assert_eq!(json, "\"opensearch\"");

        let kind: EngineKind = serde_json::from_str("\"elasticsearch\"").unwrap();
        assert_eq!(kind, EngineKind::Elasticsearch);
    }
}
