//! Resolved connection settings for a search client.

use std::fmt;

/// Host list used when `<PREFIX>_HOSTS` is not set.
pub const DEFAULT_HOSTS: &str = "https://localhost:9200";

/// How to reach the search engine.
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectionConfig {
    /// Elastic Cloud deployment addressed by its cloud id.
    ///
    /// Certificate verification is always enabled for cloud deployments.
    Cloud { cloud_id: String, api_key: String },

    /// Self-managed cluster reachable through a list of host URLs.
    Hosts {
        hosts: Vec<String>,
        username: Option<String>,
        password: Option<String>,
        verify_certs: bool,
    },
}

impl ConnectionConfig {
    /// Host-style configuration with no credentials.
    pub fn hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Hosts {
            hosts: hosts.into_iter().map(Into::into).collect(),
            username: None,
            password: None,
            verify_certs: false,
        }
    }

    /// Whether TLS certificates are verified.
    pub fn verify_certs(&self) -> bool {
        match self {
            Self::Cloud { .. } => true,
            Self::Hosts { verify_certs, .. } => *verify_certs,
        }
    }

    /// Basic auth credentials, present only when both username and password are set.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match self {
            Self::Cloud { .. } => None,
            Self::Hosts {
                username, password, ..
            } => match (username.as_deref(), password.as_deref()) {
                (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                    Some((user, pass))
                }
                _ => None,
            },
        }
    }

    /// Configured hosts. Empty for cloud configurations.
    pub fn host_list(&self) -> &[String] {
        match self {
            Self::Cloud { .. } => &[],
            Self::Hosts { hosts, .. } => hosts,
        }
    }

    /// True for Elastic Cloud configurations.
    pub fn is_cloud(&self) -> bool {
        matches!(self, Self::Cloud { .. })
    }
}

// Credentials must never end up in logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloud { cloud_id, .. } => f
                .debug_struct("Cloud")
                .field("cloud_id", cloud_id)
                .field("api_key", &"<redacted>")
                .finish(),
            Self::Hosts {
                hosts,
                username,
                password,
                verify_certs,
            } => f
                .debug_struct("Hosts")
                .field("hosts", hosts)
                .field("username", username)
                .field("password", &password.as_ref().map(|_| "<redacted>"))
                .field("verify_certs", verify_certs)
                .finish(),
        }
    }
}

/// Configuration record produced for one client factory call.
///
/// The engine kind is kept as given by the caller; it is validated when the
/// client is constructed, not when the configuration is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClientConfig {
    /// Requested engine kind, e.g. `"opensearch"`.
    pub engine_kind: String,
    /// How to connect to the engine.
    pub connection: ConnectionConfig,
}

impl SearchClientConfig {
    /// Create a configuration for the given engine kind.
    pub fn new(engine_kind: impl Into<String>, connection: ConnectionConfig) -> Self {
        Self {
            engine_kind: engine_kind.into(),
            connection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts_with_auth(username: Option<&str>, password: Option<&str>) -> ConnectionConfig {
        ConnectionConfig::Hosts {
            hosts: vec!["https://localhost:9200".to_string()],
            username: username.map(str::to_string),
            password: password.map(str::to_string),
            verify_certs: false,
        }
    }

    #[test]
    fn test_cloud_always_verifies() {
        let config = ConnectionConfig::Cloud {
            cloud_id: "name:abc".to_string(),
            api_key: "key".to_string(),
        };

        assert!(config.verify_certs());
        assert!(config.is_cloud());
        assert!(config.basic_auth().is_none());
        assert!(config.host_list().is_empty());
    }

    #[test]
    fn test_basic_auth_requires_both_parts() {
        assert_eq!(
            hosts_with_auth(Some("admin"), Some("secret")).basic_auth(),
            Some(("admin", "secret"))
        );
        assert!(hosts_with_auth(Some("admin"), None).basic_auth().is_none());
        assert!(hosts_with_auth(None, Some("secret")).basic_auth().is_none());
        assert!(hosts_with_auth(Some(""), Some("secret")).basic_auth().is_none());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let hosts = format!("{:?}", hosts_with_auth(Some("admin"), Some("hunter2")));
        assert!(hosts.contains("admin"));
        assert!(!hosts.contains("hunter2"));

        let cloud = format!(
            "{:?}",
            ConnectionConfig::Cloud {
                cloud_id: "name:abc".to_string(),
                api_key: "very-secret-key".to_string(),
            }
        );
        assert!(cloud.contains("name:abc"));
        assert!(!cloud.contains("very-secret-key"));
    }

    #[test]
    fn test_hosts_constructor() {
        let config = ConnectionConfig::hosts(["https://a:9200", "https://b:9200"]);

        assert_eq!(config.host_list(), ["https://a:9200", "https://b:9200"]);
        assert!(!config.verify_certs());
        assert!(config.basic_auth().is_none());
    }
}
