//! Environment-driven configuration.

use std::env;
use std::path::Path;

use tracing::debug;

use search_client_shared::{ConnectionConfig, SearchClientConfig, DEFAULT_HOSTS};

/// Elastic Cloud deployment id.
pub const ELASTIC_CLOUD_ID: &str = "ELASTIC_CLOUD_ID";

/// Encoded Elastic Cloud API key.
pub const ELASTIC_API_KEY: &str = "ELASTIC_API_KEY";

/// Engine kind that may use Elastic Cloud credentials.
const CLOUD_ENGINE: &str = "elasticsearch";

/// Resolve the configuration for `engine_kind` from the process environment.
///
/// A `.env` file in the working directory (or a parent) is loaded first, if
/// present. Variables already set in the environment take precedence over the
/// file.
///
/// # Environment Variables
///
/// - `ELASTIC_CLOUD_ID` / `ELASTIC_API_KEY`: Elastic Cloud credentials (elasticsearch only)
/// - `<PREFIX>_HOSTS`: comma-separated host URLs (default: https://localhost:9200)
/// - `<PREFIX>_USERNAME` / `<PREFIX>_PASSWORD`: basic auth credentials
/// - `<PREFIX>_VERIFY_CERTS`: "true" to verify TLS certificates (default: false)
///
/// `<PREFIX>` is the uppercased engine kind, e.g. `OPENSEARCH`.
pub fn from_env(engine_kind: &str) -> SearchClientConfig {
    if let Ok(path) = dotenv::dotenv() {
        debug!(path = %path.display(), "Loaded .env file");
    }

    from_lookup(engine_kind, |key| env::var(key).ok())
}

/// Resolve the configuration for `engine_kind` after loading the dotenv file at `path`.
///
/// As with [`from_env`], variables already set in the environment are not
/// overwritten by the file. A missing or unreadable file is logged and skipped.
pub fn from_env_file<P: AsRef<Path>>(engine_kind: &str, path: P) -> SearchClientConfig {
    let path = path.as_ref();
    match dotenv::from_path(path) {
        Ok(()) => debug!(path = %path.display(), "Loaded .env file"),
        Err(e) => debug!(path = %path.display(), error = %e, "Skipping .env file"),
    }

    from_lookup(engine_kind, |key| env::var(key).ok())
}

/// Serializes tests that read or write process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Resolve the configuration for `engine_kind` from an arbitrary variable source.
///
/// Unsupported engine kinds are not rejected here; the client constructor
/// reports them.
pub fn from_lookup<F>(engine_kind: &str, lookup: F) -> SearchClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if engine_kind == CLOUD_ENGINE {
        if let (Some(cloud_id), Some(api_key)) =
            (non_empty(ELASTIC_CLOUD_ID), non_empty(ELASTIC_API_KEY))
        {
            debug!(engine = engine_kind, "Using Elastic Cloud configuration");
            return SearchClientConfig::new(
                engine_kind,
                ConnectionConfig::Cloud { cloud_id, api_key },
            );
        }
    }

    let prefix = engine_kind.to_uppercase();
    let hosts = lookup(&format!("{}_HOSTS", prefix))
        .map(|raw| parse_hosts(&raw))
        .filter(|hosts| !hosts.is_empty())
        .unwrap_or_else(|| parse_hosts(DEFAULT_HOSTS));
    let username = lookup(&format!("{}_USERNAME", prefix));
    let password = lookup(&format!("{}_PASSWORD", prefix));
    let verify_certs = lookup(&format!("{}_VERIFY_CERTS", prefix))
        .map(|raw| parse_verify_certs(&raw))
        .unwrap_or(false);

    debug!(
        engine = engine_kind,
        hosts = ?hosts,
        verify_certs,
        "Using host configuration"
    );

    SearchClientConfig::new(
        engine_kind,
        ConnectionConfig::Hosts {
            hosts,
            username,
            password,
            verify_certs,
        },
    )
}

/// Split a comma-separated host list, trimming whitespace and dropping empty entries.
pub fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .collect()
}

/// Only a case-insensitive "true" enables verification; anything else disables it.
pub fn parse_verify_certs(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}
