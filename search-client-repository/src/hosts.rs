//! Host list parsing shared by the engine adapters.

use url::Url;

use crate::errors::SearchError;

/// Parse configured hosts into URLs.
///
/// Hosts without a scheme (e.g. `localhost:9200`) are treated as `http://`.
///
/// # Errors
///
/// Returns `SearchError::ConnectionError` if the list is empty or a host is not
/// a valid URL.
pub(crate) fn parse_hosts(hosts: &[String]) -> Result<Vec<Url>, SearchError> {
    if hosts.is_empty() {
        return Err(SearchError::connection("No hosts configured"));
    }

    hosts
        .iter()
        .map(|host| {
            let candidate = if host.contains("://") {
                host.clone()
            } else {
                format!("http://{}", host)
            };
            Url::parse(&candidate)
                .map_err(|e| SearchError::connection(format!("Invalid host '{}': {}", host, e)))
        })
        .collect()
}
