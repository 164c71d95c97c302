//! Elastic Cloud id decoding.
//!
//! A cloud id looks like `<name>:<base64 payload>`, where the payload decodes to
//! `<segment>$<domain>[$...]`. The REST base URL is `https://<domain>`.
//!
//! Cloud API keys are handed out base64 encoded as `<id>:<api_key>`.

use base64::{engine::general_purpose, Engine as _};

use crate::errors::SearchError;

/// Derive the HTTPS base URL encoded in an Elastic Cloud id.
///
/// # Errors
///
/// Returns `SearchError::InvalidCloudId` if the id has no payload segment, the
/// payload is not valid base64 or ASCII, or no domain follows the first `$`.
pub fn decode_cloud_base_url(cloud_id: &str) -> Result<String, SearchError> {
    let encoded = cloud_id
        .split(':')
        .nth(1)
        .ok_or_else(|| SearchError::invalid_cloud_id("missing ':' separated payload"))?;

    let decoded = general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| SearchError::invalid_cloud_id(format!("payload is not base64: {}", e)))?;

    if !decoded.is_ascii() {
        return Err(SearchError::invalid_cloud_id("payload is not ASCII"));
    }
    let decoded = String::from_utf8(decoded)
        .map_err(|e| SearchError::invalid_cloud_id(e.to_string()))?;

    let domain = decoded
        .split('$')
        .nth(1)
        .filter(|domain| !domain.is_empty())
        .ok_or_else(|| SearchError::invalid_cloud_id("payload has no domain segment"))?;

    Ok(format!("https://{}", domain))
}

/// Cluster name given to cloud ids that carry only the base64 payload.
const DEFAULT_CLOUD_NAME: &str = "cloud";

/// Ensure a cloud id has the `<name>:` prefix the native cloud transport expects.
///
/// Ids consisting of the bare base64 payload get a placeholder name; the name
/// is not used to route requests.
pub fn normalize_cloud_id(cloud_id: &str) -> String {
    if cloud_id.contains(':') {
        cloud_id.to_string()
    } else {
        format!("{}:{}", DEFAULT_CLOUD_NAME, cloud_id)
    }
}

/// Split an encoded Elastic Cloud API key into its `(id, api_key)` parts.
///
/// # Errors
///
/// Returns `SearchError::ConnectionError` if the key is not base64 encoded
/// UTF-8 text of the form `<id>:<api_key>`.
pub fn decode_api_key(encoded: &str) -> Result<(String, String), SearchError> {
    let decoded = general_purpose::STANDARD
        .decode(encoded.trim().as_bytes())
        .map_err(|e| SearchError::connection(format!("API key is not base64: {}", e)))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| SearchError::connection("API key is not valid UTF-8"))?;

    match decoded.split_once(':') {
        Some((id, key)) if !id.is_empty() && !key.is_empty() => {
            Ok((id.to_string(), key.to_string()))
        }
        _ => Err(SearchError::connection(
            "API key should decode to '<id>:<api_key>'",
        )),
    }
}
