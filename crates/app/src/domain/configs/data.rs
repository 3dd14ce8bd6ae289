//! Config Data

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use sha2::{Digest, Sha256};

use crate::domain::{configs::ConfigsServiceError, repos::RepoId};

/// New Config Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConfig {
    pub repo_id: RepoId,
    pub data: Vec<u8>,
    pub hash: String,
}

/// Content fingerprint of a configuration payload.
#[must_use]
pub fn content_hash(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Encodes raw configuration bytes for transport.
#[must_use]
pub fn encode_config_payload(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Decodes a base64 transport payload into raw configuration bytes.
///
/// # Errors
///
/// Returns [`ConfigsServiceError::InvalidInput`] when the payload is not valid
/// base64 or decodes to nothing.
pub fn decode_config_payload(encoded: &str) -> Result<Vec<u8>, ConfigsServiceError> {
    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|_ignored| ConfigsServiceError::InvalidInput("payload is not valid base64"))?;

    if decoded.is_empty() {
        return Err(ConfigsServiceError::InvalidInput("payload is empty"));
    }

    Ok(decoded)
}
