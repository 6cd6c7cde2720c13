use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Parameters that are sent with a request but never signed.
const UNSIGNED_PARAMS: [&str; 4] = ["file", "cloud_name", "resource_type", "api_key"];

/// Signs API parameters: `key=value` pairs sorted by key and joined with `&`,
/// followed by the API secret, hashed with SHA-256 and hex encoded.
pub fn sign(params: &BTreeMap<String, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .filter(|(key, value)| !UNSIGNED_PARAMS.contains(&key.as_str()) && !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());

    hex::encode(hasher.finalize())
}
