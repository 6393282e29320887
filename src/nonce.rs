use chrono::Utc;
use sha1::{Digest, Sha1};
use uuid::Uuid;

/// Generate a request nonce.
///
/// Hex SHA-1 of a nanosecond clock reading and a random UUID.
pub fn generate_nonce() -> String {
    let now = Utc::now();
    let clock = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros());
    let seed = format!("{}{}", clock, Uuid::new_v4());

    hex::encode(Sha1::digest(seed.as_bytes()))
}

/// Seconds since the Unix epoch.
pub fn generate_timestamp() -> i64 {
    Utc::now().timestamp()
}
