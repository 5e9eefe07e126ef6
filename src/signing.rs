//! HMAC-SHA1 request signing and the Basic-Auth header built from it.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

fn mac(secret_key: &str, canonical: &str) -> HmacSha1 {
    let mut mac =
        HmacSha1::new_from_slice(secret_key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(canonical.as_bytes());
    mac
}

/// HMAC-SHA1 of `canonical` keyed by `secret_key`, as lowercase hex.
pub fn sign(secret_key: &str, canonical: &str) -> String {
    hex::encode(mac(secret_key, canonical).finalize().into_bytes())
}

/// Constant-time check of a hex digest produced by [`sign`].
pub fn verify(secret_key: &str, canonical: &str, digest: &str) -> bool {
    match hex::decode(digest) {
        Ok(bytes) => mac(secret_key, canonical).verify_slice(&bytes).is_ok(),
        Err(_) => false,
    }
}

/// `Authorization` header value: `Basic base64(access_key:digest)`.
pub fn build_auth_header(access_key: &str, digest: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{access_key}:{digest}")))
}
