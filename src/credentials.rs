use crate::signing;

/// API key pair for the trade endpoint.
///
/// The secret is only ever used as an HMAC key; it is never sent or logged.
#[derive(Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Sign a canonical string and return the lowercase hex digest.
    pub fn sign(&self, canonical: &str) -> String {
        signing::sign(&self.secret_key, canonical)
    }

    /// Check a hex digest against a canonical string.
    pub fn verify(&self, canonical: &str, digest: &str) -> bool {
        signing::verify(&self.secret_key, canonical, digest)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .finish_non_exhaustive()
    }
}
