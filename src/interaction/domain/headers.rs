//! Request headers and the signature pair Discord attaches to every request.

use std::collections::HashMap;

/// Header carrying the hex-encoded Ed25519 signature.
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Header carrying the timestamp that prefixes the signed message.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Case-insensitive view of inbound request headers.
///
/// Names are stored lowercased; when a name repeats, the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundHeaders {
    values: HashMap<String, String>,
}

impl InboundHeaders {
    /// Creates an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns `true` when no headers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for InboundHeaders
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Signature and timestamp extracted from a request.
///
/// Presence is all that is checked here; an empty or malformed value
/// fails later at signature verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationHeaders {
    signature: String,
    timestamp: String,
}

impl AuthenticationHeaders {
    /// Creates a header pair.
    #[must_use]
    pub fn new(signature: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Extracts the pair, returning `None` when either header is absent.
    #[must_use]
    pub fn from_headers(headers: &InboundHeaders) -> Option<Self> {
        let signature = headers.get(SIGNATURE_HEADER)?;
        let timestamp = headers.get(TIMESTAMP_HEADER)?;
        Some(Self::new(signature, timestamp))
    }

    /// Returns the hex-encoded signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Returns the timestamp.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
