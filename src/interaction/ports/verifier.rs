//! Signature verification primitive.

/// Detached-signature check over raw bytes.
///
/// Implementations return `false` for any input they cannot interpret,
/// including keys or signatures of the wrong length. They never panic.
#[cfg_attr(test, mockall::automock)]
pub trait SignatureVerifier: Send + Sync {
    /// Returns `true` when `signature` is valid for `message` under
    /// `public_key`.
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&[u8], &[u8], &[u8]) -> bool + Send + Sync,
{
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        self(message, signature, public_key)
    }
}
