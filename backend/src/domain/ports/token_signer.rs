//! Driven port for bearer-token signing and verification.
//!
//! Token mechanics are a black-box capability behind this trait: the
//! domain only cares that claims go in and verified claims come out.

use crate::domain::Claims;

/// Failures surfaced by token signer adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("claims serialization failed: {0}")]
    Serialization(String),
}

/// Issue and verify opaque bearer tokens carrying [`Claims`].
pub trait TokenSigner: Send + Sync {
    /// Encode and sign the claims into an opaque token string.
    fn issue(&self, claims: &Claims) -> Result<String, TokenError>;

    /// Verify signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}
