//! HMAC-SHA256 token signer.
//!
//! Tokens are `base64url(claims JSON) + "." + hex(HMAC-SHA256)` over the
//! encoded claims. Verification checks the signature before reading any
//! claim, then rejects expired tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::Claims;
use crate::domain::ports::{TokenError, TokenSigner};

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies bearer tokens with a shared secret key.
pub struct HmacTokenSigner {
    key: Vec<u8>,
}

impl HmacTokenSigner {
    /// Build a signer over the given key material.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length.
        HmacSha256::new_from_slice(&self.key).expect("HMAC key of any length is valid")
    }
}

impl TokenSigner for HmacTokenSigner {
    fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let payload = serde_json::to_vec(claims)
            .map_err(|err| TokenError::Serialization(err.to_string()))?;
        let encoded = URL_SAFE_NO_PAD.encode(payload);
        let mut mac = self.mac();
        mac.update(encoded.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        Ok(format!("{encoded}.{signature}"))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let (encoded, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature = hex::decode(signature).map_err(|_| TokenError::Malformed)?;
        let mut mac = self.mac();
        mac.update(encoded.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;
        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;
        if !claims.is_valid_at(Utc::now()) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}
