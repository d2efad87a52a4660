//! Token signing adapters.

mod hmac_signer;

pub use hmac_signer::HmacTokenSigner;
