//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: in-process transactional store behind the three
//!   entity store ports
//! - **token**: HMAC-SHA256 signer behind the token port
//!
//! Adapters translate between domain types and infrastructure detail;
//! they contain no business rules.

pub mod persistence;
pub mod token;
