//! Domain ports for the hexagonal boundary.
//!
//! Services depend on these traits only; the outbound layer provides
//! the store and token-signer adapters, and tests can substitute
//! deterministic doubles without any I/O.

mod attendance_store;
mod event_store;
mod token_signer;
mod user_store;

pub use attendance_store::AttendanceStore;
pub use event_store::EventStore;
pub use token_signer::{TokenError, TokenSigner};
pub use user_store::UserStore;

/// Failures surfaced by store adapters.
///
/// `MissingReference` is the structural foreign-key check: an adapter
/// must refuse to persist an attendance row whose event or user is
/// absent, even if a caller skipped the integrity service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("referenced {kind} {id} does not exist")]
    MissingReference { kind: &'static str, id: i32 },
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

impl From<StoreError> for crate::domain::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingReference { kind, id } => {
                crate::domain::Error::reference_not_found(err.to_string())
                    .with_details(serde_json::json!({ "entity": kind, "id": id }))
            }
            StoreError::Unavailable { message } => {
                crate::domain::Error::internal(format!("store unavailable: {message}"))
            }
        }
    }
}
