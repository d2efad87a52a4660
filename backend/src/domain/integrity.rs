//! Referential integrity checks for the attendance join entity.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{EventStore, UserStore};
use crate::domain::{Error, EventId, UserId};

/// Validates that both sides of an attendance reference exist before a
/// mutation commits.
///
/// This runs ahead of the store so an invalid payload creates nothing;
/// the store adapter repeats the check structurally, which closes the
/// window where a referenced row disappears between check and commit.
#[derive(Clone)]
pub struct ReferentialIntegrity {
    events: Arc<dyn EventStore>,
    users: Arc<dyn UserStore>,
}

impl ReferentialIntegrity {
    /// Build the checker over the two referenced collections.
    pub fn new(events: Arc<dyn EventStore>, users: Arc<dyn UserStore>) -> Self {
        Self { events, users }
    }

    /// Fail with [`ErrorCode::ReferenceNotFound`] unless both the event
    /// and the user exist.
    ///
    /// [`ErrorCode::ReferenceNotFound`]: crate::domain::ErrorCode::ReferenceNotFound
    pub async fn ensure_references(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<(), Error> {
        if self.events.find_event(event_id).await?.is_none() {
            return Err(Error::reference_not_found(format!(
                "event {event_id} does not exist"
            ))
            .with_details(json!({ "entity": "event", "id": event_id.value() })));
        }
        if self.users.find_user(user_id).await?.is_none() {
            return Err(Error::reference_not_found(format!(
                "user {user_id} does not exist"
            ))
            .with_details(json!({ "entity": "user", "id": user_id.value() })));
        }
        Ok(())
    }
}
