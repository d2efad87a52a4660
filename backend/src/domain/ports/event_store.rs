//! Driven port for event persistence.

use async_trait::async_trait;

use crate::domain::ports::StoreError;
use crate::domain::{EventDraft, EventId, EventWithAttendees};

/// Store operations over the event collection.
///
/// Reads return the joined view (event plus attendance rows with their
/// users) so representations never issue follow-up lookups; only the
/// related rows are loaded, nothing else.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Unpaged snapshot of all events with their attendees.
    async fn list_events(&self) -> Result<Vec<EventWithAttendees>, StoreError>;

    /// Look up one event by id.
    async fn find_event(&self, id: EventId) -> Result<Option<EventWithAttendees>, StoreError>;

    /// Persist a new event and return it with its assigned id.
    async fn insert_event(&self, draft: EventDraft) -> Result<EventWithAttendees, StoreError>;

    /// Replace an existing event's fields; `None` when the id is absent.
    async fn update_event(
        &self,
        id: EventId,
        draft: EventDraft,
    ) -> Result<Option<EventWithAttendees>, StoreError>;

    /// Cascade-delete the event; `false` when the id was absent.
    async fn delete_event(&self, id: EventId) -> Result<bool, StoreError>;
}
