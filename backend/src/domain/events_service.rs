//! Event operations facade.

use std::sync::Arc;

use pagination::{PagedResult, paginate};
use tracing::info;

use crate::domain::policy::{self, EntityKind, Operation};
use crate::domain::ports::EventStore;
use crate::domain::query::{self, EventSortKey, ListParams};
use crate::domain::{Claims, Error, EventDraft, EventId, EventWithAttendees};

/// CRUD facade over the event collection.
#[derive(Clone)]
pub struct EventsService {
    store: Arc<dyn EventStore>,
}

impl EventsService {
    /// Build the facade over an event store.
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Paged, sorted event listing with attendees embedded.
    pub async fn list(
        &self,
        actor: &Claims,
        params: ListParams<EventSortKey>,
    ) -> Result<PagedResult<EventWithAttendees>, Error> {
        policy::authorize(actor.role, EntityKind::Event, Operation::List)?;
        let mut events = self.store.list_events().await?;
        query::sort_events(&mut events, params.sort, params.descending);
        Ok(paginate(events, params.request))
    }

    /// Fetch one event or signal `NotFound`.
    pub async fn get(&self, actor: &Claims, id: EventId) -> Result<EventWithAttendees, Error> {
        policy::authorize(actor.role, EntityKind::Event, Operation::Get)?;
        self.store
            .find_event(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("event {id} does not exist")))
    }

    /// Create a new event. The fresh event has no attendees.
    pub async fn create(
        &self,
        actor: &Claims,
        draft: EventDraft,
    ) -> Result<EventWithAttendees, Error> {
        policy::authorize(actor.role, EntityKind::Event, Operation::Create)?;
        let event = self.store.insert_event(draft).await?;
        info!(event_id = event.event.id.value(), name = %event.event.name, "event created");
        Ok(event)
    }

    /// Replace an existing event's fields.
    pub async fn update(
        &self,
        actor: &Claims,
        id: EventId,
        draft: EventDraft,
    ) -> Result<EventWithAttendees, Error> {
        policy::authorize(actor.role, EntityKind::Event, Operation::Update)?;
        let event = self
            .store
            .update_event(id, draft)
            .await?
            .ok_or_else(|| Error::not_found(format!("event {id} does not exist")))?;
        info!(event_id = id.value(), "event updated");
        Ok(event)
    }

    /// Cascade-delete an event together with its attendance rows.
    pub async fn delete(&self, actor: &Claims, id: EventId) -> Result<(), Error> {
        policy::authorize(actor.role, EntityKind::Event, Operation::Delete)?;
        if !self.store.delete_event(id).await? {
            return Err(Error::not_found(format!("event {id} does not exist")));
        }
        info!(event_id = id.value(), "event deleted with attendance cascade");
        Ok(())
    }
}
