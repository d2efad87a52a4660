//! Attendance operations facade.
//!
//! Mutations run the referential integrity check before touching the
//! attendance collection, so an invalid reference creates and changes
//! nothing.

use std::sync::Arc;

use pagination::{PagedResult, paginate};
use tracing::info;

use crate::domain::policy::{self, EntityKind, Operation};
use crate::domain::ports::AttendanceStore;
use crate::domain::query::{self, AttendanceSortKey, ListParams};
use crate::domain::{
    AttendanceDraft, AttendanceId, AttendanceWithRefs, Claims, Error, ReferentialIntegrity,
};

/// CRUD facade over the attendance collection.
#[derive(Clone)]
pub struct AttendancesService {
    store: Arc<dyn AttendanceStore>,
    integrity: ReferentialIntegrity,
}

impl AttendancesService {
    /// Build the facade over an attendance store and the integrity
    /// checker for its references.
    pub fn new(store: Arc<dyn AttendanceStore>, integrity: ReferentialIntegrity) -> Self {
        Self { store, integrity }
    }

    /// Paged, sorted attendance listing with both references embedded.
    pub async fn list(
        &self,
        actor: &Claims,
        params: ListParams<AttendanceSortKey>,
    ) -> Result<PagedResult<AttendanceWithRefs>, Error> {
        policy::authorize(actor.role, EntityKind::Attendance, Operation::List)?;
        let mut rows = self.store.list_attendances().await?;
        query::sort_attendances(&mut rows, params.sort, params.descending);
        Ok(paginate(rows, params.request))
    }

    /// Fetch one attendance row or signal `NotFound`.
    pub async fn get(&self, actor: &Claims, id: AttendanceId) -> Result<AttendanceWithRefs, Error> {
        policy::authorize(actor.role, EntityKind::Attendance, Operation::Get)?;
        self.store
            .find_attendance(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("attendance {id} does not exist")))
    }

    /// Create an attendance row once both references are proven to
    /// exist.
    pub async fn create(
        &self,
        actor: &Claims,
        draft: AttendanceDraft,
    ) -> Result<AttendanceWithRefs, Error> {
        policy::authorize(actor.role, EntityKind::Attendance, Operation::Create)?;
        self.integrity
            .ensure_references(draft.event_id, draft.user_id)
            .await?;
        let row = self.store.insert_attendance(draft).await?;
        info!(
            attendance_id = row.attendance.id.value(),
            event_id = draft.event_id.value(),
            user_id = draft.user_id.value(),
            "attendance created"
        );
        Ok(row)
    }

    /// Replace an existing row, re-validating both references first.
    /// On any failure the original record is left unchanged.
    pub async fn update(
        &self,
        actor: &Claims,
        id: AttendanceId,
        draft: AttendanceDraft,
    ) -> Result<AttendanceWithRefs, Error> {
        policy::authorize(actor.role, EntityKind::Attendance, Operation::Update)?;
        if self.store.find_attendance(id).await?.is_none() {
            return Err(Error::not_found(format!("attendance {id} does not exist")));
        }
        self.integrity
            .ensure_references(draft.event_id, draft.user_id)
            .await?;
        let row = self
            .store
            .update_attendance(id, draft)
            .await?
            .ok_or_else(|| Error::not_found(format!("attendance {id} does not exist")))?;
        info!(attendance_id = id.value(), "attendance updated");
        Ok(row)
    }

    /// Delete one attendance row; no other entity is affected.
    pub async fn delete(&self, actor: &Claims, id: AttendanceId) -> Result<(), Error> {
        policy::authorize(actor.role, EntityKind::Attendance, Operation::Delete)?;
        if !self.store.delete_attendance(id).await? {
            return Err(Error::not_found(format!("attendance {id} does not exist")));
        }
        info!(attendance_id = id.value(), "attendance deleted");
        Ok(())
    }
}
