//! Driven port for attendance persistence.

use async_trait::async_trait;

use crate::domain::ports::StoreError;
use crate::domain::{AttendanceDraft, AttendanceId, AttendanceWithRefs};

/// Store operations over the attendance collection.
///
/// Inserts and updates fail with [`StoreError::MissingReference`] when
/// either foreign key points at a missing row, leaving the store
/// untouched; an update failure leaves the original record unchanged.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Unpaged snapshot of all attendance rows joined with both
    /// referenced entities.
    async fn list_attendances(&self) -> Result<Vec<AttendanceWithRefs>, StoreError>;

    /// Look up one attendance row by id.
    async fn find_attendance(
        &self,
        id: AttendanceId,
    ) -> Result<Option<AttendanceWithRefs>, StoreError>;

    /// Persist a new attendance row and return the joined view.
    async fn insert_attendance(
        &self,
        draft: AttendanceDraft,
    ) -> Result<AttendanceWithRefs, StoreError>;

    /// Replace an existing row's fields; `None` when the id is absent.
    async fn update_attendance(
        &self,
        id: AttendanceId,
        draft: AttendanceDraft,
    ) -> Result<Option<AttendanceWithRefs>, StoreError>;

    /// Delete the row; `false` when the id was absent. No other entity
    /// is affected.
    async fn delete_attendance(&self, id: AttendanceId) -> Result<bool, StoreError>;
}
