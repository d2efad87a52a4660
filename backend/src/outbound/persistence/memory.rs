//! In-process transactional store adapter.
//!
//! One `RwLock` guards all three collections, so every multi-step
//! mutation (cascade delete, foreign-key-checked insert) commits or
//! fails as a single unit; readers observe either the state before or
//! after, never between. Reads join related rows under the same guard,
//! giving list queries one consistent snapshot.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{AttendanceStore, EventStore, StoreError, UserStore};
use crate::domain::{
    Attendance, AttendanceDraft, AttendanceId, AttendanceWithRefs, Event, EventAttendee,
    EventDraft, EventId, EventWithAttendees, User, UserDraft, UserId,
};

#[derive(Debug, Default)]
struct Collections {
    users: BTreeMap<i32, User>,
    events: BTreeMap<i32, Event>,
    attendances: BTreeMap<i32, Attendance>,
    next_user_id: i32,
    next_event_id: i32,
    next_attendance_id: i32,
}

impl Collections {
    fn event_with_attendees(&self, event: &Event) -> EventWithAttendees {
        let attendees = self
            .attendances
            .values()
            .filter(|a| a.event_id == event.id)
            .filter_map(|a| {
                self.users.get(&a.user_id.value()).map(|user| EventAttendee {
                    attendance: *a,
                    user: user.clone(),
                })
            })
            .collect();
        EventWithAttendees {
            event: event.clone(),
            attendees,
        }
    }

    fn attendance_with_refs(&self, attendance: &Attendance) -> Option<AttendanceWithRefs> {
        let event = self.events.get(&attendance.event_id.value())?;
        let user = self.users.get(&attendance.user_id.value())?;
        Some(AttendanceWithRefs {
            attendance: *attendance,
            event: event.clone(),
            user: user.clone(),
        })
    }

    fn check_references(&self, draft: &AttendanceDraft) -> Result<(), StoreError> {
        if !self.events.contains_key(&draft.event_id.value()) {
            return Err(StoreError::MissingReference {
                kind: "event",
                id: draft.event_id.value(),
            });
        }
        if !self.users.contains_key(&draft.user_id.value()) {
            return Err(StoreError::MissingReference {
                kind: "user",
                id: draft.user_id.value(),
            });
        }
        Ok(())
    }
}

/// Store adapter backing all three entity ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Empty store; identifiers start at 1.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id.value()).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_user(&self, draft: UserDraft) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_user_id += 1;
        let user = User {
            id: UserId::new(inner.next_user_id),
            username: draft.username,
            email: draft.email,
            password: draft.password.to_string(),
            role: draft.role,
        };
        inner.users.insert(user.id.value(), user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.get_mut(&id.value()) else {
            return Ok(None);
        };
        user.username = draft.username;
        user.email = draft.email;
        user.password = draft.password.to_string();
        user.role = draft.role;
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.remove(&id.value()).is_none() {
            return Ok(false);
        }
        inner.attendances.retain(|_, a| a.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list_events(&self) -> Result<Vec<EventWithAttendees>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .events
            .values()
            .map(|event| inner.event_with_attendees(event))
            .collect())
    }

    async fn find_event(&self, id: EventId) -> Result<Option<EventWithAttendees>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .events
            .get(&id.value())
            .map(|event| inner.event_with_attendees(event)))
    }

    async fn insert_event(&self, draft: EventDraft) -> Result<EventWithAttendees, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_event_id += 1;
        let event = Event {
            id: EventId::new(inner.next_event_id),
            name: draft.name,
            location: draft.location,
            date: draft.date,
        };
        inner.events.insert(event.id.value(), event.clone());
        Ok(inner.event_with_attendees(&event))
    }

    async fn update_event(
        &self,
        id: EventId,
        draft: EventDraft,
    ) -> Result<Option<EventWithAttendees>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(event) = inner.events.get_mut(&id.value()) else {
            return Ok(None);
        };
        event.name = draft.name;
        event.location = draft.location;
        event.date = draft.date;
        let event = event.clone();
        Ok(Some(inner.event_with_attendees(&event)))
    }

    async fn delete_event(&self, id: EventId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.events.remove(&id.value()).is_none() {
            return Ok(false);
        }
        inner.attendances.retain(|_, a| a.event_id != id);
        Ok(true)
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn list_attendances(&self) -> Result<Vec<AttendanceWithRefs>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .attendances
            .values()
            .filter_map(|a| inner.attendance_with_refs(a))
            .collect())
    }

    async fn find_attendance(
        &self,
        id: AttendanceId,
    ) -> Result<Option<AttendanceWithRefs>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .attendances
            .get(&id.value())
            .and_then(|a| inner.attendance_with_refs(a)))
    }

    async fn insert_attendance(
        &self,
        draft: AttendanceDraft,
    ) -> Result<AttendanceWithRefs, StoreError> {
        let mut inner = self.inner.write().await;
        inner.check_references(&draft)?;
        inner.next_attendance_id += 1;
        let attendance = Attendance {
            id: AttendanceId::new(inner.next_attendance_id),
            event_id: draft.event_id,
            user_id: draft.user_id,
            is_attending: draft.is_attending,
        };
        inner.attendances.insert(attendance.id.value(), attendance);
        inner
            .attendance_with_refs(&attendance)
            .ok_or(StoreError::MissingReference {
                kind: "event",
                id: draft.event_id.value(),
            })
    }

    async fn update_attendance(
        &self,
        id: AttendanceId,
        draft: AttendanceDraft,
    ) -> Result<Option<AttendanceWithRefs>, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.attendances.contains_key(&id.value()) {
            return Ok(None);
        }
        // Reference check precedes the write so a failed update leaves
        // the original row untouched.
        inner.check_references(&draft)?;
        let Some(attendance) = inner.attendances.get_mut(&id.value()) else {
            return Ok(None);
        };
        attendance.event_id = draft.event_id;
        attendance.user_id = draft.user_id;
        attendance.is_attending = draft.is_attending;
        let attendance = *attendance;
        Ok(inner.attendance_with_refs(&attendance))
    }

    async fn delete_attendance(&self, id: AttendanceId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.attendances.remove(&id.value()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user_draft(name: &str) -> UserDraft {
        UserDraft::try_new(name, &format!("{name}@example.org"), "pw", "User")
            .expect("valid user draft")
    }

    fn event_draft(name: &str) -> EventDraft {
        EventDraft::try_new(
            name,
            "HQ",
            "2025-06-01T00:00:00Z".parse().expect("fixture date"),
        )
        .expect("valid event draft")
    }

    #[rstest]
    #[tokio::test]
    async fn assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.insert_user(user_draft("a")).await.expect("insert");
        let second = store.insert_user(user_draft("b")).await.expect("insert");
        assert_eq!(first.id.value(), 1);
        assert_eq!(second.id.value(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_attendance_with_missing_event() {
        let store = MemoryStore::new();
        let user = store.insert_user(user_draft("a")).await.expect("insert");
        let err = store
            .insert_attendance(AttendanceDraft {
                event_id: EventId::new(99),
                user_id: user.id,
                is_attending: true,
            })
            .await
            .expect_err("missing event must fail");
        assert_eq!(
            err,
            StoreError::MissingReference {
                kind: "event",
                id: 99
            }
        );
        assert!(store.list_attendances().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn failed_update_leaves_row_unchanged() {
        let store = MemoryStore::new();
        let user = store.insert_user(user_draft("a")).await.expect("insert");
        let event = store.insert_event(event_draft("Launch")).await.expect("insert");
        let row = store
            .insert_attendance(AttendanceDraft {
                event_id: event.event.id,
                user_id: user.id,
                is_attending: true,
            })
            .await
            .expect("insert attendance");

        let err = store
            .update_attendance(
                row.attendance.id,
                AttendanceDraft {
                    event_id: EventId::new(42),
                    user_id: user.id,
                    is_attending: false,
                },
            )
            .await
            .expect_err("dangling event must fail");
        assert!(matches!(err, StoreError::MissingReference { kind: "event", .. }));

        let unchanged = store
            .find_attendance(row.attendance.id)
            .await
            .expect("find")
            .expect("row still present");
        assert_eq!(unchanged.attendance, row.attendance);
    }

    #[rstest]
    #[tokio::test]
    async fn event_cascade_removes_exactly_its_rows() {
        let store = MemoryStore::new();
        let user = store.insert_user(user_draft("a")).await.expect("insert");
        let doomed = store.insert_event(event_draft("Doomed")).await.expect("insert");
        let kept = store.insert_event(event_draft("Kept")).await.expect("insert");
        for event_id in [doomed.event.id, doomed.event.id, kept.event.id] {
            store
                .insert_attendance(AttendanceDraft {
                    event_id,
                    user_id: user.id,
                    is_attending: true,
                })
                .await
                .expect("insert attendance");
        }

        assert!(store.delete_event(doomed.event.id).await.expect("delete"));

        let remaining = store.list_attendances().await.expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].event.id, kept.event.id);
        assert!(store.find_event(doomed.event.id).await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn user_cascade_removes_their_rows() {
        let store = MemoryStore::new();
        let doomed = store.insert_user(user_draft("doomed")).await.expect("insert");
        let kept = store.insert_user(user_draft("kept")).await.expect("insert");
        let event = store.insert_event(event_draft("Launch")).await.expect("insert");
        for user_id in [doomed.id, kept.id] {
            store
                .insert_attendance(AttendanceDraft {
                    event_id: event.event.id,
                    user_id,
                    is_attending: false,
                })
                .await
                .expect("insert attendance");
        }

        assert!(store.delete_user(doomed.id).await.expect("delete"));

        let remaining = store.list_attendances().await.expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user.id, kept.id);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_missing_rows_reports_false() {
        let store = MemoryStore::new();
        assert!(!store.delete_user(UserId::new(7)).await.expect("delete"));
        assert!(!store.delete_event(EventId::new(7)).await.expect("delete"));
        assert!(
            !store
                .delete_attendance(AttendanceId::new(7))
                .await
                .expect("delete")
        );
    }
}
