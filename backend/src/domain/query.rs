//! Typed sort keys and deterministic ordering for list queries.
//!
//! Sort keys are enumerated per entity kind and parsed once at the
//! boundary: an unrecognised or absent `sortBy` string is the default
//! key by rule, not by accident. Every comparator breaks ties on the
//! identifier ascending, so repeated queries over unchanged data page
//! identically.

use std::cmp::Ordering;

use pagination::PageRequest;

use crate::domain::{AttendanceWithRefs, Event, EventWithAttendees, User};

/// Boundary-validated list parameters shared by every list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams<K> {
    pub request: PageRequest,
    pub sort: K,
    pub descending: bool,
}

impl<K: Default> Default for ListParams<K> {
    fn default() -> Self {
        Self {
            request: PageRequest::default(),
            sort: K::default(),
            descending: false,
        }
    }
}

/// Sortable fields of the user collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortKey {
    #[default]
    Id,
    Username,
    Email,
}

impl UserSortKey {
    /// Parse a raw `sortBy` value; anything unrecognised is the
    /// default key.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("username") => UserSortKey::Username,
            Some("email") => UserSortKey::Email,
            _ => UserSortKey::Id,
        }
    }
}

/// Sortable fields of the event collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSortKey {
    #[default]
    Id,
    Name,
    Location,
    Date,
}

impl EventSortKey {
    /// Parse a raw `sortBy` value; anything unrecognised is the
    /// default key.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("name") => EventSortKey::Name,
            Some("location") => EventSortKey::Location,
            Some("date") => EventSortKey::Date,
            _ => EventSortKey::Id,
        }
    }
}

/// Sortable fields of the attendance collection.
///
/// `Event` and `User` are cross-entity keys: they order by the joined
/// event name and username respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttendanceSortKey {
    #[default]
    Id,
    Event,
    User,
    IsAttending,
}

impl AttendanceSortKey {
    /// Parse a raw `sortBy` value; anything unrecognised is the
    /// default key.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("event") => AttendanceSortKey::Event,
            Some("user") => AttendanceSortKey::User,
            Some("isattending") => AttendanceSortKey::IsAttending,
            _ => AttendanceSortKey::Id,
        }
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Order users by `key`, ties broken by id ascending.
pub fn sort_users(users: &mut [User], key: UserSortKey, descending: bool) {
    users.sort_by(|a, b| {
        let primary = match key {
            UserSortKey::Id => a.id.cmp(&b.id),
            UserSortKey::Username => a.username.cmp(&b.username),
            UserSortKey::Email => a.email.cmp(&b.email),
        };
        directed(primary, descending).then_with(|| a.id.cmp(&b.id))
    });
}

/// Order events by `key`, ties broken by id ascending.
pub fn sort_events(events: &mut [EventWithAttendees], key: EventSortKey, descending: bool) {
    events.sort_by(|a, b| {
        let (a, b): (&Event, &Event) = (&a.event, &b.event);
        let primary = match key {
            EventSortKey::Id => a.id.cmp(&b.id),
            EventSortKey::Name => a.name.cmp(&b.name),
            EventSortKey::Location => a.location.cmp(&b.location),
            EventSortKey::Date => a.date.cmp(&b.date),
        };
        directed(primary, descending).then_with(|| a.id.cmp(&b.id))
    });
}

/// Order joined attendance rows by `key`, ties broken by id ascending.
pub fn sort_attendances(
    rows: &mut [AttendanceWithRefs],
    key: AttendanceSortKey,
    descending: bool,
) {
    rows.sort_by(|a, b| {
        let primary = match key {
            AttendanceSortKey::Id => a.attendance.id.cmp(&b.attendance.id),
            AttendanceSortKey::Event => a.event.name.cmp(&b.event.name),
            AttendanceSortKey::User => a.user.username.cmp(&b.user.username),
            AttendanceSortKey::IsAttending => {
                a.attendance.is_attending.cmp(&b.attendance.is_attending)
            }
        };
        directed(primary, descending).then_with(|| a.attendance.id.cmp(&b.attendance.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserId};
    use rstest::rstest;

    fn user(id: i32, username: &str, email: &str) -> User {
        User {
            id: UserId::new(id),
            username: username.to_owned(),
            email: email.to_owned(),
            password: "pw".to_owned(),
            role: Role::User,
        }
    }

    fn ids(users: &[User]) -> Vec<i32> {
        users.iter().map(|u| u.id.value()).collect()
    }

    #[rstest]
    #[case(None)]
    #[case(Some("nonsense"))]
    #[case(Some("ID"))]
    fn unknown_or_absent_sort_key_is_default(#[case] raw: Option<&str>) {
        assert_eq!(UserSortKey::parse(raw), UserSortKey::Id);
        assert_eq!(EventSortKey::parse(raw), EventSortKey::Id);
        assert_eq!(AttendanceSortKey::parse(raw), AttendanceSortKey::Id);
    }

    #[rstest]
    fn parse_is_case_insensitive() {
        assert_eq!(UserSortKey::parse(Some("Username")), UserSortKey::Username);
        assert_eq!(EventSortKey::parse(Some("DATE")), EventSortKey::Date);
        assert_eq!(
            AttendanceSortKey::parse(Some("IsAttending")),
            AttendanceSortKey::IsAttending
        );
    }

    #[rstest]
    fn unknown_key_sorts_like_default_key() {
        let mut by_unknown = vec![user(3, "c", "c@x"), user(1, "a", "a@x"), user(2, "b", "b@x")];
        let mut by_default = by_unknown.clone();
        sort_users(&mut by_unknown, UserSortKey::parse(Some("bogus")), false);
        sort_users(&mut by_default, UserSortKey::Id, false);
        assert_eq!(ids(&by_unknown), ids(&by_default));
    }

    #[rstest]
    fn ties_break_by_id_ascending_even_descending() {
        let mut users = vec![
            user(4, "dup", "d@x"),
            user(2, "dup", "b@x"),
            user(3, "solo", "c@x"),
        ];
        sort_users(&mut users, UserSortKey::Username, true);
        assert_eq!(ids(&users), vec![3, 2, 4]);
    }

    #[rstest]
    fn sorting_is_stable_across_repeated_calls() {
        let mut first = vec![user(2, "b", "b@x"), user(1, "a", "a@x"), user(3, "a", "z@x")];
        let mut second = first.clone();
        sort_users(&mut first, UserSortKey::Username, false);
        sort_users(&mut second, UserSortKey::Username, false);
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(ids(&first), vec![1, 3, 2]);
    }
}
