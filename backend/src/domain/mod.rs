//! Domain core: entities, policy, query rules, and operation facades.

mod attendance;
mod attendances_service;
mod auth;
mod error;
mod event;
mod events_service;
mod integrity;
mod login_service;
pub mod policy;
pub mod ports;
pub mod query;
mod role;
mod user;
mod users_service;

pub use attendance::{Attendance, AttendanceDraft, AttendanceId, AttendanceWithRefs};
pub use attendances_service::AttendancesService;
pub use auth::{Claims, LoginCredentials, LoginValidationError};
pub use error::{Error, ErrorCode};
pub use event::{Event, EventAttendee, EventDraft, EventId, EventWithAttendees};
pub use events_service::EventsService;
pub use integrity::ReferentialIntegrity;
pub use login_service::{IssuedToken, LoginService};
pub use role::{ParseRoleError, Role};
pub use user::{User, UserDraft, UserId};
pub use users_service::UsersService;
