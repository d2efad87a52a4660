//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they
//! only depend on the domain facades and remain testable without I/O.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::ports::{AttendanceStore, EventStore, TokenSigner, UserStore};
use crate::domain::{
    AttendancesService, EventsService, LoginService, ReferentialIntegrity, UsersService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: LoginService,
    pub users: UsersService,
    pub events: EventsService,
    pub attendances: AttendancesService,
    pub signer: Arc<dyn TokenSigner>,
}

impl HttpState {
    /// Wire the full facade stack over one store implementing all three
    /// entity ports.
    pub fn for_store<S>(store: Arc<S>, signer: Arc<dyn TokenSigner>, token_ttl: Duration) -> Self
    where
        S: UserStore + EventStore + AttendanceStore + 'static,
    {
        let users: Arc<dyn UserStore> = store.clone();
        let events: Arc<dyn EventStore> = store.clone();
        let attendances: Arc<dyn AttendanceStore> = store;
        let integrity = ReferentialIntegrity::new(events.clone(), users.clone());
        Self {
            login: LoginService::new(users.clone(), signer.clone(), token_ttl),
            users: UsersService::new(users),
            events: EventsService::new(events),
            attendances: AttendancesService::new(attendances, integrity),
            signer,
        }
    }
}
