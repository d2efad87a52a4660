//! HTTP inbound adapter exposing the versioned REST surface.

pub mod attendances;
pub mod auth;
pub mod error;
pub mod events;
pub mod headers;
pub mod query;
pub mod representations;
pub mod routes;
pub mod state;
pub mod users;

pub use error::ApiResult;
pub use representations::ApiVersion;
