//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::ports::StoreError;
use crate::domain::{User, UserDraft, UserId};

/// Store operations over the user collection.
///
/// `delete` cascades: the adapter removes every attendance row
/// referencing the user and the user itself as one atomic unit, and
/// reports whether the user existed.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Unpaged snapshot of all users.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Look up one user by id.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Look up one user by exact username.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Persist a new user and return it with its assigned id.
    async fn insert_user(&self, draft: UserDraft) -> Result<User, StoreError>;

    /// Replace an existing user's fields; `None` when the id is absent.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<Option<User>, StoreError>;

    /// Cascade-delete the user; `false` when the id was absent.
    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError>;
}
