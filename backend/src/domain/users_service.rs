//! User operations facade.
//!
//! Every operation checks the authorization policy first, so a denied
//! request never reaches the store.

use std::sync::Arc;

use pagination::{PagedResult, paginate};
use tracing::info;

use crate::domain::policy::{self, EntityKind, Operation};
use crate::domain::ports::UserStore;
use crate::domain::query::{self, ListParams, UserSortKey};
use crate::domain::{Claims, Error, User, UserDraft, UserId};

/// CRUD facade over the user collection.
#[derive(Clone)]
pub struct UsersService {
    store: Arc<dyn UserStore>,
}

impl UsersService {
    /// Build the facade over a user store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Paged, sorted user listing.
    pub async fn list(
        &self,
        actor: &Claims,
        params: ListParams<UserSortKey>,
    ) -> Result<PagedResult<User>, Error> {
        policy::authorize(actor.role, EntityKind::User, Operation::List)?;
        let mut users = self.store.list_users().await?;
        query::sort_users(&mut users, params.sort, params.descending);
        Ok(paginate(users, params.request))
    }

    /// Fetch one user or signal `NotFound`.
    pub async fn get(&self, actor: &Claims, id: UserId) -> Result<User, Error> {
        policy::authorize(actor.role, EntityKind::User, Operation::Get)?;
        self.store
            .find_user(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} does not exist")))
    }

    /// Register a new user.
    pub async fn create(&self, actor: &Claims, draft: UserDraft) -> Result<User, Error> {
        policy::authorize(actor.role, EntityKind::User, Operation::Create)?;
        let user = self.store.insert_user(draft).await?;
        info!(user_id = user.id.value(), username = %user.username, "user created");
        Ok(user)
    }

    /// Replace an existing user's fields.
    pub async fn update(
        &self,
        actor: &Claims,
        id: UserId,
        draft: UserDraft,
    ) -> Result<User, Error> {
        policy::authorize(actor.role, EntityKind::User, Operation::Update)?;
        let user = self
            .store
            .update_user(id, draft)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} does not exist")))?;
        info!(user_id = user.id.value(), "user updated");
        Ok(user)
    }

    /// Cascade-delete a user. Deleting an already-deleted id signals
    /// `NotFound` rather than succeeding silently.
    pub async fn delete(&self, actor: &Claims, id: UserId) -> Result<(), Error> {
        policy::authorize(actor.role, EntityKind::User, Operation::Delete)?;
        if !self.store.delete_user(id).await? {
            return Err(Error::not_found(format!("user {id} does not exist")));
        }
        info!(user_id = id.value(), "user deleted with attendance cascade");
        Ok(())
    }
}
