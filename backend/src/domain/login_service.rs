//! Login facade: credential verification and token issue.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use crate::domain::ports::{TokenSigner, UserStore};
use crate::domain::{Claims, Error, LoginCredentials};

/// Issued bearer token returned to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
}

/// Authenticates credentials against the user store and issues bearer
/// tokens carrying the role claim the policy keys on.
#[derive(Clone)]
pub struct LoginService {
    users: Arc<dyn UserStore>,
    signer: Arc<dyn TokenSigner>,
    token_ttl: Duration,
}

impl LoginService {
    /// Build the facade with the given token lifetime.
    pub fn new(users: Arc<dyn UserStore>, signer: Arc<dyn TokenSigner>, token_ttl: Duration) -> Self {
        Self {
            users,
            signer,
            token_ttl,
        }
    }

    /// Verify credentials and issue a token.
    ///
    /// Credential comparison is exact-match on the stored value;
    /// password hashing design is out of scope for this service.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let user = self
            .users
            .find_user_by_username(credentials.username())
            .await?
            .filter(|user| user.password == credentials.password())
            .ok_or_else(|| Error::unauthenticated("invalid username or password"))?;

        let claims = Claims {
            subject: user.id,
            username: user.username.clone(),
            role: user.role,
            expires_at: Utc::now() + self.token_ttl,
        };
        let token = self
            .signer
            .issue(&claims)
            .map_err(|err| Error::internal(format!("token issue failed: {err}")))?;

        info!(username = %user.username, role = %user.role, "user logged in");
        Ok(IssuedToken { token })
    }
}
