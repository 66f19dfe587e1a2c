//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the keys of its
//! concern:
//! - `AuthSession` - The logged-in dashboard user
//! - `CsrfSession` - CSRF state of a pending OAuth login

use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    util::parse::parse_u64_from_string,
};

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_USER_NAME: &str = "auth:name";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the logged-in user's Discord ID and display name.
    ///
    /// The session ID is cycled first so a pre-login session cannot be fixated.
    ///
    /// # Returns
    /// - `Ok(())` - User stored
    /// - `Err(AppError::SessionErr(_))` - Failed to write the session
    pub async fn set_user(&self, user_id: u64, name: &str) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_AUTH_USER_ID, user_id.to_string())
            .await?;
        self.session
            .insert(SESSION_AUTH_USER_NAME, name.to_string())
            .await?;
        Ok(())
    }

    /// Retrieves the logged-in user's Discord ID.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - A user is logged in
    /// - `Ok(None)` - Not logged in
    /// - `Err(AppError)` - The session could not be read or holds a malformed ID
    pub async fn get_user_id(&self) -> Result<Option<u64>, AppError> {
        let Some(user_id) = self.session.get::<String>(SESSION_AUTH_USER_ID).await? else {
            return Ok(None);
        };

        Ok(Some(parse_u64_from_string(user_id)?))
    }

    pub async fn get_user_name(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.get::<String>(SESSION_AUTH_USER_NAME).await?)
    }

    /// Clears all data from the session. Used on logout.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection session management.
///
/// A token is stored when the login redirect is issued and consumed by the callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token, so each token validates one callback only.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }

    /// Consumes the stored token and compares it with the callback state.
    ///
    /// # Returns
    /// - `Ok(())` - The state matches the stored token
    /// - `Err(AppError::AuthErr(CsrfValidationFailed))` - No token stored or a mismatch
    pub async fn validate(&self, state: &str) -> Result<(), AppError> {
        match self.take_token().await? {
            Some(token) if token == state => Ok(()),
            _ => Err(AuthError::CsrfValidationFailed.into()),
        }
    }
}
