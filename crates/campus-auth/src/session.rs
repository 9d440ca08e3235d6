//! Session records.

use campus_market::{SessionId, UserId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::user::User;
use crate::AuthError;

/// A browser session, anonymous or signed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub id: SessionId,
    /// The user (anonymous or authenticated).
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Default session duration: 7 days.
    pub const DEFAULT_DURATION_SECS: i64 = 7 * 24 * 60 * 60;

    /// Create a new session for an anonymous user.
    pub fn anonymous() -> Self {
        Self::for_user(User::Anonymous)
    }

    /// Create a new session for an authenticated user.
    pub fn authenticated(user: User) -> Self {
        Self::for_user(user)
    }

    fn for_user(user: User) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::generate(),
            user,
            created_at: now,
            last_activity_at: now,
            expires_at: now + Duration::seconds(Self::DEFAULT_DURATION_SECS),
        }
    }

    /// Create session with custom duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.expires_at = self.created_at + duration;
        self
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Check if session is expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Validate the session, returning error if invalid.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.is_expired() {
            Err(AuthError::SessionExpired)
        } else {
            Ok(())
        }
    }

    /// The signed-in user's id, if the session is still valid at `now`.
    pub fn user_id_at(&self, now: DateTime<Utc>) -> Option<&UserId> {
        if self.is_expired_at(now) {
            None
        } else {
            self.user.user_id()
        }
    }

    /// Update last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Upgrade anonymous session to authenticated.
    pub fn upgrade(&mut self, user: User) -> Result<(), AuthError> {
        if let Some(current) = self.user.user_id() {
            return Err(AuthError::AlreadySignedIn(current.to_string()));
        }
        self.user = user;
        self.touch();
        Ok(())
    }

    /// Get time until expiration.
    pub fn time_to_expiry(&self) -> Duration {
        (self.expires_at - Utc::now()).max(Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Profile;

    #[test]
    fn test_session_creation() {
        let session = AuthSession::anonymous();
        assert!(session.user.is_anonymous());
        assert!(!session.is_expired());
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_expired_session_has_no_user() {
        let user = User::Authenticated(Profile::new("u-1", "a@campus.edu"));
        let session = AuthSession::authenticated(user).with_duration(Duration::minutes(30));

        assert!(session.user_id_at(session.created_at).is_some());
        let later = session.created_at + Duration::hours(1);
        assert!(session.is_expired_at(later));
        assert_eq!(session.user_id_at(later), None);
    }

    #[test]
    fn test_upgrade_only_from_anonymous() {
        let mut session = AuthSession::anonymous();
        let user = User::Authenticated(Profile::new("u-1", "a@campus.edu"));
        assert!(session.upgrade(user.clone()).is_ok());
        assert_eq!(
            session.upgrade(user),
            Err(AuthError::AlreadySignedIn("u-1".to_string()))
        );
    }

    #[test]
    fn test_session_id_generation() {
        assert_ne!(AuthSession::anonymous().id, AuthSession::anonymous().id);
    }
}
