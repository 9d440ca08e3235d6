//! Process-wide session ownership.

use campus_market::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

use crate::session::AuthSession;
use crate::user::{Profile, User};
use crate::AuthError;

/// Read-only view of who is browsing.
///
/// This is all page logic gets to see of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewer {
    pub user_id: Option<UserId>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn signed_in(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// The viewer a session grants at `now`. Expired sessions are anonymous.
    pub fn from_session(session: &AuthSession, now: DateTime<Utc>) -> Self {
        Self {
            user_id: session.user_id_at(now).cloned(),
        }
    }
}

/// Owns the current session for the life of the app.
///
/// Created once at startup with [`SessionManager::init`]. Sign-in replaces
/// the session, sign-out tears it down to a fresh anonymous one. Observers
/// can [`subscribe`](SessionManager::subscribe) to session changes.
#[derive(Debug)]
pub struct SessionManager {
    session: watch::Sender<AuthSession>,
}

impl SessionManager {
    /// Start with an anonymous session.
    pub fn init() -> Self {
        let (session, _) = watch::channel(AuthSession::anonymous());
        Self { session }
    }

    /// Sign `profile` in, upgrading the current session.
    pub fn sign_in(&self, profile: Profile) -> Result<Viewer, AuthError> {
        let mut result = Ok(());
        self.session.send_if_modified(|session| {
            if session.is_expired() {
                *session = AuthSession::anonymous();
            }
            result = session.upgrade(User::Authenticated(profile));
            result.is_ok()
        });
        result?;

        let viewer = self.viewer();
        info!(user = ?viewer.user_id, "signed in");
        Ok(viewer)
    }

    /// Tear the session down and start a fresh anonymous one.
    pub fn sign_out(&self) {
        let previous = self.session.send_replace(AuthSession::anonymous());
        if let Some(user) = previous.user.user_id() {
            info!(%user, "signed out");
        }
    }

    /// Snapshot of who is browsing now.
    pub fn viewer(&self) -> Viewer {
        Viewer::from_session(&self.session.borrow(), Utc::now())
    }

    /// The signed-in profile, if the session is valid.
    pub fn profile(&self) -> Option<Profile> {
        let session = self.session.borrow();
        if session.is_expired() {
            return None;
        }
        session.user.profile().cloned()
    }

    /// Like [`viewer`](Self::viewer) but fails for anonymous sessions.
    pub fn require_user(&self) -> Result<UserId, AuthError> {
        let session = self.session.borrow();
        if session.user.is_anonymous() {
            return Err(AuthError::NotSignedIn);
        }
        session.validate()?;
        session.user.user_id().cloned().ok_or(AuthError::NotSignedIn)
    }

    pub fn session(&self) -> AuthSession {
        self.session.borrow().clone()
    }

    /// Receive every session change.
    pub fn subscribe(&self) -> watch::Receiver<AuthSession> {
        self.session.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asha() -> Profile {
        Profile::new("u-1", "asha@campus.edu").with_name("Asha")
    }

    #[test]
    fn test_init_is_anonymous() {
        let manager = SessionManager::init();
        assert_eq!(manager.viewer(), Viewer::anonymous());
        assert_eq!(manager.require_user(), Err(AuthError::NotSignedIn));
    }

    #[test]
    fn test_sign_in_and_out() {
        let manager = SessionManager::init();
        let viewer = manager.sign_in(asha()).unwrap();
        assert_eq!(viewer, Viewer::signed_in("u-1"));
        assert_eq!(manager.profile().map(|p| p.email), Some("asha@campus.edu".to_string()));

        let first_session = manager.session().id;
        manager.sign_out();
        assert!(!manager.viewer().is_authenticated());
        assert_ne!(manager.session().id, first_session);
    }

    #[test]
    fn test_second_sign_in_rejected() {
        let manager = SessionManager::init();
        manager.sign_in(asha()).unwrap();
        let err = manager.sign_in(Profile::new("u-2", "b@campus.edu")).unwrap_err();
        assert_eq!(err, AuthError::AlreadySignedIn("u-1".to_string()));
        assert_eq!(manager.viewer(), Viewer::signed_in("u-1"));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let manager = SessionManager::init();
        let mut rx = manager.subscribe();

        manager.sign_in(asha()).unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().user.is_anonymous());

        manager.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow().user.is_anonymous());
    }
}
