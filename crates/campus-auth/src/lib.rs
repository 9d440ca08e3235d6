//! Session state for the campus marketplace.
//!
//! The session is process-wide: it is initialized once at startup and torn
//! down on sign-out. Listing and wishlist logic only ever receive a
//! [`Viewer`], never the session itself.

mod error;
mod manager;
mod session;
mod user;

pub use error::AuthError;
pub use manager::{SessionManager, Viewer};
pub use session::AuthSession;
pub use user::{Profile, User};
