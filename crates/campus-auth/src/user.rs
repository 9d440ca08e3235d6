//! User types.

use campus_market::catalog::Seller;
use campus_market::UserId;
use serde::{Deserialize, Serialize};

/// A user in the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum User {
    /// Guest browsing without an account.
    Anonymous,
    /// Signed-in student.
    Authenticated(Profile),
}

/// Profile of a signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Hostel or campus location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostel_location: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl Profile {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            full_name: None,
            hostel_location: None,
            is_verified: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.hostel_location = Some(location.into());
        self
    }

    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }

    /// Name shown to other users: the full name, else the email's local part.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }

    /// This user as the seller of a new listing.
    pub fn as_seller(&self) -> Seller {
        Seller {
            id: self.id.clone(),
            name: self.display_name().to_string(),
            location: self.hostel_location.clone(),
            is_verified: self.is_verified,
        }
    }
}

impl User {
    /// Check if user is anonymous.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, User::Anonymous)
    }

    /// Get user ID if authenticated.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            User::Anonymous => None,
            User::Authenticated(profile) => Some(&profile.id),
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            User::Anonymous => None,
            User::Authenticated(profile) => Some(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let profile = Profile::new("u-1", "asha.k@campus.edu");
        assert_eq!(profile.display_name(), "asha.k");
        assert_eq!(profile.clone().with_name("Asha K").display_name(), "Asha K");
    }

    #[test]
    fn test_as_seller() {
        let profile = Profile::new("u-1", "asha@campus.edu")
            .with_name("Asha")
            .with_location("Hostel C")
            .verified();
        let seller = profile.as_seller();
        assert_eq!(seller.id.as_str(), "u-1");
        assert_eq!(seller.location.as_deref(), Some("Hostel C"));
        assert!(seller.is_verified);
    }

    #[test]
    fn test_user_id() {
        assert_eq!(User::Anonymous.user_id(), None);
        let user = User::Authenticated(Profile::new("u-2", "b@campus.edu"));
        assert_eq!(user.user_id().map(|id| id.as_str()), Some("u-2"));
    }
}
