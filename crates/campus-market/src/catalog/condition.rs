//! Item condition grades.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition of a listed item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
    /// A grade outside the known set; never matches a condition filter.
    Unknown(String),
}

impl Condition {
    /// Every known grade, best first.
    pub const ALL: [Condition; 5] = [
        Condition::New,
        Condition::LikeNew,
        Condition::Good,
        Condition::Fair,
        Condition::Poor,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like-new",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
            Condition::Unknown(id) => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Condition::New => "Brand New",
            Condition::LikeNew => "Like New",
            Condition::Good => "Good Condition",
            Condition::Fair => "Fair Condition",
            Condition::Poor => "Needs Repair",
            Condition::Unknown(id) => id,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "new" => Condition::New,
            "like-new" | "like_new" => Condition::LikeNew,
            "good" => Condition::Good,
            "fair" => Condition::Fair,
            "poor" => Condition::Poor,
            _ => Condition::Unknown(s.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Condition::Unknown(_))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Condition {
    fn from(s: String) -> Self {
        Condition::parse(&s)
    }
}

impl From<Condition> for String {
    fn from(c: Condition) -> Self {
        c.as_str().to_string()
    }
}
