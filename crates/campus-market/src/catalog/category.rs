//! Listing categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A marketplace category.
///
/// The set is closed, but records coming back from the store may carry a
/// value this build does not know about. Those are kept verbatim in
/// [`Category::Unknown`] so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Textbooks,
    Electronics,
    Furniture,
    Clothing,
    Sports,
    Kitchen,
    Bikes,
    Gaming,
    Art,
    Other,
    /// A category id outside the known set.
    Unknown(String),
}

impl Category {
    /// Every known category, in menu order.
    pub const ALL: [Category; 10] = [
        Category::Textbooks,
        Category::Electronics,
        Category::Furniture,
        Category::Clothing,
        Category::Sports,
        Category::Kitchen,
        Category::Bikes,
        Category::Gaming,
        Category::Art,
        Category::Other,
    ];

    /// Stable identifier used in URLs and by the store.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Textbooks => "textbooks",
            Category::Electronics => "electronics",
            Category::Furniture => "furniture",
            Category::Clothing => "clothing",
            Category::Sports => "sports",
            Category::Kitchen => "kitchen",
            Category::Bikes => "bikes",
            Category::Gaming => "gaming",
            Category::Art => "art",
            Category::Other => "other",
            Category::Unknown(id) => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Category::Textbooks => "Textbooks",
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Clothing => "Clothing",
            Category::Sports => "Sports Equipment",
            Category::Kitchen => "Kitchen Items",
            Category::Bikes => "Bikes & Cycles",
            Category::Gaming => "Gaming",
            Category::Art => "Art Supplies",
            Category::Other => "Other",
            Category::Unknown(id) => id,
        }
    }

    /// Parse a category id. Never fails; unrecognized ids become `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "textbooks" => Category::Textbooks,
            "electronics" => Category::Electronics,
            "furniture" => Category::Furniture,
            "clothing" => Category::Clothing,
            "sports" => Category::Sports,
            "kitchen" => Category::Kitchen,
            "bikes" | "cycles" => Category::Bikes,
            "gaming" => Category::Gaming,
            "art" => Category::Art,
            "other" => Category::Other,
            _ => Category::Unknown(s.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_alias() {
        assert_eq!(Category::parse("Textbooks"), Category::Textbooks);
        assert_eq!(Category::parse("cycles"), Category::Bikes);
        assert_eq!(Category::parse("bikes").display_name(), "Bikes & Cycles");
    }

    #[test]
    fn test_unknown_is_kept_verbatim() {
        let c = Category::parse("Musical-Instruments");
        assert_eq!(c, Category::Unknown("Musical-Instruments".to_string()));
        assert_eq!(c.display_name(), "Musical-Instruments");
        assert!(!c.is_known());
    }

    #[test]
    fn test_serde_as_id_string() {
        let json = serde_json::to_string(&Category::Kitchen).unwrap();
        assert_eq!(json, "\"kitchen\"");
        let back: Category = serde_json::from_str("\"vinyl\"").unwrap();
        assert_eq!(back, Category::Unknown("vinyl".to_string()));
    }
}
