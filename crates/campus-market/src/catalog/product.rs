//! Product listing records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Condition};
use crate::ids::{ProductId, UserId};
use crate::money::Money;

/// The seller shown on a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seller {
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Hostel or campus location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl Seller {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: None,
            is_verified: false,
        }
    }
}

/// A marketplace listing.
///
/// Records are owned by the store and may be incomplete. Every field the
/// search predicates read is optional so a missing value can be treated as
/// "does not match" rather than as an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    /// When the listing was posted.
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    /// Detail page view count.
    #[serde(default, alias = "views_count")]
    pub views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<Seller>,
    /// Image URLs; the first one is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl Product {
    /// Create a listing posted now with a generated id.
    pub fn new(title: impl Into<String>, price: Money) -> Self {
        Self {
            id: ProductId::generate(),
            title: title.into(),
            description: None,
            category: None,
            condition: None,
            price: Some(price),
            posted_at: Some(Utc::now()),
            views: 0,
            seller: None,
            images: Vec::new(),
            is_available: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn posted_at(mut self, at: DateTime<Utc>) -> Self {
        self.posted_at = Some(at);
        self
    }

    pub fn with_views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }

    pub fn with_seller(mut self, seller: Seller) -> Self {
        self.seller = Some(seller);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// The price, if present and non-negative.
    pub fn valid_price(&self) -> Option<Money> {
        self.price.filter(|p| !p.is_negative())
    }

    /// The primary image URL.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_builder() {
        let p = Product::new("Study Table", Money::from_major(3500, Currency::INR))
            .with_id("p-3")
            .with_category(Category::Furniture)
            .with_image("a.jpg")
            .with_image("b.jpg");

        assert_eq!(p.id.as_str(), "p-3");
        assert_eq!(p.primary_image(), Some("a.jpg"));
        assert!(p.is_available);
    }

    #[test]
    fn test_negative_price_is_not_valid() {
        let mut p = Product::new("Broken", Money::from_major(10, Currency::INR));
        p.price = Some(Money::new(-1, Currency::INR));
        assert_eq!(p.valid_price(), None);
    }

    #[test]
    fn test_sparse_record_deserializes() {
        let json = r#"{"id": "x1", "title": "Lamp", "category": "lighting", "views_count": 7}"#;
        let p: Product = serde_json::from_str(json).unwrap();

        assert_eq!(p.category, Some(Category::Unknown("lighting".to_string())));
        assert_eq!(p.views, 7);
        assert_eq!(p.price, None);
        assert_eq!(p.condition, None);
        assert!(p.is_available);
    }
}
