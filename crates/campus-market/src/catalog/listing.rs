//! Listing drafts and their validation.
//!
//! A draft is whatever the seller has typed so far. It only becomes a
//! [`NewListing`] once every field passes validation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Condition, Product, Seller};
use crate::ids::ProductId;
use crate::money::Money;

pub const MIN_TITLE_CHARS: usize = 10;
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// How buyers may reach the seller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactPreferences {
    #[serde(default)]
    pub chat: bool,
    #[serde(default)]
    pub phone: bool,
    #[serde(default)]
    pub email: bool,
}

impl ContactPreferences {
    pub fn any(&self) -> bool {
        self.chat || self.phone || self.email
    }
}

/// A listing being composed by a seller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub contact: ContactPreferences,
    #[serde(default)]
    pub location: Option<String>,
}

/// Draft fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingField {
    Title,
    Category,
    Price,
    Condition,
    Description,
    Images,
    ContactPreferences,
}

impl ListingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingField::Title => "title",
            ListingField::Category => "category",
            ListingField::Price => "price",
            ListingField::Condition => "condition",
            ListingField::Description => "description",
            ListingField::Images => "images",
            ListingField::ContactPreferences => "contact_preferences",
        }
    }
}

/// Validation messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ListingErrors(BTreeMap<ListingField, String>);

impl ListingErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ListingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ListingField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: ListingField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl fmt::Display for ListingErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl ListingDraft {
    /// Check every field, collecting all problems rather than stopping at
    /// the first.
    pub fn validate(&self) -> Result<(), ListingErrors> {
        let mut errors = ListingErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert(ListingField::Title, "Product title is required");
        } else if title.chars().count() < MIN_TITLE_CHARS {
            errors.insert(
                ListingField::Title,
                format!("Title must be at least {} characters", MIN_TITLE_CHARS),
            );
        }

        if self.category.is_none() {
            errors.insert(ListingField::Category, "Please select a category");
        }

        match self.price {
            None => errors.insert(ListingField::Price, "Price is required"),
            Some(p) if !p.is_positive() => {
                errors.insert(ListingField::Price, "Price must be greater than 0")
            }
            Some(_) => {}
        }

        if self.condition.is_none() {
            errors.insert(ListingField::Condition, "Please select item condition");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(ListingField::Description, "Product description is required");
        } else if description.chars().count() < MIN_DESCRIPTION_CHARS {
            errors.insert(
                ListingField::Description,
                format!("Description must be at least {} characters", MIN_DESCRIPTION_CHARS),
            );
        }

        if self.images.is_empty() {
            errors.insert(ListingField::Images, "At least one product image is required");
        }

        if !self.contact.any() {
            errors.insert(ListingField::ContactPreferences, "Select at least one contact method");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and convert into a listing ready to be stored.
    pub fn into_new_listing(self) -> Result<NewListing, ListingErrors> {
        self.validate()?;

        // validate() guarantees the options below are populated
        match (self.category, self.condition, self.price) {
            (Some(category), Some(condition), Some(price)) => Ok(NewListing {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                category,
                condition,
                price,
                images: self.images,
                contact: self.contact,
                location: self.location,
            }),
            _ => Err(ListingErrors::default()),
        }
    }
}

/// A validated listing awaiting insertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub price: Money,
    pub images: Vec<String>,
    pub contact: ContactPreferences,
    pub location: Option<String>,
}

impl NewListing {
    /// Materialize as a stored product record.
    pub fn into_product(self, id: ProductId, mut seller: Seller, posted_at: DateTime<Utc>) -> Product {
        if seller.location.is_none() {
            seller.location = self.location;
        }
        Product {
            id,
            title: self.title,
            description: Some(self.description),
            category: Some(self.category),
            condition: Some(self.condition),
            price: Some(self.price),
            posted_at: Some(posted_at),
            views: 0,
            seller: Some(seller),
            images: self.images,
            is_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn complete_draft() -> ListingDraft {
        ListingDraft {
            title: "Engineering Mathematics Textbook".to_string(),
            description: "Comprehensive mathematics textbook for engineering students, minimal highlighting."
                .to_string(),
            category: Some(Category::Textbooks),
            condition: Some(Condition::Good),
            price: Some(Money::from_major(850, Currency::INR)),
            images: vec!["cover.jpg".to_string()],
            contact: ContactPreferences {
                chat: true,
                ..Default::default()
            },
            location: Some("IIT Campus".to_string()),
        }
    }

    #[test]
    fn test_complete_draft_is_valid() {
        assert!(complete_draft().validate().is_ok());
        let listing = complete_draft().into_new_listing().unwrap();
        assert_eq!(listing.category, Category::Textbooks);
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = ListingDraft::default().validate().unwrap_err();
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get(ListingField::Title), Some("Product title is required"));
        assert_eq!(errors.get(ListingField::Price), Some("Price is required"));
    }

    #[test]
    fn test_short_fields_and_zero_price() {
        let mut draft = complete_draft();
        draft.title = "  Book  ".to_string();
        draft.description = "Too short".to_string();
        draft.price = Some(Money::zero(Currency::INR));

        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get(ListingField::Title),
            Some("Title must be at least 10 characters")
        );
        assert_eq!(
            errors.get(ListingField::Description),
            Some("Description must be at least 50 characters")
        );
        assert_eq!(errors.get(ListingField::Price), Some("Price must be greater than 0"));
        assert_eq!(errors.get(ListingField::Images), None);
    }

    #[test]
    fn test_contact_method_required() {
        let mut draft = complete_draft();
        draft.contact = ContactPreferences::default();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(ListingField::ContactPreferences).is_some());
    }

    #[test]
    fn test_into_product_carries_location_to_seller() {
        let listing = complete_draft().into_new_listing().unwrap();
        let product = listing.into_product(
            ProductId::new("p1"),
            Seller::new("u1", "Rahul"),
            Utc::now(),
        );
        assert_eq!(product.seller.unwrap().location.as_deref(), Some("IIT Campus"));
        assert_eq!(product.views, 0);
    }
}
