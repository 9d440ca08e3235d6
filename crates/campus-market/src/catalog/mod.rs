//! Product catalog module.
//!
//! Contains listing records, categories, conditions and listing drafts.

mod category;
mod condition;
mod listing;
mod product;

pub use category::Category;
pub use condition::Condition;
pub use listing::{
    ContactPreferences, ListingDraft, ListingErrors, ListingField, NewListing,
    MIN_DESCRIPTION_CHARS, MIN_TITLE_CHARS,
};
pub use product::{Product, Seller};
