//! Search results page for the campus marketplace.
//!
//! This crate provides:
//! - `BrowseController` - Owns the query and derives the view state
//! - `SearchPage` - Runs a controller against a store and a history
//! - `WishlistController` - Wishlist state behind the sign-in gate
//! - `Navigator` - The address bar the query is mirrored into
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use campus_browse::{BrowseConfig, BrowseController, MemoryHistory, SearchPage};
//! use campus_data::InMemoryStore;
//!
//! # async fn run() -> Result<(), campus_browse::BrowseError> {
//! let controller = BrowseController::new(BrowseConfig::default())?;
//! let store = Arc::new(InMemoryStore::default());
//! let mut page = SearchPage::new(controller, store, MemoryHistory::new("/search-results?q=bike"));
//!
//! page.mount();
//! page.settle().await;
//! println!("{:?}", page.state());
//! # Ok(())
//! # }
//! ```

mod config;
mod controller;
mod error;
mod navigator;
mod page;
mod wishlist;

pub use config::BrowseConfig;
pub use controller::{Action, BrowseController, Effect, FetchOutcome, FetchTicket, ViewState};
pub use error::BrowseError;
pub use navigator::{
    login_url, params_of, search_url, MemoryHistory, Navigator, LOGIN_PATH, SEARCH_PATH,
};
pub use page::SearchPage;
pub use wishlist::{contact_seller, ContactOutcome, WishlistController, WishlistOutcome};
