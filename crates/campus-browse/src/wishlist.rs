//! Wishlist state and the sign-in gate on result cards.

use std::collections::HashSet;

use campus_auth::Viewer;
use campus_data::DataStore;
use campus_market::ProductId;
use tracing::{debug, info};

use crate::navigator::login_url;
use crate::BrowseError;

/// Result of a wishlist toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistOutcome {
    Added,
    Removed,
    /// The viewer is anonymous; send them to this sign-in URL.
    LoginRequired { return_to: String },
}

/// Result of a "contact seller" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Open the seller's contact options for this product.
    Allowed(ProductId),
    LoginRequired { return_to: String },
}

/// Wishlisted product ids for the current viewer.
#[derive(Debug, Default)]
pub struct WishlistController {
    items: HashSet<ProductId>,
}

impl WishlistController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, product: &ProductId) -> bool {
        self.items.contains(product)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Load the viewer's wishlist. Anonymous viewers get an empty one.
    pub async fn load<S>(&mut self, viewer: &Viewer, store: &S) -> Result<(), BrowseError>
    where
        S: DataStore + ?Sized,
    {
        let Some(user) = viewer.user_id() else {
            self.items.clear();
            return Ok(());
        };

        let entries = store.fetch_wishlist(user).await?;
        self.items = entries.into_iter().map(|e| e.product_id).collect();
        debug!(user = %user, items = self.items.len(), "loaded wishlist");
        Ok(())
    }

    /// Add or remove `product`. The local set only changes once the store
    /// accepted the write.
    pub async fn toggle<S>(
        &mut self,
        viewer: &Viewer,
        product: &ProductId,
        return_path: &str,
        store: &S,
    ) -> Result<WishlistOutcome, BrowseError>
    where
        S: DataStore + ?Sized,
    {
        let Some(user) = viewer.user_id() else {
            return Ok(WishlistOutcome::LoginRequired {
                return_to: login_url(return_path),
            });
        };

        if self.items.contains(product) {
            store.remove_from_wishlist(user, product).await?;
            self.items.remove(product);
            info!(user = %user, product = %product, "removed from wishlist");
            Ok(WishlistOutcome::Removed)
        } else {
            store.add_to_wishlist(user, product).await?;
            self.items.insert(product.clone());
            info!(user = %user, product = %product, "added to wishlist");
            Ok(WishlistOutcome::Added)
        }
    }
}

/// Contacting a seller requires a signed-in viewer.
pub fn contact_seller(viewer: &Viewer, product: &ProductId, return_path: &str) -> ContactOutcome {
    if viewer.is_authenticated() {
        ContactOutcome::Allowed(product.clone())
    } else {
        ContactOutcome::LoginRequired {
            return_to: login_url(return_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_data::{FetchError, InMemoryStore};
    use campus_market::prelude::*;

    fn store() -> InMemoryStore {
        InMemoryStore::new(vec![
            Product::new("Desk Lamp", Money::from_major(600, Currency::INR)).with_id("p-1"),
        ])
    }

    #[tokio::test]
    async fn test_anonymous_toggle_asks_for_login() {
        let store = store();
        let mut wishlist = WishlistController::new();
        let outcome = wishlist
            .toggle(&Viewer::anonymous(), &ProductId::new("p-1"), "/search-results?q=lamp", &store)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            WishlistOutcome::LoginRequired {
                return_to: "/user-login?returnTo=%2Fsearch-results%3Fq%3Dlamp".to_string()
            }
        );
        assert_eq!(store.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let store = store();
        let viewer = Viewer::signed_in("u-1");
        let id = ProductId::new("p-1");
        let mut wishlist = WishlistController::new();

        assert_eq!(
            wishlist.toggle(&viewer, &id, "/", &store).await.unwrap(),
            WishlistOutcome::Added
        );
        assert!(wishlist.contains(&id));

        let mut reloaded = WishlistController::new();
        reloaded.load(&viewer, &store).await.unwrap();
        assert!(reloaded.contains(&id));

        assert_eq!(
            wishlist.toggle(&viewer, &id, "/", &store).await.unwrap(),
            WishlistOutcome::Removed
        );
        assert!(wishlist.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_set_unchanged() {
        let store = store();
        store
            .fail_next(FetchError::Connection("offline".into()))
            .await;
        let id = ProductId::new("p-1");
        let mut wishlist = WishlistController::new();

        let err = wishlist
            .toggle(&Viewer::signed_in("u-1"), &id, "/", &store)
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(!wishlist.contains(&id));
    }

    #[tokio::test]
    async fn test_anonymous_load_clears() {
        let store = store();
        let mut wishlist = WishlistController::new();
        wishlist
            .toggle(&Viewer::signed_in("u-1"), &ProductId::new("p-1"), "/", &store)
            .await
            .unwrap();

        wishlist.load(&Viewer::anonymous(), &store).await.unwrap();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_contact_seller_gate() {
        let id = ProductId::new("p-1");
        assert_eq!(
            contact_seller(&Viewer::signed_in("u-1"), &id, "/"),
            ContactOutcome::Allowed(id.clone())
        );
        assert!(matches!(
            contact_seller(&Viewer::anonymous(), &id, "/search-results"),
            ContactOutcome::LoginRequired { .. }
        ));
    }
}
