//! The data store collaborator.

use async_trait::async_trait;
use campus_market::catalog::{NewListing, Product, Seller};
use campus_market::{ProductId, UserId};

use crate::error::FetchResult;
use crate::request::{ProductFetch, ProductStats, WishlistEntry};

/// Data store backend trait.
///
/// Every call names the acting user explicitly; implementations never read
/// session state of their own.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Short name used in logs.
    fn backend_tag(&self) -> &'static str;

    /// Available products matching the fetch's search and category, in
    /// the requested order, sliced by `offset` and `limit`.
    async fn fetch_products(&self, request: &ProductFetch) -> FetchResult<Vec<Product>>;

    /// One product by id. Counts as a view.
    async fn fetch_product(&self, id: &ProductId) -> FetchResult<Product>;

    /// A seller's own listings, newest first.
    async fn fetch_user_products(
        &self,
        seller: &UserId,
        include_unavailable: bool,
    ) -> FetchResult<Vec<Product>>;

    /// Wishlist of `user`, most recently added first.
    async fn fetch_wishlist(&self, user: &UserId) -> FetchResult<Vec<WishlistEntry>>;

    async fn add_to_wishlist(&self, user: &UserId, product: &ProductId) -> FetchResult<()>;

    async fn remove_from_wishlist(&self, user: &UserId, product: &ProductId) -> FetchResult<()>;

    /// Whether `product` is on the wishlist of `user`.
    async fn is_wishlisted(&self, user: &UserId, product: &ProductId) -> FetchResult<bool> {
        let entries = self.fetch_wishlist(user).await?;
        Ok(entries.iter().any(|e| &e.product_id == product))
    }

    /// Publish a validated listing.
    async fn create_listing(&self, seller: Seller, listing: NewListing) -> FetchResult<Product>;

    /// Aggregates over available products.
    async fn product_stats(&self) -> FetchResult<ProductStats>;
}
