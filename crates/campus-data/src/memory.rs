//! In-memory data store.
//!
//! Applies the same predicates and comparators as the client-side result
//! pipeline, so a fetch and a local recompute agree on what matches and in
//! which order.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use campus_market::catalog::{NewListing, Product, Seller};
use campus_market::search::{sort_products, Filter, SortMode};
use campus_market::{ProductId, UserId};
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::request::{ProductFetch, ProductStats, WishlistEntry};
use crate::store::DataStore;

/// A store backed by process memory.
///
/// Latency and failures can be scripted per call for tests and demos.
#[derive(Default)]
pub struct InMemoryStore {
    products: Mutex<Vec<Product>>,
    wishlists: Mutex<HashMap<UserId, Vec<WishlistEntry>>>,
    fetch_calls: AtomicU64,
    delays: Mutex<VecDeque<Duration>>,
    failures: Mutex<VecDeque<FetchError>>,
}

impl InMemoryStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Self::default()
        }
    }

    /// Parse a JSON array of product records.
    pub fn from_json(json: &str) -> FetchResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Load a JSON catalog file.
    pub async fn from_json_file(path: impl AsRef<Path>) -> FetchResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FetchError::Request(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Delay the next call by `delay`. Queued delays apply in order.
    pub async fn delay_next(&self, delay: Duration) {
        self.delays.lock().await.push_back(delay);
    }

    /// Fail the next call with `error`. Queued failures apply in order.
    pub async fn fail_next(&self, error: FetchError) {
        self.failures.lock().await.push_back(error);
    }

    /// Number of store calls made so far.
    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::Relaxed)
    }

    /// Copy of every stored product, available or not.
    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.lock().await.clone()
    }

    /// Count the call, then apply any scripted delay and failure.
    async fn begin_call(&self, op: &'static str) -> FetchResult<()> {
        let n = self.fetch_calls.fetch_add(1, Ordering::Relaxed) + 1;
        let delay = self.delays.lock().await.pop_front();
        if let Some(delay) = delay {
            debug!(op, call = n, ?delay, "delaying store call");
            tokio::time::sleep(delay).await;
        }
        let failure = self.failures.lock().await.pop_front();
        match failure {
            Some(error) => {
                debug!(op, call = n, %error, "failing store call");
                Err(error)
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn fetch_products(&self, request: &ProductFetch) -> FetchResult<Vec<Product>> {
        self.begin_call("fetch_products").await?;

        let query = request.as_query();
        let filter = Filter::new(&query, Utc::now());
        let products = self.products.lock().await;

        let mut hits: Vec<&Product> = products
            .iter()
            .filter(|p| p.is_available && filter.matches_text(p) && filter.matches_category(p))
            .collect();
        sort_products(&mut hits, request.sort);

        Ok(hits
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .cloned()
            .collect())
    }

    async fn fetch_product(&self, id: &ProductId) -> FetchResult<Product> {
        self.begin_call("fetch_product").await?;

        let mut products = self.products.lock().await;
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| FetchError::NotFound(format!("product {}", id)))?;
        product.views += 1;
        Ok(product.clone())
    }

    async fn fetch_user_products(
        &self,
        seller: &UserId,
        include_unavailable: bool,
    ) -> FetchResult<Vec<Product>> {
        self.begin_call("fetch_user_products").await?;

        let products = self.products.lock().await;
        let mut own: Vec<&Product> = products
            .iter()
            .filter(|p| p.seller.as_ref().is_some_and(|s| &s.id == seller))
            .filter(|p| include_unavailable || p.is_available)
            .collect();
        sort_products(&mut own, SortMode::Newest);
        Ok(own.into_iter().cloned().collect())
    }

    async fn fetch_wishlist(&self, user: &UserId) -> FetchResult<Vec<WishlistEntry>> {
        self.begin_call("fetch_wishlist").await?;

        let wishlists = self.wishlists.lock().await;
        let mut entries = wishlists.get(user).cloned().unwrap_or_default();
        entries.reverse();
        Ok(entries)
    }

    async fn add_to_wishlist(&self, user: &UserId, product: &ProductId) -> FetchResult<()> {
        self.begin_call("add_to_wishlist").await?;

        if !self.products.lock().await.iter().any(|p| &p.id == product) {
            return Err(FetchError::NotFound(format!("product {}", product)));
        }

        let mut wishlists = self.wishlists.lock().await;
        let entries = wishlists.entry(user.clone()).or_default();
        if !entries.iter().any(|e| &e.product_id == product) {
            entries.push(WishlistEntry::new(product.clone()));
        }
        Ok(())
    }

    async fn remove_from_wishlist(&self, user: &UserId, product: &ProductId) -> FetchResult<()> {
        self.begin_call("remove_from_wishlist").await?;

        if let Some(entries) = self.wishlists.lock().await.get_mut(user) {
            entries.retain(|e| &e.product_id != product);
        }
        Ok(())
    }

    async fn create_listing(&self, seller: Seller, listing: NewListing) -> FetchResult<Product> {
        self.begin_call("create_listing").await?;

        let product = listing.into_product(ProductId::generate(), seller, Utc::now());
        debug!(product = %product.id, "created listing");
        self.products.lock().await.push(product.clone());
        Ok(product)
    }

    async fn product_stats(&self) -> FetchResult<ProductStats> {
        self.begin_call("product_stats").await?;

        let products = self.products.lock().await;
        Ok(ProductStats::from_products(
            products.iter().filter(|p| p.is_available),
        ))
    }
}
