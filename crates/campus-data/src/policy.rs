//! Timeout and retry policies for store calls.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use campus_market::catalog::{NewListing, Product, Seller};
use campus_market::{ProductId, UserId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::request::{ProductFetch, ProductStats, WishlistEntry};
use crate::store::DataStore;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                base.saturating_mul(multiplier).min(*max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_secs(2),
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first call.
    pub max_attempts: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: BackoffStrategy::default(),
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: BackoffStrategy::None,
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Check if `attempt` (0-indexed) may be followed by another.
    pub fn should_retry(&self, error: &FetchError, attempt: u32) -> bool {
        attempt < self.max_attempts && error.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPolicy {
    /// Limit on a single attempt.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retry: RetryPolicy::default(),
        }
    }
}

const DEFAULT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Store settings read from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON product catalog loaded into the in-memory store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<std::path::PathBuf>,
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retries after a retryable failure.
    pub max_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl StoreConfig {
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(
            Duration::from_millis(self.timeout_ms.max(1)),
            RetryPolicy::new(self.max_retries),
        )
    }
}

/// Wraps a store with a per-attempt timeout and retries.
///
/// Listing creation is never retried, since a timed-out insert may still
/// have landed.
pub struct PolicyStore<S> {
    inner: S,
    policy: FetchPolicy,
}

impl<S: DataStore> PolicyStore<S> {
    pub fn new(inner: S, policy: FetchPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    async fn attempt<T, Fut>(&self, call: Fut) -> FetchResult<T>
    where
        Fut: Future<Output = FetchResult<T>>,
    {
        match tokio::time::timeout(self.policy.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.policy.timeout)),
        }
    }

    async fn run<T, F, Fut>(&self, op: &'static str, mut call: F) -> FetchResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = FetchResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match self.attempt(call()).await {
                Err(error) if self.policy.retry.should_retry(&error, attempt) => {
                    let delay = self.policy.retry.backoff.delay_for_attempt(attempt);
                    warn!(
                        op,
                        backend = self.inner.backend_tag(),
                        attempt,
                        %error,
                        ?delay,
                        "retrying store call"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    debug!(op, attempt, %error, "store call failed");
                    return Err(error);
                }
                ok => return ok,
            }
        }
    }
}

#[async_trait]
impl<S: DataStore> DataStore for PolicyStore<S> {
    fn backend_tag(&self) -> &'static str {
        self.inner.backend_tag()
    }

    async fn fetch_products(&self, request: &ProductFetch) -> FetchResult<Vec<Product>> {
        self.run("fetch_products", || self.inner.fetch_products(request))
            .await
    }

    async fn fetch_product(&self, id: &ProductId) -> FetchResult<Product> {
        self.run("fetch_product", || self.inner.fetch_product(id)).await
    }

    async fn fetch_user_products(
        &self,
        seller: &UserId,
        include_unavailable: bool,
    ) -> FetchResult<Vec<Product>> {
        self.run("fetch_user_products", || {
            self.inner.fetch_user_products(seller, include_unavailable)
        })
        .await
    }

    async fn fetch_wishlist(&self, user: &UserId) -> FetchResult<Vec<WishlistEntry>> {
        self.run("fetch_wishlist", || self.inner.fetch_wishlist(user))
            .await
    }

    async fn add_to_wishlist(&self, user: &UserId, product: &ProductId) -> FetchResult<()> {
        self.run("add_to_wishlist", || self.inner.add_to_wishlist(user, product))
            .await
    }

    async fn remove_from_wishlist(&self, user: &UserId, product: &ProductId) -> FetchResult<()> {
        self.run("remove_from_wishlist", || {
            self.inner.remove_from_wishlist(user, product)
        })
        .await
    }

    async fn create_listing(&self, seller: Seller, listing: NewListing) -> FetchResult<Product> {
        self.attempt(self.inner.create_listing(seller, listing)).await
    }

    async fn product_stats(&self) -> FetchResult<ProductStats> {
        self.run("product_stats", || self.inner.product_stats()).await
    }
}
