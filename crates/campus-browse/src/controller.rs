//! Search results page controller.
//!
//! The controller owns the live [`Query`] and the [`ViewState`] derived from
//! it. Every change goes through [`BrowseController::dispatch`], which
//! returns the effects the page has to carry out: URL pushes and product
//! fetches.
//!
//! Fetches are tagged with a generation number. Only the response to the
//! most recently issued fetch is applied; anything older is dropped when it
//! arrives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use campus_data::{DataStore, FetchError, FetchResult, ProductFetch};
use campus_market::prelude::*;
use chrono::{DateTime, Utc};
use tracing::{debug, info, trace, warn};

use crate::config::BrowseConfig;
use crate::navigator::{params_of, search_url};
use crate::BrowseError;

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Load the URL-visible part of the query: on mount and after
    /// back/forward navigation. Never pushes a URL.
    Hydrate(UrlParams),
    /// A user edit to search, filters, sort or page size.
    Edit(QueryChange),
    GoToPage(u32),
    /// Reveal the next page (infinite mode).
    LoadMore,
    /// Re-issue the fetch that failed.
    Retry,
    FetchCompleted(FetchOutcome),
}

/// Work the page must perform after a dispatch.
#[derive(Debug)]
pub enum Effect {
    /// Push this URL onto the history without reloading.
    PushUrl(String),
    /// Run this fetch and dispatch its outcome.
    Fetch(FetchTicket),
}

/// What the results area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing requested yet.
    Idle,
    /// A fetch for the current query is outstanding.
    Loading,
    Results(ResultView<Product>),
    /// The query matched nothing.
    NoResults {
        search_text: Option<String>,
        active_filters: usize,
    },
    /// The last fetch failed. The query is unchanged and can be retried.
    Failed(FetchError),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn view(&self) -> Option<&ResultView<Product>> {
        match self {
            ViewState::Results(view) => Some(view),
            _ => None,
        }
    }

    /// Matched count, when a result set is on display.
    pub fn matched_count(&self) -> Option<usize> {
        match self {
            ViewState::Results(view) => Some(view.matched_count),
            ViewState::NoResults { .. } => Some(0),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            ViewState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// A product fetch tagged with the query generation that issued it.
///
/// The request's limit is the batch size; [`FetchTicket::execute`] keeps
/// reading until the store runs out.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    request: ProductFetch,
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &ProductFetch {
        &self.request
    }

    /// Settle delay applied before the store is called.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// False once a newer fetch has been issued.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    /// Wait out the settle delay, then read every candidate from the store
    /// in batches of the request limit. Stops early once a newer fetch has
    /// been issued.
    pub async fn execute<S>(self, store: &S) -> FetchOutcome
    where
        S: DataStore + ?Sized,
    {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut request = self.request.clone();
        let mut candidates = Vec::new();
        loop {
            if !self.is_current() {
                trace!(generation = self.generation, offset = request.offset, "fetch superseded");
                return FetchOutcome::Superseded {
                    generation: self.generation,
                };
            }

            let batch = match store.fetch_products(&request).await {
                Ok(batch) => batch,
                Err(error) => {
                    return FetchOutcome::Completed {
                        generation: self.generation,
                        result: Err(error),
                    }
                }
            };
            let last = request.is_last_batch(batch.len());
            candidates.extend(batch);
            if last {
                break;
            }
            request = request.next_batch();
        }

        FetchOutcome::Completed {
            generation: self.generation,
            result: Ok(candidates),
        }
    }
}

/// How a fetch ticket ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Dropped during the settle delay without calling the store.
    Superseded { generation: u64 },
    Completed {
        generation: u64,
        result: FetchResult<Vec<Product>>,
    },
}

impl FetchOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            FetchOutcome::Superseded { generation } | FetchOutcome::Completed { generation, .. } => {
                *generation
            }
        }
    }
}

/// Owns the query and result state of one search results page.
pub struct BrowseController {
    config: BrowseConfig,
    query: Query,
    /// Products returned by the last applied fetch.
    candidates: Vec<Product>,
    /// Request of the most recently issued fetch.
    requested: Option<ProductFetch>,
    state: ViewState,
    latest: Arc<AtomicU64>,
    clock: fn() -> DateTime<Utc>,
}

impl BrowseController {
    pub fn new(config: BrowseConfig) -> Result<Self, BrowseError> {
        config.validate()?;
        Ok(Self {
            query: config.base_query(),
            config,
            candidates: Vec::new(),
            requested: None,
            state: ViewState::Idle,
            latest: Arc::new(AtomicU64::new(0)),
            clock: Utc::now,
        })
    }

    /// Measure listing recency against `clock` instead of the system time.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &BrowseConfig {
        &self.config
    }

    /// Generation of the most recently issued fetch.
    pub fn generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// The URL mirroring the current query.
    pub fn url(&self) -> String {
        search_url(&self.query.to_url_params())
    }

    /// Page selector entries for the current result set.
    pub fn page_window(&self) -> Vec<PageLink> {
        let matched = self.state.matched_count().unwrap_or(0);
        self.query
            .pager
            .page_window(self.config.visible_page_delta, matched)
    }

    /// Hydrate from the page's starting location.
    pub fn mount(&mut self, location: &str) -> Vec<Effect> {
        self.dispatch(Action::Hydrate(params_of(location)))
    }

    /// The single entry point for every state change.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Hydrate(params) => {
                self.query = Query::from_url(&params, &self.query);
                debug!(search = ?self.query.text(), category = self.query.category.as_str(), "hydrated query from url");
                self.refresh(Duration::ZERO)
            }
            Action::Edit(change) => {
                let before = self.query.to_url_params();
                if !self.query.apply(change) {
                    return Vec::new();
                }
                debug!(active_filters = self.query.active_filter_count(), sort = %self.query.sort, "query edited");

                let mut effects = Vec::new();
                let after = self.query.to_url_params();
                if after != before {
                    effects.push(Effect::PushUrl(search_url(&after)));
                }
                effects.extend(self.refresh(self.config.debounce()));
                effects
            }
            Action::GoToPage(page) => {
                if let Some(matched) = self.state.matched_count() {
                    self.query.pager.go_to_page(page, matched);
                    self.recompute();
                }
                Vec::new()
            }
            Action::LoadMore => {
                if let Some(matched) = self.state.matched_count() {
                    if self.query.pager.load_more(matched) {
                        self.recompute();
                    }
                }
                Vec::new()
            }
            Action::Retry => {
                if !matches!(self.state, ViewState::Failed(_)) {
                    return Vec::new();
                }
                let request = self.fetch_request();
                vec![Effect::Fetch(self.issue(request, Duration::ZERO))]
            }
            Action::FetchCompleted(outcome) => {
                self.complete(outcome);
                Vec::new()
            }
        }
    }

    fn fetch_request(&self) -> ProductFetch {
        ProductFetch::from_query(&self.query, self.config.candidate_limit)
    }

    /// Fetch when the store-side part of the query changed, otherwise
    /// recompute from the candidates already held.
    fn refresh(&mut self, delay: Duration) -> Vec<Effect> {
        let request = self.fetch_request();
        if self.requested.as_ref() != Some(&request) {
            return vec![Effect::Fetch(self.issue(request, delay))];
        }
        match self.state {
            // The outstanding fetch or a retry will recompute.
            ViewState::Loading | ViewState::Failed(_) => {}
            _ => self.recompute(),
        }
        Vec::new()
    }

    fn issue(&mut self, request: ProductFetch, delay: Duration) -> FetchTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            generation,
            search = ?request.search_query,
            category = request.category.as_str(),
            sort = %request.sort,
            ?delay,
            "issuing product fetch"
        );
        self.requested = Some(request.clone());
        self.state = ViewState::Loading;
        FetchTicket {
            generation,
            request,
            delay,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Apply a fetch outcome. Returns `true` if it changed the view.
    fn complete(&mut self, outcome: FetchOutcome) -> bool {
        let current = self.generation();
        match outcome {
            FetchOutcome::Superseded { generation } => {
                trace!(generation, "superseded fetch ignored");
                false
            }
            FetchOutcome::Completed { generation, .. } if generation != current => {
                debug!(generation, current, "discarding stale fetch response");
                false
            }
            FetchOutcome::Completed {
                result: Ok(products),
                generation,
            } => {
                debug!(generation, candidates = products.len(), "fetch applied");
                self.candidates = products;
                self.recompute();
                true
            }
            FetchOutcome::Completed {
                result: Err(error),
                generation,
            } => {
                warn!(generation, %error, "product fetch failed");
                self.state = ViewState::Failed(error);
                true
            }
        }
    }

    fn recompute(&mut self) {
        let view = compute_view(&self.candidates, &self.query, (self.clock)());
        self.state = if view.is_empty() {
            ViewState::NoResults {
                search_text: self.query.text().map(str::to_string),
                active_filters: self.query.active_filter_count(),
            }
        } else {
            ViewState::Results(view.cloned())
        };
    }
}
