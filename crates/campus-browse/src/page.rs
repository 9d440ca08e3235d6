//! A running search results page.

use std::collections::HashMap;
use std::sync::Arc;

use campus_data::{DataStore, FetchError};
use tokio::task::{self, JoinSet};
use tracing::warn;

use crate::controller::{Action, BrowseController, Effect, FetchOutcome, ViewState};
use crate::navigator::{params_of, Navigator};

/// Wires a [`BrowseController`] to a store and a history.
///
/// Fetch tickets run as tasks on the current tokio runtime; their outcomes
/// are fed back through [`SearchPage::settle`] or
/// [`SearchPage::next_completion`]. A task that panics or is cancelled
/// fails its generation like any other store error.
pub struct SearchPage<N> {
    controller: BrowseController,
    store: Arc<dyn DataStore>,
    navigator: N,
    in_flight: JoinSet<FetchOutcome>,
    /// Generation carried by each running task.
    generations: HashMap<task::Id, u64>,
}

impl<N: Navigator> SearchPage<N> {
    pub fn new(controller: BrowseController, store: Arc<dyn DataStore>, navigator: N) -> Self {
        Self {
            controller,
            store,
            navigator,
            in_flight: JoinSet::new(),
            generations: HashMap::new(),
        }
    }

    /// Hydrate from the navigator's current location.
    pub fn mount(&mut self) {
        let params = params_of(self.navigator.location());
        self.send(Action::Hydrate(params));
    }

    /// Dispatch `action` and carry out the resulting effects.
    pub fn send(&mut self, action: Action) {
        for effect in self.controller.dispatch(action) {
            match effect {
                Effect::PushUrl(url) => self.navigator.push(url),
                Effect::Fetch(ticket) => {
                    let generation = ticket.generation();
                    let store = Arc::clone(&self.store);
                    let handle = self
                        .in_flight
                        .spawn(async move { ticket.execute(store.as_ref()).await });
                    self.generations.insert(handle.id(), generation);
                }
            }
        }
    }

    /// Apply the next fetch to finish. Returns `false` when none are
    /// outstanding.
    pub async fn next_completion(&mut self) -> bool {
        match self.in_flight.join_next_with_id().await {
            Some(Ok((id, outcome))) => {
                self.generations.remove(&id);
                self.send(Action::FetchCompleted(outcome));
                true
            }
            Some(Err(e)) => {
                warn!(error = %e, "fetch task did not finish");
                if let Some(generation) = self.generations.remove(&e.id()) {
                    self.send(Action::FetchCompleted(FetchOutcome::Completed {
                        generation,
                        result: Err(FetchError::Request(format!("fetch task failed: {}", e))),
                    }));
                }
                true
            }
            None => false,
        }
    }

    /// Wait for every outstanding fetch and apply the outcomes in
    /// completion order.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    /// Browser back. Returns `false` at the oldest entry.
    pub fn back(&mut self) -> bool {
        match self.navigator.back().map(params_of) {
            Some(params) => {
                self.send(Action::Hydrate(params));
                true
            }
            None => false,
        }
    }

    /// Browser forward. Returns `false` at the newest entry.
    pub fn forward(&mut self) -> bool {
        match self.navigator.forward().map(params_of) {
            Some(params) => {
                self.send(Action::Hydrate(params));
                true
            }
            None => false,
        }
    }

    pub fn controller(&self) -> &BrowseController {
        &self.controller
    }

    pub fn state(&self) -> &ViewState {
        self.controller.state()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn store(&self) -> &Arc<dyn DataStore> {
        &self.store
    }

    /// Fetches spawned and not yet applied.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }
}
