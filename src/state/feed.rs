//! Donation feed — the fetched collection behind the dashboard list.
//!
//! DESIGN
//! ======
//! The feed never merges: every applied load replaces the whole collection
//! with what the service returned. Each load takes a generation number
//! before it awaits the network, and its result is applied only if no newer
//! load has started since, so a slow early response cannot overwrite a
//! newer one.
//!
//! Reloads are requested through a `watch` counter. One background task per
//! feed waits on it and runs one `load()` per observed change; requests that
//! arrive while a load is pending coalesce into the next one. A second
//! `watch` carries the generation of the newest completed load, so callers
//! can `settled().await` instead of polling `loading`.
//!
//! ERROR HANDLING
//! ==============
//! A failed load keeps the prior items, clears `loading`, logs, and records
//! the `FetchError` in state so the view can offer a retry.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::stats::{ImpactStats, derive_stats};
use crate::error::FetchError;
use crate::net::api::DonationApi;
use crate::net::types::{Donation, ListScope};
use crate::session::Session;

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

/// Snapshot of the donation list as the view renders it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedState {
    pub items: Vec<Donation>,
    pub loading: bool,
    pub error: Option<FetchError>,
    /// Generation of the newest load started.
    pub generation: u64,
    /// Generation whose result is currently shown, if any.
    pub applied_generation: Option<u64>,
}

impl FeedState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What happened to a completed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result replaced the collection; carries the item count.
    Applied(usize),
    /// A newer load started first; the result was dropped.
    Superseded,
}

/// Owner of the fetched donation collection. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct DonationFeed {
    api: Arc<dyn DonationApi>,
    session: Session,
    scope: ListScope,
    state: Arc<RwLock<FeedState>>,
    reload_tx: Arc<watch::Sender<u64>>,
    /// Generation of the newest load that completed without being superseded.
    settled_tx: Arc<watch::Sender<u64>>,
}

impl DonationFeed {
    #[must_use]
    pub fn new(api: Arc<dyn DonationApi>, session: Session, scope: ListScope) -> Self {
        let (reload_tx, _) = watch::channel(0);
        let (settled_tx, _) = watch::channel(0);
        Self {
            api,
            session,
            scope,
            state: Arc::new(RwLock::new(FeedState::default())),
            reload_tx: Arc::new(reload_tx),
            settled_tx: Arc::new(settled_tx),
        }
    }

    #[must_use]
    pub fn scope(&self) -> ListScope {
        self.scope
    }

    /// Fetch the full collection and replace local items with it.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` when the service cannot be read. The error is
    /// also recorded in state, and prior items are kept.
    pub async fn load(&self) -> Result<LoadOutcome, FetchError> {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.loading = true;
            state.generation
        };

        let result = self
            .api
            .list_donations(self.scope, self.session.token())
            .await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(generation, newest = state.generation, "dropping superseded donation list");
            return Ok(LoadOutcome::Superseded);
        }
        state.loading = false;
        self.settled_tx.send_replace(generation);

        match result {
            Ok(items) => {
                let items = dedupe_by_id(items);
                let count = items.len();
                state.items = items;
                state.error = None;
                state.applied_generation = Some(generation);
                debug!(generation, count, "donation list applied");
                Ok(LoadOutcome::Applied(count))
            }
            Err(e) => {
                let err = FetchError::from(e);
                warn!(error = %err, generation, "error fetching donations");
                state.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Signal the reload task to fetch again.
    pub fn request_reload(&self) {
        self.reload_tx.send_modify(|n| *n = n.wrapping_add(1));
    }

    /// Spawn the task that answers `request_reload`. Abort the handle to stop it.
    #[must_use]
    pub fn spawn_reload_task(&self) -> JoinHandle<()> {
        let feed = self.clone();
        let mut rx = self.reload_tx.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                // Failures are already logged and recorded by `load`.
                let _ = feed.load().await;
            }
        })
    }

    /// Wait until no load is in flight and report how the newest one ended.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` recorded by the newest completed load.
    pub async fn settled(&self) -> Result<(), FetchError> {
        let mut rx = self.settled_tx.subscribe();
        loop {
            {
                let state = self.state.read().await;
                if !state.loading {
                    return state.error.clone().map_or(Ok(()), Err);
                }
            }
            // The sender lives as long as `self`, so this only fails if it is gone.
            if rx.changed().await.is_err() {
                return Ok(());
            }
        }
    }

    pub async fn snapshot(&self) -> FeedState {
        self.state.read().await.clone()
    }

    pub async fn donations(&self) -> Vec<Donation> {
        self.state.read().await.items.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn last_error(&self) -> Option<FetchError> {
        self.state.read().await.error.clone()
    }

    /// Aggregate stats over the current collection.
    pub async fn derive_stats(&self) -> ImpactStats {
        derive_stats(&self.state.read().await.items)
    }
}

/// Keep the first record for each identifier, preserving service order.
fn dedupe_by_id(items: Vec<Donation>) -> Vec<Donation> {
    let mut seen = HashSet::with_capacity(items.len());
    let before = items.len();
    let kept: Vec<Donation> = items
        .into_iter()
        .filter(|d| seen.insert(d.id.clone()))
        .collect();
    if kept.len() != before {
        warn!(dropped = before - kept.len(), "donation list repeated identifiers");
    }
    kept
}
