//! The reservation list view: state, one-shot load on mount, teardown

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock, RwLockReadGuard};
use tokio_util::sync::CancellationToken;

use crate::client::ReservationClient;
use crate::config::DisplayConfig;
use crate::error::FetchError;
use crate::render;
use crate::reservation::Reservation;

/// Where the view is in its load-once lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Loaded,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Loading => write!(f, "Loading"),
            Phase::Loaded => write!(f, "Loaded"),
            Phase::Failed => write!(f, "Failed"),
        }
    }
}

/// Data owned by one view instance.
///
/// Only the view's load task mutates it, through `apply_success` and
/// `apply_failure`. The error, once set, is never cleared.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    reservations: Vec<Reservation>,
    error: Option<String>,
    resolved: bool,
}

impl ViewState {
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        match (self.resolved, self.error.is_some()) {
            (false, _) => Phase::Loading,
            (true, true) => Phase::Failed,
            (true, false) => Phase::Loaded,
        }
    }

    /// Replace the list wholesale with what the server returned
    pub(crate) fn apply_success(&mut self, reservations: Vec<Reservation>) {
        let duplicates = duplicate_keys(&reservations);
        if !duplicates.is_empty() {
            tracing::warn!(
                "Reservations contain duplicate ids {:?}; list keys are not unique",
                duplicates
            );
        }
        self.reservations = reservations;
        self.resolved = true;
    }

    /// Record the failure message; the list is left as it was
    pub(crate) fn apply_failure(&mut self, error: &FetchError) {
        self.error = Some(error.to_string());
        self.resolved = true;
    }
}

fn duplicate_keys(reservations: &[Reservation]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for key in reservations.iter().map(Reservation::key) {
        if !seen.insert(key.clone()) && !duplicates.contains(&key) {
            duplicates.push(key);
        }
    }
    duplicates
}

type ViewHandle = Arc<RwLock<ViewState>>;

/// Marks the load as finished when dropped, including on panic or abort
struct SettledGuard(Arc<watch::Sender<bool>>);

impl Drop for SettledGuard {
    fn drop(&mut self) {
        self.0.send_replace(true);
    }
}

/// Fetches reservations once when mounted and renders whatever state results.
///
/// `mount` must be called from inside a tokio runtime. Dropping the view
/// cancels a load that is still in flight.
pub struct ReservationListView {
    client: Arc<ReservationClient>,
    state: ViewHandle,
    cancel: CancellationToken,
    mounted: AtomicBool,
    settled: Arc<watch::Sender<bool>>,
}

impl fmt::Debug for ReservationListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservationListView")
            .field("client", &self.client)
            .field("mounted", &self.mounted.load(Ordering::SeqCst))
            .field("settled", &*self.settled.borrow())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl ReservationListView {
    pub fn new(client: ReservationClient) -> Self {
        let (settled, _) = watch::channel(false);
        Self {
            client: Arc::new(client),
            state: Arc::new(RwLock::new(ViewState::default())),
            cancel: CancellationToken::new(),
            mounted: AtomicBool::new(false),
            settled: Arc::new(settled),
        }
    }

    /// Read-only access to the current state
    pub async fn read(&self) -> RwLockReadGuard<'_, ViewState> {
        self.state.read().await
    }

    /// Start the one and only load. Returns false if already mounted.
    pub fn mount(&self) -> bool {
        if self.mounted.swap(true, Ordering::SeqCst) {
            tracing::debug!("View already mounted; not fetching again");
            return false;
        }

        tracing::debug!("Mounting view, fetching {}", self.client.url());
        tokio::spawn(load(
            Arc::clone(&self.client),
            Arc::clone(&self.state),
            self.cancel.clone(),
            SettledGuard(Arc::clone(&self.settled)),
        ));
        true
    }

    /// Wait for the load to finish. Any number of callers may wait at once;
    /// all return once the load is done. Returns immediately if never mounted.
    pub async fn settled(&self) {
        if !self.mounted.load(Ordering::SeqCst) {
            return;
        }
        let mut done = self.settled.subscribe();
        // The sender lives as long as `self`, so this cannot fail while we wait.
        if done.wait_for(|settled| *settled).await.is_err() {
            tracing::warn!("Reservation load signal closed before completion");
        }
    }

    /// Tear the view down. A response that arrives afterwards is discarded.
    pub fn unmount(&self) {
        tracing::debug!("Unmounting view");
        self.cancel.cancel();
    }

    pub fn is_unmounted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Render the current state as an HTML fragment
    pub async fn render(&self, display: &DisplayConfig) -> String {
        let state = self.state.read().await;
        render::render_fragment(&state, display)
    }
}

impl Drop for ReservationListView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn load(
    client: Arc<ReservationClient>,
    state: ViewHandle,
    cancel: CancellationToken,
    _settled: SettledGuard,
) {
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("View unmounted before reservations arrived");
            return;
        }
        outcome = client.fetch() => outcome,
    };

    let mut state = state.write().await;
    // Unmount may have raced the write lock.
    if cancel.is_cancelled() {
        tracing::debug!("View unmounted; discarding fetched reservations");
        return;
    }

    match outcome {
        Ok(reservations) => {
            tracing::info!("Loaded {} reservations", reservations.len());
            state.apply_success(reservations);
        }
        Err(e) => {
            tracing::error!("Error fetching reservations: {}", e);
            state.apply_failure(&e);
        }
    }
}
