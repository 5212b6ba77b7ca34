//! The coordinator that owns all tracking state and drives the backend.
//!
//! A [`Tracker`] holds one [`TrackerState`] behind a mutex: the active
//! filter, the product store, per-product recheck state, the add-form state,
//! and the single user-visible error slot. Every state mutation goes through
//! the named transitions here (replace, append, status update); nothing else
//! touches the store.
//!
//! Locking discipline: every backend call is a suspension point, and the
//! mutex is never held across one. Workflows snapshot what they need under
//! the lock, release it, await the call, then re-acquire the lock to apply
//! the outcome. Each replace/append/status-update is therefore atomic with
//! respect to readers, and concurrent workflows interleave only at the
//! suspension points.

use std::collections::HashSet;

use parking_lot::Mutex;

use pricewatch_client::{BackendClient, ClientError};
use pricewatch_core::{Filter, Product, ProductId};

use crate::error::TrackerError;
use crate::recheck::RecheckCoordinator;
use crate::store::ProductStore;

/// Client synchronization core for the tracked-product list.
pub struct Tracker {
    client: BackendClient,
    state: Mutex<TrackerState>,
}

#[derive(Default)]
struct TrackerState {
    filter: Filter,
    /// Bumped on every filter mutation. A list response is applied only if
    /// the generation it was issued under is still current; anything else is
    /// a stale response and is discarded.
    generation: u64,
    store: ProductStore,
    rechecks: RecheckCoordinator,
    url_input: String,
    submitting: bool,
    last_error: Option<String>,
}

impl Tracker {
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            state: Mutex::new(TrackerState::default()),
        }
    }

    // ---- Filter State ----------------------------------------------------

    /// Sets the search text and refetches the list for the new filter.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Backend`] when the refetch fails; the store
    /// keeps its previous contents.
    pub async fn set_search(&self, search: impl Into<String>) -> Result<(), TrackerError> {
        {
            let mut state = self.state.lock();
            state.filter.search = search.into();
            state.generation += 1;
        }
        self.refresh().await
    }

    /// Sets or clears the minimum price bound and refetches.
    ///
    /// `None` removes the constraint entirely; an empty input field maps to
    /// `None` at the caller boundary, never to `0`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Backend`] when the refetch fails.
    pub async fn set_min_price(&self, bound: Option<f64>) -> Result<(), TrackerError> {
        {
            let mut state = self.state.lock();
            state.filter.min_price = bound;
            state.generation += 1;
        }
        self.refresh().await
    }

    /// Sets or clears the maximum price bound and refetches.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Backend`] when the refetch fails.
    pub async fn set_max_price(&self, bound: Option<f64>) -> Result<(), TrackerError> {
        {
            let mut state = self.state.lock();
            state.filter.max_price = bound;
            state.generation += 1;
        }
        self.refresh().await
    }

    // ---- List refetch ----------------------------------------------------

    /// Fetches the list for the current filter and replaces the store.
    ///
    /// The filter and generation are snapshotted at issuance. If the filter
    /// changed while the request was in flight, the response no longer
    /// describes current state and is discarded instead of overwriting a
    /// newer filter's result. On failure the previous store contents stay in
    /// place and the error slot is set.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Backend`] when the list call fails.
    pub async fn refresh(&self) -> Result<(), TrackerError> {
        let (filter, generation) = {
            let state = self.state.lock();
            (state.filter.clone(), state.generation)
        };

        match self.client.list_products(&filter).await {
            Ok(products) => {
                let mut state = self.state.lock();
                if state.generation != generation {
                    tracing::debug!(
                        issued_generation = generation,
                        current_generation = state.generation,
                        "discarding stale product list response"
                    );
                    return Ok(());
                }
                state.store.replace(products);
                let tracked: HashSet<ProductId> =
                    state.store.products().iter().map(|p| p.id).collect();
                state.rechecks.retain_tracked(&tracked);
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.lock();
                state.last_error = Some("Error fetching products".to_string());
                Err(TrackerError::Backend(err))
            }
        }
    }

    // ---- Add-Product Workflow --------------------------------------------

    /// Sets the add-form URL input.
    pub fn set_url_input(&self, value: impl Into<String>) {
        self.state.lock().url_input = value.into();
    }

    /// Submits the add form: validates the URL input, calls the backend, and
    /// appends the created product to the store.
    ///
    /// Empty input and already-tracked URLs fail before any network call.
    /// While a submission is in flight the form is busy and further submits
    /// are ignored. On success the input is cleared; on failure it is
    /// preserved so the user can correct and resubmit.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::Validation`] for empty or already-tracked input.
    /// - [`TrackerError::Backend`] when the create call fails.
    pub async fn add_product(&self) -> Result<(), TrackerError> {
        let product_url = {
            let mut state = self.state.lock();
            if state.submitting {
                tracing::debug!("submit ignored; a submission is already in flight");
                return Ok(());
            }
            state.last_error = None;

            if state.url_input.is_empty() {
                return Err(fail_validation(&mut state, "URL cannot be empty"));
            }
            if state.store.contains_url(&state.url_input) {
                return Err(fail_validation(&mut state, "Product already exists"));
            }

            state.submitting = true;
            state.url_input.clone()
        };

        let result = self.client.create_product(&product_url).await;

        let mut state = self.state.lock();
        state.submitting = false;
        match result {
            Ok(product) => {
                state.store.append(product);
                state.url_input.clear();
                Ok(())
            }
            Err(err) => {
                surface_backend_error(&mut state, &err, "Error adding product");
                Err(TrackerError::Backend(err))
            }
        }
    }

    // ---- Recheck Coordinator ---------------------------------------------

    /// Triggers an on-demand price recheck for a tracked product.
    ///
    /// The product transitions `Idle → Rechecking`, the backend re-scrapes
    /// its source URL, and on completion — success or failure — the whole
    /// list is refetched for the current filter before the product returns
    /// to `Idle`. A trigger while already `Rechecking` is ignored. A recheck
    /// failure sets the error slot but still refetches and still ends
    /// `Idle`, so a transient scrape failure cannot leave the product stuck
    /// busy.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::UnknownProduct`] when `id` is not tracked.
    /// - [`TrackerError::Backend`] when the recheck call or the subsequent
    ///   refetch fails.
    pub async fn recheck(&self, id: ProductId) -> Result<(), TrackerError> {
        let product_url = {
            let mut state = self.state.lock();
            let url = match state.store.get(id) {
                Some(product) => product.url.clone(),
                None => return Err(TrackerError::UnknownProduct { id }),
            };
            if !state.rechecks.begin(id) {
                tracing::debug!(product_id = id, "recheck ignored; already in flight");
                return Ok(());
            }
            url
        };

        let recheck_result = self.client.recheck_product(&product_url).await;
        if let Err(err) = &recheck_result {
            let mut state = self.state.lock();
            surface_backend_error(&mut state, err, "Error rechecking price");
        }

        // Refetch regardless of the recheck outcome; only then go Idle, so
        // the busy window spans the whole recheck-then-refetch sequence.
        let refresh_result = self.refresh().await;
        self.state.lock().rechecks.finish(id);

        recheck_result?;
        refresh_result
    }

    // ---- UI contract accessors -------------------------------------------

    /// Snapshot of the tracked products in backend order.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state.lock().store.products().to_vec()
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        self.state.lock().store.len()
    }

    #[must_use]
    pub fn filter(&self) -> Filter {
        self.state.lock().filter.clone()
    }

    #[must_use]
    pub fn url_input(&self) -> String {
        self.state.lock().url_input.clone()
    }

    /// `true` while an add submission is in flight; the submit control is
    /// disabled exactly then.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state.lock().submitting
    }

    /// `true` while a recheck for `id` is in flight; the per-product action
    /// control is disabled exactly then.
    #[must_use]
    pub fn is_rechecking(&self, id: ProductId) -> bool {
        self.state.lock().rechecks.is_rechecking(id)
    }

    /// The single user-visible error message. Last error wins; never queued.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    /// Clears the error slot, e.g. when the user dismisses the message.
    pub fn clear_error(&self) {
        self.state.lock().last_error = None;
    }
}

/// Records a validation failure in the error slot and builds the matching
/// error value.
fn fail_validation(state: &mut TrackerState, message: &str) -> TrackerError {
    state.last_error = Some(message.to_string());
    TrackerError::Validation {
        message: message.to_string(),
    }
}

/// Fills the error slot from a backend failure: the backend's rejection
/// message verbatim when present, the workflow's generic message otherwise.
fn surface_backend_error(state: &mut TrackerState, err: &ClientError, fallback: &str) {
    state.last_error = Some(
        err.rejection_message()
            .map_or_else(|| fallback.to_string(), str::to_owned),
    );
}
