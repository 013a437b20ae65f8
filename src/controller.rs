//! Candidate query controller
//!
//! Owns the search text, filter selection and current page, and keeps
//! `ResultState` consistent with their latest combination. Every mutation
//! re-derives the query and issues exactly one request; the previous
//! request is cancelled and, should it still complete, its outcome is
//! dropped because its generation no longer matches. Last request wins.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiError, CandidateSource, fetch_cancellable};
use crate::models::{Candidate, CandidatePage};
use crate::query::{FilterKey, FilterState, QueryParams, derive_params};

/// Message shown for any failed request
pub const FETCH_ERROR_MESSAGE: &str = "Unable to load candidates. Please try again.";

/// Result of one issued request, delivered back to the event loop
#[derive(Debug)]
pub struct FetchCompletion {
    pub generation: u64,
    pub outcome: Result<CandidatePage, ApiError>,
}

/// Read-only view of the latest accepted response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultState {
    pub candidates: Vec<Candidate>,
    pub total: u64,
    pub total_pages: u64,
    pub loading: bool,
    pub error: Option<String>,
}

/// The in-flight request, if any
#[derive(Debug)]
struct InFlight {
    generation: u64,
    cancel: CancellationToken,
}

/// Owner of search, filter and page state.
///
/// Completions are posted to `completions` as `E`, so the controller can
/// feed an event loop's own message type.
pub struct QueryController<S, E = FetchCompletion> {
    source: Arc<S>,
    completions: mpsc::Sender<E>,

    search: String,
    filters: FilterState,
    page: u32,

    result: ResultState,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl<S, E> QueryController<S, E>
where
    S: CandidateSource,
    E: From<FetchCompletion> + Send + 'static,
{
    /// Create a controller. No request is issued until the first
    /// mutation or an explicit `refresh()`.
    pub fn new(source: Arc<S>, completions: mpsc::Sender<E>) -> Self {
        Self {
            source,
            completions,
            search: String::new(),
            filters: FilterState::default(),
            page: 1,
            result: ResultState::default(),
            generation: 0,
            in_flight: None,
        }
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn result(&self) -> &ResultState {
        &self.result
    }

    /// Parameters for the current inputs
    #[must_use]
    pub fn params(&self) -> QueryParams {
        derive_params(&self.search, &self.filters, self.page)
    }

    /// Generation of the most recently issued request
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_search(&mut self, value: impl Into<String>) {
        self.search = value.into();
        self.page = 1;
        self.refresh();
    }

    pub fn set_filter(&mut self, key: FilterKey, value: &str, included: bool) {
        self.filters = self.filters.with_value(key, value, included);
        self.page = 1;
        self.refresh();
    }

    pub fn set_job_filter(&mut self, job_id: &str, included: bool) {
        self.filters = self.filters.with_job(job_id, included);
        self.page = 1;
        self.refresh();
    }

    /// Move to `page`; search and filters are left alone
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.refresh();
    }

    /// Clear every filter but keep the search text
    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
        self.page = 1;
        self.refresh();
    }

    /// Issue a request for the current inputs, superseding any in flight
    pub fn refresh(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(generation = previous.generation, "cancelling superseded request");
            previous.cancel.cancel();
        }

        self.generation += 1;
        let generation = self.generation;
        let params = self.params();
        let cancel = CancellationToken::new();

        self.result.loading = true;
        self.result.error = None;
        self.in_flight = Some(InFlight {
            generation,
            cancel: cancel.clone(),
        });

        tracing::debug!(generation, ?params, "issuing candidates request");

        let source = Arc::clone(&self.source);
        let tx = self.completions.clone();
        tokio::spawn(async move {
            let outcome = fetch_cancellable(source.as_ref(), &params, &cancel).await;
            if let Err(err) = &outcome
                && err.is_cancelled()
            {
                return;
            }
            // Completions are never dropped: a lost one would leave `loading` stuck
            let completion = FetchCompletion { generation, outcome };
            if tx.send(completion.into()).await.is_err() {
                tracing::debug!(generation, "completion receiver closed");
            }
        });
    }

    /// Fold a finished request into `ResultState`.
    ///
    /// Returns true if the state changed.
    pub fn apply(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { generation, outcome } = completion;

        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale completion"
            );
            return false;
        }

        match outcome {
            Err(ApiError::Cancelled) => return false,
            Ok(page) => {
                tracing::debug!(
                    generation,
                    total = page.total,
                    total_pages = page.total_pages,
                    "candidates loaded"
                );
                self.result.candidates = page.candidates;
                self.result.total = page.total;
                self.result.total_pages = page.total_pages;
                self.result.error = None;
            }
            Err(err) => {
                tracing::error!(generation, error = %err, "error fetching candidates");
                self.result.error = Some(FETCH_ERROR_MESSAGE.to_string());
                self.result.candidates.clear();
            }
        }

        self.result.loading = false;
        self.in_flight = None;
        true
    }
}

impl<S, E> Drop for QueryController<S, E> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
    }
}
