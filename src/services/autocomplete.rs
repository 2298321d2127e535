//! Movie title suggestions for free-text inputs.
//!
//! [`lookup_suggestions`] is a single gated lookup. [`SuggestionField`] wraps it
//! with a debounce and a cancellable task handle so that only the latest input
//! of a keystroke burst ever reaches the provider or the field state.

use crate::{error::AppResult, models::Movie, services::providers::MovieProvider};
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Inputs shorter than this (after trimming) never trigger a lookup
pub const MIN_QUERY_CHARS: usize = 2;

/// Quiet period after the last keystroke before a lookup is issued
pub const DEBOUNCE: Duration = Duration::from_millis(350);

/// Whether `input` is long enough to look up
pub fn is_queryable(input: &str) -> bool {
    input.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Looks up suggestions for `input` without debouncing
///
/// Short inputs yield an empty list without touching the provider.
pub async fn lookup_suggestions(
    provider: &dyn MovieProvider,
    input: &str,
) -> AppResult<Vec<Movie>> {
    if !is_queryable(input) {
        return Ok(Vec::new());
    }

    let hits = provider.search(input).await?;
    Ok(hits.into_iter().map(Movie::from).collect())
}

/// Observable state of one input field's suggestion list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    /// Bumped on every input; a lookup only applies while its generation is current
    pub generation: u64,
    /// Input the current suggestions (or pending lookup) belong to
    pub query: String,
    pub suggestions: Vec<Movie>,
    pub loading: bool,
}

/// Debounced suggestion lookups for a single input field
///
/// Every call to [`SuggestionField::input`] cancels the previous burst's token,
/// which aborts both its pending debounce and any in-flight request.
pub struct SuggestionField {
    provider: Arc<dyn MovieProvider>,
    debounce: Duration,
    pending: Option<CancellationToken>,
    state: Arc<watch::Sender<SuggestionState>>,
}

impl SuggestionField {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self::with_debounce(provider, DEBOUNCE)
    }

    pub fn with_debounce(provider: Arc<dyn MovieProvider>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SuggestionState::default());
        Self {
            provider,
            debounce,
            pending: None,
            state: Arc::new(state),
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn current(&self) -> SuggestionState {
        self.state.borrow().clone()
    }

    /// Records a new input value, superseding any pending lookup
    pub fn input(&mut self, value: &str) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }

        let query = value.to_string();
        let queryable = is_queryable(&query);
        let mut generation = 0;

        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.query = query.clone();
            state.loading = queryable;
            if !queryable {
                state.suggestions.clear();
            }
        });

        if !queryable {
            return;
        }

        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let provider = self.provider.clone();
        let state = self.state.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            let lookup = async {
                tokio::time::sleep(debounce).await;
                lookup_suggestions(provider.as_ref(), &query).await
            };

            let suggestions = tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!(query = %query, "Suggestion lookup superseded");
                    return;
                }
                result = lookup => match result {
                    Ok(suggestions) => suggestions,
                    Err(e) => {
                        tracing::warn!(query = %query, error = %e, "Suggestion lookup failed");
                        Vec::new()
                    }
                },
            };

            let applied = state.send_if_modified(|current| {
                if current.generation != generation {
                    return false;
                }
                current.suggestions = suggestions;
                current.loading = false;
                true
            });

            if !applied {
                tracing::trace!(query = %query, "Dropped stale suggestions");
            }
        });
    }

    /// Accepts a suggestion: the field takes its title and the list closes
    pub fn apply(&mut self, title: &str) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }

        self.state.send_modify(|state| {
            state.generation += 1;
            state.query = title.to_string();
            state.suggestions.clear();
            state.loading = false;
        });
    }
}

impl Drop for SuggestionField {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}
