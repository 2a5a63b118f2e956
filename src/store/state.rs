//! Token store and its read models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::store::filter::{apply_filters, FilterConfig};
use crate::store::sort::{apply_sort, SortConfig};
use crate::tokens::types::{PriceUpdate, Token};

/// Load lifecycle of the canonical token set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The last load succeeded.
    Success,
    /// The last load failed; see the error message.
    Error,
}

/// Immutable snapshot handed to consumers.
///
/// `tokens` is the current projection, already filtered and sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreView {
    /// Filtered and sorted projection.
    pub tokens: Vec<Token>,
    /// Load lifecycle state.
    pub loading: LoadState,
    /// Last load error, if any.
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct StoreState {
    tokens: Vec<Token>,
    projection: Vec<Token>,
    filter: FilterConfig,
    sort: SortConfig,
    selected: Option<Token>,
    loading: LoadState,
    error: Option<String>,
}

impl StoreState {
    /// Rebuilds the projection from the canonical set.
    fn recompute(&mut self) {
        self.projection = apply_sort(apply_filters(&self.tokens, &self.filter), self.sort);
    }
}

/// Owns the canonical token collection and its filtered+sorted projection.
///
/// Every mutation leaves the projection consistent with the canonical set,
/// the filter, and the sort before the call returns. The one deliberate
/// exception is [`set_sort`](Self::set_sort), which reorders the current
/// projection without re-deriving membership.
///
/// All methods take `&self`; the store is shared behind an `Arc` between
/// the loader and the live-update pump.
#[derive(Debug, Default)]
pub struct TokenStore {
    state: RwLock<StoreState>,
}

impl TokenStore {
    /// Creates an empty store with no filter and the default sort.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the canonical set wholesale and marks the load successful.
    ///
    /// The projection is recomputed under the current filter and sort.
    pub async fn replace_all(&self, tokens: Vec<Token>) {
        let mut state = self.state.write().await;
        state.tokens = tokens;
        state.loading = LoadState::Success;
        state.error = None;
        state.recompute();
        tracing::debug!(
            canonical = state.tokens.len(),
            projected = state.projection.len(),
            "token set replaced"
        );
    }

    /// Applies a batch of price updates to the canonical set by token id.
    ///
    /// Updates whose id matches no canonical token are ignored; tokens with
    /// no matching update are untouched. Only the update's price, 24h
    /// change, volume, and timestamp land on the token.
    pub async fn apply_updates(&self, updates: &[PriceUpdate]) {
        if updates.is_empty() {
            return;
        }
        let index: HashMap<&str, &PriceUpdate> =
            updates.iter().map(|u| (u.token_id.as_str(), u)).collect();

        let mut state = self.state.write().await;
        let mut applied = 0usize;
        for token in &mut state.tokens {
            if let Some(update) = index.get(token.id.as_str()) {
                token.apply_update(update);
                applied += 1;
            }
        }
        state.recompute();
        tracing::trace!(batch = updates.len(), applied, "price updates applied");
    }

    /// Replaces the filter and re-derives the projection from the
    /// canonical set.
    pub async fn set_filter(&self, filter: FilterConfig) {
        let mut state = self.state.write().await;
        state.filter = filter;
        state.recompute();
    }

    /// Edits the current filter in place, then re-derives the projection.
    ///
    /// Untouched predicates keep their values, so callers can tighten one
    /// predicate without restating the rest.
    pub async fn update_filter(&self, edit: impl FnOnce(&mut FilterConfig) + Send) {
        let mut state = self.state.write().await;
        edit(&mut state.filter);
        state.recompute();
    }

    /// Clears every predicate and re-derives the projection.
    pub async fn reset_filter(&self) {
        self.set_filter(FilterConfig::default()).await;
    }

    /// Replaces the sort and reorders the current projection.
    ///
    /// Membership is not re-derived: tokens excluded by the current filter
    /// stay excluded even if the canonical set changed underneath.
    pub async fn set_sort(&self, sort: SortConfig) {
        let mut state = self.state.write().await;
        state.sort = sort;
        let projection = std::mem::take(&mut state.projection);
        state.projection = apply_sort(projection, sort);
    }

    /// Sets or clears the selected token, the detail-view target.
    ///
    /// The selection is an independent slot: it is not a member of the
    /// projection and survives canonical-set replacement.
    pub async fn set_selected_token(&self, token: Option<Token>) {
        self.state.write().await.selected = token;
    }

    /// Currently selected token, if any.
    pub async fn selected_token(&self) -> Option<Token> {
        self.state.read().await.selected.clone()
    }

    /// Sets the load lifecycle state.
    pub async fn set_loading(&self, loading: LoadState) {
        self.state.write().await.loading = loading;
    }

    /// Sets or clears the load error.
    ///
    /// Setting an error also moves the lifecycle to [`LoadState::Error`];
    /// clearing it leaves the lifecycle alone.
    pub async fn set_error(&self, error: Option<String>) {
        let mut state = self.state.write().await;
        if error.is_some() {
            state.loading = LoadState::Error;
        }
        state.error = error;
    }

    /// Snapshot of the projection plus lifecycle state.
    pub async fn view(&self) -> StoreView {
        let state = self.state.read().await;
        StoreView {
            tokens: state.projection.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Current projection only.
    pub async fn projection(&self) -> Vec<Token> {
        self.state.read().await.projection.clone()
    }

    /// Canonical set, unfiltered and in arrival order.
    pub async fn canonical_tokens(&self) -> Vec<Token> {
        self.state.read().await.tokens.clone()
    }

    /// Current filter configuration.
    pub async fn filter(&self) -> FilterConfig {
        self.state.read().await.filter.clone()
    }

    /// Current sort configuration.
    pub async fn sort(&self) -> SortConfig {
        self.state.read().await.sort
    }
}
