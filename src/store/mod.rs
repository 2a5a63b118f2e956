//! Derived-state store.
//!
//! [`TokenStore`] owns the canonical token collection plus the filter and
//! sort configuration, and keeps a filtered+sorted projection consistent
//! with them after every mutation. Consumers only ever see plain data
//! snapshots ([`StoreView`]); the store never talks to the feed or the view
//! layer directly.

/// Filter configuration and predicate evaluation.
pub mod filter;

/// Sort configuration and typed key extraction.
pub mod sort;

/// The store itself and its read models.
pub mod state;

pub use filter::{apply_filters, FilterConfig};
pub use sort::{apply_sort, SortConfig, SortDirection, SortField};
pub use state::{LoadState, StoreView, TokenStore};
