//! # Token Pulse
//!
//! Core library for a real-time token screener dashboard. The dashboard shows
//! three live columns of tokens — new pairs, final stretch, and migrated —
//! each row updating as simulated market data arrives. This crate implements
//! everything below the rendering layer:
//!
//! - **Mock data generator**: produces token records for the three lifecycle
//!   categories, either from platform entropy or from a seeded generator that
//!   yields identical output on every run (for visual-regression snapshots).
//! - **Simulated price feed**: tracks a set of tokens and, on a fixed tick,
//!   perturbs price / 24h change / volume and broadcasts the batch to every
//!   subscriber.
//! - **Derived-state store**: owns the canonical token collection plus filter
//!   and sort configuration, and recomputes a filtered+sorted projection on
//!   every mutation.
//! - **Fetcher**: the initial-load collaborator, with simulated latency,
//!   failure injection, and exponential backoff.
//! - **Dashboard**: an explicit composition root wiring feed output into the
//!   store.
//!
//! The view layer consumes only plain data: it reads [`store::StoreView`]
//! snapshots and drives the feed lifecycle. Nothing here talks to a network.
//!
//! ## Quick Start
//!
//! ```rust
//! use token_pulse_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = TokenStore::new();
//!
//!     // Deterministic generation: same seeds, same tokens, every run.
//!     let tokens = generate_tokens(20, 15, 25, true);
//!     store.replace_all(tokens).await;
//!
//!     store
//!         .set_filter(FilterConfig::default().with_category(TokenCategory::NewPairs))
//!         .await;
//!     store
//!         .set_sort(SortConfig::new(SortField::MarketCap, SortDirection::Desc))
//!         .await;
//!
//!     let view = store.view().await;
//!     assert_eq!(view.tokens.len(), 20);
//! }
//! ```
//!
//! ## Live updates
//!
//! ```rust,ignore
//! let dashboard = Dashboard::new(fetcher, Arc::new(MockPriceFeed::default()));
//! dashboard.load().await?;
//! dashboard.start_live_updates().await;
//! // ... the store projection now refreshes on every feed tick ...
//! dashboard.stop_live_updates().await;
//! ```
//!
//! ## Determinism
//!
//! Frozen mode exists for snapshot testing a rendered dashboard: the
//! generator reseeds a linear-congruential generator per entity, creation
//! times anchor to a fixed reference instant, and the fetcher neither sleeps
//! nor fails. The feed is never started in frozen mode; that decision belongs
//! to the embedding application.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Re-export Decimal for use throughout the library
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Common types: errors, timestamps, and unit-interval randomness.
pub mod types;

/// Token data model and the mock data generator.
pub mod tokens;

/// Simulated market data feed: the `PriceFeed` trait and its mock
/// implementation.
pub mod data_feeds;

/// Derived-state store: canonical tokens, filter/sort configuration, and the
/// recomputed projection.
pub mod store;

/// Initial-load collaborator: simulated fetch with retry and backoff.
pub mod fetch;

/// Composition root wiring the feed into the store.
pub mod dashboard;

/// Prelude module for convenient imports.
///
/// Import all commonly used types with:
/// ```rust
/// use token_pulse_rs::prelude::*;
/// ```
pub mod prelude;
