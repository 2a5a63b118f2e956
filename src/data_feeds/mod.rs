//! Simulated market data feed.
//!
//! The feed tracks a set of tokens and, on a fixed tick, perturbs each
//! token's price, 24h change, and volume, broadcasting the batch to every
//! subscriber. It never reads or writes store state; it only hands update
//! batches to whoever subscribed.

/// The `PriceFeed` trait, feed configuration, and subscription handle.
pub mod feed;

/// Mock feed implementation driven by a timer task.
pub mod mock;

pub use feed::{FeedConfig, FeedSubscription, PriceFeed, DEFAULT_TICK_INTERVAL_MS};
pub use mock::MockPriceFeed;
