//! Convenience re-exports for the common surface of the crate.
//!
//! ```rust
//! use token_pulse_rs::prelude::*;
//! ```

pub use crate::dashboard::Dashboard;
pub use crate::data_feeds::feed::{
    FeedConfig, FeedSubscription, PriceFeed, DEFAULT_TICK_INTERVAL_MS,
};
pub use crate::data_feeds::mock::MockPriceFeed;
pub use crate::fetch::{ApiResponse, FetchConfig, RetryConfig, TokenFetcher};
pub use crate::store::filter::{apply_filters, FilterConfig};
pub use crate::store::sort::{apply_sort, SortConfig, SortDirection, SortField};
pub use crate::store::state::{LoadState, StoreView, TokenStore};
pub use crate::tokens::generator::{generate_token, generate_tokens};
pub use crate::tokens::types::{Chain, NetPressure, PriceUpdate, Token, TokenCategory};
pub use crate::types::error::{PulseError, PulseResult};
pub use crate::types::rng::UnitRng;
pub use crate::types::time::{
    current_timestamp_ms, DAY_MS, FROZEN_FETCH_TIMESTAMP_MS, FROZEN_REFERENCE_MS,
};
pub use crate::{dec, Decimal};
