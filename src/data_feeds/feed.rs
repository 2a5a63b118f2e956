//! Feed trait, configuration, and subscription handle.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, RwLock};

use crate::tokens::types::{PriceUpdate, Token};

/// Default tick period in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 2000;

/// Default per-subscriber channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Tick period in milliseconds.
    pub tick_interval_ms: u64,
    /// Per-subscriber channel capacity.
    pub channel_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl FeedConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick period in milliseconds.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Sets the per-subscriber channel capacity.
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }
}

/// Subscriber registry keyed by subscription id.
///
/// A `BTreeMap` so batches fan out in registration order.
pub(crate) type SubscriberMap = BTreeMap<u64, mpsc::Sender<Vec<PriceUpdate>>>;

/// Handle for one feed subscription.
///
/// Dropping the handle without calling [`unsubscribe`](Self::unsubscribe)
/// leaves the registration in place until the feed is dropped; explicit
/// unsubscription removes exactly this registration and is an idempotent
/// no-op afterwards.
pub struct FeedSubscription {
    id: u64,
    receiver: mpsc::Receiver<Vec<PriceUpdate>>,
    registry: Arc<RwLock<SubscriberMap>>,
}

impl FeedSubscription {
    pub(crate) fn new(
        id: u64,
        receiver: mpsc::Receiver<Vec<PriceUpdate>>,
        registry: Arc<RwLock<SubscriberMap>>,
    ) -> Self {
        Self {
            id,
            receiver,
            registry,
        }
    }

    /// Subscription identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Receives the next update batch.
    ///
    /// Returns `None` once unsubscribed and all buffered batches are drained.
    pub async fn recv(&mut self) -> Option<Vec<PriceUpdate>> {
        self.receiver.recv().await
    }

    /// Removes this registration from the feed.
    ///
    /// Only this subscription is affected; calling it again is a no-op.
    pub async fn unsubscribe(&self) {
        self.registry.write().await.remove(&self.id);
    }
}

impl std::fmt::Debug for FeedSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedSubscription").field("id", &self.id).finish()
    }
}

/// Abstract boundary for the simulated price feed.
///
/// The view layer drives the lifecycle: it connects with the tokens to
/// track, subscribes for update batches, and disconnects on teardown.
///
/// # Example
///
/// ```rust,ignore
/// let feed = MockPriceFeed::default();
/// feed.connect(tokens).await;
/// let mut sub = feed.subscribe().await;
/// while let Some(batch) = sub.recv().await {
///     store.apply_updates(&batch).await;
/// }
/// ```
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Starts (or retargets) the feed for the given tracked set.
    ///
    /// Idempotent: connecting while connected replaces the tracked set
    /// without starting a second timer.
    async fn connect(&self, tokens: Vec<Token>);

    /// Stops ticking and releases the timer.
    ///
    /// Subscribers stay registered and receive again after a reconnect.
    /// Idempotent.
    async fn disconnect(&self);

    /// Registers a new subscriber.
    async fn subscribe(&self) -> FeedSubscription;

    /// Whether the feed is currently connected.
    fn is_connected(&self) -> bool;
}
