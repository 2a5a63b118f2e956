//! Mock price feed.
//!
//! Simulates a real-time market data connection without any network: a
//! single timer task fires on a fixed period and emits one [`PriceUpdate`]
//! per tracked token, perturbing price by up to ±0.5%, 24h change by up to
//! ±1 percentage point, and volume by up to ±2.5%. Perturbed fields are not
//! clamped afterwards; repeated ticks can walk the 24h change outside
//! [-100, 100], matching the observed dashboard behavior.
//!
//! Updates are always computed against the tracked snapshot handed to
//! [`connect`](PriceFeed::connect), not against previously emitted updates,
//! so perturbations do not compound across ticks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::Decimal;
use crate::data_feeds::feed::{FeedConfig, FeedSubscription, PriceFeed, SubscriberMap};
use crate::tokens::types::{PriceUpdate, Token};
use crate::types::rng::UnitRng;
use crate::types::time::current_timestamp_ms;

/// Mock price feed driven by a timer task.
///
/// State machine: Disconnected → Connected (via `connect`, idempotent) →
/// Disconnected (via `disconnect`, idempotent). Exactly one timer exists
/// while connected; subscribers persist across disconnect/reconnect cycles.
pub struct MockPriceFeed {
    config: FeedConfig,
    tokens: Arc<RwLock<Vec<Token>>>,
    subscribers: Arc<RwLock<SubscriberMap>>,
    next_subscription_id: AtomicU64,
    connected: Arc<AtomicBool>,
    tick_task: Mutex<Option<JoinHandle<()>>>,
}

impl Default for MockPriceFeed {
    fn default() -> Self {
        Self::new(FeedConfig::default())
    }
}

impl MockPriceFeed {
    /// Creates a new mock feed with the given configuration.
    #[must_use]
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            tokens: Arc::new(RwLock::new(Vec::new())),
            subscribers: Arc::new(RwLock::new(SubscriberMap::new())),
            next_subscription_id: AtomicU64::new(0),
            connected: Arc::new(AtomicBool::new(false)),
            tick_task: Mutex::new(None),
        }
    }

    /// Returns the feed configuration.
    #[must_use]
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Number of tokens currently tracked.
    pub async fn tracked_count(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Number of registered subscribers.
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    async fn ensure_ticking(&self) {
        let mut guard = self.tick_task.lock().await;
        if guard.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let tokens = Arc::clone(&self.tokens);
        let subscribers = Arc::clone(&self.subscribers);
        let connected = Arc::clone(&self.connected);
        let period = Duration::from_millis(self.config.tick_interval_ms);

        *guard = Some(tokio::spawn(async move {
            let rng = UnitRng::entropy();
            // First tick one full period after connect, like the real feed.
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                if !connected.load(Ordering::SeqCst) {
                    continue;
                }
                let tracked = tokens.read().await;
                if tracked.is_empty() {
                    continue;
                }
                let now_ms = current_timestamp_ms();
                let updates: Vec<PriceUpdate> =
                    tracked.iter().map(|token| perturb(token, &rng, now_ms)).collect();
                drop(tracked);

                let subs = subscribers.read().await;
                tracing::trace!(updates = updates.len(), subscribers = subs.len(), "feed tick");
                for sender in subs.values() {
                    // A full subscriber drops this batch rather than stalling
                    // delivery to the rest.
                    let _ = sender.try_send(updates.clone());
                }
            }
        }));
    }
}

#[async_trait]
impl PriceFeed for MockPriceFeed {
    async fn connect(&self, tokens: Vec<Token>) {
        let tracked = tokens.len();
        *self.tokens.write().await = tokens;
        self.connected.store(true, Ordering::SeqCst);
        self.ensure_ticking().await;
        tracing::debug!(tracked, "feed connected");
    }

    async fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
        if let Some(handle) = self.tick_task.lock().await.take() {
            handle.abort();
        }
        tracing::debug!("feed disconnected");
    }

    async fn subscribe(&self) -> FeedSubscription {
        let id = self.next_subscription_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        self.subscribers.write().await.insert(id, tx);
        FeedSubscription::new(id, rx, Arc::clone(&self.subscribers))
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

fn perturb(token: &Token, rng: &UnitRng, now_ms: u64) -> PriceUpdate {
    let half = dec!(0.5);
    PriceUpdate::new(
        token.id.clone(),
        token.price * (Decimal::ONE + (rng.next_unit() - half) * dec!(0.01)),
        token.price_change_24h + (rng.next_unit() - half) * dec!(2),
        token.volume_24h * (Decimal::ONE + (rng.next_unit() - half) * dec!(0.05)),
        now_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::generator::generate_tokens;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_new_feed_disconnected() {
        let feed = MockPriceFeed::default();
        assert!(!feed.is_connected());
        assert_eq!(feed.tracked_count().await, 0);
        assert_eq!(feed.subscriber_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_batch_after_one_period() {
        let feed = MockPriceFeed::default();
        let mut sub = feed.subscribe().await;
        feed.connect(generate_tokens(2, 0, 0, true)).await;
        assert!(feed.is_connected());

        // Nothing lands inside the first period.
        let early = timeout(Duration::from_millis(1900), sub.recv()).await;
        assert!(early.is_err());

        // The batch lands at the period boundary, one update per token.
        let batch = timeout(Duration::from_millis(200), sub.recv())
            .await
            .expect("batch due at tick")
            .expect("channel open");
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_perturbation_bounds() {
        let tokens = generate_tokens(3, 0, 0, true);
        let feed = MockPriceFeed::default();
        feed.connect(tokens.clone()).await;
        let mut sub = feed.subscribe().await;

        let batch = sub.recv().await.unwrap();
        for (update, token) in batch.iter().zip(&tokens) {
            assert_eq!(update.token_id, token.id);
            assert!(update.price >= token.price * dec!(0.995));
            assert!(update.price <= token.price * dec!(1.005));
            assert!((update.price_change_24h - token.price_change_24h).abs() <= dec!(1));
            assert!(update.volume_24h >= token.volume_24h * dec!(0.975));
            assert!(update.volume_24h <= token.volume_24h * dec!(1.025));
            assert!(update.timestamp > 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_updates_do_not_compound_across_ticks() {
        let tokens = generate_tokens(1, 0, 0, true);
        let feed = MockPriceFeed::default();
        feed.connect(tokens.clone()).await;
        let mut sub = feed.subscribe().await;

        // Every batch perturbs the tracked snapshot, not the previous batch.
        for _ in 0..5 {
            let batch = sub.recv().await.unwrap();
            assert!(batch[0].price >= tokens[0].price * dec!(0.995));
            assert!(batch[0].price <= tokens[0].price * dec!(1.005));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_connect_keeps_single_timer() {
        let feed = MockPriceFeed::default();
        feed.connect(generate_tokens(2, 0, 0, true)).await;
        feed.connect(generate_tokens(3, 0, 0, true)).await;
        let mut sub = feed.subscribe().await;

        // Latest tracked set wins.
        assert_eq!(feed.tracked_count().await, 3);
        let first = timeout(Duration::from_millis(2100), sub.recv())
            .await
            .expect("first tick")
            .unwrap();
        assert_eq!(first.len(), 3);

        // Exactly one batch per period: a second timer would deliver again
        // immediately.
        let second = timeout(Duration::from_millis(1000), sub.recv()).await;
        assert!(second.is_err());
        let third = timeout(Duration::from_millis(1100), sub.recv()).await;
        assert!(third.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_isolation() {
        let feed = MockPriceFeed::default();
        let mut sub1 = feed.subscribe().await;
        let mut sub2 = feed.subscribe().await;
        assert_eq!(feed.subscriber_count().await, 2);

        sub1.unsubscribe().await;
        assert_eq!(feed.subscriber_count().await, 1);
        sub1.unsubscribe().await;
        assert_eq!(feed.subscriber_count().await, 1);

        feed.connect(generate_tokens(1, 0, 0, true)).await;
        let batch = sub2.recv().await.unwrap();
        assert_eq!(batch.len(), 1);

        // sub1 was removed before any tick; its channel closes with nothing
        // buffered.
        assert!(sub1.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_stops_ticks_and_keeps_subscribers() {
        let feed = MockPriceFeed::default();
        let tokens = generate_tokens(2, 0, 0, true);
        feed.connect(tokens.clone()).await;
        let mut sub = feed.subscribe().await;
        let _ = sub.recv().await.unwrap();

        feed.disconnect().await;
        assert!(!feed.is_connected());
        feed.disconnect().await;

        let silent = timeout(Duration::from_millis(10_000), sub.recv()).await;
        assert!(silent.is_err());

        // Subscribers persist across reconnects.
        feed.connect(tokens).await;
        assert_eq!(feed.subscriber_count().await, 1);
        let batch = timeout(Duration::from_millis(2100), sub.recv())
            .await
            .expect("tick after reconnect")
            .unwrap();
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_tracked_set_emits_nothing() {
        let feed = MockPriceFeed::default();
        feed.connect(Vec::new()).await;
        let mut sub = feed.subscribe().await;

        let silent = timeout(Duration::from_millis(10_000), sub.recv()).await;
        assert!(silent.is_err());
        assert!(feed.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_tick_interval() {
        let feed = MockPriceFeed::new(FeedConfig::new().with_tick_interval_ms(500));
        feed.connect(generate_tokens(1, 0, 0, true)).await;
        let mut sub = feed.subscribe().await;

        let early = timeout(Duration::from_millis(400), sub.recv()).await;
        assert!(early.is_err());
        let batch = timeout(Duration::from_millis(200), sub.recv()).await;
        assert!(batch.is_ok());
    }
}
