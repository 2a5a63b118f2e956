//! Dashboard composition root.
//!
//! [`Dashboard`] wires the three layers together: it loads tokens through a
//! [`TokenFetcher`] into a shared [`TokenStore`], and pumps live update
//! batches from a [`PriceFeed`] subscription into the same store. The store
//! stays the single source of truth; the feed and fetcher never see each
//! other.

use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::data_feeds::feed::PriceFeed;
use crate::data_feeds::mock::MockPriceFeed;
use crate::fetch::TokenFetcher;
use crate::store::state::{LoadState, TokenStore};
use crate::types::error::PulseResult;

struct LivePump {
    handle: JoinHandle<()>,
    shutdown: oneshot::Sender<()>,
}

/// Ties the fetcher, store, and feed into one lifecycle.
pub struct Dashboard {
    store: Arc<TokenStore>,
    feed: Arc<dyn PriceFeed>,
    fetcher: TokenFetcher,
    live: Mutex<Option<LivePump>>,
}

impl Dashboard {
    /// Creates a dashboard over a fresh store.
    #[must_use]
    pub fn new(fetcher: TokenFetcher, feed: Arc<dyn PriceFeed>) -> Self {
        Self {
            store: Arc::new(TokenStore::new()),
            feed,
            fetcher,
            live: Mutex::new(None),
        }
    }

    /// Creates a frozen dashboard: deterministic data over a default mock
    /// feed. Intended for snapshot-style tests.
    #[must_use]
    pub fn frozen() -> Self {
        Self::new(TokenFetcher::frozen(), Arc::new(MockPriceFeed::default()))
    }

    /// Shared handle to the store.
    #[must_use]
    pub fn store(&self) -> Arc<TokenStore> {
        Arc::clone(&self.store)
    }

    /// Shared handle to the feed.
    #[must_use]
    pub fn feed(&self) -> Arc<dyn PriceFeed> {
        Arc::clone(&self.feed)
    }

    /// Loads the token set into the store, retrying on fetch failure.
    ///
    /// On success the canonical set is replaced and, if live updates are
    /// running, the feed is retargeted at the new set. On exhaustion the
    /// store carries the error and the previous token set is kept.
    ///
    /// # Errors
    ///
    /// Returns the final
    /// [`PulseError::FetchFailed`](crate::types::error::PulseError) once the
    /// retry schedule is exhausted.
    pub async fn load(&self) -> PulseResult<()> {
        self.store.set_loading(LoadState::Loading).await;
        match self.fetcher.fetch_with_retry().await {
            Ok(response) => {
                tracing::info!(tokens = response.data.len(), "token load complete");
                self.store.replace_all(response.data).await;
                if self.is_live().await {
                    self.feed.connect(self.store.canonical_tokens().await).await;
                }
                Ok(())
            }
            Err(err) => {
                self.store.set_error(Some(err.message().to_string())).await;
                Err(err)
            }
        }
    }

    /// Connects the feed to the current canonical set and starts pumping
    /// update batches into the store.
    ///
    /// Idempotent: if the pump is already running, the feed is simply
    /// retargeted at the current canonical set.
    pub async fn start_live_updates(&self) {
        let mut guard = self.live.lock().await;
        self.feed.connect(self.store.canonical_tokens().await).await;
        if guard.as_ref().is_some_and(|pump| !pump.handle.is_finished()) {
            return;
        }

        let mut subscription = self.feed.subscribe().await;
        let store = Arc::clone(&self.store);
        let (shutdown, mut shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        subscription.unsubscribe().await;
                        break;
                    }
                    batch = subscription.recv() => match batch {
                        Some(updates) => store.apply_updates(&updates).await,
                        None => break,
                    },
                }
            }
        });
        *guard = Some(LivePump { handle, shutdown });
        tracing::debug!("live updates started");
    }

    /// Disconnects the feed and stops the pump, unsubscribing its
    /// registration. Idempotent.
    pub async fn stop_live_updates(&self) {
        self.feed.disconnect().await;
        if let Some(pump) = self.live.lock().await.take() {
            let _ = pump.shutdown.send(());
            let _ = pump.handle.await;
            tracing::debug!("live updates stopped");
        }
    }

    /// Whether the update pump is running.
    pub async fn is_live(&self) -> bool {
        self.live
            .lock()
            .await
            .as_ref()
            .is_some_and(|pump| !pump.handle.is_finished())
    }
}
