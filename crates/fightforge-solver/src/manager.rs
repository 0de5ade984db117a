//! Background search manager.

use std::sync::Arc;

use fightforge_config::OptimizerConfig;
use fightforge_core::{FightForgeError, Result};
use fightforge_prices::PriceSource;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::basic::run_search_with_channel;
use crate::cancel::CancelToken;
use crate::event::{SearchEvent, SearchOutcome};
use crate::request::SearchRequest;
use crate::space::SearchSpace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    NotStarted,
    Solving,
    Terminated,
}

struct ActiveSearch {
    cancel: CancelToken,
    handle: JoinHandle<()>,
}

/// Runs searches in the background, one at a time.
///
/// Each [`solve`](Self::solve) spawns a task that fetches prices when the
/// request is cost-aware, then enumerates on the blocking pool. Starting a
/// new search cancels the one in flight: its receiver gets a terminal
/// [`SearchEvent::Cancelled`] and nothing after it.
///
/// Must be used from within a tokio runtime.
pub struct SearchManager<P: PriceSource> {
    config: Arc<OptimizerConfig>,
    space: SearchSpace,
    prices: Arc<P>,
    active: Option<ActiveSearch>,
}

impl<P: PriceSource> SearchManager<P> {
    pub fn new(config: OptimizerConfig, prices: P) -> Self {
        Self {
            config: Arc::new(config),
            space: SearchSpace::full(),
            prices: Arc::new(prices),
            active: None,
        }
    }

    /// Searches `space` instead of the full grid.
    pub fn with_space(mut self, space: SearchSpace) -> Self {
        self.space = space;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Starts a search, cancelling any search still in flight.
    pub fn solve(&mut self, request: SearchRequest) -> SearchReceiver {
        self.cancel();

        let (sender, receiver) = mpsc::unbounded_channel();
        let cancel = CancelToken::new();
        let config = Arc::clone(&self.config);
        let prices = Arc::clone(&self.prices);
        let space = self.space;
        let run_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            run_in_background(request, config, space, prices, run_cancel, sender).await;
        });

        self.active = Some(ActiveSearch { cancel, handle });
        SearchReceiver { receiver }
    }

    /// Cancels the search in flight, if any. Does not wait for it to stop.
    pub fn cancel(&mut self) {
        if let Some(active) = &self.active {
            if !active.handle.is_finished() {
                debug!(event = "cancel_requested");
            }
            active.cancel.cancel();
        }
    }

    pub fn status(&self) -> SearchStatus {
        match &self.active {
            None => SearchStatus::NotStarted,
            Some(active) if active.handle.is_finished() => SearchStatus::Terminated,
            Some(_) => SearchStatus::Solving,
        }
    }

    pub fn is_terminating(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.cancel.is_cancelled())
    }
}

impl<P: PriceSource> Drop for SearchManager<P> {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_in_background<P: PriceSource>(
    request: SearchRequest,
    config: Arc<OptimizerConfig>,
    space: SearchSpace,
    prices: Arc<P>,
    cancel: CancelToken,
    sender: mpsc::UnboundedSender<SearchEvent>,
) {
    let snapshot = if request.is_cost_aware() {
        let fetched = tokio::select! {
            fetched = prices.fetch_prices() => fetched,
            _ = cancel.cancelled() => {
                info!(event = "search_cancelled", processed = 0u64, retained = 0u64);
                let _ = sender.send(SearchEvent::Cancelled);
                return;
            }
        };
        match fetched {
            Ok(snapshot) => {
                debug!(event = "price_fetch", items = snapshot.len() as u64);
                Some(snapshot)
            }
            Err(e) => {
                warn!(event = "price_fetch_failed", error = %e);
                let _ = sender.send(SearchEvent::Failed {
                    error: e.to_string(),
                });
                return;
            }
        }
    } else {
        None
    };

    let blocking_sender = sender.clone();
    let joined = tokio::task::spawn_blocking(move || {
        run_search_with_channel(
            &request,
            &config,
            space,
            snapshot.as_ref(),
            Some(&cancel),
            blocking_sender,
        )
    })
    .await;

    if let Err(e) = joined {
        let _ = sender.send(SearchEvent::Failed {
            error: format!("search task failed: {}", e),
        });
    }
}

/// Receiving end of one search run.
#[derive(Debug)]
pub struct SearchReceiver {
    receiver: mpsc::UnboundedReceiver<SearchEvent>,
}

impl SearchReceiver {
    /// Next event, or `None` once the run has ended and every event was
    /// received.
    pub async fn recv(&mut self) -> Option<SearchEvent> {
        self.receiver.recv().await
    }

    /// Waits for the terminal event, handing progress to `on_progress`.
    ///
    /// # Errors
    ///
    /// `Cancelled` for a cancelled run, `PriceFeed` when the run failed
    /// (the price lookup is its only fallible stage), `Internal` if the run
    /// ended without a terminal event.
    pub async fn outcome_with(mut self, mut on_progress: impl FnMut(u8)) -> Result<SearchOutcome> {
        while let Some(event) = self.receiver.recv().await {
            match event {
                SearchEvent::Progress { percent } => on_progress(percent),
                SearchEvent::Done(outcome) => return Ok(outcome),
                SearchEvent::Failed { error } => return Err(FightForgeError::PriceFeed(error)),
                SearchEvent::Cancelled => return Err(FightForgeError::Cancelled),
            }
        }
        Err(FightForgeError::Internal(
            "search ended without a result".to_string(),
        ))
    }

    /// Waits for the terminal event, discarding progress.
    pub async fn outcome(self) -> Result<SearchOutcome> {
        self.outcome_with(|_| {}).await
    }

    /// Collects every event up to and including the terminal one.
    pub async fn collect(mut self) -> Vec<SearchEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.receiver.recv().await {
            let terminal = event.is_terminal();
            events.push(event);
            if terminal {
                break;
            }
        }
        events
    }
}
