//! One-call search entry points.
//!
//! These run a whole search on the calling thread. [`run_search`] returns
//! the outcome; [`run_search_with_channel`] also streams every event into a
//! channel, which is how the [`SearchManager`](crate::SearchManager) drives
//! its background runs.

use fightforge_config::OptimizerConfig;
use fightforge_core::{FightForgeError, ItemPrices, Result};
use tokio::sync::mpsc;

use crate::cancel::CancelToken;
use crate::event::{SearchEvent, SearchOutcome};
use crate::request::SearchRequest;
use crate::search::BuildSearch;
use crate::space::SearchSpace;

/// Runs a search for `request` over the full space.
///
/// `prices` is only consulted for cost-aware requests; without it a
/// cost-aware request is scored for damage only.
pub fn run_search(
    request: &SearchRequest,
    config: &OptimizerConfig,
    prices: Option<&ItemPrices>,
) -> Result<SearchOutcome> {
    // Nobody reads the receiver.
    let (sender, _receiver) = mpsc::unbounded_channel();
    run_search_with_channel(request, config, SearchSpace::full(), prices, None, sender)
}

/// Runs a search over `space` and streams its events.
///
/// Sends progress events as the percentage rises, then exactly one terminal
/// event. Send failures are ignored: a dropped receiver does not stop the
/// search, only the cancel token does.
pub fn run_search_with_channel(
    request: &SearchRequest,
    config: &OptimizerConfig,
    space: SearchSpace,
    prices: Option<&ItemPrices>,
    cancel: Option<&CancelToken>,
    sender: mpsc::UnboundedSender<SearchEvent>,
) -> Result<SearchOutcome> {
    let mut search =
        BuildSearch::new(request.model(prices), request.point_budget, config).with_space(space);
    if let Some(token) = cancel {
        search = search.with_cancel(token.clone());
    }

    let result = search.run(|percent| {
        let _ = sender.send(SearchEvent::Progress { percent });
    });

    let terminal = match &result {
        Ok(outcome) => SearchEvent::Done(outcome.clone()),
        Err(FightForgeError::Cancelled) => SearchEvent::Cancelled,
        Err(e) => SearchEvent::Failed {
            error: e.to_string(),
        },
    };
    let _ = sender.send(terminal);
    result
}
