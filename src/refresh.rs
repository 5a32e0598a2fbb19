//! Background feed refresh.
//!
//! A single tokio task re-fetches every tracked feed, hands the results to the
//! UI loop as an [`AppEvent::Refreshed`] and waits until they are merged.
//! Only then does it sleep for the refresh period, so cycles never overlap
//! and a slow feed stretches the cycle rather than piling up requests.
//!
//! ## Failure handling
//!
//! A feed that cannot be fetched or parsed is skipped for this cycle and
//! tried again on the next one.  Background failures are logged, never shown
//! to the user, and never stop the loop.
//!
//! ## Merging
//!
//! New posts are those whose `link` is not already in the global post list
//! (whatever feed it came from).  All new posts of a cycle are prepended in a
//! single store write, in feed order and then document order.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::app::AppEvent;
use crate::source::{self, FeedId, Fetcher, ParsedPost, Post, Proxy};
use crate::store::Store;

/// Default pause between the end of one cycle and the start of the next.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Items from one feed that fetched and parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUpdate {
    pub feed_id: FeedId,
    pub posts: Vec<ParsedPost>,
}

/// Spawn the refresh loop.
///
/// `feeds` always holds the ids of the tracked feeds; each cycle works on a
/// snapshot taken when it starts.  The loop ends only when the UI loop has
/// dropped its event receiver.
pub fn spawn(
    fetcher: Arc<dyn Fetcher>,
    proxy: Proxy,
    feeds: watch::Receiver<Vec<FeedId>>,
    events: mpsc::UnboundedSender<AppEvent>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(period).await;

            let feed_ids = feeds.borrow().to_vec();
            let updates = run_cycle(fetcher.as_ref(), &proxy, &feed_ids).await;
            tracing::debug!(
                feeds = feed_ids.len(),
                succeeded = updates.len(),
                "refresh cycle settled"
            );

            let (done, merged) = oneshot::channel();
            if events.send(AppEvent::Refreshed { updates, done }).is_err() {
                tracing::debug!("event receiver gone, stopping refresh loop");
                return;
            }
            // A dropped acknowledgement still counts as settled.
            if let Ok(added) = merged.await {
                tracing::debug!(added, "refresh merged");
            }
        }
    })
}

/// Fetch and parse every feed concurrently and wait for all of them.
///
/// The result keeps the order of `feed_ids` and leaves out feeds that failed.
pub async fn run_cycle(fetcher: &dyn Fetcher, proxy: &Proxy, feed_ids: &[FeedId]) -> Vec<FeedUpdate> {
    let loads = feed_ids.iter().map(|feed_id| async move {
        let outcome = source::load(fetcher, &proxy.wrap(feed_id)).await;
        (feed_id, outcome)
    });

    join_all(loads)
        .await
        .into_iter()
        .filter_map(|(feed_id, outcome)| match outcome {
            Ok(doc) => Some(FeedUpdate {
                feed_id: feed_id.clone(),
                posts: doc.posts,
            }),
            Err(e) => {
                tracing::debug!(feed = %feed_id, error = %e, "refresh failed, retrying next cycle");
                None
            }
        })
        .collect()
}

/// Posts in `updates` whose link is neither in `known` nor earlier in
/// `updates`, promoted to [`Post`]s in encounter order.
pub fn new_posts(known: &[Post], updates: &[FeedUpdate]) -> Vec<Post> {
    let mut links: HashSet<&str> = known.iter().map(|p| p.link.as_str()).collect();
    let mut fresh = Vec::new();
    for update in updates {
        for item in &update.posts {
            if links.insert(item.link.as_str()) {
                fresh.push(Post::from_parsed(&update.feed_id, item));
            }
        }
    }
    fresh
}

/// Prepend the new posts of a cycle in one write.  Returns how many were
/// added.
pub fn merge(store: &mut Store, updates: &[FeedUpdate]) -> usize {
    let fresh = new_posts(&store.state().posts, updates);
    store.prepend_posts(fresh)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
