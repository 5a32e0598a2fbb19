//! Adding a feed.
//!
//! Ingestion is split around its one suspension point, the fetch:
//!
//! ```text
//!            begin()                      settle()
//! filling ──validate──► read-only   ──ok────────► filling / idle    (feed + posts committed)
//!    │                  loading     ──no feed───► filling / failed  (errors.noRss)
//!    └─invalid─► failed             ──network───► filling / failed  (errors.network)
//! ```
//!
//! `begin` runs on submit and either rejects the input or switches the form to
//! read-only.  The caller then fetches and passes the outcome to `settle`.
//! Nothing is committed unless the document parsed.

use crate::i18n::Translator;
use crate::refresh::{self, FeedUpdate};
use crate::source::{Feed, FeedDocument, FeedId, LoadError};
use crate::store::{FormStatus, LoadingStatus, Store};
use crate::validate::validate;

/// Validate `input` and, if it passes, enter the loading state.
///
/// Returns the feed URL to fetch, or `None` when validation failed (the
/// message is then in `form.error`).
pub fn begin(store: &mut Store, input: &str, translator: &Translator) -> Option<FeedId> {
    if let Some(error) = validate(input, &store.state().feeds, translator) {
        tracing::debug!(input, %error, "feed rejected");
        store.set_form_error(Some(error));
        store.set_form_status(FormStatus::Failed);
        return None;
    }

    store.set_form_error(None);
    store.set_form_status(FormStatus::ReadOnly);
    store.set_loading_status(LoadingStatus::Loading);
    Some(input.trim().to_string())
}

/// Finish an ingestion started by [`begin`].  Returns whether a feed was
/// committed.
pub fn settle(
    store: &mut Store,
    url: FeedId,
    outcome: Result<FeedDocument, LoadError>,
    translator: &Translator,
) -> bool {
    match outcome {
        Ok(doc) => {
            tracing::info!(feed = %url, posts = doc.posts.len(), "feed added");
            commit(store, url, doc);
            store.set_loading_error(None);
            store.set_loading_status(LoadingStatus::Idle);
            store.set_form_status(FormStatus::Filling);
            true
        }
        Err(err) => {
            tracing::warn!(feed = %url, error = %err, "feed could not be added");
            let key = if err.is_parsing() {
                "errors.noRss"
            } else {
                "errors.network"
            };
            store.set_loading_error(Some(translator.t(key)));
            store.set_loading_status(LoadingStatus::Failed);
            store.set_form_status(FormStatus::Filling);
            false
        }
    }
}

fn commit(store: &mut Store, url: FeedId, doc: FeedDocument) {
    let FeedDocument {
        title,
        description,
        posts,
    } = doc;
    let update = FeedUpdate {
        feed_id: url.clone(),
        posts,
    };
    let fresh = refresh::new_posts(&store.state().posts, &[update]);

    store.prepend_feed(Feed {
        id: url,
        title,
        description,
    });
    store.prepend_posts(fresh);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
