//! Observable application state.
//!
//! [`Store`] owns the [`State`] tree.  Every write goes through
//! [`Store::mutate`] (or one of the typed setters built on it), which applies
//! the write and then synchronously calls every subscriber registered for the
//! written [`StatePath`], in registration order.
//!
//! ## Dispatch rules
//!
//! * Subscribers run after the write has completed, so they always read the
//!   new value.  They receive `&State` and cannot write back, so two
//!   mutations never interleave their callbacks.
//! * Only **exact** path matches fire.  A subscriber on
//!   [`StatePath::FormStatus`] is not called for a write to
//!   [`StatePath::FormError`].  There is no ancestor matching: every write
//!   names the field it touches, and `StatePath` lists only those fields.
//! * Writing a path nobody subscribed to is just a write.
//!
//! The store is not thread-safe and does not try to be: it lives on the UI
//! loop and background tasks talk to it through `AppEvent`s.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::source::{Feed, Post, PostId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingStatus {
    #[default]
    Idle,
    Loading,
    Failed,
}

/// Network step of the ingestion flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingProcess {
    pub status: LoadingStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Filling,
    ReadOnly,
    Failed,
}

/// Interaction mode of the URL input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub status: FormStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    /// Post currently shown in the preview, if any.
    pub opened_post: Option<PostId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Posts the user has previewed.  Only ever grows.
    pub seen_posts: HashSet<PostId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Tracked feeds, most recently added first.
    pub feeds: Vec<Feed>,
    /// Live post list, most recent insertion first.  No two posts share a
    /// `link`.
    pub posts: Vec<Post>,
    pub loading_process: LoadingProcess,
    pub form: FormState,
    pub modal: ModalState,
    pub ui: UiState,
}

impl State {
    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.post_id == id)
    }

    pub fn feed(&self, id: &str) -> Option<&Feed> {
        self.feeds.iter().find(|f| f.id == id)
    }
}

/// Dotted address of a field in [`State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatePath {
    Feeds,
    Posts,
    FormStatus,
    FormError,
    LoadingProcessStatus,
    LoadingProcessError,
    ModalOpenedPost,
    UiSeenPosts,
}

impl StatePath {
    pub fn as_str(self) -> &'static str {
        match self {
            StatePath::Feeds => "feeds",
            StatePath::Posts => "posts",
            StatePath::FormStatus => "form.status",
            StatePath::FormError => "form.error",
            StatePath::LoadingProcessStatus => "loadingProcess.status",
            StatePath::LoadingProcessError => "loadingProcess.error",
            StatePath::ModalOpenedPost => "modal.openedPost",
            StatePath::UiSeenPosts => "ui.seenPosts",
        }
    }
}

impl fmt::Display for StatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Subscriber = Box<dyn FnMut(&State)>;

#[derive(Default)]
pub struct Store {
    state: State,
    subscribers: HashMap<StatePath, Vec<Subscriber>>,
}

impl Store {
    pub fn new(state: State) -> Self {
        Self {
            state,
            subscribers: HashMap::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Register `handler` for writes to exactly `path`.
    pub fn subscribe(&mut self, path: StatePath, handler: impl FnMut(&State) + 'static) {
        self.subscribers
            .entry(path)
            .or_default()
            .push(Box::new(handler));
    }

    /// Apply `write` and then notify the subscribers of `path`.
    ///
    /// `path` must name what `write` touches; the store cannot check it.
    pub fn mutate<R>(&mut self, path: StatePath, write: impl FnOnce(&mut State) -> R) -> R {
        let out = write(&mut self.state);
        self.notify(path);
        out
    }

    fn notify(&mut self, path: StatePath) {
        let Some(handlers) = self.subscribers.get_mut(&path) else {
            tracing::trace!(%path, "state changed, no subscribers");
            return;
        };
        tracing::trace!(%path, count = handlers.len(), "state changed");
        for handler in handlers.iter_mut() {
            handler(&self.state);
        }
    }

    // -- typed writes --------------------------------------------------------

    pub fn set_form_status(&mut self, status: FormStatus) {
        self.mutate(StatePath::FormStatus, |s| s.form.status = status);
    }

    pub fn set_form_error(&mut self, error: Option<String>) {
        self.mutate(StatePath::FormError, |s| s.form.error = error);
    }

    pub fn set_loading_status(&mut self, status: LoadingStatus) {
        self.mutate(StatePath::LoadingProcessStatus, |s| {
            s.loading_process.status = status
        });
    }

    pub fn set_loading_error(&mut self, error: Option<String>) {
        self.mutate(StatePath::LoadingProcessError, |s| {
            s.loading_process.error = error
        });
    }

    pub fn prepend_feed(&mut self, feed: Feed) {
        self.mutate(StatePath::Feeds, |s| s.feeds.insert(0, feed));
    }

    /// Put `posts` in front of the post list as one block, keeping their
    /// order.  An empty block writes nothing.
    pub fn prepend_posts(&mut self, posts: Vec<Post>) -> usize {
        let count = posts.len();
        if count == 0 {
            return 0;
        }
        self.mutate(StatePath::Posts, |s| {
            s.posts.splice(0..0, posts);
        });
        count
    }

    pub fn set_opened_post(&mut self, post: Option<PostId>) {
        self.mutate(StatePath::ModalOpenedPost, |s| s.modal.opened_post = post);
    }

    pub fn mark_seen(&mut self, post: PostId) {
        self.mutate(StatePath::UiSeenPosts, |s| {
            s.ui.seen_posts.insert(post);
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
