//! Binds state paths to renderers.
//!
//! [`bind`] subscribes one renderer per interesting [`StatePath`] and fills in
//! the static page text.  Every renderer redraws its whole region from the
//! *current* state, not from the change that triggered it, so running one
//! twice, or late, leaves the surface the same.
//!
//! | path                    | renderer             | region              |
//! |-------------------------|----------------------|---------------------|
//! | `form.status`           | [`render_form`]      | input + submit      |
//! | `form.error`            | [`render_form_error`]| message             |
//! | `loadingProcess.status` | [`render_loading`]   | message             |
//! | `feeds`                 | [`render_feeds`]     | feed list           |
//! | `posts`, `ui.seenPosts` | [`render_posts`]     | post list           |
//! | `modal.openedPost`      | [`render_modal`]     | preview modal       |

use std::cell::RefCell;
use std::rc::Rc;

use crate::i18n::Translator;
use crate::store::{FormStatus, LoadingStatus, State, StatePath, Store};
use crate::surface::{FeedRow, Labels, Message, MessageKind, ModalView, PostRow, Surface};

type Renderer = fn(&State, &mut Surface, &Translator);

const MAPPING: [(StatePath, Renderer); 7] = [
    (StatePath::FormStatus, render_form),
    (StatePath::FormError, render_form_error),
    (StatePath::LoadingProcessStatus, render_loading),
    (StatePath::Feeds, render_feeds),
    (StatePath::Posts, render_posts),
    (StatePath::UiSeenPosts, render_posts),
    (StatePath::ModalOpenedPost, render_modal),
];

/// Render the static text and subscribe the renderers to `store`.
pub fn bind(store: &mut Store, surface: Rc<RefCell<Surface>>, translator: Translator) {
    surface.borrow_mut().labels = labels(&translator);

    for (path, render) in MAPPING {
        let surface = Rc::clone(&surface);
        store.subscribe(path, move |state| {
            render(state, &mut surface.borrow_mut(), &translator)
        });
    }
}

fn labels(t: &Translator) -> Labels {
    Labels {
        header: t.t("header"),
        description: t.t("description"),
        placeholder: t.t("placeholder"),
        example: t.t("example"),
        add_button: t.t("buttons.add"),
        feeds_title: t.t("feedsTitle"),
        feeds_description: t.t("feedsDescription"),
        posts_title: t.t("postsTitle"),
        posts_description: t.t("postsDescription"),
        preview_button: t.t("buttons.preview"),
        modal_link: t.t("modalLink"),
        modal_close: t.t("buttons.modalCloseBtn"),
    }
}

/// Input and submit control follow the form status.
///
/// The input is cleared only once a submission has gone through, so a
/// failed URL stays on screen for correction.
pub fn render_form(state: &State, surface: &mut Surface, _t: &Translator) {
    match state.form.status {
        FormStatus::Filling => {
            surface.input.disabled = false;
            surface.submit.disabled = false;
            surface.input.invalid = false;
            if state.loading_process.status == LoadingStatus::Idle {
                surface.input.value.clear();
            }
        }
        FormStatus::ReadOnly => {
            surface.input.disabled = true;
            surface.submit.disabled = true;
            surface.input.invalid = false;
        }
        FormStatus::Failed => {
            surface.input.disabled = false;
            surface.submit.disabled = false;
            surface.input.invalid = true;
        }
    }
}

pub fn render_form_error(state: &State, surface: &mut Surface, _t: &Translator) {
    surface.message = state.form.error.as_ref().map(|error| Message {
        kind: MessageKind::Danger,
        text: error.clone(),
    });
}

pub fn render_loading(state: &State, surface: &mut Surface, t: &Translator) {
    let (kind, text) = match state.loading_process.status {
        LoadingStatus::Loading => (MessageKind::Info, t.t("messages.progress")),
        LoadingStatus::Idle => (MessageKind::Success, t.t("messages.success")),
        LoadingStatus::Failed => (
            MessageKind::Danger,
            state
                .loading_process
                .error
                .clone()
                .unwrap_or_else(|| t.t("errors.network")),
        ),
    };
    surface.message = Some(Message { kind, text });
}

pub fn render_feeds(state: &State, surface: &mut Surface, _t: &Translator) {
    surface.feeds = state
        .feeds
        .iter()
        .map(|feed| FeedRow {
            title: feed.title.clone(),
            description: feed.description.clone(),
        })
        .collect();
}

pub fn render_posts(state: &State, surface: &mut Surface, _t: &Translator) {
    surface.posts = state
        .posts
        .iter()
        .map(|post| PostRow {
            id: post.post_id,
            title: post.title.clone(),
            link: post.link.clone(),
            date: post.published.map(|d| d.format("%Y-%m-%d %H:%M").to_string()),
            seen: state.ui.seen_posts.contains(&post.post_id),
        })
        .collect();
}

/// Shows the opened post, or hides the modal when none is open or the id no
/// longer resolves.
pub fn render_modal(state: &State, surface: &mut Surface, _t: &Translator) {
    surface.modal = state
        .modal
        .opened_post
        .and_then(|id| state.post(id))
        .map(|post| ModalView {
            title: post.title.clone(),
            description: post.description.clone(),
            link: post.link.clone(),
        });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
