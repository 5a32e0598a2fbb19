//! The UI surface that renderers write into.
//!
//! A [`Surface`] is the terminal equivalent of a page's element handles: an
//! input field, a submit control, the feed and post lists, the preview modal
//! and a one-line message area.  Renderers in [`crate::view`] write to it;
//! [`crate::ui`] paints it every frame.  It holds no application state of its
//! own apart from what the user is typing into the input.

use crate::source::PostId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub disabled: bool,
    pub invalid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: PostId,
    pub title: String,
    pub link: String,
    /// Pre-formatted publication date, if the feed gave one.
    pub date: Option<String>,
    pub seen: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Static page text, filled once when the view is bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub header: String,
    pub description: String,
    pub placeholder: String,
    pub example: String,
    pub add_button: String,
    pub feeds_title: String,
    pub feeds_description: String,
    pub posts_title: String,
    pub posts_description: String,
    pub preview_button: String,
    pub modal_link: String,
    pub modal_close: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    pub labels: Labels,
    pub input: InputField,
    pub submit: SubmitControl,
    pub feeds: Vec<FeedRow>,
    pub posts: Vec<PostRow>,
    pub modal: Option<ModalView>,
    pub message: Option<Message>,
}

impl Surface {
    /// Whether the input currently accepts typing and submits.
    pub fn accepts_input(&self) -> bool {
        !self.input.disabled && !self.submit.disabled
    }
}
