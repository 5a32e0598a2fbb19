//! Submit-time validation of the feed URL typed by the user.

use reqwest::Url;

use crate::i18n::Translator;
use crate::source::Feed;

/// Check `input` before any network call is made.
///
/// Returns `None` when the value may be ingested, otherwise the localized
/// message to show.  Rules, in order: required, absolute http(s) URL, not
/// already tracked.
pub fn validate(input: &str, feeds: &[Feed], translator: &Translator) -> Option<String> {
    let value = input.trim();
    if value.is_empty() {
        return Some(translator.t("errors.required"));
    }

    let well_formed = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if !well_formed {
        return Some(translator.t("errors.invalidUrl"));
    }

    if feeds.iter().any(|feed| feed.id == value) {
        return Some(translator.t("errors.existedRss"));
    }

    None
}
