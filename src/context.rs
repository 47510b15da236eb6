//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::form::SearchForm;
use crate::models::{CommandError, SelectOption};
use crate::state::LatestOnly;

/// One occurrence of a banner message
#[derive(Debug, Clone, PartialEq)]
pub struct BannerMessage {
    /// Increases with every message shown, repeats included
    pub seq: u64,
    pub text: String,
}

impl BannerMessage {
    /// Whether `current` is still the occurrence numbered `seq`
    pub fn still_showing(current: Option<&BannerMessage>, seq: u64) -> bool {
        current.is_some_and(|message| message.seq == seq)
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Anti-forgery token for this session, empty until fetched
    pub nonce: ReadSignal<String>,
    /// Banner message - read
    pub error: ReadSignal<Option<BannerMessage>>,
    /// Banner message - write
    set_error: WriteSignal<Option<BannerMessage>>,
    error_seq: LatestOnly<StoredValue<u64>>,
    /// Bumped whenever the recent searches list changes - read
    pub history_version: ReadSignal<u32>,
    /// Bumped whenever the recent searches list changes - write
    set_history_version: WriteSignal<u32>,
    /// Search form fields; recent searches fill them too
    pub form: RwSignal<SearchForm>,
    /// Category dropdown options currently shown
    pub categories: RwSignal<Vec<SelectOption>>,
    /// True while a search is outstanding
    pub searching: RwSignal<bool>,
}

impl AppContext {
    pub fn new(
        nonce: ReadSignal<String>,
        history_version: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        let (error, set_error) = signal(None);
        Self {
            nonce,
            error,
            set_error,
            error_seq: LatestOnly::new(StoredValue::new(0)),
            history_version: history_version.0,
            set_history_version: history_version.1,
            form: RwSignal::new(SearchForm::default()),
            categories: RwSignal::new(Vec::new()),
            searching: RwSignal::new(false),
        }
    }

    /// Show an error in the banner
    pub fn show_error(&self, err: &CommandError) {
        web_sys::console::warn_1(&format!("[INSIGHTS] {} error: {}", err.kind, err.message).into());
        let seq = self.error_seq.issue();
        self.set_error.set(Some(BannerMessage {
            seq,
            text: err.message.clone(),
        }));
    }

    pub fn dismiss_error(&self) {
        self.set_error.set(None);
    }

    pub fn history_changed(&self) {
        self.set_history_version.update(|v| *v += 1);
    }

    /// Label of a category option, if it is currently listed
    pub fn category_label(&self, id: i64) -> Option<String> {
        let id = id.to_string();
        self.categories
            .get_untracked()
            .into_iter()
            .find(|option| option.value == id)
            .map(|option| option.label)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(seq: u64, text: &str) -> BannerMessage {
        BannerMessage { seq, text: text.to_string() }
    }

    #[test]
    fn test_repeat_message_gets_its_own_timer() {
        let first = message(1, "Request failed. Please try again.");
        let repeat = message(2, "Request failed. Please try again.");

        // The first timer fires while the identical repeat is shown
        assert!(!BannerMessage::still_showing(Some(&repeat), first.seq));
        assert!(BannerMessage::still_showing(Some(&repeat), repeat.seq));
        assert!(!BannerMessage::still_showing(None, repeat.seq));
    }
}
