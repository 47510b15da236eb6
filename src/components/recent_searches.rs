//! Recent Searches Component
//!
//! Dropdown of remembered searches kept in local storage.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{history, run_search};
use crate::components::ConfirmButton;
use crate::context::{use_app_context, AppContext};
use crate::form::SearchForm;
use crate::history::RecentSearch;
use crate::state::{use_results_store, ResultsStore};

/// Fill the form from a remembered search and run it
fn load_entry(ctx: AppContext, store: ResultsStore, entry: RecentSearch) {
    ctx.form.set(SearchForm::from_params(&entry.params()));
    spawn_local(run_search(ctx, store));
}

#[component]
pub fn RecentSearches() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_results_store();
    let (chosen, set_chosen) = signal(String::new());

    let entries = Memo::new(move |_| {
        let _ = ctx.history_version.get();
        history().list()
    });

    let load_chosen = move |_| {
        let Ok(index) = chosen.get_untracked().parse::<usize>() else {
            return;
        };
        match history().load(index) {
            Ok(entry) => load_entry(ctx, store, entry),
            Err(e) => web_sys::console::warn_1(&format!("[INSIGHTS] {}", e).into()),
        }
    };

    let load_last = move |_| {
        if let Ok(entry) = history().load(0) {
            load_entry(ctx, store, entry);
        }
    };

    let clear = Callback::new(move |_| {
        if let Err(e) = history().clear() {
            web_sys::console::warn_1(&format!("[INSIGHTS] {}", e).into());
        }
        set_chosen.set(String::new());
        ctx.history_changed();
    });

    view! {
        <Show when=move || entries.with(|e| !e.is_empty())>
            <div class="recent-searches">
                <label for="recent_searches">"Recent Searches"</label>
                <select id="recent_searches" on:change=move |ev| set_chosen.set(event_target_value(&ev))>
                    <option value="">"Select a recent search..."</option>
                    {move || entries.get().into_iter().enumerate().map(|(index, entry)| view! {
                        <option value=index.to_string()>{entry.summary()}</option>
                    }).collect_view()}
                </select>
                <button
                    type="button"
                    id="load-recent-search"
                    class="button"
                    prop:disabled=move || chosen.get().is_empty() || ctx.searching.get()
                    on:click=load_chosen
                >
                    "Load Search"
                </button>
                <button
                    type="button"
                    id="load-last-search"
                    class="button"
                    prop:disabled=move || ctx.searching.get()
                    on:click=load_last
                >
                    "Load Last Search"
                </button>
                <ConfirmButton
                    label="Clear History"
                    question="Clear all recent searches?"
                    button_class="button-link clear-history-btn"
                    on_confirm=clear
                />
                <p class="last-search-preview">
                    {move || entries.with(|e| e.first().map(|entry| format!("Last search: {}", entry.summary())))}
                </p>
            </div>
        </Show>
    }
}
