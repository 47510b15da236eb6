//! Inventory Insights Frontend App
//!
//! Search panel on top, results below.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{ErrorBanner, RecentSearches, ResultsTable, SearchForm};
use crate::context::AppContext;
use crate::state::ResultsState;

#[component]
pub fn App() -> impl IntoView {
    let (nonce, set_nonce) = signal(String::new());
    let history_version = signal(0u32);

    let ctx = AppContext::new(nonce, history_version);
    provide_context(ctx);
    provide_context(Store::new(ResultsState::default()));

    // Session token first; every other command needs it
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::get_session_token().await {
                Ok(token) => {
                    web_sys::console::log_1(&"[APP] Session ready".into());
                    set_nonce.set(token);
                }
                Err(err) => ctx.show_error(&err),
            }
        });
    });

    view! {
        <div class="wrap inventory-insights">
            <h1>"Inventory Insights"</h1>
            <ErrorBanner />
            <div class="insights-panel">
                <RecentSearches />
                <SearchForm />
            </div>
            <section id="search-results">
                <ResultsTable />
            </section>
        </div>
    }
}
