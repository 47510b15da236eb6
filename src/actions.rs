//! Client actions shared by several components

use leptos::prelude::*;

use crate::commands;
use crate::context::AppContext;
use crate::history::{LocalStorageStore, RecentSearch, SearchHistory};
use crate::models::SearchParams;
use crate::state::{store_clear_results, store_set_results, ResultsStore, SingleFlight};

pub fn history() -> SearchHistory<LocalStorageStore> {
    SearchHistory::new(LocalStorageStore)
}

/// Validate the form and run the search. Ignored while one is outstanding.
pub async fn run_search(ctx: AppContext, store: ResultsStore) {
    let flight = SingleFlight::new(ctx.searching);
    let Some(_guard) = flight.begin() else {
        web_sys::console::log_1(&"[INSIGHTS] search already running".into());
        return;
    };

    let params = match ctx.form.get_untracked().validate() {
        Ok(params) => params,
        Err(err) => {
            ctx.show_error(&err);
            return;
        }
    };
    ctx.dismiss_error();

    let nonce = ctx.nonce.get_untracked();
    match commands::search(&nonce, &params).await {
        Ok(response) => {
            web_sys::console::log_1(&format!("[INSIGHTS] {} products", response.products.len()).into());
            store_set_results(&store, params.clone(), response.products, response.html);
            remember_search(&ctx, &nonce, &params).await;
            scroll_to_results();
        }
        Err(err) => {
            store_clear_results(&store);
            ctx.show_error(&err);
        }
    }
}

/// Add a successful search to the recent searches
async fn remember_search(ctx: &AppContext, nonce: &str, params: &SearchParams) {
    let label = match commands::describe_filter(nonce, &params.filter_type, &params.filter_value).await {
        Ok(label) => label,
        Err(_) => params.filter_value.clone(),
    };

    let entry = RecentSearch {
        filter_type: params.filter_type.clone(),
        filter_value: params.filter_value.clone(),
        category_id: params.product_category.and_then(|c| u32::try_from(c).ok()),
        min_stock: params.min_stock.and_then(|m| u32::try_from(m).ok()),
        label,
        category_label: params.product_category.and_then(|c| ctx.category_label(c)),
        timestamp: js_sys::Date::now(),
    };

    match history().record(entry) {
        Ok(_) => ctx.history_changed(),
        Err(e) => web_sys::console::warn_1(&format!("[INSIGHTS] {}", e).into()),
    }
}

fn scroll_to_results() {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("search-results"))
    else {
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
