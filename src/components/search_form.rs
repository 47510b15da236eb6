//! Search Form Component
//!
//! Filter type, filter value, category and threshold inputs.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::run_search;
use crate::commands;
use crate::context::use_app_context;
use crate::form::FILTER_TYPES;
use crate::models::SelectOption;
use crate::state::{use_results_store, LatestOnly};

#[component]
pub fn SearchForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_results_store();

    let (values, set_values) = signal(Vec::<SelectOption>::new());
    let (loading_values, set_loading_values) = signal(false);
    let (loading_categories, set_loading_categories) = signal(false);

    let values_request = LatestOnly::new(StoredValue::new(0u64));
    let categories_request = LatestOnly::new(StoredValue::new(0u64));

    let filter_type = Memo::new(move |_| ctx.form.with(|f| f.filter_type.clone()));
    let filter_value = Memo::new(move |_| ctx.form.with(|f| f.filter_value.clone()));

    // Load filter values when the filter type changes
    Effect::new(move |_| {
        let nonce = ctx.nonce.get();
        let filter_type = filter_type.get();
        let ticket = values_request.issue();
        if nonce.is_empty() || filter_type.is_empty() {
            set_values.set(Vec::new());
            set_loading_values.set(false);
            return;
        }
        set_loading_values.set(true);
        spawn_local(async move {
            let result = commands::get_filter_values(&nonce, &filter_type).await;
            // The filter type changed while this was in flight
            if !values_request.is_current(ticket) {
                return;
            }
            match result {
                Ok(loaded) => set_values.set(loaded),
                Err(err) => {
                    set_values.set(Vec::new());
                    ctx.show_error(&err);
                }
            }
            set_loading_values.set(false);
        });
    });

    // Reload categories, scoped to the filter once one is chosen
    Effect::new(move |_| {
        let nonce = ctx.nonce.get();
        if nonce.is_empty() {
            return;
        }
        let filter_type = filter_type.get();
        let filter_value = filter_value.get();
        let ticket = categories_request.issue();
        set_loading_categories.set(true);
        spawn_local(async move {
            let scoped = !filter_type.is_empty() && !filter_value.is_empty();
            let result = if scoped {
                commands::get_categories(&nonce, Some(&filter_type), Some(&filter_value)).await
            } else {
                commands::get_categories(&nonce, None, None).await
            };
            if !categories_request.is_current(ticket) {
                return;
            }
            match result {
                Ok(loaded) => ctx.categories.set(loaded),
                Err(err) => {
                    ctx.categories.set(Vec::new());
                    ctx.show_error(&err);
                }
            }
            set_loading_categories.set(false);
        });
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_local(run_search(ctx, store));
    };

    view! {
        <form id="inventory-search-form" class="insights-search-form" on:submit=submit>
            <div class="form-row">
                <label for="filter_type">"Filter Type"</label>
                <select
                    id="filter_type"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.form.update(|f| {
                            f.filter_type = value;
                            f.filter_value.clear();
                            f.category.clear();
                        });
                    }
                >
                    <option value="" prop:selected=move || filter_type.get().is_empty()>"Select filter type..."</option>
                    {FILTER_TYPES.iter().map(|(value, label)| {
                        let value = value.to_string();
                        let option_value = value.clone();
                        view! {
                            <option value=option_value prop:selected=move || filter_type.get() == value>
                                {*label}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </div>

            <Show when=move || !filter_type.get().is_empty()>
                <div class="form-row">
                    <label for="filter_value">"Select Value"</label>
                    <select
                        id="filter_value"
                        prop:disabled=move || loading_values.get()
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            ctx.form.update(|f| {
                                f.filter_value = value;
                                f.category.clear();
                            });
                        }
                    >
                        <option value="">
                            {move || if loading_values.get() { "Loading..." } else { "Select value..." }}
                        </option>
                        <For
                            each=move || values.get()
                            key=|option| option.value.clone()
                            children=move |option| {
                                let value = option.value.clone();
                                view! {
                                    <option
                                        value=option.value.clone()
                                        prop:selected=move || filter_value.get() == value
                                    >
                                        {option.label}
                                    </option>
                                }
                            }
                        />
                    </select>
                </div>
            </Show>

            <div class="form-row">
                <label for="product_category">"Product Category"</label>
                <select
                    id="product_category"
                    prop:disabled=move || loading_categories.get()
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.form.update(|f| f.category = value);
                    }
                >
                    <option value="">"All categories"</option>
                    <For
                        each=move || ctx.categories.get()
                        key=|option| option.value.clone()
                        children=move |option| {
                            let value = option.value.clone();
                            view! {
                                <option
                                    value=option.value.clone()
                                    prop:selected=move || ctx.form.with(|f| f.category == value)
                                >
                                    {option.label}
                                </option>
                            }
                        }
                    />
                </select>
            </div>

            <div class="form-row">
                <label for="min_stock">"Minimum Stock"</label>
                <input
                    id="min_stock"
                    type="number"
                    min="0"
                    placeholder="Show all"
                    prop:value=move || ctx.form.with(|f| f.min_stock.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.form.update(|f| f.min_stock = value);
                    }
                />
                <p class="description">"Leave empty to show every stock-tracked product."</p>
            </div>

            <button
                type="submit"
                id="search-btn"
                class=move || if ctx.searching.get() { "button button-primary loading" } else { "button button-primary" }
                prop:disabled=move || ctx.searching.get()
            >
                {move || if ctx.searching.get() { "Searching..." } else { "Search Products" }}
            </button>
        </form>
    }
}
