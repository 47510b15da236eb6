//! Results Table Component
//!
//! Result rows with inline stock controls, bulk selection, sorting and
//! CSV export.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_app_context, AppContext};
use crate::download::save_export;
use crate::models::{CommandError, ExportParams, ProductRecord, StockUpdate};
use crate::state::{
    parse_quantity, selected_in_order, store_apply_update, store_sort, toggle_selected, use_results_store,
    ResultsStore, ResultsStateStoreFields, RowOutcome, SingleFlight, SortOrder,
};

/// Download the current results (or the checked rows) as CSV
async fn run_export(ctx: AppContext, store: ResultsStore, busy: RwSignal<bool>, selected_only: bool) {
    let flight = SingleFlight::new(busy);
    let Some(_guard) = flight.begin() else {
        return;
    };
    let Some(search) = store.params().get_untracked() else {
        return;
    };

    let selected_product_ids = if selected_only {
        let ids = selected_in_order(&store.products().get_untracked(), &store.selected().get_untracked());
        if ids.is_empty() {
            ctx.show_error(&CommandError::validation(
                "selected_product_ids",
                "Please select at least one product to export.",
            ));
            return;
        }
        ids
    } else {
        Vec::new()
    };

    let params = ExportParams {
        search,
        export_type: if selected_only { "selected" } else { "all" }.to_string(),
        selected_product_ids,
    };
    match commands::export(&ctx.nonce.get_untracked(), &params).await {
        Ok(payload) => {
            if let Err(e) = save_export(&payload) {
                ctx.show_error(&CommandError::network(&format!("Export failed: {}.", e)));
            }
        }
        Err(err) => ctx.show_error(&err),
    }
}

#[component]
pub fn ResultsTable() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_results_store();
    let exporting = RwSignal::new(false);

    let has_search = move || store.params().with(|p| p.is_some());
    let count = move || store.products().with(|p| p.len());
    let with_needed = move || store.min_stock().get().is_some();
    let all_selected = move || {
        let selected = store.selected().get();
        store.products().with(|products| !products.is_empty() && products.iter().all(|p| selected.contains(&p.id)))
    };

    let toggle_all = move |ev: web_sys::Event| {
        let checked = event_target_checked(&ev);
        let ids = if checked {
            store.products().with(|products| products.iter().map(|p| p.id).collect())
        } else {
            Vec::new()
        };
        store.selected().set(ids);
    };

    view! {
        <Show when=has_search>
            <div class="insights-results">
                <div class="results-header">
                    <h2>"Search Results"</h2>
                    <span class="results-count">
                        {move || match count() {
                            1 => "1 product found".to_string(),
                            n => format!("{} products found", n),
                        }}
                    </span>
                </div>

                <Show
                    when=move || { count() > 0 }
                    fallback=move || view! { <div class="results-empty" inner_html=move || store.html().get()></div> }
                >
                    <div class="results-toolbar">
                        <label>
                            "Sort by "
                            <select on:change=move |ev| store_sort(&store, SortOrder::from_key(&event_target_value(&ev)))>
                                {SortOrder::ALL.into_iter().map(|order| view! {
                                    <option value=order.key() prop:selected=move || store.sort().get() == order>
                                        {order.label()}
                                    </option>
                                }).collect_view()}
                            </select>
                        </label>
                        <span class="selected-count">
                            {move || format!("{} selected", store.selected().with(|s| s.len()))}
                        </span>
                        <button
                            type="button"
                            id="export-csv-btn"
                            class="button"
                            prop:disabled=move || exporting.get()
                            on:click=move |_| spawn_local(run_export(ctx, store, exporting, false))
                        >
                            "Export All"
                        </button>
                        <button
                            type="button"
                            id="export-selected-btn"
                            class="button"
                            prop:disabled=move || exporting.get() || store.selected().with(|s| s.is_empty())
                            on:click=move |_| spawn_local(run_export(ctx, store, exporting, true))
                        >
                            "Export Selected"
                        </button>
                    </div>

                    <table class="inventory-results-table">
                        <thead>
                            <tr>
                                <th class="bulk-select-column">
                                    <input
                                        type="checkbox"
                                        title="Select All"
                                        prop:checked=all_selected
                                        on:change=toggle_all
                                    />
                                </th>
                                <th>"Image"</th>
                                <th>"Product Name"</th>
                                <th>"SKU"</th>
                                <th>"Categories"</th>
                                <th>"Current Stock"</th>
                                <Show when=with_needed>
                                    <th>"Stock Needed"</th>
                                </Show>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || store.products().get()
                                key=|p| (p.id, p.stock_quantity, p.managing_stock)
                                children=move |product| view! { <ProductRow product=product /> }
                            />
                        </tbody>
                    </table>
                </Show>
            </div>
        </Show>
    }
}

fn dash_if_empty(value: String) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// One result row
#[component]
fn ProductRow(product: ProductRecord) -> impl IntoView {
    let store = use_results_store();
    let id = product.id;
    let min_stock = store.min_stock().get_untracked();
    let quantity = product.stock_quantity.filter(|_| product.managing_stock);
    let below = product.is_below(min_stock);
    let needed = product.needed_quantity;

    let checked = move || store.selected().with(|s| s.contains(&id));
    let on_check = move |ev: web_sys::Event| {
        let is_checked = event_target_checked(&ev);
        store.selected().update(|s| toggle_selected(s, id, is_checked));
    };

    let image = match product.image_url.clone() {
        Some(url) => view! { <img src=url class="product-image" alt=product.name.clone() /> }.into_any(),
        None => view! { <div class="product-image product-image-placeholder">"No Image"</div> }.into_any(),
    };

    let stock_cell = match quantity {
        Some(qty) => view! { <span class=if below { "stock-below-threshold" } else { "" }>{qty}</span> }.into_any(),
        None => view! { <span class="stock-not-managed">"Not managed"</span> }.into_any(),
    };

    let needed_cell = min_stock.map(|_| match quantity {
        None => view! { <td><span class="stock-not-managed">"-"</span></td> }.into_any(),
        Some(_) if needed > 0 => view! { <td><span class="stock-needed">{format!("+{}", needed)}</span></td> }.into_any(),
        Some(_) => view! { <td>"-"</td> }.into_any(),
    });

    let actions = match quantity {
        Some(qty) => view! { <QuantityControls product_id=id quantity=qty /> }.into_any(),
        None => view! { <EnableStockControl product_id=id /> }.into_any(),
    };

    view! {
        <tr data-product-id=id data-managing-stock=if quantity.is_some() { "1" } else { "0" }>
            <td class="bulk-select-column">
                <input type="checkbox" class="product-checkbox" prop:checked=checked on:change=on_check />
            </td>
            <td>{image}</td>
            <td>
                <strong>
                    <a href=product.edit_url.clone() target="_blank">{product.name.clone()}</a>
                </strong>
            </td>
            <td>{dash_if_empty(product.sku.clone())}</td>
            <td>{dash_if_empty(product.categories_label())}</td>
            <td>{stock_cell}</td>
            {needed_cell}
            <td class="actions-column">{actions}</td>
        </tr>
    }
}

/// Per-row failure, shown beside the controls
#[component]
fn RowError(error: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        {move || error.get().map(|message| view! { <span class="row-error" role="alert">{message}</span> })}
    }
}

/// Decrease / input / increase
#[component]
fn QuantityControls(product_id: u32, quantity: i64) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_results_store();
    let busy = RwSignal::new(false);
    let (input, set_input) = signal(quantity.to_string());
    let (error, set_error) = signal::<Option<String>>(None);

    let settle = move |result: Result<StockUpdate, CommandError>| {
        let outcome = RowOutcome::settle(&result, quantity);
        if let Err(err) = &result {
            web_sys::console::warn_1(&format!("[INSIGHTS] product {}: {}", product_id, err.message).into());
        }
        set_input.set(outcome.input);
        set_error.set(outcome.error);
        if let Ok(update) = result {
            store_apply_update(&store, &update);
        }
    };

    let submit = move |new_quantity: Result<i64, CommandError>| {
        spawn_local(async move {
            let flight = SingleFlight::new(busy);
            let Some(_guard) = flight.begin() else {
                return;
            };
            let result = match new_quantity {
                Ok(value) => commands::update_quantity(&ctx.nonce.get_untracked(), product_id, value).await,
                Err(err) => Err(err),
            };
            settle(result);
        });
    };

    view! {
        <div class="quantity-controls">
            <button
                type="button"
                class="button button-small quantity-decrease"
                title="Decrease quantity"
                prop:disabled=move || busy.get() || quantity <= 0
                on:click=move |_| submit(Ok(quantity - 1))
            >
                "-"
            </button>
            <input
                type="number"
                class="quantity-input"
                min="0"
                prop:value=move || input.get()
                prop:disabled=move || busy.get()
                on:input=move |ev| set_input.set(event_target_value(&ev))
                on:change=move |ev| {
                    let parsed = parse_quantity(&event_target_value(&ev), "quantity");
                    if parsed != Ok(quantity) {
                        submit(parsed);
                    }
                }
            />
            <button
                type="button"
                class="button button-small quantity-increase"
                title="Increase quantity"
                prop:disabled=move || busy.get()
                on:click=move |_| submit(Ok(quantity + 1))
            >
                "+"
            </button>
            <RowError error=error />
        </div>
    }
}

/// "Enable Stock" with an inline initial quantity
#[component]
fn EnableStockControl(product_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_results_store();
    let busy = RwSignal::new(false);
    let (editing, set_editing) = signal(false);
    let (initial, set_initial) = signal("0".to_string());
    let (error, set_error) = signal::<Option<String>>(None);

    let confirm = move || {
        let raw = initial.get_untracked();
        spawn_local(async move {
            let flight = SingleFlight::new(busy);
            let Some(_guard) = flight.begin() else {
                return;
            };
            let result = match parse_quantity(&raw, "stock_quantity") {
                Ok(value) => commands::enable_stock(&ctx.nonce.get_untracked(), product_id, value).await,
                Err(err) => Err(err),
            };
            match result {
                // The row is re-keyed and redrawn with a stepper
                Ok(update) => store_apply_update(&store, &update),
                Err(err) => {
                    web_sys::console::warn_1(&format!("[INSIGHTS] product {}: {}", product_id, err.message).into());
                    set_error.set(Some(err.message));
                }
            }
        });
    };

    view! {
        <Show
            when=move || editing.get()
            fallback=move || view! {
                <button
                    type="button"
                    class="button button-small enable-stock-btn"
                    on:click=move |_| set_editing.set(true)
                >
                    "Enable Stock"
                </button>
            }
        >
            <span class="enable-stock-form">
                <input
                    type="number"
                    class="quantity-input"
                    min="0"
                    prop:value=move || initial.get()
                    on:input=move |ev| set_initial.set(event_target_value(&ev))
                />
                <button
                    type="button"
                    class="confirm-btn"
                    prop:disabled=move || busy.get()
                    on:click=move |_| confirm()
                >
                    "✓"
                </button>
                <button
                    type="button"
                    class="cancel-btn"
                    on:click=move |_| {
                        set_error.set(None);
                        set_editing.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
        <RowError error=error />
    }
}
