//! Results State Store
//!
//! The current result set and what the table does with it, held in a
//! reactive_stores Store provided through context.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{CommandError, ProductRecord, SearchParams, StockUpdate};

/// Client-side ordering of the current results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Server order
    #[default]
    StockAsc,
    StockDesc,
    NameAsc,
    NameDesc,
    SkuAsc,
    SkuDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::StockAsc,
        SortOrder::StockDesc,
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::SkuAsc,
        SortOrder::SkuDesc,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SortOrder::StockAsc => "stock_asc",
            SortOrder::StockDesc => "stock_desc",
            SortOrder::NameAsc => "name_asc",
            SortOrder::NameDesc => "name_desc",
            SortOrder::SkuAsc => "sku_asc",
            SortOrder::SkuDesc => "sku_desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::StockAsc => "Stock (Low to High)",
            SortOrder::StockDesc => "Stock (High to Low)",
            SortOrder::NameAsc => "Name (A-Z)",
            SortOrder::NameDesc => "Name (Z-A)",
            SortOrder::SkuAsc => "SKU (A-Z)",
            SortOrder::SkuDesc => "SKU (Z-A)",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|order| order.key() == key)
            .unwrap_or_default()
    }
}

/// Current result set with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ResultsState {
    pub products: Vec<ProductRecord>,
    /// Server-rendered table, used for the empty state
    pub html: String,
    /// Threshold of the search that produced `products`
    pub min_stock: Option<u32>,
    /// Parameters of that search, reused by exports
    pub params: Option<SearchParams>,
    /// Checked product ids
    pub selected: Vec<u32>,
    pub sort: SortOrder,
}

/// Type alias for the store
pub type ResultsStore = Store<ResultsState>;

/// Get the results store from context
pub fn use_results_store() -> ResultsStore {
    expect_context::<ResultsStore>()
}

// ========================
// Result Set Operations
// ========================

/// Replace a row's stock fields after a confirmed mutation
pub fn patch_product(products: &mut [ProductRecord], update: &StockUpdate, min_stock: Option<u32>) -> bool {
    let Some(product) = products.iter_mut().find(|p| p.id == update.product_id) else {
        return false;
    };
    product.stock_quantity = Some(update.stock_quantity);
    product.managing_stock = update.managing_stock;
    product.needed_quantity = match min_stock {
        Some(min) => (i64::from(min) - update.stock_quantity).max(0),
        None => 0,
    };
    true
}

/// Stable sort of the result set
pub fn sort_products(products: &mut [ProductRecord], order: SortOrder) {
    let lower = |s: &str| s.to_lowercase();
    match order {
        SortOrder::StockAsc => products.sort_by_key(|p| p.stock_quantity),
        SortOrder::StockDesc => products.sort_by(|a, b| b.stock_quantity.cmp(&a.stock_quantity)),
        SortOrder::NameAsc => products.sort_by_cached_key(|p| lower(&p.name)),
        SortOrder::NameDesc => products.sort_by(|a, b| lower(&b.name).cmp(&lower(&a.name))),
        SortOrder::SkuAsc => products.sort_by_cached_key(|p| lower(&p.sku)),
        SortOrder::SkuDesc => products.sort_by(|a, b| lower(&b.sku).cmp(&lower(&a.sku))),
    }
}

/// Check or uncheck one id
pub fn toggle_selected(selected: &mut Vec<u32>, id: u32, checked: bool) {
    let present = selected.contains(&id);
    if checked && !present {
        selected.push(id);
    } else if !checked && present {
        selected.retain(|s| *s != id);
    }
}

/// Checked ids in result order
pub fn selected_in_order(products: &[ProductRecord], selected: &[u32]) -> Vec<u32> {
    products
        .iter()
        .map(|p| p.id)
        .filter(|id| selected.contains(id))
        .collect()
}

// ========================
// Store Helper Functions
// ========================

/// Install a fresh search result
pub fn store_set_results(store: &ResultsStore, params: SearchParams, products: Vec<ProductRecord>, html: String) {
    let min_stock = params.min_stock.and_then(|n| u32::try_from(n).ok());
    let mut products = products;
    let order = store.sort().get_untracked();
    if order != SortOrder::StockAsc {
        sort_products(&mut products, order);
    }
    store.products().set(products);
    store.html().set(html);
    store.min_stock().set(min_stock);
    store.params().set(Some(params));
    store.selected().set(Vec::new());
}

pub fn store_clear_results(store: &ResultsStore) {
    store.products().set(Vec::new());
    store.html().set(String::new());
    store.params().set(None);
    store.selected().set(Vec::new());
}

/// Apply a confirmed stock mutation to the row
pub fn store_apply_update(store: &ResultsStore, update: &StockUpdate) {
    let min_stock = store.min_stock().get_untracked();
    patch_product(&mut store.products().write(), update, min_stock);
}

pub fn store_sort(store: &ResultsStore, order: SortOrder) {
    store.sort().set(order);
    sort_products(&mut store.products().write(), order);
}

// ========================
// Row stock edits
// ========================

/// Parse a quantity typed into a row; negatives and non-numbers are rejected
pub fn parse_quantity(raw: &str, field: &str) -> Result<i64, CommandError> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 0 => Ok(value),
        Ok(_) => Err(CommandError::validation(field, "Quantity cannot be negative.")),
        Err(_) => Err(CommandError::validation(field, "Please enter a valid quantity.")),
    }
}

/// What a row shows after a stock edit settles
#[derive(Debug, Clone, PartialEq)]
pub struct RowOutcome {
    /// Text for the quantity input
    pub input: String,
    /// Inline message next to the row's controls
    pub error: Option<String>,
}

impl RowOutcome {
    /// A failure keeps the row's previous quantity and reports beside it
    pub fn settle(result: &Result<StockUpdate, CommandError>, previous: i64) -> Self {
        match result {
            Ok(update) => Self {
                input: update.stock_quantity.to_string(),
                error: None,
            },
            Err(err) => Self {
                input: previous.to_string(),
                error: Some(err.message.clone()),
            },
        }
    }
}

// ========================
// Single-flight guard
// ========================

/// Busy flag shared between a control and its in-flight request
pub trait BusyFlag: Clone {
    fn is_busy(&self) -> bool;
    fn set_busy(&self, busy: bool);
}

impl BusyFlag for Rc<Cell<bool>> {
    fn is_busy(&self) -> bool {
        self.get()
    }

    fn set_busy(&self, busy: bool) {
        self.set(busy);
    }
}

impl BusyFlag for RwSignal<bool> {
    fn is_busy(&self) -> bool {
        self.try_get_untracked().unwrap_or(false)
    }

    fn set_busy(&self, busy: bool) {
        // The owning component may already be gone
        let _ = self.try_set(busy);
    }
}

/// Ignores a new request while one is outstanding
#[derive(Clone)]
pub struct SingleFlight<F: BusyFlag> {
    flag: F,
}

impl<F: BusyFlag> SingleFlight<F> {
    pub fn new(flag: F) -> Self {
        Self { flag }
    }

    /// `None` while busy. The flag resets when the guard drops, on every path.
    pub fn begin(&self) -> Option<FlightGuard<F>> {
        if self.flag.is_busy() {
            return None;
        }
        self.flag.set_busy(true);
        Some(FlightGuard {
            flag: self.flag.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.flag.is_busy()
    }
}

pub struct FlightGuard<F: BusyFlag> {
    flag: F,
}

impl<F: BusyFlag> Drop for FlightGuard<F> {
    fn drop(&mut self) {
        self.flag.set_busy(false);
    }
}

// ========================
// Latest-request guard
// ========================

/// Request counter shared between a control and its responses
pub trait Counter: Clone {
    fn current(&self) -> u64;
    fn store(&self, value: u64);
}

impl Counter for Rc<Cell<u64>> {
    fn current(&self) -> u64 {
        self.get()
    }

    fn store(&self, value: u64) {
        self.set(value);
    }
}

impl Counter for StoredValue<u64> {
    fn current(&self) -> u64 {
        self.try_get_value().unwrap_or(0)
    }

    fn store(&self, value: u64) {
        let _ = self.try_set_value(value);
    }
}

/// Drops responses that a newer request has superseded
#[derive(Clone, Copy)]
pub struct LatestOnly<C: Counter> {
    counter: C,
}

impl<C: Counter> LatestOnly<C> {
    pub fn new(counter: C) -> Self {
        Self { counter }
    }

    /// Ticket for a new request; every older ticket stops being current
    pub fn issue(&self) -> u64 {
        let next = self.counter.current().wrapping_add(1);
        self.counter.store(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.counter.current() == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, name: &str, sku: &str, qty: Option<i64>) -> ProductRecord {
        ProductRecord {
            id,
            name: name.to_string(),
            sku: sku.to_string(),
            stock_quantity: qty,
            categories: Vec::new(),
            image_url: None,
            edit_url: String::new(),
            managing_stock: qty.is_some(),
            needed_quantity: 0,
        }
    }

    fn ids(products: &[ProductRecord]) -> Vec<u32> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_patch_recomputes_needed() {
        let mut products = vec![product(1, "A", "", Some(1)), product(2, "B", "", None)];

        let update = StockUpdate { product_id: 1, stock_quantity: 3, managing_stock: true };
        assert!(patch_product(&mut products, &update, Some(5)));
        assert_eq!(products[0].stock_quantity, Some(3));
        assert_eq!(products[0].needed_quantity, 2);

        let enable = StockUpdate { product_id: 2, stock_quantity: 0, managing_stock: true };
        patch_product(&mut products, &enable, None);
        assert!(products[1].managing_stock);
        assert_eq!(products[1].needed_quantity, 0);

        let missing = StockUpdate { product_id: 9, stock_quantity: 1, managing_stock: true };
        assert!(!patch_product(&mut products, &missing, None));
    }

    #[test]
    fn test_sort_orders() {
        let mut products = vec![
            product(1, "beta", "B-2", Some(3)),
            product(2, "Alpha", "a-9", Some(1)),
            product(3, "gamma", "C-1", Some(3)),
        ];

        sort_products(&mut products, SortOrder::NameAsc);
        assert_eq!(ids(&products), vec![2, 1, 3]);

        sort_products(&mut products, SortOrder::SkuDesc);
        assert_eq!(ids(&products), vec![3, 1, 2]);

        sort_products(&mut products, SortOrder::StockDesc);
        // Ties keep the previous order
        assert_eq!(ids(&products), vec![3, 1, 2]);

        sort_products(&mut products, SortOrder::StockAsc);
        assert_eq!(ids(&products), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_keys_round_trip() {
        for order in SortOrder::ALL {
            assert_eq!(SortOrder::from_key(order.key()), order);
        }
        assert_eq!(SortOrder::from_key("bogus"), SortOrder::StockAsc);
    }

    #[test]
    fn test_selection() {
        let products = vec![product(5, "E", "", Some(0)), product(1, "A", "", Some(3))];
        let mut selected = Vec::new();

        toggle_selected(&mut selected, 1, true);
        toggle_selected(&mut selected, 5, true);
        toggle_selected(&mut selected, 5, true);
        assert_eq!(selected, vec![1, 5]);
        assert_eq!(selected_in_order(&products, &selected), vec![5, 1]);

        toggle_selected(&mut selected, 1, false);
        assert_eq!(selected, vec![5]);
    }

    #[test]
    fn test_single_flight_resets_on_every_path() {
        let flight = SingleFlight::new(Rc::new(Cell::new(false)));

        let guard = flight.begin().expect("idle");
        assert!(flight.is_busy());
        assert!(flight.begin().is_none());
        drop(guard);
        assert!(!flight.is_busy());

        let failing = || -> Result<(), String> {
            let _guard = flight.begin().ok_or("busy")?;
            Err("network".to_string())
        };
        assert!(failing().is_err());
        assert!(!flight.is_busy());
    }

    #[test]
    fn test_latest_only_drops_superseded_responses() {
        let latest = LatestOnly::new(Rc::new(Cell::new(0u64)));

        let tags = latest.issue();
        let attributes = latest.issue();

        // The tags response arrives last but is stale
        assert!(latest.is_current(attributes));
        assert!(!latest.is_current(tags));

        // Clearing the field also invalidates what is in flight
        latest.issue();
        assert!(!latest.is_current(attributes));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 7 ", "quantity"), Ok(7));
        assert_eq!(parse_quantity("0", "quantity"), Ok(0));

        let err = parse_quantity("-1", "stock_quantity").unwrap_err();
        assert_eq!(err.field.as_deref(), Some("stock_quantity"));
        assert_eq!(err.message, "Quantity cannot be negative.");

        assert!(parse_quantity("lots", "quantity").is_err());
    }

    #[test]
    fn test_failed_edit_keeps_row_and_reports_inline() {
        let failed: Result<StockUpdate, CommandError> =
            Err(CommandError::validation("product_id", "Stock management is not enabled for this product."));

        let outcome = RowOutcome::settle(&failed, 3);

        assert_eq!(outcome.input, "3");
        assert_eq!(outcome.error.as_deref(), Some("Stock management is not enabled for this product."));

        let saved = Ok(StockUpdate { product_id: 1, stock_quantity: 9, managing_stock: true });
        assert_eq!(RowOutcome::settle(&saved, 3), RowOutcome { input: "9".to_string(), error: None });
    }
}
