//! Product Entities
//!
//! `CatalogProduct` is what the catalog hands back for a lookup;
//! `ProductRecord` is the search result row with the computed shortfall.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A product as loaded from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    pub id: u32,
    pub name: String,
    pub sku: String,
    /// Whether the catalog tracks a numeric quantity at all
    pub manage_stock: bool,
    /// `None` when stock tracking is disabled
    pub stock_quantity: Option<i64>,
    /// Category names, ordered
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub edit_url: String,
}

/// Search result row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u32,
    pub name: String,
    pub sku: String,
    pub stock_quantity: Option<i64>,
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub edit_url: String,
    pub managing_stock: bool,
    /// Shortfall against the threshold, 0 when no threshold is set
    pub needed_quantity: i64,
}

impl ProductRecord {
    pub fn from_catalog(product: CatalogProduct, min_stock: Option<u32>) -> Self {
        let managing_stock = product.manage_stock && product.stock_quantity.is_some();
        Self {
            needed_quantity: needed_quantity(min_stock, product.stock_quantity),
            id: product.id,
            name: product.name,
            sku: product.sku,
            stock_quantity: product.stock_quantity,
            categories: product.categories,
            image_url: product.image_url,
            edit_url: product.edit_url,
            managing_stock,
        }
    }

    /// Tracked quantity strictly below the threshold
    pub fn is_below(&self, min_stock: Option<u32>) -> bool {
        match (min_stock, self.stock_quantity) {
            (Some(min), Some(qty)) => qty < i64::from(min),
            _ => false,
        }
    }

    pub fn categories_label(&self) -> String {
        self.categories.join(", ")
    }

    /// Apply a confirmed stock mutation, recomputing the shortfall for `min_stock`
    pub fn apply_stock_update(&mut self, update: &StockUpdate, min_stock: Option<u32>) {
        self.stock_quantity = Some(update.stock_quantity);
        self.managing_stock = update.managing_stock;
        self.needed_quantity = needed_quantity(min_stock, self.stock_quantity);
    }
}

impl Entity for ProductRecord {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// `max(0, min_stock - quantity)` when both are known, otherwise 0
pub fn needed_quantity(min_stock: Option<u32>, stock_quantity: Option<i64>) -> i64 {
    match (min_stock, stock_quantity) {
        (Some(min), Some(qty)) => (i64::from(min) - qty).max(0),
        _ => 0,
    }
}

/// Fields changed by a stock mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub product_id: u32,
    pub stock_quantity: i64,
    pub managing_stock: bool,
}
