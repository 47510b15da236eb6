//! Frontend Models
//!
//! Data structures matching backend responses.

use serde::{Deserialize, Serialize};

/// Dropdown option (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Search result row (matches backend)
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
    pub needed_quantity: i64,
}

impl ProductRecord {
    pub fn categories_label(&self) -> String {
        self.categories.join(", ")
    }

    pub fn is_below(&self, min_stock: Option<u32>) -> bool {
        match (min_stock, self.stock_quantity) {
            (Some(min), Some(qty)) => qty < i64::from(min),
            _ => false,
        }
    }
}

/// Fields changed by a stock mutation (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub product_id: u32,
    pub stock_quantity: i64,
    pub managing_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub products: Vec<ProductRecord>,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub filename: String,
    pub content_type: String,
    pub content_disposition: String,
    pub bytes: Vec<u8>,
}

/// Search request parameters (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub filter_type: String,
    pub filter_value: String,
    pub min_stock: Option<i64>,
    pub product_category: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportParams {
    #[serde(flatten)]
    pub search: SearchParams,
    pub export_type: String,
    pub selected_product_ids: Vec<u32>,
}

/// Failure envelope of a backend command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandError {
    /// "validation", "security", "upstream" or "not_found"
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub field: Option<String>,
}

impl CommandError {
    pub fn validation(field: &str, message: &str) -> Self {
        Self {
            kind: "validation".to_string(),
            message: message.to_string(),
            field: Some(field.to_string()),
        }
    }

    /// Transport failure: the command never produced an envelope
    pub fn network(action: &str) -> Self {
        Self {
            kind: "upstream".to_string(),
            message: format!("{} Please check your connection.", action),
            field: None,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
