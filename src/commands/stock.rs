//! Stock Commands
//!
//! Frontend bindings for inline stock edits.

use serde::Serialize;

use crate::models::{CommandError, StockUpdate};
use super::call;

#[derive(Serialize)]
struct QuantityArgs<'a> {
    nonce: &'a str,
    #[serde(rename = "productId")]
    product_id: u32,
    quantity: i64,
}

#[derive(Serialize)]
struct EnableStockArgs<'a> {
    nonce: &'a str,
    #[serde(rename = "productId")]
    product_id: u32,
    #[serde(rename = "stockQuantity")]
    stock_quantity: i64,
}

pub async fn update_quantity(nonce: &str, product_id: u32, quantity: i64) -> Result<StockUpdate, CommandError> {
    call(
        "update_quantity",
        &QuantityArgs { nonce, product_id, quantity },
        "Failed to update quantity.",
    )
    .await
}

pub async fn enable_stock(nonce: &str, product_id: u32, stock_quantity: i64) -> Result<StockUpdate, CommandError> {
    call(
        "enable_stock",
        &EnableStockArgs { nonce, product_id, stock_quantity },
        "Failed to enable stock management.",
    )
    .await
}
