//! Tauri Commands for inline stock edits

use tauri::State;
use insights_core::domain::StockUpdate;
use insights_core::handlers::{self, CommandError};
use crate::AppState;

/// Set the quantity of a stock-tracked product
#[tauri::command]
pub async fn update_quantity(
    state: State<'_, AppState>,
    nonce: String,
    product_id: u32,
    quantity: i64,
) -> Result<StockUpdate, CommandError> {
    handlers::update_quantity(&state.context, &nonce, product_id, quantity).await
}

/// Turn on stock tracking with an initial quantity
#[tauri::command]
pub async fn enable_stock(
    state: State<'_, AppState>,
    nonce: String,
    product_id: u32,
    stock_quantity: i64,
) -> Result<StockUpdate, CommandError> {
    handlers::enable_stock(&state.context, &nonce, product_id, stock_quantity).await
}
