//! Inline stock actions

use crate::domain::StockUpdate;
use crate::report::{enable_stock_tracking, set_quantity};

use super::error::or_upstream;
use super::{CommandResult, InsightsContext};

pub async fn update_quantity(
    ctx: &InsightsContext,
    nonce: &str,
    product_id: u32,
    quantity: i64,
) -> CommandResult<StockUpdate> {
    ctx.authorize(nonce, "update_quantity")?;
    set_quantity(ctx.catalog.as_ref(), product_id, quantity)
        .await
        .map_err(or_upstream("Failed to update quantity. Please try again."))
}

pub async fn enable_stock(
    ctx: &InsightsContext,
    nonce: &str,
    product_id: u32,
    stock_quantity: i64,
) -> CommandResult<StockUpdate> {
    ctx.authorize(nonce, "enable_stock")?;
    enable_stock_tracking(ctx.catalog.as_ref(), product_id, stock_quantity)
        .await
        .map_err(or_upstream("Failed to enable stock management. Please try again."))
}
