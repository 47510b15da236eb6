//! Stock Mutation Service
//!
//! One product per call; a failure never touches other rows.

use crate::domain::{DomainError, DomainResult, StockUpdate};
use crate::repository::ProductCatalog;

/// Persist a new quantity for a stock-tracked product
pub async fn set_quantity<C>(catalog: &C, product_id: u32, quantity: i64) -> DomainResult<StockUpdate>
where
    C: ProductCatalog + ?Sized,
{
    if quantity < 0 {
        return Err(DomainError::validation("quantity", "Quantity cannot be negative."));
    }

    let product = catalog
        .get_product(product_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("product {}", product_id)))?;

    let Some(old_quantity) = product.stock_quantity.filter(|_| product.manage_stock) else {
        return Err(DomainError::validation(
            "product_id",
            "Stock management is not enabled for this product.",
        ));
    };

    let updated = catalog.update_stock(product_id, quantity).await?;
    log::info!(
        "[STOCK] product {} quantity {} -> {}",
        product_id,
        old_quantity,
        quantity
    );

    Ok(StockUpdate {
        product_id,
        stock_quantity: updated.stock_quantity.unwrap_or(quantity),
        managing_stock: true,
    })
}

/// Turn stock tracking on with an initial quantity. One-way.
pub async fn enable_stock_tracking<C>(catalog: &C, product_id: u32, initial_quantity: i64) -> DomainResult<StockUpdate>
where
    C: ProductCatalog + ?Sized,
{
    if initial_quantity < 0 {
        return Err(DomainError::validation(
            "stock_quantity",
            "Stock quantity cannot be negative.",
        ));
    }

    let updated = catalog.enable_stock(product_id, initial_quantity).await?;
    log::info!(
        "[STOCK] product {} tracking enabled with quantity {}",
        product_id,
        initial_quantity
    );

    Ok(StockUpdate {
        product_id,
        stock_quantity: updated.stock_quantity.unwrap_or(initial_quantity),
        managing_stock: updated.manage_stock,
    })
}
