//! CSV Export
//!
//! Fixed column order: Product Name, SKU, Categories, Current Stock,
//! [Stock Needed], Product ID.

use chrono::{DateTime, TimeZone};

use crate::domain::{DomainError, DomainResult, Entity, ProductRecord};

/// Whether an export covers the whole result or a chosen subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportScope {
    All,
    /// Product ids picked by the user; never empty
    Selected(Vec<u32>),
}

impl ExportScope {
    /// Parse the request's `export_type` / `selected_product_ids` pair
    pub fn from_request(export_type: &str, selected: Vec<u32>) -> DomainResult<Self> {
        match export_type.trim() {
            "" | "all" => Ok(ExportScope::All),
            "selected" if selected.is_empty() => Err(DomainError::validation(
                "selected_product_ids",
                "Please select at least one product to export.",
            )),
            "selected" => Ok(ExportScope::Selected(selected)),
            _ => Err(DomainError::validation("export_type", "Invalid export type.")),
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            ExportScope::All => "all",
            ExportScope::Selected(_) => "selected",
        }
    }

    /// Items in scope, keeping their order
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        T: Entity<Id = u32>,
    {
        match self {
            ExportScope::All => items.iter().collect(),
            ExportScope::Selected(ids) => items.iter().filter(|item| ids.contains(&item.id())).collect(),
        }
    }
}

/// Header row for a threshold setting
pub fn csv_headers(min_stock: Option<u32>) -> Vec<&'static str> {
    let mut headers = vec!["Product Name", "SKU", "Categories", "Current Stock"];
    if min_stock.is_some() {
        headers.push("Stock Needed");
    }
    headers.push("Product ID");
    headers
}

/// Serialize the products in scope
pub fn render_csv(products: &[ProductRecord], min_stock: Option<u32>, scope: &ExportScope) -> DomainResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(csv_headers(min_stock))?;

    for product in scope.apply(products) {
        let mut row = vec![
            product.name.clone(),
            product.sku.clone(),
            product.categories_label(),
            product.stock_quantity.map(|q| q.to_string()).unwrap_or_default(),
        ];
        if min_stock.is_some() {
            row.push(product.needed_quantity.to_string());
        }
        row.push(product.id.to_string());
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| DomainError::Upstream(format!("CSV writer: {}", e)))
}

/// `<prefix>-<scope>-<YYYY-MM-DD-HH-mm-ss>.csv`
pub fn export_filename<Tz>(prefix: &str, scope: &ExportScope, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}-{}-{}.csv", prefix, scope.suffix(), at.format("%Y-%m-%d-%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: u32, name: &str, qty: i64, min_stock: Option<u32>) -> ProductRecord {
        ProductRecord {
            id,
            name: name.to_string(),
            sku: format!("SKU-{}", id),
            stock_quantity: Some(qty),
            categories: vec!["Shirts".to_string(), "Sale".to_string()],
            image_url: None,
            edit_url: String::new(),
            managing_stock: true,
            needed_quantity: crate::domain::needed_quantity(min_stock, Some(qty)),
        }
    }

    fn parse(bytes: &[u8]) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_reader(bytes);
        let headers = reader.headers().unwrap().iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn test_csv_with_threshold() {
        let products = vec![record(1, "Alpha, \"the\" shirt", 2, Some(5)), record(2, "Beta", 4, Some(5))];
        let bytes = render_csv(&products, Some(5), &ExportScope::All).unwrap();
        let (headers, rows) = parse(&bytes);

        assert_eq!(
            headers,
            vec!["Product Name", "SKU", "Categories", "Current Stock", "Stock Needed", "Product ID"]
        );
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == headers.len()));
        assert_eq!(rows[0], vec!["Alpha, \"the\" shirt", "SKU-1", "Shirts, Sale", "2", "3", "1"]);
    }

    #[test]
    fn test_csv_without_threshold_has_no_needed_column() {
        let products = vec![record(1, "Alpha", 2, None)];
        let bytes = render_csv(&products, None, &ExportScope::All).unwrap();
        let (headers, rows) = parse(&bytes);

        assert!(!headers.iter().any(|h| h == "Stock Needed"));
        assert_eq!(rows[0].len(), headers.len());
        assert_eq!(rows[0][4], "1");
    }

    #[test]
    fn test_selected_scope_keeps_result_order() {
        let products = vec![record(3, "C", 0, None), record(1, "A", 1, None), record(2, "B", 2, None)];
        let scope = ExportScope::Selected(vec![2, 3]);
        let bytes = render_csv(&products, None, &scope).unwrap();
        let (_, rows) = parse(&bytes);

        let ids: Vec<_> = rows.iter().map(|r| r[4].clone()).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn test_selected_scope_requires_ids() {
        let err = ExportScope::from_request("selected", vec![]).unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "selected_product_ids", .. }));
        assert_eq!(ExportScope::from_request("", vec![]).unwrap(), ExportScope::All);
        assert!(ExportScope::from_request("some", vec![1]).is_err());
    }

    #[test]
    fn test_export_filename() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            export_filename("inventory-insights", &ExportScope::All, &at),
            "inventory-insights-all-2024-03-09-14-05-07.csv"
        );
        assert_eq!(
            export_filename("inventory-insights", &ExportScope::Selected(vec![1]), &at),
            "inventory-insights-selected-2024-03-09-14-05-07.csv"
        );
    }
}
