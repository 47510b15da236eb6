//! Report Layer
//!
//! Search engine, renderers and stock mutations over the repository traits.

pub mod csv_export;
pub mod options;
pub mod search;
pub mod stock;
pub mod table;

pub use csv_export::{csv_headers, export_filename, render_csv, ExportScope};
pub use options::{attribute_options, category_options, tag_options, SelectOption};
pub use search::{matching_product_ids, search_products};
pub use stock::{enable_stock_tracking, set_quantity};
pub use table::{render_table, ResultsTable, NO_RESULTS, NO_RESULTS_BELOW_THRESHOLD};
