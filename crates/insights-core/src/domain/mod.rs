//! Domain Layer
//!
//! Catalog entities, search criteria and the category hierarchy.
//! No storage concerns live here.

mod category;
mod entity;
mod filter;
mod product;
mod taxonomy;

pub use category::{build_hierarchy, name_sort_key, CategoryNode, LEVEL_INDENT};
pub use entity::{DomainError, DomainResult, Entity};
pub use filter::{FilterSelector, FilterType, SearchCriteria, SearchParams, ATTRIBUTE_KEY_SEPARATOR};
pub use product::{needed_quantity, CatalogProduct, ProductRecord, StockUpdate};
pub use taxonomy::{AttributeTaxonomy, Taxonomy, Term, TermFilter};
