//! Repository Layer - Core Traits
//!
//! Abstract interfaces for the store catalog and its term store.
//! The SQLite implementations live next to this file; anything else that
//! speaks the same contract can be swapped in.

use async_trait::async_trait;
use crate::domain::{AttributeTaxonomy, CatalogProduct, DomainResult, Taxonomy, Term, TermFilter};

/// Product catalog collaborator
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Ids of published, stock-tracked products (and variations) satisfying
    /// ALL filters, in catalog order. No filters match nothing.
    async fn products_matching(&self, filters: &[TermFilter]) -> DomainResult<Vec<u32>>;

    /// Load one product with its category names
    async fn get_product(&self, id: u32) -> DomainResult<Option<CatalogProduct>>;

    /// Persist a new quantity for a product
    async fn update_stock(&self, id: u32, quantity: i64) -> DomainResult<CatalogProduct>;

    /// Turn stock tracking on and set the initial quantity
    async fn enable_stock(&self, id: u32, quantity: i64) -> DomainResult<CatalogProduct>;
}

/// Taxonomy term collaborator
#[async_trait]
pub trait TermStore: Send + Sync {
    /// Non-empty terms of a taxonomy, plus the ancestors of every kept term,
    /// ordered by name. With `scope`, only terms attached to one of the given
    /// products (and their ancestors).
    async fn list_terms(&self, taxonomy: &Taxonomy, scope: Option<&[u32]>) -> DomainResult<Vec<Term>>;

    /// Registered product attributes
    async fn attribute_taxonomies(&self) -> DomainResult<Vec<AttributeTaxonomy>>;

    /// Find one term of a taxonomy
    async fn get_term(&self, taxonomy: &Taxonomy, id: u32) -> DomainResult<Option<Term>>;
}
