//! Repository Layer
//!
//! Catalog and term store access.

mod catalog_repo;
mod db;
mod term_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use catalog_repo::CatalogRepository;
pub use db::{init_db, DbState, SharedConnection};
pub use term_repo::TermRepository;
pub use traits::{ProductCatalog, TermStore};
