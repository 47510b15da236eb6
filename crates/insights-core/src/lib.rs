//! Inventory Insights core
//!
//! Layered like the desktop backend it serves:
//! - domain: entities, filters and validation
//! - repository: catalog and term store traits with SQLite implementations
//! - report: search engine, table/CSV rendering, stock mutations
//! - handlers: one async function per UI action
//! - config: settings file

pub mod config;
pub mod domain;
pub mod handlers;
pub mod report;
pub mod repository;

#[cfg(test)]
mod test_support;
