//! Database Connection and Setup
//!
//! Manages the SQLite catalog connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{DomainError, DomainResult};

/// Connection slot shared by the repositories. `None` until initialized.
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone, Default)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move an initialized connection into this (possibly already shared) slot
    pub async fn install(&self, other: DbState) {
        let conn = other.conn.lock().await.take();
        *self.conn.lock().await = conn;
    }

    pub async fn is_ready(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}

/// Borrow the connection out of a locked slot
pub(crate) fn connection<'a>(
    guard: &'a MutexGuard<'_, Option<Connection>>,
) -> DomainResult<&'a Connection> {
    match &**guard {
        Some(conn) => Ok(conn),
        None => Err(DomainError::Upstream("Database not initialized".to_string())),
    }
}

/// Open (or create) the catalog database and run migrations.
/// `:memory:` opens a private in-memory database.
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)?;
    run_migrations(&conn)?;
    log::info!("catalog database ready at {}", db_path.display());

    let state = DbState::new();
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY,
            parent_id INTEGER NOT NULL DEFAULT 0,
            kind TEXT NOT NULL DEFAULT 'product',
            status TEXT NOT NULL DEFAULT 'publish',
            name TEXT NOT NULL,
            sku TEXT NOT NULL DEFAULT '',
            manage_stock INTEGER NOT NULL DEFAULT 0,
            stock_quantity INTEGER,
            image_url TEXT,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS terms (
            id INTEGER PRIMARY KEY,
            taxonomy TEXT NOT NULL,
            name TEXT NOT NULL,
            parent INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS term_relationships (
            product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            term_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
            PRIMARY KEY (product_id, term_id)
        );

        CREATE TABLE IF NOT EXISTS attribute_taxonomies (
            name TEXT PRIMARY KEY,
            label TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_terms_taxonomy ON terms(taxonomy);
        CREATE INDEX IF NOT EXISTS idx_term_relationships_term ON term_relationships(term_id);
        CREATE INDEX IF NOT EXISTS idx_products_stock ON products(status, manage_stock);",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        init_db(&path).await.expect("first init");
        let state = init_db(&path).await.expect("second init");
        assert!(state.is_ready().await);
    }

    #[tokio::test]
    async fn test_uninitialized_state_reports_upstream_error() {
        let state = DbState::new();
        let guard = state.conn.lock().await;
        assert!(matches!(connection(&guard), Err(DomainError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_install_moves_connection() {
        let shared = DbState::new();
        let clone = shared.clone();
        shared.install(init_db(Path::new(":memory:")).await.unwrap()).await;
        assert!(clone.is_ready().await);
    }
}
