//! Shared fixtures for tests: an in-memory catalog with a small, known
//! product set.

use std::path::Path;
use std::sync::Arc;

use crate::handlers::{InsightsContext, SessionToken};
use crate::repository::{init_db, CatalogRepository, DbState, TermRepository};

pub const ADMIN_URL: &str = "https://shop.test/wp-admin";
pub const TOKEN: &str = "test-session-token";

/// Tags: 42 Wholesale, 7 Clearance, 8 Unused.
/// Categories: Clothing(10) > Shirts(11) > Polos(15); Accessories(12) > Hats(13), Belts(14).
/// Attributes: color (Red 20, Blue 21), size (Large 30).
///
/// | id | name         | stock     | tags | category | attrs | note        |
/// |----|--------------|-----------|------|----------|-------|-------------|
/// | 1  | Alpha Shirt  | 3         | 42   | Shirts   | Red   |             |
/// | 2  | Beta Shirt   | 10        | 42   | Shirts   | Blue  |             |
/// | 3  | Gamma Hat    | 1         | 7    | Hats     | Red   | empty SKU   |
/// | 4  | Delta Belt   | untracked | 42   | Belts    |       |             |
/// | 5  | Epsilon Polo | 0         | 42   | Polos    | Large |             |
/// | 6  | Zeta Draft   | 2         | 42   | Shirts   |       | draft       |
/// | 7  | Eta Hat      | 3         | 42   | Hats     |       | image       |
const SEED: &str = "
    INSERT INTO attribute_taxonomies (name, label) VALUES ('color', 'Color'), ('size', 'Size');

    INSERT INTO terms (id, taxonomy, name, parent) VALUES
        (42, 'product_tag', 'Wholesale', 0),
        (7, 'product_tag', 'Clearance', 0),
        (8, 'product_tag', 'Unused', 0),
        (10, 'product_cat', 'Clothing', 0),
        (11, 'product_cat', 'Shirts', 10),
        (12, 'product_cat', 'Accessories', 0),
        (13, 'product_cat', 'Hats', 12),
        (14, 'product_cat', 'Belts', 12),
        (15, 'product_cat', 'Polos', 11),
        (20, 'pa_color', 'Red', 0),
        (21, 'pa_color', 'Blue', 0),
        (30, 'pa_size', 'Large', 0);

    INSERT INTO products (id, name, sku, manage_stock, stock_quantity, status, image_url) VALUES
        (1, 'Alpha Shirt', 'A-1', 1, 3, 'publish', NULL),
        (2, 'Beta Shirt', 'B-1', 1, 10, 'publish', NULL),
        (3, 'Gamma Hat', '', 1, 1, 'publish', NULL),
        (4, 'Delta Belt', 'D-1', 0, NULL, 'publish', NULL),
        (5, 'Epsilon Polo', 'E-1', 1, 0, 'publish', NULL),
        (6, 'Zeta Draft', 'Z-1', 1, 2, 'draft', NULL),
        (7, 'Eta Hat', 'H-7', 1, 3, 'publish', 'https://shop.test/hat.jpg');

    INSERT INTO term_relationships (product_id, term_id) VALUES
        (1, 42), (1, 11), (1, 20),
        (2, 42), (2, 11), (2, 21),
        (3, 7), (3, 13), (3, 20),
        (4, 42), (4, 14),
        (5, 42), (5, 15), (5, 30),
        (6, 42), (6, 11),
        (7, 42), (7, 13);
";

pub async fn seeded_db() -> DbState {
    let db = init_db(Path::new(":memory:")).await.expect("in-memory db");
    exec(&db, SEED).await;
    db
}

pub async fn exec(db: &DbState, sql: &str) {
    let guard = db.conn.lock().await;
    guard.as_ref().expect("db ready").execute_batch(sql).expect("seed sql");
}

pub fn catalog(db: &DbState) -> CatalogRepository {
    CatalogRepository::new(db.conn.clone(), ADMIN_URL)
}

pub fn context(db: &DbState) -> InsightsContext {
    InsightsContext {
        catalog: Arc::new(catalog(db)),
        terms: Arc::new(TermRepository::new(db.conn.clone())),
        session: SessionToken::from_value(TOKEN),
        export_prefix: "inventory-insights".to_string(),
    }
}
