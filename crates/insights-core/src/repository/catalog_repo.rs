//! Catalog Repository
//!
//! SQLite-backed implementation of the product catalog.

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::domain::{CatalogProduct, DomainError, DomainResult, TermFilter};
use super::db::{connection, SharedConnection};
use super::traits::ProductCatalog;

/// SQLite implementation of the product catalog
pub struct CatalogRepository {
    conn: SharedConnection,
    admin_url: String,
}

impl CatalogRepository {
    /// `admin_url` is the admin base used to build product edit links
    pub fn new(conn: SharedConnection, admin_url: impl Into<String>) -> Self {
        Self {
            conn,
            admin_url: admin_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn edit_url(&self, id: u32) -> String {
        format!("{}/post.php?post={}&action=edit", self.admin_url, id)
    }

    fn load_product(&self, conn: &Connection, id: u32) -> DomainResult<Option<CatalogProduct>> {
        let row = conn
            .query_row(
                "SELECT id, name, sku, manage_stock, stock_quantity, image_url
                 FROM products WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, u32>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        row.get::<_, i64>(3)? != 0,
                        row.get::<_, Option<i64>>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, name, sku, manage_stock, stock_quantity, image_url)) = row else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT t.name FROM terms t
             JOIN term_relationships r ON r.term_id = t.id
             WHERE r.product_id = ?1 AND t.taxonomy = 'product_cat'
             ORDER BY t.name",
        )?;
        let categories = stmt
            .query_map(params![id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(CatalogProduct {
            id,
            name,
            sku,
            manage_stock,
            // An untracked product has no meaningful quantity
            stock_quantity: if manage_stock { stock_quantity } else { None },
            categories,
            image_url: image_url.filter(|url| !url.is_empty()),
            edit_url: self.edit_url(id),
        }))
    }

    fn write_stock(
        &self,
        conn: &Connection,
        id: u32,
        quantity: i64,
        enable: bool,
    ) -> DomainResult<CatalogProduct> {
        let now = chrono::Utc::now().timestamp_millis();
        let changed = if enable {
            conn.execute(
                "UPDATE products SET manage_stock = 1, stock_quantity = ?1, updated_at = ?2 WHERE id = ?3",
                params![quantity, now, id],
            )?
        } else {
            conn.execute(
                "UPDATE products SET stock_quantity = ?1, updated_at = ?2 WHERE id = ?3",
                params![quantity, now, id],
            )?
        };

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Product {}", id)));
        }

        self.load_product(conn, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Product {}", id)))
    }
}

#[async_trait]
impl ProductCatalog for CatalogRepository {
    async fn products_matching(&self, filters: &[TermFilter]) -> DomainResult<Vec<u32>> {
        if filters.is_empty() {
            return Ok(Vec::new());
        }

        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut sql = String::from(
            "SELECT p.id FROM products p
             WHERE p.status = 'publish'
               AND p.kind IN ('product', 'product_variation')
               AND p.manage_stock = 1",
        );
        let mut values: Vec<Value> = Vec::with_capacity(filters.len() * 3);
        for filter in filters {
            let taxonomy = filter.taxonomy.key();
            let term_id = Value::Integer(i64::from(filter.term_id));
            if filter.include_children {
                sql.push_str(
                    " AND EXISTS (SELECT 1 FROM term_relationships r
                       JOIN terms t ON t.id = r.term_id
                       WHERE r.product_id = p.id AND t.taxonomy = ? AND t.id IN (
                           WITH RECURSIVE subtree(id) AS (
                               SELECT ?
                               UNION
                               SELECT child.id FROM terms child
                               JOIN subtree ON child.parent = subtree.id
                               WHERE child.taxonomy = ?
                           )
                           SELECT id FROM subtree))",
                );
                values.push(Value::Text(taxonomy.clone()));
                values.push(term_id);
                values.push(Value::Text(taxonomy));
            } else {
                sql.push_str(
                    " AND EXISTS (SELECT 1 FROM term_relationships r
                       JOIN terms t ON t.id = r.term_id
                       WHERE r.product_id = p.id AND t.taxonomy = ? AND t.id = ?)",
                );
                values.push(Value::Text(taxonomy));
                values.push(term_id);
            }
        }
        sql.push_str(" ORDER BY p.id");

        let mut stmt = conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params_from_iter(values.iter()), |row| row.get::<_, u32>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    async fn get_product(&self, id: u32) -> DomainResult<Option<CatalogProduct>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;
        self.load_product(conn, id)
    }

    async fn update_stock(&self, id: u32, quantity: i64) -> DomainResult<CatalogProduct> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;
        self.write_stock(conn, id, quantity, false)
    }

    async fn enable_stock(&self, id: u32, quantity: i64) -> DomainResult<CatalogProduct> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;
        self.write_stock(conn, id, quantity, true)
    }
}
