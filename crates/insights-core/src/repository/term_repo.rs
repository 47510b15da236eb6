//! Term Repository
//!
//! SQLite-backed term store: tags, categories and attribute terms.

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::domain::{AttributeTaxonomy, DomainResult, Taxonomy, Term};
use super::db::{connection, SharedConnection};
use super::traits::TermStore;

/// Published-product count of a term
const TERM_COUNT: &str = "(SELECT COUNT(DISTINCT p.id) FROM term_relationships cr
      JOIN products p ON p.id = cr.product_id AND p.status = 'publish'
      WHERE cr.term_id = t.id)";

/// SQLite implementation of the term store
pub struct TermRepository {
    conn: SharedConnection,
}

impl TermRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl TermStore for TermRepository {
    async fn list_terms(&self, taxonomy: &Taxonomy, scope: Option<&[u32]>) -> DomainResult<Vec<Term>> {
        if matches!(scope, Some(ids) if ids.is_empty()) {
            return Ok(Vec::new());
        }

        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        // Non-empty terms first, then every ancestor of a kept term
        let mut sql = format!(
            "WITH RECURSIVE kept(id) AS (
                SELECT t.id FROM terms t WHERE t.taxonomy = ? AND {count} > 0",
            count = TERM_COUNT
        );
        let mut values = vec![Value::Text(taxonomy.key())];

        if let Some(ids) = scope {
            let placeholders = vec!["?"; ids.len()].join(", ");
            sql.push_str(&format!(
                " AND t.id IN (SELECT sr.term_id FROM term_relationships sr WHERE sr.product_id IN ({}))",
                placeholders
            ));
            values.extend(ids.iter().map(|id| Value::Integer(i64::from(*id))));
        }
        sql.push_str(&format!(
            "
                UNION
                SELECT parent.id FROM terms parent
                JOIN terms child ON child.parent = parent.id AND child.taxonomy = parent.taxonomy
                JOIN kept ON kept.id = child.id
            )
            SELECT t.id, t.name, t.parent, {count}
            FROM terms t
            WHERE t.id IN (SELECT id FROM kept)
            ORDER BY t.name",
            count = TERM_COUNT
        ));

        let mut stmt = conn.prepare(&sql)?;
        let terms = stmt
            .query_map(params_from_iter(values.iter()), row_to_term)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(terms)
    }

    async fn attribute_taxonomies(&self) -> DomainResult<Vec<AttributeTaxonomy>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare("SELECT name, label FROM attribute_taxonomies ORDER BY name")?;
        let attributes = stmt
            .query_map([], |row| {
                Ok(AttributeTaxonomy {
                    name: row.get(0)?,
                    label: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(attributes)
    }

    async fn get_term(&self, taxonomy: &Taxonomy, id: u32) -> DomainResult<Option<Term>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let sql = format!(
            "SELECT t.id, t.name, t.parent, {count} FROM terms t WHERE t.id = ?1 AND t.taxonomy = ?2",
            count = TERM_COUNT
        );
        let term = conn
            .query_row(&sql, params![id, taxonomy.key()], row_to_term)
            .optional()?;
        Ok(term)
    }
}

/// Convert a database row to Term
fn row_to_term(row: &rusqlite::Row) -> rusqlite::Result<Term> {
    Ok(Term {
        id: row.get(0)?,
        name: row.get(1)?,
        parent: row.get::<_, Option<u32>>(2)?.unwrap_or(0),
        count: row.get(3)?,
    })
}
