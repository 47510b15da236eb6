//! Taxonomy Terms
//!
//! Tags, categories and attribute terms as the catalog's term store exposes them.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A term taxonomy of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Taxonomy {
    ProductTag,
    ProductCategory,
    /// Attribute taxonomy, by attribute name (e.g. "color")
    Attribute(String),
}

impl Taxonomy {
    /// Storage key of the taxonomy ("product_tag", "product_cat", "pa_<name>")
    pub fn key(&self) -> String {
        match self {
            Taxonomy::ProductTag => "product_tag".to_string(),
            Taxonomy::ProductCategory => "product_cat".to_string(),
            Taxonomy::Attribute(name) => format!("pa_{}", name),
        }
    }
}

/// A taxonomy term with its published product count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: u32,
    pub name: String,
    /// Number of published products carrying the term
    pub count: u32,
    /// Parent term id, 0 for top-level terms
    pub parent: u32,
}

impl Term {
    pub fn new(id: u32, name: impl Into<String>, parent: u32) -> Self {
        Self {
            id,
            name: name.into(),
            count: 0,
            parent,
        }
    }
}

impl Entity for Term {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A registered product attribute (its terms live in `pa_<name>`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeTaxonomy {
    /// Slug, e.g. "color"
    pub name: String,
    /// Human label, e.g. "Color"
    pub label: String,
}

impl AttributeTaxonomy {
    pub fn taxonomy(&self) -> Taxonomy {
        Taxonomy::Attribute(self.name.clone())
    }
}

/// Term match on one taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermFilter {
    pub taxonomy: Taxonomy,
    pub term_id: u32,
    /// Also match products attached to any descendant of the term
    pub include_children: bool,
}

impl TermFilter {
    /// Exact match on `term_id`
    pub fn new(taxonomy: Taxonomy, term_id: u32) -> Self {
        Self {
            taxonomy,
            term_id,
            include_children: false,
        }
    }

    /// Match `term_id` or any term below it
    pub fn with_descendants(taxonomy: Taxonomy, term_id: u32) -> Self {
        Self {
            taxonomy,
            term_id,
            include_children: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_keys() {
        assert_eq!(Taxonomy::ProductTag.key(), "product_tag");
        assert_eq!(Taxonomy::ProductCategory.key(), "product_cat");
        assert_eq!(Taxonomy::Attribute("color".to_string()).key(), "pa_color");
    }

    #[test]
    fn test_term_filter_modes() {
        assert!(!TermFilter::new(Taxonomy::ProductTag, 42).include_children);
        assert!(TermFilter::with_descendants(Taxonomy::ProductCategory, 10).include_children);
    }
}
