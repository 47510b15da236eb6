//! Category Hierarchy
//!
//! Flattens the parent/child category graph into display order: top-level
//! categories alphabetically, each followed depth-first by its children.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::taxonomy::Term;

/// Indentation unit repeated once per level in display names
pub const LEVEL_INDENT: &str = "— ";

/// A category positioned in the flattened hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: u32,
    pub name: String,
    /// 0 for top-level categories
    pub parent_id: u32,
    /// Depth below the top-level ancestor
    pub level: usize,
}

impl CategoryNode {
    /// Name prefixed with one indent unit per level
    pub fn display_name(&self) -> String {
        self.indented_name(LEVEL_INDENT)
    }

    pub fn indented_name(&self, indent: &str) -> String {
        format!("{}{}", indent.repeat(self.level), self.name)
    }
}

impl Entity for CategoryNode {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Collation key for names: Chinese characters sort by pinyin, everything
/// else by its own characters.
pub fn name_sort_key(name: &str) -> String {
    use pinyin::ToPinyin;

    let mut key = String::with_capacity(name.len());
    for c in name.chars() {
        match c.to_pinyin() {
            Some(p) => key.push_str(p.plain()),
            None => key.push(c),
        }
    }
    key
}

/// Flatten terms into display order.
///
/// Only nodes reachable from a top-level term (`parent == 0`) are emitted.
/// Duplicate ids keep their first occurrence, so every node is visited once.
pub fn build_hierarchy(terms: &[Term]) -> Vec<CategoryNode> {
    let mut seen = HashSet::new();
    let mut children_map: HashMap<u32, Vec<&Term>> = HashMap::new();
    for term in terms {
        if seen.insert(term.id) {
            children_map.entry(term.parent).or_default().push(term);
        }
    }

    for children in children_map.values_mut() {
        children.sort_by_cached_key(|t| name_sort_key(&t.name));
    }

    fn collect(
        parent_id: u32,
        level: usize,
        children_map: &HashMap<u32, Vec<&Term>>,
        result: &mut Vec<CategoryNode>,
    ) {
        if let Some(children) = children_map.get(&parent_id) {
            for term in children {
                result.push(CategoryNode {
                    id: term.id,
                    name: term.name.clone(),
                    parent_id,
                    level,
                });
                // A self-parented term is never reachable from 0, but guard the id anyway
                if term.id != parent_id {
                    collect(term.id, level + 1, children_map, result);
                }
            }
        }
    }

    let mut result = Vec::with_capacity(terms.len());
    collect(0, 0, &children_map, &mut result);
    result
}
