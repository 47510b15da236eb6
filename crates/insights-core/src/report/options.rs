//! Select Options
//!
//! `{value, label}` pairs for the filter value and category dropdowns.

use serde::{Deserialize, Serialize};

use crate::domain::{AttributeTaxonomy, CategoryNode, FilterSelector, Term};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

fn with_count(label: &str, count: u32) -> String {
    format!("{} ({} products)", label, count)
}

/// `<name> (<count> products)`
pub fn tag_options(terms: &[Term]) -> Vec<SelectOption> {
    terms
        .iter()
        .map(|t| SelectOption::new(t.id.to_string(), with_count(&t.name, t.count)))
        .collect()
}

/// `<label>: <term> (<count> products)` keyed by `<attribute>|<term id>`
pub fn attribute_options(attribute: &AttributeTaxonomy, terms: &[Term]) -> Vec<SelectOption> {
    terms
        .iter()
        .map(|t| {
            let selector = FilterSelector::Attribute {
                attribute: attribute.name.clone(),
                term_id: t.id,
            };
            SelectOption::new(
                selector.value(),
                with_count(&format!("{}: {}", attribute.label, t.name), t.count),
            )
        })
        .collect()
}

/// Hierarchy order with indented labels
pub fn category_options(nodes: &[CategoryNode]) -> Vec<SelectOption> {
    nodes
        .iter()
        .map(|n| SelectOption::new(n.id.to_string(), n.display_name()))
        .collect()
}
