//! Search Filters
//!
//! Selector (tag or attribute term), optional category and stock threshold.
//! Raw request parameters are validated here before reaching the search engine.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};
use super::taxonomy::{Taxonomy, TermFilter};

/// Separator of the composite attribute key `attribute_name|term_id`
pub const ATTRIBUTE_KEY_SEPARATOR: char = '|';

/// Which kind of selector the user picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Tags,
    Attributes,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Tags => "tags",
            FilterType::Attributes => "attributes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tags" => Some(FilterType::Tags),
            "attributes" => Some(FilterType::Attributes),
            _ => None,
        }
    }
}

/// The tag-or-attribute criterion choosing which products are in scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterSelector {
    Tag(u32),
    Attribute { attribute: String, term_id: u32 },
}

impl FilterSelector {
    /// Resolve a raw selector value.
    ///
    /// Returns `None` when the value does not name a term: empty, non-numeric,
    /// or an attribute key that does not split into exactly two non-empty parts.
    /// An unresolved selector matches no products.
    pub fn resolve(filter_type: FilterType, value: &str) -> Option<Self> {
        let value = value.trim();
        match filter_type {
            FilterType::Tags => value.parse().ok().map(FilterSelector::Tag),
            FilterType::Attributes => {
                let parts: Vec<&str> = value.split(ATTRIBUTE_KEY_SEPARATOR).collect();
                let [attribute, term_id] = parts.as_slice() else {
                    return None;
                };
                let (attribute, term_id) = (attribute.trim(), term_id.trim());
                if attribute.is_empty() || term_id.is_empty() {
                    return None;
                }
                let term_id = term_id.parse().ok()?;
                Some(FilterSelector::Attribute {
                    attribute: attribute.to_string(),
                    term_id,
                })
            }
        }
    }

    pub fn filter_type(&self) -> FilterType {
        match self {
            FilterSelector::Tag(_) => FilterType::Tags,
            FilterSelector::Attribute { .. } => FilterType::Attributes,
        }
    }

    /// Serialized form: the tag id, or `attribute_name|term_id`
    pub fn value(&self) -> String {
        match self {
            FilterSelector::Tag(id) => id.to_string(),
            FilterSelector::Attribute { attribute, term_id } => {
                format!("{}{}{}", attribute, ATTRIBUTE_KEY_SEPARATOR, term_id)
            }
        }
    }

    /// Term match on the selector's own taxonomy. The attribute name only
    /// locates the taxonomy; the match itself is on the term id.
    pub fn term_filter(&self) -> TermFilter {
        match self {
            FilterSelector::Tag(id) => TermFilter::new(Taxonomy::ProductTag, *id),
            FilterSelector::Attribute { attribute, term_id } => {
                TermFilter::new(Taxonomy::Attribute(attribute.clone()), *term_id)
            }
        }
    }
}

/// Validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    /// `None` when the selector value did not resolve; such criteria match nothing
    pub selector: Option<FilterSelector>,
    pub category_id: Option<u32>,
    /// `None` shows every stock-tracked match; `Some(n)` keeps quantities below `n`
    pub min_stock: Option<u32>,
}

impl SearchCriteria {
    pub fn new(selector: FilterSelector) -> Self {
        Self {
            selector: Some(selector),
            category_id: None,
            min_stock: None,
        }
    }

    pub fn with_min_stock(mut self, min_stock: u32) -> Self {
        self.min_stock = Some(min_stock);
        self
    }

    pub fn with_category(mut self, category_id: u32) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Raw search parameters as sent by the UI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub filter_type: String,
    pub filter_value: String,
    #[serde(default)]
    pub min_stock: Option<i64>,
    #[serde(default)]
    pub product_category: Option<i64>,
}

impl SearchParams {
    /// Server-side re-check of the form. The client validates the same rules.
    pub fn validate(&self) -> DomainResult<SearchCriteria> {
        let filter_type = FilterType::parse(self.filter_type.trim())
            .ok_or_else(|| DomainError::validation("filter_type", "Invalid filter type."))?;

        if self.filter_value.trim().is_empty() {
            return Err(DomainError::validation(
                "filter_value",
                "Please select a filter value.",
            ));
        }

        let min_stock = match self.min_stock {
            Some(n) if n < 0 => {
                return Err(DomainError::validation(
                    "min_stock",
                    "Minimum stock must be a positive number.",
                ))
            }
            Some(n) => Some(u32::try_from(n).map_err(|_| {
                DomainError::validation("min_stock", "Minimum stock is too large.")
            })?),
            None => None,
        };

        let category_id = match self.product_category {
            Some(n) if n < 0 => {
                return Err(DomainError::validation(
                    "product_category",
                    "Invalid product category.",
                ))
            }
            Some(n) => Some(u32::try_from(n).map_err(|_| {
                DomainError::validation("product_category", "Invalid product category.")
            })?),
            None => None,
        };

        Ok(SearchCriteria {
            selector: FilterSelector::resolve(filter_type, &self.filter_value),
            category_id,
            min_stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(filter_type: &str, filter_value: &str) -> SearchParams {
        SearchParams {
            filter_type: filter_type.to_string(),
            filter_value: filter_value.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_tag() {
        assert_eq!(FilterSelector::resolve(FilterType::Tags, "42"), Some(FilterSelector::Tag(42)));
        assert_eq!(FilterSelector::resolve(FilterType::Tags, ""), None);
        assert_eq!(FilterSelector::resolve(FilterType::Tags, "abc"), None);
    }

    #[test]
    fn test_resolve_attribute_key() {
        let selector = FilterSelector::resolve(FilterType::Attributes, "color|20").unwrap();
        assert_eq!(
            selector,
            FilterSelector::Attribute { attribute: "color".to_string(), term_id: 20 }
        );
        assert_eq!(selector.value(), "color|20");
        assert_eq!(selector.term_filter().taxonomy.key(), "pa_color");
    }

    #[test]
    fn test_malformed_attribute_key_does_not_resolve() {
        for value in ["color", "color|", "|20", "color|20|x", "color|red", ""] {
            assert_eq!(FilterSelector::resolve(FilterType::Attributes, value), None, "{value}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_filter_type() {
        let err = params("brands", "1").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "filter_type", .. }));
    }

    #[test]
    fn test_validate_rejects_empty_value() {
        let err = params("tags", "  ").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "filter_value", .. }));
    }

    #[test]
    fn test_validate_rejects_negative_numbers() {
        let mut p = params("tags", "42");
        p.min_stock = Some(-1);
        assert!(matches!(
            p.validate().unwrap_err(),
            DomainError::Validation { field: "min_stock", .. }
        ));

        let mut p = params("tags", "42");
        p.product_category = Some(-3);
        assert!(matches!(
            p.validate().unwrap_err(),
            DomainError::Validation { field: "product_category", .. }
        ));
    }

    #[test]
    fn test_validate_keeps_malformed_attribute_as_unresolved() {
        let criteria = params("attributes", "color").validate().unwrap();
        assert_eq!(criteria.selector, None);
    }

    #[test]
    fn test_validate_full_criteria() {
        let p = SearchParams {
            filter_type: "tags".to_string(),
            filter_value: "42".to_string(),
            min_stock: Some(5),
            product_category: Some(11),
        };
        assert_eq!(
            p.validate().unwrap(),
            SearchCriteria::new(FilterSelector::Tag(42)).with_min_stock(5).with_category(11)
        );
    }
}
