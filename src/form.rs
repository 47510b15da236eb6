//! Search form values and the client-side pre-check.
//! The backend repeats the same checks.

use crate::models::{CommandError, SearchParams};

pub const FILTER_TYPES: &[(&str, &str)] = &[("tags", "Product Tags"), ("attributes", "Product Attributes")];

/// Raw form fields as typed or selected
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub filter_type: String,
    pub filter_value: String,
    pub category: String,
    pub min_stock: String,
}

impl SearchForm {
    pub fn from_params(params: &SearchParams) -> Self {
        Self {
            filter_type: params.filter_type.clone(),
            filter_value: params.filter_value.clone(),
            category: params.product_category.map(|c| c.to_string()).unwrap_or_default(),
            min_stock: params.min_stock.map(|m| m.to_string()).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<SearchParams, CommandError> {
        let filter_type = self.filter_type.trim();
        if !FILTER_TYPES.iter().any(|(value, _)| *value == filter_type) {
            return Err(CommandError::validation("filter_type", "Please select a filter type."));
        }

        let filter_value = self.filter_value.trim();
        if filter_value.is_empty() {
            return Err(CommandError::validation("filter_value", "Please select a filter value."));
        }

        let min_stock = match self.min_stock.trim() {
            "" => None,
            raw => match raw.parse::<i64>() {
                Ok(n) if n >= 0 => Some(n),
                _ => {
                    return Err(CommandError::validation(
                        "min_stock",
                        "Minimum stock must be a positive number.",
                    ))
                }
            },
        };

        let product_category = match self.category.trim() {
            "" => None,
            raw => match raw.parse::<u32>() {
                Ok(id) => Some(i64::from(id)),
                Err(_) => return Err(CommandError::validation("product_category", "Invalid product category.")),
            },
        };

        Ok(SearchParams {
            filter_type: filter_type.to_string(),
            filter_value: filter_value.to_string(),
            min_stock,
            product_category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(filter_type: &str, filter_value: &str, min_stock: &str) -> SearchForm {
        SearchForm {
            filter_type: filter_type.to_string(),
            filter_value: filter_value.to_string(),
            min_stock: min_stock.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form() {
        let params = form("tags", "42", " 5 ").validate().unwrap();
        assert_eq!(params.min_stock, Some(5));
        assert_eq!(params.product_category, None);

        let params = form("attributes", "color|20", "").validate().unwrap();
        assert_eq!(params.min_stock, None);
    }

    #[test]
    fn test_field_errors() {
        let field = |f: SearchForm| f.validate().unwrap_err().field;
        assert_eq!(field(form("", "42", "")), Some("filter_type".to_string()));
        assert_eq!(field(form("tags", " ", "")), Some("filter_value".to_string()));
        assert_eq!(field(form("tags", "42", "-1")), Some("min_stock".to_string()));
        assert_eq!(field(form("tags", "42", "lots")), Some("min_stock".to_string()));

        let mut bad_category = form("tags", "42", "");
        bad_category.category = "-3".to_string();
        assert_eq!(field(bad_category), Some("product_category".to_string()));
    }

    #[test]
    fn test_from_params_restores_fields() {
        let params = SearchParams {
            filter_type: "tags".to_string(),
            filter_value: "42".to_string(),
            min_stock: Some(3),
            product_category: Some(11),
        };
        let restored = SearchForm::from_params(&params);
        assert_eq!(restored.category, "11");
        assert_eq!(restored.validate().unwrap(), params);
    }
}
