//! Filter dropdown actions: values, categories, history labels.

use crate::domain::{build_hierarchy, DomainError, FilterSelector, FilterType, Taxonomy};
use crate::report::{attribute_options, category_options, matching_product_ids, tag_options, SelectOption};

use super::error::or_upstream;
use super::{CommandResult, InsightsContext};

const UNKNOWN_TAG: &str = "Unknown Tag";
const UNKNOWN_ATTRIBUTE: &str = "Unknown Attribute";

fn parse_filter_type(raw: &str) -> CommandResult<FilterType> {
    FilterType::parse(raw.trim())
        .ok_or_else(|| DomainError::validation("filter_type", "Invalid filter type.").into())
}

/// Options of the filter value dropdown for a filter type
pub async fn get_filter_values(
    ctx: &InsightsContext,
    nonce: &str,
    filter_type: &str,
) -> CommandResult<Vec<SelectOption>> {
    ctx.authorize(nonce, "get_filter_values")?;
    let filter_type = parse_filter_type(filter_type)?;
    let failed = or_upstream("Failed to load filter values. Please try again.");

    let options = match filter_type {
        FilterType::Tags => {
            let terms = ctx.terms.list_terms(&Taxonomy::ProductTag, None).await.map_err(&failed)?;
            tag_options(&terms)
        }
        FilterType::Attributes => {
            let mut options = Vec::new();
            for attribute in ctx.terms.attribute_taxonomies().await.map_err(&failed)? {
                let terms = ctx
                    .terms
                    .list_terms(&attribute.taxonomy(), None)
                    .await
                    .map_err(&failed)?;
                options.extend(attribute_options(&attribute, &terms));
            }
            options
        }
    };

    log::info!("[FILTERS] {} {} values", options.len(), filter_type.as_str());
    Ok(options)
}

/// Category dropdown in hierarchy order.
///
/// With a filter, only categories of stock-tracked products matching it;
/// an explicit empty list when nothing matches.
pub async fn get_categories(
    ctx: &InsightsContext,
    nonce: &str,
    filter_type: Option<&str>,
    filter_value: Option<&str>,
) -> CommandResult<Vec<SelectOption>> {
    ctx.authorize(nonce, "get_categories")?;
    let failed = or_upstream("Failed to load categories. Please try again.");

    let filter = match (filter_type.map(str::trim), filter_value.map(str::trim)) {
        (Some(t), Some(v)) if !t.is_empty() && !v.is_empty() => Some((t, v)),
        _ => None,
    };

    let terms = match filter {
        None => ctx
            .terms
            .list_terms(&Taxonomy::ProductCategory, None)
            .await
            .map_err(&failed)?,
        Some((filter_type, filter_value)) => {
            let selector = FilterType::parse(filter_type)
                .and_then(|filter_type| FilterSelector::resolve(filter_type, filter_value));
            let ids = matching_product_ids(ctx.catalog.as_ref(), selector.as_ref())
                .await
                .map_err(&failed)?;
            if ids.is_empty() {
                log::info!("[CATEGORIES] no products match {}={}", filter_type, filter_value);
                return Ok(Vec::new());
            }
            ctx.terms
                .list_terms(&Taxonomy::ProductCategory, Some(&ids))
                .await
                .map_err(&failed)?
        }
    };

    let options = category_options(&build_hierarchy(&terms));
    log::info!("[CATEGORIES] {} categories", options.len());
    Ok(options)
}

/// Human label of a selector, used for recent search entries
pub async fn describe_filter(
    ctx: &InsightsContext,
    nonce: &str,
    filter_type: &str,
    filter_value: &str,
) -> CommandResult<String> {
    ctx.authorize(nonce, "describe_filter")?;
    let filter_type = parse_filter_type(filter_type)?;
    let failed = or_upstream("Failed to load filter details. Please try again.");

    let label = match FilterSelector::resolve(filter_type, filter_value) {
        Some(FilterSelector::Tag(id)) => ctx
            .terms
            .get_term(&Taxonomy::ProductTag, id)
            .await
            .map_err(&failed)?
            .map(|term| term.name),
        Some(FilterSelector::Attribute { attribute, term_id }) => {
            let attributes = ctx.terms.attribute_taxonomies().await.map_err(&failed)?;
            match attributes.into_iter().find(|a| a.name == attribute) {
                Some(found) => ctx
                    .terms
                    .get_term(&found.taxonomy(), term_id)
                    .await
                    .map_err(&failed)?
                    .map(|term| format!("{}: {}", found.label, term.name)),
                None => None,
            }
        }
        None => None,
    };

    Ok(label.unwrap_or_else(|| {
        match filter_type {
            FilterType::Tags => UNKNOWN_TAG,
            FilterType::Attributes => UNKNOWN_ATTRIBUTE,
        }
        .to_string()
    }))
}
