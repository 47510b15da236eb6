//! Product Filter Engine
//!
//! Selector AND optional category, stock-tracked products only, threshold
//! rule, shortfall, stable sort by quantity.

use crate::domain::{
    DomainResult, FilterSelector, ProductRecord, SearchCriteria, Taxonomy, TermFilter,
};
use crate::repository::ProductCatalog;

/// Run a search against the catalog
pub async fn search_products<C>(catalog: &C, criteria: &SearchCriteria) -> DomainResult<Vec<ProductRecord>>
where
    C: ProductCatalog + ?Sized,
{
    let Some(selector) = &criteria.selector else {
        return Ok(Vec::new());
    };

    let mut filters = vec![selector.term_filter()];
    if let Some(category_id) = criteria.category_id {
        // A parent category covers its subcategories
        filters.push(TermFilter::with_descendants(Taxonomy::ProductCategory, category_id));
    }

    let ids = catalog.products_matching(&filters).await?;
    let mut products = Vec::with_capacity(ids.len());

    for id in ids {
        // Removed between the two queries
        let Some(product) = catalog.get_product(id).await? else {
            continue;
        };
        let Some(quantity) = product.stock_quantity else {
            continue;
        };
        if !product.manage_stock {
            continue;
        }
        if let Some(min_stock) = criteria.min_stock {
            if quantity >= i64::from(min_stock) {
                continue;
            }
        }
        products.push(ProductRecord::from_catalog(product, criteria.min_stock));
    }

    products.sort_by_key(|p| p.stock_quantity);
    Ok(products)
}

/// Ids of stock-tracked products matching a selector alone (category scoping)
pub async fn matching_product_ids<C>(catalog: &C, selector: Option<&FilterSelector>) -> DomainResult<Vec<u32>>
where
    C: ProductCatalog + ?Sized,
{
    match selector {
        Some(selector) => catalog.products_matching(&[selector.term_filter()]).await,
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterType;
    use crate::test_support::{catalog, exec, seeded_db};

    #[tokio::test]
    async fn test_threshold_example() {
        let db = seeded_db().await;
        // Replace the fixture with exactly A(3, tag 42), B(10, tag 42), C(1, tag 7)
        exec(&db, "DELETE FROM term_relationships; DELETE FROM products;
            INSERT INTO products (id, name, manage_stock, stock_quantity) VALUES
                (1, 'A', 1, 3), (2, 'B', 1, 10), (3, 'C', 1, 1);
            INSERT INTO term_relationships (product_id, term_id) VALUES (1, 42), (2, 42), (3, 7);").await;

        let criteria = SearchCriteria::new(FilterSelector::Tag(42)).with_min_stock(5);
        let results = search_products(&catalog(&db), &criteria).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "A");
        assert_eq!(results[0].needed_quantity, 2);
    }

    #[tokio::test]
    async fn test_without_threshold_returns_all_tracked() {
        let db = seeded_db().await;
        let criteria = SearchCriteria::new(FilterSelector::Tag(42));

        let results = search_products(&catalog(&db), &criteria).await.unwrap();

        assert_eq!(results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5, 1, 7, 2]);
        assert!(results.iter().all(|p| p.managing_stock && p.needed_quantity == 0));
    }

    #[tokio::test]
    async fn test_threshold_keeps_quantities_below() {
        let db = seeded_db().await;
        let criteria = SearchCriteria::new(FilterSelector::Tag(42)).with_min_stock(4);

        let results = search_products(&catalog(&db), &criteria).await.unwrap();

        // Ties (1 and 7 both at 3) keep catalog order
        assert_eq!(results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5, 1, 7]);
        for p in &results {
            let qty = p.stock_quantity.unwrap();
            assert!(qty < 4);
            assert_eq!(p.needed_quantity, 4 - qty);
        }
        for pair in results.windows(2) {
            assert!(pair[0].stock_quantity <= pair[1].stock_quantity);
        }
    }

    #[tokio::test]
    async fn test_zero_threshold_matches_nothing() {
        let db = seeded_db().await;
        let criteria = SearchCriteria::new(FilterSelector::Tag(42)).with_min_stock(0);
        assert!(search_products(&catalog(&db), &criteria).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_category_is_and_combined() {
        let db = seeded_db().await;
        // Eta Hat (7) is under Accessories but tagged Wholesale, not Clearance
        let criteria = SearchCriteria::new(FilterSelector::Tag(7)).with_category(12);

        let results = search_products(&catalog(&db), &criteria).await.unwrap();

        assert_eq!(results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
    }

    #[tokio::test]
    async fn test_parent_category_matches_subcategories() {
        let db = seeded_db().await;
        // Clothing(10) has no products of its own; Shirts(11) and Polos(15) sit below it
        let criteria = SearchCriteria::new(FilterSelector::Tag(42)).with_category(10);

        let results = search_products(&catalog(&db), &criteria).await.unwrap();

        assert_eq!(results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5, 1, 2]);
    }

    #[tokio::test]
    async fn test_leaf_category_does_not_reach_siblings() {
        let db = seeded_db().await;
        let criteria = SearchCriteria::new(FilterSelector::Tag(42)).with_category(13);

        let results = search_products(&catalog(&db), &criteria).await.unwrap();

        assert_eq!(results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![7]);
    }

    #[tokio::test]
    async fn test_attribute_selector() {
        let db = seeded_db().await;
        let selector = FilterSelector::resolve(FilterType::Attributes, "color|20").unwrap();

        let results = search_products(&catalog(&db), &SearchCriteria::new(selector)).await.unwrap();

        assert_eq!(results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_unresolved_selector_matches_nothing() {
        let db = seeded_db().await;
        let criteria = SearchCriteria { selector: None, category_id: Some(11), min_stock: None };
        assert!(search_products(&catalog(&db), &criteria).await.unwrap().is_empty());
        assert!(matching_product_ids(&catalog(&db), None).await.unwrap().is_empty());
    }
}
