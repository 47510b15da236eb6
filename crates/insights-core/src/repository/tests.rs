//! Repository Integration Tests
//!
//! Catalog and term store against an in-memory SQLite database.

use crate::domain::{DomainError, Taxonomy, TermFilter};
use crate::repository::{ProductCatalog, TermRepository, TermStore};
use crate::test_support::{catalog, seeded_db, ADMIN_URL};

#[tokio::test]
async fn test_products_matching_single_filter() {
    let db = seeded_db().await;
    let repo = catalog(&db);

    let ids = repo
        .products_matching(&[TermFilter::new(Taxonomy::ProductTag, 42)])
        .await
        .expect("query");

    // Untracked (4) and draft (6) products are never returned
    assert_eq!(ids, vec![1, 2, 5, 7]);
}

#[tokio::test]
async fn test_products_matching_requires_all_filters() {
    let db = seeded_db().await;
    let repo = catalog(&db);

    let ids = repo
        .products_matching(&[
            TermFilter::new(Taxonomy::ProductTag, 42),
            TermFilter::new(Taxonomy::ProductCategory, 13),
        ])
        .await
        .unwrap();
    assert_eq!(ids, vec![7]);

    let ids = repo
        .products_matching(&[TermFilter::new(Taxonomy::Attribute("color".to_string()), 20)])
        .await
        .unwrap();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_category_filter_with_descendants() {
    let db = seeded_db().await;
    let repo = catalog(&db);

    // Clothing(10) has no direct products
    let exact = repo
        .products_matching(&[TermFilter::new(Taxonomy::ProductCategory, 10)])
        .await
        .unwrap();
    assert!(exact.is_empty());

    let ids = repo
        .products_matching(&[TermFilter::with_descendants(Taxonomy::ProductCategory, 10)])
        .await
        .unwrap();
    // Shirts 1, 2 and Polos 5, two levels down
    assert_eq!(ids, vec![1, 2, 5]);

    let ids = repo
        .products_matching(&[
            TermFilter::new(Taxonomy::ProductTag, 7),
            TermFilter::with_descendants(Taxonomy::ProductCategory, 12),
        ])
        .await
        .unwrap();
    assert_eq!(ids, vec![3]);
}

#[tokio::test]
async fn test_term_id_must_belong_to_the_taxonomy() {
    let db = seeded_db().await;
    let repo = catalog(&db);

    // 20 is a color term, not a size term
    let ids = repo
        .products_matching(&[TermFilter::new(Taxonomy::Attribute("size".to_string()), 20)])
        .await
        .unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_no_filters_match_nothing() {
    let db = seeded_db().await;
    assert!(catalog(&db).products_matching(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_product() {
    let db = seeded_db().await;
    let repo = catalog(&db);

    let product = repo.get_product(7).await.unwrap().expect("product 7");
    assert_eq!(product.name, "Eta Hat");
    assert_eq!(product.stock_quantity, Some(3));
    assert_eq!(product.categories, vec!["Hats".to_string()]);
    assert_eq!(product.image_url.as_deref(), Some("https://shop.test/hat.jpg"));
    assert_eq!(product.edit_url, format!("{}/post.php?post=7&action=edit", ADMIN_URL));

    let untracked = repo.get_product(4).await.unwrap().unwrap();
    assert!(!untracked.manage_stock);
    assert_eq!(untracked.stock_quantity, None);

    assert!(repo.get_product(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_and_enable_stock() {
    let db = seeded_db().await;
    let repo = catalog(&db);

    let updated = repo.update_stock(1, 12).await.unwrap();
    assert_eq!(updated.stock_quantity, Some(12));

    let enabled = repo.enable_stock(4, 6).await.unwrap();
    assert!(enabled.manage_stock);
    assert_eq!(enabled.stock_quantity, Some(6));

    // Now visible to stock-tracked searches
    let ids = repo
        .products_matching(&[TermFilter::new(Taxonomy::ProductCategory, 14)])
        .await
        .unwrap();
    assert_eq!(ids, vec![4]);

    let err = repo.update_stock(999, 1).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_list_terms_hides_empty_and_orders_by_name() {
    let db = seeded_db().await;
    let terms = TermRepository::new(db.conn.clone());

    let tags = terms.list_terms(&Taxonomy::ProductTag, None).await.unwrap();
    let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Clearance", "Wholesale"]);
    // Counts include untracked products, excluding drafts
    assert_eq!(tags[1].count, 5);
}

#[tokio::test]
async fn test_list_terms_keeps_ancestors_of_non_empty_terms() {
    let db = seeded_db().await;
    let terms = TermRepository::new(db.conn.clone());

    let cats = terms.list_terms(&Taxonomy::ProductCategory, None).await.unwrap();
    let names: Vec<_> = cats.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Accessories", "Belts", "Clothing", "Hats", "Polos", "Shirts"]);

    let clothing = cats.iter().find(|t| t.id == 10).unwrap();
    assert_eq!(clothing.count, 0);
}

#[tokio::test]
async fn test_list_terms_scoped_to_products() {
    let db = seeded_db().await;
    let terms = TermRepository::new(db.conn.clone());

    let cats = terms
        .list_terms(&Taxonomy::ProductCategory, Some(&[1, 7]))
        .await
        .unwrap();
    let names: Vec<_> = cats.iter().map(|t| t.name.as_str()).collect();
    // Parents come along even though no product sits in them directly
    assert_eq!(names, vec!["Accessories", "Clothing", "Hats", "Shirts"]);

    let none = terms.list_terms(&Taxonomy::ProductCategory, Some(&[])).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_attributes_and_get_term() {
    let db = seeded_db().await;
    let terms = TermRepository::new(db.conn.clone());

    let attributes = terms.attribute_taxonomies().await.unwrap();
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0].name, "color");
    assert_eq!(attributes[0].label, "Color");

    let red = terms
        .get_term(&Taxonomy::Attribute("color".to_string()), 20)
        .await
        .unwrap()
        .expect("red");
    assert_eq!(red.name, "Red");
    assert_eq!(red.count, 2);

    assert!(terms.get_term(&Taxonomy::ProductTag, 20).await.unwrap().is_none());
}
