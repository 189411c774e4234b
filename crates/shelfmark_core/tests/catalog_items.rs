use shelfmark_core::db::open_db_in_memory;
use shelfmark_core::{
    CatalogError, CatalogService, ItemRepository, NewItem, SqliteItemRepository, ValidationError,
};

fn sample(title: &str, rating: i32, attribute: &str) -> NewItem {
    NewItem::new(title, "Oak Wavelength")
        .year(2023)
        .rating(rating)
        .featured(true)
        .attribute(attribute)
}

#[test]
fn add_and_get_roundtrip_preserves_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let id = service
        .add_item(&sample("Foraged & Found", 5, "Forest Green"))
        .unwrap();

    let loaded = service.get_item(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "Foraged & Found");
    assert_eq!(loaded.author, "Oak Wavelength");
    assert_eq!(loaded.year, Some(2023));
    assert_eq!(loaded.rating, Some(5));
    assert_eq!(loaded.featured, Some(true));
    assert_eq!(loaded.attribute.as_deref(), Some("Forest Green"));
}

#[test]
fn optional_fields_may_be_absent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let id = repo
        .create_item(&NewItem::new("Untitled Zine", "Anonymous"))
        .unwrap();

    let loaded = repo.get_item(id).unwrap().unwrap();
    assert_eq!(loaded.year, None);
    assert_eq!(loaded.rating, None);
    assert_eq!(loaded.featured, None);
    assert_eq!(loaded.attribute, None);
}

#[test]
fn identities_are_distinct_and_strictly_increasing() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let ids: Vec<i64> = (0..8)
        .map(|idx| {
            service
                .add_item(&NewItem::new(format!("Volume {idx}"), "Sage Moonbeam"))
                .unwrap()
        })
        .collect();

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn list_returns_items_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let first = service.add_item(&sample("Zebra Cakes", 2, "Beige")).unwrap();
    let second = service.add_item(&sample("Apple Pies", 4, "Denim")).unwrap();

    let listed = service.list_items().unwrap();
    assert_eq!(
        listed.iter().map(|item| item.id).collect::<Vec<_>>(),
        vec![first, second]
    );
}

#[test]
fn search_by_rating_is_exact_match_ordered_by_attribute() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let forest = service
        .add_item(&sample("Foraged & Found", 5, "Forest Green"))
        .unwrap();
    service
        .add_item(&sample("Small Batch", 4, "Raw Linen"))
        .unwrap();
    let recycled = service
        .add_item(&sample("The Artistic Toast", 5, "Recycled Brown"))
        .unwrap();
    service
        .add_item(&sample("Fermented Everything", 3, "Denim"))
        .unwrap();
    let beige = service
        .add_item(&sample("The Deconstructed Sandwich", 5, "Beige"))
        .unwrap();

    let fives = service.search_by_rating(5).unwrap();
    assert_eq!(
        fives.iter().map(|item| item.id).collect::<Vec<_>>(),
        vec![beige, forest, recycled]
    );
    assert!(fives.iter().all(|item| item.rating == Some(5)));

    assert!(service.search_by_rating(1).unwrap().is_empty());
}

#[test]
fn search_by_rating_does_not_treat_rating_as_minimum() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteItemRepository::try_new(&conn).unwrap());
    service.add_item(&sample("Five", 5, "Beige")).unwrap();
    let four = service.add_item(&sample("Four", 4, "Denim")).unwrap();

    let hits = service.search_by_rating(4).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, four);
}

#[test]
fn add_rejects_blank_title_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = CatalogService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let err = service
        .add_item(&NewItem::new("   ", "River Wildflower"))
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Invalid(ValidationError::BlankField("title"))
    ));
    assert!(service.list_items().unwrap().is_empty());
}

#[test]
fn get_unknown_item_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    assert!(repo.get_item(404).unwrap().is_none());
    assert!(!repo.item_exists(404).unwrap());
}

#[test]
fn corrupted_featured_flag_is_reported_as_storage_failure() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO items (title, author, featured) VALUES ('Broken', 'Nobody', 7);",
    )
    .unwrap();
    let service = CatalogService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let err = service.list_items().unwrap_err();
    assert!(matches!(err, CatalogError::StorageOperationFailed(_)));
    assert!(err.is_recoverable());
}
