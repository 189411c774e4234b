use shelfmark_core::{CatalogConfig, Item, Loan, LoanStatus, ResetPolicy, StorageLocation, Tag};

#[test]
fn item_serializes_with_snake_case_fields() {
    let item = Item {
        id: 3,
        title: "Fermented Everything".to_string(),
        author: "Jim Kombucha".to_string(),
        year: Some(2021),
        rating: Some(3),
        featured: Some(true),
        attribute: Some("Denim".to_string()),
    };

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["year"], 2021);
    assert_eq!(json["featured"], true);
    assert_eq!(json["attribute"], "Denim");

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn loan_and_tag_serialize_optional_references_as_null() {
    let loan = Loan {
        id: 1,
        borrower: "Alice".to_string(),
        borrowed_on: "05/01/2024".to_string(),
        returned_on: None,
        item_id: None,
    };
    let json = serde_json::to_value(&loan).unwrap();
    assert!(json["returned_on"].is_null());
    assert!(json["item_id"].is_null());

    let tag = Tag {
        id: 2,
        label: "vegan".to_string(),
        item_id: 9,
    };
    assert_eq!(serde_json::to_value(&tag).unwrap()["item_id"], 9);
    assert_eq!(serde_json::to_value(LoanStatus::Open).unwrap(), "open");
}

#[test]
fn config_deserializes_with_defaults() {
    let config: CatalogConfig = serde_json::from_str(r#"{"reset_policy": "keep_loans"}"#).unwrap();
    assert_eq!(config.reset_policy, ResetPolicy::KeepLoans);
    assert!(matches!(config.storage, StorageLocation::File(_)));

    let memory: CatalogConfig =
        serde_json::from_str(r#"{"storage": {"kind": "memory"}}"#).unwrap();
    assert_eq!(memory.storage, StorageLocation::Memory);
}
