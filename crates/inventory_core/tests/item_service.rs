use inventory_core::db::open_db_in_memory;
use inventory_core::{
    ItemInput, ItemService, ItemValidationError, ServiceError, SqliteItemRepository,
    DEFAULT_LIST_LIMIT,
};

fn input(name: &str, price: i64, quantity: i64) -> ItemInput {
    ItemInput {
        name: Some(name.to_string()),
        description: Some(format!("{name} description")),
        price: Some(price),
        quantity: Some(quantity),
    }
}

#[test]
fn create_then_get_by_assigned_id() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let created = service.create_item(input("saw", 25, 2)).unwrap();
    assert_eq!(created.id, 1);

    let fetched = service.get_item(1).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn create_rejects_missing_fields_before_touching_store() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let err = service
        .create_item(ItemInput {
            name: Some("tape".to_string()),
            ..ItemInput::default()
        })
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ItemValidationError::MissingField("description"))
    ));
    assert!(service.list_items(None, None).unwrap().is_empty());
}

#[test]
fn create_rejects_negative_quantity() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let err = service.create_item(input("glue", 3, -1)).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ItemValidationError::NegativeValue {
            field: "quantity",
            value: -1
        })
    ));
}

#[test]
fn get_update_delete_translate_absence_to_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    service.create_item(input("only", 1, 1)).unwrap();

    assert!(matches!(service.get_item(2), Err(ServiceError::NotFound(2))));
    assert!(matches!(
        service.update_item(2, input("ghost", 1, 1)),
        Err(ServiceError::NotFound(2))
    ));
    assert!(matches!(service.delete_item(2), Err(ServiceError::NotFound(2))));

    assert_eq!(service.get_item(1).unwrap().name, "only");
}

#[test]
fn update_validates_before_checking_existence() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());

    let err = service.update_item(42, input("x", -3, 0)).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn update_replaces_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    service.create_item(input("old", 1, 1)).unwrap();

    let updated = service.update_item(1, input("new", 8, 9)).unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "new");
    assert_eq!(service.get_item(1).unwrap().quantity, 9);
}

#[test]
fn list_uses_default_limit_and_rejects_negative_bounds() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    for index in 0..12 {
        service
            .create_item(input(&format!("item-{index}"), 1, 1))
            .unwrap();
    }

    let page = service.list_items(None, None).unwrap();
    assert_eq!(page.len() as i64, DEFAULT_LIST_LIMIT);
    assert_eq!(page[0].id, 1);

    let window = service.list_items(Some(2), Some(2)).unwrap();
    assert_eq!(
        window.iter().map(|item| item.id).collect::<Vec<_>>(),
        vec![3, 4]
    );

    assert!(matches!(
        service.list_items(Some(-1), None),
        Err(ServiceError::Validation(ItemValidationError::NegativeValue {
            field: "skip",
            ..
        }))
    ));
    assert!(matches!(
        service.list_items(None, Some(-5)),
        Err(ServiceError::Validation(_))
    ));
}

#[test]
fn search_succeeds_with_empty_result() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    service.create_item(input("hinge", 4, 10)).unwrap();

    assert!(service.search_items("latch").unwrap().is_empty());
    assert_eq!(service.search_items("").unwrap().len(), 1);
}

#[test]
fn delete_returns_snapshot_and_renumbers() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    service.create_item(input("A", 1, 1)).unwrap();
    service.create_item(input("B", 2, 2)).unwrap();

    let removed = service.delete_item(1).unwrap();
    assert_eq!(removed.id, 1);
    assert_eq!(removed.name, "A");

    let survivor = service.get_item(1).unwrap();
    assert_eq!(survivor.name, "B");
    assert_eq!(survivor.price, 2);
    assert!(matches!(service.get_item(2), Err(ServiceError::NotFound(2))));
}
