// FICHIER : jsondb/tests/json_db_suite/json_db_relations.rs

use crate::{fields, init_test_env};
use jsondb::utils::json::json;
use jsondb::{AppError, RelationKind, Store};

#[test]
fn relation_descriptors_are_symmetric() {
    let mut store = Store::in_memory();
    store.set_relation("A", "as", "mto", "B", "bs").unwrap();

    let a_to_b = store.get_collection("A").unwrap().relation("B").unwrap();
    assert_eq!(a_to_b.kind, RelationKind::ManyToOne);
    assert_eq!(a_to_b.to_collection, "B");
    assert_eq!(a_to_b.related_name, "bs");

    let b_to_a = store.get_collection("B").unwrap().relation("A").unwrap();
    assert_eq!(b_to_a.kind, RelationKind::OneToMany);
    assert_eq!(b_to_a.to_collection, "A");
    assert_eq!(b_to_a.related_name, "as");
}

#[test]
fn relation_keeps_existing_records_and_order() {
    let mut store = Store::in_memory();
    store.collection("B").insert(fields(json!({ "_id": "b1" }))).unwrap();
    store.collection("A").insert(fields(json!({ "_id": "a1", "b": "b1" }))).unwrap();

    store.set_relation("A", "as", "many_to_one", "B", "bs").unwrap();

    assert_eq!(store.collection_names().collect::<Vec<_>>(), vec!["B", "A"]);
    assert!(store.get_collection("B").unwrap().contains("b1"));
    assert!(store.get_collection("A").unwrap().contains("a1"));
}

#[test]
fn unknown_relation_kind_is_rejected() {
    let mut store = Store::in_memory();
    let res = store.set_relation("A", "as", "many_to_many", "B", "bs");

    assert!(matches!(res, Err(AppError::InvalidRelation(_))));
    assert!(store.is_empty());
}

#[test]
fn relations_are_structure_only_and_not_persisted() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).unwrap();
    store.set_relation("orders", "orders", "mto", "customers", "customer").unwrap();

    // Aucune vérification d'intégrité référentielle
    store
        .collection("orders")
        .insert(fields(json!({ "customer": "inexistant" })))
        .unwrap();
    store.save().unwrap();

    let reopened = Store::open(&env.db_path).unwrap();
    assert!(reopened.get_collection("orders").unwrap().relations().is_empty());
    assert!(reopened.get_collection("customers").unwrap().is_empty());
}
