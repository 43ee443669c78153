// FICHIER : jsondb/tests/json_db_suite/json_db_query_integration.rs

use crate::{fields, init_test_env};
use jsondb::json_db::{Condition, QueryFilter};
use jsondb::utils::json::json;
use jsondb::Store;

fn seed(store: &mut Store) {
    let users = store.collection("users");
    users
        .insert_many(vec![
            fields(json!({ "_id": "1", "name": "Alice", "age": 34, "city": "Lyon" })),
            fields(json!({ "_id": "2", "name": "Bob", "age": 17 })),
            fields(json!({ "_id": "3", "name": "Chloé", "age": "inconnu", "city": "Nice" })),
            fields(json!({ "_id": "4", "name": "Driss", "age": 52, "city": "Lyon" })),
            fields(json!({ "_id": "5", "name": "Emma" })),
        ])
        .expect("seed");
}

#[test]
fn query_after_reload_excludes_erroring_records() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).unwrap();
    seed(&mut store);
    store.save().unwrap();

    let reopened = Store::open(&env.db_path).unwrap();
    let users = reopened.get_collection("users").unwrap();

    // "3" a un âge non numérique, "5" n'a pas d'âge : exclus sans erreur
    let adults = users.query(|r| Ok(r.i64_field("age")? >= 18));
    let ids: Vec<&str> = adults.iter().filter_map(|m| m["_id"].as_str()).collect();
    assert_eq!(ids, vec!["1", "4"]);

    let minors = users.query_objects(|r| Ok(r.i64_field("age")? < 18));
    assert_eq!(minors.iter().map(|r| r.id()).collect::<Vec<_>>(), vec!["2"]);
}

#[test]
fn query_delete_leaves_exactly_the_rest() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).unwrap();
    seed(&mut store);

    let deleted = store
        .collection("users")
        .query_delete(|r| Ok(r.str_field("city")? == "Lyon"));
    assert_eq!(deleted, 2);

    let users = store.get_collection("users").unwrap();
    assert_eq!(users.ids().collect::<Vec<_>>(), vec!["2", "3", "5"]);
    assert!(users.get("1").is_none());
    assert!(users.get("4").is_none());
}

#[test]
fn declarative_filter_matches_closure_query() {
    let mut store = Store::in_memory();
    seed(&mut store);
    let users = store.get_collection("users").unwrap();

    let filter = QueryFilter::and(vec![
        Condition::eq("city", "Lyon"),
        Condition::gt("age", 40),
    ]);
    let by_filter = users.filter(&filter);
    let by_closure =
        users.query(|r| Ok(r.str_field("city")? == "Lyon" && r.i64_field("age")? > 40));

    assert_eq!(by_filter, by_closure);
    assert_eq!(by_filter.len(), 1);
    assert_eq!(by_filter[0]["name"], "Driss");
}

#[test]
fn mutations_through_handles_are_persisted() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).unwrap();
    seed(&mut store);

    store
        .collection("users")
        .get_mut("2")
        .unwrap()
        .set("age", json!(18))
        .unwrap();
    store.save().unwrap();

    let reopened = Store::open(&env.db_path).unwrap();
    assert_eq!(
        reopened.get_collection("users").unwrap().get_raw("2").unwrap()["age"],
        18
    );
}

#[test]
fn overwrite_collision_is_last_write_wins() {
    let mut store = Store::in_memory();
    let col = store.collection("c");
    col.insert(fields(json!({ "_id": "1", "name": "a" }))).unwrap();
    col.insert(fields(json!({ "_id": "1", "name": "b" }))).unwrap();

    assert_eq!(col.len(), 1);
    assert_eq!(col.get("1").unwrap().get("name"), Some(&json!("b")));
    assert_eq!(col.get_raw("1").unwrap()["name"], "b");
}
