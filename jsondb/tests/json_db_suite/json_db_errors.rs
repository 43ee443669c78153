// FICHIER : jsondb/tests/json_db_suite/json_db_errors.rs

use crate::{fields, init_test_env};
use jsondb::utils::json::json;
use jsondb::{AppError, Store};

#[test]
fn open_malformed_file_fails_with_parse_error() {
    let env = init_test_env();
    std::fs::write(&env.db_path, "{ \"users\": { \"1\": ").unwrap();

    let res = Store::open(&env.db_path);
    assert!(
        matches!(res, Err(AppError::Parse(_))),
        "open devrait échouer sur un fichier tronqué"
    );
}

#[test]
fn failed_load_leaves_memory_untouched() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).unwrap();
    store
        .collection("users")
        .insert(fields(json!({ "_id": "keep" })))
        .unwrap();

    // Première collection valide, seconde invalide : rien ne doit être appliqué
    std::fs::write(
        &env.db_path,
        r#"{ "extra": { "x": { "_id": "x" } }, "users": { "1": { "_id": "2" } } }"#,
    )
    .unwrap();

    assert!(matches!(store.load(), Err(AppError::Parse(_))));
    assert_eq!(store.collection_names().collect::<Vec<_>>(), vec!["users"]);
    assert_eq!(store.total_records(), 1);
}

#[test]
fn directory_as_backing_file_is_io_error() {
    let env = init_test_env();
    let res = Store::open(env.tmp_dir.path());
    assert!(matches!(res, Err(AppError::Io(_))));
}

#[test]
fn invalid_ids_are_rejected_on_insert() {
    let mut store = Store::in_memory();
    let col = store.collection("c");

    assert!(matches!(
        col.insert(fields(json!({ "_id": false }))),
        Err(AppError::InvalidId(_))
    ));
    assert!(col.get_mut("absent").is_none());
    assert!(col.is_empty());
}

#[test]
fn id_cannot_be_changed_through_handle() {
    let mut store = Store::in_memory();
    let col = store.collection("c");
    col.insert(fields(json!({ "_id": "1" }))).unwrap();

    let res = col.get_mut("1").unwrap().set("_id", json!("2"));
    assert!(matches!(res, Err(AppError::ImmutableId(_))));
    assert!(col.contains("1"));
}
