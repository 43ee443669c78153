// FICHIER : jsondb/tests/json_db_suite/json_db_lifecycle.rs

use crate::{fields, init_test_env};
use jsondb::utils::json::json;
use jsondb::Store;

#[test]
fn open_missing_file_gives_empty_store() {
    let env = init_test_env();
    let mut store = Store::open(env.tmp_dir.path().join("missing.json")).expect("open");

    assert!(store.is_loaded());
    assert!(store.is_empty());
    assert!(store.collection("x").all().is_empty());
    // Rien n'est écrit tant que `save` n'est pas appelé
    assert!(!env.tmp_dir.path().join("missing.json").exists());
}

#[test]
fn save_then_reopen_round_trips_everything() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).expect("open");

    let values = [
        json!(null),
        json!(true),
        json!(-12),
        json!(3.25),
        json!("texte accentué"),
        json!([1, "deux", { "trois": 3 }]),
        json!({ "imbriqué": { "profond": [true, null] } }),
    ];
    for (c, name) in ["users", "orders", "logs"].iter().enumerate() {
        let col = store.collection(name);
        for (i, v) in values.iter().enumerate() {
            col.insert(fields(json!({ "index": i, "collection": c, "value": v })))
                .expect("insert");
        }
    }
    store.save().expect("save");

    let reopened = Store::open(&env.db_path).expect("reopen");

    assert_eq!(
        reopened.collection_names().collect::<Vec<_>>(),
        store.collection_names().collect::<Vec<_>>()
    );
    for original in store.collections() {
        let loaded = reopened
            .get_collection(original.name())
            .expect("collection rechargée");
        assert_eq!(
            loaded.ids().collect::<Vec<_>>(),
            original.ids().collect::<Vec<_>>()
        );
        assert_eq!(loaded.all(), original.all());
    }
    assert_eq!(reopened.snapshot().unwrap(), store.snapshot().unwrap());
}

#[test]
fn saved_file_is_indented_and_keyed_by_id() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).expect("open");
    store
        .collection("users")
        .insert(fields(json!({ "_id": "u1", "name": "Alice" })))
        .unwrap();
    store.save().unwrap();

    let text = std::fs::read_to_string(&env.db_path).unwrap();
    let expected = "{\n  \"users\": {\n    \"u1\": {\n      \"_id\": \"u1\",\n      \"name\": \"Alice\"\n    }\n  }\n}";
    assert_eq!(text, expected);
}

#[test]
fn save_is_a_full_rewrite() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).expect("open");
    store.collection("a").insert(fields(json!({ "_id": "1" }))).unwrap();
    store.collection("b").insert(fields(json!({ "_id": "2" }))).unwrap();
    store.save().unwrap();

    store.drop_collection("a");
    store.collection("b").delete("2");
    store.save().unwrap();

    let reopened = Store::open(&env.db_path).unwrap();
    assert_eq!(reopened.collection_names().collect::<Vec<_>>(), vec!["b"]);
    assert!(reopened.get_collection("b").unwrap().is_empty());
}

#[test]
fn delete_removes_file_and_resets_store() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).expect("open");
    store.collection("users").insert(fields(json!({ "n": 1 }))).unwrap();

    // Pas encore de fichier : rien n'est supprimé, l'état reste intact
    assert!(!store.delete().unwrap());
    assert_eq!(store.len(), 1);

    store.save().unwrap();
    assert!(store.delete().unwrap());
    assert!(!env.db_path.exists());
    assert!(store.is_empty());

    // delete ne sauvegarde pas implicitement
    assert!(!env.db_path.exists());
}

#[test]
fn generated_ids_survive_reload() {
    let env = init_test_env();
    let mut store = Store::open(&env.db_path).expect("open");
    let id = store
        .collection("notes")
        .insert(fields(json!({ "text": "bonjour" })))
        .unwrap()
        .id()
        .to_string();
    store.save().unwrap();

    let reopened = Store::open(&env.db_path).unwrap();
    let note = reopened.get_collection("notes").unwrap().get(&id).unwrap();
    assert_eq!(note.id(), id);
    assert_eq!(note.get("text"), Some(&json!("bonjour")));
}
