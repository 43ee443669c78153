// FICHIER : jsondb/src/json_db/storage/file_storage.rs

//! Format du fichier de base :
//! `{ "<collection>": { "<id>": { "_id": "<id>", ... } } }`.
//! Lecture et écriture se font toujours en bloc (fichier entier).

use crate::json_db::collections::record::{normalize_id, ID_FIELD};
use crate::utils::json::{self, Map, Value};
use crate::utils::{fs, AppError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;
use tracing::instrument;

/// Enregistrements d'une collection tels que lus sur disque : id -> champs.
pub type CollectionData = IndexMap<String, Map<String, Value>>;
/// Contenu complet du fichier : collection -> enregistrements.
pub type StoreData = IndexMap<String, CollectionData>;

/// Lit et valide le fichier complet. `Ok(None)` si le fichier n'existe pas.
/// Rien n'est retourné tant que tout le contenu n'a pas été validé.
#[instrument(skip(path), fields(path = ?path))]
pub fn read_store_file(path: &Path) -> Result<Option<StoreData>> {
    let Some(content) = fs::read_to_string_opt(path)? else {
        return Ok(None);
    };
    let raw: StoreData = json::parse(&content)?;
    validate(raw).map(Some)
}

/// Réécrit le fichier entier (JSON indenté, écriture atomique).
#[instrument(skip(path, data), fields(path = ?path))]
pub fn write_store_file<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    fs::write_json_atomic(path, data)
}

/// Supprime le fichier de base. Retourne `false` s'il n'existait pas.
pub fn remove_store_file(path: &Path) -> Result<bool> {
    fs::remove_file(path)
}

// Chaque enregistrement doit porter un `_id` égal à sa clé ; un `_id` absent
// est complété à partir de la clé.
fn validate(raw: StoreData) -> Result<StoreData> {
    let mut out = StoreData::with_capacity(raw.len());
    for (collection, records) in raw {
        let mut checked = CollectionData::with_capacity(records.len());
        for (key, fields) in records {
            let context = |reason: String| AppError::Parse(format!("{}/{} : {}", collection, key, reason));

            normalize_id(&Value::String(key.clone())).map_err(|e| context(e.to_string()))?;

            let fields = match fields.get(ID_FIELD) {
                None | Some(Value::Null) => {
                    let mut with_id = Map::with_capacity(fields.len() + 1);
                    with_id.insert(ID_FIELD.to_string(), Value::String(key.clone()));
                    with_id.extend(fields.into_iter().filter(|(k, _)| k != ID_FIELD));
                    with_id
                }
                Some(value) => {
                    let id = normalize_id(value).map_err(|e| context(e.to_string()))?;
                    if id != key {
                        return Err(context(format!("`{}` différent de la clé ({})", ID_FIELD, id)));
                    }
                    fields
                }
            };
            checked.insert(key, fields);
        }
        out.insert(collection, checked);
    }
    Ok(out)
}
