// FICHIER : jsondb/src/json_db/collections/record.rs

//! Enregistrement : une table ordonnée de champs JSON dont le premier est
//! toujours l'identifiant `_id`.

use crate::utils::json::{self, Map, Value};
use crate::utils::{AppError, FieldError, Result};
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Nom du champ identifiant.
pub const ID_FIELD: &str = "_id";

/// Résultat d'un prédicat de requête. Une `FieldError` exclut l'enregistrement.
pub type PredicateResult = std::result::Result<bool, FieldError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    // Invariant : la première clé est `_id` et vaut `Value::String(self.id)`.
    fields: Map<String, Value>,
}

/// Normalise une valeur d'identifiant en chaîne.
/// Les entiers sont acceptés (les clés JSON sont des chaînes), le reste est refusé.
pub(crate) fn normalize_id(value: &Value) -> Result<String> {
    let id = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        other => {
            return Err(AppError::InvalidId(format!(
                "type {} non supporté pour `{}`",
                json::type_name(other),
                ID_FIELD
            )))
        }
    };
    if id.is_empty() {
        return Err(AppError::InvalidId("identifiant vide".to_string()));
    }
    Ok(id)
}

impl Record {
    /// Construit un enregistrement. Sans `_id` (ou avec `_id: null`), un UUID v4 est attribué.
    pub fn new(input: Map<String, Value>) -> Result<Self> {
        let id = match input.get(ID_FIELD) {
            None | Some(Value::Null) => Uuid::new_v4().to_string(),
            Some(v) => normalize_id(v)?,
        };

        let mut fields = Map::with_capacity(input.len() + 1);
        fields.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        for (key, value) in input {
            if key != ID_FIELD {
                fields.insert(key, value);
            }
        }

        Ok(Self { id, fields })
    }

    /// Variante acceptant n'importe quelle valeur JSON ; seule un objet est valide.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::new(map),
            other => Err(AppError::InvalidRecord(format!(
                "objet attendu, reçu {}",
                json::type_name(&other)
            ))),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Noms des champs dans l'ordre d'insertion (`_id` en premier).
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        // `_id` est toujours présent
        false
    }

    /// Copie des champs (forme "brute" d'un enregistrement).
    pub fn to_map(&self) -> Map<String, Value> {
        self.fields.clone()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Modifie (ou ajoute) un champ. `_id` ne peut pas changer.
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Result<Option<Value>> {
        let field = field.into();
        if field == ID_FIELD {
            if normalize_id(&value).ok().as_deref() == Some(self.id.as_str()) {
                return Ok(self.fields.get(ID_FIELD).cloned());
            }
            return Err(AppError::ImmutableId(self.id.clone()));
        }
        Ok(self.fields.insert(field, value))
    }

    /// Fusionne les champs de `patch` (même règle que `set` pour `_id`).
    pub fn merge(&mut self, patch: Map<String, Value>) -> Result<()> {
        if let Some(id) = patch.get(ID_FIELD) {
            if normalize_id(id).ok().as_deref() != Some(self.id.as_str()) {
                return Err(AppError::ImmutableId(self.id.clone()));
            }
        }
        for (key, value) in patch {
            if key != ID_FIELD {
                self.fields.insert(key, value);
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, field: &str) -> Result<Option<Value>> {
        if field == ID_FIELD {
            return Err(AppError::ImmutableId(self.id.clone()));
        }
        // shift_remove conserve l'ordre des champs restants
        Ok(self.fields.shift_remove(field))
    }

    // --- ACCÈS POUR LES PRÉDICATS ---

    /// Champ obligatoire : `FieldError::Missing` s'il est absent.
    pub fn field(&self, name: &str) -> std::result::Result<&Value, FieldError> {
        self.fields
            .get(name)
            .ok_or_else(|| FieldError::Missing(name.to_string()))
    }

    /// Accès par chemin pointé (`adresse.ville`, `tags.0`).
    /// Une clé exacte contenant des points est prioritaire.
    pub fn path(&self, path: &str) -> std::result::Result<&Value, FieldError> {
        if let Some(v) = self.fields.get(path) {
            return Ok(v);
        }
        let missing = || FieldError::Missing(path.to_string());

        let mut parts = path.split('.');
        let head = parts.next().ok_or_else(missing)?;
        let mut current = self.fields.get(head).ok_or_else(missing)?;
        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part),
                Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
            .ok_or_else(missing)?;
        }
        Ok(current)
    }

    pub fn str_field(&self, name: &str) -> std::result::Result<&str, FieldError> {
        self.field(name)?
            .as_str()
            .ok_or_else(|| type_error(name, "string"))
    }

    pub fn i64_field(&self, name: &str) -> std::result::Result<i64, FieldError> {
        self.field(name)?
            .as_i64()
            .ok_or_else(|| type_error(name, "integer"))
    }

    pub fn f64_field(&self, name: &str) -> std::result::Result<f64, FieldError> {
        self.field(name)?
            .as_f64()
            .ok_or_else(|| type_error(name, "number"))
    }

    pub fn bool_field(&self, name: &str) -> std::result::Result<bool, FieldError> {
        self.field(name)?
            .as_bool()
            .ok_or_else(|| type_error(name, "bool"))
    }
}

fn type_error(field: &str, expected: &'static str) -> FieldError {
    FieldError::Type {
        field: field.to_string(),
        expected,
    }
}

// Sérialisé comme sa table de champs : c'est exactement la forme persistée.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.fields)
    }
}
