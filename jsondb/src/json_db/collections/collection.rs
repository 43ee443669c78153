// FICHIER : jsondb/src/json_db/collections/collection.rs

//! Collection : enregistrements indexés par `_id`, dans l'ordre d'insertion.
//! Pas d'I/O ici : la persistance est l'affaire du `Store`.

use crate::json_db::collections::record::{PredicateResult, Record};
use crate::json_db::collections::relations::Relation;
use crate::json_db::query::QueryFilter;
use crate::utils::prelude::*;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serializer;

#[derive(Debug, Clone, Default)]
pub struct Collection {
    name: String,
    // Invariant : chaque clé est égale à `record.id()`.
    records: IndexMap<String, Record>,
    relations: IndexMap<String, Relation>,
}

impl Collection {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    // --- ÉCRITURE ---

    /// Insère un enregistrement. Un `_id` déjà présent remplace l'enregistrement
    /// existant (last-write-wins) en conservant sa position d'insertion.
    pub fn insert(&mut self, fields: Map<String, Value>) -> Result<&Record> {
        let record = Record::new(fields)?;
        Ok(self.insert_record(record))
    }

    /// Variante de `insert` pour une valeur JSON quelconque (doit être un objet).
    pub fn insert_value(&mut self, value: Value) -> Result<&Record> {
        let record = Record::from_value(value)?;
        Ok(self.insert_record(record))
    }

    pub fn insert_record(&mut self, record: Record) -> &Record {
        let slot = match self.records.entry(record.id().to_string()) {
            Entry::Occupied(mut e) => {
                debug!(collection = %self.name, id = %e.key(), "Remplacement d'un enregistrement existant");
                e.insert(record);
                e.into_mut()
            }
            Entry::Vacant(e) => e.insert(record),
        };
        &*slot
    }

    /// Insère plusieurs enregistrements et retourne leurs identifiants.
    pub fn insert_many<I>(&mut self, items: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = Map<String, Value>>,
    {
        items
            .into_iter()
            .map(|fields| self.insert(fields).map(|r| r.id().to_string()))
            .collect()
    }

    /// Fusionne `patch` dans l'enregistrement `id`.
    pub fn update(&mut self, id: &str, patch: Map<String, Value>) -> Result<&Record> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("{}/{}", self.name, id)))?;
        record.merge(patch)?;
        Ok(&*record)
    }

    /// Suppression explicite ; l'ordre des enregistrements restants est conservé.
    pub fn delete(&mut self, id: &str) -> Option<Record> {
        self.records.shift_remove(id)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    // --- LECTURE ---

    /// Copie des champs de chaque enregistrement, dans l'ordre d'insertion.
    pub fn all(&self) -> Vec<Map<String, Value>> {
        self.records.values().map(Record::to_map).collect()
    }

    pub fn all_objects(&self) -> Vec<&Record> {
        self.records.values().collect()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first().map(|(_, r)| r)
    }

    pub fn first_raw(&self) -> Option<&Map<String, Value>> {
        self.first().map(Record::fields)
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn get_raw(&self, id: &str) -> Option<&Map<String, Value>> {
        self.get(id).map(Record::fields)
    }

    /// Accès mutable : `Record` protège `_id`, la clé reste donc cohérente.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.records.get_mut(id)
    }

    // --- REQUÊTES ---

    /// Enregistrements pour lesquels `predicate` retourne `Ok(true)`.
    /// Une erreur de prédicat (champ absent, type inattendu) exclut
    /// silencieusement l'enregistrement : elle n'est jamais remontée.
    pub fn query<F>(&self, predicate: F) -> Vec<Map<String, Value>>
    where
        F: Fn(&Record) -> PredicateResult,
    {
        self.matching(predicate)
            .into_iter()
            .map(Record::to_map)
            .collect()
    }

    pub fn query_objects<F>(&self, predicate: F) -> Vec<&Record>
    where
        F: Fn(&Record) -> PredicateResult,
    {
        self.matching(predicate)
    }

    /// Supprime les enregistrements correspondants et retourne leur nombre.
    /// Les identifiants sont collectés avant toute suppression.
    pub fn query_delete<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&Record) -> PredicateResult,
    {
        let ids: Vec<String> = self
            .matching(predicate)
            .into_iter()
            .map(|r| r.id().to_string())
            .collect();
        for id in &ids {
            self.records.shift_remove(id);
        }
        if !ids.is_empty() {
            debug!(collection = %self.name, count = ids.len(), "query_delete");
        }
        ids.len()
    }

    pub fn filter(&self, filter: &QueryFilter) -> Vec<Map<String, Value>> {
        self.query(|r| filter.evaluate(r))
    }

    pub fn filter_objects(&self, filter: &QueryFilter) -> Vec<&Record> {
        self.query_objects(|r| filter.evaluate(r))
    }

    fn matching<F>(&self, predicate: F) -> Vec<&Record>
    where
        F: Fn(&Record) -> PredicateResult,
    {
        self.records
            .values()
            .filter(|record| match predicate(*record) {
                Ok(hit) => hit,
                Err(e) => {
                    trace!(collection = %self.name, id = %record.id(), error = %e, "Prédicat ignoré");
                    false
                }
            })
            .collect()
    }

    // --- RELATIONS ---

    pub fn relations(&self) -> &IndexMap<String, Relation> {
        &self.relations
    }

    pub fn relation(&self, collection: &str) -> Option<&Relation> {
        self.relations.get(collection)
    }

    pub(crate) fn install_relation(&mut self, relation: Relation) {
        self.relations
            .insert(relation.to_collection.clone(), relation);
    }
}

// Forme persistée : { id: { champs } }. Les relations ne sont pas écrites.
impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}
