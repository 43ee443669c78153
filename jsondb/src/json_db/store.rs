// FICHIER : jsondb/src/json_db/store.rs

//! Conteneur de premier niveau : possède toutes les collections, charge le
//! fichier entier à l'ouverture et le réécrit entièrement à la sauvegarde.

use crate::json_db::collections::relations::{set_relation, Relation, RelationKind};
use crate::json_db::collections::Collection;
use crate::json_db::storage::{file_storage, JsonDbConfig};
use crate::utils::init_logging;
use crate::utils::prelude::*;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Store {
    path: Option<PathBuf>,
    collections: IndexMap<String, Collection>,
    loaded: bool,
    autosave: bool,
}

impl Store {
    /// Ouvre (ou prépare) une base adossée à `path`.
    /// Un fichier absent donne une base vide ; un fichier mal formé est une erreur.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_config(&JsonDbConfig::new(path))
    }

    /// Base sans fichier : `load` et `save` sont des no-op.
    pub fn in_memory() -> Self {
        Self {
            loaded: true,
            ..Default::default()
        }
    }

    /// Configuration lue dans l'environnement (`JSONDB_*`), logger initialisé.
    pub fn from_env() -> Result<Self> {
        let config = JsonDbConfig::from_env()?;
        init_logging(&config.log_level);
        Self::from_config(&config)
    }

    pub fn from_config(config: &JsonDbConfig) -> Result<Self> {
        let mut store = Self {
            path: config.path.clone(),
            autosave: config.autosave,
            ..Default::default()
        };
        store.load()?;
        store.loaded = true;
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn autosave(&self) -> bool {
        self.autosave
    }

    pub fn set_autosave(&mut self, autosave: bool) {
        self.autosave = autosave;
    }

    // --- COLLECTIONS ---

    /// Collection existante, ou nouvelle collection vide enregistrée sous `name`.
    pub fn collection(&mut self, name: &str) -> &mut Collection {
        if !self.collections.contains_key(name) {
            debug!(collection = %name, "Création de collection");
        }
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Collection::new(name))
    }

    /// Recherche sans création.
    pub fn get_collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    pub fn get_collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.get_mut(name)
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.collections.values().map(Collection::len).sum()
    }

    /// Retire la collection et tous ses enregistrements (aucune I/O).
    pub fn drop_collection(&mut self, name: &str) -> bool {
        let dropped = self.collections.shift_remove(name).is_some();
        if dropped {
            debug!(collection = %name, "Collection supprimée");
        }
        dropped
    }

    /// Exécute `f` sur la collection `name` puis sauvegarde si l'autosave est actif.
    pub fn mutate<R>(&mut self, name: &str, f: impl FnOnce(&mut Collection) -> R) -> Result<R> {
        let out = f(self.collection(name));
        if self.autosave {
            self.save()?;
        }
        Ok(out)
    }

    /// Déclare une relation entre deux collections (créées au besoin).
    /// `kind` : "mto"/"many_to_one" ou "otm"/"one_to_many" ; toute autre valeur est refusée.
    /// Les collections absentes sont créées dans l'ordre des arguments (`a` puis `b`).
    ///
    /// Relation réflexive (`a == b`) : seul le descripteur côté déclarant
    /// (`kind`, `related_name_to_b`) est conservé, et non le descripteur inverse
    /// (`kind.inverse()`, `related_name_to_a`) qu'une écriture successive des
    /// deux côtés laisserait en place.
    pub fn set_relation(
        &mut self,
        a: &str,
        related_name_to_a: &str,
        kind: &str,
        b: &str,
        related_name_to_b: &str,
    ) -> Result<()> {
        let kind: RelationKind = kind.parse()?;

        if a == b {
            // Relation réflexive : seul le descripteur côté déclarant est conservé.
            self.collection(a)
                .install_relation(Relation::new(kind, b, related_name_to_b));
            return Ok(());
        }

        self.collection(a);
        // `b` est sorti temporairement de la table (sa position est conservée)
        let mut col_b = std::mem::take(self.collection(b));
        set_relation(
            self.collection(a),
            related_name_to_a,
            kind,
            &mut col_b,
            related_name_to_b,
        );
        *self.collection(b) = col_b;
        Ok(())
    }

    // --- PERSISTANCE ---

    /// Charge le fichier (s'il existe) dans les collections.
    /// Le contenu est entièrement validé avant toute modification en mémoire.
    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn load(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        let Some(data) = file_storage::read_store_file(&path)? else {
            debug!("Aucun fichier existant, base vide");
            return Ok(());
        };

        let mut count = 0usize;
        for (name, records) in data {
            let collection = self.collection(&name);
            for (_, fields) in records {
                collection.insert(fields)?;
                count += 1;
            }
        }
        info!(collections = self.collections.len(), records = count, "Base chargée");
        Ok(())
    }

    /// Réécrit tout le fichier à partir de l'état en mémoire.
    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        file_storage::write_store_file(path, &self.collections)?;
        info!(
            collections = self.collections.len(),
            records = self.total_records(),
            "Base sauvegardée"
        );
        Ok(())
    }

    /// Document JSON exact que `save` écrirait.
    pub fn snapshot(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.collections)?)
    }

    /// Supprime le fichier de base s'il existe et vide la base.
    /// Ne sauvegarde pas ensuite. Retourne `true` si un fichier a été supprimé.
    pub fn delete(&mut self) -> Result<bool> {
        let Some(path) = self.path.as_deref() else {
            return Ok(false);
        };
        if !file_storage::remove_store_file(path)? {
            return Ok(false);
        }
        info!(path = ?path, "Fichier de base supprimé");
        self.collections.clear();
        Ok(true)
    }
}
