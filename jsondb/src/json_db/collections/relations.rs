// FICHIER : jsondb/src/json_db/collections/relations.rs

//! Déclaration de relations entre collections.
//! Les descripteurs sont purement structurels : aucune vérification
//! d'intégrité référentielle, aucune résolution automatique.

use crate::json_db::collections::collection::Collection;
use crate::utils::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    #[serde(rename = "mto")]
    ManyToOne,
    #[serde(rename = "otm")]
    OneToMany,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::ManyToOne => "mto",
            RelationKind::OneToMany => "otm",
        }
    }

    /// Sens complémentaire, installé sur l'autre collection.
    pub fn inverse(self) -> Self {
        match self {
            RelationKind::ManyToOne => RelationKind::OneToMany,
            RelationKind::OneToMany => RelationKind::ManyToOne,
        }
    }
}

impl FromStr for RelationKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mto" | "many_to_one" => Ok(RelationKind::ManyToOne),
            "otm" | "one_to_many" => Ok(RelationKind::OneToMany),
            other => Err(AppError::InvalidRelation(other.to_string())),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descripteur installé dans `Collection::relations`, indexé par le nom
/// de la collection liée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub to_collection: String,
    pub related_name: String,
}

impl Relation {
    pub fn new(kind: RelationKind, to_collection: &str, related_name: &str) -> Self {
        Self {
            kind,
            to_collection: to_collection.to_string(),
            related_name: related_name.to_string(),
        }
    }
}

/// Lie `a` et `b`. Avec `ManyToOne` :
/// `a.relations[b] = (mto, b, related_name_to_b)` et
/// `b.relations[a] = (otm, a, related_name_to_a)`. `OneToMany` installe l'image miroir.
pub fn set_relation(
    a: &mut Collection,
    related_name_to_a: &str,
    kind: RelationKind,
    b: &mut Collection,
    related_name_to_b: &str,
) {
    a.install_relation(Relation::new(kind, b.name(), related_name_to_b));
    b.install_relation(Relation::new(kind.inverse(), a.name(), related_name_to_a));
}
