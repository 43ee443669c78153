// FICHIER : jsondb/src/utils/error.rs

use std::io;

// --- RE-EXPORTS ANYHOW (Pour la flexibilité des appelants et des suites de tests) ---
pub use anyhow::{anyhow, Context};
// On renomme le Result de anyhow pour ne pas qu'il écrase le nôtre
pub use anyhow::Result as AnyResult;

/// Type de résultat standard de la base JSON.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs de la base.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    /// Contenu du fichier de stockage mal formé (JSON invalide ou structure inattendue).
    #[error("Fichier de base invalide : {0}")]
    Parse(String),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Identifiant invalide : {0}")]
    InvalidId(String),

    #[error("Enregistrement invalide : {0}")]
    InvalidRecord(String),

    #[error("Le champ `_id` est immuable (enregistrement {0})")]
    ImmutableId(String),

    #[error("Type de relation inconnu : {0}")]
    InvalidRelation(String),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),
}

// Permet de faire : return Err(format!("...").into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}

/// Erreur d'évaluation d'un prédicat sur un enregistrement.
/// Elle n'est jamais remontée à l'appelant d'une requête : l'enregistrement
/// concerné est simplement exclu du résultat.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("champ absent : {0}")]
    Missing(String),

    #[error("type inattendu pour le champ {field} (attendu : {expected})")]
    Type {
        field: String,
        expected: &'static str,
    },
}
