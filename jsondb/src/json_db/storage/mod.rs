// FICHIER : jsondb/src/json_db/storage/mod.rs

pub mod file_storage;

use crate::utils::{env, fs, json, AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// --- CONFIGURATION ---

pub const ENV_PATH: &str = "JSONDB_PATH";
pub const ENV_AUTOSAVE: &str = "JSONDB_AUTOSAVE";
pub const ENV_LOG_LEVEL: &str = "JSONDB_LOG_LEVEL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonDbConfig {
    /// Fichier de stockage. `None` : base purement en mémoire.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Réécrit tout le fichier après chaque `Store::mutate`.
    #[serde(default)]
    pub autosave: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for JsonDbConfig {
    fn default() -> Self {
        Self {
            path: None,
            autosave: false,
            log_level: default_log_level(),
        }
    }
}

impl JsonDbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Lit `JSONDB_PATH`, `JSONDB_AUTOSAVE` et `JSONDB_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env::get_optional)
    }

    /// Même logique que `from_env`, avec une source de variables injectable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let autosave = match lookup(ENV_AUTOSAVE) {
            None => false,
            Some(raw) => env::parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!("{} invalide : {:?}", ENV_AUTOSAVE, raw))
            })?,
        };

        Ok(Self {
            path: lookup(ENV_PATH).map(PathBuf::from),
            autosave,
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or_else(default_log_level),
        })
    }

    /// Charge une configuration JSON (`{ "path": ..., "autosave": ... }`).
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string_opt(path)?.ok_or_else(|| {
            AppError::Config(format!("Fichier de configuration introuvable : {:?}", path))
        })?;
        json::parse(&content)
            .map_err(|e| AppError::Config(format!("Configuration invalide {:?} : {}", path, e)))
    }
}
