// FICHIER : jsondb/src/utils/fs.rs

use crate::utils::error::Result;
use crate::utils::json;
use serde::Serialize;
use std::fs;
use std::io::Write;
use tracing::instrument;

// --- RE-EXPORTS (Isolation de la couche OS) ---
pub use std::path::{Path, PathBuf};

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Lit tout le fichier. Retourne `None` si le fichier n'existe pas.
#[instrument(skip(path), fields(path = ?path))]
pub fn read_to_string_opt(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// --- ÉCRITURE ATOMIQUE ---

/// Écriture atomique (write -> sync -> rename) : le fichier final est soit
/// l'ancien contenu, soit le nouveau, jamais un fichier tronqué.
#[instrument(skip(content, path), fields(path = ?path, bytes = content.len()))]
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    // Un échec à n'importe quelle étape retire le .tmp
    if let Err(e) = write_then_rename(&tmp_path, path, content) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

fn write_then_rename(tmp_path: &Path, path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(content)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp_path, path)
}

pub fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = json::stringify_pretty(data)?;
    write_atomic(path, content.as_bytes())
}

/// Supprime le fichier. Retourne `false` s'il n'existait pas.
pub fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
