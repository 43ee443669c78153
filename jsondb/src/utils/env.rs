// FICHIER : jsondb/src/utils/env.rs

use std::env;

/// Récupère une variable d'environnement (Optionnel).
/// Une variable définie mais vide est traitée comme absente.
pub fn get_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Interprète un flag booléen ("true"/"1"/"yes"/"on" ou leurs contraires).
/// `None` si la valeur n'est pas reconnue.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
