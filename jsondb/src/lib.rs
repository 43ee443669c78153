//! Base de documents JSON mono-fichier.
//!
//! Un [`Store`](json_db::Store) possède des collections nommées d'enregistrements
//! clé/valeur. Le fichier est lu en entier à l'ouverture et réécrit en entier à
//! chaque sauvegarde ; aucune écriture concurrente n'est supportée.

pub mod json_db;
pub mod utils;

pub use json_db::{Collection, JsonDbConfig, Record, RelationKind, Store};
pub use utils::{AppError, FieldError, Result};
