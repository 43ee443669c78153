// FICHIER : jsondb/src/utils/mod.rs

// =========================================================================
//  JSONDB UTILS - Foundation Layer
// =========================================================================

pub mod env;
pub mod error;
pub mod fs;
pub mod json;
pub mod logger;

// --> Erreurs
pub use error::{AnyResult, AppError, FieldError, Result};
pub use logger::init_logging;

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::error::{AppError, FieldError, Result};
    pub use super::json::{json, Map, Value};
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, info, instrument, trace, warn};
}
