//! Collections, enregistrements et relations (modèle en mémoire)

pub mod collection;
pub mod record;
pub mod relations;

pub use collection::Collection;
pub use record::{PredicateResult, Record, ID_FIELD};
pub use relations::{set_relation, Relation, RelationKind};
