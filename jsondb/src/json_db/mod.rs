// FICHIER : jsondb/src/json_db/mod.rs

pub mod collections;
pub mod query;
pub mod storage;
pub mod store;

pub use collections::{set_relation, Collection, Record, Relation, RelationKind, ID_FIELD};
pub use query::{ComparisonOperator, Condition, FilterOperator, QueryFilter};
pub use storage::JsonDbConfig;
pub use store::Store;
