//! Filtres déclaratifs sur les enregistrements d'une collection

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod evaluator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub operator: FilterOperator,
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: ComparisonOperator,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Contains,
    StartsWith,
    EndsWith,
}

impl QueryFilter {
    pub fn and(conditions: Vec<Condition>) -> Self {
        Self {
            operator: FilterOperator::And,
            conditions,
        }
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            operator: FilterOperator::Or,
            conditions,
        }
    }

    /// Vrai quand aucune des conditions n'est satisfaite.
    pub fn not(conditions: Vec<Condition>) -> Self {
        Self {
            operator: FilterOperator::Not,
            conditions,
        }
    }
}

impl Condition {
    pub fn new(field: &str, operator: ComparisonOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, ComparisonOperator::Eq, value)
    }

    pub fn gt(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, ComparisonOperator::Gt, value)
    }

    pub fn lt(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, ComparisonOperator::Lt, value)
    }
}
