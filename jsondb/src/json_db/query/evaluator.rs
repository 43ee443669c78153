// FICHIER : jsondb/src/json_db/query/evaluator.rs

use crate::json_db::collections::record::{PredicateResult, Record};
use crate::json_db::query::{ComparisonOperator, Condition, FilterOperator, QueryFilter};
use crate::utils::json;
use crate::utils::prelude::*;
use serde_json::Number;
use std::cmp::Ordering;

impl QueryFilter {
    /// Évalue le filtre. Une `FieldError` signifie "enregistrement exclu".
    pub fn evaluate(&self, record: &Record) -> PredicateResult {
        match self.operator {
            FilterOperator::And => {
                for cond in &self.conditions {
                    if !cond.evaluate(record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            FilterOperator::Or => any_condition(&self.conditions, record),
            FilterOperator::Not => any_condition(&self.conditions, record).map(|hit| !hit),
        }
    }
}

// Vrai dès qu'une condition est vraie ; une erreur ne remonte que si aucune ne l'est.
fn any_condition(conditions: &[Condition], record: &Record) -> PredicateResult {
    let mut first_err = None;
    for cond in conditions {
        match cond.evaluate(record) {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(e) => {
                first_err.get_or_insert(e);
            }
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(false),
    }
}

impl Condition {
    pub fn evaluate(&self, record: &Record) -> PredicateResult {
        let val = record.path(&self.field)?;
        let target = &self.value;

        match self.operator {
            ComparisonOperator::Eq => Ok(values_equal(val, target)),
            ComparisonOperator::Ne => Ok(!values_equal(val, target)),

            ComparisonOperator::Gt => Ok(self.compare(val)? == Ordering::Greater),
            ComparisonOperator::Gte => Ok(self.compare(val)? != Ordering::Less),
            ComparisonOperator::Lt => Ok(self.compare(val)? == Ordering::Less),
            ComparisonOperator::Lte => Ok(self.compare(val)? != Ordering::Greater),

            ComparisonOperator::In => Ok(match target {
                Value::Array(options) => options.iter().any(|t| values_equal(val, t)),
                single => values_equal(val, single),
            }),

            ComparisonOperator::Contains => match (val, target) {
                (Value::String(s), Value::String(sub)) => {
                    Ok(s.to_lowercase().contains(&sub.to_lowercase()))
                }
                (Value::String(_), _) => Ok(false),
                (Value::Array(items), t) => Ok(items.iter().any(|item| values_equal(item, t))),
                _ => Err(self.type_error("string|array")),
            },

            ComparisonOperator::StartsWith => match val {
                Value::String(s) => Ok(target.as_str().is_some_and(|p| s.starts_with(p))),
                _ => Err(self.type_error("string")),
            },
            ComparisonOperator::EndsWith => match val {
                Value::String(s) => Ok(target.as_str().is_some_and(|p| s.ends_with(p))),
                _ => Err(self.type_error("string")),
            },
        }
    }

    fn compare(&self, val: &Value) -> std::result::Result<Ordering, FieldError> {
        compare_values(val, &self.value).ok_or_else(|| self.type_error(json::type_name(&self.value)))
    }

    fn type_error(&self, expected: &'static str) -> FieldError {
        FieldError::Type {
            field: self.field.clone(),
            expected,
        }
    }
}

/// Valeur entière exacte, `None` pour un flottant.
fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Ordre numérique : entier contre entier sans perte, sinon via `f64`.
fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    match (as_integer(x), as_integer(y)) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
    }
}

/// Égalité JSON, les nombres étant comparés par valeur (`1 == 1.0`).
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        _ => a == b,
    }
}

/// Ordre entre deux valeurs de même nature (nombre, chaîne, booléen).
/// `None` si les types ne sont pas comparables.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
