use std::collections::BTreeMap;

use serde_json::Value;

use crate::atoms::Atoms;
use crate::error::{CandidateError, Result};

/// A structure found by the search together with its key value pairs
///
/// Typical keys are `raw_score` (the fitness), `relaxed`, `extinct` and `gaid`.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    id: usize,
    atoms: Atoms,
    key_value_pairs: BTreeMap<String, Value>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|x| x != 0.0).unwrap_or(false),
        _ => false,
    }
}

impl Candidate {
    pub fn new(id: usize, atoms: Atoms) -> Candidate {
        Candidate {
            id,
            atoms,
            key_value_pairs: BTreeMap::new(),
        }
    }

    /// Add a key value pair
    pub fn with_key_value<V: Into<Value>>(mut self, key: &str, value: V) -> Candidate {
        self.key_value_pairs.insert(key.to_string(), value.into());
        self
    }

    pub fn with_key_value_pairs(mut self, key_value_pairs: BTreeMap<String, Value>) -> Candidate {
        self.key_value_pairs = key_value_pairs;
        self
    }

    /// Row id in the database
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    pub fn key_value_pairs(&self) -> &BTreeMap<String, Value> {
        &self.key_value_pairs
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.key_value_pairs.get(key)
    }

    /// Numeric value of `key`, used as regression target
    pub fn target(&self, key: &str) -> Result<f64> {
        self.get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| CandidateError::MissingTarget {
                id: self.id,
                key: key.to_string(),
            })
    }

    pub fn raw_score(&self) -> Option<f64> {
        self.get("raw_score").and_then(Value::as_f64)
    }

    pub fn is_relaxed(&self) -> bool {
        self.get("relaxed").map(is_truthy).unwrap_or(false)
    }

    pub fn is_extinct(&self) -> bool {
        self.get("extinct").map(is_truthy).unwrap_or(false)
    }
}
