//! Variable context sent alongside each export.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::RecognitionResult;

/// Symbolic name to value mapping.
///
/// Values are passed through to the recognition endpoint unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableContext {
    vars: BTreeMap<String, Value>,
}

impl VariableContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(name.into(), value.into())
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Remove a variable.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Record the assignments among `results`.
    ///
    /// Plain evaluations are skipped. Returns how many variables were set.
    pub fn apply<'a>(&mut self, results: impl IntoIterator<Item = &'a RecognitionResult>) -> usize {
        let mut applied = 0;
        for result in results.into_iter().filter(|r| r.is_assignment) {
            tracing::debug!("Assigning {} = {}", result.expression, result.value);
            self.insert(result.expression.clone(), result.value.clone());
            applied += 1;
        }
        applied
    }
}

impl FromIterator<(String, Value)> for VariableContext {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}
