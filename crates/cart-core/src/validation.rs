//! # Validation State
//!
//! Field errors accumulated while binding and checking a request model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key for errors that belong to the model as a whole
pub const MODEL_KEY: &str = "";

/// Accumulated validation errors, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    /// Create a valid (empty) state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error against `key`
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(key.into()).or_default().push(message.into());
    }

    /// Record a model-level error
    pub fn add_model_error(&mut self, message: impl Into<String>) {
        self.add_error(MODEL_KEY, message);
    }

    /// True when no errors are recorded
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Errors for a key
    pub fn errors_for(&self, key: &str) -> &[String] {
        self.errors.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All `(key, message)` pairs in key order
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(k, msgs)| msgs.iter().map(move |m| (k.as_str(), m.as_str())))
    }

    /// Number of recorded errors
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }
}
