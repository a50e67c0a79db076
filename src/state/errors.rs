//! Validation error entries keyed by path

use super::path::{self, FieldPath};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const MESSAGE_KEY: &str = "message";

/// A path-scoped validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub path: FieldPath,
    pub message: String,
}

/// Path → error mapping produced by an external validation pass.
///
/// Stored as a nested tree mirroring the value tree, with each error leaf
/// shaped `{"message": "..."}`, so lookups go through the same resolver
/// as values do.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    tree: Value,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from one validation pass
    pub fn from_entries(entries: impl IntoIterator<Item = ErrorEntry>) -> Self {
        let mut map = Self::new();
        for entry in entries {
            map.insert(&entry.path, entry.message);
        }
        map
    }

    /// Record (or replace) the error for `path`, keeping errors nested below it
    pub fn insert(&mut self, path: &FieldPath, message: impl Into<String>) {
        let message = Value::String(message.into());
        match path::slot_mut(&mut self.tree, path) {
            Value::Object(map) => {
                map.insert(MESSAGE_KEY.to_string(), message);
            }
            slot => *slot = json!({ "message": message }),
        }
    }

    /// Drop the error for `path` only; errors nested below it stay
    pub fn clear(&mut self, path: &FieldPath) {
        let emptied = match path::lookup_mut(&mut self.tree, path) {
            Some(Value::Object(map)) => {
                map.shift_remove(MESSAGE_KEY);
                map.is_empty()
            }
            _ => false,
        };
        if emptied {
            path::remove(&mut self.tree, path);
        }
    }

    /// Resolve the error entry registered at `path`
    pub fn get(&self, path: &FieldPath) -> Option<ErrorEntry> {
        let node = path::resolve(&self.tree, path, Value::Null);
        let message = node.get(MESSAGE_KEY)?.as_str()?;
        Some(ErrorEntry {
            path: path.clone(),
            message: message.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        count_messages(&self.tree) == 0
    }

    pub fn len(&self) -> usize {
        count_messages(&self.tree)
    }
}

fn count_messages(node: &Value) -> usize {
    match node {
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| match child {
                Value::String(_) if key == MESSAGE_KEY => 1,
                _ => count_messages(child),
            })
            .sum(),
        Value::Array(items) => items.iter().map(count_messages).sum(),
        _ => 0,
    }
}
