//! Shared form state contract and an in-memory implementation

use super::errors::ErrorMap;
use super::path::{self, FieldPath};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use uuid::Uuid;

/// Callback fired with the new value after a write to an overlapping path
pub type ChangeListener = Box<dyn FnMut(&Value)>;

/// Handle to one subscription, used to release it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle injected into every field adapter of one form
pub type StateHandle = Rc<RefCell<dyn SharedFormState>>;

/// The authoritative value tree and error map of one form instance.
///
/// Field adapters only ever go through this contract; they never hold a
/// copy of the tree.
#[cfg_attr(test, mockall::automock)]
pub trait SharedFormState {
    /// Current value at `path`, `None` when unset
    fn value_at(&self, path: &FieldPath) -> Option<Value>;

    /// Replace the value at `path`
    fn set_value_at(&mut self, path: &FieldPath, value: Value);

    /// Get notified after writes touching `path`
    fn subscribe(&mut self, path: &FieldPath, on_change: ChangeListener) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Snapshot of the current path → error mapping
    fn errors(&self) -> ErrorMap;

    /// Record that the user has left the field at `path`
    fn mark_touched(&mut self, path: &FieldPath);

    /// Snapshot of the whole value tree
    fn values(&self) -> Value;
}

struct Subscription {
    id: SubscriptionId,
    path: FieldPath,
    on_change: ChangeListener,
}

/// In-memory shared form state
pub struct FormStore {
    values: Value,
    errors: ErrorMap,
    touched: BTreeSet<String>,
    subscriptions: Vec<Subscription>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::with_values(json!({}))
    }

    /// Start from a caller-supplied tree
    pub fn with_values(values: Value) -> Self {
        Self {
            values,
            errors: ErrorMap::new(),
            touched: BTreeSet::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Wrap into the handle shape adapters expect
    pub fn into_handle(self) -> StateHandle {
        Rc::new(RefCell::new(self))
    }

    /// Replace the error map with the result of a validation pass
    pub fn set_errors(&mut self, errors: ErrorMap) {
        tracing::debug!("Validation pass produced {} error(s)", errors.len());
        self.errors = errors;
    }

    /// Drop the error for one path once its value became valid
    pub fn clear_error(&mut self, path: &FieldPath) {
        self.errors.clear(path);
    }

    pub fn is_touched(&self, path: &FieldPath) -> bool {
        self.touched.contains(path.as_str())
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedFormState for FormStore {
    fn value_at(&self, path: &FieldPath) -> Option<Value> {
        path::lookup(&self.values, path).cloned()
    }

    fn set_value_at(&mut self, path: &FieldPath, value: Value) {
        tracing::debug!("Write {path} = {value}");
        path::assign(&mut self.values, path, value);

        for subscription in self.subscriptions.iter_mut() {
            if subscription.path.overlaps(path) {
                let current = path::resolve(&self.values, &subscription.path, Value::Null);
                (subscription.on_change)(&current);
            }
        }
    }

    fn subscribe(&mut self, path: &FieldPath, on_change: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId::new();
        tracing::debug!("Subscribe {path} ({id:?})");
        self.subscriptions.push(Subscription {
            id,
            path: path.clone(),
            on_change,
        });
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.retain(|s| s.id != id);
    }

    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }

    fn mark_touched(&mut self, path: &FieldPath) {
        self.touched.insert(path.as_str().to_string());
    }

    fn values(&self) -> Value {
        self.values.clone()
    }
}
