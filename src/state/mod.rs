//! Shared form state: paths, the value tree and the error map

mod errors;
pub mod path;
mod store;

pub use errors::{ErrorEntry, ErrorMap};
pub use path::{FieldPath, Segment};
pub use store::{ChangeListener, FormStore, SharedFormState, StateHandle, SubscriptionId};

#[cfg(test)]
pub use store::MockSharedFormState;
