//! formbind - path-bound form fields for Ratatui
//!
//! Declare fields against paths in a shared value tree; adapters translate
//! each widget's native key handling into canonical writes, and the form
//! container injects validation errors and owns submission.

pub mod app;
pub mod config;
pub mod error;
pub mod fields;
pub mod form;
pub mod platform;
pub mod state;
pub mod ui;

pub use error::FormError;
pub use fields::{FieldDeclaration, FieldKind, FieldProps};
pub use form::{FormChild, FormContainer, KeyOutcome, StaticContent, SubmitEvent};
pub use state::{ErrorMap, FieldPath, FormStore, SharedFormState, StateHandle};
