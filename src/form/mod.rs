//! Form composition and the submit boundary

mod container;
mod focus;
mod submit;

pub use container::{ChildView, FormChild, FormContainer, KeyOutcome, StaticContent, SubmitHandler};
pub use focus::FocusRing;
pub use submit::{SubmitEvent, SubmitSource};
