//! Field declarations and the adapters that bind them to shared state
//!
//! - `declaration`: what the caller declares (path, label, widget kind)
//! - `native`: per-widget key handling and native change payloads
//! - `adapter`: normalization of native payloads into canonical writes
//! - `view`: render-ready snapshots consumed by `ui`

mod adapter;
mod declaration;
pub mod native;
mod view;

pub use adapter::FieldAdapter;
pub use declaration::{
    Choice, DateTimeConfig, EditorConfig, FieldDeclaration, FieldKind, FieldProps, InputConfig,
    RadioConfig, SelectConfig, SelectOption, TextAreaConfig,
};
pub use native::NativeChange;
pub use view::{ChoiceView, FieldView, OptionView, WidgetView};
