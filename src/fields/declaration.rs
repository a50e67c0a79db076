//! Field declarations: what a form binds, and to which widget

use crate::error::FormError;
use crate::state::FieldPath;
use ratatui::style::Color;
use serde_json::Value;

/// One entry of a dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: Value,
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, text: &str) -> Self {
        Self {
            value: value.into(),
            text: text.to_string(),
        }
    }
}

/// One radio button of an exclusive choice group
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: Value,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<Value>, label: &str) -> Self {
        Self {
            value: value.into(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputConfig {
    pub placeholder: Option<String>,
    /// Render the value as bullets (passwords)
    pub masked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextAreaConfig {
    pub rows: u16,
}

impl Default for TextAreaConfig {
    fn default() -> Self {
        Self { rows: 4 }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectConfig {
    pub options: Vec<SelectOption>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadioConfig {
    pub choices: Vec<Choice>,
    /// Lay the choices out on one row
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub rows: u16,
    /// Text color applied to document content
    pub default_color: Color,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            default_color: Color::Rgb(0x82, 0x8e, 0xa7),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateTimeConfig {
    /// chrono format string used for display only
    pub display_format: Option<String>,
}

/// Widget kind of a field, with its kind-specific configuration
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    PlainValue(InputConfig),
    MultiLine(TextAreaConfig),
    SingleSelect(SelectConfig),
    BooleanToggle,
    ChoiceGroup(RadioConfig),
    RichDocument(EditorConfig),
    DateTime(DateTimeConfig),
}

impl FieldKind {
    /// Value shown when the path is unset
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::PlainValue(_) | FieldKind::MultiLine(_) | FieldKind::RichDocument(_) => {
                Value::String(String::new())
            }
            FieldKind::BooleanToggle => Value::Bool(false),
            FieldKind::SingleSelect(_) | FieldKind::ChoiceGroup(_) | FieldKind::DateTime(_) => {
                Value::Null
            }
        }
    }

    /// Whether Enter inside this widget submits the form
    pub fn submits_on_enter(&self) -> bool {
        matches!(self, FieldKind::PlainValue(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::PlainValue(_) => "input",
            FieldKind::MultiLine(_) => "text area",
            FieldKind::SingleSelect(_) => "select",
            FieldKind::BooleanToggle => "checkbox",
            FieldKind::ChoiceGroup(_) => "radio group",
            FieldKind::RichDocument(_) => "editor",
            FieldKind::DateTime(_) => "date/time picker",
        }
    }
}

/// Presentation options honored by every widget kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldProps {
    /// Ignore user interaction
    pub disabled: bool,
    /// Fixed widget height in rows, overriding the kind's own sizing
    pub height: Option<u16>,
}

/// A path bound to a widget, as declared by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub path: FieldPath,
    pub label: String,
    pub kind: FieldKind,
    /// Visual marker only; validation lives elsewhere
    pub required: bool,
    /// Seeded into shared state at mount when the path is unset
    pub default_value: Option<Value>,
    /// Static hint lines rendered under the label
    pub children: Vec<String>,
    pub props: FieldProps,
    /// Allow another field of the same form to bind this path
    pub aliased: bool,
}

impl FieldDeclaration {
    /// Declare a field of any kind
    pub fn new(path: &str, label: &str, kind: FieldKind) -> Result<Self, FormError> {
        Ok(Self {
            path: FieldPath::parse(path)?,
            label: label.to_string(),
            kind,
            required: false,
            default_value: None,
            children: Vec::new(),
            props: FieldProps::default(),
            aliased: false,
        })
    }

    /// Single-line text input
    pub fn input(path: &str, label: &str) -> Result<Self, FormError> {
        Self::new(path, label, FieldKind::PlainValue(InputConfig::default()))
    }

    /// Multi-line text area
    pub fn text_area(path: &str, label: &str) -> Result<Self, FormError> {
        Self::new(path, label, FieldKind::MultiLine(TextAreaConfig::default()))
    }

    /// Dropdown selection
    pub fn select(path: &str, label: &str, options: Vec<SelectOption>) -> Result<Self, FormError> {
        Self::new(
            path,
            label,
            FieldKind::SingleSelect(SelectConfig {
                options,
                placeholder: None,
            }),
        )
    }

    /// Boolean checkbox
    pub fn checkbox(path: &str, label: &str) -> Result<Self, FormError> {
        Self::new(path, label, FieldKind::BooleanToggle)
    }

    /// Exclusive radio group
    pub fn radio(path: &str, label: &str, choices: Vec<Choice>) -> Result<Self, FormError> {
        Self::new(
            path,
            label,
            FieldKind::ChoiceGroup(RadioConfig {
                choices,
                inline: false,
            }),
        )
    }

    /// Rich document editor
    pub fn editor(path: &str, label: &str) -> Result<Self, FormError> {
        Self::new(path, label, FieldKind::RichDocument(EditorConfig::default()))
    }

    /// Date/time picker
    pub fn date_time(path: &str, label: &str) -> Result<Self, FormError> {
        Self::new(path, label, FieldKind::DateTime(DateTimeConfig::default()))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Append a static hint line
    pub fn child(mut self, line: &str) -> Self {
        self.children.push(line.to_string());
        self
    }

    pub fn props(mut self, props: FieldProps) -> Self {
        self.props = props;
        self
    }

    pub fn aliased(mut self) -> Self {
        self.aliased = true;
        self
    }

    /// Check the kind configuration carries what the widget needs
    pub fn validate(&self) -> Result<(), FormError> {
        match &self.kind {
            FieldKind::ChoiceGroup(config) if config.choices.is_empty() => {
                Err(FormError::MissingChoices {
                    path: self.path.to_string(),
                })
            }
            FieldKind::SingleSelect(config) if config.options.is_empty() => {
                Err(FormError::MissingOptions {
                    path: self.path.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
