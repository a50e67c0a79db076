//! Render-ready snapshot of one bound field

use crate::state::FieldPath;
use chrono::{DateTime, FixedOffset};
use ratatui::style::Color;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceView {
    pub label: String,
    pub value: Value,
    pub checked: bool,
}

/// Widget-specific part of a field view
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    Input {
        text: String,
        placeholder: Option<String>,
        masked: bool,
    },
    TextArea {
        text: String,
        rows: u16,
    },
    Select {
        options: Vec<OptionView>,
        placeholder: Option<String>,
    },
    Checkbox {
        checked: bool,
    },
    RadioGroup {
        choices: Vec<ChoiceView>,
        inline: bool,
    },
    Editor {
        content: String,
        rows: u16,
        color: Color,
    },
    DateTime {
        value: Option<DateTime<FixedOffset>>,
        display_format: Option<String>,
    },
}

impl WidgetView {
    /// Rows the widget needs inside its border
    pub fn content_rows(&self) -> u16 {
        match self {
            WidgetView::Input { .. }
            | WidgetView::Select { .. }
            | WidgetView::Checkbox { .. }
            | WidgetView::DateTime { .. } => 1,
            WidgetView::TextArea { rows, .. } | WidgetView::Editor { rows, .. } => *rows,
            WidgetView::RadioGroup { inline: true, .. } => 1,
            WidgetView::RadioGroup { choices, .. } => {
                u16::try_from(choices.len()).unwrap_or(u16::MAX)
            }
        }
    }
}

/// Everything needed to draw one field, read fresh from shared state
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub path: FieldPath,
    pub label: String,
    pub required: bool,
    pub disabled: bool,
    pub hints: Vec<String>,
    pub widget: WidgetView,
    /// Message for the alert region, when the path has an error
    pub error: Option<String>,
    pub fixed_height: Option<u16>,
}

impl FieldView {
    /// Label as shown in the field border, with the required marker
    pub fn title(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Total rows: hints, bordered widget, alert region
    pub fn height(&self) -> u16 {
        let widget = self
            .fixed_height
            .unwrap_or_else(|| self.widget.content_rows().saturating_add(2));
        let alert = u16::from(self.error.is_some());
        let hints = u16::try_from(self.hints.len()).unwrap_or(u16::MAX);
        hints.saturating_add(widget).saturating_add(alert)
    }

    /// The checked choice of a radio group, if any
    pub fn checked_choice(&self) -> Option<&ChoiceView> {
        match &self.widget {
            WidgetView::RadioGroup { choices, .. } => choices.iter().find(|c| c.checked),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view(widget: WidgetView) -> FieldView {
        FieldView {
            path: FieldPath::parse("x").unwrap(),
            label: "X".into(),
            required: false,
            disabled: false,
            hints: vec![],
            widget,
            error: None,
            fixed_height: None,
        }
    }

    #[test]
    fn test_required_marker_in_title() {
        let mut v = view(WidgetView::Checkbox { checked: false });
        assert_eq!(v.title(), "X");
        v.required = true;
        assert_eq!(v.title(), "X *");
    }

    #[test]
    fn test_height_counts_hints_border_and_alert() {
        let mut v = view(WidgetView::Input {
            text: String::new(),
            placeholder: None,
            masked: false,
        });
        assert_eq!(v.height(), 3);
        v.hints.push("hint".into());
        v.error = Some("Invalid".into());
        assert_eq!(v.height(), 5);
    }

    #[test]
    fn test_fixed_height_overrides_widget_rows() {
        let mut v = view(WidgetView::TextArea {
            text: String::new(),
            rows: 8,
        });
        v.fixed_height = Some(4);
        assert_eq!(v.height(), 4);
    }

    #[test]
    fn test_height_saturates() {
        let mut v = view(WidgetView::TextArea {
            text: String::new(),
            rows: u16::MAX,
        });
        v.error = Some("Invalid".into());
        assert_eq!(v.height(), u16::MAX);
        v.fixed_height = Some(u16::MAX);
        assert_eq!(v.height(), u16::MAX);
    }

    #[test]
    fn test_radio_rows() {
        let choices = vec![
            ChoiceView {
                label: "A".into(),
                value: json!("a"),
                checked: false,
            },
            ChoiceView {
                label: "B".into(),
                value: json!("b"),
                checked: true,
            },
        ];
        let stacked = WidgetView::RadioGroup {
            choices: choices.clone(),
            inline: false,
        };
        assert_eq!(stacked.content_rows(), 2);
        let v = view(WidgetView::RadioGroup {
            choices,
            inline: true,
        });
        assert_eq!(v.widget.content_rows(), 1);
        assert_eq!(v.checked_choice().unwrap().label, "B");
    }
}
