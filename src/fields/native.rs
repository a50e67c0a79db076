//! Native widget interaction: key presses → widget change payloads
//!
//! Each widget kind reports changes in its own shape. These payloads are
//! what a field adapter normalizes into one canonical value.

use super::declaration::FieldKind;
use chrono::{DateTime, Duration, FixedOffset, Months, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

/// A change notification as emitted by a widget
#[derive(Debug, Clone, PartialEq)]
pub enum NativeChange {
    /// Input and text area: the full new text
    Text(String),
    /// Dropdown: the chosen option's value
    Selected(Value),
    /// Checkbox: the new checked flag
    Checked(bool),
    /// Radio group: the selected choice's value
    Choice(Value),
    /// Editor: the serialized document
    Document(Value),
    /// Date/time picker: the picked value, `None` when cleared
    DateTime(Option<DateTime<FixedOffset>>),
}

/// Text shown by text-like widgets for a tree value
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read a tree value back as a date/time, if it holds one
pub fn as_date_time(value: &Value) -> Option<DateTime<FixedOffset>> {
    serde_json::from_value(value.clone()).ok()
}

/// Translate a key press on a widget of `kind` showing `current`
pub fn key_to_change(kind: &FieldKind, current: &Value, key: KeyEvent) -> Option<NativeChange> {
    match kind {
        FieldKind::PlainValue(_) => edit_text(current, key, false).map(NativeChange::Text),
        FieldKind::MultiLine(_) => edit_text(current, key, true).map(NativeChange::Text),
        // structured documents are opaque here; only text documents are typed into
        FieldKind::RichDocument(_) => match current {
            Value::String(_) | Value::Null => edit_text(current, key, true)
                .map(|doc| NativeChange::Document(Value::String(doc))),
            _ => None,
        },
        FieldKind::BooleanToggle => match key.code {
            KeyCode::Char(' ') => Some(NativeChange::Checked(!current.as_bool().unwrap_or(false))),
            _ => None,
        },
        FieldKind::SingleSelect(config) => {
            let values: Vec<&Value> = config.options.iter().map(|o| &o.value).collect();
            step_selection(&values, current, key).map(NativeChange::Selected)
        }
        FieldKind::ChoiceGroup(config) => {
            let values: Vec<&Value> = config.choices.iter().map(|c| &c.value).collect();
            if let KeyCode::Char(c) = key.code {
                let picked = c
                    .to_digit(10)
                    .filter(|d| *d > 0)
                    .and_then(|d| values.get(d as usize - 1));
                return picked.map(|v| NativeChange::Choice((*v).clone()));
            }
            step_selection(&values, current, key).map(NativeChange::Choice)
        }
        FieldKind::DateTime(_) => pick_date(as_date_time(current), key).map(NativeChange::DateTime),
    }
}

/// Apply a typing key to the current text
fn edit_text(current: &Value, key: KeyEvent, multiline: bool) -> Option<String> {
    let mut text = display_text(current);
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            text.push(c)
        }
        KeyCode::Backspace => {
            text.pop()?;
        }
        KeyCode::Enter if multiline => text.push('\n'),
        _ => return None,
    }
    Some(text)
}

/// Move to the previous/next entry; an unset value starts at the first
fn step_selection(values: &[&Value], current: &Value, key: KeyEvent) -> Option<Value> {
    let forward = match key.code {
        KeyCode::Down | KeyCode::Right => true,
        KeyCode::Up | KeyCode::Left => false,
        _ => return None,
    };
    let len = values.len();
    if len == 0 {
        return None;
    }
    let next = match values.iter().position(|v| *v == current) {
        None => 0,
        Some(i) if forward => (i + 1) % len,
        Some(0) => len - 1,
        Some(i) => i - 1,
    };
    Some(values[next].clone())
}

fn pick_date(
    current: Option<DateTime<FixedOffset>>,
    key: KeyEvent,
) -> Option<Option<DateTime<FixedOffset>>> {
    match (key.code, current) {
        (KeyCode::Delete | KeyCode::Backspace, Some(_)) => Some(None),
        (KeyCode::Enter, None) => Some(Some(Utc::now().fixed_offset())),
        (KeyCode::Up, Some(dt)) => Some(dt.checked_add_signed(Duration::days(1))),
        (KeyCode::Down, Some(dt)) => Some(dt.checked_sub_signed(Duration::days(1))),
        (KeyCode::PageUp, Some(dt)) => Some(dt.checked_add_months(Months::new(1))),
        (KeyCode::PageDown, Some(dt)) => Some(dt.checked_sub_months(Months::new(1))),
        _ => None,
    }
}
