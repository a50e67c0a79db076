//! Field adapter: binds one path to one widget
//!
//! The adapter is the only place where a widget's native change payload is
//! turned into the canonical value written to shared state.

use super::declaration::{FieldDeclaration, FieldKind};
use super::native::{self, NativeChange};
use super::view::{ChoiceView, FieldView, OptionView, WidgetView};
use crate::state::{ErrorEntry, FieldPath, StateHandle, SubscriptionId};
use crossterm::event::KeyEvent;
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;

pub struct FieldAdapter {
    declaration: FieldDeclaration,
    state: StateHandle,
    subscription: SubscriptionId,
    changed: Rc<Cell<bool>>,
}

impl FieldAdapter {
    /// Subscribe the declared path and seed its default if unset
    pub fn mount(declaration: FieldDeclaration, state: StateHandle) -> Self {
        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);

        let subscription = {
            let mut shared = state.borrow_mut();
            let id = shared.subscribe(&declaration.path, Box::new(move |_| flag.set(true)));
            if let Some(seed) = &declaration.default_value {
                if shared.value_at(&declaration.path).is_none() {
                    shared.set_value_at(&declaration.path, seed.clone());
                }
            }
            id
        };

        Self {
            declaration,
            state,
            subscription,
            changed,
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.declaration.path
    }

    pub fn declaration(&self) -> &FieldDeclaration {
        &self.declaration
    }

    pub fn kind(&self) -> &FieldKind {
        &self.declaration.kind
    }

    /// Current value, or the kind default when unset
    pub fn value(&self) -> Value {
        self.state
            .borrow()
            .value_at(&self.declaration.path)
            .unwrap_or_else(|| self.declaration.kind.default_value())
    }

    /// Canonical value carried by `change`, if it fits this widget kind
    pub fn extract(&self, change: NativeChange) -> Option<Value> {
        match (&self.declaration.kind, change) {
            (FieldKind::PlainValue(_) | FieldKind::MultiLine(_), NativeChange::Text(text)) => {
                Some(Value::String(text))
            }
            (FieldKind::SingleSelect(_), NativeChange::Selected(value)) => Some(value),
            (FieldKind::BooleanToggle, NativeChange::Checked(checked)) => {
                Some(Value::Bool(checked))
            }
            (FieldKind::ChoiceGroup(_), NativeChange::Choice(value)) => Some(value),
            (FieldKind::RichDocument(_), NativeChange::Document(doc)) => Some(doc),
            (FieldKind::DateTime(_), NativeChange::DateTime(None)) => Some(Value::Null),
            (FieldKind::DateTime(_), NativeChange::DateTime(Some(picked))) => {
                match serde_json::to_value(picked) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::warn!("Dropping unserializable date for {}: {e}", self.path());
                        None
                    }
                }
            }
            (kind, change) => {
                tracing::warn!(
                    "Dropping {change:?} sent to {} bound to {}",
                    kind.name(),
                    self.path()
                );
                None
            }
        }
    }

    /// Normalize `change` and write it. Returns whether a write happened.
    pub fn apply(&self, change: NativeChange) -> bool {
        let Some(value) = self.extract(change) else {
            return false;
        };
        self.state
            .borrow_mut()
            .set_value_at(&self.declaration.path, value);
        true
    }

    /// Feed a key press to the native widget
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        if self.declaration.props.disabled {
            return false;
        }
        let current = self.value();
        match native::key_to_change(&self.declaration.kind, &current, key) {
            Some(change) => self.apply(change),
            None => false,
        }
    }

    /// Focus left the widget
    pub fn blur(&self) {
        self.state.borrow_mut().mark_touched(&self.declaration.path);
    }

    /// Whether a subscribed write arrived since the last call
    pub fn take_changed(&self) -> bool {
        self.changed.replace(false)
    }

    /// Snapshot for rendering, with the error injected by the container
    pub fn view(&self, error: Option<&ErrorEntry>) -> FieldView {
        let value = self.value();
        let declaration = &self.declaration;

        let widget = match &declaration.kind {
            FieldKind::PlainValue(config) => WidgetView::Input {
                text: native::display_text(&value),
                placeholder: config.placeholder.clone(),
                masked: config.masked,
            },
            FieldKind::MultiLine(config) => WidgetView::TextArea {
                text: native::display_text(&value),
                rows: config.rows,
            },
            FieldKind::SingleSelect(config) => WidgetView::Select {
                options: config
                    .options
                    .iter()
                    .map(|o| OptionView {
                        text: o.text.clone(),
                        selected: o.value == value,
                    })
                    .collect(),
                placeholder: config.placeholder.clone(),
            },
            FieldKind::BooleanToggle => WidgetView::Checkbox {
                checked: value.as_bool().unwrap_or(false),
            },
            FieldKind::ChoiceGroup(config) => WidgetView::RadioGroup {
                choices: config
                    .choices
                    .iter()
                    .map(|c| ChoiceView {
                        label: c.label.clone(),
                        value: c.value.clone(),
                        checked: c.value == value,
                    })
                    .collect(),
                inline: config.inline,
            },
            FieldKind::RichDocument(config) => WidgetView::Editor {
                content: native::display_text(&value),
                rows: config.rows,
                color: config.default_color,
            },
            FieldKind::DateTime(config) => WidgetView::DateTime {
                value: native::as_date_time(&value),
                display_format: config.display_format.clone(),
            },
        };

        FieldView {
            path: declaration.path.clone(),
            label: declaration.label.clone(),
            required: declaration.required,
            disabled: declaration.props.disabled,
            hints: declaration.children.clone(),
            widget,
            error: error.map(|e| e.message.clone()),
            fixed_height: declaration.props.height,
        }
    }
}

impl Drop for FieldAdapter {
    fn drop(&mut self) {
        match self.state.try_borrow_mut() {
            Ok(mut shared) => shared.unsubscribe(self.subscription),
            Err(_) => tracing::warn!(
                "State busy while dropping {}; subscription {:?} left registered",
                self.path(),
                self.subscription
            ),
        }
    }
}
