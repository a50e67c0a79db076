//! Form container: mounts bound fields, injects errors, owns submission

use super::focus::FocusRing;
use super::submit::{SubmitEvent, SubmitSource};
use crate::error::FormError;
use crate::fields::{FieldAdapter, FieldDeclaration, FieldView};
use crate::platform;
use crate::state::{FieldPath, StateHandle};
use crossterm::event::{KeyCode, KeyEvent};
use serde_json::Value;
use std::collections::HashSet;
use std::rc::Rc;

/// Decorative content that is not bound to any path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticContent {
    pub lines: Vec<String>,
}

impl StaticContent {
    pub fn text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

/// A declared child of a form
#[derive(Debug, Clone, PartialEq)]
pub enum FormChild {
    Field(FieldDeclaration),
    Static(StaticContent),
}

impl From<FieldDeclaration> for FormChild {
    fn from(declaration: FieldDeclaration) -> Self {
        FormChild::Field(declaration)
    }
}

impl From<StaticContent> for FormChild {
    fn from(content: StaticContent) -> Self {
        FormChild::Static(content)
    }
}

enum Slot {
    Field(FieldAdapter),
    Static(StaticContent),
}

/// One child as it should be drawn
#[derive(Debug, Clone, PartialEq)]
pub enum ChildView<'a> {
    /// Bound field with its injected error
    Field { view: FieldView, focused: bool },
    /// Unbound child, exactly as declared
    Static(&'a StaticContent),
}

/// Result of feeding a key press to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The focused widget wrote a new value
    Changed,
    /// Focus moved to another field
    Navigated,
    /// The form was submitted
    Submitted(SubmitEvent),
    /// Nothing in the form used the key
    Ignored,
}

pub type SubmitHandler = Box<dyn FnMut(&Value)>;

pub struct FormContainer {
    title: String,
    state: StateHandle,
    slots: Vec<Slot>,
    /// Indices into `slots` of bound fields, in declaration order
    field_slots: Vec<usize>,
    focused: usize,
    on_submit: SubmitHandler,
}

impl FormContainer {
    /// Compose a form, mounting one adapter per bound child
    pub fn new(state: StateHandle, children: Vec<FormChild>) -> Result<Self, FormError> {
        let mut bound = HashSet::new();
        for child in &children {
            if let FormChild::Field(declaration) = child {
                declaration.validate()?;
                if !bound.insert(declaration.path.canonical()) && !declaration.aliased {
                    return Err(FormError::DuplicatePath {
                        path: declaration.path.to_string(),
                    });
                }
            }
        }

        let mut slots = Vec::with_capacity(children.len());
        let mut field_slots = Vec::new();
        for child in children {
            match child {
                FormChild::Field(declaration) => {
                    field_slots.push(slots.len());
                    slots.push(Slot::Field(FieldAdapter::mount(
                        declaration,
                        Rc::clone(&state),
                    )));
                }
                FormChild::Static(content) => slots.push(Slot::Static(content)),
            }
        }

        tracing::debug!(
            "Composed form with {} field(s), {} static child(ren)",
            field_slots.len(),
            slots.len() - field_slots.len()
        );

        Ok(Self {
            title: String::from("Form"),
            state,
            slots,
            field_slots,
            focused: 0,
            on_submit: Box::new(|_| {}),
        })
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Callback receiving a snapshot of the value tree on submit
    pub fn on_submit(mut self, handler: impl FnMut(&Value) + 'static) -> Self {
        self.on_submit = Box::new(handler);
        self
    }

    pub fn form_title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldAdapter> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Field(adapter) => Some(adapter),
            Slot::Static(_) => None,
        })
    }

    pub fn field(&self, path: &FieldPath) -> Option<&FieldAdapter> {
        self.fields().find(|adapter| adapter.path() == path)
    }

    pub fn focused_field(&self) -> Option<&FieldAdapter> {
        let index = *self.field_slots.get(self.focused)?;
        match &self.slots[index] {
            Slot::Field(adapter) => Some(adapter),
            Slot::Static(_) => None,
        }
    }

    /// Feed a key press: submit chord, focus keys, or the focused widget
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if platform::is_submit_key(&key) {
            return KeyOutcome::Submitted(self.trigger_submit(SubmitSource::Shortcut));
        }

        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                return KeyOutcome::Navigated;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return KeyOutcome::Navigated;
            }
            _ => {}
        }

        let submits_on_enter = match self.focused_field() {
            Some(adapter) => adapter.kind().submits_on_enter(),
            None => return KeyOutcome::Ignored,
        };
        if key.code == KeyCode::Enter && submits_on_enter {
            return KeyOutcome::Submitted(self.trigger_submit(SubmitSource::ImplicitEnter));
        }

        if self.focused_field().is_some_and(|adapter| adapter.handle_key(key)) {
            KeyOutcome::Changed
        } else {
            KeyOutcome::Ignored
        }
    }

    /// Submit from code, as if the user pressed the submit chord
    pub fn request_submit(&mut self) -> SubmitEvent {
        self.trigger_submit(SubmitSource::Programmatic)
    }

    fn trigger_submit(&mut self, source: SubmitSource) -> SubmitEvent {
        let mut event = SubmitEvent::new(source);
        self.submit(&mut event);
        event
    }

    /// Intercept a native submit: suppress its default, run the handler once
    pub fn submit(&mut self, event: &mut SubmitEvent) {
        event.prevent_default();
        let values = self.state.borrow().values();
        tracing::info!("Submitting {} ({:?})", self.title, event.source());
        (self.on_submit)(&values);
    }

    /// Children ready to draw, errors resolved fresh from shared state
    pub fn view(&self) -> Vec<ChildView<'_>> {
        let errors = self.state.borrow().errors();
        let focused_slot = self.field_slots.get(self.focused).copied();

        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Slot::Field(adapter) => {
                    let error = errors.get(adapter.path());
                    ChildView::Field {
                        view: adapter.view(error.as_ref()),
                        focused: focused_slot == Some(index),
                    }
                }
                Slot::Static(content) => ChildView::Static(content),
            })
            .collect()
    }

    /// Whether any bound path changed since the last call
    pub fn take_changed(&self) -> bool {
        self.fields()
            .fold(false, |changed, adapter| adapter.take_changed() || changed)
    }
}

impl FocusRing for FormContainer {
    fn slot_count(&self) -> usize {
        self.field_slots.len()
    }

    fn focused_slot(&self) -> usize {
        self.focused
    }

    fn set_focused_slot(&mut self, index: usize) {
        let index = index.min(self.field_slots.len().saturating_sub(1));
        if index != self.focused {
            if let Some(adapter) = self.focused_field() {
                adapter.blur();
            }
        }
        self.focused = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Choice, FieldProps, SelectOption, WidgetView};
    use crate::state::{ErrorMap, FormStore, SharedFormState};
    use crossterm::event::KeyModifiers;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    fn p(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn store() -> Rc<RefCell<FormStore>> {
        Rc::new(RefCell::new(FormStore::new()))
    }

    fn signup(store: &Rc<RefCell<FormStore>>) -> FormContainer {
        let handle: StateHandle = store.clone();
        FormContainer::new(
            handle,
            vec![
                StaticContent::text("Create your account").into(),
                FieldDeclaration::input("email", "Email").unwrap().required().into(),
                FieldDeclaration::input("name", "Name").unwrap().into(),
                FieldDeclaration::checkbox("terms", "Accept terms").unwrap().into(),
            ],
        )
        .unwrap()
    }

    fn field_views(form: &FormContainer) -> Vec<FieldView> {
        form.view()
            .into_iter()
            .filter_map(|child| match child {
                ChildView::Field { view, .. } => Some(view),
                ChildView::Static(_) => None,
            })
            .collect()
    }

    mod composition {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_mounts_one_adapter_per_field() {
            let store = store();
            let form = signup(&store);
            assert_eq!(form.fields().count(), 3);
            assert_eq!(store.borrow().subscription_count(), 3);
            assert_eq!(form.focused_field().unwrap().path(), &p("email"));
        }

        #[test]
        fn test_duplicate_paths_rejected() {
            let result = FormContainer::new(
                store(),
                vec![
                    FieldDeclaration::input("email", "Email").unwrap().into(),
                    FieldDeclaration::text_area("email", "Email again").unwrap().into(),
                ],
            );
            assert!(matches!(result, Err(FormError::DuplicatePath { .. })));
        }

        #[test]
        fn test_duplicate_detected_across_index_spellings() {
            let result = FormContainer::new(
                store(),
                vec![
                    FieldDeclaration::input("items[0]", "First item").unwrap().into(),
                    FieldDeclaration::input("items.0", "Same item").unwrap().into(),
                ],
            );
            assert!(matches!(result, Err(FormError::DuplicatePath { .. })));
        }

        #[test]
        fn test_aliased_paths_allowed() {
            let result = FormContainer::new(
                store(),
                vec![
                    FieldDeclaration::input("email", "Email").unwrap().into(),
                    FieldDeclaration::input("email", "Confirm").unwrap().aliased().into(),
                ],
            );
            assert!(result.is_ok());
        }

        #[test]
        fn test_misconfigured_radio_rejected() {
            let result = FormContainer::new(
                store(),
                vec![FieldDeclaration::radio("gender", "Gender", vec![]).unwrap().into()],
            );
            assert!(matches!(result, Err(FormError::MissingChoices { .. })));
        }

        #[test]
        fn test_dropping_form_releases_subscriptions() {
            let store = store();
            drop(signup(&store));
            assert_eq!(store.borrow().subscription_count(), 0);
        }

        #[test]
        fn test_static_only_form_ignores_keys() {
            let mut form =
                FormContainer::new(store(), vec![StaticContent::text("Nothing to fill").into()])
                    .unwrap();
            assert!(form.focused_field().is_none());
            assert_eq!(form.handle_key(key(KeyCode::Char('x'))), KeyOutcome::Ignored);
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_error_shown_only_on_its_path() {
            let store = store();
            let form = signup(&store);
            let mut errors = ErrorMap::new();
            errors.insert(&p("email"), "Invalid");
            store.borrow_mut().set_errors(errors);

            let views = field_views(&form);
            assert_eq!(views[0].error.as_deref(), Some("Invalid"));
            assert!(views[1].error.is_none());
            assert!(views[2].error.is_none());
        }

        #[test]
        fn test_error_resolved_fresh_each_render() {
            let store = store();
            let form = signup(&store);
            let mut errors = ErrorMap::new();
            errors.insert(&p("name"), "Required");
            store.borrow_mut().set_errors(errors);
            assert_eq!(field_views(&form)[1].error.as_deref(), Some("Required"));

            store.borrow_mut().clear_error(&p("name"));
            assert!(field_views(&form)[1].error.is_none());
        }
    }

    mod pass_through {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_static_child_is_unchanged() {
            let store = store();
            let form = signup(&store);
            let declared = StaticContent::text("Create your account");
            match &form.view()[0] {
                ChildView::Static(content) => assert_eq!(*content, &declared),
                other => panic!("expected static child, got {other:?}"),
            }
        }

        #[test]
        fn test_static_child_gets_no_error_even_if_map_has_one() {
            let store = store();
            let form = signup(&store);
            let mut errors = ErrorMap::new();
            errors.insert(&p("email"), "Invalid");
            store.borrow_mut().set_errors(errors);
            assert!(matches!(form.view()[0], ChildView::Static(_)));
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_submit_chord_calls_handler_once_and_prevents_default() {
            let store = store();
            let calls = Rc::new(Cell::new(0));
            let counter = Rc::clone(&calls);
            let mut form = signup(&store).on_submit(move |_| counter.set(counter.get() + 1));

            let outcome = form.handle_key(ctrl_s());

            assert_eq!(calls.get(), 1);
            match outcome {
                KeyOutcome::Submitted(event) => {
                    assert!(event.default_prevented());
                    assert_eq!(event.source(), SubmitSource::Shortcut);
                }
                other => panic!("expected submit, got {other:?}"),
            }
        }

        #[test]
        fn test_handler_receives_value_snapshot() {
            let store = store();
            let received = Rc::new(RefCell::new(Value::Null));
            let sink = Rc::clone(&received);
            let mut form =
                signup(&store).on_submit(move |values| *sink.borrow_mut() = values.clone());

            form.handle_key(key(KeyCode::Char('a')));
            form.handle_key(key(KeyCode::Char('@')));
            form.request_submit();

            assert_eq!(*received.borrow(), json!({"email": "a@"}));
        }

        #[test]
        fn test_enter_in_input_submits() {
            let store = store();
            let calls = Rc::new(Cell::new(0));
            let counter = Rc::clone(&calls);
            let mut form = signup(&store).on_submit(move |_| counter.set(counter.get() + 1));

            let outcome = form.handle_key(key(KeyCode::Enter));
            assert!(matches!(
                outcome,
                KeyOutcome::Submitted(ref e) if e.source() == SubmitSource::ImplicitEnter
            ));
            assert_eq!(calls.get(), 1);
        }

        #[test]
        fn test_enter_in_checkbox_does_not_submit() {
            let store = store();
            let calls = Rc::new(Cell::new(0));
            let counter = Rc::clone(&calls);
            let mut form = signup(&store).on_submit(move |_| counter.set(counter.get() + 1));
            form.set_focused_slot(2);

            assert_eq!(form.handle_key(key(KeyCode::Enter)), KeyOutcome::Ignored);
            assert_eq!(calls.get(), 0);
        }

        #[test]
        fn test_default_handler_is_noop() {
            let store = store();
            let mut form = signup(&store);
            assert!(form.request_submit().default_prevented());
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_tab_cycles_bound_fields_only() {
            let store = store();
            let mut form = signup(&store);
            let mut visited = vec![];
            for _ in 0..4 {
                visited.push(form.focused_field().unwrap().path().to_string());
                assert_eq!(form.handle_key(key(KeyCode::Tab)), KeyOutcome::Navigated);
            }
            assert_eq!(visited, vec!["email", "name", "terms", "email"]);
        }

        #[test]
        fn test_back_tab_wraps() {
            let store = store();
            let mut form = signup(&store);
            form.handle_key(key(KeyCode::BackTab));
            assert_eq!(form.focused_field().unwrap().path(), &p("terms"));
        }

        #[test]
        fn test_leaving_a_field_marks_it_touched() {
            let store = store();
            let mut form = signup(&store);
            form.handle_key(key(KeyCode::Tab));
            assert!(store.borrow().is_touched(&p("email")));
            assert!(!store.borrow().is_touched(&p("name")));
        }

        #[test]
        fn test_focus_flag_in_view() {
            let store = store();
            let mut form = signup(&store);
            form.handle_key(key(KeyCode::Tab));
            let focused: Vec<bool> = form
                .view()
                .iter()
                .filter_map(|child| match child {
                    ChildView::Field { focused, .. } => Some(*focused),
                    ChildView::Static(_) => None,
                })
                .collect();
            assert_eq!(focused, vec![false, true, false]);
        }
    }

    mod binding {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_keys_reach_focused_widget_only() {
            let store = store();
            let mut form = signup(&store);
            assert_eq!(form.handle_key(key(KeyCode::Char('x'))), KeyOutcome::Changed);
            assert_eq!(store.borrow().value_at(&p("email")), Some(json!("x")));
            assert!(store.borrow().value_at(&p("name")).is_none());
        }

        #[test]
        fn test_change_flag_after_write() {
            let store = store();
            let mut form = signup(&store);
            assert!(!form.take_changed());
            form.handle_key(key(KeyCode::Char('x')));
            assert!(form.take_changed());
            assert!(!form.take_changed());
        }

        #[test]
        fn test_choice_group_selection_inside_form() {
            let store = Rc::new(RefCell::new(FormStore::with_values(json!({"gender": "f"}))));
            let handle: StateHandle = store.clone();
            let mut form = FormContainer::new(
                handle,
                vec![FieldDeclaration::radio(
                    "gender",
                    "Gender",
                    vec![Choice::new("m", "Male"), Choice::new("f", "Female")],
                )
                .unwrap()
                .into()],
            )
            .unwrap();

            let view = &field_views(&form)[0];
            assert_eq!(view.checked_choice().unwrap().label, "Female");

            form.handle_key(key(KeyCode::Char('1')));
            assert_eq!(store.borrow().value_at(&p("gender")), Some(json!("m")));
        }

        #[test]
        fn test_disabled_select_keeps_value() {
            let store = Rc::new(RefCell::new(FormStore::with_values(json!({"c": "de"}))));
            let handle: StateHandle = store.clone();
            let mut form = FormContainer::new(
                handle,
                vec![FieldDeclaration::select(
                    "c",
                    "Country",
                    vec![SelectOption::new("de", "Germany"), SelectOption::new("fr", "France")],
                )
                .unwrap()
                .props(FieldProps {
                    disabled: true,
                    height: None,
                })
                .into()],
            )
            .unwrap();

            assert_eq!(form.handle_key(key(KeyCode::Down)), KeyOutcome::Ignored);
            let views = field_views(&form);
            let WidgetView::Select { options, .. } = &views[0].widget else {
                panic!("expected select view");
            };
            assert!(options[0].selected);
        }
    }
}
