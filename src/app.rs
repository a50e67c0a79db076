//! Demo application: a sign-up form bound to an in-memory store

use crate::config::FormConfig;
use crate::error::FormError;
use crate::fields::{Choice, FieldDeclaration, FieldKind, InputConfig, RadioConfig, SelectOption};
use crate::form::{FormChild, FormContainer, KeyOutcome, StaticContent};
use crate::state::{ErrorMap, FieldPath, FormStore, SharedFormState, StateHandle};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Color;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Dialog shown after a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub accent: Color,
}

/// Main application struct
pub struct App {
    store: Rc<RefCell<FormStore>>,
    pub form: FormContainer,
    pub config: FormConfig,
    /// Pending submit notice, shared with the submit handler
    notice: Rc<RefCell<Option<Notice>>>,
    /// Re-validate on every change once the user has tried to submit
    submitted_once: Rc<Cell<bool>>,
    quit: bool,
}

impl App {
    /// Create a new App with the sample form
    pub fn new(config: FormConfig) -> Result<Self, FormError> {
        let store = Rc::new(RefCell::new(FormStore::new()));
        let notice = Rc::new(RefCell::new(None));
        let submitted_once = Rc::new(Cell::new(false));

        let handle: StateHandle = store.clone();
        let form = FormContainer::new(handle, sample_form()?)?
            .title("Create Account")
            .on_submit({
                let store = Rc::clone(&store);
                let notice = Rc::clone(&notice);
                let submitted_once = Rc::clone(&submitted_once);
                move |values: &Value| {
                    submitted_once.set(true);
                    let errors = validate(values);
                    *notice.borrow_mut() = Some(submit_notice(values, &errors));
                    store.borrow_mut().set_errors(errors);
                }
            });

        Ok(Self {
            store,
            form,
            config,
            notice,
            submitted_once,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice.borrow().clone()
    }

    /// Current value tree
    pub fn values(&self) -> Value {
        self.store.borrow().values()
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.notice.borrow().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                *self.notice.borrow_mut() = None;
            }
            return;
        }

        if key.code == KeyCode::Esc {
            self.quit = true;
            return;
        }

        if let KeyOutcome::Changed = self.form.handle_key(key) {
            if self.submitted_once.get() {
                let errors = validate(&self.values());
                self.store.borrow_mut().set_errors(errors);
            }
        }
    }
}

fn sample_form() -> Result<Vec<FormChild>, FormError> {
    Ok(vec![
        StaticContent::text("Tell us a little about yourself.").into(),
        FieldDeclaration::input("name", "Name")?.required().into(),
        FieldDeclaration::input("email", "Email")?
            .required()
            .child("We never share your address")
            .into(),
        FieldDeclaration::new(
            "password",
            "Password",
            FieldKind::PlainValue(InputConfig {
                placeholder: Some("at least 8 characters".into()),
                masked: true,
            }),
        )?
        .into(),
        FieldDeclaration::text_area("profile.bio", "Bio")?.into(),
        FieldDeclaration::select(
            "address.country",
            "Country",
            vec![
                SelectOption::new("de", "Germany"),
                SelectOption::new("fr", "France"),
                SelectOption::new("jp", "Japan"),
            ],
        )?
        .default_value("de")
        .into(),
        FieldDeclaration::new(
            "gender",
            "Gender",
            FieldKind::ChoiceGroup(RadioConfig {
                choices: vec![Choice::new("m", "Male"), Choice::new("f", "Female")],
                inline: true,
            }),
        )?
        .required()
        .into(),
        FieldDeclaration::date_time("birthday", "Birthday")?.into(),
        FieldDeclaration::editor("notes", "Notes")?.into(),
        FieldDeclaration::checkbox("terms", "I accept the terms")?
            .required()
            .default_value(false)
            .into(),
    ])
}

/// Toy validation pass producing an error map for the sample form
pub fn validate(values: &Value) -> ErrorMap {
    let text = |key: &str| values.get(key).and_then(Value::as_str).unwrap_or_default();
    let mut errors = ErrorMap::new();

    if text("name").trim().is_empty() {
        flag(&mut errors, "name", "Name is required");
    }
    if !text("email").contains('@') {
        flag(&mut errors, "email", "Invalid email address");
    }
    let password = text("password");
    if !password.is_empty() && password.chars().count() < 8 {
        flag(&mut errors, "password", "Password is too short");
    }
    if values.get("gender").map_or(true, Value::is_null) {
        flag(&mut errors, "gender", "Please pick one");
    }
    if values.get("terms") != Some(&Value::Bool(true)) {
        flag(&mut errors, "terms", "You must accept the terms");
    }

    errors
}

fn flag(errors: &mut ErrorMap, raw: &str, message: &str) {
    match FieldPath::parse(raw) {
        Ok(path) => errors.insert(&path, message),
        Err(e) => tracing::warn!("Skipping error for {raw}: {e}"),
    }
}

fn submit_notice(values: &Value, errors: &ErrorMap) -> Notice {
    if errors.is_empty() {
        let body = serde_json::to_string_pretty(values).unwrap_or_else(|_| values.to_string());
        Notice {
            title: "Submitted".into(),
            message: body,
            accent: Color::Green,
        }
    } else {
        Notice {
            title: "Please fix the highlighted fields".into(),
            message: format!("{} field(s) need attention.", errors.len()),
            accent: Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FocusRing;
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn submit(app: &mut App) {
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    }

    fn error_at(app: &App, raw: &str) -> Option<String> {
        app.store
            .borrow()
            .errors()
            .get(&path(raw))
            .map(|e| e.message)
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_form_errors() {
            let errors = validate(&json!({"name": "", "email": "", "terms": false}));
            assert_eq!(errors.len(), 4);
            assert!(errors.get(&path("password")).is_none());
        }

        #[test]
        fn test_valid_form_has_no_errors() {
            let errors = validate(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "correct horse",
                "gender": "f",
                "terms": true
            }));
            assert!(errors.is_empty());
        }

        #[test]
        fn test_short_password() {
            let errors = validate(&json!({"password": "abc"}));
            assert_eq!(
                errors.get(&path("password")).map(|e| e.message),
                Some("Password is too short".to_string())
            );
        }
    }

    mod interaction {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_defaults_seeded_on_start() {
            let app = App::new(FormConfig::default()).unwrap();
            assert_eq!(app.values(), json!({"address": {"country": "de"}, "terms": false}));
        }

        #[test]
        fn test_submit_with_errors_shows_notice_and_alerts() {
            let mut app = App::new(FormConfig::default()).unwrap();
            submit(&mut app);

            let notice = app.notice().unwrap();
            assert_eq!(notice.accent, Color::Red);
            assert_eq!(error_at(&app, "name").as_deref(), Some("Name is required"));
            assert!(error_at(&app, "password").is_none());
        }

        #[test]
        fn test_notice_swallows_keys_until_dismissed() {
            let mut app = App::new(FormConfig::default()).unwrap();
            submit(&mut app);
            type_text(&mut app, "x");
            assert!(app.values().get("name").is_none());

            app.handle_key(key(KeyCode::Enter));
            assert!(app.notice().is_none());
            assert!(!app.should_quit());
        }

        #[test]
        fn test_errors_revalidated_after_first_submit() {
            let mut app = App::new(FormConfig::default()).unwrap();
            submit(&mut app);
            app.handle_key(key(KeyCode::Enter));

            type_text(&mut app, "Ada");
            assert!(error_at(&app, "name").is_none());
        }

        #[test]
        fn test_no_validation_before_submit() {
            let mut app = App::new(FormConfig::default()).unwrap();
            type_text(&mut app, "Ada");
            assert!(app.store.borrow().errors().is_empty());
        }

        #[test]
        fn test_successful_submit() {
            let mut app = App::new(FormConfig::default()).unwrap();
            type_text(&mut app, "Ada");
            app.form.set_focused_slot(1);
            type_text(&mut app, "ada@example.com");
            app.form.set_focused_slot(5);
            app.handle_key(key(KeyCode::Char('2')));
            app.form.set_focused_slot(8);
            app.handle_key(key(KeyCode::Char(' ')));
            submit(&mut app);

            let notice = app.notice().unwrap();
            assert_eq!(notice.title, "Submitted");
            assert!(notice.message.contains("ada@example.com"));
            assert_eq!(app.values()["gender"], json!("f"));
        }

        #[test]
        fn test_esc_quits() {
            let mut app = App::new(FormConfig::default()).unwrap();
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }
    }
}
