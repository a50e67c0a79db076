//! Submit trigger boundary

/// What raised the submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitSource {
    /// The submit chord (Ctrl+S)
    Shortcut,
    /// Enter inside a single-line input
    ImplicitEnter,
    /// Called from code
    Programmatic,
}

/// A native submit notification. The host surface only runs its own
/// default handling (navigation, quitting, ...) when the form did not
/// prevent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    source: SubmitSource,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(source: SubmitSource) -> Self {
        Self {
            source,
            default_prevented: false,
        }
    }

    pub fn source(&self) -> SubmitSource {
        self.source
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
