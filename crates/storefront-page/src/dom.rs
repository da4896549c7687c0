//! Handles to the page nodes the resolvers read and write.
//!
//! Resolvers never look nodes up themselves; every handle is injected at
//! construction. [`MemoryElement`] backs headless use and tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One DOM node as seen by a resolver.
pub trait Element: Send + Sync {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    /// Form value; for a radio group, the value of the checked radio.
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn set_visible(&self, visible: bool);
    fn set_required(&self, required: bool);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
    /// Toggles the `active` class.
    fn set_active(&self, active: bool);
}

pub type Handle = Arc<dyn Element>;

/// Snapshot of a [`MemoryElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeState {
    pub text: String,
    pub value: String,
    pub visible: bool,
    pub required: bool,
    pub disabled: bool,
    pub active: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            text: String::new(),
            value: String::new(),
            visible: true,
            required: false,
            disabled: false,
            active: false,
        }
    }
}

/// In-memory [`Element`]. Starts visible, enabled and empty.
#[derive(Debug, Default)]
pub struct MemoryElement {
    state: Mutex<NodeState>,
}

impl MemoryElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let node = Self::new();
        node.set_text(text);
        node
    }

    #[must_use]
    pub fn with_value(value: &str) -> Self {
        let node = Self::new();
        node.set_value(value);
        node
    }

    #[must_use]
    pub fn snapshot(&self) -> NodeState {
        self.lock().clone()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.lock().required
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    fn lock(&self) -> MutexGuard<'_, NodeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Element for MemoryElement {
    fn text(&self) -> String {
        self.lock().text.clone()
    }

    fn set_text(&self, text: &str) {
        text.clone_into(&mut self.lock().text);
    }

    fn value(&self) -> String {
        self.lock().value.clone()
    }

    fn set_value(&self, value: &str) {
        value.clone_into(&mut self.lock().value);
    }

    fn set_visible(&self, visible: bool) {
        self.lock().visible = visible;
    }

    fn set_required(&self, required: bool) {
        self.lock().required = required;
    }

    fn is_disabled(&self) -> bool {
        self.lock().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.lock().disabled = disabled;
    }

    fn set_active(&self, active: bool) {
        self.lock().active = active;
    }
}
