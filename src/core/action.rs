//! # Actions
//!
//! Menu entries name their behavior with a string (`"user.Create"`). At
//! startup every name is bound to an [`Action`] in an [`ActionTable`]; the
//! navigator resolves names through the table when an entry is selected.
//!
//! ```text
//! "collection.Create" ──► ActionTable ──► &dyn Action ──► invoke(console)
//!                                                              │
//!                                               Control::Continue | Control::Exit
//! ```
//!
//! An action is synchronous from the navigator's point of view. It may prompt
//! on the console and talk to external services before returning. Its own
//! failures are its own business: it reports them and returns `Continue`.

use std::collections::HashMap;

/// What the navigator does after an action returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Leave the navigator entirely, from any depth.
    Exit,
}

pub trait Action {
    fn invoke(&self, console: &mut dyn crate::core::console::Console) -> Control;
}

/// Name → action bindings, assembled once at startup.
#[derive(Default)]
pub struct ActionTable {
    actions: HashMap<String, Box<dyn Action>>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing any earlier binding of the same name.
    pub fn register(&mut self, name: impl Into<String>, action: impl Action + 'static) {
        self.actions.insert(name.into(), Box::new(action));
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, action: impl Action + 'static) -> Self {
        self.register(name, action);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&dyn Action> {
        self.actions.get(name).map(|action| action.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names from `wanted` with no binding, in order, without repeats.
    pub fn missing<'a>(&self, wanted: &[&'a str]) -> Vec<&'a str> {
        let mut missing: Vec<&'a str> = Vec::new();
        for &name in wanted {
            if !self.contains(name) && !missing.contains(&name) {
                missing.push(name);
            }
        }
        missing
    }
}
