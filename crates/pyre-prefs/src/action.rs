//! Actions, action groups and menu models

use crate::signal::Signal;
use pyre_core::HandlerId;
use std::cell::RefCell;
use std::rc::Rc;

/// A named, stateless trigger
pub struct Action {
    name: String,
    activate: Signal<()>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activate: Signal::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn activate(&self) {
        self.activate.emit(&());
    }

    pub fn connect_activate<F: Fn(&()) + 'static>(&self, f: F) -> HandlerId {
        self.activate.connect(f)
    }
}

/// An ordered set of actions that can be attached to a [`Window`](crate::Window)
#[derive(Default)]
pub struct ActionGroup {
    actions: RefCell<Vec<Rc<Action>>>,
}

impl ActionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action, replacing one with the same name
    pub fn add_action(&self, action: Rc<Action>) {
        let mut actions = self.actions.borrow_mut();
        match actions.iter().position(|a| a.name() == action.name()) {
            Some(i) => actions[i] = action,
            None => actions.push(action),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Rc<Action>> {
        self.actions
            .borrow()
            .iter()
            .find(|a| a.name() == name)
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.actions
            .borrow()
            .iter()
            .map(|a| a.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.actions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.borrow().is_empty()
    }
}

/// One entry of a menu model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// `"<group>.<action>"`
    pub detailed_action: String,
}

/// An ordered menu model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, label: impl Into<String>, detailed_action: impl Into<String>) {
        self.items.push(MenuItem {
            label: label.into(),
            detailed_action: detailed_action.into(),
        });
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
