//! Preferences dialog and page bindings
//!
//! A [`PageContext`] owns one built page and the settings handlers that keep
//! its widgets in sync with the store. Bindings are two-way: user edits write
//! the store, and any store write (a preset, a reset, another open page, the
//! command line) repaints the widget. A repaint does not write back: each
//! binding ignores its widget's signals while it is being synced, so the
//! store keeps the exact text that was written. Dropping the context
//! disconnects its store handlers.

use crate::builder::Builder;
use crate::template::{page_resource_path, Resources};
use crate::widget::Page;
use pyre_core::{Color, HandlerId, PyreError, Result};
use pyre_settings::{SettingType, SettingValue, Settings};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};

/// The context handed to an effect when its settings page is requested
pub struct PreferencesDialog {
    settings: Settings,
    resources: Resources,
}

impl PreferencesDialog {
    pub fn new(settings: Settings, resources: Resources) -> Self {
        Self {
            settings,
            resources,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Build a fresh page from the template derived from `nick`
    pub fn load_page(&self, nick: &str) -> Result<PageContext> {
        let path = page_resource_path(nick);
        let builder = Builder::from_resource(&self.resources, &path)?;
        debug!(nick, path = path.as_str(), "loaded preferences page");
        Ok(PageContext {
            nick: nick.to_string(),
            builder,
            settings: self.settings.clone(),
            store_handlers: RefCell::new(Vec::new()),
        })
    }
}

/// One bound settings page
pub struct PageContext {
    nick: String,
    builder: Builder,
    settings: Settings,
    store_handlers: RefCell<Vec<HandlerId>>,
}

impl PageContext {
    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The page root widget handed to the host
    pub fn page(&self) -> Rc<Page> {
        self.builder.page()
    }

    /// Number of standing store → widget bindings
    pub fn binding_count(&self) -> usize {
        self.store_handlers.borrow().len()
    }

    /// Bind the adjustment with id `key` to a double or int setting
    pub fn bind_adjustment(&self, key: &str) -> Result<()> {
        let entry = self.settings.schema().require(key)?;
        let is_int = match entry.ty {
            SettingType::Double => false,
            SettingType::Int => true,
            ref other => return Err(type_mismatch(key, "double", other)),
        };
        let adjustment = self.builder.adjustment(key)?;
        if let Some(v) = self.settings.value(key)?.as_f64() {
            adjustment.set_value(v);
        }

        let syncing = Rc::new(Cell::new(false));
        let settings = self.settings.clone();
        let k = key.to_string();
        let guard = syncing.clone();
        adjustment.connect_value_changed(move |v| {
            if guard.get() {
                return;
            }
            let value = if is_int {
                SettingValue::Int(v.round() as i64)
            } else {
                SettingValue::Double(*v)
            };
            if let Err(e) = settings.set(&k, value) {
                warn!(key = k.as_str(), error = %e, "rejected adjustment value");
            }
        });

        let weak = Rc::downgrade(&adjustment);
        self.watch(key, move |value| {
            if let (Some(adjustment), Some(v)) = (weak.upgrade(), value.as_f64()) {
                sync(&syncing, || adjustment.set_value(v));
            }
        });
        Ok(())
    }

    /// Bind the switch with id `key` to a boolean setting
    pub fn bind_switch(&self, key: &str) -> Result<()> {
        let entry = self.settings.schema().require(key)?;
        if entry.ty != SettingType::Boolean {
            return Err(type_mismatch(key, "boolean", &entry.ty));
        }
        let switch = self.builder.switch(key)?;
        switch.set_active(self.settings.get_boolean(key)?);

        let syncing = Rc::new(Cell::new(false));
        let settings = self.settings.clone();
        let k = key.to_string();
        let guard = syncing.clone();
        switch.connect_toggled(move |active| {
            if guard.get() {
                return;
            }
            if let Err(e) = settings.set_boolean(&k, *active) {
                warn!(key = k.as_str(), error = %e, "rejected switch value");
            }
        });

        let weak = Rc::downgrade(&switch);
        self.watch(key, move |value| {
            if let (Some(switch), Some(active)) = (weak.upgrade(), value.as_bool()) {
                sync(&syncing, || switch.set_active(active));
            }
        });
        Ok(())
    }

    /// Bind the color button with id `key` to a color setting
    pub fn bind_color_button(&self, key: &str) -> Result<()> {
        let entry = self.settings.schema().require(key)?;
        if entry.ty != SettingType::Color {
            return Err(type_mismatch(key, "color", &entry.ty));
        }
        let button = self.builder.color_button(key)?;
        button.set_rgba(self.settings.get_color(key)?);

        let syncing = Rc::new(Cell::new(false));
        let settings = self.settings.clone();
        let k = key.to_string();
        let guard = syncing.clone();
        button.connect_color_set(move |color| {
            if guard.get() {
                return;
            }
            if let Err(e) = settings.set_color(&k, *color) {
                warn!(key = k.as_str(), error = %e, "rejected color value");
            }
        });

        let weak = Rc::downgrade(&button);
        self.watch(key, move |value| {
            let Some(button) = weak.upgrade() else {
                return;
            };
            if let Some(color) = value.as_str().and_then(|s| Color::parse(s).ok()) {
                sync(&syncing, || button.set_rgba(color));
            }
        });
        Ok(())
    }

    /// Clicking the button `button_id` resets each of `keys`, in order
    pub fn bind_reset_button(&self, button_id: &str, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.settings.schema().require(key)?;
        }
        let button = self.builder.button(button_id)?;
        let settings = self.settings.clone();
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        button.connect_clicked(move |_| {
            for key in &keys {
                if let Err(e) = settings.reset(key) {
                    warn!(key = key.as_str(), error = %e, "failed to reset setting");
                }
            }
        });
        Ok(())
    }

    fn watch<F>(&self, key: &str, on_change: F)
    where
        F: Fn(&SettingValue) + 'static,
    {
        let id = self
            .settings
            .connect_changed(Some(key), move |_, value| on_change(value));
        self.store_handlers.borrow_mut().push(id);
    }
}

impl Drop for PageContext {
    fn drop(&mut self) {
        for id in self.store_handlers.borrow_mut().drain(..) {
            self.settings.disconnect(id);
        }
    }
}

/// Update a widget from the store with its store-writing handler muted
fn sync(syncing: &Cell<bool>, update: impl FnOnce()) {
    syncing.set(true);
    update();
    syncing.set(false);
}

fn type_mismatch(key: &str, expected: &str, got: &SettingType) -> PyreError {
    PyreError::TypeMismatch {
        key: key.to_string(),
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    }
}
