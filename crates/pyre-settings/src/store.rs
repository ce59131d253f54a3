//! Settings store — typed key-value access with change notification.
//!
//! The store is shared by every effect, every open preferences page and the
//! animation code, all on one thread. Handles are `Rc<SettingsStore>` and every
//! method takes `&self`. Change handlers run synchronously after a write has
//! landed and outside any internal borrow, so a handler may read or write the
//! store again.

use crate::schema::{Schema, SettingSchema, SettingType};
use crate::value::SettingValue;
use pyre_core::{Color, HandlerId, PyreError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Shared handle to a settings store
pub type Settings = Rc<SettingsStore>;

type ChangeCallback = Rc<dyn Fn(&str, &SettingValue)>;

struct ChangeHandler {
    id: HandlerId,
    /// `None` listens to every key
    key: Option<String>,
    callback: ChangeCallback,
}

/// Typed settings backed by a [`Schema`].
///
/// Only values that were explicitly written are held; every other key reads
/// as its declared default.
pub struct SettingsStore {
    schema: Schema,
    values: RefCell<HashMap<String, SettingValue>>,
    handlers: RefCell<Vec<ChangeHandler>>,
}

impl SettingsStore {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            values: RefCell::new(HashMap::new()),
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Create a shared store handle
    pub fn shared(schema: Schema) -> Settings {
        Rc::new(Self::new(schema))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// All keys in schema order
    pub fn keys(&self) -> Vec<&str> {
        self.schema.keys()
    }

    /// Current value of a key (explicit or default)
    pub fn value(&self, key: &str) -> Result<SettingValue> {
        let entry = self.schema.require(key)?;
        Ok(self.current(entry))
    }

    pub fn get_double(&self, key: &str) -> Result<f64> {
        let entry = self.typed(key, |ty| *ty == SettingType::Double, "double")?;
        self.current(entry)
            .as_f64()
            .ok_or_else(|| mismatch(entry, "double"))
    }

    pub fn get_boolean(&self, key: &str) -> Result<bool> {
        let entry = self.typed(key, |ty| *ty == SettingType::Boolean, "boolean")?;
        self.current(entry)
            .as_bool()
            .ok_or_else(|| mismatch(entry, "boolean"))
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        let entry = self.typed(key, |ty| *ty == SettingType::Int, "int")?;
        self.current(entry)
            .as_i64()
            .ok_or_else(|| mismatch(entry, "int"))
    }

    /// Read a string, color or enum key as its raw string
    pub fn get_string(&self, key: &str) -> Result<String> {
        let entry = self.typed(key, SettingType::is_string_like, "string")?;
        match self.current(entry) {
            SettingValue::String(s) => Ok(s),
            _ => Err(mismatch(entry, "string")),
        }
    }

    /// Read a color key, decoding its textual form
    pub fn get_color(&self, key: &str) -> Result<Color> {
        let entry = self.typed(key, |ty| *ty == SettingType::Color, "color")?;
        match self.current(entry) {
            SettingValue::String(s) => Color::parse(&s),
            _ => Err(mismatch(entry, "color")),
        }
    }

    pub fn set_double(&self, key: &str, value: f64) -> Result<()> {
        self.set(key, SettingValue::Double(value))
    }

    pub fn set_boolean(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, SettingValue::Boolean(value))
    }

    pub fn set_int(&self, key: &str, value: i64) -> Result<()> {
        self.set(key, SettingValue::Int(value))
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, SettingValue::String(value.to_string()))
    }

    /// Write a color key in its `rgb()`/`rgba()` encoding.
    ///
    /// Nothing is written when the stored text already decodes to `color`,
    /// so equivalent spellings such as `rgba(76, 51, 25, 0.0)` are kept.
    pub fn set_color(&self, key: &str, color: Color) -> Result<()> {
        let entry = self.typed(key, |ty| *ty == SettingType::Color, "color")?;
        if let Some(current) = self.current(entry).as_str() {
            if Color::parse(current).is_ok_and(|c| c == color) {
                return Ok(());
            }
        }
        self.write(entry, SettingValue::String(color.to_css()))
    }

    /// Write any value, type-checked against the schema
    pub fn set(&self, key: &str, value: SettingValue) -> Result<()> {
        let entry = self.schema.require(key)?;
        self.write(entry, value)
    }

    /// Restore the declared default of a key
    pub fn reset(&self, key: &str) -> Result<()> {
        let entry = self.schema.require(key)?;
        let before = self.current(entry);
        self.values.borrow_mut().remove(key);
        if before != entry.default {
            debug!(key, "setting reset to default");
            self.notify(key, &entry.default);
        }
        Ok(())
    }

    /// Whether the key currently holds its declared default
    pub fn is_default(&self, key: &str) -> Result<bool> {
        let entry = self.schema.require(key)?;
        Ok(self.current(entry) == entry.default)
    }

    /// Listen for changes. With `Some(key)` only that key is reported.
    pub fn connect_changed<F>(&self, key: Option<&str>, callback: F) -> HandlerId
    where
        F: Fn(&str, &SettingValue) + 'static,
    {
        let id = HandlerId::next();
        self.handlers.borrow_mut().push(ChangeHandler {
            id,
            key: key.map(str::to_string),
            callback: Rc::new(callback),
        });
        id
    }

    /// Remove a change handler. Returns whether it was connected.
    pub fn disconnect(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|h| h.id != id);
        handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Save non-default values to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let mut table = toml::map::Map::new();
        for entry in self.schema.iter() {
            let value = self.current(entry);
            if value != entry.default {
                table.insert(entry.key.clone(), value.to_toml());
            }
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(&table)?;
        std::fs::write(path, content)?;
        info!(path = %path.display(), count = table.len(), "saved settings");
        Ok(())
    }

    /// Load values from a TOML file, replacing all current values.
    ///
    /// Keys the schema does not know are skipped with a warning; known keys
    /// with invalid values fail the whole load and leave the store untouched.
    pub fn load_from_file(&self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        self.load_from_str(&content)?;
        info!(path = %path.display(), "loaded settings");
        Ok(())
    }

    /// Load values from TOML text, replacing all current values.
    pub fn load_from_str(&self, content: &str) -> Result<()> {
        let table: toml::map::Map<String, toml::Value> = toml::from_str(content)?;

        let mut loaded = HashMap::new();
        for (key, raw) in &table {
            let Some(entry) = self.schema.get(key) else {
                warn!(key = key.as_str(), "ignoring unknown settings key");
                continue;
            };
            loaded.insert(key.clone(), entry.value_from_toml(raw)?);
        }

        let before: Vec<(String, SettingValue)> = self
            .schema
            .iter()
            .map(|e| (e.key.clone(), self.current(e)))
            .collect();

        *self.values.borrow_mut() = loaded;

        for (key, old) in before {
            let new = self.value(&key)?;
            if new != old {
                self.notify(&key, &new);
            }
        }
        Ok(())
    }

    fn typed(
        &self,
        key: &str,
        accepts: impl Fn(&SettingType) -> bool,
        expected: &str,
    ) -> Result<&SettingSchema> {
        let entry = self.schema.require(key)?;
        if !accepts(&entry.ty) {
            return Err(PyreError::TypeMismatch {
                key: key.to_string(),
                expected: expected.to_string(),
                got: entry.ty.type_name().to_string(),
            });
        }
        Ok(entry)
    }

    fn current(&self, entry: &SettingSchema) -> SettingValue {
        self.values
            .borrow()
            .get(&entry.key)
            .cloned()
            .unwrap_or_else(|| entry.default.clone())
    }

    fn write(&self, entry: &SettingSchema, value: SettingValue) -> Result<()> {
        let value = entry.check(value)?;
        if self.current(entry) == value {
            return Ok(());
        }
        self.values
            .borrow_mut()
            .insert(entry.key.clone(), value.clone());
        debug!(key = entry.key.as_str(), %value, "setting changed");
        self.notify(&entry.key, &value);
        Ok(())
    }

    fn notify(&self, key: &str, value: &SettingValue) {
        let callbacks: Vec<ChangeCallback> = self
            .handlers
            .borrow()
            .iter()
            .filter(|h| h.key.as_deref().is_none_or(|k| k == key))
            .map(|h| h.callback.clone())
            .collect();
        for callback in callbacks {
            callback(key, value);
        }
    }
}

fn mismatch(entry: &SettingSchema, expected: &str) -> PyreError {
    PyreError::TypeMismatch {
        key: entry.key.clone(),
        expected: expected.to_string(),
        got: entry.ty.type_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn store() -> Settings {
        let schema = Schema::from_toml_str(
            r#"
[[key]]
name = "flame-scale"
type = "double"
default = 1.0
min = 0.1
max = 2.0

[[key]]
name = "flame-3d-noise"
type = "boolean"
default = true

[[key]]
name = "fire-color-1"
type = "color"
default = "rgba(76, 51, 25, 0.0)"

[[key]]
name = "count"
type = "int"
default = 3
"#,
        )
        .unwrap();
        SettingsStore::shared(schema)
    }

    #[test]
    fn test_defaults() {
        let s = store();
        assert_eq!(s.get_double("flame-scale").unwrap(), 1.0);
        assert!(s.get_boolean("flame-3d-noise").unwrap());
        assert_eq!(s.get_string("fire-color-1").unwrap(), "rgba(76, 51, 25, 0.0)");
        assert_eq!(s.get_int("count").unwrap(), 3);
        assert!(s.is_default("flame-scale").unwrap());
    }

    #[test]
    fn test_set_and_get() {
        let s = store();
        s.set_double("flame-scale", 1.5).unwrap();
        assert_eq!(s.get_double("flame-scale").unwrap(), 1.5);
        assert!(!s.is_default("flame-scale").unwrap());

        s.set_string("fire-color-1", "rgb(255,200,0)").unwrap();
        let c = s.get_color("fire-color-1").unwrap();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_missing_key_is_error() {
        let s = store();
        assert!(matches!(
            s.get_double("flame-speed"),
            Err(PyreError::KeyNotFound(_))
        ));
        assert!(matches!(
            s.set_double("flame-speed", 1.0),
            Err(PyreError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_typed_access_mismatch() {
        let s = store();
        assert!(matches!(
            s.get_boolean("flame-scale"),
            Err(PyreError::TypeMismatch { .. })
        ));
        assert!(matches!(
            s.set_boolean("flame-scale", true),
            Err(PyreError::TypeMismatch { .. })
        ));
        assert!(matches!(
            s.get_color("flame-scale"),
            Err(PyreError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_writes_leave_value() {
        let s = store();
        assert!(s.set_double("flame-scale", 9.0).is_err());
        assert!(s.set_string("fire-color-1", "blue").is_err());
        assert_eq!(s.get_double("flame-scale").unwrap(), 1.0);
        assert_eq!(s.get_string("fire-color-1").unwrap(), "rgba(76, 51, 25, 0.0)");
    }

    #[test]
    fn test_reset_restores_default() {
        let s = store();
        s.set_string("fire-color-1", "rgb(1,2,3)").unwrap();
        s.reset("fire-color-1").unwrap();
        assert_eq!(s.get_string("fire-color-1").unwrap(), "rgba(76, 51, 25, 0.0)");
        assert!(s.is_default("fire-color-1").unwrap());
    }

    #[test]
    fn test_set_color_keeps_equivalent_text() {
        let s = store();
        s.set_color("fire-color-1", Color::from_rgba8(76, 51, 25, 0.0))
            .unwrap();
        assert_eq!(s.get_string("fire-color-1").unwrap(), "rgba(76, 51, 25, 0.0)");
        assert!(s.is_default("fire-color-1").unwrap());

        s.set_color("fire-color-1", Color::WHITE).unwrap();
        assert_eq!(s.get_string("fire-color-1").unwrap(), "rgb(255,255,255)");
    }

    #[test]
    fn test_change_notification() {
        let s = store();
        let hits = Rc::new(Cell::new(0));
        let all = Rc::new(Cell::new(0));

        let h = hits.clone();
        s.connect_changed(Some("flame-scale"), move |key, value| {
            assert_eq!(key, "flame-scale");
            assert_eq!(value, &SettingValue::Double(0.5));
            h.set(h.get() + 1);
        });
        let a = all.clone();
        s.connect_changed(None, move |_, _| a.set(a.get() + 1));

        s.set_double("flame-scale", 0.5).unwrap();
        // unchanged writes are silent
        s.set_double("flame-scale", 0.5).unwrap();
        s.set_boolean("flame-3d-noise", false).unwrap();

        assert_eq!(hits.get(), 1);
        assert_eq!(all.get(), 2);
    }

    #[test]
    fn test_reset_notifies_only_on_change() {
        let s = store();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        s.connect_changed(None, move |_, _| h.set(h.get() + 1));

        s.reset("flame-scale").unwrap();
        assert_eq!(hits.get(), 0);

        s.set_double("flame-scale", 0.3).unwrap();
        s.reset("flame-scale").unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_handler_may_write_reentrantly() {
        let s = store();
        let weak = Rc::downgrade(&s);
        s.connect_changed(Some("flame-scale"), move |_, _| {
            if let Some(s) = weak.upgrade() {
                s.set_boolean("flame-3d-noise", false).unwrap();
            }
        });
        s.set_double("flame-scale", 0.7).unwrap();
        assert!(!s.get_boolean("flame-3d-noise").unwrap());
    }

    #[test]
    fn test_disconnect() {
        let s = store();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = s.connect_changed(None, move |_, _| h.set(h.get() + 1));
        assert!(s.disconnect(id));
        assert!(!s.disconnect(id));
        s.set_double("flame-scale", 0.7).unwrap();
        assert_eq!(hits.get(), 0);
        assert_eq!(s.handler_count(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("pyre_settings_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("save_and_load.toml");

        let s = store();
        s.set_double("flame-scale", 1.5).unwrap();
        s.set_string("fire-color-1", "rgb(255,200,0)").unwrap();
        s.save_to_file(&path).expect("save failed");

        let loaded = store();
        loaded.load_from_file(&path).expect("load failed");
        assert_eq!(loaded.get_double("flame-scale").unwrap(), 1.5);
        assert_eq!(loaded.get_string("fire-color-1").unwrap(), "rgb(255,200,0)");
        assert!(loaded.is_default("flame-3d-noise").unwrap());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_replaces_and_notifies() {
        let s = store();
        s.set_boolean("flame-3d-noise", false).unwrap();

        let changed = Rc::new(RefCell::new(Vec::new()));
        let c = changed.clone();
        s.connect_changed(None, move |key, _| c.borrow_mut().push(key.to_string()));

        s.load_from_str("flame-scale = 0.5\nunknown-key = 1\n").unwrap();
        assert_eq!(s.get_double("flame-scale").unwrap(), 0.5);
        assert!(s.get_boolean("flame-3d-noise").unwrap());

        let mut changed = changed.borrow().clone();
        changed.sort();
        assert_eq!(changed, vec!["flame-3d-noise", "flame-scale"]);
    }

    #[test]
    fn test_load_rejects_bad_value() {
        let s = store();
        s.set_double("flame-scale", 0.5).unwrap();
        assert!(s.load_from_str("flame-scale = \"big\"").is_err());
        assert_eq!(s.get_double("flame-scale").unwrap(), 0.5);
    }
}
