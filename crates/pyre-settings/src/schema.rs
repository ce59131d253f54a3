//! Settings schema definitions
//!
//! A schema lists every key an effect reads or writes, with its type and
//! declared default. Schemas are written in TOML:
//!
//! ```toml
//! [[key]]
//! name = "flame-scale"
//! type = "double"
//! default = 1.0
//! min = 0.1
//! max = 2.0
//! ```

use crate::value::SettingValue;
use pyre_core::{Color, PyreError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// The declared type of a settings key
#[derive(Debug, Clone, PartialEq)]
pub enum SettingType {
    Double,
    Boolean,
    Int,
    String,
    /// A string holding an `rgb()`/`rgba()` color
    Color,
    Enum { values: Vec<String> },
}

impl SettingType {
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingType::Double => "double",
            SettingType::Boolean => "boolean",
            SettingType::Int => "int",
            SettingType::String => "string",
            SettingType::Color => "color",
            SettingType::Enum { .. } => "enum",
        }
    }

    /// Whether values of this type are stored as strings
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            SettingType::String | SettingType::Color | SettingType::Enum { .. }
        )
    }
}

/// Schema for a single settings key
#[derive(Debug, Clone)]
pub struct SettingSchema {
    pub key: String,
    pub ty: SettingType,
    pub default: SettingValue,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: Option<String>,
}

impl SettingSchema {
    /// Type-check a value against this key, returning it unchanged when valid
    pub fn check(&self, value: SettingValue) -> Result<SettingValue> {
        let matches = matches!(
            (&self.ty, &value),
            (SettingType::Double, SettingValue::Double(_))
                | (SettingType::Boolean, SettingValue::Boolean(_))
                | (SettingType::Int, SettingValue::Int(_))
        ) || (self.ty.is_string_like() && matches!(value, SettingValue::String(_)));

        if !matches {
            return Err(self.mismatch(value.kind_name()));
        }

        if let Some(v) = value.as_f64() {
            if !v.is_finite() {
                return Err(PyreError::ValueOutOfRange {
                    key: self.key.clone(),
                    min: self.min.unwrap_or(f64::MIN),
                    max: self.max.unwrap_or(f64::MAX),
                    value: v,
                });
            }
            let below = self.min.is_some_and(|min| v < min);
            let above = self.max.is_some_and(|max| v > max);
            if below || above {
                return Err(PyreError::ValueOutOfRange {
                    key: self.key.clone(),
                    min: self.min.unwrap_or(f64::MIN),
                    max: self.max.unwrap_or(f64::MAX),
                    value: v,
                });
            }
        }

        if let (SettingType::Color, SettingValue::String(s)) = (&self.ty, &value) {
            Color::parse(s)?;
        }

        if let (SettingType::Enum { values }, SettingValue::String(s)) = (&self.ty, &value) {
            if !values.contains(s) {
                return Err(PyreError::InvalidEnumValue {
                    key: self.key.clone(),
                    value: s.clone(),
                    allowed: values.clone(),
                });
            }
        }

        Ok(value)
    }

    /// Parse a textual value (e.g. from the command line) according to this key's type
    pub fn parse_value(&self, text: &str) -> Result<SettingValue> {
        let text = text.trim();
        let value = match self.ty {
            SettingType::Double => SettingValue::Double(
                text.parse()
                    .map_err(|_| self.mismatch(&format!("'{text}'")))?,
            ),
            SettingType::Int => SettingValue::Int(
                text.parse()
                    .map_err(|_| self.mismatch(&format!("'{text}'")))?,
            ),
            SettingType::Boolean => match text.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => SettingValue::Boolean(true),
                "false" | "0" | "no" | "off" => SettingValue::Boolean(false),
                _ => return Err(self.mismatch(&format!("'{text}'"))),
            },
            SettingType::String | SettingType::Color | SettingType::Enum { .. } => {
                SettingValue::String(text.to_string())
            }
        };
        self.check(value)
    }

    /// Convert a TOML value for this key, checking its type
    pub fn value_from_toml(&self, value: &toml::Value) -> Result<SettingValue> {
        let converted = match (&self.ty, value) {
            (SettingType::Double, toml::Value::Float(v)) => SettingValue::Double(*v),
            (SettingType::Double, toml::Value::Integer(v)) => SettingValue::Double(*v as f64),
            (SettingType::Int, toml::Value::Integer(v)) => SettingValue::Int(*v),
            (SettingType::Boolean, toml::Value::Boolean(v)) => SettingValue::Boolean(*v),
            (ty, toml::Value::String(s)) if ty.is_string_like() => SettingValue::String(s.clone()),
            (_, other) => return Err(self.mismatch(other.type_str())),
        };
        self.check(converted)
    }

    fn mismatch(&self, got: &str) -> PyreError {
        PyreError::TypeMismatch {
            key: self.key.clone(),
            expected: self.ty.type_name().to_string(),
            got: got.to_string(),
        }
    }
}

/// An ordered collection of setting schemas, indexed by key
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<SettingSchema>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a schema from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut schema = Self::new();
        schema.load_toml_str(content)?;
        Ok(schema)
    }

    /// Load keys from a TOML string into this schema
    pub fn load_toml_str(&mut self, content: &str) -> Result<()> {
        let file: SchemaFile = toml::from_str(content)
            .map_err(|e| PyreError::SchemaLoad(format!("Failed to parse schema TOML: {}", e)))?;

        for def in file.key {
            let entry = def.to_setting_schema()?;
            self.register(entry)?;
        }

        Ok(())
    }

    /// Register a key. Keys are never silently overridden.
    pub fn register(&mut self, entry: SettingSchema) -> Result<()> {
        if self.index.contains_key(&entry.key) {
            return Err(PyreError::DuplicateKey(entry.key));
        }
        self.index.insert(entry.key.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Append every key of `other`
    pub fn merge(&mut self, other: Schema) -> Result<()> {
        for entry in other.entries {
            self.register(entry)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&SettingSchema> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Look up a key, failing with [`PyreError::KeyNotFound`]
    pub fn require(&self, key: &str) -> Result<&SettingSchema> {
        self.get(key)
            .ok_or_else(|| PyreError::KeyNotFound(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in declaration order
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingSchema> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// TOML file format for settings schemas
#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    key: Vec<KeyDefinition>,
}

/// Key definition as it appears in TOML files
#[derive(Debug, Deserialize)]
struct KeyDefinition {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    default: toml::Value,
    #[serde(default)]
    values: Option<Vec<String>>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    description: Option<String>,
}

impl KeyDefinition {
    fn to_setting_schema(self) -> Result<SettingSchema> {
        let ty = match self.field_type.as_str() {
            "double" | "f64" => SettingType::Double,
            "boolean" | "bool" => SettingType::Boolean,
            "int" | "i64" => SettingType::Int,
            "string" => SettingType::String,
            "color" => SettingType::Color,
            "enum" => SettingType::Enum {
                values: self.values.unwrap_or_default(),
            },
            other => {
                return Err(PyreError::SchemaLoad(format!(
                    "Key '{}' has unknown type '{}'",
                    self.name, other
                )));
            }
        };

        let mut entry = SettingSchema {
            key: self.name,
            ty,
            default: SettingValue::Boolean(false),
            min: self.min,
            max: self.max,
            description: self.description,
        };
        let default = entry.value_from_toml(&self.default).map_err(|e| {
            PyreError::SchemaLoad(format!("Invalid default for '{}': {}", entry.key, e))
        })?;
        entry.default = default;
        Ok(entry)
    }
}
