//! Setting values

use std::fmt;

/// A typed settings value.
///
/// Colors are carried as `String` in their textual encoding; decoding happens
/// on read through [`pyre_core::Color::parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Double(f64),
    Boolean(bool),
    Int(i64),
    String(String),
}

impl SettingValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            SettingValue::Double(_) => "double",
            SettingValue::Boolean(_) => "boolean",
            SettingValue::Int(_) => "int",
            SettingValue::String(_) => "string",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Double(v) => Some(*v),
            SettingValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn to_toml(&self) -> toml::Value {
        match self {
            SettingValue::Double(v) => toml::Value::Float(*v),
            SettingValue::Boolean(v) => toml::Value::Boolean(*v),
            SettingValue::Int(v) => toml::Value::Integer(*v),
            SettingValue::String(v) => toml::Value::String(v.clone()),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Double(v) => write!(f, "{v}"),
            SettingValue::Boolean(v) => write!(f, "{v}"),
            SettingValue::Int(v) => write!(f, "{v}"),
            SettingValue::String(v) => write!(f, "'{v}'"),
        }
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        SettingValue::Double(v)
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Boolean(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Int(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::String(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::String(v)
    }
}
