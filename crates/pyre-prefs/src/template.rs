//! Page templates and the resource bundle they are looked up in
//!
//! A page template describes the widgets of one settings page:
//!
//! ```toml
//! [page]
//! id = "fire-prefs"
//! title = "Fire"
//!
//! [[widget]]
//! id = "flame-scale"
//! kind = "adjustment"
//! lower = 0.1
//! upper = 2.0
//! ```

use pyre_core::{PyreError, Result};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;

/// The widget kinds a template may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Adjustment,
    Switch,
    ColorButton,
    Button,
    MenuButton,
    Label,
}

/// The page root as declared in a template
#[derive(Debug, Clone, Deserialize)]
pub struct PageDef {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// One widget declaration
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetDef {
    pub id: String,
    pub kind: WidgetKind,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
}

/// A parsed page template
#[derive(Debug, Clone, Deserialize)]
pub struct PageTemplate {
    pub page: PageDef,
    #[serde(default)]
    pub widget: Vec<WidgetDef>,
}

impl PageTemplate {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PyreError::TemplateParse(format!("Failed to parse page template: {}", e)))
    }
}

/// Resource path of an effect's page template: `ui/<Nick>.ui`, with the nick
/// converted to UpperCamel (`fire` → `ui/Fire.ui`, `broken-glass` → `ui/BrokenGlass.ui`).
pub fn page_resource_path(nick: &str) -> String {
    let camel: String = nick
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    format!("ui/{camel}.ui")
}

/// A bundle of named text resources (page templates)
#[derive(Debug, Clone, Default)]
pub struct Resources {
    entries: HashMap<String, Cow<'static, str>>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, replacing any previous content at `path`
    pub fn add(&mut self, path: impl Into<String>, content: impl Into<Cow<'static, str>>) {
        self.entries.insert(path.into(), content.into());
    }

    pub fn get(&self, path: &str) -> Result<&str> {
        self.entries
            .get(path)
            .map(|c| c.as_ref())
            .ok_or_else(|| PyreError::ResourceNotFound(path.to_string()))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        paths.sort();
        paths
    }
}
