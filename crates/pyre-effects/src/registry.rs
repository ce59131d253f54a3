//! Effect registry — by-nick lookup and host-version filtering

use crate::effect::{is_valid_nick, Effect};
use crate::fire::FireEffect;
use pyre_core::{PyreError, Result, Version};
use pyre_prefs::{page_resource_path, Resources};
use pyre_settings::Schema;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{error, info};

/// The catalog of available effects, in registration order
#[derive(Default)]
pub struct EffectRegistry {
    effects: Vec<Box<dyn Effect>>,
    index: HashMap<&'static str, usize>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in effects registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        for effect in [Box::new(FireEffect::new()) as Box<dyn Effect>] {
            if let Err(e) = registry.register(effect) {
                error!(error = %e, "failed to register built-in effect");
            }
        }

        info!(count = registry.len(), "registered built-in effects");
        registry
    }

    /// Register an effect; its nick must be valid and not yet taken
    pub fn register(&mut self, effect: Box<dyn Effect>) -> Result<()> {
        let nick = effect.nick();
        if !is_valid_nick(nick) {
            return Err(PyreError::InvalidNick(nick.to_string()));
        }
        if self.index.contains_key(nick) {
            return Err(PyreError::DuplicateNick(nick.to_string()));
        }
        self.index.insert(nick, self.effects.len());
        self.effects.push(effect);
        Ok(())
    }

    pub fn get(&self, nick: &str) -> Option<&dyn Effect> {
        self.index.get(nick).map(|&i| self.effects[i].as_ref())
    }

    pub fn require(&self, nick: &str) -> Result<&dyn Effect> {
        self.get(nick)
            .ok_or_else(|| PyreError::EffectNotFound(nick.to_string()))
    }

    pub fn list(&self) -> Vec<&dyn Effect> {
        self.effects.iter().map(|e| e.as_ref()).collect()
    }

    /// Effects whose minimum host version is at most `host`
    pub fn available_for(&self, host: Version) -> Vec<&dyn Effect> {
        self.effects
            .iter()
            .filter(|e| host.satisfies(e.min_host_version()))
            .map(|e| e.as_ref())
            .collect()
    }

    /// All effect schemas merged into one
    pub fn schema(&self) -> Result<Schema> {
        let mut schema = Schema::new();
        for effect in &self.effects {
            schema.merge(effect.parsed_schema()?)?;
        }
        Ok(schema)
    }

    /// Page templates of all effects, keyed by resource path
    pub fn resources(&self) -> Resources {
        let mut resources = Resources::new();
        for effect in &self.effects {
            resources.add(page_resource_path(effect.nick()), effect.page_template());
        }
        resources
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// The process-wide registry of built-in effects
pub fn builtin() -> &'static EffectRegistry {
    static REGISTRY: OnceLock<EffectRegistry> = OnceLock::new();
    REGISTRY.get_or_init(EffectRegistry::with_builtins)
}

/// Page templates of the built-in effects
pub fn builtin_resources() -> Resources {
    builtin().resources()
}
