//! The effect descriptor trait

use crate::shader::{EffectShader, ShaderClass, ShaderProgram};
use pyre_core::{Result, Version};
use pyre_prefs::{PageContext, PreferencesDialog, Preset};
use pyre_settings::{Schema, SettingsStore};
use std::sync::Arc;

/// A window transition effect.
///
/// The nick is the stable identifier: it names the effect's page template
/// (`ui/<Nick>.ui`), prefixes its settings keys and its preset actions. The
/// label is for display only.
pub trait Effect: Send + Sync {
    fn nick(&self) -> &'static str;

    fn label(&self) -> &str;

    /// Oldest host version the effect runs on
    fn min_host_version(&self) -> Version;

    /// TOML schema of the effect's settings keys
    fn schema(&self) -> &'static str;

    /// TOML page template of the effect's settings page
    fn page_template(&self) -> &'static str;

    /// Build and bind a fresh settings page
    fn preferences(&self, dialog: &PreferencesDialog) -> Result<PageContext>;

    /// The effect's shader class, defined once per effect object
    fn shader_class(&self) -> Arc<ShaderClass>;

    /// Create a new shader instance on top of `program`
    fn create_shader(&self, program: Box<dyn ShaderProgram>) -> Result<EffectShader> {
        EffectShader::new(self.shader_class(), program)
    }

    /// Presets offered on the settings page, in menu order
    fn presets(&self) -> Vec<Preset> {
        Vec::new()
    }

    /// Scale of the animated actor relative to the window
    fn actor_scale(&self, _settings: &SettingsStore, _for_opening: bool) -> (f32, f32) {
        (1.0, 1.0)
    }

    /// Animation duration in milliseconds
    fn animation_time(&self, settings: &SettingsStore) -> Result<f64> {
        settings.get_double(&format!("{}-animation-time", self.nick()))
    }

    fn is_enabled(&self, settings: &SettingsStore, for_opening: bool) -> Result<bool> {
        let which = if for_opening { "open" } else { "close" };
        settings.get_boolean(&format!("{}-{}-effect", self.nick(), which))
    }

    fn parsed_schema(&self) -> Result<Schema> {
        Schema::from_toml_str(self.schema())
    }
}

/// Nicks are lowercase ASCII tokens joined by single hyphens (`fire`, `broken-glass`)
pub fn is_valid_nick(nick: &str) -> bool {
    !nick.is_empty()
        && nick.split('-').all(|token| {
            !token.is_empty()
                && token
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nicks() {
        assert!(is_valid_nick("fire"));
        assert!(is_valid_nick("broken-glass"));
        assert!(is_valid_nick("tv-2"));
    }

    #[test]
    fn test_invalid_nicks() {
        assert!(!is_valid_nick(""));
        assert!(!is_valid_nick("Fire"));
        assert!(!is_valid_nick("-fire"));
        assert!(!is_valid_nick("fire-"));
        assert!(!is_valid_nick("broken--glass"));
        assert!(!is_valid_nick("broken_glass"));
        assert!(!is_valid_nick("fire effect"));
    }
}
