//! The fire effect: windows burn in when opened and burn away when closed

mod presets;

pub use presets::{presets, FirePreset, FIRE_PRESETS};

use crate::effect::Effect;
use crate::shader::{
    EffectShader, ShaderClass, ShaderFactory, ShaderProgram, UniformBinding, UniformSource,
};
use pyre_core::{Result, Version};
use pyre_prefs::{PageContext, PreferencesDialog, Preset, PresetMenu};
use std::sync::Arc;

/// Gradient color keys, outer edge first
pub const COLOR_KEYS: [&str; 5] = [
    "fire-color-1",
    "fire-color-2",
    "fire-color-3",
    "fire-color-4",
    "fire-color-5",
];

const SCHEMA: &str = include_str!("../../schemas/fire.toml");
const PAGE: &str = include_str!("../../ui/Fire.ui");

fn shader_class() -> ShaderClass {
    let mut bindings: Vec<UniformBinding> = COLOR_KEYS
        .iter()
        .enumerate()
        .map(|(i, key)| {
            UniformBinding::new(
                format!("uGradient{}", i + 1),
                UniformSource::Color(key.to_string()),
            )
        })
        .collect();
    bindings.push(UniformBinding::new(
        "u3DNoise",
        UniformSource::Boolean("flame-3d-noise".into()),
    ));
    bindings.push(UniformBinding::new(
        "uScale",
        UniformSource::Double("flame-scale".into()),
    ));
    bindings.push(UniformBinding::new(
        "uMovementSpeed",
        UniformSource::Double("flame-movement-speed".into()),
    ));
    ShaderClass::new("FireShader", bindings)
}

pub struct FireEffect {
    shaders: ShaderFactory,
}

impl FireEffect {
    pub const NICK: &'static str = "fire";

    pub fn new() -> Self {
        Self {
            shaders: ShaderFactory::new(shader_class),
        }
    }

    pub fn shader_factory(&self) -> &ShaderFactory {
        &self.shaders
    }
}

impl Default for FireEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for FireEffect {
    fn nick(&self) -> &'static str {
        Self::NICK
    }

    fn label(&self) -> &str {
        "Fire"
    }

    fn min_host_version(&self) -> Version {
        Version::new(3, 36)
    }

    fn schema(&self) -> &'static str {
        SCHEMA
    }

    fn page_template(&self) -> &'static str {
        PAGE
    }

    fn preferences(&self, dialog: &PreferencesDialog) -> Result<PageContext> {
        let page = dialog.load_page(Self::NICK)?;

        page.bind_adjustment("fire-animation-time")?;
        page.bind_adjustment("flame-movement-speed")?;
        page.bind_adjustment("flame-scale")?;
        page.bind_switch("fire-open-effect")?;
        page.bind_switch("fire-close-effect")?;
        page.bind_switch("flame-3d-noise")?;
        for key in COLOR_KEYS {
            page.bind_color_button(key)?;
        }
        page.bind_reset_button("reset-fire-colors", &COLOR_KEYS)?;

        let button = page.builder().menu_button("fire-preset-button")?;
        PresetMenu::build("presets", Self::NICK, &self.presets(), dialog.settings())
            .attach_on_realize(&page.page(), button);

        Ok(page)
    }

    fn shader_class(&self) -> Arc<ShaderClass> {
        self.shaders.class()
    }

    fn create_shader(&self, program: Box<dyn ShaderProgram>) -> Result<EffectShader> {
        self.shaders.create(program)
    }

    fn presets(&self) -> Vec<Preset> {
        presets()
    }
}
