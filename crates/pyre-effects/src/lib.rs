//! Pyre Effects - Window transition effects
//!
//! Each effect is an [`Effect`] descriptor: a nick, its settings schema, a
//! settings page and a shader whose uniforms are fed from the settings store.
//! The [`EffectRegistry`] is the catalog the host picks effects from.

mod effect;
pub mod fire;
mod program;
mod registry;
mod shader;

pub use effect::{is_valid_nick, Effect};
pub use fire::FireEffect;
#[cfg(feature = "gpu")]
pub use program::gpu;
pub use program::{RecordedProgram, UniformBlock, UniformWrite};
pub use registry::{builtin, builtin_resources, EffectRegistry};
pub use shader::{
    EffectShader, ShaderClass, ShaderFactory, ShaderProgram, ShaderState, UniformBinding,
    UniformLocation, UniformSource,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pyre_core::{Color, PyreError};
    use pyre_prefs::{PageContext, PreferencesDialog, Window};
    use pyre_settings::{Settings, SettingsStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dialog() -> PreferencesDialog {
        let registry = builtin();
        let settings = SettingsStore::shared(registry.schema().unwrap());
        PreferencesDialog::new(settings, registry.resources())
    }

    fn fire() -> &'static dyn Effect {
        builtin().get("fire").unwrap()
    }

    fn open_page(dialog: &PreferencesDialog) -> (PageContext, Rc<Window>) {
        let page = fire().preferences(dialog).unwrap();
        let window = Window::new("Preferences");
        page.page().realize(&window);
        (page, window)
    }

    fn fire_program() -> (RecordedProgram, Rc<RefCell<Vec<UniformWrite>>>) {
        let program = RecordedProgram::new([
            "uGradient1",
            "uGradient2",
            "uGradient3",
            "uGradient4",
            "uGradient5",
            "u3DNoise",
            "uScale",
            "uMovementSpeed",
        ]);
        let writes = program.writes_handle();
        (program, writes)
    }

    fn begin(settings: &Settings) -> Vec<UniformWrite> {
        let (program, writes) = fire_program();
        let mut shader = fire().create_shader(Box::new(program)).unwrap();
        shader.begin_animation(settings, true).unwrap();
        let writes = writes.borrow().clone();
        writes
    }

    #[test]
    fn test_nicks_are_unique_key_prefixes() {
        let registry = builtin();
        let settings = SettingsStore::new(registry.schema().unwrap());
        let mut seen = std::collections::HashSet::new();
        for effect in registry.list() {
            assert!(is_valid_nick(effect.nick()));
            assert!(seen.insert(effect.nick()));
            assert!(effect.animation_time(&settings).is_ok());
            assert!(effect.is_enabled(&settings, true).unwrap());
            assert!(effect.is_enabled(&settings, false).unwrap());
        }
        assert_eq!(fire().animation_time(&settings).unwrap(), 2000.0);
        assert_eq!(fire().actor_scale(&settings, true), (1.0, 1.0));
    }

    #[test]
    fn test_begin_writes_every_uniform_once() {
        let settings = SettingsStore::shared(builtin().schema().unwrap());
        let writes = begin(&settings);
        assert_eq!(writes.len(), 8);

        let mut names: Vec<&str> = writes.iter().map(|w| w.uniform.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8);

        for w in &writes[..5] {
            assert_eq!(w.values.len(), 4);
            assert!(w.values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
        assert!(writes[5].values == [0.0] || writes[5].values == [1.0]);
        assert_eq!(writes[6].values, vec![1.0]);
        assert_eq!(writes[7].values, vec![0.5]);
    }

    #[test]
    fn test_3d_noise_flag_reaches_shader() {
        let settings = SettingsStore::shared(builtin().schema().unwrap());
        settings.set_boolean("flame-3d-noise", true).unwrap();
        let noise = begin(&settings)
            .into_iter()
            .find(|w| w.uniform == "u3DNoise")
            .unwrap();
        assert_eq!(noise.values, vec![1.0]);

        settings.set_boolean("flame-3d-noise", false).unwrap();
        let noise = begin(&settings)
            .into_iter()
            .find(|w| w.uniform == "u3DNoise")
            .unwrap();
        assert_eq!(noise.values, vec![0.0]);
    }

    #[test]
    fn test_second_begin_rejected() {
        let settings = SettingsStore::shared(builtin().schema().unwrap());
        let (program, writes) = fire_program();
        let mut shader = fire().create_shader(Box::new(program)).unwrap();
        shader.begin_animation(&settings, false).unwrap();
        assert!(matches!(
            shader.begin_animation(&settings, false),
            Err(PyreError::ShaderAlreadyBegun(_))
        ));
        assert_eq!(writes.borrow().len(), 8);
    }

    #[test]
    fn test_missing_uniform_fails_creation() {
        let program = RecordedProgram::new(["uGradient1", "uScale"]);
        assert!(matches!(
            fire().create_shader(Box::new(program)),
            Err(PyreError::UniformNotFound { .. })
        ));
    }

    #[test]
    fn test_hell_fire_end_to_end() {
        let dialog = dialog();
        let settings = dialog.settings().clone();
        assert_eq!(settings.get_double("flame-scale").unwrap(), 1.0);
        let (page, window) = open_page(&dialog);

        window.activate_action("presets.fire1").unwrap();

        assert_eq!(settings.get_double("flame-scale").unwrap(), 1.5);
        assert_eq!(settings.get_double("flame-movement-speed").unwrap(), 0.2);
        assert_eq!(settings.get_string("fire-color-2").unwrap(), "rgba(103,7,80,0.5)");
        assert_eq!(settings.get_string("fire-color-4").unwrap(), "rgb(255,200,0)");

        let builder = page.builder();
        assert_eq!(builder.adjustment("flame-scale").unwrap().value(), 1.5);
        assert_eq!(
            builder.color_button("fire-color-3").unwrap().rgba(),
            Color::parse("rgba(150,0,24,0.9)").unwrap()
        );

        let writes = begin(&settings);
        assert_eq!(writes[6].values, vec![1.5]);
        assert_eq!(writes[7].values, vec![0.2]);
        assert_eq!(writes[0].values, vec![0.0, 0.0, 0.0, 0.0]);
        assert_eq!(writes[4].values, vec![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_every_preset_reads_back_literally() {
        let dialog = dialog();
        let settings = dialog.settings().clone();
        let (_page, window) = open_page(&dialog);

        for (i, preset) in fire().presets().iter().enumerate() {
            window.activate_action(&format!("presets.fire{i}")).unwrap();
            for (key, value) in &preset.values {
                assert_eq!(&settings.value(key).unwrap(), value, "{} / {}", preset.name, key);
            }
        }
    }

    #[test]
    fn test_switching_presets_keeps_literal_values() {
        let dialog = dialog();
        let settings = dialog.settings().clone();
        let (_page, window) = open_page(&dialog);
        let presets = fire().presets();

        for i in [1, 3, 4, 2, 0] {
            window.activate_action(&format!("presets.fire{i}")).unwrap();
            for (key, value) in &presets[i].values {
                assert_eq!(&settings.value(key).unwrap(), value, "{} / {}", presets[i].name, key);
            }
        }

        let schema = settings.schema();
        for (key, value) in &presets[0].values {
            if *value == schema.require(key).unwrap().default {
                assert!(settings.is_default(key).unwrap(), "{key}");
            }
        }
        assert_eq!(
            settings.get_string("fire-color-1").unwrap(),
            "rgba(76, 51, 25, 0.0)"
        );
    }

    #[test]
    fn test_preset_actions_named_by_index() {
        let dialog = dialog();
        let (page, window) = open_page(&dialog);
        let group = window.action_group("presets").unwrap();
        assert_eq!(group.names(), vec!["fire0", "fire1", "fire2", "fire3", "fire4"]);

        let menu = page
            .builder()
            .menu_button("fire-preset-button")
            .unwrap()
            .menu_model()
            .unwrap();
        assert_eq!(menu.items()[3].label, "Cold Breeze");
        assert_eq!(menu.items()[3].detailed_action, "presets.fire3");

        page.page().realize(&window);
        assert_eq!(window.action_group_count(), 1);
        assert!(Rc::ptr_eq(&window.action_group("presets").unwrap(), &group));
    }

    #[test]
    fn test_reset_restores_default_colors() {
        let dialog = dialog();
        let settings = dialog.settings().clone();
        let (page, window) = open_page(&dialog);
        window.activate_action("presets.fire4").unwrap();
        settings.set_double("flame-scale", 1.8).unwrap();

        page.builder().button("reset-fire-colors").unwrap().click();

        for key in fire::COLOR_KEYS {
            assert!(settings.is_default(key).unwrap(), "{key}");
            assert_eq!(
                page.builder().color_button(key).unwrap().rgba(),
                settings.get_color(key).unwrap()
            );
        }
        assert_eq!(settings.get_double("flame-scale").unwrap(), 1.8);
    }

    #[test]
    fn test_external_writes_update_widgets() {
        let dialog = dialog();
        let settings = dialog.settings().clone();
        let (page, _window) = open_page(&dialog);

        settings.set_double("flame-movement-speed", -0.75).unwrap();
        settings.set_boolean("flame-3d-noise", false).unwrap();
        settings.set_string("fire-color-5", "rgb(0,0,255)").unwrap();

        let builder = page.builder();
        assert_eq!(builder.adjustment("flame-movement-speed").unwrap().value(), -0.75);
        assert!(!builder.switch("flame-3d-noise").unwrap().is_active());
        assert_eq!(
            builder.color_button("fire-color-5").unwrap().rgba(),
            Color::from_rgba8(0, 0, 255, 1.0)
        );
    }

    #[test]
    fn test_two_pages_bind_independently() {
        let dialog = dialog();
        let settings = dialog.settings().clone();
        let (a, _wa) = open_page(&dialog);
        let (b, wb) = open_page(&dialog);
        assert!(!Rc::ptr_eq(
            &a.builder().adjustment("flame-scale").unwrap(),
            &b.builder().adjustment("flame-scale").unwrap()
        ));

        a.builder().adjustment("flame-scale").unwrap().set_value(0.6);
        assert_eq!(settings.get_double("flame-scale").unwrap(), 0.6);
        assert_eq!(b.builder().adjustment("flame-scale").unwrap().value(), 0.6);

        drop(a);
        wb.activate_action("presets.fire3").unwrap();
        assert_eq!(b.builder().adjustment("flame-scale").unwrap().value(), 1.5);

        let (p1, _) = fire_program();
        let (p2, _) = fire_program();
        let s1 = fire().create_shader(Box::new(p1)).unwrap();
        let s2 = fire().create_shader(Box::new(p2)).unwrap();
        assert!(std::ptr::eq(s1.class(), s2.class()));
    }
}
