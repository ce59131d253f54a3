//! Presets — named bundles of correlated settings, exposed as menu actions

use crate::action::{Action, ActionGroup, Menu};
use crate::widget::{MenuButton, Page};
use pyre_core::{HandlerId, Result};
use pyre_settings::{Schema, SettingValue, Settings};
use std::rc::Rc;
use tracing::{info, warn};

/// An immutable, named bundle of settings values.
///
/// Applying a preset overwrites every listed key; keys not listed are left
/// alone. Presets never persist themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub values: Vec<(String, SettingValue)>,
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Write every value, in bundle order
    pub fn apply(&self, settings: &Settings) -> Result<()> {
        for (key, value) in &self.values {
            settings.set(key, value.clone())?;
        }
        info!(preset = self.name.as_str(), "applied preset");
        Ok(())
    }

    /// Check every value against the schema without writing anything
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        for (key, value) in &self.values {
            schema.require(key)?.check(value.clone())?;
        }
        Ok(())
    }
}

/// The action group and menu model built from an ordered preset list.
///
/// Action `i` is named `<action_prefix><i>` and applies `presets[i]`; menu
/// entry `i` shows the preset's name and points at `<group_name>.<action_prefix><i>`.
pub struct PresetMenu {
    group_name: String,
    group: Rc<ActionGroup>,
    menu: Menu,
}

impl PresetMenu {
    pub fn build(
        group_name: &str,
        action_prefix: &str,
        presets: &[Preset],
        settings: &Settings,
    ) -> Self {
        let group = Rc::new(ActionGroup::new());
        let mut menu = Menu::new();

        for (i, preset) in presets.iter().enumerate() {
            let action_name = format!("{action_prefix}{i}");
            menu.append(&preset.name, format!("{group_name}.{action_name}"));

            let action = Rc::new(Action::new(action_name));
            let settings = settings.clone();
            let preset = preset.clone();
            action.connect_activate(move |_| {
                if let Err(e) = preset.apply(&settings) {
                    warn!(preset = preset.name.as_str(), error = %e, "failed to apply preset");
                }
            });
            group.add_action(action);
        }

        Self {
            group_name: group_name.to_string(),
            group,
            menu,
        }
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn group(&self) -> Rc<ActionGroup> {
        self.group.clone()
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Hook the menu and action group up once `page` is realized.
    ///
    /// The group is inserted into the page's root window on the first realize
    /// in that window; later realize events find it already present and do
    /// nothing.
    pub fn attach_on_realize(self, page: &Page, button: Rc<MenuButton>) -> HandlerId {
        page.connect_realize(move |root| {
            let attached = root
                .action_group(&self.group_name)
                .is_some_and(|g| Rc::ptr_eq(&g, &self.group));
            if attached {
                return;
            }
            button.set_menu_model(self.menu.clone());
            root.insert_action_group(&self.group_name, self.group.clone());
            info!(
                group = self.group_name.as_str(),
                actions = self.group.len(),
                "attached preset actions"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Window;
    use pyre_settings::SettingsStore;

    fn settings() -> Settings {
        SettingsStore::shared(
            Schema::from_toml_str(
                r#"
[[key]]
name = "demo-speed"
type = "double"
default = 0.5
min = -1.0
max = 1.0

[[key]]
name = "demo-color"
type = "color"
default = "rgba(0,0,0,0)"
"#,
            )
            .unwrap(),
        )
    }

    fn presets() -> Vec<Preset> {
        vec![
            Preset::new("Slow")
                .with("demo-speed", 0.1)
                .with("demo-color", "rgb(255,0,0)"),
            Preset::new("Fast")
                .with("demo-speed", 0.9)
                .with("demo-color", "rgba(0,0,255,0.5)"),
            Preset::new("Reverse")
                .with("demo-speed", -0.5)
                .with("demo-color", "rgb(0,0,0)"),
        ]
    }

    #[test]
    fn test_actions_named_by_index() {
        let menu = PresetMenu::build("presets", "demo", &presets(), &settings());
        assert_eq!(menu.group().names(), vec!["demo0", "demo1", "demo2"]);
        let items: Vec<(&str, &str)> = menu
            .menu()
            .items()
            .iter()
            .map(|i| (i.label.as_str(), i.detailed_action.as_str()))
            .collect();
        assert_eq!(
            items,
            vec![
                ("Slow", "presets.demo0"),
                ("Fast", "presets.demo1"),
                ("Reverse", "presets.demo2"),
            ]
        );
    }

    #[test]
    fn test_activate_overwrites_bundle() {
        let s = settings();
        let menu = PresetMenu::build("presets", "demo", &presets(), &s);
        s.set_double("demo-speed", 0.3).unwrap();

        menu.group().lookup("demo1").unwrap().activate();
        assert_eq!(s.get_double("demo-speed").unwrap(), 0.9);
        assert_eq!(s.get_string("demo-color").unwrap(), "rgba(0,0,255,0.5)");

        menu.group().lookup("demo2").unwrap().activate();
        assert_eq!(s.get_double("demo-speed").unwrap(), -0.5);
        assert_eq!(s.get_string("demo-color").unwrap(), "rgb(0,0,0)");
    }

    #[test]
    fn test_attach_once_on_realize() {
        let s = settings();
        let page = Page::new("demo-prefs", "Demo");
        let button = Rc::new(MenuButton::new("Presets"));
        let menu = PresetMenu::build("presets", "demo", &presets(), &s);
        let group = menu.group();
        menu.attach_on_realize(&page, button.clone());

        assert!(button.menu_model().is_none());
        let window = Window::new("Preferences");
        page.realize(&window);
        page.realize(&window);

        assert_eq!(window.action_group_count(), 1);
        assert!(Rc::ptr_eq(&window.action_group("presets").unwrap(), &group));
        assert_eq!(button.menu_model().unwrap().len(), 3);

        button.activate_item(0, &window).unwrap();
        assert_eq!(s.get_double("demo-speed").unwrap(), 0.1);
    }

    #[test]
    fn test_validate() {
        let s = settings();
        for preset in presets() {
            preset.validate(s.schema()).unwrap();
        }
        let bad = Preset::new("Bad").with("demo-speed", 4.0);
        assert!(bad.validate(s.schema()).is_err());
        let unknown = Preset::new("Unknown").with("demo-size", 1.0);
        assert!(unknown.validate(s.schema()).is_err());
    }
}
