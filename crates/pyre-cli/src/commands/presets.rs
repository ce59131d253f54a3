//! Preset listing and application

use super::{find_effect, Session};
use anyhow::{Context, Result};
use pyre_effects::builtin_resources;
use pyre_prefs::{PreferencesDialog, Window};

pub fn list(nick: &str) -> Result<()> {
    let effect = find_effect(nick)?;
    let presets = effect.presets();
    if presets.is_empty() {
        println!("Effect '{}' has no presets.", nick);
        return Ok(());
    }

    println!("Presets of {}:", effect.label());
    for (i, preset) in presets.iter().enumerate() {
        println!("  [{}] {}", i, preset.name);
        for (key, value) in &preset.values {
            println!("      {} = {}", key, value);
        }
    }
    Ok(())
}

/// Apply a preset through the settings page's preset menu
pub fn apply(session: &Session, nick: &str, index: usize) -> Result<()> {
    let effect = find_effect(nick)?;
    let presets = effect.presets();
    let preset = presets.get(index).with_context(|| {
        format!(
            "Preset index {} out of range; '{}' has {} presets",
            index,
            nick,
            presets.len()
        )
    })?;

    let dialog = PreferencesDialog::new(session.settings().clone(), builtin_resources());
    let page = effect
        .preferences(&dialog)
        .with_context(|| format!("Failed to build the settings page of '{}'", nick))?;
    let window = Window::new("Preferences");
    page.page().realize(&window);
    window
        .activate_action(&format!("presets.{}{}", nick, index))
        .context("Failed to activate preset")?;

    session.save()?;
    println!("Applied preset '{}'", preset.name);
    Ok(())
}
