//! Effect catalog listing

use anyhow::{Context, Result};
use pyre_core::Version;
use pyre_effects::builtin;
use serde::Serialize;

#[derive(Serialize)]
struct EffectEntry<'a> {
    nick: &'a str,
    label: &'a str,
    min_host_version: String,
}

pub fn run(host: Option<&str>, format: &str) -> Result<()> {
    let registry = builtin();
    let effects = match host {
        Some(v) => {
            let version = Version::parse(v).context("Invalid host version")?;
            registry.available_for(version)
        }
        None => registry.list(),
    };

    let entries: Vec<EffectEntry> = effects
        .iter()
        .map(|e| EffectEntry {
            nick: e.nick(),
            label: e.label(),
            min_host_version: e.min_host_version().to_string(),
        })
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No effects available.");
        return Ok(());
    }
    for entry in &entries {
        println!(
            "  {:<16} {:<16} (host >= {})",
            entry.nick, entry.label, entry.min_host_version
        );
    }
    Ok(())
}
