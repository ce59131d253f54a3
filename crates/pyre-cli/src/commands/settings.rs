//! Settings inspection and editing

use super::{find_effect, Session};
use anyhow::{Context, Result};

pub fn show(session: &Session, nick: &str) -> Result<()> {
    let effect = find_effect(nick)?;
    let schema = effect
        .parsed_schema()
        .with_context(|| format!("Invalid schema for effect '{}'", nick))?;
    let settings = session.settings();

    println!("Effect: {} ({})", effect.label(), effect.nick());
    println!("Settings file: {}", session.path().display());
    println!();

    for entry in schema.iter() {
        let value = settings.value(&entry.key)?;
        let marker = if settings.is_default(&entry.key)? {
            ""
        } else {
            " (modified)"
        };
        println!("  {} : {} = {}{}", entry.key, entry.ty.type_name(), value, marker);

        if let Some(desc) = &entry.description {
            println!("    # {}", desc);
        }
        if entry.min.is_some() || entry.max.is_some() {
            let min = entry.min.map(|v| v.to_string()).unwrap_or_default();
            let max = entry.max.map(|v| v.to_string()).unwrap_or_default();
            println!("    # Range: {} .. {}", min, max);
        }
    }
    Ok(())
}

pub fn set(session: &Session, key: &str, text: &str) -> Result<()> {
    let settings = session.settings();
    let value = settings
        .schema()
        .require(key)?
        .parse_value(text)
        .with_context(|| format!("Invalid value for '{}'", key))?;
    settings.set(key, value)?;
    session.save()?;
    println!("{} = {}", key, settings.value(key)?);
    Ok(())
}

pub fn reset(session: &Session, key: &str) -> Result<()> {
    let settings = session.settings();
    settings.reset(key)?;
    session.save()?;
    println!("{} = {} (default)", key, settings.value(key)?);
    Ok(())
}
