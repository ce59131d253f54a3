//! Simulated animation start

use super::{find_effect, Session};
use anyhow::{Context, Result};
use pyre_effects::RecordedProgram;
use serde::Serialize;

#[derive(Serialize)]
struct BeginReport {
    effect: String,
    for_opening: bool,
    enabled: bool,
    duration_ms: f64,
    actor_scale: [f32; 2],
    uniforms: Vec<UniformReport>,
}

#[derive(Serialize)]
struct UniformReport {
    name: String,
    location: u32,
    values: Vec<f32>,
}

pub fn run(session: &Session, nick: &str, for_opening: bool, format: &str) -> Result<()> {
    let effect = find_effect(nick)?;
    let settings = session.settings();

    let program = RecordedProgram::for_class(&effect.shader_class());
    let writes = program.writes_handle();
    let mut shader = effect
        .create_shader(Box::new(program))
        .context("Failed to create shader")?;
    shader
        .begin_animation(settings, for_opening)
        .context("Failed to begin animation")?;

    let (sx, sy) = effect.actor_scale(settings, for_opening);
    let report = BeginReport {
        effect: nick.to_string(),
        for_opening,
        enabled: effect.is_enabled(settings, for_opening)?,
        duration_ms: effect.animation_time(settings)?,
        actor_scale: [sx, sy],
        uniforms: writes
            .borrow()
            .iter()
            .map(|w| UniformReport {
                name: w.uniform.clone(),
                location: w.location.0,
                values: w.values.clone(),
            })
            .collect(),
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let direction = if for_opening { "open" } else { "close" };
    println!("Effect: {} ({})", report.effect, direction);
    if !report.enabled {
        println!("  note: effect is disabled for {} animations", direction);
    }
    println!("  duration: {} ms", report.duration_ms);
    println!("  actor scale: {} x {}", sx, sy);
    println!("  uniforms:");
    for u in &report.uniforms {
        let values: Vec<String> = u.values.iter().map(|v| format!("{:.3}", v)).collect();
        println!("    {:<16} = [{}]", u.name, values.join(", "));
    }
    Ok(())
}
