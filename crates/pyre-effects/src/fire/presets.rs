//! Built-in flame looks

use pyre_prefs::Preset;

/// One look of the fire effect: flame scale, movement speed and the five
/// gradient colors from the outer edge inwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirePreset {
    pub name: &'static str,
    pub scale: f64,
    pub speed: f64,
    pub colors: [&'static str; 5],
}

pub const FIRE_PRESETS: [FirePreset; 5] = [
    FirePreset {
        name: "Default Fire",
        scale: 1.0,
        speed: 0.5,
        colors: [
            "rgba(76, 51, 25, 0.0)",
            "rgba(180, 55, 30, 0.7)",
            "rgba(255, 76, 38, 0.9)",
            "rgba(255, 166, 25, 1)",
            "rgba(255, 255, 255, 1)",
        ],
    },
    FirePreset {
        name: "Hell Fire",
        scale: 1.5,
        speed: 0.2,
        colors: [
            "rgba(0,0,0,0)",
            "rgba(103,7,80,0.5)",
            "rgba(150,0,24,0.9)",
            "rgb(255,200,0)",
            "rgba(255,255,255,1)",
        ],
    },
    FirePreset {
        name: "Dark and Smutty",
        scale: 1.0,
        speed: 0.5,
        colors: [
            "rgba(0,0,0,0)",
            "rgba(36,3,0,0.5)",
            "rgba(150,0,24,0.9)",
            "rgb(255,177,21)",
            "rgb(255,238,166)",
        ],
    },
    FirePreset {
        name: "Cold Breeze",
        scale: 1.5,
        speed: -0.1,
        colors: [
            "rgba(0,110,255,0)",
            "rgba(30,111,180,0.24)",
            "rgba(38,181,255,0.54)",
            "rgba(34,162,255,0.84)",
            "rgb(97,189,255)",
        ],
    },
    FirePreset {
        name: "Santa is Coming",
        scale: 0.4,
        speed: -0.5,
        colors: [
            "rgba(0,0,255,0)",
            "rgba(227,227,227,0.84)",
            "rgb(255,255,255)",
            "rgb(255,255,255)",
            "rgb(255,255,255)",
        ],
    },
];

impl FirePreset {
    pub fn to_preset(&self) -> Preset {
        let preset = Preset::new(self.name)
            .with("flame-scale", self.scale)
            .with("flame-movement-speed", self.speed);
        self.colors
            .iter()
            .enumerate()
            .fold(preset, |p, (i, color)| {
                p.with(format!("fire-color-{}", i + 1), *color)
            })
    }
}

pub fn presets() -> Vec<Preset> {
    FIRE_PRESETS.iter().map(FirePreset::to_preset).collect()
}
