//! RGBA colors and their textual encoding
//!
//! Settings store colors as strings in the form the toolkit's color chooser
//! writes them: `rgb(r,g,b)` or `rgba(r,g,b,a)` with 0–255 channels and an
//! alpha in [0,1]. Hex forms (`#rrggbb`, `#rrggbbaa`) are accepted as well.

use crate::error::{PyreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA color with normalized channels in [0,1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 0–255 channels and a [0,1] alpha
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Decode `rgb()`, `rgba()` or hex notation.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim().to_ascii_lowercase();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(input, hex);
        }

        let open = text
            .find('(')
            .ok_or_else(|| PyreError::color(input, "expected rgb(...) or rgba(...)"))?;
        let Some(body) = text[open + 1..].strip_suffix(')') else {
            return Err(PyreError::color(input, "missing closing parenthesis"));
        };
        let func = text[..open].trim();
        let arity = match func {
            "rgb" => 3,
            "rgba" => 4,
            other => {
                return Err(PyreError::color(
                    input,
                    format!("unknown color function '{other}'"),
                ));
            }
        };

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != arity {
            return Err(PyreError::color(
                input,
                format!("{func}() takes {arity} components, got {}", parts.len()),
            ));
        }

        let mut channels = [0.0f32; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            let v = parse_number(input, part)?;
            if !(0.0..=255.0).contains(&v) {
                return Err(PyreError::color(
                    input,
                    format!("channel {v} outside 0-255"),
                ));
            }
            *slot = v / 255.0;
        }

        let a = match parts.get(3) {
            Some(part) => {
                let v = parse_number(input, part)?;
                if !(0.0..=1.0).contains(&v) {
                    return Err(PyreError::color(input, format!("alpha {v} outside 0-1")));
                }
                v
            }
            None => 1.0,
        };

        Ok(Self {
            r: channels[0],
            g: channels[1],
            b: channels[2],
            a,
        })
    }

    /// Encode as `rgb(r,g,b)` when opaque, `rgba(r,g,b,a)` otherwise
    pub fn to_css(&self) -> String {
        let (r, g, b) = (to_byte(self.r), to_byte(self.g), to_byte(self.b));
        let a = self.a.clamp(0.0, 1.0);
        if a >= 1.0 {
            format!("rgb({r},{g},{b})")
        } else {
            format!("rgba({r},{g},{b},{a})")
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = PyreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_number(input: &str, part: &str) -> Result<f32> {
    let v: f32 = part
        .parse()
        .map_err(|_| PyreError::color(input, format!("'{part}' is not a number")))?;
    if !v.is_finite() {
        return Err(PyreError::color(input, "components must be finite"));
    }
    Ok(v)
}

fn parse_hex(input: &str, hex: &str) -> Result<Color> {
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PyreError::color(input, "expected #rrggbb or #rrggbbaa"));
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| PyreError::color(input, "invalid hex digits"))
    };
    let a = if hex.len() == 8 {
        byte(6)? as f32 / 255.0
    } else {
        1.0
    };
    Ok(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_parse_rgba() {
        let c = Color::parse("rgba(103,7,80,0.5)").unwrap();
        assert!(approx(c.r, 103.0 / 255.0));
        assert!(approx(c.g, 7.0 / 255.0));
        assert!(approx(c.b, 80.0 / 255.0));
        assert!(approx(c.a, 0.5));
    }

    #[test]
    fn test_parse_rgb_defaults_alpha() {
        let c = Color::parse("rgb(255,200,0)").unwrap();
        assert_eq!(c.r, 1.0);
        assert!(approx(c.g, 200.0 / 255.0));
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_case() {
        let c = Color::parse("  RGBA( 255 , 255, 255 , 1 ) ").unwrap();
        assert_eq!(c, Color::WHITE);
    }

    #[test]
    fn test_parse_transparent() {
        assert_eq!(Color::parse("rgba(0,0,0,0)").unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_parse_hex() {
        let c = Color::parse("#ff8000").unwrap();
        assert_eq!(c.r, 1.0);
        assert!(approx(c.g, 128.0 / 255.0));
        assert_eq!(c.a, 1.0);

        let c = Color::parse("#00000000").unwrap();
        assert_eq!(c, Color::TRANSPARENT);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "red",
            "rgb(1,2)",
            "rgba(1,2,3)",
            "rgb(1,2,3,0.5)",
            "rgb(256,0,0)",
            "rgba(0,0,0,1.5)",
            "rgb(-1,0,0)",
            "rgb(a,b,c)",
            "rgb(1,2,3",
            "hsl(1,2,3)",
            "#12345",
        ] {
            assert!(Color::parse(bad).is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Color::WHITE.to_css(), "rgb(255,255,255)");
        assert_eq!(
            Color::parse("rgba(180, 55, 30, 0.7)").unwrap().to_css(),
            "rgba(180,55,30,0.7)"
        );
    }

    #[test]
    fn test_css_reparses_to_same_color() {
        let original = Color::parse("rgba(38,181,255,0.54)").unwrap();
        let reparsed = Color::parse(&original.to_css()).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_to_array_is_normalized() {
        let arr = Color::parse("rgba(255,166,25,1)").unwrap().to_array();
        assert!(arr.iter().all(|c| (0.0..=1.0).contains(c)));
    }
}
