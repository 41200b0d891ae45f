//! Color literals: `#rrggbb` or `<rgb|hsv|hls> v1 v2 v3`.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::LiteralError;

/// An RGB color with channels normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Build a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Channels rounded to 8 bits.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Canonical `#rrggbb` form.
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Color spaces accepted in the long form.
#[derive(Debug, Clone, Copy)]
enum Space {
    /// Red, green, blue in `[0, 255]`.
    Rgb,
    /// Hue in `[0, 360]`, saturation and value in `[0, 100]`.
    Hsv,
    /// Hue in `[0, 360]`, lightness and saturation in `[0, 100]`.
    Hls,
}

impl Space {
    /// Upper bound of each field.
    const fn divisors(self) -> [f64; 3] {
        match self {
            Self::Rgb => [255.0, 255.0, 255.0],
            Self::Hsv | Self::Hls => [360.0, 100.0, 100.0],
        }
    }
}

impl FromStr for Color {
    type Err = LiteralError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let s = text.trim().to_lowercase();
        if s.starts_with('#') {
            return parse_hex(&s);
        }

        let fields: Vec<&str> = s.split_whitespace().collect();
        let [space, a, b, c] = fields[..] else {
            return Err(LiteralError(format!(
                "invalid color '{}': expected '#rrggbb' or '<rgb|hsv|hls> <v1> <v2> <v3>'",
                text.trim()
            )));
        };
        let space = match space {
            "rgb" => Space::Rgb,
            "hsv" => Space::Hsv,
            "hls" => Space::Hls,
            other => {
                return Err(LiteralError(format!(
                    "unknown color space '{}': expected rgb, hsv or hls",
                    other
                )));
            }
        };

        let mut unit = [0.0; 3];
        for ((slot, field), max) in unit.iter_mut().zip([a, b, c]).zip(space.divisors()) {
            let value: f64 = field
                .parse()
                .map_err(|_| LiteralError(format!("invalid color component '{}'", field)))?;
            if !(0.0..=max).contains(&value) {
                return Err(LiteralError(format!(
                    "color component {} out of range [0, {}]",
                    field, max
                )));
            }
            *slot = value / max;
        }

        let [x, y, z] = unit;
        let (r, g, b) = match space {
            Space::Rgb => (x, y, z),
            Space::Hsv => hsv_to_rgb(x, y, z),
            Space::Hls => hls_to_rgb(x, y, z),
        };
        Ok(Self { r, g, b })
    }
}

/// Parse a lowercase `#rrggbb` literal.
fn parse_hex(s: &str) -> Result<Color, LiteralError> {
    let digits = &s[1..];
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(LiteralError(format!(
            "invalid hex color '{}': expected '#rrggbb'",
            s
        )));
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
    Ok(Color::from_rgb8(channel(0), channel(2), channel(4)))
}

/// HSV (all in `[0, 1]`) to RGB.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// HLS (all in `[0, 1]`) to RGB.
fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hls_channel(m1, m2, h + 1.0 / 3.0),
        hls_channel(m1, m2, h),
        hls_channel(m1, m2, h - 1.0 / 3.0),
    )
}

/// One channel of the HLS conversion.
fn hls_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}
