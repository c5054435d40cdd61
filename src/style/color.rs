//! sRGB colors and CIE Lab interpolation.

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::hex(0xffffff);
    pub const BLACK: Rgb = Rgb::hex(0x000000);

    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self { r: (value >> 16) as u8, g: (value >> 8) as u8, b: value as u8 }
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        let value = u32::from_str_radix(digits, 16)
            .with_context(|| format!("invalid hex color {s:?}"))?;
        match digits.len() {
            6 => Ok(Rgb::hex(value)),
            3 => {
                let expand = |v: u32| ((v & 0xf) * 0x11) as u8;
                Ok(Rgb { r: expand(value >> 8), g: expand(value >> 4), b: expand(value) })
            }
            _ => bail!("invalid hex color {s:?}: expected 3 or 6 digits"),
        }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// D50 reference white and CIE constants, matching the Lab space used by web color libraries.
const XN: f64 = 0.96422;
const YN: f64 = 1.0;
const ZN: f64 = 0.82521;
const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

/// CIE L*a*b* color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl From<Rgb> for Lab {
    fn from(c: Rgb) -> Self {
        let (r, g, b) = (srgb_to_linear(c.r), srgb_to_linear(c.g), srgb_to_linear(c.b));
        let y = xyz_to_lab((0.2225045 * r + 0.7168786 * g + 0.0606169 * b) / YN);
        // Greys map exactly onto the neutral axis.
        let (x, z) = if c.r == c.g && c.g == c.b {
            (y, y)
        } else {
            (
                xyz_to_lab((0.4360747 * r + 0.3850649 * g + 0.1430804 * b) / XN),
                xyz_to_lab((0.0139322 * r + 0.0971045 * g + 0.7141733 * b) / ZN),
            )
        };
        Lab { l: 116.0 * y - 16.0, a: 500.0 * (x - y), b: 200.0 * (y - z) }
    }
}

impl From<Lab> for Rgb {
    fn from(c: Lab) -> Self {
        let y = (c.l + 16.0) / 116.0;
        let x = XN * lab_to_xyz(y + c.a / 500.0);
        let z = ZN * lab_to_xyz(y - c.b / 200.0);
        let y = YN * lab_to_xyz(y);
        Rgb {
            r: linear_to_srgb(3.1338561 * x - 1.6168667 * y - 0.4906146 * z),
            g: linear_to_srgb(-0.9787684 * x + 1.9161415 * y + 0.0334540 * z),
            b: linear_to_srgb(0.0719453 * x - 0.2289914 * y + 1.4052427 * z),
        }
    }
}

impl Lab {
    /// Euclidean distance in Lab (CIE76 ΔE).
    pub fn distance(&self, other: &Lab) -> f64 {
        ((self.l - other.l).powi(2) + (self.a - other.a).powi(2) + (self.b - other.b).powi(2)).sqrt()
    }
}

/// Linear interpolation in Lab between `from` (t = 0) and `to` (t = 1).
pub fn interpolate_lab(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let (a, b) = (Lab::from(from), Lab::from(to));
    let lerp = |x: f64, y: f64| x + t * (y - x);
    Rgb::from(Lab { l: lerp(a.l, b.l), a: lerp(a.a, b.a), b: lerp(a.b, b.b) })
}

fn srgb_to_linear(channel: u8) -> f64 {
    let x = channel as f64 / 255.0;
    if x <= 0.04045 { x / 12.92 } else { ((x + 0.055) / 1.055).powf(2.4) }
}

fn linear_to_srgb(x: f64) -> u8 {
    let v = if x <= 0.0031308 { 12.92 * x } else { 1.055 * x.powf(1.0 / 2.4) - 0.055 };
    (255.0 * v).round().clamp(0.0, 255.0) as u8
}

fn xyz_to_lab(t: f64) -> f64 {
    if t > T3 { t.cbrt() } else { t / T2 + T0 }
}

fn lab_to_xyz(t: f64) -> f64 {
    if t > T1 { t * t * t } else { T2 * (t - T0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_display_and_parse() {
        let c = Rgb::hex(0x004a77);
        assert_eq!(c.to_string(), "#004a77");
        assert_eq!("#004A77".parse::<Rgb>().unwrap(), c);
        assert_eq!("666".parse::<Rgb>().unwrap(), Rgb::hex(0x666666));
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#zzzzzz".parse::<Rgb>().is_err());
    }

    #[test]
    fn white_is_neutral_in_lab() {
        let lab = Lab::from(Rgb::WHITE);
        assert!((lab.l - 100.0).abs() < 1e-3);
        assert_eq!(lab.a, 0.0);
        assert_eq!(lab.b, 0.0);
    }

    #[test]
    fn lab_round_trip_is_stable() {
        for c in [Rgb::hex(0xf6b000), Rgb::hex(0x004a77), Rgb::hex(0x25db96), Rgb::hex(0x7f7f7f), Rgb::BLACK] {
            assert_eq!(Rgb::from(Lab::from(c)), c);
        }
    }

    #[test]
    fn interpolation_endpoints() {
        let base = Rgb::hex(0xff4a52);
        assert_eq!(interpolate_lab(Rgb::WHITE, base, 0.0), Rgb::WHITE);
        assert_eq!(interpolate_lab(Rgb::WHITE, base, 1.0), base);
    }

    #[test]
    fn interpolation_midpoint_is_between() {
        let base = Rgb::hex(0x004a77);
        let mid = Lab::from(interpolate_lab(Rgb::WHITE, base, 0.5));
        let (white, blue) = (Lab::from(Rgb::WHITE), Lab::from(base));
        assert!(mid.l < white.l && mid.l > blue.l);
        assert!((mid.distance(&white) - mid.distance(&blue)).abs() < 1.5);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::hex(0x666666)).unwrap();
        assert_eq!(json, "\"#666666\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::hex(0x666666));
    }
}
