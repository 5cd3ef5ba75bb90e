use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit RGB color with a floating point alpha.
///
/// Serialized as `#rrggbb` or `#rrggbbaa`, which is also what project data
/// uses for track and clip colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Mix toward mid grey; `amount` 0.0 keeps the color, 1.0 is fully grey.
    pub fn desaturate(self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let grey = 0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32;
        let mix = |c: u8| (c as f32 + (grey - c as f32) * t).round().clamp(0.0, 255.0) as u8;
        Self {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
            a: self.a,
        }
    }

    /// Write the color as a CSS `rgba(...)` string into `out`, replacing its contents.
    pub fn write_css(&self, out: &mut String) {
        use std::fmt::Write;
        out.clear();
        let _ = write!(out, "rgba({},{},{},{})", self.r, self.g, self.b, self.a);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #rrggbb or #rrggbbaa")]
pub struct ParseColorError(pub String);

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f32 / 255.0)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a < 1.0 {
            write!(f, "{:02x}", (self.a.clamp(0.0, 1.0) * 255.0).round() as u8)?;
        }
        Ok(())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#ff8000".parse::<Rgba>().unwrap(), Rgba::rgb(255, 128, 0));
        let c: Rgba = "#00000080".parse().unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["ff8000", "#ff80", "#gg0000", "#ff8000ff00", "#é00000"] {
            assert!(bad.parse::<Rgba>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_display_omits_opaque_alpha() {
        assert_eq!(Rgba::rgb(1, 2, 3).to_string(), "#010203");
        assert_eq!(Rgba::rgba(1, 2, 3, 0.0).to_string(), "#01020300");
    }

    #[test]
    fn test_write_css_reuses_buffer() {
        let mut buf = String::from("stale contents");
        Rgba::rgba(10, 20, 30, 0.5).write_css(&mut buf);
        assert_eq!(buf, "rgba(10,20,30,0.5)");
    }

    #[test]
    fn test_desaturate_extremes() {
        let c = Rgba::rgb(200, 40, 40);
        assert_eq!(c.desaturate(0.0), c);
        let grey = c.desaturate(1.0);
        assert_eq!(grey.r, grey.g);
        assert_eq!(grey.g, grey.b);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgba::rgb(0x12, 0xab, 0xef)).unwrap();
        assert_eq!(json, "\"#12abef\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba::rgb(0x12, 0xab, 0xef));
    }
}
