//! Color parsing and CSS formatting.
//!
//! Colors are stored as 8-bit sRGB with alpha and written to the surface as
//! CSS color strings.

use palette::rgb::Rgb;
use palette::{Alpha, FromColor, Hsla, Srgba};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// An sRGB color with alpha.
///
/// Serialized as its CSS string (`"#ff8800"`, `"rgba(0, 0, 0, 0.5)"`), and
/// parsed from any format accepted by [`parse_color`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub Srgba<u8>);

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(Alpha {
            color: Rgb {
                red,
                green,
                blue,
                standard: PhantomData,
            },
            alpha,
        })
    }

    pub fn red(&self) -> u8 {
        self.0.color.red
    }

    pub fn green(&self) -> u8 {
        self.0.color.green
    }

    pub fn blue(&self) -> u8 {
        self.0.color.blue
    }

    pub fn alpha(&self) -> u8 {
        self.0.alpha
    }

    /// Formats the color as a CSS color value.
    ///
    /// Opaque colors use the `#rrggbb` form; translucent ones use `rgba()`.
    pub fn to_css(&self) -> String {
        if self.alpha() == 255 {
            format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.red(),
                self.green(),
                self.blue(),
                (self.alpha() as f32 / 255.0 * 1000.0).round() / 1000.0
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color: {:?}", self.0)
    }
}

impl std::error::Error for ColorParseError {}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

/// Parse a color string.
///
/// Supports the following formats:
/// - Hex colors: #RGB, #RGBA, #RRGGBB, #RRGGBBAA (with or without # prefix)
/// - RGB/RGBA: rgb(r, g, b), rgba(r, g, b, a)
/// - HSL/HSLA: hsl(h, s%, l%), hsla(h, s%, l%, a)
/// - CSS named colors (black, white, steelblue, ...) and `transparent`
///
/// # Examples
///
/// ```
/// use cubed_core::color::parse_color;
///
/// let red = parse_color("#ff0000").unwrap();
/// let green = parse_color("rgb(0, 255, 0)").unwrap();
/// let blue = parse_color("hsla(240, 100%, 50%, 1.0)").unwrap();
/// let black = parse_color("black").unwrap();
/// # assert_eq!(red.red(), 255);
/// # assert_eq!(green.green(), 255);
/// # assert_eq!(blue.blue(), 255);
/// # assert_eq!(black.alpha(), 255);
/// ```
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();

    if value.eq_ignore_ascii_case("transparent") {
        return Some(Color::rgba(0, 0, 0, 0));
    }

    if value.starts_with("rgb") {
        return parse_rgb_color(value);
    }

    if value.starts_with("hsl") {
        return parse_hsl_color(value);
    }

    if let Some(color) = parse_hex_color(value) {
        return Some(color);
    }

    let named = palette::named::from_str(&value.to_ascii_lowercase())?;
    Some(Color::rgb(named.red, named.green, named.blue))
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).ok();
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::rgb(short(0)?, short(1)?, short(2)?)),
        4 => Some(Color::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Some(Color::rgb(long(0)?, long(2)?, long(4)?)),
        8 => Some(Color::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
        _ => None,
    }
}

/// Returns the comma separated arguments of `name(...)` or `namea(...)`.
fn function_args<'a>(value: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let rest = value.strip_prefix(name)?;
    let rest = rest.strip_prefix('a').unwrap_or(rest);
    let inner = rest.trim().strip_prefix('(')?.strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

fn parse_rgb_color(value: &str) -> Option<Color> {
    let parts = function_args(value, "rgb")?;
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let r = parse_rgb_component(parts[0])?;
    let g = parse_rgb_component(parts[1])?;
    let b = parse_rgb_component(parts[2])?;
    let a = match parts.get(3) {
        Some(alpha) => parse_alpha(alpha)?,
        None => 255,
    };

    Some(Color::rgba(r, g, b, a))
}

fn parse_hsl_color(value: &str) -> Option<Color> {
    let parts = function_args(value, "hsl")?;
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    // h: degrees, s and l: percentages (the % sign is optional)
    let h = parts[0].trim_end_matches("deg").parse::<f32>().ok()?;
    let s = parse_percentage(parts[1])?;
    let l = parse_percentage(parts[2])?;
    let a = match parts.get(3) {
        Some(alpha) => alpha.parse::<f32>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };

    let hsla: Hsla<palette::encoding::Srgb, f32> = Hsla::new(h, s, l, a);
    let rgba = Srgba::<f32>::from_color(hsla);
    Some(Color(rgba.into_format::<u8, u8>()))
}

fn parse_percentage(value: &str) -> Option<f32> {
    let number = value.strip_suffix('%').unwrap_or(value);
    number.parse::<f32>().ok().map(|v| (v / 100.0).clamp(0.0, 1.0))
}

/// A single RGB component: a number (0-255) or a percentage
fn parse_rgb_component(value: &str) -> Option<u8> {
    if let Some(percent) = value.strip_suffix('%') {
        let v = percent.parse::<f32>().ok()?.clamp(0.0, 100.0);
        Some((v / 100.0 * 255.0).round() as u8)
    } else {
        value.parse::<u8>().ok()
    }
}

fn parse_alpha(value: &str) -> Option<u8> {
    let v = value.parse::<f32>().ok()?.clamp(0.0, 1.0);
    Some((v * 255.0).round() as u8)
}
