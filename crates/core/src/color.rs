//! Color normalization: hex strings, CSS3 color names, and RGB triples.
//!
//! Accepted input forms:
//!   - `#rgb` / `#rrggbb` hex (case-insensitive)
//!   - a CSS3 extended color keyword (`"orangered"`, `"Grey"`, ...)
//!   - exactly three numeric components, each in 0..=255
//!
//! A string without a leading `#` is looked up as a name first, then parsed
//! as bare hex digits.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An RGB color as sent to the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components in wire order.
    pub fn as_bytes(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn from_rgb24(value: u32) -> Self {
        Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_str(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        ColorSpec::try_from(&value)
            .and_then(normalize)
            .map_err(serde::de::Error::custom)
    }
}

/// Any color representation a caller may hand to a profile setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpec {
    /// Hex string or color name.
    Text(String),
    /// Raw numeric components; valid only if there are exactly three bytes.
    Components(Vec<i64>),
    /// Already-normalized color.
    Rgb(Color),
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Color> for ColorSpec {
    fn from(c: Color) -> Self {
        Self::Rgb(c)
    }
}

impl From<(u8, u8, u8)> for ColorSpec {
    fn from(rgb: (u8, u8, u8)) -> Self {
        Self::Rgb(rgb.into())
    }
}

impl From<[u8; 3]> for ColorSpec {
    fn from(rgb: [u8; 3]) -> Self {
        Self::Rgb(rgb.into())
    }
}

impl From<&[i64]> for ColorSpec {
    fn from(components: &[i64]) -> Self {
        Self::Components(components.to_vec())
    }
}

impl From<Vec<i64>> for ColorSpec {
    fn from(components: Vec<i64>) -> Self {
        Self::Components(components)
    }
}

impl TryFrom<&serde_json::Value> for ColorSpec {
    type Error = Error;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(s) => Ok(Self::Text(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_i64()
                        .ok_or_else(|| Error::InvalidColor(value.to_string()))
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Components),
            other => Err(Error::InvalidColor(other.to_string())),
        }
    }
}

/// Reduce any accepted representation to a [`Color`].
pub fn normalize(spec: impl Into<ColorSpec>) -> Result<Color> {
    match spec.into() {
        ColorSpec::Text(s) => parse_str(&s),
        ColorSpec::Components(components) => from_components(&components),
        ColorSpec::Rgb(color) => Ok(color),
    }
}

fn parse_str(s: &str) -> Result<Color> {
    let parsed = match s.strip_prefix('#') {
        Some(digits) => parse_hex_digits(digits),
        None => lookup_name(s).or_else(|| parse_hex_digits(s)),
    };
    parsed.ok_or_else(|| Error::InvalidColor(s.to_string()))
}

fn from_components(components: &[i64]) -> Result<Color> {
    let invalid = || Error::InvalidColor(format!("{components:?}"));
    let [r, g, b] = components else {
        return Err(invalid());
    };
    let byte = |c: &i64| u8::try_from(*c).map_err(|_| invalid());
    Ok(Color::new(byte(r)?, byte(g)?, byte(b)?))
}

/// Parse 3 or 6 hex digits (no `#`).
fn parse_hex_digits(digits: &str) -> Option<Color> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => u32::from_str_radix(digits, 16).ok().map(Color::from_rgb24),
        3 => {
            let value = u32::from_str_radix(digits, 16).ok()?;
            // Each short digit expands to a doubled byte: f -> ff.
            let expand = |nibble: u32| ((nibble & 0xF) * 0x11) as u8;
            Some(Color::new(
                expand(value >> 8),
                expand(value >> 4),
                expand(value),
            ))
        }
        _ => None,
    }
}

fn lookup_name(name: &str) -> Option<Color> {
    CSS3_NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, rgb)| Color::from_rgb24(*rgb))
}

/// CSS3 extended color keywords.
const CSS3_NAMES: &[(&str, u32)] = &[
    ("aliceblue", 0xF0F8FF),
    ("antiquewhite", 0xFAEBD7),
    ("aqua", 0x00FFFF),
    ("aquamarine", 0x7FFFD4),
    ("azure", 0xF0FFFF),
    ("beige", 0xF5F5DC),
    ("bisque", 0xFFE4C4),
    ("black", 0x000000),
    ("blanchedalmond", 0xFFEBCD),
    ("blue", 0x0000FF),
    ("blueviolet", 0x8A2BE2),
    ("brown", 0xA52A2A),
    ("burlywood", 0xDEB887),
    ("cadetblue", 0x5F9EA0),
    ("chartreuse", 0x7FFF00),
    ("chocolate", 0xD2691E),
    ("coral", 0xFF7F50),
    ("cornflowerblue", 0x6495ED),
    ("cornsilk", 0xFFF8DC),
    ("crimson", 0xDC143C),
    ("cyan", 0x00FFFF),
    ("darkblue", 0x00008B),
    ("darkcyan", 0x008B8B),
    ("darkgoldenrod", 0xB8860B),
    ("darkgray", 0xA9A9A9),
    ("darkgrey", 0xA9A9A9),
    ("darkgreen", 0x006400),
    ("darkkhaki", 0xBDB76B),
    ("darkmagenta", 0x8B008B),
    ("darkolivegreen", 0x556B2F),
    ("darkorange", 0xFF8C00),
    ("darkorchid", 0x9932CC),
    ("darkred", 0x8B0000),
    ("darksalmon", 0xE9967A),
    ("darkseagreen", 0x8FBC8F),
    ("darkslateblue", 0x483D8B),
    ("darkslategray", 0x2F4F4F),
    ("darkslategrey", 0x2F4F4F),
    ("darkturquoise", 0x00CED1),
    ("darkviolet", 0x9400D3),
    ("deeppink", 0xFF1493),
    ("deepskyblue", 0x00BFFF),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1E90FF),
    ("firebrick", 0xB22222),
    ("floralwhite", 0xFFFAF0),
    ("forestgreen", 0x228B22),
    ("fuchsia", 0xFF00FF),
    ("gainsboro", 0xDCDCDC),
    ("ghostwhite", 0xF8F8FF),
    ("gold", 0xFFD700),
    ("goldenrod", 0xDAA520),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xADFF2F),
    ("honeydew", 0xF0FFF0),
    ("hotpink", 0xFF69B4),
    ("indianred", 0xCD5C5C),
    ("indigo", 0x4B0082),
    ("ivory", 0xFFFFF0),
    ("khaki", 0xF0E68C),
    ("lavender", 0xE6E6FA),
    ("lavenderblush", 0xFFF0F5),
    ("lawngreen", 0x7CFC00),
    ("lemonchiffon", 0xFFFACD),
    ("lightblue", 0xADD8E6),
    ("lightcoral", 0xF08080),
    ("lightcyan", 0xE0FFFF),
    ("lightgoldenrodyellow", 0xFAFAD2),
    ("lightgray", 0xD3D3D3),
    ("lightgrey", 0xD3D3D3),
    ("lightgreen", 0x90EE90),
    ("lightpink", 0xFFB6C1),
    ("lightsalmon", 0xFFA07A),
    ("lightseagreen", 0x20B2AA),
    ("lightskyblue", 0x87CEFA),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xB0C4DE),
    ("lightyellow", 0xFFFFE0),
    ("lime", 0x00FF00),
    ("limegreen", 0x32CD32),
    ("linen", 0xFAF0E6),
    ("magenta", 0xFF00FF),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66CDAA),
    ("mediumblue", 0x0000CD),
    ("mediumorchid", 0xBA55D3),
    ("mediumpurple", 0x9370DB),
    ("mediumseagreen", 0x3CB371),
    ("mediumslateblue", 0x7B68EE),
    ("mediumspringgreen", 0x00FA9A),
    ("mediumturquoise", 0x48D1CC),
    ("mediumvioletred", 0xC71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xF5FFFA),
    ("mistyrose", 0xFFE4E1),
    ("moccasin", 0xFFE4B5),
    ("navajowhite", 0xFFDEAD),
    ("navy", 0x000080),
    ("oldlace", 0xFDF5E6),
    ("olive", 0x808000),
    ("olivedrab", 0x6B8E23),
    ("orange", 0xFFA500),
    ("orangered", 0xFF4500),
    ("orchid", 0xDA70D6),
    ("palegoldenrod", 0xEEE8AA),
    ("palegreen", 0x98FB98),
    ("paleturquoise", 0xAFEEEE),
    ("palevioletred", 0xDB7093),
    ("papayawhip", 0xFFEFD5),
    ("peachpuff", 0xFFDAB9),
    ("peru", 0xCD853F),
    ("pink", 0xFFC0CB),
    ("plum", 0xDDA0DD),
    ("powderblue", 0xB0E0E6),
    ("purple", 0x800080),
    ("red", 0xFF0000),
    ("rosybrown", 0xBC8F8F),
    ("royalblue", 0x4169E1),
    ("saddlebrown", 0x8B4513),
    ("salmon", 0xFA8072),
    ("sandybrown", 0xF4A460),
    ("seagreen", 0x2E8B57),
    ("seashell", 0xFFF5EE),
    ("sienna", 0xA0522D),
    ("silver", 0xC0C0C0),
    ("skyblue", 0x87CEEB),
    ("slateblue", 0x6A5ACD),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xFFFAFA),
    ("springgreen", 0x00FF7F),
    ("steelblue", 0x4682B4),
    ("tan", 0xD2B48C),
    ("teal", 0x008080),
    ("thistle", 0xD8BFD8),
    ("tomato", 0xFF6347),
    ("turquoise", 0x40E0D0),
    ("violet", 0xEE82EE),
    ("wheat", 0xF5DEB3),
    ("white", 0xFFFFFF),
    ("whitesmoke", 0xF5F5F5),
    ("yellow", 0xFFFF00),
    ("yellowgreen", 0x9ACD32),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_six_digits() {
        assert_eq!(normalize("#FF1800").unwrap(), Color::new(255, 24, 0));
        assert_eq!(normalize("#00ff7f").unwrap(), Color::new(0, 255, 127));
    }

    #[test]
    fn hex_three_digits_expand() {
        assert_eq!(normalize("#f80").unwrap(), Color::new(0xFF, 0x88, 0x00));
    }

    #[test]
    fn hex_roundtrip_is_case_insensitive() {
        for hex in ["#FF1800", "#0a0B0c", "#ffffff", "#000000", "#7F7f7F"] {
            let color = normalize(hex).unwrap();
            assert!(color.to_hex().eq_ignore_ascii_case(hex), "{hex}");
        }
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(normalize("red").unwrap(), Color::new(255, 0, 0));
        assert_eq!(normalize("OrangeRed").unwrap(), Color::new(255, 69, 0));
        assert_eq!(normalize("grey").unwrap(), normalize("gray").unwrap());
    }

    #[test]
    fn bare_hex_falls_back_after_name_lookup() {
        assert_eq!(normalize("ff1800").unwrap(), Color::new(255, 24, 0));
        // "add" is not a color name but is valid short hex.
        assert_eq!(normalize("add").unwrap(), Color::new(0xAA, 0xDD, 0xDD));
    }

    #[test]
    fn components_must_be_three_bytes() {
        assert_eq!(
            normalize(vec![255, 24, 0]).unwrap(),
            Color::new(255, 24, 0)
        );
        assert!(normalize(vec![255, 24]).is_err());
        assert!(normalize(vec![1, 2, 3, 4]).is_err());
        assert!(normalize(vec![256, 0, 0]).is_err());
        assert!(normalize(vec![-1, 0, 0]).is_err());
    }

    #[test]
    fn rejects_garbage_strings() {
        for bad in ["", "#", "#12", "#12345", "#gggggg", "notacolor", "#ff18000"] {
            let err = normalize(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidColor(_)), "{bad}");
        }
    }

    #[test]
    fn json_values_convert() {
        let from_str = ColorSpec::try_from(&serde_json::json!("#FF1800")).unwrap();
        let from_arr = ColorSpec::try_from(&serde_json::json!([255, 24, 0])).unwrap();
        assert_eq!(normalize(from_str).unwrap(), normalize(from_arr).unwrap());
        assert!(ColorSpec::try_from(&serde_json::json!(12)).is_err());
        assert!(ColorSpec::try_from(&serde_json::json!(["a", 0, 0])).is_err());
    }

    #[test]
    fn serde_uses_hex_string() {
        let color = Color::new(255, 24, 0);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#ff1800\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
        let from_list: Color = serde_json::from_str("[255, 24, 0]").unwrap();
        assert_eq!(from_list, color);
    }

    #[test]
    fn name_table_has_no_duplicate_keys() {
        for (i, (name, _)) in CSS3_NAMES.iter().enumerate() {
            assert!(
                CSS3_NAMES[i + 1..].iter().all(|(other, _)| other != name),
                "{name}"
            );
        }
        assert_eq!(CSS3_NAMES.len(), 147);
    }
}
