//! Color normalization: any textual CSS color into canonical `#RRGGBB`.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Colors with an alpha channel below this are invisible for branding purposes.
pub const MIN_VISIBLE_ALPHA: f64 = 0.05;

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*(\d{1,3})(?:\.\d+)?\s*[,\s]\s*(\d{1,3})(?:\.\d+)?\s*[,\s]\s*(\d{1,3})(?:\.\d+)?\s*(?:[,/]\s*([0-9.]+%?)\s*)?\)$",
    )
    .unwrap()
});

/// Small fixed table of named CSS colors.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("white", [0xFF, 0xFF, 0xFF]),
    ("black", [0x00, 0x00, 0x00]),
    ("red", [0xFF, 0x00, 0x00]),
    ("blue", [0x00, 0x00, 0xFF]),
    ("green", [0x00, 0x80, 0x00]),
    ("yellow", [0xFF, 0xFF, 0x00]),
    ("cyan", [0x00, 0xFF, 0xFF]),
    ("magenta", [0xFF, 0x00, 0xFF]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
    ("orange", [0xFF, 0xA5, 0x00]),
    ("pink", [0xFF, 0xC0, 0xCB]),
    ("purple", [0x80, 0x00, 0x80]),
    ("brown", [0xA5, 0x2A, 0x2A]),
    ("navy", [0x00, 0x00, 0x80]),
];

/// A normalized RGB color, displayed as `#RRGGBB` (uppercase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const BLACK: HexColor = HexColor([0x00, 0x00, 0x00]);
    pub const WHITE: HexColor = HexColor([0xFF, 0xFF, 0xFF]);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// The `[r, g, b]` components.
    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// `R+G+B`. Three times the average brightness, without rounding.
    pub fn channel_sum(&self) -> u32 {
        self.0.iter().map(|&c| c as u32).sum()
    }

    /// Pure black or pure white. Near-neutrals are not neutral.
    pub fn is_neutral(&self) -> bool {
        *self == Self::BLACK || *self == Self::WHITE
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        normalize_color(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("not a color: {raw}")))
    }
}

/// Normalize a CSS color value.
///
/// Accepts `#RGB`, `#RRGGBB`, `rgb()`/`rgba()` and a handful of named colors.
/// Returns `None` for anything else (gradients, `transparent`, `currentColor`,
/// `var(...)` references, garbage). Alpha is ignored here; see [`color_alpha`].
pub fn normalize_color(input: &str) -> Option<HexColor> {
    let value = input.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(caps) = RGB_RE.captures(value) {
        let channel = |i: usize| -> Option<u8> {
            let n: u32 = caps.get(i)?.as_str().parse().ok()?;
            Some(n.min(255) as u8)
        };
        return Some(HexColor([channel(1)?, channel(2)?, channel(3)?]));
    }

    let lower = value.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgb)| HexColor(*rgb))
}

/// Alpha channel of an `rgba()`, `#RGBA` or `#RRGGBBAA` value, if it has one.
pub fn color_alpha(input: &str) -> Option<f64> {
    let value = input.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            4 => u8::from_str_radix(&hex[3..4], 16)
                .ok()
                .map(|a| (a * 17) as f64 / 255.0),
            8 => u8::from_str_radix(&hex[6..8], 16)
                .ok()
                .map(|a| a as f64 / 255.0),
            _ => None,
        };
    }

    let raw = RGB_RE.captures(value)?.get(4)?.as_str();
    match raw.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok().map(|p| p / 100.0),
        None => raw.parse::<f64>().ok(),
    }
}

/// Whether a raw value is visible enough to count as a color signal.
///
/// Values without an alpha channel are always visible.
pub fn is_visible(input: &str, min_alpha: f64) -> bool {
    let value = input.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return false;
    }
    color_alpha(value).map(|a| a >= min_alpha).unwrap_or(true)
}

fn parse_hex(hex: &str) -> Option<HexColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        // #RGB and #RGBA (alpha dropped)
        3 | 4 => Some(HexColor([nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17])),
        // #RRGGBB and #RRGGBBAA
        6 | 8 => Some(HexColor([byte(0)?, byte(2)?, byte(4)?])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> Option<String> {
        normalize_color(s).map(|c| c.to_string())
    }

    #[test]
    fn test_short_hex_expansion() {
        assert_eq!(norm("#ABC").as_deref(), Some("#AABBCC"));
        assert_eq!(norm("#abc").as_deref(), Some("#AABBCC"));
    }

    #[test]
    fn test_long_hex_uppercased() {
        assert_eq!(norm("#1a2b3c").as_deref(), Some("#1A2B3C"));
        assert_eq!(norm("  #FFFFFF ").as_deref(), Some("#FFFFFF"));
    }

    #[test]
    fn test_rgb_parsing() {
        assert_eq!(norm("rgb(255, 0, 128)").as_deref(), Some("#FF0080"));
        assert_eq!(norm("rgba(17, 34, 51, 0.5)").as_deref(), Some("#112233"));
        assert_eq!(norm("RGB(1,2,3)").as_deref(), Some("#010203"));
        assert_eq!(norm("rgb(0 128 255 / 50%)").as_deref(), Some("#0080FF"));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(norm("white").as_deref(), Some("#FFFFFF"));
        assert_eq!(norm("Navy").as_deref(), Some("#000080"));
        assert_eq!(norm("grey"), norm("gray"));
    }

    #[test]
    fn test_rejects_non_colors() {
        for input in [
            "",
            "transparent",
            "currentColor",
            "inherit",
            "var(--brand)",
            "linear-gradient(red, blue)",
            "#12",
            "#GGGGGG",
            "rgb(a, b, c)",
            "12px",
        ] {
            assert_eq!(normalize_color(input), None, "input {input:?}");
        }
    }

    #[test]
    fn test_idempotence() {
        for input in ["#abc", "rgb(255, 0, 128)", "navy", "#1a2b3c", "rgba(0,0,0,0.3)"] {
            let once = normalize_color(input).unwrap();
            let twice = normalize_color(&once.to_string()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_alpha() {
        assert_eq!(color_alpha("rgba(0, 0, 0, 0)"), Some(0.0));
        assert_eq!(color_alpha("rgba(0, 0, 0, 0.5)"), Some(0.5));
        assert_eq!(color_alpha("rgb(0 0 0 / 25%)"), Some(0.25));
        assert_eq!(color_alpha("#00000000"), Some(0.0));
        assert_eq!(color_alpha("#fff"), None);
        assert_eq!(color_alpha("rgb(1, 2, 3)"), None);

        assert!(!is_visible("rgba(0, 0, 0, 0)", MIN_VISIBLE_ALPHA));
        assert!(!is_visible("transparent", MIN_VISIBLE_ALPHA));
        assert!(is_visible("rgba(0, 0, 0, 0.06)", MIN_VISIBLE_ALPHA));
        assert!(is_visible("#112233", MIN_VISIBLE_ALPHA));
    }

    #[test]
    fn test_brightness_and_neutral() {
        assert_eq!(HexColor::new(0x11, 0x22, 0x33).channel_sum(), 102);
        assert_eq!(HexColor::new(0x14, 0x14, 0x15).channel_sum(), 61);
        assert!(HexColor::BLACK.is_neutral());
        assert!(HexColor::WHITE.is_neutral());
        assert!(!HexColor::new(1, 1, 1).is_neutral());
    }

    #[test]
    fn test_serde_as_string() {
        let c = HexColor::new(0xFF, 0x00, 0x80);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#FF0080\"");
        let back: HexColor = serde_json::from_str("\"#ff0080\"").unwrap();
        assert_eq!(back, c);
    }
}
