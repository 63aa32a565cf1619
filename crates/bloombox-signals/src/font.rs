//! Font-family name cleanup and validity rules.

use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\d+(px)?$").unwrap());

static CSS_LENGTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[-+]?[\d.]*\d(rem|em|px|vw|vh|%|pt)?$").unwrap());

/// Custom property name parts that mark a font token other than the family.
const NON_FAMILY_TOKENS: &[&str] = &[
    "size", "weight", "height", "spacing", "style", "stretch", "variant", "feature", "display",
];

/// Generic CSS keywords and system fonts that only ever appear as fallbacks.
const GENERIC_FONTS: &[&str] = &[
    "normal",
    "bold",
    "italic",
    "inherit",
    "initial",
    "unset",
    "sans-serif",
    "serif",
    "monospace",
    "system-ui",
    "-apple-system",
    "blinkmacsystemfont",
    "segoe ui",
    "roboto",
    "arial",
    "helvetica",
    "times",
    "courier",
    "cursive",
    "fantasy",
    "times new roman",
    "courier new",
    "helvetica neue",
    "ui-sans-serif",
    "ui-serif",
    "ui-monospace",
];

/// Trim whitespace and surrounding quotes from a font-family entry.
///
/// Returns `None` when nothing is left.
pub fn normalize_font_name(raw: &str) -> Option<String> {
    let name = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .trim_end_matches("!important")
        .trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Whether a custom property name (without the leading `--`) holds a font
/// family, as opposed to `--font-size-lg` or `--heading-font-weight`.
pub fn is_font_family_property(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    if !lower.contains("font") && !lower.contains("family") {
        return false;
    }
    !NON_FAMILY_TOKENS.iter().any(|token| lower.contains(token))
}

/// Whether a normalized font name is a usable brand font.
pub fn is_brand_font(name: &str) -> bool {
    if name.chars().count() <= 2 || NUMERIC_RE.is_match(name) || CSS_LENGTH_RE.is_match(name) {
        return false;
    }
    // Function fragments: `var(--x)`, `clamp(1rem`, `1.5rem)`.
    if name.contains(['(', ')']) {
        return false;
    }
    let lower = name.to_ascii_lowercase();
    !GENERIC_FONTS.contains(&lower.as_str())
}

/// Split a `font-family` stack into its cleaned entries, in declaration order.
pub fn split_font_stack(stack: &str) -> Vec<String> {
    stack.split(',').filter_map(normalize_font_name).collect()
}

/// Turn a slug like `proxima-nova` into `Proxima Nova`.
pub fn title_case_slug(slug: &str) -> String {
    slug.split(['-', '_', '+', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
