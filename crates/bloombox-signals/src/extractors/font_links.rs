//! Hosted font services: Google Fonts links and Adobe Fonts (Typekit) kits.

use super::SignalExtractor;
use crate::config::SignalWeights;
use crate::emission::{SourceKind, WeightedEmission};
use crate::font::title_case_slug;
use crate::page::PageInput;
use regex::Regex;
use std::sync::LazyLock;

static GOOGLE_FONTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)fonts\.googleapis\.com/css2?\?([^"'\s)>]+)"#).unwrap()
});

static TYPEKIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)use\.typekit\.net|typekit\.com|Typekit\.load").unwrap());

static TK_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btk-([a-z][a-z0-9-]*[a-z0-9])").unwrap());

/// Families requested from Google Fonts, and Adobe Fonts `tk-*` families.
///
/// Each family is reported once per page regardless of how often it is
/// referenced.
pub struct FontLinkExtractor;

impl SignalExtractor for FontLinkExtractor {
    fn name(&self) -> &'static str {
        "font_links"
    }

    fn extract(&self, page: &PageInput, weights: &SignalWeights) -> Vec<WeightedEmission> {
        let mut families: Vec<(String, u32, SourceKind)> = Vec::new();
        let mut push = |name: String, weight: u32, source: SourceKind| {
            if !name.is_empty() && !families.iter().any(|(n, _, _)| *n == name) {
                families.push((name, weight, source));
            }
        };

        for caps in GOOGLE_FONTS_RE.captures_iter(&page.html) {
            if let Some(query) = caps.get(1) {
                for name in google_font_families(query.as_str()) {
                    push(name, weights.google_fonts_link, SourceKind::GoogleFontsLink);
                }
            }
        }

        if TYPEKIT_RE.is_match(&page.html) {
            for caps in TK_CLASS_RE.captures_iter(&page.html) {
                if let Some(slug) = caps.get(1) {
                    push(
                        title_case_slug(slug.as_str()),
                        weights.adobe_fonts,
                        SourceKind::AdobeFonts,
                    );
                }
            }
        }

        families
            .into_iter()
            .map(|(name, weight, source)| WeightedEmission::font(name, weight, source))
            .collect()
    }
}

/// Family names from a Google Fonts query string.
///
/// Handles both `css2?family=A&family=B:wght@400` and the legacy
/// `css?family=A|B:400,700` forms.
fn google_font_families(query: &str) -> Vec<String> {
    query
        .split("&amp;")
        .flat_map(|part| part.split('&'))
        .filter_map(|pair| pair.strip_prefix("family="))
        .flat_map(|value| value.split('|'))
        .filter_map(|family| {
            let name = family.split(':').next()?;
            let name = name.replace('+', " ").replace("%20", " ");
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}
