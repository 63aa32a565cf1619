//! `<meta name="theme-color">` and friends.

use super::SignalExtractor;
use crate::config::SignalWeights;
use crate::emission::{SourceKind, WeightedEmission};
use crate::html;
use crate::page::PageInput;
use regex::Regex;
use std::sync::LazyLock;

static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());

const THEME_META_NAMES: &[&str] = &["theme-color", "msapplication-tilecolor"];

/// Explicit brand color declarations in `<meta>` tags.
pub struct MetaThemeExtractor;

impl SignalExtractor for MetaThemeExtractor {
    fn name(&self) -> &'static str {
        "meta_theme"
    }

    fn extract(&self, page: &PageInput, weights: &SignalWeights) -> Vec<WeightedEmission> {
        META_TAG_RE
            .find_iter(&page.html)
            .filter_map(|m| {
                let attrs = html::tag_attrs(m.as_str());
                let name = html::attr(&attrs, "name")?.to_ascii_lowercase();
                if !THEME_META_NAMES.contains(&name.as_str()) {
                    return None;
                }
                let content = html::attr(&attrs, "content")?;
                Some(WeightedEmission::color(
                    content.trim(),
                    weights.theme_color_meta,
                    SourceKind::ThemeColorMeta,
                ))
            })
            .collect()
    }
}
