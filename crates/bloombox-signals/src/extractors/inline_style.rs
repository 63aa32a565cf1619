//! `style="..."` attributes.

use super::{emit_declarations, SignalExtractor};
use crate::config::SignalWeights;
use crate::emission::{SourceKind, WeightedEmission};
use crate::page::PageInput;
use regex::Regex;
use std::sync::LazyLock;

static STYLE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)[\s"']style\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Ad-hoc inline styling. Low confidence.
pub struct InlineStyleExtractor;

impl SignalExtractor for InlineStyleExtractor {
    fn name(&self) -> &'static str {
        "inline_style"
    }

    fn extract(&self, page: &PageInput, weights: &SignalWeights) -> Vec<WeightedEmission> {
        let mut out = Vec::new();
        for caps in STYLE_ATTR_RE.captures_iter(&page.html) {
            if let Some(css) = caps.get(1).or_else(|| caps.get(2)) {
                emit_declarations(
                    &mut out,
                    css.as_str(),
                    weights.inline_style,
                    SourceKind::InlineStyle,
                    weights,
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emission::SignalKind;

    #[test]
    fn test_inline_colors_and_fonts() {
        let page = PageInput::from_html(
            r#"<div style="color:#112233; background: url(a.png) #fff"><span style='font-family: "Brand Grotesk", sans-serif'>x</span></div>"#,
        );
        let w = SignalWeights::default();
        let out = InlineStyleExtractor.extract(&page, &w);

        let colors: Vec<_> = out
            .iter()
            .filter(|e| e.kind == SignalKind::Color)
            .map(|e| e.value.as_str())
            .collect();
        assert_eq!(colors, vec!["#112233", "#fff"]);
        assert!(out
            .iter()
            .filter(|e| e.kind == SignalKind::Color)
            .all(|e| e.weight == w.inline_style));

        let fonts: Vec<_> = out.iter().filter(|e| e.kind == SignalKind::Font).collect();
        assert_eq!(fonts[0].value, "Brand Grotesk");
        assert_eq!(fonts[0].source, SourceKind::FontStackPrimary);
    }

    #[test]
    fn test_ignores_data_style_attributes() {
        let page = PageInput::from_html(r#"<div data-style="color:red">x</div>"#);
        assert!(InlineStyleExtractor
            .extract(&page, &SignalWeights::default())
            .is_empty());
    }
}
