//! Static CSS custom properties (`--name: value`) anywhere in the HTML.

use super::SignalExtractor;
use crate::config::SignalWeights;
use crate::emission::{push_font_stack, SourceKind, WeightedEmission};
use crate::font;
use crate::html;
use crate::page::PageInput;

/// Custom properties declared in `<style>` blocks or inline styles.
///
/// Names that hold a font family (`--font-heading`, not `--font-size-lg`)
/// are font signals. Names containing `color` or
/// `colour` are high-confidence color signals; any other name is a
/// medium-confidence color candidate. Values that are references
/// (`var(--x)`) are emitted as-is and dropped at normalization.
pub struct CustomPropertyExtractor;

impl SignalExtractor for CustomPropertyExtractor {
    fn name(&self) -> &'static str {
        "custom_properties"
    }

    fn extract(&self, page: &PageInput, weights: &SignalWeights) -> Vec<WeightedEmission> {
        let mut out = Vec::new();

        for (name, value) in html::custom_properties(&page.html) {
            let name = name.to_ascii_lowercase();
            if font::is_font_family_property(&name) {
                push_font_stack(
                    &mut out,
                    value,
                    weights.font_custom_property,
                    weights.font_stack_fallback,
                    SourceKind::FontCustomProperty,
                    SourceKind::FontStackFallback,
                );
            } else if name.contains("color") || name.contains("colour") {
                out.push(WeightedEmission::color(
                    value,
                    weights.color_custom_property,
                    SourceKind::ColorCustomProperty,
                ));
            } else {
                out.push(WeightedEmission::color(
                    value,
                    weights.custom_property,
                    SourceKind::CustomProperty,
                ));
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
    fn test_color_named_property_weighs_more() {
        let page = PageInput::from_html(
            "<style>:root{--brand-color:#112233;--accent:#ff6600;--spacing:4px}</style>",
        );
        let w = SignalWeights::default();
        let out = CustomPropertyExtractor.extract(&page, &w);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].value, "#112233");
        assert_eq!(out[0].weight, w.color_custom_property);
        assert_eq!(out[1].source, SourceKind::CustomProperty);
        assert_eq!(out[1].weight, w.custom_property);
    }

    #[test]
    fn test_font_property() {
        let page = PageInput::from_html(
            r#"<div style="--font-heading: 'Playfair Display', serif">x</div>"#,
        );
        let w = SignalWeights::default();
        let out = CustomPropertyExtractor.extract(&page, &w);

        assert_eq!(out[0].value, "Playfair Display");
        assert_eq!(out[0].source, SourceKind::FontCustomProperty);
        assert_eq!(out[1].value, "serif");
        assert!(out[1].weight < out[0].weight);
    }

    #[test]
    fn test_font_size_tokens_are_not_families() {
        let page = PageInput::from_html(
            "<style>:root{--font-size-lg:1.25rem;--heading-font-size:clamp(1rem, 2vw, 1.5rem);\
             --font-weight-bold:700}</style>",
        );
        let out = CustomPropertyExtractor.extract(&page, &SignalWeights::default());

        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|e| e.kind == SignalKind::Color));
        assert!(out.iter().all(|e| e.source == SourceKind::CustomProperty));
    }

    #[test]
    fn test_no_properties() {
        let page = PageInput::from_html("<p>plain -- text</p>");
        assert!(CustomPropertyExtractor
            .extract(&page, &SignalWeights::default())
            .is_empty());
    }
}
