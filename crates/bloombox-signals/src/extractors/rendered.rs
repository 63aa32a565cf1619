//! Computed styles sampled from a rendered DOM.

use super::SignalExtractor;
use crate::color;
use crate::config::SignalWeights;
use crate::emission::{push_font_stack, SourceKind, WeightedEmission};
use crate::font;
use crate::page::{ElementSample, PageInput};

/// Cascade-resolved `:root` custom properties and per-element computed colors.
///
/// Root properties are the strongest signal the pipeline sees. Element colors
/// are weighted by the element's brand flag, and invisible elements or
/// near-transparent colors are skipped entirely. Emits nothing when the page
/// was not rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderedDomExtractor {
    /// Colors with a lower alpha channel are ignored.
    pub min_alpha: f64,
}

impl Default for RenderedDomExtractor {
    fn default() -> Self {
        Self {
            min_alpha: color::MIN_VISIBLE_ALPHA,
        }
    }
}

impl SignalExtractor for RenderedDomExtractor {
    fn name(&self) -> &'static str {
        "rendered_dom"
    }

    fn extract(&self, page: &PageInput, weights: &SignalWeights) -> Vec<WeightedEmission> {
        let Some(sample) = &page.rendered else {
            return Vec::new();
        };
        let mut out = Vec::new();

        for prop in &sample.root_properties {
            let name = prop.name.to_ascii_lowercase();
            if font::is_font_family_property(&name) {
                push_font_stack(
                    &mut out,
                    &prop.value,
                    weights.rendered_root_property,
                    weights.font_stack_fallback,
                    SourceKind::RenderedRootProperty,
                    SourceKind::FontStackFallback,
                );
            } else if color::is_visible(&prop.value, self.min_alpha) {
                out.push(WeightedEmission::color(
                    prop.value.trim(),
                    weights.rendered_root_property,
                    SourceKind::RenderedRootProperty,
                ));
            }
        }

        for element in sample.elements.iter().filter(|e| e.is_visible()) {
            emit_element(&mut out, element, weights, self.min_alpha);
        }

        out
    }
}

fn emit_element(
    out: &mut Vec<WeightedEmission>,
    element: &ElementSample,
    weights: &SignalWeights,
    min_alpha: f64,
) {
    let brand = element.is_brand_flagged();
    let (background, text, border) = if brand {
        (weights.brand_background, weights.brand_text, weights.brand_border)
    } else {
        (
            weights.element_background,
            weights.element_text,
            weights.element_border,
        )
    };

    for (value, weight) in [
        (&element.background_color, background),
        (&element.color, text),
        (&element.border_color, border),
    ] {
        if let Some(value) = value {
            if color::is_visible(value, min_alpha) {
                out.push(WeightedEmission::color(
                    value.trim(),
                    weight,
                    SourceKind::RenderedElement,
                ));
            }
        }
    }

    if let Some(stack) = &element.font_family {
        let (primary, fallback) = if brand {
            (weights.rendered_font_brand, weights.rendered_font_fallback_brand)
        } else {
            (weights.rendered_font, weights.rendered_font_fallback)
        };
        push_font_stack(
            out,
            stack,
            primary,
            fallback,
            SourceKind::RenderedElement,
            SourceKind::RenderedElement,
        );
    }
}
