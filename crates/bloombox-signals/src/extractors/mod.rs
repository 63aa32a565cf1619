//! Signal source extractors.
//!
//! Each extractor scans one representation of a page and reports weighted
//! emissions. Extractors never fail: malformed input yields fewer emissions.
//! All weight constants live in [`SignalWeights`].

pub mod custom_properties;
pub mod font_links;
pub mod inline_style;
pub mod meta_theme;
pub mod rendered;
pub mod style_block;

pub use custom_properties::CustomPropertyExtractor;
pub use font_links::FontLinkExtractor;
pub use inline_style::InlineStyleExtractor;
pub use meta_theme::MetaThemeExtractor;
pub use rendered::RenderedDomExtractor;
pub use style_block::StyleBlockExtractor;

use crate::config::{PipelineConfig, SignalWeights};
use crate::emission::{push_font_stack, SourceKind, WeightedEmission};
use crate::html;
use crate::page::PageInput;

/// One strategy for pulling brand signals out of a page.
pub trait SignalExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Scan the page and report every signal occurrence found.
    fn extract(&self, page: &PageInput, weights: &SignalWeights) -> Vec<WeightedEmission>;
}

/// The fixed extractor list, in the order the pipeline runs them.
pub fn default_extractors(config: &PipelineConfig) -> Vec<Box<dyn SignalExtractor>> {
    vec![
        Box::new(CustomPropertyExtractor),
        Box::new(MetaThemeExtractor),
        Box::new(InlineStyleExtractor),
        Box::new(StyleBlockExtractor),
        Box::new(FontLinkExtractor),
        Box::new(RenderedDomExtractor {
            min_alpha: config.min_alpha,
        }),
    ]
}

/// Emit color and font signals for the standard declarations in `css`.
///
/// Shared by the inline-style and style-block extractors, which differ only
/// in where the CSS text comes from and what a color declaration is worth.
pub(crate) fn emit_declarations(
    out: &mut Vec<WeightedEmission>,
    css: &str,
    color_weight: u32,
    color_source: SourceKind,
    weights: &SignalWeights,
) {
    for decl in html::declarations(css) {
        if decl.property == "font-family" {
            push_font_stack(
                out,
                decl.value,
                weights.font_stack_primary,
                weights.font_stack_fallback,
                SourceKind::FontStackPrimary,
                SourceKind::FontStackFallback,
            );
        } else if let Some(color) = html::declared_color(&decl.property, decl.value) {
            out.push(WeightedEmission::color(color, color_weight, color_source));
        }
    }
}
