//! `<style>` element bodies.

use super::{emit_declarations, SignalExtractor};
use crate::config::SignalWeights;
use crate::emission::{SourceKind, WeightedEmission};
use crate::html;
use crate::page::PageInput;

/// Bulk stylesheet declarations. Highest noise, lowest weight.
///
/// Custom properties inside the blocks are left to
/// [`CustomPropertyExtractor`](super::CustomPropertyExtractor).
pub struct StyleBlockExtractor;

impl SignalExtractor for StyleBlockExtractor {
    fn name(&self) -> &'static str {
        "style_block"
    }

    fn extract(&self, page: &PageInput, weights: &SignalWeights) -> Vec<WeightedEmission> {
        let mut out = Vec::new();
        for css in html::style_blocks(&page.html) {
            emit_declarations(
                &mut out,
                &css,
                weights.style_block,
                SourceKind::StyleBlock,
                weights,
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emission::SignalKind;

    #[test]
    fn test_style_block_declarations() {
        let page = PageInput::from_html(
            "<style>:root{--brand-color:#112233}\nbody { color: #333; background-color: rgb(250, 250, 250); font-family: 'Lato', Arial, sans-serif; }\n.btn{background:linear-gradient(#f00,#00f)}</style>",
        );
        let w = SignalWeights::default();
        let out = StyleBlockExtractor.extract(&page, &w);

        let colors: Vec<_> = out
            .iter()
            .filter(|e| e.kind == SignalKind::Color)
            .map(|e| e.value.as_str())
            .collect();
        assert_eq!(colors, vec!["#333", "rgb(250, 250, 250)"]);

        let fonts: Vec<_> = out
            .iter()
            .filter(|e| e.kind == SignalKind::Font)
            .map(|e| (e.value.as_str(), e.weight))
            .collect();
        assert_eq!(
            fonts,
            vec![
                ("Lato", w.font_stack_primary),
                ("Arial", w.font_stack_fallback),
                ("sans-serif", w.font_stack_fallback),
            ]
        );
    }

    #[test]
    fn test_unclosed_style_is_ignored() {
        let page = PageInput::from_html("<style>body{color:red}");
        assert!(StyleBlockExtractor
            .extract(&page, &SignalWeights::default())
            .is_empty());
    }
}
