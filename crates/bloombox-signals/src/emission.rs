//! Weighted emissions: one extractor's report of one signal occurrence.

use serde::{Deserialize, Serialize};

/// Which signal family an emission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Color,
    Font,
}

/// Where an emission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    RenderedRootProperty,
    ColorCustomProperty,
    CustomProperty,
    FontCustomProperty,
    ThemeColorMeta,
    RenderedElement,
    InlineStyle,
    StyleBlock,
    FontStackPrimary,
    FontStackFallback,
    GoogleFontsLink,
    AdobeFonts,
}

/// A raw, not yet normalized signal value with its confidence weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedEmission {
    pub kind: SignalKind,
    pub value: String,
    pub weight: u32,
    pub source: SourceKind,
}

impl WeightedEmission {
    pub fn color(value: impl Into<String>, weight: u32, source: SourceKind) -> Self {
        Self {
            kind: SignalKind::Color,
            value: value.into(),
            weight,
            source,
        }
    }

    pub fn font(value: impl Into<String>, weight: u32, source: SourceKind) -> Self {
        Self {
            kind: SignalKind::Font,
            value: value.into(),
            weight,
            source,
        }
    }
}

/// Emit a font stack: the first entry as primary, the rest as fallbacks.
///
/// The primary weight is always kept strictly above the fallback weight.
pub(crate) fn push_font_stack(
    out: &mut Vec<WeightedEmission>,
    stack: &str,
    primary_weight: u32,
    fallback_weight: u32,
    primary_source: SourceKind,
    fallback_source: SourceKind,
) {
    let fallback_weight = fallback_weight.min(primary_weight.saturating_sub(1));
    for (i, name) in crate::font::split_font_stack(stack).into_iter().enumerate() {
        if i == 0 {
            out.push(WeightedEmission::font(name, primary_weight, primary_source));
        } else if fallback_weight > 0 {
            out.push(WeightedEmission::font(name, fallback_weight, fallback_source));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_stack_primary_outweighs_fallbacks() {
        let mut out = Vec::new();
        push_font_stack(
            &mut out,
            "'Brand Sans', Georgia, serif",
            6,
            3,
            SourceKind::FontStackPrimary,
            SourceKind::FontStackFallback,
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].value, "Brand Sans");
        assert!(out.iter().skip(1).all(|e| e.weight < out[0].weight));
    }

    #[test]
    fn test_font_stack_clamps_misconfigured_fallback() {
        let mut out = Vec::new();
        push_font_stack(
            &mut out,
            "Lato, Georgia",
            3,
            5,
            SourceKind::FontStackPrimary,
            SourceKind::FontStackFallback,
        );
        assert_eq!(out[0].weight, 3);
        assert_eq!(out[1].weight, 2);
    }
}
