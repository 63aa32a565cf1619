//! Pipeline configuration: the weight table and categorization defaults.
//!
//! Every field has a default, so a partial JSON document only overrides what
//! it names. Only the relative order of the weights matters to ranking.

use crate::color::MIN_VISIBLE_ALPHA;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Confidence weights per signal source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    /// Computed custom property on `:root` from a rendered page.
    pub rendered_root_property: u32,
    /// Static custom property whose name mentions `color`.
    pub color_custom_property: u32,
    /// Static custom property with any other name.
    pub custom_property: u32,
    /// `<meta name="theme-color">`.
    pub theme_color_meta: u32,
    pub brand_background: u32,
    pub brand_text: u32,
    pub brand_border: u32,
    pub element_background: u32,
    pub element_text: u32,
    pub element_border: u32,
    /// Color property in a `style="..."` attribute.
    pub inline_style: u32,
    /// Color property inside a `<style>` block.
    pub style_block: u32,

    pub font_custom_property: u32,
    pub font_stack_primary: u32,
    pub font_stack_fallback: u32,
    pub google_fonts_link: u32,
    pub adobe_fonts: u32,
    pub rendered_font_brand: u32,
    pub rendered_font: u32,
    pub rendered_font_fallback_brand: u32,
    pub rendered_font_fallback: u32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            rendered_root_property: 30,
            color_custom_property: 15,
            custom_property: 10,
            theme_color_meta: 12,
            brand_background: 10,
            brand_text: 8,
            brand_border: 6,
            element_background: 5,
            element_text: 3,
            element_border: 2,
            inline_style: 3,
            style_block: 2,

            font_custom_property: 12,
            font_stack_primary: 6,
            font_stack_fallback: 3,
            google_fonts_link: 2,
            adobe_fonts: 1,
            rendered_font_brand: 8,
            rendered_font: 4,
            rendered_font_fallback_brand: 2,
            rendered_font_fallback: 1,
        }
    }
}

/// Font names used when the page yields fewer than two usable fonts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDefaults {
    pub primary: String,
    pub secondary: String,
}

impl Default for FontDefaults {
    fn default() -> Self {
        Self {
            primary: "Inter".to_string(),
            secondary: "Open Sans".to_string(),
        }
    }
}

/// Everything the pipeline needs besides the page itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub weights: SignalWeights,
    pub font_defaults: FontDefaults,
    /// Rendered colors below this alpha are skipped.
    pub min_alpha: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            font_defaults: FontDefaults::default(),
            min_alpha: MIN_VISIBLE_ALPHA,
        }
    }
}

impl PipelineConfig {
    /// Load a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weight_ordering() {
        let w = SignalWeights::default();
        assert!(w.rendered_root_property > w.color_custom_property);
        assert!(w.color_custom_property > w.custom_property);
        assert!(w.custom_property > w.inline_style);
        assert!(w.inline_style > w.style_block);
        assert!(w.brand_background > w.element_background);
        assert!(w.font_custom_property > w.font_stack_primary);
        assert!(w.font_stack_primary > w.font_stack_fallback);
        assert!(w.font_stack_fallback > w.google_fonts_link);
        assert!(w.google_fonts_link > w.adobe_fonts);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"weights": {{"style_block": 1}}, "min_alpha": 0.1}}"#).unwrap();

        let config = PipelineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.weights.style_block, 1);
        assert_eq!(config.weights.rendered_root_property, 30);
        assert_eq!(config.font_defaults.primary, "Inter");
        assert!((config.min_alpha - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PipelineConfig::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = PipelineConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
