//! The end-to-end pipeline: extract → aggregate → rank → categorize.

use crate::aggregate::aggregate;
use crate::config::PipelineConfig;
use crate::emission::WeightedEmission;
use crate::extractors::{default_extractors, SignalExtractor};
use crate::logo::{select_logo, LogoCandidate};
use crate::page::PageInput;
use crate::rank::{
    categorize_colors, categorize_fonts, rank_colors, rank_fonts, CategorizedColors,
    CategorizedFonts, RankedSignalList,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the pipeline learned about one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSignals {
    /// All usable colors, strongest first.
    pub colors: RankedSignalList,
    /// All usable font families, strongest first.
    pub fonts: RankedSignalList,
    pub palette: CategorizedColors,
    pub typography: CategorizedFonts,
    pub logo: Option<LogoCandidate>,
}

impl BrandSignals {
    /// False when extraction found no usable brand color.
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// False when every font on the page was generic; `typography` then
    /// holds the configured defaults.
    pub fn has_fonts(&self) -> bool {
        !self.fonts.is_empty()
    }
}

/// A configured set of extractors plus the ranking rules.
///
/// Holds no per-page state; one instance can serve any number of pages from
/// any number of threads.
pub struct Pipeline {
    config: PipelineConfig,
    extractors: Vec<Box<dyn SignalExtractor>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let extractors = default_extractors(&config);
        Self { config, extractors }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every extractor over the page and collect their emissions.
    pub fn emissions(&self, page: &PageInput) -> Vec<WeightedEmission> {
        let mut all = Vec::new();
        for extractor in &self.extractors {
            let found = extractor.extract(page, &self.config.weights);
            debug!(extractor = extractor.name(), count = found.len(), "extracted");
            all.extend(found);
        }
        all
    }

    /// Extract, rank and categorize the brand signals of one page.
    pub fn run(&self, page: &PageInput) -> BrandSignals {
        let emissions = self.emissions(page);
        let aggregated = aggregate(&emissions);

        let colors = rank_colors(&aggregated.colors);
        let fonts = rank_fonts(&aggregated.fonts);
        let palette = categorize_colors(&colors);
        let typography = categorize_fonts(&fonts, &self.config.font_defaults);
        let logo = select_logo(&page.html, page.base_url.as_deref().unwrap_or(""));

        debug!(
            emissions = emissions.len(),
            colors = colors.len(),
            fonts = fonts.len(),
            logo = logo.is_some(),
            "brand signals ready"
        );

        BrandSignals {
            colors,
            fonts,
            palette,
            typography,
            logo,
        }
    }
}

/// Run the default pipeline over one page.
pub fn extract_brand_signals(page: &PageInput) -> BrandSignals {
    Pipeline::default().run(page)
}
