//! Brand signal extraction for BloomboxAI.
//!
//! Turns a page's raw HTML (and, optionally, a computed-style sample from a
//! headless render) into ranked brand colors, ranked font families, a
//! primary/secondary split of each, and a logo URL.
//!
//! The pipeline is pure and synchronous: no network, no disk, no shared
//! state. Fetching and rendering belong to the caller.
//!
//! ```
//! use bloombox_signals::{extract_brand_signals, PageInput};
//!
//! let page = PageInput::from_html(
//!     r#"<style>:root{--brand-color:#112233}</style><img src="/logo.svg">"#,
//! )
//! .with_base_url("https://example.com");
//!
//! let signals = extract_brand_signals(&page);
//! assert_eq!(signals.colors.values(), vec!["#112233"]);
//! assert_eq!(signals.logo.unwrap().url, "https://example.com/logo.svg");
//! ```

pub mod aggregate;
pub mod color;
pub mod config;
pub mod emission;
pub mod extractors;
pub mod font;
pub mod html;
pub mod logo;
pub mod page;
pub mod pipeline;
pub mod rank;

pub use aggregate::{aggregate, Aggregate, FrequencyMap};
pub use color::{normalize_color, HexColor};
pub use config::{ConfigError, FontDefaults, PipelineConfig, SignalWeights};
pub use emission::{SignalKind, SourceKind, WeightedEmission};
pub use extractors::SignalExtractor;
pub use logo::{select_logo, select_logo_url, LogoCandidate, MatchReason};
pub use page::{ElementSample, PageInput, RenderedSample, RootProperty};
pub use pipeline::{extract_brand_signals, BrandSignals, Pipeline};
pub use rank::{
    categorize_colors, categorize_fonts, rank, rank_colors, rank_fonts, CategorizedColors,
    CategorizedFonts, RankedSignal, RankedSignalList,
};
