//! Page representations handed to the pipeline by the fetcher and renderer.

use serde::{Deserialize, Serialize};

/// Everything known about one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInput {
    /// Raw HTML text as fetched.
    pub html: String,
    /// URL the HTML was served from; used to resolve relative logo URLs.
    pub base_url: Option<String>,
    /// Computed-style sample from a headless render, when one was taken.
    pub rendered: Option<RenderedSample>,
}

impl PageInput {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_rendered(mut self, rendered: RenderedSample) -> Self {
        self.rendered = Some(rendered);
        self
    }
}

/// Computed styles sampled from a rendered DOM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderedSample {
    /// Custom properties resolved on `:root`.
    pub root_properties: Vec<RootProperty>,
    pub elements: Vec<ElementSample>,
}

/// A resolved `--name: value` pair from `:root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootProperty {
    pub name: String,
    pub value: String,
}

/// Computed style of one rendered element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementSample {
    /// Upper-case tag name, as `Element.tagName` reports it.
    pub tag: String,
    pub class_name: String,
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub display: String,
    pub visibility: String,
    pub background_color: Option<String>,
    pub color: Option<String>,
    pub border_color: Option<String>,
    pub font_family: Option<String>,
}

const BRAND_MARKERS: &[&str] = &["brand", "logo", "hero", "banner"];

impl ElementSample {
    /// Header/nav tags and brand-looking class or id names.
    pub fn is_brand_flagged(&self) -> bool {
        if self.tag.eq_ignore_ascii_case("header") || self.tag.eq_ignore_ascii_case("nav") {
            return true;
        }
        let class = self.class_name.to_ascii_lowercase();
        let id = self.id.to_ascii_lowercase();
        BRAND_MARKERS
            .iter()
            .any(|m| class.contains(m) || id.contains(m))
    }

    /// Zero-sized and hidden elements carry no visual signal.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && !self.display.eq_ignore_ascii_case("none")
            && !self.visibility.eq_ignore_ascii_case("hidden")
    }
}
