//! Logo candidate selection.
//!
//! Three passes in priority order, first hit wins:
//!
//! 1. `<img>` tags whose `src`, `alt`, `class` or `id` mentions a logo.
//! 2. Images inside `<header>`/`<nav>` whose `alt`/`class` mentions a logo or
//!    the site's own name.
//! 3. `<link rel="icon">`-style favicons.

use crate::html;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

static IMG_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").unwrap());
static LINK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<link\b[^>]*>").unwrap());
static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static LOGO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)logo|brand|icon").unwrap());

/// Which attribute made an element a logo candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    Src,
    Alt,
    Class,
    Id,
    /// A `<link rel="icon">` fallback.
    Rel,
}

/// The selected logo, with an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoCandidate {
    pub url: String,
    pub match_reason: MatchReason,
}

/// Pick the page's logo, or `None` if nothing looks like one.
///
/// Relative URLs are resolved against the origin of `base_url`. When
/// `base_url` is empty or unparseable, relative candidates are skipped.
pub fn select_logo(html: &str, base_url: &str) -> Option<LogoCandidate> {
    branded_img(html, base_url)
        .or_else(|| header_img(html, base_url))
        .or_else(|| link_icon(html, base_url))
}

/// [`select_logo`], URL only.
pub fn select_logo_url(html: &str, base_url: &str) -> Option<String> {
    select_logo(html, base_url).map(|c| c.url)
}

fn branded_img(html: &str, base_url: &str) -> Option<LogoCandidate> {
    IMG_TAG_RE.find_iter(html).find_map(|m| {
        let attrs = html::tag_attrs(m.as_str());
        let src = image_src(&attrs)?;

        let reason = [
            ("src", MatchReason::Src),
            ("alt", MatchReason::Alt),
            ("class", MatchReason::Class),
            ("id", MatchReason::Id),
        ]
        .into_iter()
        .find(|(name, _)| html::attr(&attrs, name).is_some_and(|v| LOGO_RE.is_match(v)))
        .map(|(_, reason)| reason)?;

        Some(LogoCandidate {
            url: resolve_url(src, base_url)?,
            match_reason: reason,
        })
    })
}

fn header_img(html: &str, base_url: &str) -> Option<LogoCandidate> {
    let selector = Selector::parse("header img, nav img").ok()?;
    let document = Html::parse_document(html);
    let site_name = site_name(html).map(|n| n.to_lowercase());

    document.select(&selector).find_map(|el| {
        let element = el.value();
        let src = element
            .attr("src")
            .or_else(|| element.attr("data-src"))
            .filter(|s| !s.trim().is_empty())?;
        let alt = element.attr("alt").unwrap_or("");
        let class = element.attr("class").unwrap_or("");

        let reason = if LOGO_RE.is_match(alt) {
            MatchReason::Alt
        } else if LOGO_RE.is_match(class) {
            MatchReason::Class
        } else if site_name
            .as_deref()
            .is_some_and(|name| alt.to_lowercase().contains(name))
        {
            MatchReason::Alt
        } else {
            return None;
        };

        Some(LogoCandidate {
            url: resolve_url(src, base_url)?,
            match_reason: reason,
        })
    })
}

fn link_icon(html: &str, base_url: &str) -> Option<LogoCandidate> {
    LINK_TAG_RE.find_iter(html).find_map(|m| {
        let attrs = html::tag_attrs(m.as_str());
        let rel = html::attr(&attrs, "rel")?.to_ascii_lowercase();
        let is_icon = rel
            .split_whitespace()
            .any(|token| token == "icon" || token == "apple-touch-icon");
        if !is_icon {
            return None;
        }
        let href = html::attr(&attrs, "href")?;
        Some(LogoCandidate {
            url: resolve_url(href, base_url)?,
            match_reason: MatchReason::Rel,
        })
    })
}

fn image_src(attrs: &[(String, String)]) -> Option<&str> {
    html::attr(attrs, "src")
        .or_else(|| html::attr(attrs, "data-src"))
        .filter(|s| !s.trim().is_empty())
}

/// The site's own name: `og:site_name`, else the lead segment of `<title>`.
fn site_name(html: &str) -> Option<String> {
    let from_meta = META_TAG_RE.find_iter(html).find_map(|m| {
        let attrs = html::tag_attrs(m.as_str());
        let property = html::attr(&attrs, "property").or_else(|| html::attr(&attrs, "name"))?;
        if !property.eq_ignore_ascii_case("og:site_name") {
            return None;
        }
        html::attr(&attrs, "content").map(|c| c.trim().to_string())
    });

    from_meta
        .or_else(|| {
            let title = TITLE_RE.captures(html)?.get(1)?.as_str();
            title
                .split(['|', '-', '\u{2013}', '\u{2014}', ':'])
                .next()
                .map(|s| s.trim().to_string())
        })
        .filter(|name| name.chars().count() >= 2)
}

/// Make `raw` absolute.
///
/// Absolute URLs pass through unchanged, `//host/path` gets `https:`, and
/// both `/path` and `path` are joined onto the base URL's origin.
pub fn resolve_url(raw: &str, base_url: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(rest) = raw.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if Url::parse(raw).is_ok() {
        return Some(raw.to_string());
    }

    let origin = Url::parse(base_url.trim()).ok()?.origin();
    if !origin.is_tuple() {
        return None;
    }
    let origin = origin.ascii_serialization();
    if raw.starts_with('/') {
        Some(format!("{origin}{raw}"))
    } else {
        Some(format!("{origin}/{raw}"))
    }
}
