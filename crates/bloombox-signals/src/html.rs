//! Regex helpers over raw HTML and CSS text.
//!
//! None of these build a DOM. Malformed markup yields fewer matches, never an
//! error.

use crate::color::normalize_color;
use regex::Regex;
use std::sync::LazyLock;

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .unwrap()
});

static STYLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>(.*?)</style>").unwrap());

static CSS_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:^|[{;\s"'])(color|background-color|background|border-color|border|fill|stroke|outline-color|font-family)\s*:\s*([^;{}]+)"#,
    )
    .unwrap()
});

static CUSTOM_PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[{;\s"'])--([A-Za-z0-9_-]+)\s*:\s*([^;{}"]+)"#).unwrap()
});

static COLOR_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#[0-9a-f]{3,8}\b|rgba?\([^)]*\)").unwrap()
});

/// All `name=value` attributes of a single tag, names lowercased.
pub fn tag_attrs(tag: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(tag)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

/// Look up one attribute in a list from [`tag_attrs`].
pub fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// Bodies of every `<style>` element, with CSS comments removed.
pub fn style_blocks(html: &str) -> Vec<String> {
    STYLE_BLOCK_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| CSS_COMMENT_RE.replace_all(m.as_str(), "").into_owned())
        .collect()
}

/// A standard (non-custom) property declaration found in CSS text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Lowercased property name.
    pub property: String,
    pub value: &'a str,
}

/// Color-bearing and `font-family` declarations, in source order.
pub fn declarations(css: &str) -> Vec<Declaration<'_>> {
    DECLARATION_RE
        .captures_iter(css)
        .filter_map(|caps| {
            Some(Declaration {
                property: caps.get(1)?.as_str().to_ascii_lowercase(),
                value: strip_important(caps.get(2)?.as_str()),
            })
        })
        .collect()
}

/// `--name: value` custom property declarations, in source order.
pub fn custom_properties(css: &str) -> Vec<(&str, &str)> {
    CUSTOM_PROPERTY_RE
        .captures_iter(css)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), strip_important(caps.get(2)?.as_str()))))
        .collect()
}

/// The color carried by a declaration value.
///
/// Plain color properties use the whole value. Shorthands (`background`,
/// `border`) contribute their first hex or `rgb()` token, else their first
/// named color word. Gradients never count.
pub fn declared_color<'a>(property: &str, value: &'a str) -> Option<&'a str> {
    if value.to_ascii_lowercase().contains("gradient(") {
        return None;
    }
    match property {
        "background" | "border" => COLOR_TOKEN_RE
            .find(value)
            .map(|m| m.as_str())
            .or_else(|| {
                value
                    .split_whitespace()
                    .find(|word| normalize_color(word).is_some())
            }),
        _ => Some(value.trim()),
    }
}

fn strip_important(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_suffix("!important")
        .map(str::trim_end)
        .unwrap_or(value)
}

fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_attrs() {
        let attrs = tag_attrs(r#"<img SRC="/logo.png" alt='Acme logo' class=brand data-x="a&amp;b">"#);
        assert_eq!(attr(&attrs, "src"), Some("/logo.png"));
        assert_eq!(attr(&attrs, "alt"), Some("Acme logo"));
        assert_eq!(attr(&attrs, "class"), Some("brand"));
        assert_eq!(attr(&attrs, "data-x"), Some("a&b"));
        assert_eq!(attr(&attrs, "id"), None);
    }

    #[test]
    fn test_style_blocks_strip_comments() {
        let html = "<style media=\"screen\">/* color: red */ a { color: blue; }</style><p>x</p><STYLE>b{}</STYLE>";
        let blocks = style_blocks(html);
        assert_eq!(blocks.len(), 2);
        assert!(!blocks[0].contains("red"));
    }

    #[test]
    fn test_declarations_skip_custom_properties() {
        let css = ":root{--brand-color:#112233;} a{color:#fff !important;border-color: red} p{font-family: Inter, serif}";
        let decls = declarations(css);
        let props: Vec<_> = decls.iter().map(|d| d.property.as_str()).collect();
        assert_eq!(props, vec!["color", "border-color", "font-family"]);
        assert_eq!(decls[0].value, "#fff");
    }

    #[test]
    fn test_custom_properties() {
        let props = custom_properties(":root { --brand-color: #112233; --font-heading: 'Lato', serif }");
        assert_eq!(props, vec![("brand-color", "#112233"), ("font-heading", "'Lato', serif")]);
    }

    #[test]
    fn test_declared_color() {
        assert_eq!(declared_color("color", " #abc "), Some("#abc"));
        assert_eq!(
            declared_color("background", "url(x.png) no-repeat #FF0000"),
            Some("#FF0000")
        );
        assert_eq!(declared_color("background", "linear-gradient(#fff, #000)"), None);
        assert_eq!(declared_color("border", "1px solid"), None);
    }

    #[test]
    fn test_shorthand_named_colors() {
        assert_eq!(declared_color("background", "white"), Some("white"));
        assert_eq!(declared_color("border", "1px solid navy"), Some("navy"));
        assert_eq!(declared_color("border", "none"), None);
        assert_eq!(declared_color("background", "transparent url(x.png)"), None);
        assert_eq!(declared_color("border", "2px dashed red #00FF00"), Some("#00FF00"));
    }
}
