//! Computed-style sampling inside a rendered page.
//!
//! One script collects the `:root` custom properties and the computed
//! colors/fonts of visible elements, and hands them back as a
//! [`RenderedSample`] for the signal pipeline.

use super::RenderContext;
use anyhow::{Context, Result};
use bloombox_signals::RenderedSample;
use tracing::debug;

/// Upper bound on sampled elements; large pages are cut off in document order.
pub const MAX_SAMPLED_ELEMENTS: usize = 1500;

const SAMPLE_SCRIPT: &str = r#"
(function(maxElements) {
    var root = document.documentElement;
    var rootStyle = getComputedStyle(root);
    var names = {};

    for (var i = 0; i < rootStyle.length; i++) {
        if (rootStyle[i].indexOf('--') === 0) names[rootStyle[i]] = true;
    }
    for (var s = 0; s < document.styleSheets.length; s++) {
        var rules;
        try { rules = document.styleSheets[s].cssRules; } catch (e) { continue; }
        if (!rules) continue;
        for (var r = 0; r < rules.length; r++) {
            var rule = rules[r];
            if (!rule.style || !rule.selectorText) continue;
            if (rule.selectorText.indexOf(':root') === -1 && rule.selectorText.indexOf('html') === -1) continue;
            for (var p = 0; p < rule.style.length; p++) {
                if (rule.style[p].indexOf('--') === 0) names[rule.style[p]] = true;
            }
        }
    }

    var rootProperties = [];
    Object.keys(names).forEach(function(name) {
        var value = rootStyle.getPropertyValue(name).trim();
        if (value) rootProperties.push({ name: name, value: value });
    });

    var elements = [];
    var nodes = document.body ? document.body.querySelectorAll('*') : [];
    for (var n = 0; n < nodes.length && elements.length < maxElements; n++) {
        var el = nodes[n];
        var style = getComputedStyle(el);
        var rect = el.getBoundingClientRect();
        var hasBorder = parseFloat(style.borderTopWidth) > 0 && style.borderTopStyle !== 'none';
        elements.push({
            tag: el.tagName,
            className: typeof el.className === 'string' ? el.className : (el.getAttribute('class') || ''),
            id: el.id || '',
            width: rect.width,
            height: rect.height,
            display: style.display,
            visibility: style.visibility,
            backgroundColor: style.backgroundColor || null,
            color: style.color || null,
            borderColor: hasBorder ? style.borderTopColor : null,
            fontFamily: style.fontFamily || null
        });
    }

    return JSON.stringify({ rootProperties: rootProperties, elements: elements });
})
"#;

/// Sample the current page of `context`.
///
/// The script result arrives as a JSON string; a plain object is accepted
/// too.
pub async fn sample_computed_styles(context: &dyn RenderContext) -> Result<RenderedSample> {
    let script = format!("{SAMPLE_SCRIPT}({MAX_SAMPLED_ELEMENTS})");
    let raw = context
        .execute_js(&script)
        .await
        .context("running style sampler")?;

    let sample: RenderedSample = match raw {
        serde_json::Value::String(s) => {
            serde_json::from_str(&s).context("parsing style sample")?
        }
        other => serde_json::from_value(other).context("parsing style sample")?,
    };

    debug!(
        root_properties = sample.root_properties.len(),
        elements = sample.elements.len(),
        "sampled computed styles"
    );
    Ok(sample)
}
