//! Human and JSON rendering of extraction results.

use crate::cli::output::{self, Styled};
use bloombox_signals::{BrandSignals, RankedSignalList};
use serde_json::json;

/// Ranked entries shown without `--verbose`.
const SHORT_LIST: usize = 8;

/// The `--json` document for one analyzed page.
pub fn signals_json(
    source: &str,
    signals: &BrandSignals,
    rendered: bool,
    elapsed_ms: u64,
) -> serde_json::Value {
    json!({
        "source": source,
        "rendered": rendered,
        "elapsed_ms": elapsed_ms,
        "signals": signals,
    })
}

/// Print a styled summary of `signals` to stderr.
pub fn print_signals(
    s: &Styled,
    source: &str,
    signals: &BrandSignals,
    rendered: bool,
    elapsed_ms: u64,
) {
    output::print_header(s);
    eprintln!(
        "  {} {}",
        s.cyan(source),
        s.dim(if rendered { "(rendered)" } else { "(static)" })
    );
    eprintln!();

    output::print_section(s, "Palette");
    print_bucket(s, "primary", signals.palette.primary.iter().map(|c| c.value.as_str()));
    print_bucket(s, "secondary", signals.palette.secondary.iter().map(|c| c.value.as_str()));
    eprintln!();

    output::print_section(s, "Typography");
    let font_sym = if signals.has_fonts() { s.ok_sym() } else { s.warn_sym() };
    output::print_check(font_sym, "primary", &signals.typography.primary);
    output::print_check(font_sym, "secondary", &signals.typography.secondary);
    eprintln!();

    output::print_section(s, "Logo");
    match &signals.logo {
        Some(logo) => output::print_check(
            s.ok_sym(),
            &format!("{:?}", logo.match_reason).to_lowercase(),
            &logo.url,
        ),
        None => output::print_check(s.fail_sym(), "none", &s.dim("no logo candidate")),
    }
    eprintln!();

    let limit = if output::is_verbose() { usize::MAX } else { SHORT_LIST };
    print_ranked(s, "Colors", &signals.colors, limit, true);
    print_ranked(s, "Fonts", &signals.fonts, limit, false);

    let status = if signals.has_colors() {
        s.bold("ok")
    } else {
        s.yellow("no brand colors")
    };
    output::print_status(s, &status, &output::format_duration_ms(elapsed_ms));
}

fn print_bucket<'a>(s: &Styled, label: &str, colors: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = colors.map(|c| format!("{}{c}", s.swatch(c))).collect();
    if line.is_empty() {
        output::print_check(s.warn_sym(), label, &s.dim("none"));
    } else {
        output::print_check(s.ok_sym(), label, &line.join("  "));
    }
}

fn print_ranked(s: &Styled, title: &str, list: &RankedSignalList, limit: usize, swatches: bool) {
    output::print_section(s, &format!("{title} ({})", list.len()));
    for signal in list.iter().take(limit) {
        let swatch = if swatches { s.swatch(&signal.value) } else { String::new() };
        eprintln!("    {swatch}{:<24} {}", signal.value, s.dim(&signal.weight.to_string()));
    }
    if list.len() > limit {
        eprintln!("    {}", s.dim(&format!("... {} more (--verbose)", list.len() - limit)));
    }
    eprintln!();
}
