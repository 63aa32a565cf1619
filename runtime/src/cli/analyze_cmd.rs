//! `bloombox analyze <file>`: run the pipeline over a saved HTML file.

use crate::audit::logger::{record_run, RunRecord};
use crate::cli::output::{self, Styled};
use crate::cli::report;
use crate::config::RuntimeConfig;
use anyhow::{Context, Result};
use bloombox_signals::{BrandSignals, PageInput, Pipeline, RenderedSample};
use std::path::Path;
use std::time::Instant;

/// Read `file` (and an optional rendered sample) into a [`PageInput`].
pub fn load_page(file: &Path, base_url: Option<&str>, sample: Option<&Path>) -> Result<PageInput> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let mut page = PageInput::from_html(html);
    if let Some(base) = base_url {
        page = page.with_base_url(base);
    }
    if let Some(sample_path) = sample {
        let data = std::fs::read_to_string(sample_path)
            .with_context(|| format!("failed to read {}", sample_path.display()))?;
        let rendered: RenderedSample = serde_json::from_str(&data)
            .with_context(|| format!("invalid rendered sample: {}", sample_path.display()))?;
        page = page.with_rendered(rendered);
    }
    Ok(page)
}

/// Analyze one file with the configured pipeline.
pub fn analyze_file(
    pipeline: &Pipeline,
    file: &Path,
    base_url: Option<&str>,
    sample: Option<&Path>,
) -> Result<BrandSignals> {
    let page = load_page(file, base_url, sample)?;
    Ok(pipeline.run(&page))
}

/// Run the analyze command.
pub fn run(
    config: &RuntimeConfig,
    file: &Path,
    base_url: Option<&str>,
    sample: Option<&Path>,
) -> Result<()> {
    let s = Styled::new();
    let start = Instant::now();
    let source = file.display().to_string();
    let pipeline = Pipeline::new(config.pipeline.clone());

    let signals = match analyze_file(&pipeline, file, base_url, sample) {
        Ok(signals) => signals,
        Err(e) => {
            record_run(
                config.audit_log.as_deref(),
                &RunRecord::failure("analyze", &source, &format!("{e:#}"), elapsed_ms(start)),
            );
            return Err(e);
        }
    };
    let elapsed = elapsed_ms(start);
    let rendered = sample.is_some();

    record_run(
        config.audit_log.as_deref(),
        &RunRecord::success("analyze", &source, &signals, rendered, elapsed),
    );

    if output::is_json() {
        output::print_json(&report::signals_json(&source, &signals, rendered, elapsed));
    } else if !output::is_quiet() {
        report::print_signals(&s, &source, &signals, rendered, elapsed);
    }
    Ok(())
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
