//! `bloombox batch <files...>`: analyze many saved pages in parallel.

use crate::audit::logger::{record_run, RunRecord};
use crate::cli::analyze_cmd::analyze_file;
use crate::cli::output::{self, Styled};
use crate::config::RuntimeConfig;
use anyhow::{bail, Result};
use bloombox_signals::{BrandSignals, Pipeline};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;

/// Outcome for one file.
pub struct BatchItem {
    pub file: PathBuf,
    pub result: Result<BrandSignals>,
    pub elapsed_ms: u64,
}

impl BatchItem {
    /// One JSON line: `{"file", "signals"}` or `{"file", "error"}`.
    pub fn to_json(&self) -> serde_json::Value {
        let file = self.file.display().to_string();
        match &self.result {
            Ok(signals) => json!({ "file": file, "elapsed_ms": self.elapsed_ms, "signals": signals }),
            Err(e) => json!({ "file": file, "elapsed_ms": self.elapsed_ms, "error": format!("{e:#}") }),
        }
    }
}

/// Analyze every file on the rayon pool, preserving input order.
pub fn analyze_all(
    pipeline: &Pipeline,
    files: &[PathBuf],
    base_url: Option<&str>,
    progress: &ProgressBar,
) -> Vec<BatchItem> {
    files
        .par_iter()
        .map(|file| {
            let start = Instant::now();
            let result = analyze_file(pipeline, file, base_url, None);
            progress.inc(1);
            BatchItem {
                file: file.clone(),
                result,
                elapsed_ms: start.elapsed().as_millis() as u64,
            }
        })
        .collect()
}

/// Run the batch command.
pub fn run(config: &RuntimeConfig, files: &[PathBuf], base_url: Option<&str>) -> Result<()> {
    if files.is_empty() {
        bail!("no input files");
    }
    let s = Styled::new();
    let start = Instant::now();
    let pipeline = Pipeline::new(config.pipeline.clone());

    let progress = if output::is_quiet() || output::is_json() {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        if let Ok(style) =
            ProgressStyle::with_template("  {bar:32.cyan/blue} {pos}/{len} {elapsed_precise}")
        {
            bar.set_style(style);
        }
        bar
    };

    let items = analyze_all(&pipeline, files, base_url, &progress);
    progress.finish_and_clear();

    let mut failed = 0usize;
    for item in &items {
        let source = item.file.display().to_string();
        let record = match &item.result {
            Ok(signals) => RunRecord::success("batch", &source, signals, false, item.elapsed_ms),
            Err(e) => {
                failed += 1;
                RunRecord::failure("batch", &source, &format!("{e:#}"), item.elapsed_ms)
            }
        };
        record_run(config.audit_log.as_deref(), &record);

        if output::is_json() {
            println!("{}", item.to_json());
        } else if !output::is_quiet() {
            print_item(&s, item);
        }
    }

    if !output::is_json() && !output::is_quiet() {
        let msg = format!(
            "{} files, {failed} failed, {}",
            items.len(),
            output::format_duration_ms(start.elapsed().as_millis() as u64)
        );
        let status = if failed == 0 { s.bold("ok") } else { s.yellow("partial") };
        output::print_status(&s, &status, &msg);
    }
    Ok(())
}

fn print_item(s: &Styled, item: &BatchItem) {
    let name = item.file.display().to_string();
    match &item.result {
        Ok(signals) => {
            let palette: Vec<String> = signals
                .palette
                .primary
                .iter()
                .map(|c| format!("{}{}", s.swatch(&c.value), c.value))
                .collect();
            output::print_check(
                s.ok_sym(),
                &name,
                &format!(
                    "{}  {}",
                    if palette.is_empty() { s.dim("no colors") } else { palette.join(" ") },
                    s.dim(&signals.typography.primary)
                ),
            );
        }
        Err(e) => output::print_check(s.fail_sym(), &name, &s.red(&format!("{e:#}"))),
    }
}
