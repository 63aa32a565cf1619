//! JSONL run log: one line per extraction.

use anyhow::{Context, Result};
use bloombox_signals::BrandSignals;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// One logged run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: String,
    /// `extract`, `analyze`, `batch` or `serve`.
    pub command: String,
    /// URL or file path that was analyzed.
    pub source: String,
    pub colors: usize,
    pub fonts: usize,
    pub logo: bool,
    pub rendered: bool,
    pub duration_ms: u64,
    /// `ok`, or the error message.
    pub status: String,
}

impl RunRecord {
    pub fn success(
        command: &str,
        source: &str,
        signals: &BrandSignals,
        rendered: bool,
        duration_ms: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            command: command.to_string(),
            source: source.to_string(),
            colors: signals.colors.len(),
            fonts: signals.fonts.len(),
            logo: signals.logo.is_some(),
            rendered,
            duration_ms,
            status: "ok".to_string(),
        }
    }

    pub fn failure(command: &str, source: &str, error: &str, duration_ms: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            command: command.to_string(),
            source: source.to_string(),
            colors: 0,
            fonts: 0,
            logo: false,
            rendered: false,
            duration_ms,
            status: error.to_string(),
        }
    }
}

/// Append-only JSONL logger.
pub struct RunLogger {
    file: File,
}

impl RunLogger {
    /// Open or create the log file, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open run log: {}", path.display()))?;

        Ok(Self { file })
    }

    pub fn log(&mut self, record: &RunRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.file, "{json}")?;
        Ok(())
    }
}

/// Append `record` to the log at `path`, if one is configured.
///
/// Logging problems are reported and swallowed; they never fail a run.
pub fn record_run(path: Option<&Path>, record: &RunRecord) {
    let Some(path) = path else {
        return;
    };
    let result = RunLogger::open(path).and_then(|mut logger| logger.log(record));
    if let Err(e) = result {
        tracing::warn!("run log write failed: {e:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloombox_signals::{extract_brand_signals, PageInput};

    #[test]
    fn test_appends_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("runs.jsonl");

        let signals = extract_brand_signals(
            &PageInput::from_html(r#"<style>:root{--brand-color:#0A66C2}</style><img src="/logo.png">"#)
                .with_base_url("https://acme.com"),
        );
        record_run(
            Some(&path),
            &RunRecord::success("analyze", "acme.html", &signals, false, 12),
        );
        record_run(
            Some(&path),
            &RunRecord::failure("extract", "https://down.example", "HTTP 503", 40),
        );

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<RunRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].colors, 1);
        assert!(lines[0].logo);
        assert_eq!(lines[0].status, "ok");
        assert_eq!(lines[1].status, "HTTP 503");
        assert!(chrono::DateTime::parse_from_rfc3339(&lines[1].timestamp).is_ok());
    }

    #[test]
    fn test_no_path_is_noop() {
        record_run(None, &RunRecord::failure("extract", "x", "boom", 0));
    }
}
