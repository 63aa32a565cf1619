//! `bloombox extract <url>`: fetch a live page and print its brand signals.

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::page_loader::{normalize_target_url, PageLoader};
use crate::audit::logger::{record_run, RunRecord};
use crate::cli::output::{self, Styled};
use crate::cli::report;
use crate::config::RuntimeConfig;
use crate::renderer::chromium::ChromiumRenderer;
use anyhow::{Context, Result};
use bloombox_signals::Pipeline;
use std::time::Instant;
use tracing::info;

/// Run the extract command.
pub async fn run(
    config: &RuntimeConfig,
    target: &str,
    render: bool,
    timeout_ms: Option<u64>,
) -> Result<()> {
    let s = Styled::new();
    let start = Instant::now();
    let url = normalize_target_url(target)?;

    let client = HttpClient::new(&config.user_agent).context("failed to build HTTP client")?;
    let renderer = if render {
        if !output::is_quiet() && !output::is_json() {
            eprintln!("  {}", s.dim("Launching headless browser..."));
        }
        Some(ChromiumRenderer::launch(config.chrome_path.as_deref()).await?)
    } else {
        None
    };

    let mut loader = PageLoader::new(&client, config);
    if let Some(renderer) = &renderer {
        loader = loader.with_renderer(renderer);
    }
    if let Some(timeout_ms) = timeout_ms {
        loader = loader.with_render_timeout(timeout_ms);
    }

    let loaded = loader.load(&url).await;
    if let Some(renderer) = renderer {
        renderer.shutdown().await;
    }
    let page = match loaded {
        Ok(page) => page,
        Err(e) => {
            record_run(
                config.audit_log.as_deref(),
                &RunRecord::failure("extract", url.as_str(), &format!("{e:#}"), elapsed_ms(start)),
            );
            return Err(e);
        }
    };

    let rendered = page.rendered.is_some();
    let signals = Pipeline::new(config.pipeline.clone()).run(&page);
    let elapsed = elapsed_ms(start);
    info!(url = %url, colors = signals.colors.len(), fonts = signals.fonts.len(), "extracted");

    record_run(
        config.audit_log.as_deref(),
        &RunRecord::success("extract", url.as_str(), &signals, rendered, elapsed),
    );

    if output::is_json() {
        output::print_json(&report::signals_json(url.as_str(), &signals, rendered, elapsed));
    } else if !output::is_quiet() {
        report::print_signals(&s, url.as_str(), &signals, rendered, elapsed);
    }
    Ok(())
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
