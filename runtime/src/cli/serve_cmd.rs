//! `bloombox serve`: expose extraction over HTTP.

use crate::acquisition::http_client::HttpClient;
use crate::cli::output::{self, Styled};
use crate::config::RuntimeConfig;
use crate::renderer::chromium::ChromiumRenderer;
use crate::server::{self, AppState};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Run the HTTP server until Ctrl-C.
pub async fn run(config: RuntimeConfig, host: &str, port: u16, render: bool) -> Result<()> {
    let s = Styled::new();
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;

    let client = HttpClient::new(&config.user_agent).context("failed to build HTTP client")?;
    let chrome_path = config.chrome_path.clone();
    let mut state = AppState::new(config, client);

    let renderer = if render {
        let renderer = Arc::new(ChromiumRenderer::launch(chrome_path.as_deref()).await?);
        state = state.with_renderer(renderer.clone());
        Some(renderer)
    } else {
        None
    };

    if !output::is_quiet() {
        eprintln!(
            "  {} Bloombox v{} listening on http://{addr}{}",
            s.ok_sym(),
            env!("CARGO_PKG_VERSION"),
            if render { " (rendering enabled)" } else { "" }
        );
        eprintln!("  {}", s.dim("POST /extract  GET /health"));
    }

    let result = server::serve(addr, state).await;

    // The router and its state are gone once serve returns.
    if let Some(renderer) = renderer.and_then(|r| Arc::try_unwrap(r).ok()) {
        renderer.shutdown().await;
    }
    result
}
