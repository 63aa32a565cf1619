//! Turn a URL into a [`PageInput`]: static fetch, then an optional render.

use crate::acquisition::http_client::HttpClient;
use crate::config::RuntimeConfig;
use crate::renderer::style_sampler::sample_computed_styles;
use crate::renderer::Renderer;
use anyhow::{bail, Context, Result};
use bloombox_signals::{PageInput, RenderedSample};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Parse a user-supplied target, defaulting to `https://` when the scheme is
/// missing.
pub fn normalize_target_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("empty URL");
    }
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    let url = Url::parse(&with_scheme).with_context(|| format!("invalid URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("unsupported scheme: {}", url.scheme());
    }
    Ok(url)
}

/// Fetches pages and, when a renderer is available, samples their computed
/// styles.
pub struct PageLoader<'a> {
    client: &'a HttpClient,
    renderer: Option<&'a dyn Renderer>,
    fetch_timeout_ms: u64,
    render_timeout_ms: u64,
}

impl<'a> PageLoader<'a> {
    pub fn new(client: &'a HttpClient, config: &RuntimeConfig) -> Self {
        Self {
            client,
            renderer: None,
            fetch_timeout_ms: config.fetch_timeout_ms,
            render_timeout_ms: config.render_timeout_ms,
        }
    }

    pub fn with_renderer(mut self, renderer: &'a dyn Renderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_render_timeout(mut self, timeout_ms: u64) -> Self {
        self.render_timeout_ms = timeout_ms;
        self
    }

    /// Load `url`.
    ///
    /// The static fetch must succeed. A failed or timed-out render only
    /// drops the rendered sample.
    pub async fn load(&self, url: &Url) -> Result<PageInput> {
        let resp = self
            .client
            .fetch_html(url.as_str(), self.fetch_timeout_ms)
            .await
            .with_context(|| format!("failed to fetch {url}"))?;

        let mut page = PageInput::from_html(resp.body).with_base_url(resp.final_url);

        if let Some(renderer) = self.renderer {
            let budget = Duration::from_millis(self.render_timeout_ms);
            match tokio::time::timeout(budget, self.render(renderer, url)).await {
                Ok(Ok(sample)) => {
                    info!(
                        url = %url,
                        elements = sample.elements.len(),
                        "rendered"
                    );
                    page = page.with_rendered(sample);
                }
                Ok(Err(e)) => warn!(url = %url, "render failed, using static HTML only: {e:#}"),
                Err(_) => warn!(
                    url = %url,
                    timeout_ms = self.render_timeout_ms,
                    "render timed out, using static HTML only"
                ),
            }
        }

        Ok(page)
    }

    async fn render(&self, renderer: &dyn Renderer, url: &Url) -> Result<RenderedSample> {
        let mut context = renderer.new_context().await?;
        let sampled = async {
            context.navigate(url.as_str(), self.render_timeout_ms).await?;
            sample_computed_styles(context.as_ref()).await
        }
        .await;
        if let Err(e) = context.close().await {
            warn!("failed to close render context: {e:#}");
        }
        sampled
    }
}
