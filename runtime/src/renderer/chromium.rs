//! Chromium renderer backed by `chromiumoxide`.

use super::{NavigationResult, RenderContext, Renderer};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A launched headless Chromium.
pub struct ChromiumRenderer {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromiumRenderer {
    /// Launch headless Chromium, using `chrome_path` when given.
    pub async fn launch(chrome_path: Option<&Path>) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1440, 900);
        if let Some(path) = chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow!("invalid browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // CDP events nobody subscribed to surface as errors here; drain them.
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });

        info!("Chromium launched");
        Ok(Self { browser, handler })
    }

    /// Close the browser and stop the event loop.
    pub async fn shutdown(mut self) {
        self.browser.close().await.ok();
        self.browser.wait().await.ok();
        self.handler.abort();
        debug!("Chromium closed");
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to open tab")?;
        Ok(Box::new(ChromiumContext { page }))
    }
}

/// One Chromium tab.
pub struct ChromiumContext {
    page: Page,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult> {
        let start = Instant::now();
        tokio::time::timeout(Duration::from_millis(timeout_ms), async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        })
        .await
        .map_err(|_| anyhow!("navigation to {url} timed out after {timeout_ms}ms"))?
        .with_context(|| format!("navigation to {url} failed"))?;

        let final_url = self
            .page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());

        Ok(NavigationResult {
            final_url,
            load_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        let value = self
            .page
            .evaluate(script)
            .await
            .context("script evaluation failed")?
            .into_value()
            .context("script returned a non-JSON value")?;
        Ok(value)
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.page.close().await.context("failed to close tab")
    }
}
