//! Headless rendering.
//!
//! The [`Renderer`] owns a browser; each page load gets its own
//! [`RenderContext`]. Everything downstream talks to the traits, so tests can
//! swap in a scripted fake.

pub mod chromium;
pub mod style_sampler;

use anyhow::Result;
use async_trait::async_trait;

/// Outcome of a navigation.
#[derive(Debug, Clone)]
pub struct NavigationResult {
    /// URL after redirects.
    pub final_url: String,
    pub load_time_ms: u64,
}

/// A single browser tab.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Load `url` and wait for the document to finish loading.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult>;

    /// Evaluate a script in the page and return its JSON-serializable result.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;

    /// Release the tab.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Hands out fresh render contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
}
