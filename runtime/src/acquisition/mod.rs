//! Page acquisition: HTTP fetch plus optional headless render.

pub mod http_client;
pub mod page_loader;
