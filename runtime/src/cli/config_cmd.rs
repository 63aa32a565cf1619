//! `bloombox config`: show the effective configuration.

use crate::cli::output::{self, Styled};
use crate::config::{default_config_path, RuntimeConfig};
use anyhow::Result;
use std::path::Path;

pub fn run(config: &RuntimeConfig, explicit: Option<&Path>) -> Result<()> {
    if !output::is_json() && !output::is_quiet() {
        let s = Styled::new();
        let path = explicit.map_or_else(default_config_path, Path::to_path_buf);
        let origin = if path.exists() { "" } else { " (not found, using defaults)" };
        eprintln!("  {} {}{}", s.bold("Config"), path.display(), s.dim(origin));
        eprintln!();
    }
    output::print_json(&serde_json::to_value(config)?);
    Ok(())
}
