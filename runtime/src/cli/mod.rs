//! CLI subcommand implementations for the Bloombox binary.

pub mod analyze_cmd;
pub mod batch_cmd;
pub mod config_cmd;
pub mod extract_cmd;
pub mod output;
pub mod report;
pub mod serve_cmd;
