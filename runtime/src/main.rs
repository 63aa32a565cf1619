use anyhow::{Context, Result};
use bloombox_runtime::cli::{analyze_cmd, batch_cmd, config_cmd, extract_cmd, serve_cmd};
use bloombox_runtime::config::RuntimeConfig;
use bloombox_runtime::logging;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bloombox",
    version,
    about = "Extract brand colors, fonts and logos from web pages"
)]
struct Cli {
    /// Print machine-readable JSON to stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress human-readable output.
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Show every ranked signal and debug logs.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable ANSI colors.
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file (default: ~/.bloombox/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a URL and extract its brand signals.
    Extract {
        url: String,
        /// Also render the page in headless Chromium and sample computed styles.
        #[arg(long)]
        render: bool,
        /// Render budget in milliseconds (overrides the config).
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Extract brand signals from a saved HTML file.
    Analyze {
        file: PathBuf,
        /// URL the page was served from, for resolving relative logo paths.
        #[arg(long)]
        base_url: Option<String>,
        /// Rendered-style sample JSON captured alongside the HTML.
        #[arg(long)]
        sample: Option<PathBuf>,
    },
    /// Analyze many HTML files in parallel.
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Serve the extraction API over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 7878)]
        port: u16,
        /// Launch headless Chromium so requests can ask for rendering.
        #[arg(long)]
        render: bool,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Mode flags are read by the output helpers.
    if cli.json {
        std::env::set_var("BLOOMBOX_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("BLOOMBOX_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("BLOOMBOX_VERBOSE", "1");
    }
    if cli.no_color {
        std::env::set_var("BLOOMBOX_NO_COLOR", "1");
    }

    logging::init(cli.verbose);

    let config = RuntimeConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract {
            url,
            render,
            timeout_ms,
        } => extract_cmd::run(&config, &url, render, timeout_ms).await,
        Commands::Analyze {
            file,
            base_url,
            sample,
        } => analyze_cmd::run(&config, &file, base_url.as_deref(), sample.as_deref()),
        Commands::Batch { files, base_url } => {
            tokio::task::spawn_blocking(move || {
                batch_cmd::run(&config, &files, base_url.as_deref())
            })
            .await
            .context("batch worker panicked")?
        }
        Commands::Serve { host, port, render } => serve_cmd::run(config, &host, port, render).await,
        Commands::Config => config_cmd::run(&config, cli.config.as_deref()),
    }
}
