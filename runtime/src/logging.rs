//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set. Otherwise Bloombox logs at `info`, or `debug`
/// with `verbose`. Chromium's CDP chatter is always silenced. Set
/// `BLOOMBOX_LOG_JSON` for one JSON object per line.
pub fn init(verbose: bool) {
    let default = if verbose {
        "bloombox=debug,bloombox_runtime=debug,bloombox_signals=debug"
    } else {
        "bloombox=info,bloombox_runtime=info,bloombox_signals=warn"
    };
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    if let Ok(directive) = "chromiumoxide=off".parse() {
        filter = filter.add_directive(directive);
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = if std::env::var_os("BLOOMBOX_LOG_JSON").is_some() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
