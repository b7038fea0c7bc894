// Logging for the CLI, powered by tracing-subscriber.
//
// The library logs through the `log` facade; `tracing_log::LogTracer`
// routes those records into the subscriber installed here. Output goes to
// stderr so stdout stays clean for message lines.

use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set, otherwise `warn`, or `debug` for
/// the pubnub crates with `--verbose`.
pub fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let directives = if verbose {
        "warn,pubnub_link=debug,pubnub_cli=debug"
    } else {
        "warn"
    };
    EnvFilter::new(directives)
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    // Bridge `log` crate -> tracing
    tracing_log::LogTracer::init().ok();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();
    let installed = tracing::subscriber::set_global_default(subscriber).is_ok();

    if installed {
        tracing::trace!("Logging initialized: verbose={}", verbose);
    }
}
