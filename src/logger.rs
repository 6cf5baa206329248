use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at `info`, or `debug` with
/// `verbose`, and request traces from tower-http follow the same level.
pub fn init_logger(verbose: bool) {
    let default = if verbose {
        "foodgram_gateway=debug,tower_http=debug,info"
    } else {
        "foodgram_gateway=info,tower_http=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
