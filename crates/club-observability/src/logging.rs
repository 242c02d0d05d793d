use club_config::{LogConfig, LogFormat};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Crates whose debug output drowns everything else.
const QUIET_TARGETS: &str = "sqlx=warn,hyper=warn,tower=warn,h2=warn";

/// Filter used when `RUST_LOG` is not set: `level` for everything, noisy
/// dependencies capped at `warn`.
pub fn default_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(&config.level))
}

/// `level` for everything else; an unrecognised level means `info`.
fn level_filter(level: &str) -> EnvFilter {
    let level = level.trim().parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    EnvFilter::new(format!("{},{}", level, QUIET_TARGETS))
}

/// Installs the global tracing subscriber.
///
/// - **Level**: `RUST_LOG` if set, otherwise `LOG_LEVEL` (default "info")
/// - **Format**: compact with ANSI colors, or one JSON object per line
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = default_filter(config);

    let layer = match config.format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).try_init()
}
