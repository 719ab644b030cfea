//! Console logger wiring.

use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::config::{self, LogFormat};

/// Keeps the non-blocking writers flushing until the service shuts down.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
}

/// Installs the global subscriber described by `[log]`.
///
/// Crates listed in `crates_to_filter` log at the configured level; everything
/// else is held to `WARN` unless `filtering_directive` says otherwise.
pub fn setup(
    config: &config::Log,
    service_name: &str,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> TelemetryGuard {
    let mut guards = Vec::new();
    let console_config = &config.console;

    let console_layer = if console_config.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let filter = get_envfilter(
            console_config.filtering_directive.as_deref(),
            console_config.level,
            crates_to_filter.as_ref(),
        );
        let layer = match console_config.log_format {
            LogFormat::Default => fmt::layer()
                .with_writer(console_writer)
                .with_target(true)
                .compact()
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_writer(console_writer)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(filter)
                .boxed(),
        };
        Some(layer)
    } else {
        None
    };

    tracing_subscriber::registry().with(console_layer).init();
    tracing::debug!(service = service_name, "logger initialized");

    TelemetryGuard {
        _log_guards: guards,
    }
}

fn get_envfilter(
    filtering_directive: Option<&str>,
    default_log_level: config::Level,
    crates_to_filter: &[&str],
) -> EnvFilter {
    let default_directive = LevelFilter::from_level(default_log_level.into_level());

    filtering_directive
        .map(|filter| {
            EnvFilter::builder()
                .with_default_directive(default_directive.into())
                .parse_lossy(filter)
        })
        .unwrap_or_else(|| {
            let directives = crates_to_filter
                .iter()
                .map(|crate_name| format!("{crate_name}={default_directive}"))
                .collect::<Vec<_>>()
                .join(",");

            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .parse_lossy(directives)
        })
}
