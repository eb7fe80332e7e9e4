use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;

/// Keeps the non-blocking file writer alive for the process lifetime.
/// Dropping it flushes buffered log lines.
pub struct LoggingHandle {
    _file_guard: Option<WorkerGuard>,
}

/// Initializes tracing with a console layer and, if configured, a
/// non-blocking file layer. `RUST_LOG` overrides the configured level.
pub fn init_logging(settings: &Settings) -> Result<LoggingHandle, Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone()));

    let console_layer = fmt::layer();

    let (file_layer, file_guard) = match &settings.log_file {
        Some(path) => {
            let path = Path::new(path);
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().unwrap_or_else(|| "sezam.log".as_ref());
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %settings.log_level,
        file_enabled = settings.log_file.is_some(),
        "logging initialized"
    );

    Ok(LoggingHandle {
        _file_guard: file_guard,
    })
}
