use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "playlearn.log";

/// Keeps the background log writer alive; drop it only at shutdown.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Where file logs go, if anywhere: `LOG_DIR` (default `./logs`) when
/// `ENABLE_FILE_LOGS` is `true` or `1`.
pub fn file_log_dir(enabled: Option<&str>, dir: Option<&str>) -> Option<String> {
    let enabled = matches!(enabled.map(str::trim), Some("true" | "1"));
    enabled.then(|| {
        dir.map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("./logs")
            .to_string()
    })
}

/// Install the global subscriber. Stdout always gets events; a daily-rolling file is
/// added when file logging is enabled and its directory can be created.
pub fn init_tracing(log_level: &str) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let log_dir = file_log_dir(
        std::env::var("ENABLE_FILE_LOGS").ok().as_deref(),
        std::env::var("LOG_DIR").ok().as_deref(),
    )
    .filter(|dir| match std::fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("failed to create log directory {dir}: {err}");
            false
        }
    });

    let (file_layer, guard) = match &log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(FileLogGuard { _guard: guard }))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .init();

    if let Some(dir) = &log_dir {
        tracing::info!(%dir, "file logging enabled");
    }
    guard
}
