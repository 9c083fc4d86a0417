use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// Logs go to stdout, and additionally to a daily rolling file when
/// `logging.file` is set. Keep the returned guard alive for the lifetime
/// of the process so buffered file output is flushed.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, anyhow::Error> {
    let filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("info"))?;

    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match config.file.as_deref().filter(|f| !f.is_empty()) {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("logging.file '{}' has no file name", file))?;
            std::fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry.with(fmt::layer().with_ansi(false).with_writer(writer)).try_init()?;
            Ok(Some(guard))
        },
        None => {
            registry.try_init()?;
            Ok(None)
        },
    }
}
