//! Tracing setup: stderr plus a daily rolling file in the logs directory.

use anyhow::Result;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use linkbook_infrastructure::paths::LinkbookPaths;

const LOG_FILE_PREFIX: &str = "linkbook.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. The returned guard
/// flushes the file writer and must be held until exit. When the logs
/// directory is unusable only stderr logging is installed.
pub fn init(default_level: &str) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "linkbook_cli={0},linkbook_core={0},linkbook_infrastructure={0}",
            default_level
        ))
    });

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let appender = LinkbookPaths::logs_dir()
        .map_err(|e| e.to_string())
        .and_then(|dir| file_appender(&dir).map_err(|e| e.to_string()));

    let (file_layer, guard, file_error) = match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
                None,
            )
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(error) = file_error {
        tracing::warn!(%error, "File logging disabled");
    }

    Ok(guard)
}

fn file_appender(dir: &Path) -> std::result::Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
}
