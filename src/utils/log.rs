use crate::utils::config::LogConfig;
use crate::utils::error::AppError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

pub struct Logger;

impl Logger {
    /// Install the global subscriber. The returned guard must stay alive
    /// for as long as file logging should keep flushing.
    pub fn init(log_config: &LogConfig) -> Result<Option<WorkerGuard>, AppError> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_config.level));

        if log_config.output == "file" {
            let log_path = Path::new(&log_config.file_path);
            std::fs::create_dir_all(log_path)?;
            let file_appender = tracing_appender::rolling::daily(log_path, &log_config.file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let subscriber = Registry::default().with(env_filter).with(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .with_ansi(false)
                    .json(),
            );
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| AppError::LoggingError(e.to_string()))?;
            Ok(Some(guard))
        } else {
            let subscriber = Registry::default()
                .with(env_filter)
                .with(fmt::layer().with_timer(fmt::time::UtcTime::rfc_3339()));
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| AppError::LoggingError(e.to_string()))?;
            Ok(None)
        }
    }
}
