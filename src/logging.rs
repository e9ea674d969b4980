use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::result::{GlimError, Result};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for console output
    pub console_level: Level,
    /// Log level for file output
    pub file_level: Level,
    /// Directory where log files should be written
    pub log_dir: Option<PathBuf>,
    /// Whether to enable JSON formatted logs for structured output
    pub json_format: bool,
    /// Whether to also log to stderr
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: Level::WARN,
            file_level: Level::DEBUG,
            log_dir: Some(Self::default_log_dir()),
            json_format: false,
            console: false,
        }
    }
}

impl LoggingConfig {
    /// Get the OS-appropriate default log directory
    pub fn default_log_dir() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "glim-gitlab") {
            proj_dirs.cache_dir().to_path_buf()
        } else {
            PathBuf::from("glim-gitlab-logs")
        }
    }

    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = var("GLIM_GITLAB_LOG_LEVEL") {
            config = config.with_level(&level);
        }

        if let Some(log_dir) = var("GLIM_GITLAB_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(log_dir));
        }

        // Disable file logging if requested
        if var("GLIM_GITLAB_NO_FILE_LOGS").is_some() {
            config.log_dir = None;
        }

        if var("GLIM_GITLAB_JSON_LOGS").is_some() {
            config.json_format = true;
        }

        if var("GLIM_GITLAB_CONSOLE_LOGS").is_some() {
            config.console = true;
        }

        config
    }

    /// Apply a level to both outputs; unparsable levels are ignored
    pub fn with_level(mut self, level: &str) -> Self {
        if let Ok(parsed_level) = level.parse::<Level>() {
            self.console_level = parsed_level;
            self.file_level = parsed_level;
        }
        self
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>> {
    let mut layers = vec![];
    let mut guard = None;

    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "glim-gitlab.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(config.file_level.into())
                        .from_env_lossy(),
                )
                .boxed()
        } else {
            fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(config.file_level.into())
                        .from_env_lossy(),
                )
                .boxed()
        };

        layers.push(file_layer);
    }

    // stdout carries command output, so console logs go to stderr
    if config.console {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_filter(
                EnvFilter::builder()
                    .with_default_directive(config.console_level.into())
                    .from_env_lossy(),
            )
            .boxed();

        layers.push(console_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| GlimError::GeneralError(format!("Failed to initialize logging: {e}").into()))?;

    Ok(guard)
}
