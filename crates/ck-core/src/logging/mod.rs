pub mod config;
pub mod file_writer;
pub mod formatter;

use anyhow::Result;
use config::LoggingConfig;
use formatter::LogFormat;
use std::path::PathBuf;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn console_layer(format: LogFormat) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(false)
        .with_thread_names(false);
    match format {
        LogFormat::Text => layer.with_ansi(true).boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn file_layer(path: PathBuf, format: LogFormat) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(file_writer::FileWriter::new(path))
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .with_timer(fmt::time::ChronoUtc::rfc_3339());
    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Initialize logging system with the given configuration
pub fn init(config: LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.console {
        layers.push(console_layer(config.format));
    }
    if let Some(log_file) = config.file {
        layers.push(file_layer(log_file, config.format));
    }

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default() -> Result<()> {
    init(LoggingConfig::default())
}

/// Initialize logging from environment variables and CLI arguments
pub fn init_from_args(
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let level = if verbose {
        "debug".to_string()
    } else {
        log_level
            .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
    };

    let file = log_file.or_else(|| std::env::var(config::LOG_FILE_ENV).ok().map(PathBuf::from));

    let config = LoggingConfig {
        level,
        file,
        console: true,
        format: LogFormat::Text,
    };

    init(config)
}
