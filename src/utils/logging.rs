//! # Logging
//!
//! Installs a `tracing` subscriber from [`LoggingConfig`].
//!
//! `RUST_LOG` directives take precedence over the configured level so a
//! single module can be turned up without editing the config file.

use crate::config::LoggingConfig;
use crate::error::{EnvelopeError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the level filter for `config`, honouring `RUST_LOG`
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy()
}

fn console_layer(json: bool) -> BoxedLayer {
    if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    }
}

fn file_layer(path: &str, json: bool) -> Result<BoxedLayer> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let writer = Mutex::new(file);

    Ok(if json {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer().with_ansi(false).with_writer(writer).boxed()
    })
}

/// Install the global subscriber
///
/// Fails if the configuration is invalid, the log file cannot be opened, or
/// a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(EnvelopeError::ConfigError(errors.join("; ")));
    }

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.log_to_console {
        layers.push(console_layer(config.json_format));
    }
    if config.log_to_file {
        if let Some(path) = config.log_file_path.as_deref() {
            layers.push(file_layer(path, config.json_format)?);
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(config))
        .try_init()
        .map_err(|e| EnvelopeError::ConfigError(format!("Failed to install logger: {e}")))?;

    info!(
        app = %config.app_name,
        level = %config.log_level,
        byte_order = crate::core::nx::host_order(),
        "Logging initialised"
    );
    Ok(())
}
