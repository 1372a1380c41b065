use std::sync::atomic::{AtomicBool, Ordering};

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    Layer, Registry, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

static INSTALLED: AtomicBool = AtomicBool::new(false);

pub(crate) fn install(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Err(LoggerError::AlreadyInitialized);
    }

    let res = output_layer(cfg).and_then(|output| {
        let filter = cfg.level.filter()?;
        tracing_subscriber::registry()
            .with(output.with_filter(filter))
            .try_init()
            .map_err(LoggerError::Install)
    });
    match &res {
        Ok(()) => {
            tracing::debug!(format = %cfg.format, level = cfg.level.as_str(), "logger installed")
        }
        Err(_) => INSTALLED.store(false, Ordering::SeqCst),
    }
    res
}

fn output_layer(cfg: &LoggerConfig) -> Result<OutputLayer, LoggerError> {
    let layer: OutputLayer = match cfg.format {
        LoggerFormat::Text => fmt::layer()
            .with_ansi(cfg.use_color)
            .with_target(cfg.with_targets)
            .with_timer(local_timer())
            .boxed(),
        LoggerFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(cfg.with_targets)
            .with_timer(local_timer())
            .boxed(),
        LoggerFormat::Journald => journald_layer()?,
    };
    Ok(layer)
}

/// RFC 3339 timestamps in the local offset, UTC when the offset cannot be determined.
fn local_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald_layer() -> Result<OutputLayer, LoggerError> {
    let layer = tracing_journald::layer().map_err(LoggerError::Journald)?;
    Ok(layer.with_syslog_identifier("sylph".to_string()).boxed())
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald_layer() -> Result<OutputLayer, LoggerError> {
    Err(LoggerError::JournaldUnavailable)
}
