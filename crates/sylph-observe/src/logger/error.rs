use thiserror::Error;
use tracing_subscriber::{filter::ParseError, util::TryInitError};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?}, expected one of: text, json, journald")]
    UnknownFormat(String),

    #[error("invalid log filter directive {directive:?}")]
    InvalidLevel {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("journald output requested but this build has no journald support")]
    JournaldUnavailable,

    #[error("cannot connect to journald")]
    Journald(#[source] std::io::Error),

    #[error("a sylph logger is already installed in this process")]
    AlreadyInitialized,

    #[error("cannot install the global subscriber")]
    Install(#[source] TryInitError),
}
