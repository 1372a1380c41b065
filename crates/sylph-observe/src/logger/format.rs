use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

use crate::logger::error::LoggerError;

/// Where log records go and how they are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoggerFormat {
    /// Human-readable lines on stdout.
    #[default]
    Text,
    /// One JSON object per record on stdout, including the current span.
    Json,
    /// Native journald fields. Needs the `journald` feature on Linux.
    Journald,
}

impl LoggerFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            LoggerFormat::Journald => "journald",
        }
    }

    /// Whether this build can install the format.
    pub const fn is_available(self) -> bool {
        match self {
            LoggerFormat::Journald => cfg!(all(target_os = "linux", feature = "journald")),
            LoggerFormat::Text | LoggerFormat::Json => true,
        }
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [LoggerFormat::Text, LoggerFormat::Json, LoggerFormat::Journald]
            .into_iter()
            .find(|f| s.trim().eq_ignore_ascii_case(f.as_str()))
            .ok_or_else(|| LoggerError::UnknownFormat(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for LoggerFormat {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
