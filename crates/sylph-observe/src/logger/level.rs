use serde::{Deserialize, Deserializer};
use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Filter directive (`"info"`, `"sylph_core=debug,warn"`), validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(directive: impl Into<String>) -> Result<Self, LoggerError> {
        let level = Self(directive.into());
        level.filter()?;
        Ok(level)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.0).map_err(|source| LoggerError::InvalidLevel {
            directive: self.0.clone(),
            source,
        })
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl<'de> Deserialize<'de> for LoggerLevel {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        LoggerLevel::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_directives() {
        assert!(LoggerLevel::new("debug").is_ok());
        assert!(LoggerLevel::new("sylph_core=trace,warn").is_ok());
    }

    #[test]
    fn rejected_directive_is_reported() {
        let err = LoggerLevel::new("sylph_core=loud").unwrap_err();

        assert!(matches!(
            err,
            LoggerError::InvalidLevel { ref directive, .. } if directive == "sylph_core=loud"
        ));
        assert!(std::error::Error::source(&err).is_some());
    }
}
