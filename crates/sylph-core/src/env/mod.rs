//! Engine home resolution from the process environment.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::error::CoreError;

/// Read access to environment values.
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment. Values that are not valid Unicode read as absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment, for hosts that assemble their own and for tests.
#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Validated engine home directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineHome(PathBuf);

impl EngineHome {
    #[inline]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Library directory under the home, e.g. `jars` for Spark.
    pub fn lib_dir(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

/// Resolves one named environment value to an existing engine home directory.
///
/// Nothing is cached: the value is read again on every call.
#[derive(Clone, Debug)]
pub struct EnvironmentResolver {
    var: String,
}

impl EnvironmentResolver {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    #[inline]
    pub fn var(&self) -> &str {
        &self.var
    }

    #[instrument(level = "debug", skip(self, env), fields(var = %self.var))]
    pub fn resolve(&self, env: &dyn EnvSource) -> Result<EngineHome, CoreError> {
        let raw = env
            .var(&self.var)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| CoreError::ConfigurationMissing {
                var: self.var.clone(),
            })?;

        let path = PathBuf::from(raw);
        match path.try_exists() {
            Ok(true) => {
                debug!(home = %path.display(), "engine home resolved");
                Ok(EngineHome(path))
            }
            Ok(false) => Err(CoreError::ConfigurationInvalid {
                var: self.var.clone(),
                path,
                reason: "path does not exist".into(),
            }),
            Err(e) => Err(CoreError::ConfigurationInvalid {
                var: self.var.clone(),
                path,
                reason: e.to_string(),
            }),
        }
    }
}
