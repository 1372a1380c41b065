use std::sync::Arc;

use sylph_model::{PluginInfo, RunnerConf};

use crate::metrics::{MetricsHandle, NoopMetrics};

/// Source of discovered plugins.
///
/// The scanner that walks plugin directories lives in the host; the loader only consumes
/// whatever it currently reports.
pub trait PluginDiscovery: Send + Sync {
    fn find_plugins(&self) -> Vec<PluginInfo>;
}

/// Fixed list of plugins, for hosts that discover once at startup.
#[derive(Clone, Debug, Default)]
pub struct StaticDiscovery {
    plugins: Vec<PluginInfo>,
}

impl StaticDiscovery {
    pub fn new(plugins: Vec<PluginInfo>) -> Self {
        Self { plugins }
    }
}

impl PluginDiscovery for StaticDiscovery {
    fn find_plugins(&self) -> Vec<PluginInfo> {
        self.plugins.clone()
    }
}

/// Shared read-only services handed to every actuator and to plugin filtering.
///
/// Owned by the host and injected at activation; the loader never mutates it.
#[derive(Clone)]
pub struct RunnerContext {
    conf: RunnerConf,
    discovery: Arc<dyn PluginDiscovery>,
    metrics: MetricsHandle,
}

impl RunnerContext {
    pub fn new(discovery: Arc<dyn PluginDiscovery>) -> Self {
        Self {
            conf: RunnerConf::new(),
            discovery,
            metrics: Arc::new(NoopMetrics),
        }
    }

    pub fn with_conf(mut self, conf: RunnerConf) -> Self {
        self.conf = conf;
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    #[inline]
    pub fn conf(&self) -> &RunnerConf {
        &self.conf
    }

    pub fn conf_value(&self, key: &str) -> Option<&str> {
        self.conf.get(key).map(String::as_str)
    }

    /// Current plugin universe. Re-queried on every call.
    pub fn find_plugins(&self) -> Vec<PluginInfo> {
        self.discovery.find_plugins()
    }

    #[inline]
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }
}

impl Default for RunnerContext {
    fn default() -> Self {
        Self::new(Arc::new(StaticDiscovery::default()))
    }
}

impl std::fmt::Debug for RunnerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunnerContext")
            .field("conf", &self.conf)
            .finish_non_exhaustive()
    }
}
