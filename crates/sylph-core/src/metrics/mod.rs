//! Metrics seam for activation and plugin filtering.
//!
//! The loader records through [`MetricsBackend`]; hosts plug in a concrete backend
//! (see `sylph-prometheus`) or keep [`NoopMetrics`].

use std::{sync::Arc, time::Duration};

use sylph_model::RunnerIdentity;

pub trait MetricsBackend: Send + Sync {
    /// A runner activation published `actuators` handles.
    fn record_activation(&self, runner: &RunnerIdentity, actuators: usize, elapsed: Duration);

    /// A runner activation aborted with the given [`CoreError::kind`](crate::CoreError::kind).
    fn record_activation_failure(&self, runner: &RunnerIdentity, error_kind: &'static str);

    /// A plugin filter pass kept `kept` plugins and dropped `shadowed` duplicates of built-ins.
    fn record_plugins_filtered(&self, runner: &RunnerIdentity, kept: usize, shadowed: usize);
}

pub type MetricsHandle = Arc<dyn MetricsBackend>;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMetrics;

impl MetricsBackend for NoopMetrics {
    fn record_activation(&self, _: &RunnerIdentity, _: usize, _: Duration) {}
    fn record_activation_failure(&self, _: &RunnerIdentity, _: &'static str) {}
    fn record_plugins_filtered(&self, _: &RunnerIdentity, _: usize, _: usize) {}
}
