use std::time::Duration;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, proto::MetricFamily,
};
use sylph_core::MetricsBackend;
use sylph_model::RunnerIdentity;

const ACTIVATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0];

/// Prometheus-backed [`MetricsBackend`].
///
/// Clones share the same registry and collectors.
#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    activations: IntCounterVec,
    failures: IntCounterVec,
    duration: HistogramVec,
    actuators: IntGaugeVec,
    plugins_available: IntGaugeVec,
    plugins_shadowed: IntGaugeVec,
}

impl PrometheusMetrics {
    /// Create a backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::with_registry(Registry::new())
    }

    /// Register the collectors into an existing registry.
    pub fn with_registry(registry: Registry) -> Result<Self, prometheus::Error> {
        let activations = IntCounterVec::new(
            Opts::new("sylph_activations_total", "Successful runner activations"),
            &["runner"],
        )?;
        let failures = IntCounterVec::new(
            Opts::new(
                "sylph_activation_failures_total",
                "Runner activations aborted by an error",
            ),
            &["runner", "error_kind"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "sylph_activation_duration_seconds",
                "Time spent activating a runner",
            )
            .buckets(ACTIVATION_BUCKETS.to_vec()),
            &["runner"],
        )?;
        let actuators = IntGaugeVec::new(
            Opts::new(
                "sylph_actuators_published",
                "Actuators published by the last activation",
            ),
            &["runner"],
        )?;
        let plugins_available = IntGaugeVec::new(
            Opts::new(
                "sylph_plugins_available",
                "Plugins visible to the runner after filtering",
            ),
            &["runner"],
        )?;
        let plugins_shadowed = IntGaugeVec::new(
            Opts::new(
                "sylph_plugins_shadowed",
                "Discovered plugins dropped because a built-in provides the same key",
            ),
            &["runner"],
        )?;

        registry.register(Box::new(activations.clone()))?;
        registry.register(Box::new(failures.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(actuators.clone()))?;
        registry.register(Box::new(plugins_available.clone()))?;
        registry.register(Box::new(plugins_shadowed.clone()))?;

        Ok(Self {
            registry,
            activations,
            failures,
            duration,
            actuators,
            plugins_available,
            plugins_shadowed,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_activation(&self, runner: &RunnerIdentity, actuators: usize, elapsed: Duration) {
        let labels = [runner.as_str()];
        self.activations.with_label_values(&labels).inc();
        self.duration
            .with_label_values(&labels)
            .observe(elapsed.as_secs_f64());
        self.actuators
            .with_label_values(&labels)
            .set(actuators as i64);
    }

    fn record_activation_failure(&self, runner: &RunnerIdentity, error_kind: &'static str) {
        self.failures
            .with_label_values(&[runner.as_str(), error_kind])
            .inc();
    }

    fn record_plugins_filtered(&self, runner: &RunnerIdentity, kept: usize, shadowed: usize) {
        let labels = [runner.as_str()];
        self.plugins_available
            .with_label_values(&labels)
            .set(kept as i64);
        self.plugins_shadowed
            .with_label_values(&labels)
            .set(shadowed as i64);
    }
}
