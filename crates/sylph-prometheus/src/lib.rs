//! Prometheus metrics backend for runner activation.
//!
//! This crate provides a [`PrometheusMetrics`] implementation of [`sylph_core::MetricsBackend`]
//! that exposes metrics in Prometheus format.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use sylph_core::RunnerContext;
//! use sylph_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let ctx = RunnerContext::default().with_metrics(Arc::new(metrics.clone()));
//!
//! // Hand `metrics.gather()` to a TextEncoder from your `/metrics` handler.
//! # let _ = ctx;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `sylph_activations_total{runner}` - Counter
//! - `sylph_activation_failures_total{runner, error_kind}` - Counter
//! - `sylph_activation_duration_seconds{runner}` - Histogram
//! - `sylph_actuators_published{runner}` - Gauge
//! - `sylph_plugins_available{runner}` - Gauge
//! - `sylph_plugins_shadowed{runner}` - Gauge
//!
//! ## HTTP Server
//! This crate does NOT provide an HTTP server for the `/metrics` endpoint.
//! Use your application's existing HTTP framework.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
