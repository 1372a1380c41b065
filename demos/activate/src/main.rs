//! Activates the Spark runner against the process environment.
//!
//! ```text
//! SPARK_HOME=/opt/spark cargo run -p activate
//! ```

use std::sync::Arc;

use sylph_core::{
    ClassScope, DirScope, PluginManager, ProcessEnv, RunnerContext, RunnerRouter,
    StaticDiscovery,
};
use sylph_model::{PluginInfo, PluginKind, RunnerIdentity};
use sylph_observe::{LoggerConfig, LoggerLevel, logger_init};
use sylph_prometheus::{Encoder, PrometheusMetrics, TextEncoder};
use sylph_spark::{SPARK, SparkRunner, StreamEtlActuator};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cfg = LoggerConfig {
        level: LoggerLevel::new("debug")?,
        ..Default::default()
    };
    logger_init(&cfg)?;

    let metrics = PrometheusMetrics::new()?;
    let discovery = StaticDiscovery::new(vec![
        PluginInfo::new(
            StreamEtlActuator::ID.as_str(),
            SPARK,
            PluginKind::Transform,
            "/opt/plugins/etl",
        ),
        PluginInfo::new("kafka.source", SPARK, PluginKind::Source, "/opt/plugins/kafka")
            .with_names(["kafka"])
            .with_description("Kafka source"),
        PluginInfo::new("kafka.source", "flink", PluginKind::Source, "/opt/plugins/fkafka"),
    ]);
    let ctx = RunnerContext::new(Arc::new(discovery)).with_metrics(Arc::new(metrics.clone()));

    let mut router = RunnerRouter::new().with_context(Arc::new(ctx));
    router.register(Arc::new(SparkRunner::new()));

    let spark: RunnerIdentity = SPARK.into();
    let scope = DirScope::new("host");
    let activation = router.activate(&spark, &scope, &ProcessEnv)?;
    info!(
        id = %activation.id(),
        home = %activation.home().as_path().display(),
        search_path = ?scope.search_path(),
        actuators = ?activation.actuators(),
        "spark activated"
    );

    let manager = router.plugin_manager(&spark)?;
    for p in manager.all_plugins().iter() {
        info!(key = %p.key, location = %p.location.display(), "plugin available");
    }

    let binding = router.factory_table().select(&spark)?;
    info!(runner = %binding.runner, factory = %binding.factory, "container factory bound");

    let mut buf = Vec::new();
    TextEncoder::new().encode(&metrics.gather(), &mut buf)?;
    println!("{}", String::from_utf8_lossy(&buf));
    Ok(())
}
