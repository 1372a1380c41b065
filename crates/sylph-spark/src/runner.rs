use sylph_core::{ActuatorRegistry, Runner, RunnerContext, RunnerPluginManager, StaticRegistry};
use sylph_model::{ContainerFactoryId, RunnerIdentity};

use crate::{actuator::SPARK_ACTUATORS, config::SparkRunnerConfig};

/// Identity plugins use to declare they belong to the Spark runner.
pub const SPARK: &str = "spark";

/// Container factory the host instantiates to run Spark jobs.
pub const SPARK_CONTAINER_FACTORY: &str = "sylph_spark::SparkContainerFactory";

static REGISTRY: StaticRegistry = StaticRegistry::new(&SPARK_ACTUATORS);

/// Runner for Apache Spark.
///
/// Activation needs `SPARK_HOME` (or the configured variable) to point at an existing
/// directory; its `jars` directory is added to the class scope when the scope allows it.
#[derive(Clone, Debug, Default)]
pub struct SparkRunner {
    cfg: SparkRunnerConfig,
}

impl SparkRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, cfg: SparkRunnerConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &SparkRunnerConfig {
        &self.cfg
    }
}

impl Runner for SparkRunner {
    fn identity(&self) -> RunnerIdentity {
        RunnerIdentity::from(SPARK)
    }

    fn env_var(&self) -> &str {
        &self.cfg.home_var
    }

    fn lib_dir(&self) -> &str {
        &self.cfg.lib_dir
    }

    fn registry(&self) -> &dyn ActuatorRegistry {
        &REGISTRY
    }

    fn container_factory(&self) -> ContainerFactoryId {
        ContainerFactoryId::from(SPARK_CONTAINER_FACTORY)
    }
}

/// Spark plugins not already provided by the built-in actuators.
pub fn create_pipeline_plugin_manager(ctx: &RunnerContext) -> RunnerPluginManager {
    SparkRunner::new().plugin_manager(ctx)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use sylph_core::{
        ClassScope, CoreError, DirScope, ExtendOutcome, FixedScope, JobActuator, MapEnv,
        PluginManager, RunnerRouter, StaticDiscovery, activate,
    };
    use sylph_model::{PluginInfo, PluginKind};

    use super::*;
    use crate::actuator::{
        SparkStreamingSqlActuator, SparkSubmitActuator, Stream2EtlActuator, StreamEtlActuator,
        StructuredStreamingSqlActuator,
    };

    fn spark_home() -> (tempfile::TempDir, MapEnv) {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join("jars")).unwrap();
        let env = MapEnv::new().with("SPARK_HOME", home.path().to_str().unwrap());
        (home, env)
    }

    #[test]
    fn registry_lists_five_builtins_in_order() {
        let ids = SparkRunner::new().registry().ids();

        assert_eq!(
            ids,
            vec![
                StreamEtlActuator::ID,
                Stream2EtlActuator::ID,
                SparkSubmitActuator::ID,
                SparkStreamingSqlActuator::ID,
                StructuredStreamingSqlActuator::ID,
            ]
        );
    }

    #[test]
    fn activation_publishes_builtins_and_extends_scope_with_jars() {
        let (home, env) = spark_home();
        let scope = DirScope::new("host");
        let ctx = Arc::new(RunnerContext::default());

        let activation = activate(&SparkRunner::new(), Arc::clone(&ctx), &scope, &env).unwrap();

        let actuators = activation.actuators();
        assert_eq!(actuators.len(), 5);
        let job_types: HashSet<_> = actuators.iter().map(|(_, h)| h.job_type()).collect();
        assert!(job_types.contains("Spark_StreamETL"));
        assert!(job_types.contains("StructuredStreamingSql"));
        assert_eq!(scope.search_path(), vec![home.path().join("jars")]);
        assert_eq!(activation.scope_outcome(), ExtendOutcome::Added);
    }

    #[test]
    fn every_actuator_shares_the_injected_context() {
        let (_home, env) = spark_home();
        let scope = DirScope::new("host");
        let ctx = Arc::new(RunnerContext::default());

        let activation = activate(&SparkRunner::new(), Arc::clone(&ctx), &scope, &env).unwrap();

        // One reference held here, one by the container, one per actuator.
        assert_eq!(Arc::strong_count(&ctx), 2 + activation.actuators().len());
    }

    #[test]
    fn fixed_scope_still_activates() {
        let (_home, env) = spark_home();
        let scope = FixedScope::new("boot", ["/usr/lib/spark/jars"]);

        let activation =
            activate(&SparkRunner::new(), Arc::new(RunnerContext::default()), &scope, &env)
                .unwrap();

        assert_eq!(activation.scope_outcome(), ExtendOutcome::NotAugmentable);
        assert_eq!(scope.search_path().len(), 1);
        assert_eq!(activation.actuators().len(), 5);
    }

    #[test]
    fn missing_spark_home_fails_fast() {
        let scope = DirScope::new("host");
        let err = activate(
            &SparkRunner::new(),
            Arc::new(RunnerContext::default()),
            &scope,
            &MapEnv::new(),
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::ConfigurationMissing { ref var } if var == "SPARK_HOME"));
        assert!(scope.search_path().is_empty());
    }

    #[test]
    fn configured_variable_and_lib_dir_are_used() {
        let home = tempfile::tempdir().unwrap();
        let env = MapEnv::new().with("SPARK3_HOME", home.path().to_str().unwrap());
        let scope = DirScope::new("host");
        let runner = SparkRunner::new().with_config(SparkRunnerConfig {
            home_var: "SPARK3_HOME".into(),
            lib_dir: "lib".into(),
        });

        activate(&runner, Arc::new(RunnerContext::default()), &scope, &env).unwrap();
        assert_eq!(scope.search_path(), vec![home.path().join("lib")]);
    }

    #[test]
    fn plugin_manager_drops_builtin_duplicates_and_foreign_plugins() {
        let discovery = StaticDiscovery::new(vec![
            PluginInfo::new(
                StreamEtlActuator::ID.as_str(),
                SPARK,
                PluginKind::Transform,
                "/plugins/etl",
            ),
            PluginInfo::new("kafka.source", SPARK, PluginKind::Source, "/plugins/kafka")
                .with_names(["kafka"]),
            PluginInfo::new("kafka.source", "flink", PluginKind::Source, "/plugins/fkafka"),
        ]);
        let ctx = RunnerContext::new(Arc::new(discovery));

        let manager = create_pipeline_plugin_manager(&ctx);
        let set = manager.all_plugins();

        assert_eq!(set.len(), 1);
        assert_eq!(set.shadowed(), 1);
        assert!(manager.find("kafka", PluginKind::Source).is_some());
    }

    #[test]
    fn router_selects_spark_container_factory() {
        let mut router = RunnerRouter::new();
        router.register(Arc::new(SparkRunner::new()));

        let binding = router.factory_table().select(&SPARK.into()).unwrap();
        assert_eq!(binding.factory.as_str(), SPARK_CONTAINER_FACTORY);
    }
}
