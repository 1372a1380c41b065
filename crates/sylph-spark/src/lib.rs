mod config;
pub use config::SparkRunnerConfig;

pub mod actuator;
pub use actuator::{
    SparkStreamingSqlActuator, SparkSubmitActuator, Stream2EtlActuator, StreamEtlActuator,
    StructuredStreamingSqlActuator,
};

mod runner;
pub use runner::{SPARK, SPARK_CONTAINER_FACTORY, SparkRunner, create_pipeline_plugin_manager};

pub mod prelude {
    pub use crate::SparkRunner;
    pub use crate::SparkRunnerConfig;
}
