use std::sync::Arc;

use sylph_core::{ActuatorHandle, ActuatorId, JobActuator, Resolver, RunnerContext};
use tracing::trace;

/// Structured Streaming ETL pipelines assembled from source/transform/sink plugins.
pub struct StreamEtlActuator {
    ctx: Arc<RunnerContext>,
}

impl StreamEtlActuator {
    pub const ID: ActuatorId = ActuatorId::new("sylph_spark::StreamEtlActuator");

    pub(crate) fn create(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        let ctx = r.context()?;
        trace!(actuator = %Self::ID, "constructing");
        Ok(Arc::new(Self { ctx }))
    }

    pub fn context(&self) -> &RunnerContext {
        &self.ctx
    }
}

impl JobActuator for StreamEtlActuator {
    fn id(&self) -> ActuatorId {
        Self::ID
    }

    fn job_type(&self) -> &'static str {
        "Spark_StreamETL"
    }

    fn description(&self) -> &'static str {
        "spark structured streaming etl"
    }
}

/// DStream (Spark Streaming) ETL pipelines assembled from plugins.
pub struct Stream2EtlActuator {
    ctx: Arc<RunnerContext>,
}

impl Stream2EtlActuator {
    pub const ID: ActuatorId = ActuatorId::new("sylph_spark::Stream2EtlActuator");

    pub(crate) fn create(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        let ctx = r.context()?;
        trace!(actuator = %Self::ID, "constructing");
        Ok(Arc::new(Self { ctx }))
    }

    pub fn context(&self) -> &RunnerContext {
        &self.ctx
    }
}

impl JobActuator for Stream2EtlActuator {
    fn id(&self) -> ActuatorId {
        Self::ID
    }

    fn job_type(&self) -> &'static str {
        "Spark_Streaming_StreamETL"
    }

    fn description(&self) -> &'static str {
        "spark streaming (dstream) etl"
    }
}
