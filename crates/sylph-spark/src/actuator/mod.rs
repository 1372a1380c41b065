//! Built-in Spark job actuators.
//!
//! Each actuator only carries the shared runner context; compiling and submitting the job
//! is done by the engine integration that consumes the handle.

mod etl;
mod sql;
mod submit;

pub use etl::{Stream2EtlActuator, StreamEtlActuator};
pub use sql::{SparkStreamingSqlActuator, StructuredStreamingSqlActuator};
pub use submit::SparkSubmitActuator;

use sylph_core::ActuatorDescriptor;

/// Registration order of the Spark built-ins.
pub(crate) static SPARK_ACTUATORS: [ActuatorDescriptor; 5] = [
    ActuatorDescriptor::with_context(StreamEtlActuator::ID, StreamEtlActuator::create),
    ActuatorDescriptor::with_context(Stream2EtlActuator::ID, Stream2EtlActuator::create),
    ActuatorDescriptor::with_context(SparkSubmitActuator::ID, SparkSubmitActuator::create),
    ActuatorDescriptor::with_context(
        SparkStreamingSqlActuator::ID,
        SparkStreamingSqlActuator::create,
    ),
    ActuatorDescriptor::with_context(
        StructuredStreamingSqlActuator::ID,
        StructuredStreamingSqlActuator::create,
    ),
];
