//! Logging bootstrap for hosts embedding the runner loader.
//!
//! Everything in the loader logs through `tracing`; this crate installs the global
//! subscriber (text, json or journald) once at startup.

mod logger;
pub use logger::*;
