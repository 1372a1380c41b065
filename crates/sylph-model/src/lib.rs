//! Plain data shared by the runner extension loader.
//!
//! Nothing in this crate performs I/O; every type is cheap to clone and serializable.

mod domain;
pub use domain::*;

mod kind;
pub use kind::*;
