//! Library components of the `mcat-cli` binary.

pub mod job;
pub mod logging;
