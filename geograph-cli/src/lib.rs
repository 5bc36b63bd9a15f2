//! Support library for the `geograph` binary.
//!
//! Exposes the command pipeline and logging setup so tests can drive growth
//! runs without spawning a subprocess.

pub mod cli;
pub mod logging;
