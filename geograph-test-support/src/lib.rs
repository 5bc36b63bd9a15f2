//! Shared test utilities for the geograph crates.

pub mod capture;
pub mod profile;

pub use capture::{CaptureLayer, CapturedEvent, CapturedSpan};
pub use profile::PropertyProfile;
