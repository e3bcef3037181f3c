//! # ephemeris-compare
//!
//! Relative-motion comparison of ephemeris data for orbit determination
//! and conjunction assessment.
//!
//! - **compare**: two states at one epoch → relative position/velocity,
//!   range, range-rate and Radial / In-track / Cross-track projection.
//! - **segment**: two ephemeris segments → their common validity window,
//!   point comparison inside it and lazy uniform sampling across it.
//! - **frames**: inertial / rotating classification of frame names.
//! - **metadata**: typed OEM segment metadata and its constraints.
//! - **time**: epochs, closed spans, span overlap and uniform time ranges.

pub mod compare;
pub mod config;
pub mod error;
pub mod frames;
pub mod metadata;
pub mod segment;
pub mod state;
pub mod time;

#[cfg(feature = "python")]
mod pybridge;

pub use compare::{compare, compare_with, StateCompare};
pub use config::CompareConfig;
pub use error::{CompareError, CompareResult};
pub use frames::FrameClass;
pub use metadata::{MetadataError, OemVersion, SegmentMetadata};
pub use segment::{EphemerisSegment, SegmentCompare, Steps};
pub use state::State;
pub use time::{Epoch, Span};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn ephemeris_compare(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pybridge::register(m)?;
    Ok(())
}
