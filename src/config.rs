//! Comparison configuration.

use serde::{Deserialize, Serialize};

/// Options applied when building a [`StateCompare`](crate::compare::StateCompare),
/// either directly or through a [`SegmentCompare`](crate::segment::SegmentCompare).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Allow velocity and RIC quantities even when the frame is classified
    /// as rotating. Only meaningful when the caller knows the frame rotation
    /// does not matter for their use.
    pub force_inertial: bool,
    /// Smallest sine of the angle between origin position and velocity for
    /// which a RIC basis is built. Below it the basis is degenerate.
    pub degenerate_tolerance: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig {
            force_inertial: false,
            degenerate_tolerance: 1e-10,
        }
    }
}

impl CompareConfig {
    /// Default configuration with the inertial override set.
    pub fn forced_inertial() -> Self {
        CompareConfig {
            force_inertial: true,
            ..Self::default()
        }
    }

    pub fn with_degenerate_tolerance(mut self, tolerance: f64) -> Self {
        self.degenerate_tolerance = tolerance;
        self
    }
}
