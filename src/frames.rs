//! Reference-frame classification.
//!
//! Velocity differences are only physically meaningful between states in
//! a non-rotating frame. Frames are matched case-insensitively against two
//! fixed lists; anything else is assumed inertial and flagged so the
//! caller can see that the assumption was made.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Frames treated as inertial.
pub const INERTIAL_FRAMES: [&str; 6] = ["EME2000", "GCRF", "ICRF", "MCI", "TEME", "TOD"];

/// Frames fixed to (rotating with) the central body.
pub const ROTATING_FRAMES: [&str; 5] = ["GRC", "ITRF2000", "ITRF-93", "ITRF-97", "TDR"];

/// How a frame identifier was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameClass {
    Inertial,
    Rotating,
    /// Not in either list; treated as inertial.
    UnknownAssumedInertial,
}

impl FrameClass {
    /// Classify a frame identifier. Unknown frames log a warning.
    pub fn classify(frame: &str) -> Self {
        let class = Self::lookup(frame);
        if class == FrameClass::UnknownAssumedInertial {
            warn!(frame = %frame, "nonstandard reference frame, assuming inertial");
        }
        class
    }

    /// Classify without logging.
    pub fn lookup(frame: &str) -> Self {
        let upper = frame.to_ascii_uppercase();
        if INERTIAL_FRAMES.contains(&upper.as_str()) {
            FrameClass::Inertial
        } else if ROTATING_FRAMES.contains(&upper.as_str()) {
            FrameClass::Rotating
        } else {
            FrameClass::UnknownAssumedInertial
        }
    }

    pub fn is_inertial(&self) -> bool {
        !matches!(self, FrameClass::Rotating)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FrameClass::UnknownAssumedInertial)
    }
}

impl std::fmt::Display for FrameClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FrameClass::Inertial => "inertial",
            FrameClass::Rotating => "rotating",
            FrameClass::UnknownAssumedInertial => "unknown (assumed inertial)",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inertial_frames() {
        for frame in INERTIAL_FRAMES {
            assert_eq!(FrameClass::lookup(frame), FrameClass::Inertial);
        }
    }

    #[test]
    fn test_rotating_frames() {
        for frame in ROTATING_FRAMES {
            assert_eq!(FrameClass::lookup(frame), FrameClass::Rotating);
            assert!(!FrameClass::lookup(frame).is_inertial());
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(FrameClass::lookup("eme2000"), FrameClass::Inertial);
        assert_eq!(FrameClass::lookup("Itrf-93"), FrameClass::Rotating);
    }

    #[test]
    fn test_unknown_defaults_inertial() {
        let class = FrameClass::classify("RTN");
        assert_eq!(class, FrameClass::UnknownAssumedInertial);
        assert!(class.is_inertial());
        assert!(!class.is_known());
    }
}
