//! Cartesian ephemeris state and the small amount of 3-vector algebra the
//! comparisons need.

use serde::{Deserialize, Serialize};

use crate::time::Epoch;

/// 3-vector (km or km/s depending on context).
pub type Vector3 = [f64; 3];

/// 3×3 matrix, row-major.
pub type Matrix3 = [[f64; 3]; 3];

/// Cartesian state of an object at a single epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub epoch: Epoch,
    /// Reference frame identifier, e.g. "EME2000".
    pub frame: String,
    /// Central body identifier, e.g. "EARTH".
    pub center: String,
    /// Position (km): [x, y, z]
    pub position: Vector3,
    /// Velocity (km/s): [vx, vy, vz]
    pub velocity: Vector3,
}

impl State {
    pub fn new(
        epoch: Epoch,
        frame: impl Into<String>,
        center: impl Into<String>,
        position: Vector3,
        velocity: Vector3,
    ) -> Self {
        State {
            epoch,
            frame: frame.into(),
            center: center.into(),
            position,
            velocity,
        }
    }

    /// Position magnitude (km).
    pub fn r_mag(&self) -> f64 {
        norm(&self.position)
    }

    /// Velocity magnitude (km/s).
    pub fn v_mag(&self) -> f64 {
        norm(&self.velocity)
    }

    /// Specific angular momentum r × v (km²/s).
    pub fn angular_momentum(&self) -> Vector3 {
        cross(&self.position, &self.velocity)
    }
}

pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn norm(a: &Vector3) -> f64 {
    dot(a, a).sqrt()
}

pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn scale(a: &Vector3, k: f64) -> Vector3 {
    [a[0] * k, a[1] * k, a[2] * k]
}

/// `m · v`
pub fn mat_vec(m: &Matrix3, v: &Vector3) -> Vector3 {
    [dot(&m[0], v), dot(&m[1], v), dot(&m[2], v)]
}
