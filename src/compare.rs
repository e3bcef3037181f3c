//! Comparison of two Cartesian states at a single epoch.
//!
//! Origin and target must share epoch, reference frame and central body.
//! All quantities are expressed in that frame, differenced as
//! `target - origin`. Velocity-based quantities and RIC projections are
//! only available when the frame is inertial (or the caller forced it).
//!
//! # Example
//! ```
//! use ephemeris_compare::{compare, Epoch, State};
//!
//! let t0 = Epoch::from_calendar(2024, 1, 1, 0, 0, 0.0);
//! let origin = State::new(t0, "EME2000", "EARTH", [7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]);
//! let target = State::new(t0, "EME2000", "EARTH", [7000.0, 10.0, 0.0], [0.0, 7.5, 0.1]);
//!
//! let cmp = compare(&origin, &target).unwrap();
//! assert_eq!(cmp.range(), 10.0);
//! let ric = cmp.position_ric().unwrap();
//! assert!((ric[1] - 10.0).abs() < 1e-9);
//! ```

use crate::config::CompareConfig;
use crate::error::{CompareError, CompareResult, Field};
use crate::frames::FrameClass;
use crate::state::{cross, mat_vec, norm, scale, sub, Matrix3, State, Vector3};
use crate::time::Epoch;

/// Compare `target` against `origin` with the default configuration.
pub fn compare(origin: &State, target: &State) -> CompareResult<StateCompare> {
    compare_with(origin, target, &CompareConfig::default())
}

/// Compare `target` against `origin` with an explicit configuration.
pub fn compare_with(
    origin: &State,
    target: &State,
    config: &CompareConfig,
) -> CompareResult<StateCompare> {
    check_compatible(origin, target)?;
    let class = FrameClass::classify(&origin.frame);
    Ok(compare_classified(origin.clone(), target.clone(), config, class))
}

/// Difference two states whose compatibility and frame class are already
/// established.
pub(crate) fn compare_classified(
    origin: State,
    target: State,
    config: &CompareConfig,
    class: FrameClass,
) -> StateCompare {
    StateCompare {
        inertial: config.force_inertial || class.is_inertial(),
        class,
        origin,
        target,
        degenerate_tolerance: config.degenerate_tolerance,
    }
}

pub(crate) fn check_compatible(origin: &State, target: &State) -> CompareResult<()> {
    let mut fields = Vec::new();
    if origin.epoch != target.epoch {
        fields.push(Field::Epoch);
    }
    if origin.frame != target.frame {
        fields.push(Field::Frame);
    }
    if origin.center != target.center {
        fields.push(Field::Center);
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(CompareError::mismatch(fields))
    }
}

/// Relative motion of `target` with respect to `origin`.
#[derive(Debug, Clone)]
pub struct StateCompare {
    origin: State,
    target: State,
    class: FrameClass,
    inertial: bool,
    degenerate_tolerance: f64,
}

impl StateCompare {
    pub fn new(origin: State, target: State) -> CompareResult<Self> {
        Self::with_config(origin, target, &CompareConfig::default())
    }

    pub fn with_config(origin: State, target: State, config: &CompareConfig) -> CompareResult<Self> {
        check_compatible(&origin, &target)?;
        let class = FrameClass::classify(&origin.frame);
        Ok(compare_classified(origin, target, config, class))
    }

    pub fn origin(&self) -> &State {
        &self.origin
    }

    pub fn target(&self) -> &State {
        &self.target
    }

    pub fn epoch(&self) -> Epoch {
        self.origin.epoch
    }

    pub fn frame(&self) -> &str {
        &self.origin.frame
    }

    pub fn center(&self) -> &str {
        &self.origin.center
    }

    /// Classification of the origin frame, before any override.
    pub fn classification(&self) -> FrameClass {
        self.class
    }

    /// Whether velocity-class quantities are available.
    pub fn is_inertial(&self) -> bool {
        self.inertial
    }

    fn require_inertial(&self, quantity: &'static str) -> CompareResult<()> {
        if self.inertial {
            Ok(())
        } else {
            Err(CompareError::UnsupportedOperation {
                quantity,
                frame: self.origin.frame.clone(),
            })
        }
    }

    /// Relative position, target − origin (km).
    pub fn position(&self) -> Vector3 {
        sub(&self.target.position, &self.origin.position)
    }

    /// Distance between the two states (km).
    pub fn range(&self) -> f64 {
        norm(&self.position())
    }

    /// Relative velocity, target − origin (km/s).
    pub fn velocity(&self) -> CompareResult<Vector3> {
        self.require_inertial("velocity")?;
        Ok(sub(&self.target.velocity, &self.origin.velocity))
    }

    /// Magnitude of the relative velocity (km/s).
    pub fn range_rate(&self) -> CompareResult<f64> {
        self.require_inertial("range_rate")?;
        Ok(norm(&sub(&self.target.velocity, &self.origin.velocity)))
    }

    /// Relative position in the origin's RIC frame (km).
    pub fn position_ric(&self) -> CompareResult<Vector3> {
        self.require_inertial("position_ric")?;
        Ok(mat_vec(&self.ric_rotation()?, &self.position()))
    }

    /// Relative velocity in the origin's RIC frame (km/s).
    ///
    /// This is the inertial velocity difference rotated into RIC axes; the
    /// rotation rate of the RIC frame itself is not removed.
    pub fn velocity_ric(&self) -> CompareResult<Vector3> {
        let dv = self.velocity()?;
        Ok(mat_vec(&self.ric_rotation()?, &dv))
    }

    /// Rotation from the comparison frame into the origin's RIC frame.
    ///
    /// Rows are the radial, in-track and cross-track unit vectors:
    /// - R̂ = r / |r|
    /// - Ŵ = (r × v) / |r × v|
    /// - Ŝ = (Ŵ × r) / |Ŵ × r|
    ///
    /// Fails when |r × v| ≤ tolerance · |r| · |v|, i.e. when the sine of the
    /// angle between position and velocity is below the tolerance.
    pub fn ric_rotation(&self) -> CompareResult<Matrix3> {
        self.require_inertial("ric_rotation")?;
        let r = &self.origin.position;

        let r_mag = self.origin.r_mag();
        let w = self.origin.angular_momentum();
        let w_mag = norm(&w);
        let degenerate = r_mag == 0.0
            || !w_mag.is_finite()
            || w_mag <= self.degenerate_tolerance * r_mag * self.origin.v_mag();
        if degenerate {
            return Err(CompareError::DegenerateBasis {
                cross_track_norm: w_mag,
            });
        }
        let w_hat = scale(&w, 1.0 / w_mag);

        // Cross-track crossed with position, not velocity
        let s = cross(&w_hat, r);
        let s_hat = scale(&s, 1.0 / norm(&s));

        Ok([scale(r, 1.0 / r_mag), s_hat, w_hat])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::dot;
    use approx::assert_relative_eq;

    fn state(frame: &str, r: Vector3, v: Vector3) -> State {
        State::new(Epoch::from_ns(0), frame, "EARTH", r, v)
    }

    fn pair(frame: &str) -> (State, State) {
        (
            state(frame, [7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]),
            state(frame, [7000.0, 10.0, 0.0], [0.0, 7.5, 0.1]),
        )
    }

    #[test]
    fn test_inertial_pair() {
        let (origin, target) = pair("EME2000");
        let cmp = compare(&origin, &target).unwrap();

        assert_eq!(cmp.position(), [0.0, 10.0, 0.0]);
        assert_relative_eq!(cmp.range(), 10.0, epsilon = 1e-12);
        let dv = cmp.velocity().unwrap();
        assert_relative_eq!(dv[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(dv[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(dv[2], 0.1, epsilon = 1e-12);
        assert_relative_eq!(cmp.range_rate().unwrap(), 0.1, epsilon = 1e-12);
        assert_eq!(cmp.classification(), FrameClass::Inertial);
    }

    #[test]
    fn test_rotating_pair_position_only() {
        let (origin, target) = pair("ITRF2000");
        let cmp = compare(&origin, &target).unwrap();

        assert_eq!(cmp.position(), [0.0, 10.0, 0.0]);
        assert_relative_eq!(cmp.range(), 10.0, epsilon = 1e-12);
        assert!(!cmp.is_inertial());

        match cmp.velocity() {
            Err(CompareError::UnsupportedOperation { quantity, frame }) => {
                assert_eq!(quantity, "velocity");
                assert_eq!(frame, "ITRF2000");
            }
            other => panic!("expected UnsupportedOperation, got {other:?}"),
        }
        assert!(matches!(
            cmp.range_rate(),
            Err(CompareError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            cmp.velocity_ric(),
            Err(CompareError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            cmp.position_ric(),
            Err(CompareError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_force_inertial_override() {
        let (origin, target) = pair("ITRF2000");
        let cmp = StateCompare::with_config(origin, target, &CompareConfig::forced_inertial()).unwrap();
        assert_eq!(cmp.classification(), FrameClass::Rotating);
        assert!(cmp.is_inertial());
        assert_relative_eq!(cmp.range_rate().unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_frame_assumed_inertial() {
        let (origin, target) = pair("J2000_CUSTOM");
        let cmp = compare(&origin, &target).unwrap();
        assert_eq!(cmp.classification(), FrameClass::UnknownAssumedInertial);
        assert!(cmp.velocity().is_ok());
    }

    #[test]
    fn test_frame_mismatch() {
        let origin = state("EME2000", [7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]);
        let target = state("GCRF", [7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]);
        match compare(&origin, &target) {
            Err(CompareError::IncompatibleInputs { fields }) => {
                assert!(fields.contains(Field::Frame));
                assert!(!fields.contains(Field::Center));
                assert!(!fields.contains(Field::Epoch));
            }
            other => panic!("expected IncompatibleInputs, got {other:?}"),
        }
    }

    #[test]
    fn test_center_mismatch() {
        let origin = state("EME2000", [7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]);
        let mut target = origin.clone();
        target.center = "MOON".to_string();
        match compare(&origin, &target) {
            Err(CompareError::IncompatibleInputs { fields }) => {
                assert_eq!(fields.0, vec![Field::Center]);
            }
            other => panic!("expected IncompatibleInputs, got {other:?}"),
        }
    }

    #[test]
    fn test_epoch_mismatch() {
        let origin = state("EME2000", [7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]);
        let mut target = origin.clone();
        target.epoch = origin.epoch.add_seconds(1.0);
        target.frame = "TOD".to_string();
        match compare(&origin, &target) {
            Err(CompareError::IncompatibleInputs { fields }) => {
                assert_eq!(fields.0, vec![Field::Epoch, Field::Frame]);
            }
            other => panic!("expected IncompatibleInputs, got {other:?}"),
        }
    }

    #[test]
    fn test_ric_circular_equatorial() {
        // Target ahead in-track, above radially, north cross-track
        let origin = state("EME2000", [7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]);
        let target = state("EME2000", [7001.0, 2.0, 3.0], [0.01, 7.52, 0.03]);
        let cmp = compare(&origin, &target).unwrap();

        let ric = cmp.position_ric().unwrap();
        assert_relative_eq!(ric[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(ric[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(ric[2], 3.0, epsilon = 1e-9);

        let vric = cmp.velocity_ric().unwrap();
        assert_relative_eq!(vric[0], 0.01, epsilon = 1e-9);
        assert_relative_eq!(vric[1], 0.02, epsilon = 1e-9);
        assert_relative_eq!(vric[2], 0.03, epsilon = 1e-9);
    }

    #[test]
    fn test_ric_basis_orthonormal() {
        let origin = state("GCRF", [-4500.0, 3200.0, 4100.0], [-2.1, -6.3, 2.7]);
        let target = origin.clone();
        let rot = compare(&origin, &target).unwrap().ric_rotation().unwrap();

        for i in 0..3 {
            assert_relative_eq!(norm(&rot[i]), 1.0, epsilon = 1e-12);
            for j in (i + 1)..3 {
                assert_relative_eq!(dot(&rot[i], &rot[j]), 0.0, epsilon = 1e-12);
            }
        }
        // Right-handed: R × S = W
        let w = cross(&rot[0], &rot[1]);
        for k in 0..3 {
            assert_relative_eq!(w[k], rot[2][k], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ric_preserves_range() {
        let origin = state("TEME", [-4500.0, 3200.0, 4100.0], [-2.1, -6.3, 2.7]);
        let target = state("TEME", [-4495.0, 3190.0, 4102.5], [-2.0, -6.31, 2.71]);
        let cmp = compare(&origin, &target).unwrap();
        assert_relative_eq!(norm(&cmp.position_ric().unwrap()), cmp.range(), epsilon = 1e-9);
    }

    #[test]
    fn test_ric_degenerate_radial_velocity() {
        let origin = state("EME2000", [7000.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let target = state("EME2000", [7001.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let cmp = compare(&origin, &target).unwrap();

        // Differencing is still fine
        assert_relative_eq!(cmp.range(), 1.0, epsilon = 1e-12);
        assert!(matches!(
            cmp.position_ric(),
            Err(CompareError::DegenerateBasis { .. })
        ));
    }

    #[test]
    fn test_ric_degenerate_parallel_up_to_rounding() {
        // v is r scaled by a non-power-of-two, so r × v is rounding noise
        let r = [3000.1, 7000.3, 1234.7];
        let v = scale(&r, 1.0 / 907.3);
        let origin = state("EME2000", r, v);
        let cmp = compare(&origin, &origin).unwrap();
        assert!(matches!(
            cmp.ric_rotation(),
            Err(CompareError::DegenerateBasis { .. })
        ));
    }

    #[test]
    fn test_ric_degenerate_zero_velocity() {
        let origin = state("EME2000", [7000.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let cmp = compare(&origin, &origin).unwrap();
        assert!(matches!(
            cmp.ric_rotation(),
            Err(CompareError::DegenerateBasis { .. })
        ));
    }

    #[test]
    fn test_degenerate_tolerance_configurable() {
        // Flight-path angle of ~87°: sin(angle between r and v) ≈ 0.05
        let origin = state("EME2000", [7000.0, 0.0, 0.0], [7.5, 0.375, 0.0]);
        let target = state("EME2000", [7000.0, 1.0, 0.0], [7.5, 0.375, 0.0]);

        let loose = compare(&origin, &target).unwrap();
        assert!(loose.ric_rotation().is_ok());

        let strict_config = CompareConfig::default().with_degenerate_tolerance(0.1);
        let strict = compare_with(&origin, &target, &strict_config).unwrap();
        assert!(matches!(
            strict.position_ric(),
            Err(CompareError::DegenerateBasis { .. })
        ));
    }

    #[test]
    fn test_compare_with_matches_constructor() {
        let (origin, target) = pair("ITRF-97");
        let config = CompareConfig::forced_inertial();
        let a = compare_with(&origin, &target, &config).unwrap();
        let b = StateCompare::with_config(origin, target, &config).unwrap();
        assert_eq!(a.classification(), b.classification());
        assert_eq!(a.is_inertial(), b.is_inertial());
        assert_eq!(a.position(), b.position());
    }
}
