//! Python bindings via PyO3.
use pyo3::exceptions::{PyNotImplementedError, PyValueError};
use pyo3::prelude::*;

use crate::compare::{compare, compare_with, StateCompare};
use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::state::State;
use crate::time::Epoch;

impl From<CompareError> for PyErr {
    fn from(err: CompareError) -> PyErr {
        match err {
            CompareError::UnsupportedOperation { .. } => PyNotImplementedError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

fn vec3(v: Vec<f64>, what: &str) -> PyResult<[f64; 3]> {
    <[f64; 3]>::try_from(v).map_err(|v| {
        PyValueError::new_err(format!("{what} must have 3 elements, got {}", v.len()))
    })
}

// State
#[pyclass(name = "State")]
#[derive(Clone)]
pub struct PyState {
    inner: State,
}

#[pymethods]
impl PyState {
    /// Create a state.
    ///
    /// Args:
    ///     epoch: Seconds past J2000 in the ephemeris time system
    ///     frame: Reference frame name, e.g. "EME2000"
    ///     center: Central body name, e.g. "EARTH"
    ///     position: [x, y, z] in km
    ///     velocity: [vx, vy, vz] in km/s
    #[new]
    fn new(epoch: f64, frame: String, center: String, position: Vec<f64>, velocity: Vec<f64>) -> PyResult<Self> {
        Ok(PyState {
            inner: State::new(
                Epoch::from_seconds(epoch),
                frame,
                center,
                vec3(position, "position")?,
                vec3(velocity, "velocity")?,
            ),
        })
    }

    /// Compare `target` against this state (target − self).
    fn compare(&self, target: &PyState) -> PyResult<PyStateCompare> {
        Ok(PyStateCompare {
            inner: compare(&self.inner, &target.inner)?,
        })
    }

    #[getter] fn epoch(&self) -> f64 { self.inner.epoch.to_seconds() }
    #[getter] fn frame(&self) -> String { self.inner.frame.clone() }
    #[getter] fn center(&self) -> String { self.inner.center.clone() }
    #[getter] fn position(&self) -> Vec<f64> { self.inner.position.to_vec() }
    #[getter] fn velocity(&self) -> Vec<f64> { self.inner.velocity.to_vec() }

    fn __repr__(&self) -> String {
        format!(
            "State({}, frame={}, center={}, r=[{:.3}, {:.3}, {:.3}] km)",
            self.inner.epoch, self.inner.frame, self.inner.center,
            self.inner.position[0], self.inner.position[1], self.inner.position[2],
        )
    }
}

// StateCompare
#[pyclass(name = "StateCompare")]
#[derive(Clone)]
pub struct PyStateCompare {
    inner: StateCompare,
}

#[pymethods]
impl PyStateCompare {
    #[new]
    #[pyo3(signature = (origin, target, force_inertial=false))]
    fn new(origin: &PyState, target: &PyState, force_inertial: bool) -> PyResult<Self> {
        let config = CompareConfig {
            force_inertial,
            ..CompareConfig::default()
        };
        Ok(PyStateCompare {
            inner: compare_with(&origin.inner, &target.inner, &config)?,
        })
    }

    #[getter] fn range(&self) -> f64 { self.inner.range() }
    #[getter] fn position(&self) -> Vec<f64> { self.inner.position().to_vec() }
    #[getter] fn inertial(&self) -> bool { self.inner.is_inertial() }
    #[getter] fn classification(&self) -> String { self.inner.classification().to_string() }

    #[getter]
    fn range_rate(&self) -> PyResult<f64> {
        Ok(self.inner.range_rate()?)
    }

    #[getter]
    fn velocity(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.velocity()?.to_vec())
    }

    #[getter]
    fn position_ric(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.position_ric()?.to_vec())
    }

    #[getter]
    fn velocity_ric(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.velocity_ric()?.to_vec())
    }

    fn __repr__(&self) -> String {
        format!(
            "StateCompare({}, frame={}, range={:.6} km)",
            self.inner.epoch(), self.inner.frame(), self.inner.range(),
        )
    }
}

// Module registration
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyState>()?;
    m.add_class::<PyStateCompare>()?;
    Ok(())
}
