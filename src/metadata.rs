//! Ephemeris segment metadata.
//!
//! Typed counterpart of an OEM metadata block. Only the fields a
//! comparison or a usable time window depends on are interpreted here;
//! the rest are carried for identification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{Epoch, InvalidSpan, Span};

/// OEM format version a metadata block was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OemVersion {
    V1,
    V2,
}

/// Metadata constraint violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("START_TIME {start} is after STOP_TIME {stop}")]
    StartAfterStop { start: Epoch, stop: Epoch },

    #[error("{given} provided without {missing}")]
    UseableWithoutPair {
        given: &'static str,
        missing: &'static str,
    },

    #[error("USEABLE_START_TIME {start} is after USEABLE_STOP_TIME {stop}")]
    UseableOrder { start: Epoch, stop: Epoch },

    #[error("Useable window [{useable_start}, {useable_stop}] extends outside [{start}, {stop}]")]
    UseableOutsideSpan {
        useable_start: Epoch,
        useable_stop: Epoch,
        start: Epoch,
        stop: Epoch,
    },

    #[error("INTERPOLATION given without INTERPOLATION_DEGREE")]
    MissingInterpolationDegree,

    #[error("REF_FRAME_EPOCH is not supported in OEM v1.0")]
    RefFrameEpochUnsupported,

    #[error(transparent)]
    InvalidSpan(#[from] InvalidSpan),
}

/// Metadata describing one ephemeris segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentMetadata {
    pub version: OemVersion,
    pub object_name: String,
    pub object_id: String,
    /// CENTER_NAME
    pub center_name: String,
    /// REF_FRAME
    pub ref_frame: String,
    pub time_system: String,
    pub start_time: Epoch,
    pub stop_time: Epoch,
    pub ref_frame_epoch: Option<Epoch>,
    pub useable_start_time: Option<Epoch>,
    pub useable_stop_time: Option<Epoch>,
    pub interpolation: Option<String>,
    pub interpolation_degree: Option<u32>,
}

impl SegmentMetadata {
    /// Minimal metadata with the required fields; optional fields unset.
    pub fn new(
        object_name: impl Into<String>,
        object_id: impl Into<String>,
        center_name: impl Into<String>,
        ref_frame: impl Into<String>,
        time_system: impl Into<String>,
        start_time: Epoch,
        stop_time: Epoch,
    ) -> Self {
        SegmentMetadata {
            version: OemVersion::V2,
            object_name: object_name.into(),
            object_id: object_id.into(),
            center_name: center_name.into(),
            ref_frame: ref_frame.into(),
            time_system: time_system.into(),
            start_time,
            stop_time,
            ref_frame_epoch: None,
            useable_start_time: None,
            useable_stop_time: None,
            interpolation: None,
            interpolation_degree: None,
        }
    }

    pub fn with_useable(mut self, start: Epoch, stop: Epoch) -> Self {
        self.useable_start_time = Some(start);
        self.useable_stop_time = Some(stop);
        self
    }

    pub fn with_interpolation(mut self, method: impl Into<String>, degree: u32) -> Self {
        self.interpolation = Some(method.into());
        self.interpolation_degree = Some(degree);
        self
    }

    /// Check the OEM metadata constraints.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.start_time > self.stop_time {
            return Err(MetadataError::StartAfterStop {
                start: self.start_time,
                stop: self.stop_time,
            });
        }

        match (self.useable_start_time, self.useable_stop_time) {
            (None, None) => {}
            (Some(_), None) => {
                return Err(MetadataError::UseableWithoutPair {
                    given: "USEABLE_START_TIME",
                    missing: "USEABLE_STOP_TIME",
                })
            }
            (None, Some(_)) => {
                return Err(MetadataError::UseableWithoutPair {
                    given: "USEABLE_STOP_TIME",
                    missing: "USEABLE_START_TIME",
                })
            }
            (Some(start), Some(stop)) => {
                if start > stop {
                    return Err(MetadataError::UseableOrder { start, stop });
                }
                if start < self.start_time || stop > self.stop_time {
                    return Err(MetadataError::UseableOutsideSpan {
                        useable_start: start,
                        useable_stop: stop,
                        start: self.start_time,
                        stop: self.stop_time,
                    });
                }
            }
        }

        if self.interpolation.is_some() && self.interpolation_degree.is_none() {
            return Err(MetadataError::MissingInterpolationDegree);
        }

        if self.version == OemVersion::V1 && self.ref_frame_epoch.is_some() {
            return Err(MetadataError::RefFrameEpochUnsupported);
        }

        Ok(())
    }

    /// Start of usable state data; falls back to START_TIME.
    pub fn useable_start_time(&self) -> Epoch {
        self.useable_start_time.unwrap_or(self.start_time)
    }

    /// End of usable state data; falls back to STOP_TIME.
    pub fn useable_stop_time(&self) -> Epoch {
        self.useable_stop_time.unwrap_or(self.stop_time)
    }

    pub fn useable_span(&self) -> Result<Span, MetadataError> {
        Ok(Span::new(self.useable_start_time(), self.useable_stop_time())?)
    }
}
