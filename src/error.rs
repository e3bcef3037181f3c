//! Comparison errors.

use thiserror::Error;

use crate::time::{Epoch, Span};

/// Result alias for comparison operations.
pub type CompareResult<T> = Result<T, CompareError>;

/// Field that must agree between origin and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Epoch,
    Frame,
    Center,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Field::Epoch => "epoch",
            Field::Frame => "frame",
            Field::Center => "central body",
        })
    }
}

/// Non-empty list of fields that disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch(pub Vec<Field>);

impl Mismatch {
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("Incompatible inputs: {fields} mismatch")]
    IncompatibleInputs { fields: Mismatch },

    #[error("'{quantity}' is not supported for non-inertial frame '{frame}'")]
    UnsupportedOperation {
        quantity: &'static str,
        frame: String,
    },

    #[error("{epoch} is outside the comparison window {}", fmt_span(.span))]
    OutOfRange { epoch: Epoch, span: Option<Span> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("RIC basis is degenerate (cross-track norm {cross_track_norm:e}); position and velocity are parallel or zero")]
    DegenerateBasis { cross_track_norm: f64 },
}

fn fmt_span(span: &Option<Span>) -> String {
    span.map_or_else(|| "(empty)".to_string(), |s| s.to_string())
}

impl CompareError {
    pub(crate) fn mismatch(fields: Vec<Field>) -> Self {
        CompareError::IncompatibleInputs {
            fields: Mismatch(fields),
        }
    }
}
