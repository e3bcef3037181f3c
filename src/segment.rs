//! Comparison of two ephemeris segments over their common time window.
//!
//! A [`SegmentCompare`] restricts itself to the span where both segments
//! are valid. Inside that span it evaluates both segments at an epoch and
//! compares the resulting states; outside it refuses.

use tracing::debug;

use crate::compare::{check_compatible, compare_classified, StateCompare};
use crate::config::CompareConfig;
use crate::error::{CompareError, CompareResult, Field};
use crate::frames::FrameClass;
use crate::metadata::SegmentMetadata;
use crate::state::State;
use crate::time::{Epoch, Span, TimeRange};

/// A time-bounded source of interpolated states.
pub trait EphemerisSegment {
    fn metadata(&self) -> &SegmentMetadata;

    /// Span over which `evaluate` is valid, usually
    /// [`SegmentMetadata::useable_span`].
    fn span(&self) -> Span;

    /// State at `epoch`. Only called with epochs inside [`span`](Self::span).
    fn evaluate(&self, epoch: Epoch) -> State;
}

/// Comparison of a target segment against an origin segment.
pub struct SegmentCompare<'a, O: ?Sized, T: ?Sized> {
    origin: &'a O,
    target: &'a T,
    span: Option<Span>,
    class: FrameClass,
    config: CompareConfig,
}

impl<O: ?Sized, T: ?Sized> Clone for SegmentCompare<'_, O, T> {
    fn clone(&self) -> Self {
        SegmentCompare {
            origin: self.origin,
            target: self.target,
            span: self.span,
            class: self.class,
            config: self.config,
        }
    }
}

impl<O: ?Sized, T: ?Sized> std::fmt::Debug for SegmentCompare<'_, O, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentCompare")
            .field("span", &self.span)
            .field("class", &self.class)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a, O, T> SegmentCompare<'a, O, T>
where
    O: EphemerisSegment + ?Sized,
    T: EphemerisSegment + ?Sized,
{
    pub fn new(origin: &'a O, target: &'a T) -> CompareResult<Self> {
        Self::with_config(origin, target, CompareConfig::default())
    }

    pub fn with_config(origin: &'a O, target: &'a T, config: CompareConfig) -> CompareResult<Self> {
        let (om, tm) = (origin.metadata(), target.metadata());
        let mut fields = Vec::new();
        if om.ref_frame != tm.ref_frame {
            fields.push(Field::Frame);
        }
        if om.center_name != tm.center_name {
            fields.push(Field::Center);
        }
        if !fields.is_empty() {
            return Err(CompareError::mismatch(fields));
        }

        // Classified once here so an unknown frame warns once, not per sample
        let class = FrameClass::classify(&om.ref_frame);
        let span = origin.span().overlap(&target.span());
        match &span {
            Some(s) => debug!(span = %s, "segment overlap"),
            None => debug!(
                origin = %origin.span(),
                target = %target.span(),
                "segments do not overlap"
            ),
        }

        Ok(SegmentCompare {
            origin,
            target,
            span,
            class,
            config,
        })
    }

    /// Common validity window, `None` if the segments do not overlap.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Classification of the shared REF_FRAME.
    pub fn classification(&self) -> FrameClass {
        self.class
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_none()
    }

    pub fn contains(&self, epoch: Epoch) -> bool {
        self.span.is_some_and(|s| s.contains(epoch))
    }

    /// Compare the two segments at `epoch`.
    pub fn evaluate(&self, epoch: Epoch) -> CompareResult<StateCompare> {
        if !self.contains(epoch) {
            return Err(CompareError::OutOfRange {
                epoch,
                span: self.span,
            });
        }
        let origin = self.origin.evaluate(epoch);
        let target = self.target.evaluate(epoch);
        check_compatible(&origin, &target)?;
        let class = if origin.frame == self.origin.metadata().ref_frame {
            self.class
        } else {
            FrameClass::classify(&origin.frame)
        };
        Ok(compare_classified(origin, target, &self.config, class))
    }

    /// Sample the comparison every `step_seconds` across the overlap.
    ///
    /// The first sample is at the start of the overlap and the last at its
    /// end. Each call returns a fresh iterator; nothing is evaluated until
    /// it is advanced.
    pub fn steps(&self, step_seconds: f64) -> CompareResult<Steps<'_, 'a, O, T>> {
        if !(step_seconds.is_finite() && step_seconds > 0.0) {
            return Err(CompareError::InvalidArgument(format!(
                "step size must be positive and finite, got {step_seconds}"
            )));
        }
        let epochs = match self.span {
            Some(span) => Some(span.range(step_seconds).ok_or_else(|| {
                CompareError::InvalidArgument(format!(
                    "step size {step_seconds} s is below nanosecond resolution"
                ))
            })?),
            None => None,
        };
        Ok(Steps {
            compare: self,
            epochs,
        })
    }
}

/// Lazy sampler returned by [`SegmentCompare::steps`].
pub struct Steps<'s, 'a, O: ?Sized, T: ?Sized> {
    compare: &'s SegmentCompare<'a, O, T>,
    epochs: Option<TimeRange>,
}

impl<O, T> Iterator for Steps<'_, '_, O, T>
where
    O: EphemerisSegment + ?Sized,
    T: EphemerisSegment + ?Sized,
{
    type Item = CompareResult<StateCompare>;

    fn next(&mut self) -> Option<Self::Item> {
        let epoch = self.epochs.as_mut()?.next()?;
        Some(self.compare.evaluate(epoch))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.epochs
            .as_ref()
            .map_or((0, Some(0)), |epochs| epochs.size_hint())
    }
}
