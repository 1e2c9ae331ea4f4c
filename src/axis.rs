//! Frequency compatibility between the traces of one export.
//!
//! The first trace placed in the matrix fixes the frequency axis. Until every
//! cell is cleared again, only traces on exactly that axis may be selected.

use crate::error::ExportError;
use crate::trace::Trace;
use std::fmt;
use tracing::debug;

/// Point count and span shared by all traces of an export. Frequencies in Hz.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyAxis {
    points: usize,
    lower: f64,
    upper: f64,
}

impl FrequencyAxis {
    pub fn new(points: usize, lower: f64, upper: f64) -> Self {
        FrequencyAxis {
            points,
            lower,
            upper,
        }
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn lower_freq(&self) -> f64 {
        self.lower
    }

    pub fn upper_freq(&self) -> f64 {
        self.upper
    }

    /// Exact match of size and, for non-empty axes, of both end frequencies.
    /// No tolerance is applied.
    pub fn accepts(&self, trace: &Trace) -> bool {
        trace.size() == self.points
            && (self.points == 0
                || (trace.min_freq() == self.lower && trace.max_freq() == self.upper))
    }
}

impl fmt::Display for FrequencyAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} points from {} Hz to {} Hz",
            self.points, self.lower, self.upper
        )
    }
}

/// State of the frequency lock of a selection matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AxisState {
    #[default]
    Open,
    Locked(FrequencyAxis),
}

impl AxisState {
    pub fn is_locked(&self) -> bool {
        matches!(self, AxisState::Locked(_))
    }

    pub fn axis(&self) -> Option<&FrequencyAxis> {
        match self {
            AxisState::Open => None,
            AxisState::Locked(axis) => Some(axis),
        }
    }

    pub fn is_eligible(&self, trace: &Trace) -> bool {
        match self {
            AxisState::Open => true,
            AxisState::Locked(axis) => axis.accepts(trace),
        }
    }

    /// Keep the candidates that may still be selected, in input order.
    pub fn filter<'a, I>(&self, candidates: I) -> Vec<&'a Trace>
    where
        I: IntoIterator<Item = &'a Trace>,
    {
        candidates
            .into_iter()
            .filter(|t| self.is_eligible(t))
            .collect()
    }

    pub fn check(&self, trace: &Trace) -> Result<(), ExportError> {
        match self {
            AxisState::Locked(axis) if !axis.accepts(trace) => {
                Err(ExportError::IncompatibleFrequencyAxis {
                    trace: trace.name().to_string(),
                    expected: axis.to_string(),
                    found: trace.axis().to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Apply the outcome of one cell mutation.
    ///
    /// `selected` is the trace just written to the cell (None when cleared),
    /// `all_empty` tells whether every cell is empty after the write.
    pub fn transition(&mut self, selected: Option<&Trace>, all_empty: bool) {
        match (*self, selected) {
            (AxisState::Open, Some(trace)) => {
                let axis = trace.axis();
                debug!(trace = trace.name(), %axis, "frequency axis locked");
                *self = AxisState::Locked(axis);
            }
            (AxisState::Locked(_), _) if all_empty => {
                debug!("frequency axis released");
                *self = AxisState::Open;
            }
            _ => {}
        }
    }
}
