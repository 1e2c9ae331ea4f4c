use crate::trace::TraceId;
use std::fmt;

/// Errors raised while selecting traces, assembling datapoints, or reading
/// and writing Touchstone files.
#[derive(Debug, PartialEq)]
pub enum ExportError {
    InvalidPortCount(usize),
    OutOfRange {
        row: usize,
        col: usize,
        ports: usize,
    },
    RoleMismatch {
        row: usize,
        col: usize,
        reflection: bool,
    },
    IncompatibleFrequencyAxis {
        trace: String,
        expected: String,
        found: String,
    },
    EmptySelection,
    InvalidImpedance(f64),
    InvalidComment(String),
    DatapointShape {
        index: usize,
        expected: usize,
        found: usize,
    },
    UnknownTrace(TraceId),
    WriteError(String),
    ParseError(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExportError::InvalidPortCount(n) => {
                write!(f, "Invalid port count {}: must be within 1..=4", n)
            }
            ExportError::OutOfRange { row, col, ports } => write!(
                f,
                "Cell ({}, {}) out of range for a {}-port matrix",
                row, col, ports
            ),
            ExportError::RoleMismatch {
                row,
                col,
                reflection,
            } => {
                if *reflection {
                    write!(
                        f,
                        "Reflection trace can not be placed at through cell ({}, {})",
                        row, col
                    )
                } else {
                    write!(
                        f,
                        "Through trace can not be placed at reflection cell ({}, {})",
                        row, col
                    )
                }
            }
            ExportError::IncompatibleFrequencyAxis {
                trace,
                expected,
                found,
            } => write!(
                f,
                "Trace '{}' does not share the locked frequency axis: expected {}, found {}",
                trace, expected, found
            ),
            ExportError::EmptySelection => {
                write!(f, "No trace selected: nothing to export")
            }
            ExportError::InvalidImpedance(z0) => {
                write!(f, "Invalid reference impedance {} ohm", z0)
            }
            ExportError::InvalidComment(comment) => {
                write!(f, "Comment '{}' is not plain ASCII", comment)
            }
            ExportError::DatapointShape {
                index,
                expected,
                found,
            } => write!(
                f,
                "Datapoint {} holds {} values, expected {}",
                index, found, expected
            ),
            ExportError::UnknownTrace(id) => {
                write!(f, "Trace {} is no longer available", id)
            }
            ExportError::WriteError(msg) => write!(f, "Write error: {}", msg),
            ExportError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::WriteError(err.to_string())
    }
}
