use crate::error::ExportError;
use crate::matrix::PortMatrix;
use crate::trace::{Trace, TraceSource};
use num::complex::Complex64;

/// S-parameters of all cells at one frequency.
#[derive(Clone, Debug, PartialEq)]
pub struct Datapoint {
    /// Hz
    pub frequency: f64,
    /// Row-major, `ports * ports` values
    pub values: Vec<Complex64>,
}

impl Datapoint {
    pub fn new(frequency: f64, values: Vec<Complex64>) -> Self {
        Datapoint { frequency, values }
    }

    /// Value of S(`row`, `col`) in a `ports`-port datapoint
    pub fn s(&self, row: usize, col: usize, ports: usize) -> Option<Complex64> {
        if row >= ports || col >= ports {
            return None;
        }
        self.values.get(row * ports + col).copied()
    }
}

/// Gather one datapoint per frequency index of the locked axis.
///
/// Empty cells contribute `0 + 0i`. The frequency of each datapoint comes
/// from the first selected cell in row-major order.
pub fn assemble<S>(matrix: &PortMatrix, source: &S) -> Result<Vec<Datapoint>, ExportError>
where
    S: TraceSource + ?Sized,
{
    let axis = matrix.axis().ok_or(ExportError::EmptySelection)?;

    let cells = matrix
        .cells()
        .iter()
        .map(|cell| match cell {
            Some(id) => source
                .trace(*id)
                .map(Some)
                .ok_or(ExportError::UnknownTrace(*id)),
            None => Ok(None),
        })
        .collect::<Result<Vec<Option<&Trace>>, ExportError>>()?;

    for trace in cells.iter().flatten() {
        matrix.axis_state().check(trace)?;
    }

    let reference = cells
        .iter()
        .flatten()
        .next()
        .ok_or(ExportError::EmptySelection)?;

    let datapoints = (0..axis.points())
        .map(|s| {
            let values = cells
                .iter()
                .map(|cell| match cell {
                    Some(trace) => trace.samples()[s].response,
                    None => Complex64::new(0.0, 0.0),
                })
                .collect();
            Datapoint::new(reference.samples()[s].frequency, values)
        })
        .collect();

    Ok(datapoints)
}
