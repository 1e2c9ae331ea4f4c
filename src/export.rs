use crate::assemble::{assemble, Datapoint};
use crate::error::ExportError;
use crate::file::{touchstone_path, write_touchstone};
use crate::format::DataFormat;
use crate::matrix::{PortMatrix, MAX_PORTS, MIN_PORTS};
use crate::trace::TraceSource;
use crate::unit::FrequencyUnit;
use num::complex::Complex64;
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub const DEFAULT_Z0: f64 = 50.0;

/// Output settings of a Touchstone export.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportOptions {
    unit: FrequencyUnit,
    format: DataFormat,
    z0: f64,
    comments: Vec<String>,
}

impl ExportOptions {
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Reference impedance in ohms
    pub fn z0(&self) -> f64 {
        self.z0
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            unit: FrequencyUnit::GHz,
            format: DataFormat::ReIm,
            z0: DEFAULT_Z0,
            comments: vec![],
        }
    }
}

/// Builder design pattern for ExportOptions.
///
/// ## Example
/// ```
/// use rfexport::prelude::*;
///
/// let options = ExportOptionsBuilder::new()
///     .unit(FrequencyUnit::MHz)
///     .format_str("db")
///     .comment("DUT 7")
///     .build()
///     .unwrap();
/// assert_eq!(options.format(), DataFormat::Db);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExportOptionsBuilder {
    options: ExportOptions,
}

impl ExportOptionsBuilder {
    pub fn new() -> Self {
        ExportOptionsBuilder::default()
    }

    pub fn unit(mut self, unit: FrequencyUnit) -> Self {
        self.options.unit = unit;
        self
    }

    /// Unrecognized strings leave the unit unchanged
    pub fn unit_str(mut self, unit: &str) -> Self {
        if let Ok(unit) = FrequencyUnit::from_str(unit) {
            self.options.unit = unit;
        }
        self
    }

    pub fn format(mut self, format: DataFormat) -> Self {
        self.options.format = format;
        self
    }

    /// Unrecognized strings leave the format unchanged
    pub fn format_str(mut self, format: &str) -> Self {
        if let Ok(format) = DataFormat::from_str(format) {
            self.options.format = format;
        }
        self
    }

    pub fn z0(mut self, z0: f64) -> Self {
        self.options.z0 = z0;
        self
    }

    /// One `!` line per line of `comment`; an empty comment is written as a
    /// bare `!`. A multi-line comment reads back as one comment per line.
    pub fn comment(mut self, comment: &str) -> Self {
        self.options.comments.push(comment.to_string());
        self
    }

    pub fn build(self) -> Result<ExportOptions, ExportError> {
        let z0 = self.options.z0;
        if !(z0.is_finite() && z0 > 0.0) {
            return Err(ExportError::InvalidImpedance(z0));
        }
        if let Some(comment) = self.options.comments.iter().find(|c| !c.is_ascii()) {
            return Err(ExportError::InvalidComment(comment.clone()));
        }
        Ok(self.options)
    }
}

/// Everything needed to render one Touchstone file.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportResult {
    ports: usize,
    options: ExportOptions,
    datapoints: Vec<Datapoint>,
}

impl ExportResult {
    /// Every datapoint must hold `ports * ports` values.
    pub fn new(
        ports: usize,
        options: ExportOptions,
        datapoints: Vec<Datapoint>,
    ) -> Result<Self, ExportError> {
        if !(MIN_PORTS..=MAX_PORTS).contains(&ports) {
            return Err(ExportError::InvalidPortCount(ports));
        }
        if let Some((index, d)) = datapoints
            .iter()
            .enumerate()
            .find(|(_, d)| d.values.len() != ports * ports)
        {
            return Err(ExportError::DatapointShape {
                index,
                expected: ports * ports,
                found: d.values.len(),
            });
        }
        Ok(ExportResult {
            ports,
            options,
            datapoints,
        })
    }

    pub fn ports(&self) -> usize {
        self.ports
    }

    pub fn npts(&self) -> usize {
        self.datapoints.len()
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn unit(&self) -> FrequencyUnit {
        self.options.unit
    }

    pub fn format(&self) -> DataFormat {
        self.options.format
    }

    pub fn z0(&self) -> f64 {
        self.options.z0
    }

    pub fn comments(&self) -> &[String] {
        &self.options.comments
    }

    pub fn datapoints(&self) -> &[Datapoint] {
        &self.datapoints
    }

    /// Frequencies in Hz
    pub fn frequencies(&self) -> Vec<f64> {
        self.datapoints.iter().map(|d| d.frequency).collect()
    }

    /// S(`row`, `col`) over all frequencies
    pub fn s(&self, row: usize, col: usize) -> Option<Vec<Complex64>> {
        self.datapoints
            .iter()
            .map(|d| d.s(row, col, self.ports))
            .collect()
    }
}

/// Assemble the selection and write it as a Touchstone file.
///
/// An `.sNp` extension is appended when `path` has none, and an `.sNp`
/// extension naming another port count is replaced. `EmptySelection` is
/// returned before anything is written.
pub fn export<S>(
    matrix: &PortMatrix,
    source: &S,
    options: &ExportOptions,
    path: &Path,
) -> Result<ExportResult, ExportError>
where
    S: TraceSource + ?Sized,
{
    let datapoints = assemble(matrix, source)?;
    let result = ExportResult::new(matrix.ports(), options.clone(), datapoints)?;
    let path = touchstone_path(path, result.ports());
    write_touchstone(&path, &result)?;
    info!(
        path = %path.display(),
        ports = result.ports(),
        points = result.npts(),
        unit = %result.unit(),
        format = %result.format(),
        "touchstone file written"
    );
    Ok(result)
}
