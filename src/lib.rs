//! Assemble multi-port S-parameter data from separately measured traces and
//! write it as a Touchstone file.
//!
//! ```
//! use num::complex::c64;
//! use rfexport::prelude::*;
//!
//! let mut traces = TraceSet::new();
//! let s11 = traces.add("S11", true, vec![Sample::new(1e9, c64(0.5, -0.5))]);
//!
//! let mut matrix = PortMatrix::new(1).unwrap();
//! matrix.set_cell(0, 0, traces.trace(s11)).unwrap();
//!
//! let points = assemble(&matrix, &traces).unwrap();
//! let result = ExportResult::new(1, ExportOptions::default(), points).unwrap();
//! assert_eq!(to_touchstone_string(&result), "# GHZ S RI R 50\n1 0.5 -0.5\n");
//! ```
pub mod assemble;
pub mod axis;
pub mod error;
pub mod export;
pub mod file;
pub mod format;
pub mod matrix;
pub mod prelude;
pub mod trace;
pub mod unit;
pub mod util;
