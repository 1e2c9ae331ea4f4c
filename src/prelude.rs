//! rfexport prelude.
//!
//! This module contains the most used types and functions that you can
//! import easily as a group.
//!
//! ```
//! use rfexport::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use crate::assemble::{assemble, Datapoint};

#[doc(no_inline)]
pub use crate::axis::{AxisState, FrequencyAxis};

#[doc(no_inline)]
pub use crate::error::ExportError;

#[doc(no_inline)]
pub use crate::export::{export, ExportOptions, ExportOptionsBuilder, ExportResult};

#[doc(no_inline)]
pub use crate::file::{
    parse_touchstone, read_touchstone, to_touchstone_string, touchstone_extension,
    touchstone_path, write_to, write_touchstone,
};

#[doc(no_inline)]
pub use crate::format::DataFormat;

#[doc(no_inline)]
pub use crate::matrix::PortMatrix;

#[doc(no_inline)]
pub use crate::trace::{Sample, Trace, TraceId, TraceSet, TraceSource};

#[doc(no_inline)]
pub use crate::unit::FrequencyUnit;
