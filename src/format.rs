use num::complex::Complex64;
use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::fmt;
use std::str::FromStr;

/// Pair representation of a complex S-value in a Touchstone file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DataFormat {
    /// dB magnitude and angle in degrees
    Db,
    /// linear magnitude and angle in degrees
    MagAng,
    #[default]
    ReIm,
}

impl DataFormat {
    pub const ALL: [DataFormat; 3] = [DataFormat::Db, DataFormat::MagAng, DataFormat::ReIm];

    /// Token used on the Touchstone option line
    pub fn to_option_str(&self) -> &str {
        match self {
            DataFormat::Db => "DB",
            DataFormat::MagAng => "MA",
            DataFormat::ReIm => "RI",
        }
    }

    /// Split a complex value into the two numbers written to file.
    ///
    /// A zero value in `Db` has a magnitude of `-inf`.
    pub fn split(&self, z: Complex64) -> (f64, f64) {
        match self {
            DataFormat::Db => (20.0 * z.norm().log10(), z.arg().to_degrees()),
            DataFormat::MagAng => (z.norm(), z.arg().to_degrees()),
            DataFormat::ReIm => (z.re, z.im),
        }
    }

    /// Inverse of [`DataFormat::split`]
    pub fn parse(&self, x: f64, y: f64) -> Complex64 {
        match self {
            DataFormat::Db => Complex64::from_polar(10_f64.powf(x / 20.0), y.to_radians()),
            DataFormat::MagAng => Complex64::from_polar(x, y.to_radians()),
            DataFormat::ReIm => Complex64::new(x, y),
        }
    }
}

impl FromStr for DataFormat {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "db" | "dbang" | "db-angle" => Ok(DataFormat::Db),
            "ma" | "magang" | "magnitude-angle" => Ok(DataFormat::MagAng),
            "ri" | "reim" | "real-imaginary" => Ok(DataFormat::ReIm),
            _ => bail!("data format '{}' not recognized", s),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            DataFormat::Db => write!(f, "db"),
            DataFormat::MagAng => write!(f, "ma"),
            DataFormat::ReIm => write!(f, "ri"),
        }
    }
}
