use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::fmt;
use std::str::FromStr;

/// Frequency unit of a Touchstone file. Frequencies are stored in Hz and
/// divided by the unit's multiplier when written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum FrequencyUnit {
    Hz,
    KHz,
    MHz,
    #[default]
    GHz,
}

impl FrequencyUnit {
    pub const ALL: [FrequencyUnit; 4] = [
        FrequencyUnit::Hz,
        FrequencyUnit::KHz,
        FrequencyUnit::MHz,
        FrequencyUnit::GHz,
    ];

    pub fn to_str(&self) -> &str {
        match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::GHz => "GHz",
        }
    }

    /// Token used on the Touchstone option line
    pub fn to_option_str(&self) -> &str {
        match self {
            FrequencyUnit::Hz => "HZ",
            FrequencyUnit::KHz => "KHZ",
            FrequencyUnit::MHz => "MHZ",
            FrequencyUnit::GHz => "GHZ",
        }
    }

    /// Provides multiplier for unit
    /// FrequencyUnit::GHz = 1e9
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
        }
    }

    /// Hz to this unit
    pub fn scale(&self, hz: f64) -> f64 {
        hz / self.multiplier()
    }

    /// This unit to Hz
    pub fn unscale(&self, val: f64) -> f64 {
        val * self.multiplier()
    }
}

impl FromStr for FrequencyUnit {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hz" | "hertz" => Ok(FrequencyUnit::Hz),
            "khz" | "kilo" | "k" => Ok(FrequencyUnit::KHz),
            "mhz" | "mega" => Ok(FrequencyUnit::MHz),
            "ghz" | "giga" | "g" => Ok(FrequencyUnit::GHz),
            _ => bail!("frequency unit '{}' not recognized", s),
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_unit_from_str() {
        let hz = ["HZ", "Hz", "hz", "hertz"];
        let khz = ["KHZ", "kHz", "khz", "kilo", "k"];
        let mhz = ["MHZ", "MHz", "mhz", "mega"];
        let ghz = ["GHZ", "GHz", "ghz", "giga", "G"];
        let nada = ["", "THz", ".sfwe"];

        for unit in hz.iter() {
            assert_eq!(FrequencyUnit::from_str(unit).unwrap(), FrequencyUnit::Hz);
        }

        for unit in khz.iter() {
            assert_eq!(FrequencyUnit::from_str(unit).unwrap(), FrequencyUnit::KHz);
        }

        for unit in mhz.iter() {
            assert_eq!(FrequencyUnit::from_str(unit).unwrap(), FrequencyUnit::MHz);
        }

        for unit in ghz.iter() {
            assert_eq!(FrequencyUnit::from_str(unit).unwrap(), FrequencyUnit::GHz);
        }

        for unit in nada.iter() {
            assert!(FrequencyUnit::from_str(unit).is_err());
        }
    }

    #[test]
    fn test_scale() {
        assert_eq!(FrequencyUnit::Hz.scale(1.5e9), 1.5e9);
        assert_eq!(FrequencyUnit::KHz.scale(1.5e9), 1.5e6);
        assert_eq!(FrequencyUnit::MHz.scale(1.5e9), 1.5e3);
        assert_eq!(FrequencyUnit::GHz.scale(1.5e9), 1.5);
        assert_eq!(FrequencyUnit::GHz.unscale(2.0), 2e9);
        assert_eq!(FrequencyUnit::KHz.unscale(2.0), 2e3);
    }

    #[test]
    fn test_option_str_round_trip() {
        for unit in FrequencyUnit::ALL.iter() {
            assert_eq!(
                FrequencyUnit::from_str(unit.to_option_str()).unwrap(),
                *unit
            );
            assert_eq!(FrequencyUnit::from_str(&unit.to_string()).unwrap(), *unit);
        }
    }
}
