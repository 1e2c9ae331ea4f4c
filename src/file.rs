//! Touchstone (`.sNp`) reading and writing.
//!
//! Files carry `!` comment lines, one option line
//! `# <unit> S <format> R <z0>`, then one line of data per frequency point.
//! Two-port data is ordered `S11 S21 S12 S22`; every other port count is
//! row-major.

use crate::assemble::Datapoint;
use crate::error::ExportError;
use crate::export::{ExportOptionsBuilder, ExportResult};
use crate::format::DataFormat;
use crate::matrix::{MAX_PORTS, MIN_PORTS};
use crate::unit::FrequencyUnit;
use num::complex::Complex64;
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// "s1p", "s2p", ...
pub fn touchstone_extension(ports: usize) -> String {
    format!("s{}p", ports)
}

/// Port count named by an `.sNp` extension
pub fn extension_ports(ext: &str) -> Option<usize> {
    let ext = ext.to_lowercase();
    let digits = ext.strip_prefix('s')?.strip_suffix('p')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// `path` with the `.sNp` extension appended when it has none, or put in
/// place of an `.sNp` extension naming another port count.
pub fn touchstone_path(path: &Path, ports: usize) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        None => path.with_extension(touchstone_extension(ports)),
        Some(ext) => match extension_ports(ext) {
            Some(n) if n != ports => path.with_extension(touchstone_extension(ports)),
            _ => path.to_path_buf(),
        },
    }
}

// Row-major index of each value in file order
fn data_order(ports: usize) -> Vec<usize> {
    if ports == 2 {
        vec![0, 2, 1, 3]
    } else {
        (0..ports * ports).collect()
    }
}

pub fn to_touchstone_string(result: &ExportResult) -> String {
    let unit = result.unit();
    let format = result.format();
    let order = data_order(result.ports());
    let mut out = String::new();

    for comment in result.comments() {
        if comment.is_empty() {
            out.push_str("!\n");
        }
        for line in comment.lines() {
            if line.is_empty() {
                out.push_str("!\n");
            } else {
                out.push_str(&format!("! {}\n", line));
            }
        }
    }
    out.push_str(&format!(
        "# {} S {} R {}\n",
        unit.to_option_str(),
        format.to_option_str(),
        result.z0()
    ));

    // Shortest representation that parses back to the same f64
    for point in result.datapoints() {
        let mut line = format!("{}", unit.scale(point.frequency));
        for &k in order.iter() {
            let (x, y) = format.split(point.values[k]);
            line.push_str(&format!(" {} {}", x, y));
        }
        line.push('\n');
        out.push_str(&line);
    }
    out
}

pub fn write_to<W: Write>(writer: &mut W, result: &ExportResult) -> Result<(), ExportError> {
    writer.write_all(to_touchstone_string(result).as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn write_touchstone(path: &Path, result: &ExportResult) -> Result<(), ExportError> {
    fs::write(path, to_touchstone_string(result))
        .map_err(|e| ExportError::WriteError(format!("{}: {}", path.display(), e)))
}

/// Read a Touchstone file, taking the port count from its `.sNp` extension.
pub fn read_touchstone(path: &Path) -> Result<ExportResult, ExportError> {
    let ports = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(extension_ports)
        .ok_or_else(|| {
            ExportError::ParseError(format!("{} is not a .sNp file", path.display()))
        })?;
    let content = fs::read_to_string(path)
        .map_err(|e| ExportError::ParseError(format!("{}: {}", path.display(), e)))?;
    parse_touchstone(&content, ports)
}

/// Parse Touchstone text of a `ports`-port network.
///
/// Without an option line the Touchstone defaults apply: GHz, MA, 50 ohm.
/// The option line must precede the data. Data of one frequency point may
/// span several lines, and frequencies must be strictly increasing.
pub fn parse_touchstone(text: &str, ports: usize) -> Result<ExportResult, ExportError> {
    if !(MIN_PORTS..=MAX_PORTS).contains(&ports) {
        return Err(ExportError::InvalidPortCount(ports));
    }
    let re_comment = Regex::new(r"^!\s?(.*)$").map_err(regex_err)?;

    let mut builder = ExportOptionsBuilder::new().format(DataFormat::MagAng);
    let mut option_line = false;
    let mut data_section = false;
    let mut numbers: Vec<f64> = vec![];

    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('[') {
            continue;
        }
        if let Some(caps) = re_comment.captures(line) {
            if !data_section {
                builder = builder.comment(caps[1].trim_end());
            }
            continue;
        }
        if line.starts_with('#') {
            if data_section {
                return Err(ExportError::ParseError(format!(
                    "line {}: option line after data",
                    n + 1
                )));
            }
            // Only the first option line counts
            if !option_line {
                builder = parse_option_line(line, builder)?;
                option_line = true;
            }
            continue;
        }

        let data = match line.find('!') {
            Some(i) => &line[..i],
            None => line,
        };
        for token in data.split_whitespace() {
            let val = token.parse::<f64>().map_err(|_| {
                ExportError::ParseError(format!("line {}: '{}' is not a number", n + 1, token))
            })?;
            numbers.push(val);
            data_section = true;
        }
    }

    let options = builder.build()?;
    let width = 1 + 2 * ports * ports;
    if numbers.len() % width != 0 {
        return Err(ExportError::ParseError(format!(
            "{} values do not form whole {}-port datapoints",
            numbers.len(),
            ports
        )));
    }

    let order = data_order(ports);
    let datapoints: Vec<Datapoint> = numbers
        .chunks(width)
        .map(|chunk| {
            let mut values = vec![Complex64::new(0.0, 0.0); ports * ports];
            for (k, pair) in chunk[1..].chunks(2).enumerate() {
                values[order[k]] = options.format().parse(pair[0], pair[1]);
            }
            Datapoint::new(options.unit().unscale(chunk[0]), values)
        })
        .collect();

    if let Some(pair) = datapoints
        .windows(2)
        .find(|w| w[1].frequency <= w[0].frequency)
    {
        return Err(ExportError::ParseError(format!(
            "frequency {} Hz follows {} Hz in {}-port data",
            pair[1].frequency, pair[0].frequency, ports
        )));
    }

    ExportResult::new(ports, options, datapoints)
}

fn parse_option_line(
    line: &str,
    mut builder: ExportOptionsBuilder,
) -> Result<ExportOptionsBuilder, ExportError> {
    let mut tokens = line.trim_start_matches('#').split_whitespace();
    while let Some(token) = tokens.next() {
        match token.to_lowercase().as_str() {
            "s" => {}
            "r" => {
                let z0 = tokens
                    .next()
                    .and_then(|t| t.parse::<f64>().ok())
                    .ok_or_else(|| {
                        ExportError::ParseError(format!(
                            "missing reference impedance in '{}'",
                            line
                        ))
                    })?;
                builder = builder.z0(z0);
            }
            "y" | "z" | "g" | "h" => {
                return Err(ExportError::ParseError(format!(
                    "parameter type '{}' not supported",
                    token
                )))
            }
            t => {
                if let Ok(unit) = FrequencyUnit::from_str(t) {
                    builder = builder.unit(unit);
                } else if let Ok(format) = DataFormat::from_str(t) {
                    builder = builder.format(format);
                } else {
                    return Err(ExportError::ParseError(format!(
                        "unknown option '{}' in '{}'",
                        token, line
                    )));
                }
            }
        }
    }
    Ok(builder)
}

fn regex_err(err: regex::Error) -> ExportError {
    ExportError::ParseError(err.to_string())
}
