//! Calibration parameter files in the firmware's `key = value` format:
//!
//! ```text
//! # comment
//! magn.x_offset = 12.345678
//! magn.x_scale = 1.003201
//! magn.declination_mrad = 0.0
//! ```
//!
//! Sensor prefixes are `accel`, `magn` and `gyro`. Unrecognised keys are
//! logged as warnings and skipped; values that fail to parse, or that fall
//! outside the finite `f64` range, are errors.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::analysis::SensorKind;
use crate::calib::Calibration;

const AXES: [&str; 3] = ["x", "y", "z"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CalFileError {
    #[error("cannot access calibration file {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("{key} value \"{value}\" is not a number in {file}")]
    BadValue {
        key: String,
        value: String,
        file: String,
    },

    #[error("{key} value out of range in {file}")]
    OutOfRange { key: String, file: String },
}

// ---------------------------------------------------------------------------
// CalFile – every parameter a calibration file can carry
// ---------------------------------------------------------------------------

/// Parsed calibration file contents. Missing keys keep their defaults
/// (zero offsets, unit scales, zero declination).
#[derive(Debug, Clone, PartialEq)]
pub struct CalFile {
    pub accel: Calibration,
    pub magn: Calibration,
    pub gyro: Calibration,
    pub declination_mrad: f64,
}

impl Default for CalFile {
    fn default() -> Self {
        CalFile {
            accel: Calibration::identity(),
            magn: Calibration::identity(),
            gyro: Calibration::identity(),
            declination_mrad: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn format_sensor(prefix: &str, cal: &Calibration) -> String {
    let mut out = String::new();
    for (axis, offset) in AXES.iter().zip(&cal.offset) {
        out.push_str(&format!("{prefix}.{axis}_offset = {offset:.6}\n"));
    }
    for (axis, scale) in AXES.iter().zip(&cal.scale) {
        out.push_str(&format!("{prefix}.{axis}_scale = {scale:.6}\n"));
    }
    out
}

/// Render a complete calibration file.
pub fn format_cal_file(cal: &CalFile) -> String {
    let mut out = String::from("# written by triaxcal\n");
    out.push_str(&format_sensor("accel", &cal.accel));
    out.push_str(&format_sensor("magn", &cal.magn));
    out.push_str(&format!(
        "magn.declination_mrad = {:.6}\n",
        cal.declination_mrad
    ));
    out.push_str(&format_sensor("gyro", &cal.gyro));
    out
}

/// Write one sensor's fitted parameters to `path`.
///
/// The file carries every sensor's parameters, so an existing file is
/// parsed first and only the fitted sensor's block is replaced.
pub fn write_calibration(
    path: &Path,
    kind: SensorKind,
    cal: &Calibration,
) -> Result<(), CalFileError> {
    let mut file = if path.is_file() {
        read_calibration(path)?
    } else {
        CalFile::default()
    };
    match kind {
        SensorKind::Magnetometer => file.magn = *cal,
        SensorKind::Accelerometer => file.accel = *cal,
    }

    fs::write(path, format_cal_file(&file)).map_err(|source| CalFileError::Io {
        file: path.display().to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Read a calibration file back into a [`CalFile`].
pub fn read_calibration(path: &Path) -> Result<CalFile, CalFileError> {
    let text = fs::read_to_string(path).map_err(|source| CalFileError::Io {
        file: path.display().to_string(),
        source,
    })?;
    parse(&path.display().to_string(), &text)
}

/// Parse calibration-file text. `file` is used for error reporting only.
pub fn parse(file: &str, text: &str) -> Result<CalFile, CalFileError> {
    let mut cal = CalFile::default();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        let parsed: f64 = value.parse().map_err(|_| CalFileError::BadValue {
            key: key.to_string(),
            value: value.to_string(),
            file: file.to_string(),
        })?;
        // The float parser saturates overflowing literals to infinity.
        if !parsed.is_finite() {
            return Err(CalFileError::OutOfRange {
                key: key.to_string(),
                file: file.to_string(),
            });
        }

        if !apply_key(&mut cal, key, parsed) {
            log::warn!("unrecognized calibration key {key}");
        }
    }

    Ok(cal)
}

fn apply_key(cal: &mut CalFile, key: &str, value: f64) -> bool {
    let Some((prefix, field)) = key.split_once('.') else {
        return false;
    };

    if prefix == "magn" && field == "declination_mrad" {
        cal.declination_mrad = value;
        return true;
    }

    let sensor = match prefix {
        "accel" => &mut cal.accel,
        "magn" => &mut cal.magn,
        "gyro" => &mut cal.gyro,
        _ => return false,
    };
    let Some((axis, kind)) = field.split_once('_') else {
        return false;
    };
    let Some(index) = AXES.iter().position(|a| *a == axis) else {
        return false;
    };

    match kind {
        "offset" => sensor.offset[index] = value,
        "scale" => sensor.scale[index] = value,
        _ => return false,
    }
    true
}
