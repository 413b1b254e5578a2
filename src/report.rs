//! Console report: human-readable key/value lines with fixed-point
//! formatting, printed before the plot window opens.

use std::io::{self, Write};

use crate::analysis::{DatasetAnalysis, OUTLIER_STD_DEVS};
use crate::stats::RadiusSeries;

const AXES: [&str; 3] = ["x", "y", "z"];

/// Print the full report for every analysed dataset, in input order.
pub fn print_report(out: &mut impl Write, analyses: &[DatasetAnalysis]) -> io::Result<()> {
    for analysis in analyses {
        write_dataset(out, analysis)?;
    }
    Ok(())
}

fn write_dataset(out: &mut impl Write, a: &DatasetAnalysis) -> io::Result<()> {
    writeln!(out, "{} ({} samples)", a.dataset.name, a.dataset.len())?;

    for (axis, range) in AXES.iter().zip(&a.axis_ranges) {
        writeln!(out, "{axis} min max = ({:.6}, {:.6})", range.min, range.max)?;
    }

    // Ellipsoid fit.
    for (axis, offset) in AXES.iter().zip(&a.ellipsoid.offset) {
        writeln!(out, "{axis} offset = {offset:.6}")?;
    }
    for (axis, scale) in AXES.iter().zip(&a.ellipsoid.scale) {
        writeln!(out, "{axis} scale  = {scale:.6}")?;
    }

    // Min/max fit.
    for (axis, offset) in AXES.iter().zip(&a.min_max.offset) {
        writeln!(out, "mm {axis} offset = {offset:.6}")?;
    }
    for (axis, scale) in AXES.iter().zip(&a.min_max.scale) {
        writeln!(out, "mm {axis} scale  = {scale:.6}")?;
    }

    writeln!(out, "Raw radius:")?;
    write_series(out, &a.raw_radius)?;
    writeln!(out, "Offset radius:")?;
    write_series(out, &a.ellipsoid_offset_radius)?;
    writeln!(out, "Offset & scaled radius:")?;
    write_series(out, &a.ellipsoid_radius)?;
    writeln!(out, "mm Offset radius:")?;
    write_series(out, &a.min_max_offset_radius)?;
    writeln!(out, "mm Offset & scaled radius:")?;
    write_series(out, &a.min_max_radius)?;

    let lower = a.raw_radius.mean - a.raw_radius.std_dev * OUTLIER_STD_DEVS;
    let upper = a.raw_radius.mean + a.raw_radius.std_dev * OUTLIER_STD_DEVS;
    writeln!(
        out,
        "range ({OUTLIER_STD_DEVS:.6} stdev) = ({lower:.6} - {upper:.6})"
    )?;
    for o in &a.outliers {
        writeln!(
            out,
            "sample {} ({:.6}, {:.6}, {:.6}) radius {:.6}",
            o.index, o.sample.x, o.sample.y, o.sample.z, o.radius
        )?;
    }

    Ok(())
}

fn write_series(out: &mut impl Write, series: &RadiusSeries) -> io::Result<()> {
    writeln!(out, "    mean   = {:.6}", series.mean)?;
    writeln!(out, "    stddev = {:.6}", series.std_dev)
}
