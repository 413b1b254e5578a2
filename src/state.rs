use std::collections::BTreeSet;

use crate::analysis::{DatasetAnalysis, SensorKind};
use crate::color::ColorMap;
use crate::data::model::Sample;
use crate::stats::RadiusSeries;

// ---------------------------------------------------------------------------
// View selection
// ---------------------------------------------------------------------------

/// What the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Raw vs. calibrated point clouds projected onto an axis plane.
    Scatter,
    /// Radius sequences per sample index.
    Radius,
}

/// Axis plane the scatter view projects onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::Xy, Plane::Xz, Plane::Yz];

    pub fn label(self) -> &'static str {
        match self {
            Plane::Xy => "X / Y",
            Plane::Xz => "X / Z",
            Plane::Yz => "Y / Z",
        }
    }

    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            Plane::Xy => ("x", "y"),
            Plane::Xz => ("x", "z"),
            Plane::Yz => ("y", "z"),
        }
    }

    pub fn project(self, s: &Sample) -> [f64; 2] {
        match self {
            Plane::Xy => [s.x, s.y],
            Plane::Xz => [s.x, s.z],
            Plane::Yz => [s.y, s.z],
        }
    }
}

// ---------------------------------------------------------------------------
// Plot series enumeration
// ---------------------------------------------------------------------------

/// Point-cloud series available per dataset in the scatter view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PointSeries {
    Raw,
    Ellipsoid,
    MinMax,
}

impl PointSeries {
    pub const ALL: [PointSeries; 3] =
        [PointSeries::Raw, PointSeries::Ellipsoid, PointSeries::MinMax];

    pub fn label(self) -> &'static str {
        match self {
            PointSeries::Raw => "raw",
            PointSeries::Ellipsoid => "ellipsoid",
            PointSeries::MinMax => "min-max",
        }
    }

    pub fn points(self, analysis: &DatasetAnalysis) -> &[Sample] {
        match self {
            PointSeries::Raw => &analysis.dataset.samples,
            PointSeries::Ellipsoid => &analysis.ellipsoid_points,
            PointSeries::MinMax => &analysis.min_max_points,
        }
    }
}

/// Radius sequences available per dataset in the radius view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RadiusCurve {
    Raw,
    EllipsoidOffset,
    EllipsoidScaled,
    MinMaxOffset,
    MinMaxScaled,
}

impl RadiusCurve {
    pub const ALL: [RadiusCurve; 5] = [
        RadiusCurve::Raw,
        RadiusCurve::EllipsoidOffset,
        RadiusCurve::EllipsoidScaled,
        RadiusCurve::MinMaxOffset,
        RadiusCurve::MinMaxScaled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RadiusCurve::Raw => "raw",
            RadiusCurve::EllipsoidOffset => "offset",
            RadiusCurve::EllipsoidScaled => "scaled",
            RadiusCurve::MinMaxOffset => "offset (minmax)",
            RadiusCurve::MinMaxScaled => "scaled (minmax)",
        }
    }

    pub fn series(self, analysis: &DatasetAnalysis) -> &RadiusSeries {
        match self {
            RadiusCurve::Raw => &analysis.raw_radius,
            RadiusCurve::EllipsoidOffset => &analysis.ellipsoid_offset_radius,
            RadiusCurve::EllipsoidScaled => &analysis.ellipsoid_radius,
            RadiusCurve::MinMaxOffset => &analysis.min_max_offset_radius,
            RadiusCurve::MinMaxScaled => &analysis.min_max_radius,
        }
    }
}

/// Legend label for one dataset series, e.g. `Magn_Dump offset (minmax)`.
pub fn series_label(dataset: &str, series: &str) -> String {
    format!("{dataset} {series}")
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// One entry per input file, in load order.
    pub analyses: Vec<DatasetAnalysis>,

    pub view: ViewMode,
    pub plane: Plane,

    /// Visible (dataset index, series) pairs for the scatter view.
    pub visible_points: BTreeSet<(usize, PointSeries)>,
    /// Visible (dataset index, curve) pairs for the radius view.
    pub visible_curves: BTreeSet<(usize, RadiusCurve)>,

    /// One colour per legend label, shared by both views.
    pub color_map: ColorMap,

    /// Sensor interpretation for datasets loaded from the UI.
    pub sensor: SensorKind,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(analyses: Vec<DatasetAnalysis>, sensor: SensorKind) -> Self {
        let mut state = AppState {
            analyses: Vec::new(),
            view: ViewMode::Scatter,
            plane: Plane::Xy,
            visible_points: BTreeSet::new(),
            visible_curves: BTreeSet::new(),
            color_map: ColorMap::default(),
            sensor,
            status_message: None,
        };
        for analysis in analyses {
            state.push_analysis(analysis);
        }
        state
    }

    /// Append a dataset, defaulting all of its series to visible.
    pub fn push_analysis(&mut self, analysis: DatasetAnalysis) {
        let idx = self.analyses.len();
        for series in PointSeries::ALL {
            self.visible_points.insert((idx, series));
        }
        for curve in RadiusCurve::ALL {
            self.visible_curves.insert((idx, curve));
        }
        self.analyses.push(analysis);
        self.rebuild_color_map();
    }

    /// One colour per (dataset, series) legend label, stable across views.
    fn rebuild_color_map(&mut self) {
        let mut labels = BTreeSet::new();
        for analysis in &self.analyses {
            let name = &analysis.dataset.name;
            for series in PointSeries::ALL {
                labels.insert(series_label(name, series.label()));
            }
            for curve in RadiusCurve::ALL {
                labels.insert(series_label(name, curve.label()));
            }
        }
        self.color_map = ColorMap::new(labels);
    }

    pub fn toggle_point_series(&mut self, idx: usize, series: PointSeries) {
        let key = (idx, series);
        if !self.visible_points.remove(&key) {
            self.visible_points.insert(key);
        }
    }

    pub fn toggle_radius_curve(&mut self, idx: usize, curve: RadiusCurve) {
        let key = (idx, curve);
        if !self.visible_curves.remove(&key) {
            self.visible_curves.insert(key);
        }
    }

    /// Make every series of one dataset visible.
    pub fn select_all(&mut self, idx: usize) {
        for series in PointSeries::ALL {
            self.visible_points.insert((idx, series));
        }
        for curve in RadiusCurve::ALL {
            self.visible_curves.insert((idx, curve));
        }
    }

    /// Hide every series of one dataset.
    pub fn select_none(&mut self, idx: usize) {
        for series in PointSeries::ALL {
            self.visible_points.remove(&(idx, series));
        }
        for curve in RadiusCurve::ALL {
            self.visible_curves.remove(&(idx, curve));
        }
    }
}
