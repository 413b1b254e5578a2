use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::state::{series_label, AppState, PointSeries, RadiusCurve, ViewMode};

// ---------------------------------------------------------------------------
// Central plot panel
// ---------------------------------------------------------------------------

/// Render the central plot in the selected view mode.
pub fn central_plot(ui: &mut Ui, state: &AppState) {
    if state.analyses.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dataset loaded  (File → Open…)");
        });
        return;
    }

    match state.view {
        ViewMode::Scatter => scatter_plot(ui, state),
        ViewMode::Radius => radius_plot(ui, state),
    }
}

/// Raw vs. calibrated point clouds projected onto the selected axis plane.
fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let (x_label, y_label) = state.plane.axis_labels();

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, analysis) in state.analyses.iter().enumerate() {
                for series in PointSeries::ALL {
                    if !state.visible_points.contains(&(idx, series)) {
                        continue;
                    }

                    let name = series_label(&analysis.dataset.name, series.label());
                    let color = state.color_map.color_for(&name);

                    let points: PlotPoints = series
                        .points(analysis)
                        .iter()
                        .map(|s| state.plane.project(s))
                        .collect();

                    plot_ui.points(
                        Points::new(points)
                            .name(&name)
                            .color(color)
                            .radius(2.0),
                    );
                }
            }
        });
}

/// Radius per sample index for every visible derived sequence.
fn radius_plot(ui: &mut Ui, state: &AppState) {
    Plot::new("radius_plot")
        .legend(Legend::default())
        .x_axis_label("sample")
        .y_axis_label("radius")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, analysis) in state.analyses.iter().enumerate() {
                for curve in RadiusCurve::ALL {
                    if !state.visible_curves.contains(&(idx, curve)) {
                        continue;
                    }

                    let name = series_label(&analysis.dataset.name, curve.label());
                    let color = state.color_map.color_for(&name);

                    let points: PlotPoints = curve
                        .series(analysis)
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, &r)| [i as f64, r])
                        .collect();

                    plot_ui.line(
                        Line::new(points)
                            .name(&name)
                            .color(color)
                            .width(1.5),
                    );
                }
            }
        });
}
