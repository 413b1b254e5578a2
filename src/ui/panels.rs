use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::analysis;
use crate::state::{series_label, AppState, Plane, PointSeries, RadiusCurve, ViewMode};

// ---------------------------------------------------------------------------
// Left side panel – view selection and series visibility
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("View");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.view, ViewMode::Scatter, "Scatter");
        ui.selectable_value(&mut state.view, ViewMode::Radius, "Radius");
    });

    if state.view == ViewMode::Scatter {
        egui::ComboBox::from_label("plane")
            .selected_text(state.plane.label())
            .show_ui(ui, |ui: &mut Ui| {
                for plane in Plane::ALL {
                    ui.selectable_value(&mut state.plane, plane, plane.label());
                }
            });
    }

    ui.separator();
    ui.heading("Series");

    if state.analyses.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for idx in 0..state.analyses.len() {
                let name = state.analyses[idx].dataset.name.clone();
                let n_samples = state.analyses[idx].dataset.len();

                egui::CollapsingHeader::new(
                    RichText::new(format!("{name}  ({n_samples})")).strong(),
                )
                .id_salt(idx)
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all(idx);
                        }
                        if ui.small_button("None").clicked() {
                            state.select_none(idx);
                        }
                    });

                    match state.view {
                        ViewMode::Scatter => {
                            for series in PointSeries::ALL {
                                let legend = series_label(&name, series.label());
                                let text = RichText::new(series.label())
                                    .color(state.color_map.color_for(&legend));
                                let mut checked =
                                    state.visible_points.contains(&(idx, series));
                                if ui.checkbox(&mut checked, text).changed() {
                                    state.toggle_point_series(idx, series);
                                }
                            }
                        }
                        ViewMode::Radius => {
                            for curve in RadiusCurve::ALL {
                                let legend = series_label(&name, curve.label());
                                let text = RichText::new(curve.label())
                                    .color(state.color_map.color_for(&legend));
                                let mut checked =
                                    state.visible_curves.contains(&(idx, curve));
                                if ui.checkbox(&mut checked, text).changed() {
                                    state.toggle_radius_curve(idx, curve);
                                }
                            }
                        }
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.analyses.is_empty() {
            let total: usize = state.analyses.iter().map(|a| a.dataset.len()).sum();
            ui.label(format!(
                "{} datasets, {} samples",
                state.analyses.len(),
                total
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Load another dump through the same pipeline. Failures stay in the UI as
/// a status message instead of aborting the run.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sensor dump")
        .add_filter("Sensor dumps", &["txt", "log", "dat"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        match analysis::load_and_analyze(&path, state.sensor) {
            Ok(analysis) => {
                log::info!(
                    "loaded {} samples from {}",
                    analysis.dataset.len(),
                    path.display()
                );
                state.status_message = None;
                state.push_analysis(analysis);
            }
            Err(e) => {
                log::error!("failed to load {}: {e:#}", path.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
