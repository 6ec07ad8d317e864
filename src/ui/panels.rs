use eframe::egui::{self, RichText, Ui};

use crate::color::{to_color32, INK};
use crate::state::{ViewTab, ViewerState};

// ---------------------------------------------------------------------------
// Left side panel – per-group statistics
// ---------------------------------------------------------------------------

/// Render the statistics panel.
pub fn side_panel(ui: &mut Ui, state: &ViewerState) {
    ui.heading("Summary");
    ui.separator();

    egui::Grid::new("summary_grid")
        .num_columns(6)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for header in ["Group", "n", "mean", "min", "max", "median"] {
                ui.strong(header);
            }
            ui.end_row();

            for group in &state.figure.groups {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, to_color32(group.fill));
                    ui.label(group.label.as_str());
                });
                let stats = &group.stats;
                ui.label(stats.count.to_string());
                ui.label(format!("{:.4}", stats.mean));
                ui.label(format!("{:.4}", stats.min));
                ui.label(format!("{:.4}", stats.max));
                ui.label(format!("{:.4}", stats.median));
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.label(
        RichText::new(format!("Title: {}", state.figure.title))
            .small()
            .color(to_color32(INK)),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, ViewTab::Interactive, "Interactive");
        ui.selectable_value(&mut state.tab, ViewTab::Rendered, "Rendered PNG");

        ui.separator();

        ui.add_enabled_ui(state.tab == ViewTab::Interactive, |ui: &mut Ui| {
            ui.checkbox(&mut state.show_points, "Points");
            ui.checkbox(&mut state.show_box, "Inner box");
        });

        ui.separator();

        ui.label(format!("Saved as {}", state.output.display()));
    });
}
