use eframe::egui;

use crate::pipeline::Rendered;
use crate::state::{ViewTab, ViewerState};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ViolinViewerApp {
    pub state: ViewerState,
}

impl ViolinViewerApp {
    pub fn new(rendered: Rendered) -> Self {
        Self {
            state: ViewerState::new(rendered),
        }
    }
}

impl eframe::App for ViolinViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: view switch and overlays ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: statistics ----
        egui::SidePanel::left("stats_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            ViewTab::Interactive => plot::violin_plot(ui, &self.state),
            ViewTab::Rendered => plot::rendered_image(ui, &self.state),
        });
    }
}

/// Open a window showing `rendered`; blocks until it is closed.
pub fn show(rendered: Rendered) -> eframe::Result {
    let title = rendered.figure.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can decode the saved PNG.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ViolinViewerApp::new(rendered)))
        }),
    )
}
