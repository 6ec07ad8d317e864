use eframe::egui::{self, Align2, Color32, Stroke, Ui};
use egui_plot::{
    BoxElem, BoxPlot, BoxSpread, GridMark, Line, Plot, PlotPoint, PlotPoints, Points, Polygon,
    Text,
};

use crate::chart::geometry::ViolinBody;
use crate::color::{to_color32, INK};
use crate::state::ViewerState;

/// Width of the interquartile bar relative to the violin half width.
const BOX_FRACTION: f64 = 0.075;

// ---------------------------------------------------------------------------
// Violin plot (central panel, interactive tab)
// ---------------------------------------------------------------------------

/// Render the figure geometry as a pan/zoom plot.
pub fn violin_plot(ui: &mut Ui, state: &ViewerState) {
    let figure = &state.figure;
    let ink = to_color32(INK);
    let (x_lo, x_hi) = figure.x_range();
    let (y_lo, y_hi) = figure.y_range;

    let categories = state.categories();
    let ticks: Vec<f64> = categories.iter().map(|(x, _)| *x).collect();

    Plot::new("violin_plot")
        .y_axis_label(figure.y_label.clone())
        .show_grid([false, true])
        .include_x(x_lo)
        .include_x(x_hi)
        .include_y(y_lo)
        .include_y(y_hi)
        .x_grid_spacer(move |_input| {
            ticks
                .iter()
                .map(|&value| GridMark {
                    value,
                    step_size: 1.0,
                })
                .collect()
        })
        .x_axis_formatter(move |mark, _range| {
            categories
                .iter()
                .find(|(x, _)| (x - mark.value).abs() < 1e-6)
                .map(|(_, label)| label.clone())
                .unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for group in &figure.groups {
                let fill = to_color32(group.fill);
                match &group.body {
                    ViolinBody::Density(_) => {
                        let outline: PlotPoints =
                            group.outline().into_iter().map(|(x, y)| [x, y]).collect();
                        plot_ui.polygon(
                            Polygon::new(outline)
                                .fill_color(fill)
                                .stroke(Stroke::new(1.0, ink))
                                .name(&group.label),
                        );
                    }
                    ViolinBody::Flat(value) => {
                        let x = group.position;
                        let w = figure.half_width;
                        plot_ui.line(
                            Line::new(PlotPoints::from(vec![[x - w, *value], [x + w, *value]]))
                                .color(ink)
                                .width(1.5)
                                .name(&group.label),
                        );
                    }
                }

                if state.show_points {
                    let points: PlotPoints = group.points.iter().map(|&(x, y)| [x, y]).collect();
                    plot_ui.points(
                        Points::new(points)
                            .radius(2.5)
                            .color(ink.gamma_multiply(0.7)),
                    );
                }

                let (count, (cx, cy)) = group.count_label();
                plot_ui.text(
                    Text::new(PlotPoint::new(cx, cy), count)
                        .anchor(Align2::CENTER_BOTTOM)
                        .color(Color32::BLACK),
                );
                let (mean, (mx, my)) = group.mean_label();
                plot_ui.text(
                    Text::new(PlotPoint::new(mx, my), mean)
                        .anchor(Align2::CENTER_TOP)
                        .color(Color32::BLACK),
                );
            }

            if state.show_box {
                let bar = figure.half_width * BOX_FRACTION;
                let boxes: Vec<BoxElem> = figure
                    .groups
                    .iter()
                    .map(|group| {
                        let b = group.box_summary;
                        BoxElem::new(
                            group.position,
                            BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
                        )
                        .name(&group.label)
                        .box_width(bar * 2.0)
                        .whisker_width(0.0)
                        .fill(ink)
                        .stroke(Stroke::new(1.0, ink))
                    })
                    .collect();
                plot_ui.box_plot(BoxPlot::new(boxes));
            }
        });
}

// ---------------------------------------------------------------------------
// Saved PNG (central panel, rendered tab)
// ---------------------------------------------------------------------------

/// Show the PNG exactly as written to disk.
pub fn rendered_image(ui: &mut Ui, state: &ViewerState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.add(egui::Image::from_bytes(state.image_uri(), state.png.clone()).shrink_to_fit());
    });
}
