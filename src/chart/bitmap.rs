//! Rasterises a [`Figure`] with the [`plotters`] bitmap backend.
//!
//! All sizes are given in points and scaled by the configured DPI, so a
//! 300 DPI canvas looks like a 100 DPI one at three times the pixel count.

use image::RgbImage;
use palette::Srgb;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::geometry::{Figure, GroupGeometry, ViolinBody};
use super::{PlotError, Result};
use crate::color::INK;
use crate::config::PlotConfig;

const FONT: &str = "sans-serif";

/// Width of the interquartile bar relative to the violin half width.
const BOX_FRACTION: f64 = 0.075;

/// Largest RGB canvas we are willing to allocate, in bytes.
const MAX_CANVAS_BYTES: usize = 1 << 30;

fn rgb(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

fn drawing(e: impl std::fmt::Display) -> PlotError {
    PlotError::Drawing(e.to_string())
}

/// Draw `figure` onto a white canvas of the configured size.
pub fn draw(figure: &Figure, config: &PlotConfig) -> Result<RgbImage> {
    let (width, height) = config.canvas_pixels();
    let len = canvas_len(width, height)?;
    let mut buffer = vec![0u8; len];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
        draw_chart(&root, figure, config)?;
        root.present().map_err(drawing)?;
    }

    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| PlotError::DrawingArea("canvas buffer does not match its size".to_string()))
}

/// Byte length of an RGB buffer of `width` × `height` pixels.
fn canvas_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .filter(|&len| len > 0 && len <= MAX_CANVAS_BYTES)
        .ok_or_else(|| {
            PlotError::InvalidData(format!("canvas of {width}x{height} pixels is not drawable"))
        })
}

fn draw_chart(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    figure: &Figure,
    config: &PlotConfig,
) -> Result<()> {
    let px = |points: f64| config.points_to_pixels(points).round().max(1.0) as u32;
    let font = |points: f64| config.points_to_pixels(points);
    let ink = rgb(INK);

    let (x_lo, x_hi) = figure.x_range();
    let (y_lo, y_hi) = figure.y_range;

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, (FONT, font(14.0)))
        .margin(px(8.0))
        .x_label_area_size(px(24.0))
        .y_label_area_size(px(48.0))
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    // Horizontal gridlines only. Unit-spaced x ticks land on the group
    // positions and carry the category names.
    let category = |x: &f64| figure.label_at(*x).unwrap_or_default().to_string();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(figure.groups.len() + 1)
        .bold_line_style(ink.mix(0.3).stroke_width(px(0.8)))
        .light_line_style(WHITE.stroke_width(0))
        .x_label_formatter(&category)
        .x_label_style((FONT, font(12.0)))
        .y_label_style((FONT, font(10.0)))
        .y_desc(figure.y_label.as_str())
        .axis_desc_style((FONT, font(12.0)))
        .draw()
        .map_err(drawing)?;

    for group in &figure.groups {
        draw_violin(&mut chart, group, figure.half_width, &px)?;
    }

    for group in &figure.groups {
        chart
            .draw_series(
                group
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, px(2.0), ink.mix(0.7).filled())),
            )
            .map_err(drawing)?;
    }

    let above = (FONT, font(10.0))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let below = above.pos(Pos::new(HPos::Center, VPos::Top));
    for group in &figure.groups {
        let (count, count_at) = group.count_label();
        let (mean, mean_at) = group.mean_label();
        chart
            .draw_series([
                Text::new(count, count_at, above.clone()),
                Text::new(mean, mean_at, below.clone()),
            ])
            .map_err(drawing)?;
    }

    Ok(())
}

type Chart<'a, 'b> = ChartContext<
    'a,
    BitMapBackend<'b>,
    Cartesian2d<RangedCoordf64, RangedCoordf64>,
>;

fn draw_violin(
    chart: &mut Chart<'_, '_>,
    group: &GroupGeometry,
    half_width: f64,
    px: &dyn Fn(f64) -> u32,
) -> Result<()> {
    let ink = rgb(INK);
    let x = group.position;

    match &group.body {
        ViolinBody::Density(_) => {
            let outline = group.outline();
            let mut edge = outline.clone();
            if let Some(&first) = outline.first() {
                edge.push(first);
            }
            chart
                .draw_series(std::iter::once(Polygon::new(outline, rgb(group.fill).filled())))
                .map_err(drawing)?;
            chart
                .draw_series(std::iter::once(PathElement::new(edge, ink.stroke_width(px(1.0)))))
                .map_err(drawing)?;
        }
        ViolinBody::Flat(value) => {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x - half_width, *value), (x + half_width, *value)],
                    ink.stroke_width(px(1.5)),
                )))
                .map_err(drawing)?;
        }
    }

    let summary = group.box_summary;
    let bar = half_width * BOX_FRACTION;
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(x, summary.lower_whisker), (x, summary.upper_whisker)],
            ink.stroke_width(px(1.0)),
        )))
        .map_err(drawing)?;
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(x - bar, summary.q1), (x + bar, summary.q3)],
            ink.filled(),
        )))
        .map_err(drawing)?;
    chart
        .draw_series(std::iter::once(Circle::new(
            (x, summary.median),
            px(2.0),
            WHITE.filled(),
        )))
        .map_err(drawing)?;

    Ok(())
}
