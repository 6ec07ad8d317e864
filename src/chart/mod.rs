//! Violin chart rendering.
//!
//! ```text
//!  LabeledTable ──► geometry::layout ──► Figure ──► bitmap::draw ──► RGB buffer
//!                                                                     │
//!                                          encode::write_png ◄── trim ┘
//! ```

pub mod bitmap;
pub mod encode;
pub mod geometry;

use std::path::Path;

use thiserror::Error;

use crate::config::PlotConfig;

pub use geometry::{layout, Figure};

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Render `figure` and write it to `output_path` as a content-trimmed PNG
/// carrying the configured DPI.
///
/// Returns the encoded PNG so callers can present it without reading the
/// file back.
pub fn render_to_file(figure: &Figure, config: &PlotConfig, output_path: &Path) -> Result<Vec<u8>> {
    let canvas = bitmap::draw(figure, config)?;
    let pad = config.points_to_pixels(encode::PAD_POINTS).round() as u32;
    let trimmed = encode::trim(&canvas, pad);
    log::debug!(
        "trimmed {}x{} canvas to {}x{}",
        canvas.width(),
        canvas.height(),
        trimmed.width(),
        trimmed.height()
    );

    let bytes = encode::encode_png(&trimmed, config.dpi)?;
    std::fs::write(output_path, &bytes)?;
    Ok(bytes)
}
