use std::path::PathBuf;
use std::sync::Arc;

use crate::chart::Figure;
use crate::pipeline::Rendered;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Which rendition of the chart the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTab {
    /// Pan/zoom plot drawn from the figure geometry.
    Interactive,
    /// The PNG exactly as it was saved.
    Rendered,
}

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    pub figure: Figure,

    /// Encoded PNG shared with the image loader.
    pub png: Arc<[u8]>,

    /// Where the PNG was written.
    pub output: PathBuf,

    pub tab: ViewTab,

    /// Overlay the jittered samples.
    pub show_points: bool,

    /// Overlay the inner box summary.
    pub show_box: bool,
}

impl ViewerState {
    pub fn new(rendered: Rendered) -> Self {
        Self {
            figure: rendered.figure,
            png: rendered.png.into(),
            output: rendered.output,
            tab: ViewTab::Interactive,
            show_points: true,
            show_box: true,
        }
    }

    /// Cache key for the rendered image.
    pub fn image_uri(&self) -> String {
        format!("bytes://{}", self.output.display())
    }

    /// Group labels paired with their x positions.
    pub fn categories(&self) -> Vec<(f64, String)> {
        self.figure
            .groups
            .iter()
            .map(|g| (g.position, g.label.clone()))
            .collect()
    }
}
