use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::{COMPOSITECORE, MINICORE};

// ---------------------------------------------------------------------------
// Plot configuration
// ---------------------------------------------------------------------------

/// Highest accepted output resolution.
pub const MAX_DPI: u32 = 2400;
/// Longest accepted figure side, in inches.
pub const MAX_FIGURE_INCHES: f64 = 100.0;

/// Everything that shapes the rendered figure.
///
/// Loaded from an optional JSON file; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Label of the first input file.
    pub first_label: String,
    /// Label of the second input file.
    pub second_label: String,
    /// Chart title. Derived from the labels when absent.
    pub title: Option<String>,
    pub y_label: String,
    /// Figure size in inches (width, height).
    pub figure_size: (f64, f64),
    pub dpi: u32,
    /// Full width of the widest violin, in category units.
    pub violin_width: f64,
    /// How far past the data the density extends, in bandwidths.
    pub cut: f64,
    /// Number of density evaluation points per violin.
    pub grid_size: usize,
    /// Half-range of the horizontal jitter, in category units.
    pub jitter: f64,
    pub seed: u64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            first_label: MINICORE.to_string(),
            second_label: COMPOSITECORE.to_string(),
            title: None,
            y_label: "Value".to_string(),
            figure_size: (10.0, 6.0),
            dpi: 300,
            violin_width: 0.8,
            cut: 2.0,
            grid_size: 100,
            jitter: 0.1,
            seed: 0,
        }
    }
}

impl PlotConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file '{}'", path.display()))?;
        let config: PlotConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot produce a sensible chart.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (1..=MAX_DPI).contains(&self.dpi),
            "dpi must be between 1 and {MAX_DPI}, got {}",
            self.dpi
        );
        let (width, height) = self.figure_size;
        anyhow::ensure!(
            [width, height]
                .iter()
                .all(|side| *side > 0.0 && *side <= MAX_FIGURE_INCHES),
            "figure_size sides must be in (0, {MAX_FIGURE_INCHES}] inches, got {:?}",
            self.figure_size
        );
        anyhow::ensure!(
            !self.first_label.trim().is_empty() && !self.second_label.trim().is_empty(),
            "group labels must not be empty"
        );
        anyhow::ensure!(
            self.first_label != self.second_label,
            "first_label and second_label must differ, both are '{}'",
            self.first_label
        );
        anyhow::ensure!(self.grid_size >= 2, "grid_size must be at least 2");
        anyhow::ensure!(
            self.violin_width > 0.0 && self.violin_width <= 1.0,
            "violin_width must be in (0, 1]"
        );
        anyhow::ensure!(self.jitter >= 0.0, "jitter must not be negative");
        Ok(())
    }

    /// The title shown above the chart.
    pub fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| {
            format!(
                "Distribution Comparison: {} vs {}",
                self.first_label, self.second_label
            )
        })
    }

    /// Canvas size in pixels at the configured DPI.
    pub fn canvas_pixels(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.figure_size.0 * dpi).round() as u32,
            (self.figure_size.1 * dpi).round() as u32,
        )
    }

    /// Convert a typographic size in points to pixels.
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_title_names_both_groups() {
        assert_eq!(
            PlotConfig::default().title(),
            "Distribution Comparison: Minicore vs Compositecore"
        );
    }

    #[test]
    fn default_canvas_is_ten_by_six_inches_at_300_dpi() {
        assert_eq!(PlotConfig::default().canvas_pixels(), (3000, 1800));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(&path, r#"{ "dpi": 150, "title": "Runs" }"#).unwrap();

        let config = PlotConfig::load(&path).unwrap();

        assert_eq!(config.dpi, 150);
        assert_eq!(config.title(), "Runs");
        assert_eq!(config.first_label, MINICORE);
        assert_eq!(config.canvas_pixels(), (1500, 900));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(&path, r#"{ "colour": "red" }"#).unwrap();

        assert!(PlotConfig::load(&path).is_err());
    }

    #[test]
    fn zero_dpi_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(&path, r#"{ "dpi": 0 }"#).unwrap();

        let err = PlotConfig::load(&path).unwrap_err();

        assert!(err.to_string().contains("dpi"));
    }

    fn load_str(json: &str) -> Result<PlotConfig> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(&path, json).unwrap();
        PlotConfig::load(&path)
    }

    #[test]
    fn dpi_above_limit_is_rejected() {
        assert!(load_str(r#"{ "dpi": 2400 }"#).is_ok());
        assert!(load_str(r#"{ "dpi": 2401 }"#).is_err());
    }

    #[test]
    fn oversized_figure_is_rejected() {
        let err = load_str(r#"{ "figure_size": [10.0, 1e9] }"#).unwrap_err();

        assert!(err.to_string().contains("figure_size"));
    }

    #[test]
    fn equal_labels_are_rejected() {
        let err = load_str(r#"{ "first_label": "Run", "second_label": "Run" }"#).unwrap_err();

        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn blank_label_is_rejected() {
        assert!(load_str(r#"{ "second_label": "  " }"#).is_err());
    }
}
