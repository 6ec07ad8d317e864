//! Data-space layout of the violin chart.
//!
//! Everything here is expressed in chart coordinates (category index on the
//! x axis, sample value on the y axis) so that the PNG writer and the
//! interactive viewer draw exactly the same figure.

use palette::Srgb;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use super::PlotError;
use crate::color::pastel_palette;
use crate::config::PlotConfig;
use crate::data::model::LabeledTable;
use crate::data::stats::{GaussianKde, SummaryStats};

/// Offset of the `n=` annotation above a group's maximum.
pub const COUNT_LABEL_OFFSET: f64 = 0.01;
/// Offset of the `mean=` annotation below a group's minimum.
pub const MEAN_LABEL_OFFSET: f64 = 0.03;
/// Whiskers reach the most extreme sample within this many IQRs of the box.
const WHISKER_IQR: f64 = 1.5;
/// Fraction of the y span added above and below the content.
const Y_MARGIN: f64 = 0.08;

/// Shape of one violin.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolinBody {
    /// `(y, half_width)` pairs in ascending `y`.
    Density(Vec<(f64, f64)>),
    /// No spread to estimate: a flat line at this value.
    Flat(f64),
}

/// Boxplot-like inner summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

/// Everything needed to draw one group.
#[derive(Debug, Clone)]
pub struct GroupGeometry {
    pub label: String,
    /// Category position on the x axis.
    pub position: f64,
    pub stats: SummaryStats,
    pub body: ViolinBody,
    pub box_summary: BoxSummary,
    /// Jittered `(x, y)` sample positions.
    pub points: Vec<(f64, f64)>,
    pub fill: Srgb<u8>,
}

impl GroupGeometry {
    /// Closed outline of the violin, left edge bottom-up then right edge
    /// top-down. Empty for a flat body.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        match &self.body {
            ViolinBody::Density(curve) => curve
                .iter()
                .map(|&(y, w)| (self.position - w, y))
                .chain(curve.iter().rev().map(|&(y, w)| (self.position + w, y)))
                .collect(),
            ViolinBody::Flat(_) => Vec::new(),
        }
    }

    /// Text and anchor of the `n=` annotation.
    pub fn count_label(&self) -> (String, (f64, f64)) {
        (
            format!("n={}", self.stats.count),
            (self.position, self.stats.max + COUNT_LABEL_OFFSET),
        )
    }

    /// Text and anchor of the `mean=` annotation.
    pub fn mean_label(&self) -> (String, (f64, f64)) {
        (
            format!("mean={:.4}", self.stats.mean),
            (self.position, self.stats.min - MEAN_LABEL_OFFSET),
        )
    }
}

/// The complete chart in data coordinates.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub y_label: String,
    pub groups: Vec<GroupGeometry>,
    /// Visible y range.
    pub y_range: (f64, f64),
    /// Half the configured violin width.
    pub half_width: f64,
}

impl Figure {
    /// Visible x range: half a category either side of the outer groups.
    pub fn x_range(&self) -> (f64, f64) {
        (-0.5, self.groups.len() as f64 - 0.5)
    }

    /// Category label at `x`, if `x` is a group position.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| (g.position - x).abs() < 1e-6)
            .map(|g| g.label.as_str())
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Lay out every group of `table`.
pub fn layout(table: &LabeledTable, config: &PlotConfig) -> Result<Figure, PlotError> {
    let palette = pastel_palette(table.labels.len());
    let mut rng = Pcg64::seed_from_u64(config.seed);
    let half_width = config.violin_width / 2.0;

    // Raw densities first; widths are scaled against the densest violin.
    let mut pending = Vec::with_capacity(table.labels.len());
    for (index, (label, values)) in table.groups().enumerate() {
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(PlotError::InvalidData(format!(
                "group '{label}' contains the non-finite value {bad}"
            )));
        }
        let stats = SummaryStats::from_samples(&values)
            .ok_or_else(|| PlotError::InvalidData(format!("group '{label}' has no samples")))?;
        let density = GaussianKde::new(&values).map(|kde| {
            log::debug!("{label}: KDE bandwidth {:.6}", kde.bandwidth());
            kde.evaluate(config.cut, config.grid_size)
        });
        let position = index as f64;
        let points: Vec<(f64, f64)> = values
            .iter()
            .map(|&v| (position + rng.random_range(-config.jitter..=config.jitter), v))
            .collect();

        pending.push((label.to_string(), position, stats, density, points));
    }

    let peak = pending
        .iter()
        .filter_map(|(.., density, _)| density.as_ref())
        .flat_map(|curve| curve.iter().map(|&(_, d)| d))
        .fold(0.0, f64::max);

    let groups: Vec<GroupGeometry> = pending
        .into_iter()
        .zip(palette)
        .map(|((label, position, stats, density, points), fill)| {
            let body = match density {
                Some(curve) if peak > 0.0 => ViolinBody::Density(
                    curve
                        .into_iter()
                        .map(|(y, d)| (y, d / peak * half_width))
                        .collect(),
                ),
                _ => ViolinBody::Flat(stats.mean),
            };
            let box_summary = box_summary(&points, &stats);
            GroupGeometry {
                label,
                position,
                stats,
                body,
                box_summary,
                points,
                fill,
            }
        })
        .collect();

    let y_range = y_range(&groups);
    if !(y_range.0.is_finite() && y_range.1.is_finite()) {
        return Err(PlotError::InvalidData(format!(
            "y range {:?} is not finite",
            y_range
        )));
    }
    log::debug!("y range {:.4}..{:.4}", y_range.0, y_range.1);

    Ok(Figure {
        title: config.title(),
        y_label: config.y_label.clone(),
        groups,
        y_range,
        half_width,
    })
}

fn box_summary(points: &[(f64, f64)], stats: &SummaryStats) -> BoxSummary {
    let reach = WHISKER_IQR * stats.iqr();
    let low_fence = stats.q1 - reach;
    let high_fence = stats.q3 + reach;
    let values = || points.iter().map(|&(_, y)| y);

    BoxSummary {
        lower_whisker: values().filter(|&y| y >= low_fence).fold(stats.q1, f64::min),
        q1: stats.q1,
        median: stats.median,
        q3: stats.q3,
        upper_whisker: values().filter(|&y| y <= high_fence).fold(stats.q3, f64::max),
    }
}

fn y_range(groups: &[GroupGeometry]) -> (f64, f64) {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for group in groups {
        let (body_lo, body_hi) = match &group.body {
            ViolinBody::Density(curve) => (
                curve.first().map_or(group.stats.min, |p| p.0),
                curve.last().map_or(group.stats.max, |p| p.0),
            ),
            ViolinBody::Flat(v) => (*v, *v),
        };
        lo = lo.min(body_lo).min(group.stats.min - MEAN_LABEL_OFFSET);
        hi = hi.max(body_hi).max(group.stats.max + COUNT_LABEL_OFFSET);
    }
    let margin = ((hi - lo) * Y_MARGIN).max(f64::EPSILON);
    (lo - margin, hi + margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{COMPOSITECORE, MINICORE};

    fn table(first: &[f64], second: &[f64]) -> LabeledTable {
        LabeledTable::from_groups((MINICORE, first), (COMPOSITECORE, second))
    }

    #[test]
    fn groups_sit_on_consecutive_positions() {
        let figure = layout(&table(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), &PlotConfig::default()).unwrap();

        assert_eq!(figure.groups.len(), 2);
        assert_eq!(figure.groups[0].position, 0.0);
        assert_eq!(figure.groups[1].position, 1.0);
        assert_eq!(figure.x_range(), (-0.5, 1.5));
        assert_eq!(figure.label_at(1.0), Some(COMPOSITECORE));
        assert_eq!(figure.label_at(0.5), None);
    }

    #[test]
    fn annotations_follow_statistics() {
        let figure = layout(&table(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), &PlotConfig::default()).unwrap();
        let first = &figure.groups[0];

        let (count, count_at) = first.count_label();
        let (mean, mean_at) = first.mean_label();

        assert_eq!(count, "n=3");
        assert_eq!(count_at, (0.0, 3.0 + COUNT_LABEL_OFFSET));
        assert_eq!(mean, "mean=2.0000");
        assert_eq!(mean_at, (0.0, 1.0 - 0.03));
    }

    #[test]
    fn densest_violin_spans_configured_width() {
        let config = PlotConfig::default();
        let figure = layout(&table(&[1.0, 2.0, 3.0], &[4.0, 4.5, 9.0, 12.0]), &config).unwrap();

        let widest = figure
            .groups
            .iter()
            .filter_map(|g| match &g.body {
                ViolinBody::Density(curve) => curve.iter().map(|p| p.1).reduce(f64::max),
                ViolinBody::Flat(_) => None,
            })
            .fold(0.0, f64::max);

        assert!((widest - config.violin_width / 2.0).abs() < 1e-12);
    }

    #[test]
    fn jitter_stays_within_configured_band() {
        let config = PlotConfig::default();
        let figure = layout(&table(&[1.0; 50], &[2.0, 3.0]), &config).unwrap();

        for group in &figure.groups {
            for &(x, _) in &group.points {
                assert!((x - group.position).abs() <= config.jitter);
            }
        }
    }

    #[test]
    fn jitter_is_reproducible_for_a_seed() {
        let t = table(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        let a = layout(&t, &PlotConfig::default()).unwrap();
        let b = layout(&t, &PlotConfig::default()).unwrap();

        assert_eq!(a.groups[0].points, b.groups[0].points);
    }

    #[test]
    fn constant_group_is_flat() {
        let figure = layout(&table(&[2.0, 2.0], &[1.0, 5.0, 6.0]), &PlotConfig::default()).unwrap();

        assert_eq!(figure.groups[0].body, ViolinBody::Flat(2.0));
        assert!(figure.groups[0].outline().is_empty());
        assert!(!figure.groups[1].outline().is_empty());
    }

    #[test]
    fn empty_group_is_rejected() {
        let err = layout(&table(&[], &[1.0, 2.0]), &PlotConfig::default()).unwrap_err();

        assert!(matches!(err, PlotError::InvalidData(_)));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = layout(&table(&[1.0, bad, 3.0], &[4.0, 5.0, 6.0]), &PlotConfig::default())
                .unwrap_err();

            assert!(matches!(err, PlotError::InvalidData(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn huge_values_that_overflow_the_range_are_rejected() {
        let err = layout(&table(&[-f64::MAX, f64::MAX], &[1.0, 2.0]), &PlotConfig::default())
            .unwrap_err();

        assert!(matches!(err, PlotError::InvalidData(_)));
    }

    #[test]
    fn whiskers_exclude_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let figure = layout(&table(&values, &[1.0, 2.0]), &PlotConfig::default()).unwrap();
        let summary = figure.groups[0].box_summary;

        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 5.0);
        assert!(summary.q1 <= summary.median && summary.median <= summary.q3);
    }

    #[test]
    fn y_range_covers_violins_and_annotations() {
        let figure = layout(&table(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), &PlotConfig::default()).unwrap();
        let (lo, hi) = figure.y_range;

        for group in &figure.groups {
            let (_, (_, mean_y)) = group.mean_label();
            let (_, (_, count_y)) = group.count_label();
            assert!(lo < mean_y);
            assert!(hi > count_y);
            for (_, y) in group.outline() {
                assert!(lo < y && y < hi);
            }
        }
    }
}
