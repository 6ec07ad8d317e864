use serde::Serialize;

// ---------------------------------------------------------------------------
// SummaryStats – per-group descriptive statistics
// ---------------------------------------------------------------------------

/// Descriptive statistics of one group of samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Sample standard deviation (`n - 1` denominator); zero for one sample.
    pub std_dev: f64,
}

impl SummaryStats {
    /// Compute statistics for `samples`. Returns `None` when empty.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let count = sorted.len();
        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std_dev = if count > 1 {
            (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        Some(SummaryStats {
            count,
            mean,
            min,
            max,
            median: percentile(&sorted, 50.0),
            q1: percentile(&sorted, 25.0),
            q3: percentile(&sorted, 75.0),
            std_dev,
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear-interpolated percentile (`p` in 0..=100) of ascending values.
///
/// Matches the default method of NumPy's `percentile`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(sorted.is_sorted_by(|a, b| a.total_cmp(b).is_le()));
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        len => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (len - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

// ---------------------------------------------------------------------------
// Gaussian kernel density estimate
// ---------------------------------------------------------------------------

/// Gaussian KDE with Scott's rule bandwidth.
#[derive(Debug, Clone)]
pub struct GaussianKde<'a> {
    samples: &'a [f64],
    bandwidth: f64,
}

impl<'a> GaussianKde<'a> {
    /// Build an estimator. Returns `None` when fewer than two samples are
    /// given or the samples have zero spread.
    pub fn new(samples: &'a [f64]) -> Option<Self> {
        let stats = SummaryStats::from_samples(samples)?;
        if stats.count < 2 || stats.std_dev <= 0.0 || !stats.std_dev.is_finite() {
            return None;
        }
        let scott = (stats.count as f64).powf(-1.0 / 5.0);
        Some(Self {
            samples,
            bandwidth: scott * stats.std_dev,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `y`.
    pub fn density(&self, y: f64) -> f64 {
        let norm = self.samples.len() as f64 * self.bandwidth * (2.0 * std::f64::consts::PI).sqrt();
        self.samples
            .iter()
            .map(|&x| {
                let z = (y - x) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            / norm
    }

    /// Evaluate on `grid_size` evenly spaced points from `min - cut·bw` to
    /// `max + cut·bw`. Returns `(y, density)` pairs in ascending `y`.
    pub fn evaluate(&self, cut: f64, grid_size: usize) -> Vec<(f64, f64)> {
        let (min, max) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let lo = min - cut * self.bandwidth;
        let hi = max + cut * self.bandwidth;
        let steps = grid_size.max(2) - 1;

        (0..=steps)
            .map(|i| {
                let y = lo + (hi - lo) * i as f64 / steps as f64;
                (y, self.density(y))
            })
            .collect()
    }
}
