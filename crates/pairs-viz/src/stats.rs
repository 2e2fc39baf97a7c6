//! Small numeric primitives behind the plot content: moments, Pearson
//! correlation, sample autocorrelation and density histograms.

use serde::{Deserialize, Serialize};

pub(crate) fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

pub(crate) fn min_max(x: &[f64]) -> (f64, f64) {
    x.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Empirical Pearson correlation.
///
/// Returns `None` when either series has zero variance (or the lengths differ),
/// where the coefficient is undefined.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = mean(x);
    let my = mean(y);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Default number of ACF lags: `floor(10 * log10(n))`, capped at `n - 1`.
pub fn default_max_lag(n: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let lag = (10.0 * (n as f64).log10()).floor() as usize;
    lag.min(n - 1)
}

/// Sample autocorrelation for lags `0..=max_lag` (biased, `1/n` normalisation).
///
/// A constant series has no autocorrelation to speak of: lag 0 is 1 and the
/// remaining lags are 0.
pub fn autocorrelation(x: &[f64], max_lag: usize) -> Vec<f64> {
    let n = x.len();
    let max_lag = max_lag.min(n.saturating_sub(1));
    let m = mean(x);
    let c0: f64 = x.iter().map(|&v| (v - m) * (v - m)).sum();
    if c0 <= 0.0 || !c0.is_finite() {
        let mut out = vec![0.0; max_lag + 1];
        out[0] = 1.0;
        return out;
    }
    (0..=max_lag)
        .map(|lag| {
            let ck: f64 = (0..n - lag).map(|t| (x[t] - m) * (x[t + lag] - m)).sum();
            ck / c0
        })
        .collect()
}

/// Density-normalised histogram: bar areas sum to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityHistogram {
    /// Bin edges, `bins + 1` entries, increasing.
    pub edges: Vec<f64>,
    /// Density per bin, `count / (n * width)`.
    pub density: Vec<f64>,
}

impl DensityHistogram {
    pub fn max_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }
}

/// Sturges' rule: `ceil(log2(n) + 1)` bins.
pub fn sturges_bins(n: usize) -> usize {
    ((n.max(1) as f64).log2() + 1.0).ceil() as usize
}

/// Equal-width density histogram over the data range.
///
/// A zero-width range is widened to one unit-width bin centred on the value.
pub fn density_histogram(x: &[f64], bins: usize) -> DensityHistogram {
    let bins = bins.max(1);
    let (mut lo, mut hi) = min_max(x);
    let bins = if hi - lo <= 0.0 {
        lo -= 0.5;
        hi += 0.5;
        1
    } else {
        bins
    };
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();

    let mut counts = vec![0usize; bins];
    for &v in x {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let n = x.len() as f64;
    let density = counts.iter().map(|&c| c as f64 / (n * width)).collect();
    DensityHistogram { edges, density }
}
