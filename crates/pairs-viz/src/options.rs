//! Data-side options for building a pairs artifact.

use serde::Deserialize;

use crate::diagonal::{DiagonalMode, DEFAULT_HEADROOM};
use crate::ellipse::{DEFAULT_LEVEL, DEFAULT_POINTS};

/// Sample size at which scatter points switch to minimal marks.
pub const DEFAULT_DENSE_THRESHOLD: usize = 5000;

/// Options consumed by [`crate::pairs::pairs_artifact`].
///
/// Per-parameter vectors (`histogram_headroom`, `plot_ranges`) are indexed
/// over the selected parameters, after `parameter_subset` is applied.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PairsOptions {
    pub diagonal_mode: DiagonalMode,
    pub acf_y_range: [f64; 2],
    /// Largest ACF lag; `None` uses `floor(10·log10(N))`.
    pub acf_max_lag: Option<usize>,
    /// One multiplier per selected parameter; `None` uses 1.3 everywhere.
    pub histogram_headroom: Option<Vec<f64>>,
    /// Histogram bin count; `None` uses Sturges' rule.
    pub histogram_bins: Option<usize>,
    /// Ordered parameter indices; `None` selects all.
    pub parameter_subset: Option<Vec<usize>>,
    /// Explicit `[low, high]` per selected parameter, used verbatim.
    pub plot_ranges: Option<Vec<[f64; 2]>>,
    pub ellipse_points: usize,
    pub ellipse_level: f64,
    pub dense_threshold: usize,
    /// Require posterior column names (when present) to match the fit.
    pub check_names: bool,
}

impl Default for PairsOptions {
    fn default() -> Self {
        Self {
            diagonal_mode: DiagonalMode::Autocorrelation,
            acf_y_range: [-1.0, 1.0],
            acf_max_lag: None,
            histogram_headroom: None,
            histogram_bins: None,
            parameter_subset: None,
            plot_ranges: None,
            ellipse_points: DEFAULT_POINTS,
            ellipse_level: DEFAULT_LEVEL,
            dense_threshold: DEFAULT_DENSE_THRESHOLD,
            check_names: false,
        }
    }
}

impl PairsOptions {
    pub fn with_mode(mut self, mode: DiagonalMode) -> Self {
        self.diagonal_mode = mode;
        self
    }

    pub fn with_subset(mut self, indices: Vec<usize>) -> Self {
        self.parameter_subset = Some(indices);
        self
    }

    pub fn with_ranges(mut self, ranges: Vec<[f64; 2]>) -> Self {
        self.plot_ranges = Some(ranges);
        self
    }

    /// Headroom for selected parameter `i`.
    pub(crate) fn headroom(&self, i: usize) -> f64 {
        self.histogram_headroom
            .as_ref()
            .and_then(|h| h.get(i).copied())
            .unwrap_or(DEFAULT_HEADROOM)
    }
}
