//! Diagonal diagnostics: one view per parameter, chosen once per figure.

use serde::{Deserialize, Serialize};

use crate::range::PlotRange;
use crate::stats::{self, DensityHistogram};

/// Diagnostic drawn on every diagonal cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalMode {
    #[default]
    Autocorrelation,
    Histogram,
    Trace,
}

impl DiagonalMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "autocorrelation" | "acf" => Some(Self::Autocorrelation),
            "histogram" | "hist" => Some(Self::Histogram),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }
}

/// Default histogram y-headroom multiplier.
pub const DEFAULT_HEADROOM: f64 = 1.3;

/// Plot content of one diagonal cell.
///
/// Every variant only reads its own parameter's column; x/y ranges here never
/// feed back into the shared per-parameter ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DiagonalPanel {
    Histogram {
        hist: DensityHistogram,
        x_range: PlotRange,
        y_range: PlotRange,
    },
    Autocorrelation {
        /// ACF at lags `0..acf.len()`.
        acf: Vec<f64>,
        y_range: PlotRange,
    },
    /// Draws in iteration order; the values live in the artifact's columns.
    Trace { x_range: PlotRange, y_range: PlotRange },
}

/// Per-figure settings for [`diagonal_panel`].
#[derive(Debug, Clone, Copy)]
pub struct DiagonalSpec {
    pub mode: DiagonalMode,
    pub acf_y_range: PlotRange,
    pub acf_max_lag: Option<usize>,
    pub histogram_bins: Option<usize>,
}

/// Compute the diagonal view for one parameter.
///
/// `range` is the parameter's resolved plotting range and `headroom` its
/// histogram multiplier. A degenerate range falls back to the data extent for
/// the histogram x-axis.
pub fn diagonal_panel(
    spec: &DiagonalSpec,
    draws: &[f64],
    range: PlotRange,
    headroom: f64,
) -> DiagonalPanel {
    match spec.mode {
        DiagonalMode::Histogram => {
            let bins = spec.histogram_bins.unwrap_or_else(|| stats::sturges_bins(draws.len()));
            let hist = stats::density_histogram(draws, bins);
            let x_range = if range.is_degenerate() {
                PlotRange::new(hist.edges[0], hist.edges[hist.edges.len() - 1])
            } else {
                range
            };
            let y_range = PlotRange::new(0.0, headroom * hist.max_density());
            DiagonalPanel::Histogram { hist, x_range, y_range }
        }
        DiagonalMode::Autocorrelation => {
            let max_lag = spec.acf_max_lag.unwrap_or_else(|| stats::default_max_lag(draws.len()));
            let acf = stats::autocorrelation(draws, max_lag);
            DiagonalPanel::Autocorrelation { acf, y_range: spec.acf_y_range }
        }
        DiagonalMode::Trace => DiagonalPanel::Trace {
            x_range: PlotRange::new(1.0, draws.len() as f64),
            y_range: range,
        },
    }
}

impl DiagonalPanel {
    pub fn mode(&self) -> DiagonalMode {
        match self {
            DiagonalPanel::Histogram { .. } => DiagonalMode::Histogram,
            DiagonalPanel::Autocorrelation { .. } => DiagonalMode::Autocorrelation,
            DiagonalPanel::Trace { .. } => DiagonalMode::Trace,
        }
    }
}
