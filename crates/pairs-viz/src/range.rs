//! Per-parameter plotting intervals shared by a whole row/column of the matrix.

use serde::{Deserialize, Serialize};

use crate::input::AlignedInput;
use crate::stats::min_max;
use crate::{Error, Result};

/// Two-sided 95% normal quantile used for the asymptotic interval.
pub const Z_95: f64 = 1.96;

/// Fraction of the raw span added on each side.
pub const RANGE_MARGIN_FRAC: f64 = 0.15;

/// Closed plotting interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRange {
    pub low: f64,
    pub high: f64,
}

impl PlotRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.low && v <= self.high
    }
}

impl From<[f64; 2]> for PlotRange {
    fn from(r: [f64; 2]) -> Self {
        Self::new(r[0], r[1])
    }
}

/// Where a parameter's range came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSource {
    Computed,
    Supplied,
}

/// Interval covering the draws and `estimate ± 1.96·se`, widened by 15% of
/// its span on each side.
///
/// A zero-width span stays zero-width; callers decide how to draw it.
pub fn resolve_one(draws: &[f64], estimate: f64, se: f64) -> PlotRange {
    let (dmin, dmax) = min_max(draws);
    let low_raw = dmin.min(estimate - Z_95 * se);
    let high_raw = dmax.max(estimate + Z_95 * se);
    let margin = RANGE_MARGIN_FRAC * (high_raw - low_raw);
    PlotRange::new(low_raw - margin, high_raw + margin)
}

/// Resolve ranges for every parameter of an (already subsetted) input.
///
/// Supplied ranges replace the computation wholesale; there is no merging of
/// partial user ranges with computed ones.
pub fn resolve_ranges(
    input: &AlignedInput,
    supplied: Option<&[[f64; 2]]>,
) -> Result<(Vec<PlotRange>, RangeSource)> {
    let n = input.n_params();
    if let Some(ranges) = supplied {
        if ranges.len() != n {
            return Err(Error::Precondition(format!(
                "plot_ranges has {} entries for {n} selected parameters",
                ranges.len()
            )));
        }
        if let Some(i) = ranges.iter().position(|r| !(r[0].is_finite() && r[1].is_finite())) {
            return Err(Error::Precondition(format!("plot range {i} is not finite")));
        }
        if let Some(i) = ranges.iter().position(|r| r[0] > r[1]) {
            return Err(Error::Precondition(format!(
                "plot range {i} is inverted: [{}, {}]",
                ranges[i][0], ranges[i][1]
            )));
        }
        return Ok((ranges.iter().copied().map(PlotRange::from).collect(), RangeSource::Supplied));
    }

    let fit = input.fit();
    let ranges = (0..n)
        .map(|i| resolve_one(input.posterior().column(i), fit.estimates[i], fit.std_errors[i]))
        .collect();
    Ok((ranges, RangeSource::Computed))
}
