//! Bivariate-normal confidence ellipses for the asymptotic overlay.
//!
//! The boundary at level `p` is `{ μ + c·L·u : |u| = 1 }` where `L` is the
//! Cholesky factor of the covariance and `c² = χ²₂(p)`. For two degrees of
//! freedom the quantile has the closed form `c² = −2·ln(1 − p)`.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default confidence level of the overlay.
pub const DEFAULT_LEVEL: f64 = 0.95;

/// Default number of polygon vertices.
pub const DEFAULT_POINTS: usize = 100;

/// Closed polygon tracing an ellipse once; `x[0] == x[k-1]`, `y[0] == y[k-1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EllipsePolygon {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl EllipsePolygon {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Radius scale `sqrt(χ²₂(level))`.
pub fn chi2_2df_radius(level: f64) -> Result<f64> {
    if !(level > 0.0 && level < 1.0) {
        return Err(Error::Precondition(format!(
            "confidence level must lie in (0, 1), got {level}"
        )));
    }
    Ok((-2.0 * (1.0 - level).ln()).sqrt())
}

/// Confidence ellipse for correlation `rho`, standard errors `(sx, sy)` and
/// centre `(mx, my)`, sampled at `points` vertices.
///
/// `|rho| = 1` is accepted and collapses the ellipse onto a segment; zero
/// standard errors collapse it likewise. Anything outside those bounds is a
/// precondition violation, never clamped.
pub fn confidence_ellipse(
    rho: f64,
    (sx, sy): (f64, f64),
    (mx, my): (f64, f64),
    points: usize,
    level: f64,
) -> Result<EllipsePolygon> {
    if points < 3 {
        return Err(Error::Precondition(format!(
            "ellipse needs at least 3 points, got {points}"
        )));
    }
    if !rho.is_finite() || rho.abs() > 1.0 {
        return Err(Error::Precondition(format!("correlation {rho} outside [-1, 1]")));
    }
    if !(sx.is_finite() && sy.is_finite()) || sx < 0.0 || sy < 0.0 {
        return Err(Error::Precondition(format!(
            "standard errors must be finite and non-negative, got ({sx}, {sy})"
        )));
    }
    if !(mx.is_finite() && my.is_finite()) {
        return Err(Error::Precondition("ellipse centre is not finite".into()));
    }

    let c = chi2_2df_radius(level)?;
    let l11 = c * sx;
    let l21 = c * sy * rho;
    let l22 = c * sy * (1.0 - rho * rho).max(0.0).sqrt();

    let step = std::f64::consts::TAU / (points - 1) as f64;
    let mut x = Vec::with_capacity(points);
    let mut y = Vec::with_capacity(points);
    for i in 0..points - 1 {
        let (s, co) = (i as f64 * step).sin_cos();
        x.push(mx + l11 * co);
        y.push(my + l21 * co + l22 * s);
    }
    x.push(x[0]);
    y.push(y[0]);
    Ok(EllipsePolygon { x, y })
}
