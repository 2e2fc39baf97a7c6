//! Posterior draws and asymptotic fit summaries, kept positionally aligned.
//!
//! Column `i` of a [`PosteriorSample`] and entry `i` of an [`AsymptoticFit`]
//! describe the same parameter. Alignment is by position, not by name; an
//! [`AlignedInput`] is the only way to pair the two, and subsetting always
//! re-indexes both sides together.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// MCMC draws stored column-major: one column per parameter, one entry per iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosteriorSample {
    columns: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    names: Option<Vec<String>>,
}

impl PosteriorSample {
    /// Build from per-parameter columns. All columns must have the same length.
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Result<Self> {
        let sample = Self { columns, names: None };
        sample.check()?;
        Ok(sample)
    }

    /// Shape and finiteness checks shared by the constructors and
    /// [`AlignedInput::new`] (a deserialized sample skips the constructors).
    fn check(&self) -> Result<()> {
        let Some(first) = self.columns.first() else {
            return Err(Error::Precondition("posterior sample has no parameters".into()));
        };
        let n_draws = first.len();
        if n_draws < 2 {
            return Err(Error::Precondition(format!(
                "posterior sample needs at least 2 draws, got {n_draws}"
            )));
        }
        for (i, col) in self.columns.iter().enumerate() {
            if col.len() != n_draws {
                return Err(Error::Precondition(format!(
                    "posterior column {i} has {} draws, expected {n_draws}",
                    col.len()
                )));
            }
            if let Some(pos) = col.iter().position(|v| !v.is_finite()) {
                return Err(Error::Precondition(format!(
                    "posterior column {i} has a non-finite draw at iteration {pos}"
                )));
            }
        }
        if let Some(names) = &self.names {
            if names.len() != self.columns.len() {
                return Err(Error::Precondition(format!(
                    "posterior has {} columns but {} names",
                    self.columns.len(),
                    names.len()
                )));
            }
        }
        Ok(())
    }

    /// Build from row-major draws (one row per MCMC iteration).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_params = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut columns = vec![Vec::with_capacity(rows.len()); n_params];
        for (it, row) in rows.iter().enumerate() {
            if row.len() != n_params {
                return Err(Error::Precondition(format!(
                    "posterior row {it} has {} values, expected {n_params}",
                    row.len()
                )));
            }
            for (col, &v) in columns.iter_mut().zip(row) {
                col.push(v);
            }
        }
        Self::from_columns(columns)
    }

    /// Attach column names (used only by the optional name check).
    pub fn with_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.columns.len() {
            return Err(Error::Precondition(format!(
                "posterior has {} columns but {} names",
                self.columns.len(),
                names.len()
            )));
        }
        self.names = Some(names);
        Ok(self)
    }

    pub fn n_params(&self) -> usize {
        self.columns.len()
    }

    pub fn n_draws(&self) -> usize {
        self.columns[0].len()
    }

    pub fn column(&self, i: usize) -> &[f64] {
        &self.columns[i]
    }

    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }
}

/// Maximum-likelihood summary: estimates, standard errors and correlations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsymptoticFit {
    pub names: Vec<String>,
    pub estimates: Vec<f64>,
    pub std_errors: Vec<f64>,
    /// Square correlation matrix, row-major `[i][j]`.
    pub corr: Vec<Vec<f64>>,
}

impl AsymptoticFit {
    /// Validate shapes and standard errors.
    ///
    /// Correlation values are range-checked later, on the subset that is
    /// actually plotted.
    pub fn new(
        names: Vec<String>,
        estimates: Vec<f64>,
        std_errors: Vec<f64>,
        corr: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let fit = Self { names, estimates, std_errors, corr };
        fit.check()?;
        Ok(fit)
    }

    /// Every vector has one entry per name and `corr` is square. The fields
    /// are public, so [`AlignedInput::new`] runs this again.
    fn check(&self) -> Result<()> {
        let n = self.names.len();
        if self.estimates.len() != n || self.std_errors.len() != n {
            return Err(Error::Precondition(format!(
                "fit length mismatch: names={} estimates={} std_errors={}",
                n,
                self.estimates.len(),
                self.std_errors.len()
            )));
        }
        if self.corr.len() != n || self.corr.iter().any(|row| row.len() != n) {
            return Err(Error::Precondition(format!(
                "correlation matrix must be {n}x{n}"
            )));
        }
        if let Some(i) = self.estimates.iter().position(|v| !v.is_finite()) {
            return Err(Error::Precondition(format!("estimate {i} is not finite")));
        }
        if let Some(i) = self.std_errors.iter().position(|s| !s.is_finite() || *s < 0.0) {
            return Err(Error::Precondition(format!(
                "standard error {i} must be finite and non-negative, got {}",
                self.std_errors[i]
            )));
        }
        Ok(())
    }

    /// Build from a flat row-major covariance matrix.
    ///
    /// Pairs with a zero or non-finite variance get correlation 0 off the
    /// diagonal.
    pub fn from_covariance(names: Vec<String>, estimates: Vec<f64>, cov: &[f64]) -> Result<Self> {
        let n = names.len();
        if cov.len() != n * n {
            return Err(Error::Precondition(format!(
                "covariance length mismatch: got={} expected={}",
                cov.len(),
                n * n
            )));
        }
        let std_errors: Vec<f64> = (0..n).map(|i| cov[i * n + i].max(0.0).sqrt()).collect();
        let mut corr = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                let cij = cov[i * n + j];
                let (si, sj) = (std_errors[i], std_errors[j]);
                corr[i][j] = if i == j {
                    1.0
                } else if si > 0.0 && sj > 0.0 && cij.is_finite() {
                    cij / (si * sj)
                } else {
                    0.0
                };
            }
        }
        Self::new(names, estimates, std_errors, corr)
    }

    pub fn n_params(&self) -> usize {
        self.names.len()
    }
}

/// A posterior sample and a fit summary that are known to line up.
#[derive(Debug, Clone)]
pub struct AlignedInput {
    posterior: PosteriorSample,
    fit: AsymptoticFit,
}

impl AlignedInput {
    /// Pair a posterior with a fit. Parameter counts must match.
    ///
    /// With `check_names`, a posterior that carries column names must list
    /// them in the fit's order.
    pub fn new(posterior: PosteriorSample, fit: AsymptoticFit, check_names: bool) -> Result<Self> {
        posterior.check()?;
        fit.check()?;
        if posterior.n_params() != fit.n_params() {
            return Err(Error::Precondition(format!(
                "posterior/fit parameter count mismatch: posterior={} fit={}",
                posterior.n_params(),
                fit.n_params()
            )));
        }
        if check_names {
            if let Some(names) = posterior.names() {
                if let Some(i) = names.iter().zip(&fit.names).position(|(a, b)| a != b) {
                    return Err(Error::Precondition(format!(
                        "posterior column {i} is '{}' but fit parameter {i} is '{}'",
                        names[i], fit.names[i]
                    )));
                }
            }
        }
        Ok(Self { posterior, fit })
    }

    /// Re-index posterior columns and fit entries together.
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        let n = self.fit.n_params();
        if let Some(&bad) = indices.iter().find(|&&i| i >= n) {
            return Err(Error::Precondition(format!(
                "parameter index {bad} out of range for {n} parameters"
            )));
        }

        let columns = indices.iter().map(|&i| self.posterior.columns[i].clone()).collect();
        let names = self
            .posterior
            .names
            .as_ref()
            .map(|names| indices.iter().map(|&i| names[i].clone()).collect());
        let posterior = PosteriorSample { columns, names };

        let fit = AsymptoticFit {
            names: indices.iter().map(|&i| self.fit.names[i].clone()).collect(),
            estimates: indices.iter().map(|&i| self.fit.estimates[i]).collect(),
            std_errors: indices.iter().map(|&i| self.fit.std_errors[i]).collect(),
            corr: indices
                .iter()
                .map(|&i| indices.iter().map(|&j| self.fit.corr[i][j]).collect())
                .collect(),
        };
        Ok(Self { posterior, fit })
    }

    pub fn posterior(&self) -> &PosteriorSample {
        &self.posterior
    }

    pub fn fit(&self) -> &AsymptoticFit {
        &self.fit
    }

    pub fn n_params(&self) -> usize {
        self.fit.n_params()
    }
}
