//! Pairs-matrix artifact (numbers-first).
//!
//! [`pairs_artifact`] validates every precondition before producing anything,
//! resolves the shared per-parameter ranges, then visits the n² grid cells
//! once and records what each cell must show. Rendering only reads the
//! artifact.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::diagonal::{diagonal_panel, DiagonalMode, DiagonalPanel, DiagonalSpec};
use crate::ellipse::{confidence_ellipse, EllipsePolygon};
use crate::grid::{grid_cells, BorderAxes, CellKind, GridCell};
use crate::input::{AlignedInput, AsymptoticFit, PosteriorSample};
use crate::options::PairsOptions;
use crate::range::{resolve_ranges, PlotRange, RangeSource};
use crate::stats::pearson;
use crate::{Error, Result};

pub const SCHEMA_VERSION: &str = "mcmc_pairs_v0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairsArtifact {
    pub schema_version: String,
    pub meta: PairsMeta,
    pub parameter_names: Vec<String>,
    pub estimates: Vec<f64>,
    pub std_errors: Vec<f64>,
    pub ranges: Vec<PlotRange>,
    pub range_source: RangeSource,
    pub diagonal_mode: DiagonalMode,
    /// Selected posterior columns, in plotting order.
    pub draws: Vec<Vec<f64>>,
    /// Row-major, `n * n` entries.
    pub cells: Vec<PairsCell>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PairsWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairsMeta {
    pub tool: String,
    pub tool_version: String,
    pub created_unix_ms: u128,
    pub n_draws: usize,
    /// Indices into the caller's parameter list.
    pub parameter_indices: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairsCell {
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub border: BorderAxes,
    pub content: CellContent,
}

/// How scatter points are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterMark {
    Point,
    /// Minimal single-pixel marks for dense samples.
    Dot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellContent {
    Diagonal {
        param: usize,
        label: String,
        panel: DiagonalPanel,
    },
    Scatter {
        /// Parameter on the x-axis (the cell's column).
        x_param: usize,
        /// Parameter on the y-axis (the cell's row).
        y_param: usize,
        mark: ScatterMark,
        mle: (f64, f64),
        ellipse: EllipsePolygon,
    },
    CorrelationLabel {
        /// Rounded to 2 decimals; `None` when a column has zero variance.
        r: Option<f64>,
        text: String,
        /// Relative text size, `0.5·(3·|r| + 0.25)`.
        size: f64,
    },
}

impl CellContent {
    pub fn kind(&self) -> CellKind {
        match self {
            CellContent::Diagonal { .. } => CellKind::Diagonal,
            CellContent::Scatter { .. } => CellKind::Lower,
            CellContent::CorrelationLabel { .. } => CellKind::Upper,
        }
    }
}

/// Non-fatal input conditions handled with a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairsWarning {
    /// The range has no width: constant draws with zero standard error, or a
    /// supplied `[v, v]`.
    ZeroWidthRange { param: usize, name: String },
    /// Enough draws that scatter points are drawn as minimal marks.
    DenseScatter { n_draws: usize, threshold: usize },
}

/// Relative size of an upper-triangle correlation label.
///
/// Strictly increasing in `|r|` and even in `r`.
pub fn correlation_label_size(r: f64) -> f64 {
    0.5 * (3.0 * r.abs() + 0.25)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Rounded correlation of two posterior columns, with its label text and size.
pub fn correlation_label(x: &[f64], y: &[f64]) -> (Option<f64>, String, f64) {
    match pearson(x, y) {
        Some(r) => {
            let r = round2(r);
            // Avoid "-0.00".
            let r = if r == 0.0 { 0.0 } else { r };
            (Some(r), format!("{r:.2}"), correlation_label_size(r))
        }
        None => (None, "NA".to_string(), correlation_label_size(0.0)),
    }
}

fn now_unix_ms() -> Result<u128> {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::Computation(format!("system time error: {}", e)))?;
    Ok(d.as_millis())
}

/// Check every precondition and return the aligned, subsetted input.
///
/// Nothing is computed for plotting until this succeeds.
pub fn validate(
    posterior: &PosteriorSample,
    fit: &AsymptoticFit,
    options: &PairsOptions,
) -> Result<(AlignedInput, Vec<usize>)> {
    let aligned = AlignedInput::new(posterior.clone(), fit.clone(), options.check_names)?;
    let indices: Vec<usize> = match &options.parameter_subset {
        Some(idx) => idx.clone(),
        None => (0..aligned.n_params()).collect(),
    };
    let selected = aligned.subset(&indices)?;
    let n = selected.n_params();

    if n < 2 {
        return Err(Error::Precondition(format!(
            "pairs plot is meaningful only for >1 parameter (got {n})"
        )));
    }

    let corr = &selected.fit().corr;
    for (i, row) in corr.iter().enumerate() {
        for (j, &c) in row.iter().enumerate() {
            if !c.is_finite() || c.abs() > 1.0 {
                return Err(Error::Precondition(format!(
                    "correlation [{i}][{j}] = {c} outside [-1, 1]"
                )));
            }
        }
    }

    if let Some(h) = &options.histogram_headroom {
        if h.len() != n {
            return Err(Error::Precondition(format!(
                "histogram_headroom has {} entries for {n} selected parameters",
                h.len()
            )));
        }
        if let Some(i) = h.iter().position(|v| !v.is_finite() || *v <= 0.0) {
            return Err(Error::Precondition(format!(
                "histogram_headroom[{i}] must be positive"
            )));
        }
    }
    let [lo, hi] = options.acf_y_range;
    if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
        return Err(Error::Precondition(format!("acf_y_range [{lo}, {hi}] is not increasing")));
    }
    if options.ellipse_points < 3 {
        return Err(Error::Precondition(format!(
            "ellipse_points must be at least 3, got {}",
            options.ellipse_points
        )));
    }
    if !(options.ellipse_level > 0.0 && options.ellipse_level < 1.0) {
        return Err(Error::Precondition(format!(
            "ellipse_level must lie in (0, 1), got {}",
            options.ellipse_level
        )));
    }

    Ok((selected, indices))
}

/// Build the pairs artifact for `posterior` against `fit`.
pub fn pairs_artifact(
    posterior: &PosteriorSample,
    fit: &AsymptoticFit,
    options: &PairsOptions,
) -> Result<PairsArtifact> {
    let (input, indices) = validate(posterior, fit, options)?;
    let n = input.n_params();
    let post = input.posterior();
    let fit = input.fit();

    let (ranges, range_source) = resolve_ranges(&input, options.plot_ranges.as_deref())?;

    let mut warnings = Vec::new();
    for (i, r) in ranges.iter().enumerate() {
        if r.is_degenerate() {
            log::warn!(
                "pairs: parameter '{}' has a zero-width plotting range at {}",
                fit.names[i],
                r.low
            );
            warnings.push(PairsWarning::ZeroWidthRange { param: i, name: fit.names[i].clone() });
        }
    }

    let n_draws = post.n_draws();
    let mark = if n_draws >= options.dense_threshold {
        log::debug!(
            "pairs: {n_draws} draws >= {}, using minimal scatter marks",
            options.dense_threshold
        );
        warnings.push(PairsWarning::DenseScatter {
            n_draws,
            threshold: options.dense_threshold,
        });
        ScatterMark::Dot
    } else {
        ScatterMark::Point
    };

    let diag_spec = DiagonalSpec {
        mode: options.diagonal_mode,
        acf_y_range: PlotRange::from(options.acf_y_range),
        acf_max_lag: options.acf_max_lag,
        histogram_bins: options.histogram_bins,
    };

    let cells = grid_cells(n)
        .map(|cell| dispatch_cell(cell, &input, &ranges, &diag_spec, mark, options))
        .collect::<Result<Vec<_>>>()?;

    Ok(PairsArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        meta: PairsMeta {
            tool: "pairs-viz".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            created_unix_ms: now_unix_ms()?,
            n_draws,
            parameter_indices: indices,
        },
        parameter_names: fit.names.clone(),
        estimates: fit.estimates.clone(),
        std_errors: fit.std_errors.clone(),
        ranges,
        range_source,
        diagonal_mode: options.diagonal_mode,
        draws: (0..n).map(|i| post.column(i).to_vec()).collect(),
        cells,
        warnings,
    })
}

fn dispatch_cell(
    cell: GridCell,
    input: &AlignedInput,
    ranges: &[PlotRange],
    diag_spec: &DiagonalSpec,
    mark: ScatterMark,
    options: &PairsOptions,
) -> Result<PairsCell> {
    let post = input.posterior();
    let fit = input.fit();
    let GridCell { row, col, kind, border } = cell;

    let content = match kind {
        CellKind::Diagonal => CellContent::Diagonal {
            param: row,
            label: fit.names[row].clone(),
            panel: diagonal_panel(diag_spec, post.column(row), ranges[row], options.headroom(row)),
        },
        CellKind::Lower => {
            let ellipse = confidence_ellipse(
                fit.corr[col][row],
                (fit.std_errors[col], fit.std_errors[row]),
                (fit.estimates[col], fit.estimates[row]),
                options.ellipse_points,
                options.ellipse_level,
            )?;
            CellContent::Scatter {
                x_param: col,
                y_param: row,
                mark,
                mle: (fit.estimates[col], fit.estimates[row]),
                ellipse,
            }
        }
        CellKind::Upper => {
            let (r, text, size) = correlation_label(post.column(row), post.column(col));
            CellContent::CorrelationLabel { r, text, size }
        }
    };
    Ok(PairsCell { row, col, border, content })
}

impl PairsArtifact {
    pub fn n_params(&self) -> usize {
        self.parameter_names.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&PairsCell> {
        self.cells.get(row * self.n_params() + col)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> (PosteriorSample, AsymptoticFit) {
        let p = PosteriorSample::from_columns(vec![
            vec![0.1, -0.3, 0.5, 0.2, -0.1],
            vec![1.0, 0.8, 1.4, 1.1, 0.9],
            vec![5.0, 4.0, 6.0, 5.5, 4.5],
        ])
        .unwrap();
        let f = AsymptoticFit::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![0.0, 1.0, 5.0],
            vec![0.3, 0.2, 0.7],
            vec![vec![1.0, 0.4, 0.0], vec![0.4, 1.0, -0.3], vec![0.0, -0.3, 1.0]],
        )
        .unwrap();
        (p, f)
    }

    #[test]
    fn label_size_even_and_increasing() {
        assert_eq!(correlation_label_size(0.8), correlation_label_size(-0.8));
        let mut prev = correlation_label_size(0.0);
        for i in 1..=100 {
            let s = correlation_label_size(i as f64 / 100.0);
            assert!(s > prev);
            prev = s;
        }
        assert!((correlation_label_size(0.0) - 0.125).abs() < 1e-15);
    }

    #[test]
    fn correlation_label_rounds_and_is_symmetric() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let (r1, t1, _) = correlation_label(&x, &y);
        let (r2, t2, _) = correlation_label(&y, &x);
        assert_eq!(r1, r2);
        assert_eq!(t1, t2);
        assert_eq!(t1, "0.80");
    }

    #[test]
    fn constant_column_gives_na_label() {
        let (r, text, size) = correlation_label(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        assert!(r.is_none());
        assert_eq!(text, "NA");
        assert_eq!(size, correlation_label_size(0.0));
    }

    #[test]
    fn cells_match_triangle_convention() {
        let (p, f) = small();
        let art = pairs_artifact(&p, &f, &PairsOptions::default()).unwrap();
        assert_eq!(art.cells.len(), 9);
        for c in &art.cells {
            assert_eq!(c.content.kind(), CellKind::classify(c.row, c.col));
        }
        match &art.cell(2, 1).unwrap().content {
            CellContent::Scatter { x_param, y_param, mle, .. } => {
                assert_eq!((*x_param, *y_param), (1, 2));
                assert_eq!(*mle, (1.0, 5.0));
            }
            other => panic!("expected scatter, got {:?}", other.kind()),
        }
    }

    #[test]
    fn single_parameter_subset_is_rejected() {
        let (p, f) = small();
        let err = pairs_artifact(&p, &f, &PairsOptions::default().with_subset(vec![1]))
            .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
        assert!(err.to_string().contains("only for >1 parameter"));
    }

    #[test]
    fn invalid_correlation_in_subset_is_rejected() {
        let (p, mut f) = small();
        f.corr[0][2] = 1.5;
        f.corr[2][0] = 1.5;
        assert!(pairs_artifact(&p, &f, &PairsOptions::default()).is_err());
        // Not part of the selected subset: fine.
        assert!(pairs_artifact(&p, &f, &PairsOptions::default().with_subset(vec![0, 1])).is_ok());
    }

    #[test]
    fn supplied_ranges_are_verbatim() {
        let (p, f) = small();
        let ranges = vec![[-1.0, 1.0], [0.0, 2.0], [3.0, 7.0]];
        let art = pairs_artifact(&p, &f, &PairsOptions::default().with_ranges(ranges)).unwrap();
        assert_eq!(art.range_source, RangeSource::Supplied);
        assert_eq!(art.ranges[2], PlotRange::new(3.0, 7.0));
    }

    #[test]
    fn inverted_supplied_range_is_rejected() {
        let (p, f) = small();
        let opts = PairsOptions::default().with_ranges(vec![[5.0, -5.0], [0.0, 2.0], [3.0, 7.0]]);
        let err = pairs_artifact(&p, &f, &opts).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
        assert!(err.to_string().contains("plot range 0 is inverted"));
    }

    #[test]
    fn point_range_warns_as_zero_width() {
        let (p, f) = small();
        let opts = PairsOptions::default().with_ranges(vec![[1.0, 1.0], [0.0, 2.0], [3.0, 7.0]]);
        let art = pairs_artifact(&p, &f, &opts).unwrap();
        assert_eq!(
            art.warnings,
            vec![PairsWarning::ZeroWidthRange { param: 0, name: "a".into() }]
        );
    }

    #[test]
    fn deserialized_fit_with_wrong_corr_shape_fails_cleanly() {
        let (p, _) = small();
        let f: AsymptoticFit = serde_json::from_str(
            r#"{"names":["a","b","c"],"estimates":[0,0,0],"std_errors":[1,1,1],"corr":[[1.0]]}"#,
        )
        .unwrap();
        let err = pairs_artifact(&p, &f, &PairsOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn wrong_number_of_ranges_is_rejected() {
        let (p, f) = small();
        let opts = PairsOptions::default().with_ranges(vec![[-1.0, 1.0]]);
        assert!(pairs_artifact(&p, &f, &opts).is_err());
    }

    #[test]
    fn dense_threshold_switches_marks() {
        let (p, f) = small();
        let opts = PairsOptions { dense_threshold: 5, ..PairsOptions::default() };
        let art = pairs_artifact(&p, &f, &opts).unwrap();
        assert!(art
            .warnings
            .iter()
            .any(|w| matches!(w, PairsWarning::DenseScatter { n_draws: 5, threshold: 5 })));
        let CellContent::Scatter { mark, .. } = &art.cell(1, 0).unwrap().content else {
            panic!("expected scatter");
        };
        assert_eq!(*mark, ScatterMark::Dot);
    }

    #[test]
    fn json_round_trip_keeps_cells() {
        let (p, f) = small();
        let art = pairs_artifact(&p, &f, &PairsOptions::default()).unwrap();
        let back = PairsArtifact::from_json(&art.to_json().unwrap()).unwrap();
        assert_eq!(back.cells.len(), art.cells.len());
        assert_eq!(back.ranges, art.ranges);
    }
}
