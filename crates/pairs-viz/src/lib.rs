//! # pairs-viz
//!
//! Pairs-matrix artifacts for MCMC posterior draws, overlaid with the
//! asymptotic (maximum-likelihood) approximation.
//!
//! This crate is intentionally dependency-light: it decides what every cell of
//! the n×n matrix shows and emits a plot-friendly JSON structure. Drawing lives
//! in `pairs-viz-render`.

#![warn(clippy::all)]

/// Diagonal diagnostics (autocorrelation, histogram, trace).
pub mod diagonal;
/// Confidence ellipses for the asymptotic overlay.
pub mod ellipse;
/// Error type.
pub mod error;
/// Grid cell classification.
pub mod grid;
/// Posterior/fit inputs and atomic subsetting.
pub mod input;
/// Build options.
pub mod options;
/// The pairs artifact.
pub mod pairs;
/// Shared plotting ranges.
pub mod range;
/// Numeric primitives.
pub mod stats;

pub use diagonal::{DiagonalMode, DiagonalPanel};
pub use ellipse::{confidence_ellipse, EllipsePolygon};
pub use error::{Error, Result};
pub use grid::{grid_cells, BorderAxes, CellKind, GridCell, TickStagger};
pub use input::{AlignedInput, AsymptoticFit, PosteriorSample};
pub use options::PairsOptions;
pub use pairs::{pairs_artifact, CellContent, PairsArtifact, PairsCell, PairsWarning, ScatterMark};
pub use range::{PlotRange, RangeSource};
