//! Rendering of MCMC pairs-plot artifacts to SVG, with PNG and PDF behind
//! the `png` and `pdf` features.
//!
//! Artifacts come from [`pairs_viz`]; this crate only turns their numbers into
//! geometry. [`render_pairs`] does both steps and fails before any drawing if
//! the inputs are inconsistent.

pub mod canvas;
pub mod color;
pub mod config;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

use std::path::Path;

use config::VizConfig;
use pairs_viz::{AsymptoticFit, PairsArtifact, PairsOptions, PosteriorSample};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Pairs(#[from] pairs_viz::Error),
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[cfg(feature = "pdf")]
    #[error("PDF conversion error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Render a pairs artifact to an SVG string.
pub fn render_svg(artifact: &PairsArtifact, config: &VizConfig) -> Result<String> {
    plots::pairs::render(artifact, config)
}

/// Render a pairs artifact given as JSON.
pub fn render_json_svg(artifact_json: &str, config: &VizConfig) -> Result<String> {
    let artifact: PairsArtifact = serde_json::from_str(artifact_json)?;
    render_svg(&artifact, config)
}

/// Build the artifact for `posterior` against `fit` and render it to SVG.
pub fn render_pairs(
    posterior: &PosteriorSample,
    fit: &AsymptoticFit,
    options: &PairsOptions,
    config: &VizConfig,
) -> Result<String> {
    let artifact = pairs_viz::pairs_artifact(posterior, fit, options)?;
    render_svg(&artifact, config)
}

/// Render a pairs artifact to bytes in the specified format.
pub fn render_to_bytes(artifact: &PairsArtifact, format: &str, config: &VizConfig) -> Result<Vec<u8>> {
    // Reject the format before doing any layout work.
    match format {
        "svg" => {}
        #[cfg(feature = "png")]
        "png" => {}
        #[cfg(feature = "pdf")]
        "pdf" => {}
        other => return Err(RenderError::UnknownFormat(other.to_string())),
    }
    let svg = render_svg(artifact, config)?;
    match format {
        #[cfg(feature = "png")]
        "png" => output::png::svg_to_png(&svg, config.output.dpi),
        #[cfg(feature = "pdf")]
        "pdf" => output::pdf::svg_to_pdf(&svg),
        _ => Ok(svg.into_bytes()),
    }
}

/// Render a pairs artifact to a file (format inferred from extension,
/// falling back to `config.output.format`).
pub fn render_to_file(artifact: &PairsArtifact, path: &Path, config: &VizConfig) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| config.output.format.clone());
    if ext == "svg" {
        let svg = render_svg(artifact, config)?;
        return output::svg::save_svg(&svg, path);
    }
    let bytes = render_to_bytes(artifact, &ext, config)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
