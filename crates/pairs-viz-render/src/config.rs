use serde::Deserialize;

use crate::color::{Color, MID_GRAY};
use crate::theme::BuiltinTheme;

/// Top-level visualization configuration (YAML or programmatic).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub colors: ColorsConfig,
    pub marks: MarksConfig,
    pub output: OutputConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        BuiltinTheme::Classic.base_config()
    }
}

/// Matrix geometry, in points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Side of one square cell.
    pub cell_size: f64,
    /// Gap between neighbouring cells.
    pub cell_gap: f64,
    /// Outer margins `[top, right, bottom, left]` reserved for border axes.
    pub outer_margin: [f64; 4],
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self { cell_size: 110.0, cell_gap: 0.0, outer_margin: [12.0, 12.0, 42.0, 48.0] }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Point size of relative size 1.0 (correlation labels scale from it).
    pub base_size: f64,
    /// Relative size of the parameter labels on the diagonal.
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { base_size: 20.0, label_size: 0.5, tick_size: 7.5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    /// Shared color of border axes, ticks and tick labels.
    pub axis_color: Color,
    pub tick_direction: String,
    pub tick_length: f64,
    /// Target number of major ticks per border axis.
    pub target_ticks: usize,
    /// Extra offset of tick labels in the far stagger position.
    pub stagger_offset: f64,
    pub frame_width: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            axis_color: MID_GRAY,
            tick_direction: "out".into(),
            tick_length: 3.5,
            target_ticks: 4,
            stagger_offset: 10.0,
            frame_width: 0.6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub frame: Color,
    pub points: Color,
    pub mle: Color,
    pub ellipse: Color,
    pub histogram_fill: Color,
    pub histogram_stroke: Color,
    pub acf: Color,
    pub trace: Color,
    pub label: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            frame: Color::rgb(0, 0, 0),
            points: Color::rgb(0, 0, 0),
            mle: Color::hex("#DC2626"),
            ellipse: Color::hex("#DC2626"),
            histogram_fill: Color::hex("#D1D5DB"),
            histogram_stroke: Color::rgb(0, 0, 0),
            acf: Color::rgb(0, 0, 0),
            trace: Color::rgb(0, 0, 0),
            label: Color::rgb(0, 0, 0),
        }
    }
}

/// Sizes of data marks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarksConfig {
    /// Radius of ordinary scatter points.
    pub point_radius: f64,
    pub point_alpha: f64,
    /// Side of the minimal marks used for dense samples.
    pub dot_size: f64,
    pub mle_size: f64,
    pub ellipse_width: f64,
    pub trace_width: f64,
}

impl Default for MarksConfig {
    fn default() -> Self {
        Self {
            point_radius: 1.2,
            point_alpha: 0.6,
            dot_size: 0.6,
            mle_size: 3.0,
            ellipse_width: 1.2,
            trace_width: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: "svg".into(), dpi: 220 }
    }
}

/// Resolve a VizConfig from optional YAML string.
///
/// The `theme` key picks the preset that fills every field the YAML leaves
/// out; explicit keys override the preset.
pub fn resolve_config(user_yaml: Option<&str>) -> crate::Result<VizConfig> {
    let Some(yaml) = user_yaml else {
        return Ok(VizConfig::default());
    };
    let value: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(yaml).map_err(|e| crate::RenderError::Config(e.to_string()))?;
    let theme = value
        .get("theme")
        .and_then(|t| t.as_str())
        .map(BuiltinTheme::parse)
        .unwrap_or(BuiltinTheme::Classic);

    let mut config = theme.base_config();
    overlay(&mut config, &value)?;
    Ok(config)
}

fn section<T: serde::de::DeserializeOwned>(
    value: &serde_yaml_ng::Value,
    key: &str,
) -> crate::Result<Option<T>> {
    match value.get(key) {
        None => Ok(None),
        Some(v) => serde_yaml_ng::from_value(v.clone())
            .map(Some)
            .map_err(|e| crate::RenderError::Config(format!("{key}: {e}"))),
    }
}

/// Replace whole sections present in `value`; fields missing inside a
/// section take that section's defaults.
fn overlay(config: &mut VizConfig, value: &serde_yaml_ng::Value) -> crate::Result<()> {
    if let Some(f) = section(value, "figure")? {
        config.figure = f;
    }
    if let Some(f) = section(value, "font")? {
        config.font = f;
    }
    if let Some(a) = section(value, "axes")? {
        config.axes = a;
    }
    if let Some(c) = section(value, "colors")? {
        config.colors = c;
    }
    if let Some(m) = section(value, "marks")? {
        config.marks = m;
    }
    if let Some(o) = section(value, "output")? {
        config.output = o;
    }
    Ok(())
}
