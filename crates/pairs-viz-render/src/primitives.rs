use crate::color::Color;

/// Fill and outline of rects and circles.
#[derive(Debug, Clone, Default)]
pub struct Style {
    pub fill: Option<Color>,
    /// Outline color and width.
    pub stroke: Option<(Color, f64)>,
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), stroke: None }
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self { fill: None, stroke: Some((color, width)) }
    }

    pub fn filled_stroked(fill: Color, stroke: Color, width: f64) -> Self {
        Self { fill: Some(fill), stroke: Some((stroke, width)) }
    }
}

#[derive(Debug, Clone)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
}

impl LineStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            color: Color::rgb(0, 0, 0),
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Central,
        }
    }
}

/// Horizontal text alignment, SVG `text-anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &str {
        match self {
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Vertical text alignment, SVG `dominant-baseline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Central,
    Hanging,
}

impl TextBaseline {
    pub fn as_str(&self) -> &str {
        match self {
            TextBaseline::Central => "central",
            TextBaseline::Hanging => "hanging",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    /// Radius for circles and crosses, side for dots.
    pub size: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    /// Square of side `size`; the cheapest mark for dense clouds.
    Dot,
    Cross,
}
