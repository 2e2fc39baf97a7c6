use std::fmt::{self, Write as FmtWrite};
use std::ops::{Deref, DerefMut};

use crate::color::Color;
use crate::primitives::*;
use crate::text::{measure_styled, TextMetrics};

/// An SVG element stored for deferred rendering.
#[derive(Debug, Clone)]
enum SvgElement {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: Style,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: LineStyle,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        style: LineStyle,
        close: bool,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        style: Style,
    },
    Group {
        clip_id: String,
        children: Vec<SvgElement>,
    },
}

/// Drawing-context configuration read by the axis-drawing code.
///
/// Change it only through [`Canvas::scoped`], which restores the previous
/// state when the guard goes out of scope.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    /// Color for axes, ticks and tick labels.
    pub axis_color: Color,
}

impl Default for DrawState {
    fn default() -> Self {
        Self { axis_color: Color::rgb(0, 0, 0) }
    }
}

/// Immediate-mode SVG canvas. Coordinates in points (1pt = 1/72").
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    elements: Vec<SvgElement>,
    defs: Vec<String>,
    /// Open clip groups, innermost last.
    clip_stack: Vec<(String, Vec<SvgElement>)>,
    next_clip_id: usize,
    state: DrawState,
}

/// Restores the canvas [`DrawState`] on drop, including on early `?` returns.
pub struct StateGuard<'a> {
    canvas: &'a mut Canvas,
    saved: Option<DrawState>,
}

impl Deref for StateGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        &*self.canvas
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        &mut *self.canvas
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.canvas.state = saved;
        }
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> crate::Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(crate::RenderError::Layout(format!(
                "invalid canvas size {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            elements: Vec::new(),
            defs: Vec::new(),
            clip_stack: Vec::new(),
            next_clip_id: 0,
            state: DrawState::default(),
        })
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Install `state` until the returned guard is dropped.
    pub fn scoped(&mut self, state: DrawState) -> StateGuard<'_> {
        let saved = std::mem::replace(&mut self.state, state);
        StateGuard { canvas: self, saved: Some(saved) }
    }

    // --- Drawing primitives ---

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        self.push(SvgElement::Rect { x, y, w, h, style: style.clone() });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.push(SvgElement::Line { x1, y1, x2, y2, style: style.clone() });
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        self.push(SvgElement::Polyline { points: points.to_vec(), style: style.clone(), close: false });
    }

    /// Closed outline through `points`.
    pub fn closed_polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        self.push(SvgElement::Polyline { points: points.to_vec(), style: style.clone(), close: true });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.push(SvgElement::Text { x, y, content: content.to_string(), style: style.clone() });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &Style) {
        self.push(SvgElement::Circle { cx, cy, r, style: style.clone() });
    }

    /// Data marker centred on `(x, y)`.
    pub fn marker(&mut self, x: f64, y: f64, marker: &MarkerStyle) {
        match marker.shape {
            MarkerShape::Circle => {
                self.circle(x, y, marker.size, &Style::filled(marker.color));
            }
            MarkerShape::Dot => {
                let s = marker.size;
                self.rect(x - s / 2.0, y - s / 2.0, s, s, &Style::filled(marker.color));
            }
            MarkerShape::Cross => {
                let h = marker.size;
                let ls = LineStyle::solid(marker.color, (h * 0.4).max(0.8));
                self.line(x - h, y, x + h, y, &ls);
                self.line(x, y - h, x, y + h, &ls);
            }
        }
    }

    // --- Clip paths ---

    /// Clip everything drawn until the matching [`Canvas::pop_clip`].
    pub fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64) -> String {
        let id = format!("clip{}", self.next_clip_id);
        self.next_clip_id += 1;
        self.defs.push(format!(
            r#"<clipPath id="{id}"><rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" /></clipPath>"#
        ));
        self.clip_stack.push((id.clone(), Vec::new()));
        id
    }

    pub fn pop_clip(&mut self) {
        if let Some((clip_id, children)) = self.clip_stack.pop() {
            self.push(SvgElement::Group { clip_id, children });
        }
    }

    // --- Text measurement ---

    pub fn measure_text(&self, content: &str, style: &TextStyle) -> TextMetrics {
        measure_styled(content, style)
    }

    // --- SVG output ---

    fn push(&mut self, elem: SvgElement) {
        match self.clip_stack.last_mut() {
            Some((_, children)) => children.push(elem),
            None => self.elements.push(elem),
        }
    }

    pub fn finish_svg(&self) -> crate::Result<String> {
        let mut out = String::with_capacity(32 * 1024);
        self.write_document(&mut out)
            .map_err(|e| crate::RenderError::Layout(format!("svg serialization: {e}")))?;
        Ok(out)
    }

    fn write_document(&self, out: &mut String) -> fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        )?;

        // Defs (clip paths)
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            for d in &self.defs {
                out.push_str(d);
                out.push('\n');
            }
            out.push_str("</defs>\n");
        }

        writeln!(out, r#"<rect width="{}" height="{}" fill="white" />"#, self.width, self.height)?;

        for elem in &self.elements {
            render_element(out, elem)?;
        }
        if !self.clip_stack.is_empty() {
            log::warn!("canvas: {} clip group(s) left open at finish", self.clip_stack.len());
            for (clip_id, children) in &self.clip_stack {
                writeln!(out, r#"<g clip-path="url(#{clip_id})">"#)?;
                for child in children {
                    render_element(out, child)?;
                }
                out.push_str("</g>\n");
            }
        }

        out.push_str("</svg>\n");
        Ok(())
    }
}

fn write_points(out: &mut String, points: &[(f64, f64)]) -> fmt::Result {
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{x:.2},{y:.2}")?;
    }
    Ok(())
}

fn render_element(out: &mut String, elem: &SvgElement) -> fmt::Result {
    match elem {
        SvgElement::Rect { x, y, w, h, style } => {
            write!(out, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#)?;
            write_style_attrs(out, style)?;
            out.push_str(" />\n");
        }
        SvgElement::Line { x1, y1, x2, y2, style } => {
            write!(out, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#)?;
            write_line_attrs(out, style)?;
            out.push_str(" />\n");
        }
        SvgElement::Polyline { points, style, close } => {
            let tag = if *close { "polygon" } else { "polyline" };
            write!(out, r#"<{tag} points=""#)?;
            write_points(out, points)?;
            out.push('"');
            write!(out, r#" fill="none""#)?;
            write_line_attrs(out, style)?;
            out.push_str(" />\n");
        }
        SvgElement::Text { x, y, content, style } => {
            write!(out, r#"<text x="{x:.2}" y="{y:.2}""#)?;
            write!(out, r#" font-family="Helvetica, Arial, sans-serif" font-size="{:.1}""#, style.size)?;
            write!(out, r#" fill="{}""#, style.color.to_svg_fill())?;
            write!(out, r#" text-anchor="{}""#, style.anchor.as_str())?;
            write!(out, r#" dominant-baseline="{}""#, style.baseline.as_str())?;
            out.push('>');
            // Escape XML
            for ch in content.chars() {
                match ch {
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    '&' => out.push_str("&amp;"),
                    '"' => out.push_str("&quot;"),
                    _ => out.push(ch),
                }
            }
            out.push_str("</text>\n");
        }
        SvgElement::Circle { cx, cy, r, style } => {
            write!(out, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}""#)?;
            write_style_attrs(out, style)?;
            out.push_str(" />\n");
        }
        SvgElement::Group { clip_id, children } => {
            writeln!(out, r#"<g clip-path="url(#{clip_id})">"#)?;
            for child in children {
                render_element(out, child)?;
            }
            out.push_str("</g>\n");
        }
    }
    Ok(())
}

fn write_style_attrs(out: &mut String, style: &Style) -> fmt::Result {
    if let Some(fill) = &style.fill {
        write!(out, r#" fill="{}""#, fill.to_svg_fill())?;
    } else {
        write!(out, r#" fill="none""#)?;
    }
    if let Some((color, width)) = &style.stroke {
        write!(out, r#" stroke="{}""#, color.to_svg_fill())?;
        write!(out, r#" stroke-width="{width:.2}""#)?;
    }
    Ok(())
}

fn write_line_attrs(out: &mut String, style: &LineStyle) -> fmt::Result {
    write!(out, r#" stroke="{}""#, style.color.to_svg_fill())?;
    write!(out, r#" stroke-width="{:.2}""#, style.width)
}
