use pairs_viz::{BorderAxes, TickStagger};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw the border axes a cell carries, in the canvas axis color.
///
/// Far-staggered axes push their tick labels out by `stagger_offset` so
/// labels of neighbouring cells do not collide.
pub fn draw_border_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    border: &BorderAxes,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &VizConfig,
) {
    let color = canvas.state().axis_color;
    let line_style = LineStyle::solid(color, 0.6);
    let inward = config.axes.tick_direction == "in";
    let tl = config.axes.tick_length;
    let out = if inward { 0.0 } else { tl };

    if let Some(stagger) = border.bottom {
        let label_style = TextStyle {
            size: config.font.tick_size,
            color,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Hanging,
        };
        let y0 = area.bottom();
        let label_y = y0 + out + 3.0 + stagger_extra(stagger, config);
        for (val, label) in x_axis.tick_positions.iter().zip(&x_axis.tick_labels) {
            let px = x_axis.data_to_pixel(*val, area.left, area.right());
            let y1 = if inward { y0 - tl } else { y0 + tl };
            canvas.line(px, y0, px, y1, &line_style);
            canvas.text(px, label_y, label, &label_style);
        }
    }

    if let Some(stagger) = border.left {
        let label_style = TextStyle {
            size: config.font.tick_size,
            color,
            anchor: TextAnchor::End,
            baseline: TextBaseline::Central,
        };
        let x0 = area.left;
        let label_x = x0 - out - 3.0 - stagger_extra(stagger, config);
        for (val, label) in y_axis.tick_positions.iter().zip(&y_axis.tick_labels) {
            let py = y_axis.data_to_pixel(*val, area.bottom(), area.top);
            let x1 = if inward { x0 + tl } else { x0 - tl };
            canvas.line(x0, py, x1, py, &line_style);
            canvas.text(label_x, py, label, &label_style);
        }
    }
}

fn stagger_extra(stagger: TickStagger, config: &VizConfig) -> f64 {
    match stagger {
        TickStagger::Near => 0.0,
        TickStagger::Far => config.axes.stagger_offset,
    }
}

/// Box around a cell.
pub fn draw_frame(canvas: &mut Canvas, area: &PlotArea, color: Color, width: f64) {
    canvas.rect(area.left, area.top, area.width, area.height, &Style::stroked(color, width));
}
