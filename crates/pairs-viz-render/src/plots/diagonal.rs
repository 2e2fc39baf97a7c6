use pairs_viz::{DiagonalPanel, PlotRange};

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw one diagonal panel into `area`. Returns the panel's own x/y axes so
/// border ticks match what was drawn.
pub(crate) fn draw_panel(
    canvas: &mut Canvas,
    area: &PlotArea,
    panel: &DiagonalPanel,
    draws: &[f64],
    config: &VizConfig,
) -> (Axis, Axis) {
    let ticks = config.axes.target_ticks;
    match panel {
        DiagonalPanel::Histogram { hist, x_range, y_range } => {
            let x_axis = Axis::for_range(*x_range, ticks);
            let y_axis = Axis::for_range(*y_range, ticks);
            let style = Style::filled_stroked(
                config.colors.histogram_fill,
                config.colors.histogram_stroke,
                0.5,
            );
            for (edge, density) in hist.edges.windows(2).zip(&hist.density) {
                let x0 = x_axis.data_to_pixel(edge[0], area.left, area.right());
                let x1 = x_axis.data_to_pixel(edge[1], area.left, area.right());
                let top = y_axis.data_to_pixel(*density, area.bottom(), area.top);
                canvas.rect(x0, top, x1 - x0, area.bottom() - top, &style);
            }
            (x_axis, y_axis)
        }
        DiagonalPanel::Autocorrelation { acf, y_range } => {
            // Lags sit on integers; pad half a lag so lag 0 is not on the frame.
            let lags = PlotRange::new(-0.5, acf.len() as f64 - 0.5);
            let x_axis = Axis::for_range(lags, ticks);
            let y_axis = Axis::for_range(*y_range, ticks);
            let zero = y_axis.data_to_pixel(0.0, area.bottom(), area.top);
            if (area.top..=area.bottom()).contains(&zero) {
                let zero_style = LineStyle::solid(canvas.state().axis_color, 0.5);
                canvas.line(area.left, zero, area.right(), zero, &zero_style);
            }
            let spike = LineStyle::solid(config.colors.acf, 1.0);
            for (lag, rho) in acf.iter().enumerate() {
                let px = x_axis.data_to_pixel(lag as f64, area.left, area.right());
                let py = y_axis.data_to_pixel(*rho, area.bottom(), area.top);
                canvas.line(px, zero, px, py, &spike);
            }
            (x_axis, y_axis)
        }
        DiagonalPanel::Trace { x_range, y_range } => {
            let x_axis = Axis::for_range(*x_range, ticks);
            let y_axis = Axis::for_range(*y_range, ticks);
            let points: Vec<(f64, f64)> = draws
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    (
                        x_axis.data_to_pixel((i + 1) as f64, area.left, area.right()),
                        y_axis.data_to_pixel(*v, area.bottom(), area.top),
                    )
                })
                .collect();
            canvas.polyline(&points, &LineStyle::solid(config.colors.trace, config.marks.trace_width));
            (x_axis, y_axis)
        }
    }
}

/// Parameter name, centred horizontally near the top of the cell. Names
/// wider than the cell are shrunk to fit.
pub(crate) fn draw_label(canvas: &mut Canvas, area: &PlotArea, label: &str, config: &VizConfig) {
    let mut style = TextStyle {
        size: config.font.base_size * config.font.label_size,
        color: config.colors.label,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
    };
    let room = area.inset(4.0).width;
    let width = canvas.measure_text(label, &style).width;
    if width > room && width > 0.0 {
        style.size *= room / width;
    }
    let (cx, _) = area.center();
    canvas.text(cx, area.top + 4.0, label, &style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs_viz::stats::density_histogram;

    fn area() -> PlotArea {
        PlotArea::manual(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn histogram_draws_one_bar_per_bin() {
        let hist = density_histogram(&[0.0, 1.0, 1.5, 2.0, 3.0], 3);
        let panel = DiagonalPanel::Histogram {
            hist,
            x_range: PlotRange::new(-1.0, 4.0),
            y_range: PlotRange::new(0.0, 1.0),
        };
        let mut c = Canvas::new(100.0, 100.0).unwrap();
        let (x, _) = draw_panel(&mut c, &area(), &panel, &[], &VizConfig::default());
        assert_eq!((x.min, x.max), (-1.0, 4.0));
        let svg = c.finish_svg().unwrap();
        // background + bars
        assert_eq!(svg.matches("<rect").count(), 1 + 3);
    }

    #[test]
    fn acf_has_spike_per_lag_and_zero_line() {
        let panel = DiagonalPanel::Autocorrelation {
            acf: vec![1.0, 0.5, 0.2, -0.1],
            y_range: PlotRange::new(-1.0, 1.0),
        };
        let mut c = Canvas::new(100.0, 100.0).unwrap();
        draw_panel(&mut c, &area(), &panel, &[], &VizConfig::default());
        let svg = c.finish_svg().unwrap();
        assert_eq!(svg.matches("<line").count(), 4 + 1);
    }

    #[test]
    fn long_label_is_shrunk() {
        let config = VizConfig::default();
        let mut c = Canvas::new(100.0, 100.0).unwrap();
        draw_label(&mut c, &area(), "a_really_long_parameter_name", &config);
        draw_label(&mut c, &area(), "mu", &config);
        let svg = c.finish_svg().unwrap();
        let full = format!(r#"font-size="{:.1}""#, config.font.base_size * config.font.label_size);
        assert_eq!(svg.matches(&full).count(), 1);
    }

    #[test]
    fn trace_is_one_polyline() {
        let panel = DiagonalPanel::Trace {
            x_range: PlotRange::new(1.0, 3.0),
            y_range: PlotRange::new(0.0, 1.0),
        };
        let mut c = Canvas::new(100.0, 100.0).unwrap();
        draw_panel(&mut c, &area(), &panel, &[0.2, 0.8, 0.5], &VizConfig::default());
        let svg = c.finish_svg().unwrap();
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains("0.00,80.00"));
    }
}
