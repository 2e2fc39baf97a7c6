use pairs_viz::{CellContent, PairsArtifact, PairsCell, ScatterMark};

use crate::canvas::{Canvas, DrawState};
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::layout::matrix::MatrixLayout;
use crate::primitives::*;
use crate::RenderError;

use super::axes_draw::{draw_border_axes, draw_frame};
use super::diagonal;

pub fn render(artifact: &PairsArtifact, config: &VizConfig) -> crate::Result<String> {
    check_shape(artifact)?;
    let layout = MatrixLayout::new(artifact.n_params(), &config.figure)?;
    let mut canvas = Canvas::new(layout.figure_width(), layout.figure_height())?;
    draw_pairs(&mut canvas, artifact, &layout, config)?;
    canvas.finish_svg()
}

/// Draw every cell of `artifact` onto `canvas`.
///
/// The muted axis state is installed for the duration of the call and the
/// caller's state is back in place when this returns, also on error.
pub fn draw_pairs(
    canvas: &mut Canvas,
    artifact: &PairsArtifact,
    layout: &MatrixLayout,
    config: &VizConfig,
) -> crate::Result<()> {
    let mut canvas = canvas.scoped(DrawState { axis_color: config.axes.axis_color });

    for cell in &artifact.cells {
        if cell.row >= layout.n || cell.col >= layout.n {
            return Err(RenderError::Layout(format!(
                "cell ({}, {}) outside {}x{} matrix",
                cell.row, cell.col, layout.n, layout.n
            )));
        }
        let area = layout.cell_area(cell.row, cell.col);
        let axes = draw_cell(&mut canvas, &area, artifact, cell, config)?;
        draw_frame(&mut canvas, &area, config.colors.frame, config.axes.frame_width);
        if let Some((x_axis, y_axis)) = axes {
            if !cell.border.is_empty() {
                draw_border_axes(&mut canvas, &area, &cell.border, &x_axis, &y_axis, config);
            }
        }
    }
    Ok(())
}

/// Returns the cell's coordinate system, `None` for cells without axes.
fn draw_cell(
    canvas: &mut Canvas,
    area: &PlotArea,
    artifact: &PairsArtifact,
    cell: &PairsCell,
    config: &VizConfig,
) -> crate::Result<Option<(Axis, Axis)>> {
    match &cell.content {
        CellContent::Diagonal { param, label, panel } => {
            let draws = column(artifact, *param)?;
            canvas.push_clip(area.left, area.top, area.width, area.height);
            let axes = diagonal::draw_panel(canvas, area, panel, draws, config);
            canvas.pop_clip();
            diagonal::draw_label(canvas, area, label, config);
            Ok(Some(axes))
        }
        CellContent::Scatter { x_param, y_param, mark, mle, ellipse } => {
            let xs = column(artifact, *x_param)?;
            let ys = column(artifact, *y_param)?;
            let x_axis = Axis::for_range(range(artifact, *x_param)?, config.axes.target_ticks);
            let y_axis = Axis::for_range(range(artifact, *y_param)?, config.axes.target_ticks);
            let to_px = |x: f64, y: f64| {
                (
                    x_axis.data_to_pixel(x, area.left, area.right()),
                    y_axis.data_to_pixel(y, area.bottom(), area.top),
                )
            };

            canvas.push_clip(area.left, area.top, area.width, area.height);
            let marker = match mark {
                ScatterMark::Point => MarkerStyle {
                    shape: MarkerShape::Circle,
                    size: config.marks.point_radius,
                    color: config.colors.points.with_alpha(config.marks.point_alpha),
                },
                ScatterMark::Dot => MarkerStyle {
                    shape: MarkerShape::Dot,
                    size: config.marks.dot_size,
                    color: config.colors.points,
                },
            };
            for (&x, &y) in xs.iter().zip(ys) {
                let (px, py) = to_px(x, y);
                canvas.marker(px, py, &marker);
            }

            let outline: Vec<(f64, f64)> = ellipse.points().map(|(x, y)| to_px(x, y)).collect();
            canvas.closed_polyline(
                &outline,
                &LineStyle::solid(config.colors.ellipse, config.marks.ellipse_width),
            );
            let (mx, my) = to_px(mle.0, mle.1);
            canvas.marker(
                mx,
                my,
                &MarkerStyle {
                    shape: MarkerShape::Cross,
                    size: config.marks.mle_size,
                    color: config.colors.mle,
                },
            );
            canvas.pop_clip();
            Ok(Some((x_axis, y_axis)))
        }
        CellContent::CorrelationLabel { text, size, .. } => {
            let style = TextStyle {
                size: config.font.base_size * size,
                color: config.colors.label,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Central,
            };
            let (cx, cy) = area.center();
            canvas.text(cx, cy, text, &style);
            Ok(None)
        }
    }
}

fn column(artifact: &PairsArtifact, i: usize) -> crate::Result<&[f64]> {
    artifact
        .draws
        .get(i)
        .map(Vec::as_slice)
        .ok_or_else(|| RenderError::Layout(format!("artifact has no draws for parameter {i}")))
}

fn range(artifact: &PairsArtifact, i: usize) -> crate::Result<pairs_viz::PlotRange> {
    artifact
        .ranges
        .get(i)
        .copied()
        .ok_or_else(|| RenderError::Layout(format!("artifact has no range for parameter {i}")))
}

/// Reject artifacts whose per-parameter vectors disagree, before any drawing.
fn check_shape(artifact: &PairsArtifact) -> crate::Result<()> {
    let n = artifact.n_params();
    if artifact.ranges.len() != n || artifact.draws.len() != n {
        return Err(RenderError::Layout(format!(
            "artifact has {n} names but {} ranges and {} draw columns",
            artifact.ranges.len(),
            artifact.draws.len()
        )));
    }
    if artifact.cells.len() != n * n {
        return Err(RenderError::Layout(format!(
            "artifact has {} cells, expected {}",
            artifact.cells.len(),
            n * n
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::MID_GRAY;
    use pairs_viz::{AsymptoticFit, PairsOptions, PosteriorSample};

    fn artifact() -> PairsArtifact {
        let a: Vec<f64> = (0..50).map(|i| (i as f64 * 0.37).sin()).collect();
        let b: Vec<f64> = (0..50).map(|i| (i as f64 * 0.91).cos()).collect();
        let post = PosteriorSample::from_columns(vec![a, b]).unwrap();
        let fit = AsymptoticFit::new(
            vec!["alpha".into(), "beta".into()],
            vec![0.0, 0.0],
            vec![0.5, 0.5],
            vec![vec![1.0, 0.3], vec![0.3, 1.0]],
        )
        .unwrap();
        pairs_viz::pairs_artifact(&post, &fit, &PairsOptions::default()).unwrap()
    }

    #[test]
    fn every_cell_gets_a_frame() {
        let svg = render(&artifact(), &VizConfig::default()).unwrap();
        let frames = svg
            .lines()
            .filter(|l| l.starts_with("<rect") && l.contains(r#"fill="none""#))
            .count();
        assert_eq!(frames, 4);
        assert!(svg.contains(">alpha</text>"));
        assert!(svg.contains(">beta</text>"));
    }

    #[test]
    fn axis_state_is_restored_after_drawing() {
        let art = artifact();
        let layout = MatrixLayout::new(2, &VizConfig::default().figure).unwrap();
        let mut canvas = Canvas::new(layout.figure_width(), layout.figure_height()).unwrap();
        draw_pairs(&mut canvas, &art, &layout, &VizConfig::default()).unwrap();
        assert_eq!(*canvas.state(), DrawState::default());
    }

    #[test]
    fn axis_state_is_restored_on_error() {
        let mut art = artifact();
        art.cells[3].row = 7;
        let layout = MatrixLayout::new(2, &VizConfig::default().figure).unwrap();
        let mut canvas = Canvas::new(layout.figure_width(), layout.figure_height()).unwrap();
        let err = draw_pairs(&mut canvas, &art, &layout, &VizConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Layout(_)));
        assert_eq!(*canvas.state(), DrawState::default());
    }

    #[test]
    fn border_ticks_use_axis_color() {
        let svg = render(&artifact(), &VizConfig::default()).unwrap();
        let gray = MID_GRAY.to_svg_fill();
        assert!(svg.lines().any(|l| l.starts_with("<line") && l.contains(&gray)));
    }

    #[test]
    fn malformed_artifact_is_rejected_before_drawing() {
        let mut art = artifact();
        art.ranges.pop();
        assert!(matches!(render(&art, &VizConfig::default()), Err(RenderError::Layout(_))));
    }
}
