use crate::config::FigureConfig;
use crate::layout::margins::PlotArea;

/// n×n grid of equal square cells, row 0 at the top.
///
/// The outer margins hold the border axes, so the matrix itself sits inside
/// `[left, top]` offsets and every cell gets identical geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixLayout {
    pub n: usize,
    pub cell_size: f64,
    pub gap: f64,
    /// `[top, right, bottom, left]`.
    pub margin: [f64; 4],
}

impl MatrixLayout {
    pub fn new(n: usize, figure: &FigureConfig) -> crate::Result<Self> {
        if n == 0 {
            return Err(crate::RenderError::Layout("matrix needs at least one cell".into()));
        }
        if !(figure.cell_size.is_finite() && figure.cell_size > 0.0) {
            return Err(crate::RenderError::Layout(format!(
                "cell_size must be positive (got {})",
                figure.cell_size
            )));
        }
        if !(figure.cell_gap.is_finite() && figure.cell_gap >= 0.0)
            || figure.outer_margin.iter().any(|m| !m.is_finite() || *m < 0.0)
        {
            return Err(crate::RenderError::Layout("gap and margins must be >= 0".into()));
        }
        Ok(Self { n, cell_size: figure.cell_size, gap: figure.cell_gap, margin: figure.outer_margin })
    }

    /// Width (= height) of the cell block without margins.
    pub fn matrix_extent(&self) -> f64 {
        self.n as f64 * self.cell_size + (self.n - 1) as f64 * self.gap
    }

    pub fn figure_width(&self) -> f64 {
        self.margin[3] + self.matrix_extent() + self.margin[1]
    }

    pub fn figure_height(&self) -> f64 {
        self.margin[0] + self.matrix_extent() + self.margin[2]
    }

    pub fn cell_area(&self, row: usize, col: usize) -> PlotArea {
        let pitch = self.cell_size + self.gap;
        PlotArea::manual(
            self.margin[3] + col as f64 * pitch,
            self.margin[0] + row as f64 * pitch,
            self.cell_size,
            self.cell_size,
        )
    }
}
