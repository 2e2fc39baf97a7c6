//! Cell classification for an n×n pairs matrix.
//!
//! Indices are 0-based: row 0 is the top row, column 0 the leftmost column.
//! Each cell is exactly one of diagonal / lower / upper; border axes are an
//! independent overlay on the bottom row and the left column.

use serde::{Deserialize, Serialize};

/// Which triangle of the matrix a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// `row == col`: per-parameter diagnostic.
    Diagonal,
    /// `row > col`: scatter of (col, row) with the asymptotic overlay.
    Lower,
    /// `row < col`: empirical correlation label.
    Upper,
}

impl CellKind {
    pub fn classify(row: usize, col: usize) -> Self {
        use std::cmp::Ordering;
        match row.cmp(&col) {
            Ordering::Equal => CellKind::Diagonal,
            Ordering::Greater => CellKind::Lower,
            Ordering::Less => CellKind::Upper,
        }
    }
}

/// Two-position stagger for tick labels so neighbouring cells do not collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickStagger {
    Near,
    Far,
}

impl TickStagger {
    fn from_parity(i: usize) -> Self {
        if i % 2 == 0 {
            TickStagger::Near
        } else {
            TickStagger::Far
        }
    }
}

/// Axes drawn on the outer border of the matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderAxes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<TickStagger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<TickStagger>,
}

impl BorderAxes {
    pub fn for_cell(row: usize, col: usize, n: usize) -> Self {
        Self {
            bottom: (row + 1 == n).then(|| TickStagger::from_parity(col)),
            left: (col == 0).then(|| TickStagger::from_parity(row)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bottom.is_none() && self.left.is_none()
    }
}

/// One visit of the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub kind: CellKind,
    pub border: BorderAxes,
}

/// All n² cells in row-major order.
pub fn grid_cells(n: usize) -> impl Iterator<Item = GridCell> {
    (0..n).flat_map(move |row| {
        (0..n).map(move |col| GridCell {
            row,
            col,
            kind: CellKind::classify(row, col),
            border: BorderAxes::for_cell(row, col, n),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_n_squared_cells_once() {
        for n in 2..7 {
            let cells: Vec<GridCell> = grid_cells(n).collect();
            assert_eq!(cells.len(), n * n);
            let diag = cells.iter().filter(|c| c.kind == CellKind::Diagonal).count();
            let lower = cells.iter().filter(|c| c.kind == CellKind::Lower).count();
            let upper = cells.iter().filter(|c| c.kind == CellKind::Upper).count();
            assert_eq!(diag, n);
            assert_eq!(lower, n * (n - 1) / 2);
            assert_eq!(upper, lower);
        }
    }

    #[test]
    fn kind_depends_only_on_row_col() {
        for c in grid_cells(5) {
            let expected = if c.row == c.col {
                CellKind::Diagonal
            } else if c.row > c.col {
                CellKind::Lower
            } else {
                CellKind::Upper
            };
            assert_eq!(c.kind, expected);
        }
    }

    #[test]
    fn border_axes_on_bottom_row_and_left_column() {
        let n = 4;
        for c in grid_cells(n) {
            assert_eq!(c.border.bottom.is_some(), c.row == n - 1);
            assert_eq!(c.border.left.is_some(), c.col == 0);
        }
        let corner = grid_cells(n).find(|c| c.row == n - 1 && c.col == 0).unwrap();
        assert!(corner.border.bottom.is_some() && corner.border.left.is_some());
        let top_left = grid_cells(n).next().unwrap();
        assert_eq!(top_left.border.left, Some(TickStagger::Near));
    }

    #[test]
    fn stagger_alternates() {
        let bottoms: Vec<TickStagger> =
            grid_cells(4).filter_map(|c| c.border.bottom).collect();
        assert_eq!(
            bottoms,
            vec![TickStagger::Near, TickStagger::Far, TickStagger::Near, TickStagger::Far]
        );
    }
}
