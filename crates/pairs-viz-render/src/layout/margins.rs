/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn manual(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Shrink by `pad` on every side.
    pub fn inset(&self, pad: f64) -> Self {
        let pad = pad.min(self.width / 2.0).min(self.height / 2.0).max(0.0);
        Self::manual(self.left + pad, self.top + pad, self.width - 2.0 * pad, self.height - 2.0 * pad)
    }
}
