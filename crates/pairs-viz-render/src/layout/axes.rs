use pairs_viz::PlotRange;

/// Upper bound on generated ticks per axis.
const MAX_TICKS: usize = 32;

/// Linear axis over a fixed data range, with ticks inside that range.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
}

impl Axis {
    /// Axis spanning exactly `range`, with "nice number" ticks that fall
    /// inside it. A zero-width range is widened around its value so the
    /// pixel mapping stays finite.
    pub fn for_range(range: PlotRange, target_ticks: usize) -> Self {
        let (min, max) = drawable_limits(range.low, range.high);
        let mut axis = Self::fixed(min, max);
        if target_ticks == 0 {
            return axis;
        }
        let step = nice_step((max - min) / target_ticks.max(2) as f64);
        let first = (min / step).ceil() * step;
        // Count ticks up front: near 1e16 `v + step == v`, so stepping never ends.
        let count = ((max - first) / step + 1e-9).floor();
        if !count.is_finite() || count < 0.0 {
            return axis;
        }
        let count = (count as usize).min(MAX_TICKS);
        for k in 0..=count {
            let v = first + k as f64 * step;
            if v > max + step * 1e-9 {
                break;
            }
            if axis.tick_positions.last() == Some(&v) {
                continue;
            }
            axis.tick_positions.push(v);
            axis.tick_labels.push(format_tick(v, step));
        }
        axis
    }

    /// Fixed axis with explicit limits (no tick auto-generation).
    pub fn fixed(min: f64, max: f64) -> Self {
        Self { min, max, tick_positions: Vec::new(), tick_labels: Vec::new() }
    }

    /// Map a data value to pixel coordinate.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = (value - self.min) / (self.max - self.min);
        px_min + frac * (px_max - px_min)
    }
}

fn drawable_limits(low: f64, high: f64) -> (f64, f64) {
    if high - low > f64::EPSILON * low.abs().max(1.0) {
        return (low, high);
    }
    let pad = if low == 0.0 { 0.5 } else { 0.1 * low.abs() };
    (low - pad, high + pad)
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10.0_f64.powf(exp);
    let nice_frac = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice_frac * 10.0_f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    // Avoid "-0"
    let v = if value.abs() < step * 0.01 { 0.0 } else { value };
    if decimals == 0 {
        format!("{}", v.round() as i64)
    } else {
        format!("{:.prec$}", v, prec = decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_stay_inside_range() {
        let ax = Axis::for_range(PlotRange::new(-4.3, 4.7), 4);
        assert_eq!(ax.min, -4.3);
        assert_eq!(ax.max, 4.7);
        assert!(!ax.tick_positions.is_empty());
        assert!(ax.tick_positions.iter().all(|&t| (-4.3..=4.7).contains(&t)));
        assert!(ax.tick_labels.contains(&"0".to_string()));
    }

    #[test]
    fn data_to_pixel_linear() {
        let ax = Axis::for_range(PlotRange::new(0.0, 100.0), 5);
        let px = ax.data_to_pixel(50.0, 0.0, 500.0);
        assert!((px - 250.0).abs() < 1e-9);
        // Inverted pixel span for y axes.
        let py = ax.data_to_pixel(25.0, 400.0, 0.0);
        assert!((py - 300.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let ax = Axis::for_range(PlotRange::new(2.0, 2.0), 4);
        assert!(ax.max > ax.min);
        assert!(ax.data_to_pixel(2.0, 0.0, 100.0).is_finite());
        let zero = Axis::for_range(PlotRange::new(0.0, 0.0), 4);
        assert_eq!((zero.min, zero.max), (-0.5, 0.5));
    }

    #[test]
    fn huge_offset_small_span_terminates() {
        let ax = Axis::for_range(PlotRange::new(1e16, 1e16 + 6.0), 4);
        assert!(ax.tick_positions.len() <= MAX_TICKS + 1);
        assert_eq!(ax.tick_positions.len(), ax.tick_labels.len());
        assert!(ax.tick_positions.iter().all(|&t| (1e16..=1e16 + 6.0).contains(&t)));
    }

    #[test]
    fn nice_step_values() {
        assert!((nice_step(3.2) - 2.0).abs() < 1e-9);
        assert!((nice_step(0.7) - 0.5).abs() < 1e-9);
        assert!((nice_step(15.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn small_steps_get_decimals() {
        let ax = Axis::for_range(PlotRange::new(0.0, 0.9), 4);
        assert!(ax.tick_labels.iter().any(|l| l.contains('.')));
    }
}
