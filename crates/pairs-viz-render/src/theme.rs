use crate::color::{Color, MID_GRAY};
use crate::config::*;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    Classic,
    Muted,
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "muted" => Self::Muted,
            "minimal" => Self::Minimal,
            _ => Self::Classic,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::Classic => classic(),
            Self::Muted => muted(),
            Self::Minimal => minimal(),
        }
    }
}

/// Black marks on white, gray border axes, red MLE overlay.
fn classic() -> VizConfig {
    VizConfig {
        theme: "classic".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        colors: ColorsConfig::default(),
        marks: MarksConfig::default(),
        output: OutputConfig::default(),
    }
}

/// Larger spaced cells, soft blue marks, translucent points.
fn muted() -> VizConfig {
    VizConfig {
        theme: "muted".into(),
        figure: FigureConfig { cell_size: 120.0, cell_gap: 4.0, ..FigureConfig::default() },
        colors: ColorsConfig {
            frame: Color::hex("#334155"),
            points: Color::hex("#4C78A8"),
            mle: Color::hex("#E45756"),
            ellipse: Color::hex("#E45756"),
            histogram_fill: Color::hex("#BFD3E6"),
            histogram_stroke: Color::hex("#4C78A8"),
            acf: Color::hex("#4C78A8"),
            trace: Color::hex("#4C78A8"),
            label: Color::hex("#0F172A"),
        },
        marks: MarksConfig { point_alpha: 0.45, ..MarksConfig::default() },
        ..classic()
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        font: FontConfig { tick_size: 7.0, ..FontConfig::default() },
        axes: AxesConfig {
            axis_color: MID_GRAY,
            tick_direction: "in".into(),
            tick_length: 2.5,
            target_ticks: 3,
            stagger_offset: 8.0,
            frame_width: 0.4,
        },
        colors: ColorsConfig { frame: MID_GRAY, ..ColorsConfig::default() },
        ..classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_falls_back_to_classic() {
        assert_eq!(BuiltinTheme::parse("Muted"), BuiltinTheme::Muted);
        assert_eq!(BuiltinTheme::parse("minimal"), BuiltinTheme::Minimal);
        assert_eq!(BuiltinTheme::parse("whatever"), BuiltinTheme::Classic);
    }

    #[test]
    fn every_theme_mutes_axes() {
        for t in [BuiltinTheme::Classic, BuiltinTheme::Muted, BuiltinTheme::Minimal] {
            assert_eq!(t.base_config().axes.axis_color, MID_GRAY);
        }
    }
}
