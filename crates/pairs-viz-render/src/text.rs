use crate::primitives::TextStyle;

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Approximate advance of one glyph, in ems, for a sans-serif face.
fn advance_em(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | ' ' => 0.34,
        'm' | 'w' | 'M' | 'W' => 0.85,
        '0'..='9' | '-' | '+' | '\u{2212}' => 0.56,
        c if c.is_ascii_uppercase() => 0.66,
        _ => 0.55,
    }
}

/// Estimate text extent in points from per-glyph advance widths.
///
/// Used for margin and label placement; the SVG viewer does the real layout.
pub fn measure_text(text: &str, size_pt: f64) -> TextMetrics {
    let width = text.chars().map(advance_em).sum::<f64>() * size_pt;
    TextMetrics { width, height: size_pt * 1.2, ascent: size_pt * 0.93 }
}

pub fn measure_styled(text: &str, style: &TextStyle) -> TextMetrics {
    measure_text(text, style.size)
}
