//! Text measurement used by adaptive column sizing.

/// Measures the rendered width of a piece of text.
pub trait TextMeasure {
    /// Width in pixels of `text` at `font_size`. Multi-line text measures its
    /// widest line.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Per-character width table, scaled by font size.
///
/// Tracks a typical sans-serif face closely enough for sizing columns when no
/// real font metrics are available (tests, CLI, headless hosts).
#[derive(Debug, Clone, Copy, Default)]
pub struct CharWidthMeasure;

impl TextMeasure for CharWidthMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.lines()
            .map(|line| line.chars().map(char_width_factor).sum::<f32>() * font_size)
            .fold(0.0, f32::max)
    }
}

pub(crate) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        '\t' => 1.224,
        '\\' | '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '{' | '}' | '\'' => 0.321,
        'I' | 'i' | 'j' | 'l' => 0.26,
        'f' | 'r' | 't' => 0.34,
        'M' | 'W' | 'm' | 'w' => 0.88,
        '@' | '#' | '%' | '&' => 0.946,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii_lowercase() => 0.56,
        c if c.is_ascii_digit() => 0.6,
        c if c.is_ascii() => 0.5,
        // CJK and other wide glyphs
        c if u32::from(c) >= 0x2E80 => 1.0,
        _ => 0.6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_are_positive_for_visible_chars() {
        for ch in ['a', 'Z', '0', '@', 'é', '\u{4e2d}'] {
            assert!(char_width_factor(ch) > 0.0, "char {ch:?} has zero width");
        }
    }

    #[test]
    fn width_scales_with_font_size() {
        let m = CharWidthMeasure;
        let small = m.text_width("HELLO WORLD", 10.0);
        let large = m.text_width("HELLO WORLD", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn multiline_text_uses_widest_line() {
        let m = CharWidthMeasure;
        let widest = m.text_width("WWWW", 14.0);
        assert!((m.text_width("ab\nWWWW\nc", 14.0) - widest).abs() < 1e-3);
        assert!(m.text_width("", 14.0).abs() < f32::EPSILON);
    }
}
