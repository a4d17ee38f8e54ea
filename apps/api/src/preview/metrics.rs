#![allow(dead_code)]

//! Static glyph-width metrics for the preview's sans-serif face.
//!
//! Widths are in em units relative to the font size. A static table is an
//! intentional approximation: it decides where the preview wraps a line,
//! and being off by a percent or two of a line width only moves a marginal
//! word; the rendered page stays legible either way. The table covers
//! ASCII 0x20..=0x7E; everything else falls back to an average width.

/// Character-width table plus wrap logic for one face.
pub struct TextMetrics {
    widths: [f32; 95],
    /// Fallback for codepoints outside 0x20..=0x7E. CJK text in practice
    /// renders close to a full em, so the fallback leans wide.
    pub fallback_width: f32,
    pub space_width: f32,
}

impl TextMetrics {
    /// Rendered width of a string in em units.
    pub fn measure(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.fallback_width
                }
            })
            .sum()
    }

    /// Greedy word-wrap at `max_em`. A word wider than the whole line gets
    /// a line of its own rather than being split mid-word.
    pub fn wrap(&self, s: &str, max_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_width = self.measure(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            if current_width + self.space_width + word_width > max_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Line count after wrapping; zero for whitespace-only text.
    pub fn line_count(&self, s: &str, max_em: f32) -> usize {
        self.wrap(s, max_em).len()
    }
}

/// Humanist sans-serif metrics used by every preview style.
pub static SANS: TextMetrics = TextMetrics {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    fallback_width: 1.0,
    space_width: 0.25,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(SANS.measure(""), 0.0);
    }

    #[test]
    fn test_measure_known_word() {
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00
        let width = SANS.measure("Rust");
        assert!((width - 2.00).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_cjk_falls_back_wide() {
        assert!((SANS.measure("简历") - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_whitespace_only_is_empty() {
        assert!(SANS.wrap("   ", 40.0).is_empty());
        assert!(SANS.wrap("", 40.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = SANS.wrap("Senior systems engineer", 40.0);
        assert_eq!(lines, vec!["Senior systems engineer"]);
    }

    #[test]
    fn test_wrap_splits_on_word_boundaries() {
        let text = "one two three four five six seven eight nine ten";
        let lines = SANS.wrap(text, 6.0);
        assert!(lines.len() > 1);
        // No word is ever broken apart and nothing is lost.
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
        for line in &lines[..lines.len() - 1] {
            assert!(SANS.measure(line) <= 6.0 + 1e-3);
        }
    }

    #[test]
    fn test_oversized_word_gets_own_line() {
        let lines = SANS.wrap("tiny absurdlylongunbreakableword tiny", 3.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "absurdlylongunbreakableword");
    }
}
