//! Text measurement utilities.
//!
//! The overlay never lays out real glyphs; tooltip boxes are sized from an
//! estimate based on font metrics, which is enough to place them on screen.

use crate::constants::{CHAR_WIDTH_FACTOR, TOOLTIP_FONT_SIZE, TOOLTIP_LINE_HEIGHT_FACTOR};
use crate::geometry::Size;

/// Metrics for a specific font/size combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Font size in pixels
    pub size: f32,
    /// Average character width as a ratio of font size
    pub char_width_ratio: f32,
    /// Line height as a ratio of font size
    pub line_height_ratio: f32,
}

impl TextMetrics {
    /// Metrics of the marker tooltip text.
    pub const TOOLTIP: TextMetrics = TextMetrics {
        size: TOOLTIP_FONT_SIZE,
        char_width_ratio: CHAR_WIDTH_FACTOR,
        line_height_ratio: TOOLTIP_LINE_HEIGHT_FACTOR,
    };

    /// Create metrics for a specific font size.
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Self::TOOLTIP
        }
    }

    /// Create metrics with custom ratios.
    pub fn custom(size: f32, char_width_ratio: f32, line_height_ratio: f32) -> Self {
        Self {
            size,
            char_width_ratio,
            line_height_ratio,
        }
    }

    /// Estimate the width of a single line of text.
    pub fn line_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * self.char_width_ratio
    }

    /// Get the line height.
    pub fn line_height(&self) -> f32 {
        self.size * self.line_height_ratio
    }

    /// Estimate dimensions for text wrapped at `max_width`.
    ///
    /// An empty string still occupies one line.
    pub fn measure_wrapped(&self, text: &str, max_width: f32) -> Size {
        let mut total_height: f32 = 0.0;
        let mut actual_width: f32 = 0.0;
        let mut line_count = 0usize;

        for line in text.lines() {
            line_count += 1;
            let line_w = self.line_width(line);
            if line_w <= max_width {
                actual_width = actual_width.max(line_w);
                total_height += self.line_height();
            } else {
                let wrapped = (line_w / max_width).ceil();
                actual_width = actual_width.max(max_width);
                total_height += wrapped * self.line_height();
            }
        }

        if line_count == 0 {
            total_height = self.line_height();
        }

        Size::new(actual_width, total_height)
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::TOOLTIP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_width() {
        let m = TextMetrics::new(10.0);
        // 5 chars * 10.0 * 0.6 = 30.0
        assert!((m.line_width("hello") - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_line_width_counts_chars_not_bytes() {
        let m = TextMetrics::new(10.0);
        assert!((m.line_width("余白を修正") - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_measure_wrapped_multiline() {
        let m = TextMetrics::new(10.0);
        let size = m.measure_wrapped("[1] div\nfix spacing", 1000.0);
        // "fix spacing" = 11 chars = 66.0
        assert!((size.width - 66.0).abs() < 0.01);
        assert!((size.height - 2.0 * m.line_height()).abs() < 0.01);
    }

    #[test]
    fn test_measure_wrapped_caps_width() {
        let m = TextMetrics::new(10.0);
        let long = "x".repeat(100); // 600px
        let size = m.measure_wrapped(&long, 220.0);
        assert_eq!(size.width, 220.0);
        assert!((size.height - 3.0 * m.line_height()).abs() < 0.01);
    }

    #[test]
    fn test_measure_wrapped_empty_is_one_line() {
        let m = TextMetrics::default();
        let size = m.measure_wrapped("", 220.0);
        assert_eq!(size.width, 0.0);
        assert!((size.height - m.line_height()).abs() < 0.01);
    }
}
