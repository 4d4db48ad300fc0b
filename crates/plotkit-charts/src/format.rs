//! Text metrics and text drawing bound to a font and color

use crate::canvas::{Canvas, CanvasScope, TextAlign, TextBaseline};

/// Used when a font string carries no pixel size
pub const DEFAULT_FONT_PX: f64 = 10.0;

/// Pixel size from a CSS font shorthand (`"bold 12px/1.4 sans-serif"` -> 12)
pub fn font_size_px(font: &str) -> Option<f64> {
    font.split_whitespace().find_map(|token| {
        let size = token.split('/').next()?;
        size.strip_suffix("px")?.parse().ok()
    })
}

/// Borrowed font and color for measuring and drawing labels
#[derive(Debug, Clone, Copy)]
pub struct Format<'a> {
    pub font: &'a str,
    pub color: &'a str,
}

impl<'a> Format<'a> {
    pub fn new(font: &'a str, color: &'a str) -> Self {
        Self { font, color }
    }

    /// Line height, taken as the font's pixel size
    pub fn text_height(&self) -> f64 {
        font_size_px(self.font).unwrap_or(DEFAULT_FONT_PX)
    }

    pub fn text_width(&self, canvas: &mut dyn Canvas, text: &str) -> f64 {
        let mut scope = CanvasScope::new(canvas);
        scope.set_font(self.font);
        scope.measure_text(text)
    }

    pub fn max_text_width<S: AsRef<str>>(&self, canvas: &mut dyn Canvas, texts: &[S]) -> f64 {
        let mut scope = CanvasScope::new(canvas);
        scope.set_font(self.font);
        texts
            .iter()
            .map(|t| scope.measure_text(t.as_ref()))
            .fold(0.0, f64::max)
    }

    pub fn draw_text(
        &self,
        canvas: &mut dyn Canvas,
        text: &str,
        x: f64,
        y: f64,
        align: TextAlign,
        baseline: TextBaseline,
    ) {
        let mut scope = CanvasScope::new(canvas);
        self.apply(&mut *scope, align, baseline);
        scope.fill_text(text, x, y);
    }

    /// Draw `text` anchored at (x, y) with its baseline rotated by `angle`
    pub fn draw_text_rotated(
        &self,
        canvas: &mut dyn Canvas,
        text: &str,
        x: f64,
        y: f64,
        angle: f64,
    ) {
        let mut scope = CanvasScope::new(canvas);
        scope.translate(x, y);
        scope.rotate(angle);
        self.apply(&mut *scope, TextAlign::Center, TextBaseline::Middle);
        scope.fill_text(text, 0.0, 0.0);
    }

    fn apply(&self, canvas: &mut dyn Canvas, align: TextAlign, baseline: TextBaseline) {
        canvas.set_font(self.font);
        canvas.set_fill_style(self.color);
        canvas.set_text_align(align);
        canvas.set_text_baseline(baseline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingCanvas;

    #[test]
    fn test_font_size_parsing() {
        assert_eq!(font_size_px("12px sans-serif"), Some(12.0));
        assert_eq!(font_size_px("bold 14.5px/1.2 Arial"), Some(14.5));
        assert_eq!(font_size_px("small-caps serif"), None);
    }

    #[test]
    fn test_metrics_use_own_font() {
        let mut canvas = RecordingCanvas::new();
        let format = Format::new("20px sans-serif", "#000");
        assert_eq!(format.text_height(), 20.0);
        assert_eq!(format.text_width(&mut canvas, "ab"), 2.0 * 20.0 * 0.6);
        assert_eq!(format.max_text_width(&mut canvas, &["a", "abc"]), 3.0 * 20.0 * 0.6);
        assert_eq!(canvas.depth(), 0);
    }

    #[test]
    fn test_draw_text_restores_state() {
        let mut canvas = RecordingCanvas::new();
        let format = Format::new("12px serif", "#123456");
        format.draw_text(&mut canvas, "hi", 5.0, 6.0, TextAlign::Right, TextBaseline::Top);
        format.draw_text_rotated(&mut canvas, "up", 10.0, 10.0, -std::f64::consts::FRAC_PI_2);

        let texts = canvas.texts();
        assert_eq!(texts[0].color, "#123456");
        assert_eq!(texts[0].align, TextAlign::Right);
        assert_eq!((texts[1].x, texts[1].y), (10.0, 10.0));
        assert!((texts[1].angle + std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert_eq!(canvas.depth(), 0);
    }
}
