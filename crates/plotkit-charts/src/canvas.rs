//! Drawing capability consumed by every chart component
//!
//! The chart never talks to a browser directly. Anything implementing
//! [`Canvas`] (the browser 2D context, the in-memory [`RecordingCanvas`])
//! can be drawn on.
//!
//! [`RecordingCanvas`]: crate::recording::RecordingCanvas

use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

// ============================================================================
// CANVAS
// ============================================================================

/// The 2D context operations the chart uses
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
    /// Multiply the current transform by `[a c e; b d f; 0 0 1]`
    fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_line_dash(&mut self, segments: &[f64]);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Width of `text` in the current font
    fn measure_text(&mut self, text: &str) -> f64;

    /// Stroke a single segment as its own path
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.begin_path();
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.stroke();
    }
}

/// Saves the canvas state on creation and restores it when dropped, so the
/// state is restored on every exit path including `?` returns.
pub struct CanvasScope<'a> {
    canvas: &'a mut dyn Canvas,
}

impl<'a> CanvasScope<'a> {
    pub fn new(canvas: &'a mut dyn Canvas) -> Self {
        canvas.save();
        Self { canvas }
    }
}

impl Drop for CanvasScope<'_> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

impl<'a> Deref for CanvasScope<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl<'a> DerefMut for CanvasScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

// ============================================================================
// HOST ELEMENTS
// ============================================================================

/// A canvas element: its drawing context plus its size attributes
pub trait CanvasElement {
    fn context(&mut self) -> &mut dyn Canvas;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&mut self, name: &str, value: &str);
}

/// Resolves element ids to canvas elements
pub trait Document {
    type Element: CanvasElement;

    fn canvas_by_id(&self, id: &str) -> Option<Self::Element>;
}
