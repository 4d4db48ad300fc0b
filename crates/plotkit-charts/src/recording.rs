//! In-memory canvas backend
//!
//! Records every draw call in device coordinates. It tracks the transform
//! and the save/restore stack like a browser context does, which makes it
//! usable as a headless backend and for asserting on rendered geometry.

use crate::canvas::{Canvas, CanvasElement, Document, TextAlign, TextBaseline};
use crate::format::font_size_px;
use crate::geometry::{Matrix, Rect};
use std::collections::HashMap;

/// Approximate glyph advance as a fraction of the font size
const GLYPH_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, color: String, alpha: f64 },
    StrokeRect { rect: Rect, color: String, width: f64 },
    ClearRect { rect: Rect },
    FillPath { points: Vec<(f64, f64)>, color: String, alpha: f64 },
    StrokePath { subpaths: Vec<Vec<(f64, f64)>>, color: String, width: f64, dashed: bool },
    Text(TextOp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: String,
    pub color: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Rotation of the text's x axis in canvas space, radians
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct State {
    matrix: Matrix,
    fill_style: String,
    stroke_style: String,
    line_width: f64,
    alpha: f64,
    dash: Vec<f64>,
    font: String,
    align: TextAlign,
    baseline: TextBaseline,
}

impl Default for State {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            fill_style: "#000000".to_string(),
            stroke_style: "#000000".to_string(),
            line_width: 1.0,
            alpha: 1.0,
            dash: Vec::new(),
            font: "10px sans-serif".to_string(),
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    state: State,
    stack: Vec<State>,
    path: Vec<Vec<(f64, f64)>>,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of unmatched `save` calls
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn transform_matrix(&self) -> Matrix {
        self.state.matrix
    }

    pub fn filled_rects(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&TextOp> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn text_strings(&self) -> Vec<&str> {
        self.texts().into_iter().map(|t| t.text.as_str()).collect()
    }

    pub fn strokes(&self) -> Vec<&Vec<Vec<(f64, f64)>>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokePath { subpaths, .. } => Some(subpaths),
                _ => None,
            })
            .collect()
    }

    fn device_rect(&self, x: f64, y: f64, width: f64, height: f64) -> Rect {
        let m = &self.state.matrix;
        let corners = [
            m.apply(x, y),
            m.apply(x + width, y),
            m.apply(x, y + height),
            m.apply(x + width, y + height),
        ];
        let min_x = corners.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    fn push_point(&mut self, x: f64, y: f64) {
        let point = self.state.matrix.apply(x, y);
        match self.path.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.path.push(vec![point]),
        }
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.state.matrix = self.state.matrix.multiply(&Matrix::translation(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.state.matrix = self.state.matrix.multiply(&Matrix::rotation(angle));
    }

    fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.state.matrix = self.state.matrix.multiply(&Matrix::new(a, b, c, d, e, f));
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let point = self.state.matrix.apply(x, y);
        self.path.push(vec![point]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_point(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        const SEGMENTS: usize = 12;
        for i in 0..=SEGMENTS {
            let angle = start + (end - start) * i as f64 / SEGMENTS as f64;
            self.push_point(x + radius * angle.cos(), y + radius * angle.sin());
        }
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.path.last_mut() {
            if let Some(&first) = subpath.first() {
                subpath.push(first);
            }
        }
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::FillPath {
            points: self.path.iter().flatten().copied().collect(),
            color: self.state.fill_style.clone(),
            alpha: self.state.alpha,
        });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::StrokePath {
            subpaths: self.path.clone(),
            color: self.state.stroke_style.clone(),
            width: self.state.line_width,
            dashed: !self.state.dash.is_empty(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = self.device_rect(x, y, width, height);
        self.ops.push(DrawOp::FillRect {
            rect,
            color: self.state.fill_style.clone(),
            alpha: self.state.alpha,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = self.device_rect(x, y, width, height);
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color: self.state.stroke_style.clone(),
            width: self.state.line_width,
        });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = self.device_rect(x, y, width, height);
        self.ops.push(DrawOp::ClearRect { rect });
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state.fill_style = color.to_string();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state.stroke_style = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha;
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.state.dash = segments.to_vec();
    }

    fn set_font(&mut self, font: &str) {
        self.state.font = font.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let m = self.state.matrix;
        let (dx, dy) = m.apply(x, y);
        self.ops.push(DrawOp::Text(TextOp {
            text: text.to_string(),
            x: dx,
            y: dy,
            font: self.state.font.clone(),
            color: self.state.fill_style.clone(),
            align: self.state.align,
            baseline: self.state.baseline,
            angle: m.b.atan2(m.a),
        }));
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        let size = font_size_px(&self.state.font).unwrap_or(10.0);
        text.chars().count() as f64 * size * GLYPH_WIDTH_RATIO
    }
}

// ============================================================================
// IN-MEMORY ELEMENTS
// ============================================================================

/// Canvas element backed by a [`RecordingCanvas`]
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    pub canvas: RecordingCanvas,
    attributes: HashMap<String, String>,
}

impl MemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(width: f64, height: f64) -> Self {
        let mut element = Self::new();
        element.set_attribute("width", &width.to_string());
        element.set_attribute("height", &height.to_string());
        element
    }
}

impl CanvasElement for MemoryElement {
    fn context(&mut self) -> &mut dyn Canvas {
        &mut self.canvas
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }
}

/// Id-to-element map standing in for a DOM document
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, MemoryElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, element: MemoryElement) {
        self.elements.insert(id.into(), element);
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn canvas_by_id(&self, id: &str) -> Option<MemoryElement> {
        self.elements.get(id).cloned()
    }
}
