//! # plotkit-web
//!
//! Browser bindings: the 2D context of an `HtmlCanvasElement` as a
//! plotkit [`Canvas`], element lookup by id, and a `drawChart` entry
//! point taking a JSON chart definition.

use plotkit_charts::{
    Canvas, CanvasElement, ChartDefinition, Document, TextAlign, TextBaseline,
};
use plotkit_core::ChartError;
use std::sync::Once;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

// ============================================================================
// LOGGING
// ============================================================================

/// Install the panic hook and the tracing subscriber, once
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();

        #[cfg(target_arch = "wasm32")]
        tracing_wasm::set_as_global_default();

        #[cfg(not(target_arch = "wasm32"))]
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init();
    });
}

fn warn_on_error(op: &'static str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!(op, error = ?err, "canvas call failed");
    }
}

fn to_js_error(err: ChartError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// CANVAS
// ============================================================================

/// A browser 2D rendering context
pub struct WebCanvas {
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Canvas for WebCanvas {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        warn_on_error("translate", self.ctx.translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        warn_on_error("rotate", self.ctx.rotate(angle));
    }

    fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        warn_on_error("transform", self.ctx.transform(a, b, c, d, e, f));
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        warn_on_error("arc", self.ctx.arc(x, y, radius, start, end));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        let segments: js_sys::Array = segments.iter().map(|s| JsValue::from_f64(*s)).collect();
        warn_on_error("setLineDash", self.ctx.set_line_dash(&segments));
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        warn_on_error("fillText", self.ctx.fill_text(text, x, y));
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(err) => {
                tracing::warn!(error = ?err, "measureText failed");
                0.0
            }
        }
    }
}

// ============================================================================
// ELEMENTS
// ============================================================================

pub struct WebElement {
    element: HtmlCanvasElement,
    canvas: WebCanvas,
}

impl WebElement {
    pub fn new(element: HtmlCanvasElement) -> Option<Self> {
        let ctx = element
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            element,
            canvas: WebCanvas::new(ctx),
        })
    }
}

impl CanvasElement for WebElement {
    fn context(&mut self) -> &mut dyn Canvas {
        &mut self.canvas
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        warn_on_error("setAttribute", self.element.set_attribute(name, value));
    }
}

/// The page document
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    /// The document of the current window
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn canvas_by_id(&self, id: &str) -> Option<WebElement> {
        let element = self
            .document
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        WebElement::new(element)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Draw the chart described by `definition` (JSON) on the canvas with id
/// `canvas_id`
#[wasm_bindgen(js_name = drawChart)]
pub fn draw_chart(canvas_id: &str, definition: &str) -> Result<(), JsValue> {
    init_logging();

    let document = WebDocument::current().ok_or_else(|| JsValue::from_str("no document"))?;
    let definition = ChartDefinition::from_json(definition).map_err(to_js_error)?;
    let element = document
        .canvas_by_id(canvas_id)
        .ok_or_else(|| to_js_error(ChartError::CanvasNotFound(canvas_id.to_string())))?;

    let mut chart = definition.build(element);
    chart.draw().map_err(to_js_error)?;
    tracing::info!(canvas = canvas_id, "chart drawn");
    Ok(())
}
