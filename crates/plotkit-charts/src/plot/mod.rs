//! Plots: series containers rendered against a pair of axes
//!
//! A [`Plot`] owns its series and options; rendering is selected by its
//! [`PlotType`] tag and implemented by one [`PlotRenderer`] per type.
//!
//! ## Modules
//!
//! - `bar` - Stacked or grouped columns per category
//! - `line` - Polylines with optional area fill and markers
//! - `scatter` - One marker per data point

pub mod bar;
pub mod line;
pub mod scatter;

pub use bar::BarRenderer;
pub use line::LineRenderer;
pub use scatter::ScatterRenderer;

use crate::axis::{Axis, AxisSet};
use crate::canvas::Canvas;
use indexmap::IndexMap;
use plotkit_core::{Key, PlotConfig, Result, Series, SeriesStyle, Shape};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::PI;

/// Marker size when neither series nor plot sets `shapeSize`
pub const DEFAULT_SHAPE_SIZE: f64 = 6.0;

/// Stroke width when neither series nor plot sets `lineWidth`
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    Bar,
    Line,
    Scatter,
}

impl PlotType {
    /// Drawing order: bars underneath, markers on top
    pub const ALL: [PlotType; 3] = [PlotType::Bar, PlotType::Line, PlotType::Scatter];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Scatter => "scatter",
        }
    }

    pub fn default_discrete(&self) -> bool {
        matches!(self, Self::Bar)
    }

    pub fn default_stacked(&self) -> bool {
        !matches!(self, Self::Scatter)
    }

    pub fn renderer(&self) -> &'static dyn PlotRenderer {
        match self {
            Self::Bar => &BarRenderer,
            Self::Line => &LineRenderer,
            Self::Scatter => &ScatterRenderer,
        }
    }
}

/// Data extent of a plot. X uses numeric keys, or the key index for
/// category keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Smallest strictly positive X, `INFINITY` when there is none.
    /// Log axes take their lower bound from it.
    pub min_positive_x: f64,
    pub min_positive_y: f64,
}

fn positive_or_infinite(value: f64) -> f64 {
    if value > 0.0 { value } else { f64::INFINITY }
}

impl BoundingBox {
    /// Extent whose positive minima are the lower bounds, when positive
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_positive_x: positive_or_infinite(min_x),
            min_positive_y: positive_or_infinite(min_y),
        }
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, x, y, y)
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
            min_positive_x: self.min_positive_x.min(other.min_positive_x),
            min_positive_y: self.min_positive_y.min(other.min_positive_y),
        }
    }
}

/// Vertical extent of one data point after stacking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedPoint {
    pub base: f64,
    pub top: f64,
}

// ============================================================================
// PLOT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    plot_type: PlotType,
    pub config: PlotConfig,
    pub series: Vec<Series>,
}

impl Plot {
    pub fn new(plot_type: PlotType) -> Self {
        Self {
            plot_type,
            config: PlotConfig::default(),
            series: Vec::new(),
        }
    }

    pub fn bar() -> Self {
        Self::new(PlotType::Bar)
    }

    pub fn line() -> Self {
        Self::new(PlotType::Line)
    }

    pub fn scatter() -> Self {
        Self::new(PlotType::Scatter)
    }

    pub fn with_config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn plot_type(&self) -> PlotType {
        self.plot_type
    }

    pub fn is_discrete(&self) -> bool {
        self.config.discrete.unwrap_or(self.plot_type.default_discrete())
    }

    pub fn is_stacked(&self) -> bool {
        self.config.stacked.unwrap_or(self.plot_type.default_stacked())
    }

    pub fn is_visible(&self) -> bool {
        self.config.visible
    }

    /// Append a series, returning its index
    pub fn add_series(&mut self, series: Series) -> usize {
        self.series.push(series);
        self.series.len() - 1
    }

    /// Set a plot option. Style options (`color`, `shape`, ...) become the
    /// default for every series that does not set its own.
    pub fn set(&mut self, option: &str, value: Value) -> Result<()> {
        self.config.set(option, value)
    }

    pub fn get(&self, option: &str) -> Result<Value> {
        self.config.get(option)
    }

    /// Effective style of series `index`: its own options over the plot's,
    /// then the palette color assigned at draw time
    pub fn series_style(&self, index: usize) -> SeriesStyle {
        match self.series.get(index) {
            Some(series) => {
                let mut style = series.style.or(&self.config.style);
                if style.color.is_none() {
                    style.color = series.assigned_color.clone();
                }
                style
            }
            None => self.config.style.clone(),
        }
    }

    /// Category names in first-series order
    pub fn categories(&self) -> Vec<String> {
        self.series
            .first()
            .map(|s| s.keys().map(|k| k.to_string()).collect())
            .unwrap_or_default()
    }

    /// Number of X positions, the longest series' length
    pub fn key_count(&self) -> usize {
        self.series.iter().map(Series::len).max().unwrap_or(0)
    }

    fn x_value(index: usize, key: &Key) -> f64 {
        key.as_number().unwrap_or(index as f64)
    }

    /// Data extent over every series, using stacked tops when stacking.
    /// `None` when the plot has no data points.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let stacked = self.stack();
        self.series
            .iter()
            .zip(&stacked)
            .flat_map(|(series, points)| {
                series.data.iter().zip(points).enumerate().map(|(i, (point, stacked))| {
                    let x = Self::x_value(i, point.key());
                    BoundingBox::point(x, stacked.top)
                })
            })
            .reduce(|acc, b| acc.union(&b))
    }

    /// Base and top of every data point. Stacked plots accumulate values
    /// per key in series order; unstacked points rest on zero.
    pub fn stack(&self) -> Vec<Vec<StackedPoint>> {
        let stacked = self.is_stacked();
        let mut totals: IndexMap<String, f64> = IndexMap::new();
        let mut result = Vec::with_capacity(self.series.len());

        for series in &self.series {
            let mut points = Vec::with_capacity(series.len());
            for point in &series.data {
                if stacked {
                    let total = totals.entry(point.key().to_string()).or_insert(0.0);
                    let base = *total;
                    *total += point.value();
                    points.push(StackedPoint { base, top: *total });
                } else {
                    points.push(StackedPoint { base: 0.0, top: point.value() });
                }
            }
            result.push(points);
        }
        result
    }

    /// Stacked top of every data point, per series
    pub fn stack_series(&self) -> Vec<Vec<f64>> {
        self.stack()
            .into_iter()
            .map(|points| points.into_iter().map(|p| p.top).collect())
            .collect()
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Everything a renderer needs, with the canvas already in the plot frame:
/// x runs along `x_axis`, y runs away from it into the plot area.
pub struct PlotContext<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub axes: &'a AxisSet,
    pub x_axis: &'a Axis,
    pub bar_spacer: f64,
}

impl<'a> PlotContext<'a> {
    /// The Y axis `plot` is drawn against
    pub fn y_axis(&self, plot: &Plot) -> Result<&'a Axis> {
        self.axes.require(plot.config.y_side)
    }
}

/// Strategy trait for drawing one plot type
pub trait PlotRenderer {
    fn draw(&self, plot: &Plot, ctx: &mut PlotContext<'_>) -> Result<()>;

    /// Draw a group of same-type plots sharing `ctx.x_axis`
    fn draw_plots(&self, plots: &[&Plot], ctx: &mut PlotContext<'_>) -> Result<()> {
        for plot in plots {
            self.draw(plot, ctx)?;
        }
        Ok(())
    }
}

/// Group plots by type in drawing order, keeping input order within a group
pub fn sort_plots_by_type<'p>(plots: &[&'p Plot]) -> IndexMap<PlotType, Vec<&'p Plot>> {
    let mut groups: IndexMap<PlotType, Vec<&Plot>> =
        PlotType::ALL.iter().map(|t| (*t, Vec::new())).collect();
    for plot in plots {
        groups.entry(plot.plot_type()).or_default().push(*plot);
    }
    groups.retain(|_, group| !group.is_empty());
    groups
}

/// Fill (or, for `Cross`, stroke) a marker of `size` pixels centered on
/// (x, y) with the current styles
pub fn draw_shape(canvas: &mut dyn Canvas, shape: Shape, x: f64, y: f64, size: f64) {
    let r = size / 2.0;
    canvas.begin_path();
    match shape {
        Shape::Circle => canvas.arc(x, y, r, 0.0, 2.0 * PI),
        Shape::Square => canvas.rect(x - r, y - r, size, size),
        Shape::Diamond => {
            canvas.move_to(x, y - r);
            canvas.line_to(x + r, y);
            canvas.line_to(x, y + r);
            canvas.line_to(x - r, y);
        }
        Shape::Triangle => {
            canvas.move_to(x, y + r);
            canvas.line_to(x + r, y - r);
            canvas.line_to(x - r, y - r);
        }
        Shape::Cross => {
            canvas.move_to(x - r, y - r);
            canvas.line_to(x + r, y + r);
            canvas.move_to(x - r, y + r);
            canvas.line_to(x + r, y - r);
            canvas.stroke();
            return;
        }
    }
    canvas.close_path();
    canvas.fill();
}

/// [`draw_shape`] by shape name; unknown names are an error
pub fn draw_named_shape(canvas: &mut dyn Canvas, name: &str, x: f64, y: f64, size: f64) -> Result<()> {
    let shape: Shape = name.parse()?;
    draw_shape(canvas, shape, x, y, size);
    Ok(())
}
