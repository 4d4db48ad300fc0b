//! # plotkit-charts
//!
//! Canvas charting: bar, line and scatter plots with axes, ticks, titles
//! and a legend, drawn through a 2D canvas abstraction.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Plot rendering (bar, line, scatter)
//! - Peripheral sections (ticks, titles, legend)
//! - Drawing backends (browser canvas, recording canvas)
//!
//! ## Modules
//!
//! - `axis` - Axis ranges, tick generation, value to pixel mapping
//! - `canvas` - Drawing surface traits and save/restore scoping
//! - `chart` - Layout negotiation and the draw pipeline
//! - `definition` - Whole charts from JSON documents
//! - `format` - Font metrics and text drawing
//! - `geometry` - Rects, insets and side-relative frames
//! - `legend` - Series legend section
//! - `path` - Path building for lines and areas
//! - `plot` - Plots, stacking and per-type renderers
//! - `recording` - In-memory canvas for tests and headless use
//! - `section` - The section trait shared by ticks, titles and legend
//! - `ticks` - Tick marks, grid lines and tick labels
//! - `title` - Chart and axis titles

pub mod axis;
pub mod canvas;
pub mod chart;
pub mod definition;
pub mod format;
pub mod geometry;
pub mod legend;
pub mod path;
pub mod plot;
pub mod recording;
pub mod section;
pub mod ticks;
pub mod title;

pub use axis::{Axis, AxisSet, generate_tick_marks};
pub use canvas::{Canvas, CanvasElement, CanvasScope, Document, TextAlign, TextBaseline};
pub use chart::{AxisLayout, Chart, Layout, SectionBand, set_colors};
pub use definition::{ChartDefinition, PlotDefinition};
pub use format::Format;
pub use geometry::{Frame, Insets, Matrix, Rect};
pub use plot::{Plot, PlotType};
pub use recording::{DrawOp, MemoryDocument, MemoryElement, RecordingCanvas};

pub use plotkit_core;
