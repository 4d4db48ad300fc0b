//! Chart orchestration
//!
//! [`Chart::draw`] rebuilds everything from the registered plots and the
//! configuration on every call:
//!
//! 1. resolve the canvas size
//! 2. clear, fill the background and draw the outer border
//! 3. resolve one axis per occupied side
//! 4. assign palette colors to series without one
//! 5. negotiate section bands and the plot area
//! 6. draw the plot border, size the axes, render the sections
//! 7. draw the plots, grouped per X axis and plot type
//!
//! The resulting geometry stays inspectable through [`Chart::layout`].

use crate::axis::{Axis, AxisSet};
use crate::canvas::{Canvas, CanvasElement, CanvasScope, Document};
use crate::geometry::{Frame, Insets, Rect};
use crate::legend::Legend;
use crate::plot::{Plot, PlotContext, sort_plots_by_type};
use crate::section::{Scene, Section};
use crate::ticks::Ticks;
use crate::title::Title;
use plotkit_core::{AxisKind, ChartConfig, ChartError, Palette, PlotId, Result, Side};
use serde_json::Value;

/// Canvas size when neither the config nor the element gives one
pub const DEFAULT_WIDTH: f64 = 300.0;
pub const DEFAULT_HEIGHT: f64 = 150.0;

/// Share of the inner canvas a side gets when none of its sections needs room
const EMPTY_SIDE_SHARE: f64 = 0.05;

/// Which sides carry axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLayout {
    /// Every visible plot uses the bottom X axis and the left Y axis
    TwoAxis,
    /// At least one plot puts an axis on another side
    FourSides,
}

/// Where one section was rendered, in canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBand {
    pub side: Side,
    pub section: &'static str,
    pub rect: Rect,
}

/// Geometry and axes of the last draw
#[derive(Debug, Clone)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// Canvas minus the outer border
    pub inner: Rect,
    pub plot_area: Rect,
    /// Total band thickness per side
    pub sizes: Insets,
    pub axes: AxisSet,
    pub axis_layout: AxisLayout,
    pub bands: Vec<SectionBand>,
}

type SideSections = [Vec<Box<dyn Section>>; 4];

// ============================================================================
// COLORS
// ============================================================================

/// Give every visible series without a color of its own or from its plot
/// the first palette color not in use. Assigned colors are kept apart from
/// the series style, so a plot color set later still reaches the series.
/// Returns the palette with the colors now in use moved to the end.
pub fn set_colors<'a>(plots: impl IntoIterator<Item = &'a mut Plot>, palette: Palette) -> Palette {
    let mut visible: Vec<&mut Plot> = plots.into_iter().filter(|p| p.is_visible()).collect();

    let used: Vec<String> = visible
        .iter()
        .flat_map(|plot| (0..plot.series.len()).filter_map(move |i| plot.series_style(i).color))
        .collect();

    let slots = visible
        .iter_mut()
        .filter(|plot| plot.config.style.color.is_none())
        .flat_map(|plot| {
            plot.series
                .iter_mut()
                .filter(|series| series.style.color.is_none())
                .map(|series| &mut series.assigned_color)
        });

    palette.assign(&used, slots)
}

/// Effective colors of every series in `plot`
fn plot_colors(plot: &Plot) -> Vec<String> {
    (0..plot.series.len()).filter_map(|i| plot.series_style(i).color).collect()
}

// ============================================================================
// CHART
// ============================================================================

pub struct Chart<E: CanvasElement> {
    element: E,
    config: ChartConfig,
    ids: Vec<PlotId>,
    plots: Vec<Plot>,
    palette: Palette,
    next_id: u64,
    layout: Option<Layout>,
}

impl<E: CanvasElement> Chart<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            config: ChartConfig::default(),
            ids: Vec::new(),
            plots: Vec::new(),
            palette: Palette::default(),
            next_id: 0,
            layout: None,
        }
    }

    /// Chart on the canvas element with the given id
    pub fn from_document<D>(document: &D, id: &str) -> Result<Self>
    where
        D: Document<Element = E>,
    {
        document
            .canvas_by_id(id)
            .map(Self::new)
            .ok_or_else(|| ChartError::CanvasNotFound(id.to_string()))
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ChartConfig {
        &mut self.config
    }

    /// Set an option by flat key, see [`ChartConfig::set`]
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.config.set(name, value)
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        self.config.get(name)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn add_plot(&mut self, plot: Plot) -> PlotId {
        let id = PlotId(self.next_id);
        self.next_id += 1;
        tracing::debug!(plot = %id, kind = plot.plot_type().name(), "plot added");
        self.ids.push(id);
        self.plots.push(plot);
        id
    }

    /// Remove a plot and move its colors to the end of the palette
    pub fn remove_plot(&mut self, id: PlotId) -> Result<Plot> {
        let index = self.index_of(id).ok_or(ChartError::PlotNotFound(id))?;
        self.ids.remove(index);
        let plot = self.plots.remove(index);

        let palette = std::mem::take(&mut self.palette);
        self.palette = palette.recycle(&plot_colors(&plot));
        tracing::debug!(plot = %id, "plot removed");
        Ok(plot)
    }

    pub fn plot(&self, id: PlotId) -> Option<&Plot> {
        self.index_of(id).map(|i| &self.plots[i])
    }

    pub fn plot_mut(&mut self, id: PlotId) -> Option<&mut Plot> {
        self.index_of(id).map(|i| &mut self.plots[i])
    }

    pub fn plots(&self) -> impl Iterator<Item = (PlotId, &Plot)> {
        self.ids.iter().copied().zip(&self.plots)
    }

    /// Geometry of the last successful draw
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    fn index_of(&self, id: PlotId) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    /// Size from the config, written back to the element, or else from the
    /// element's attributes
    fn resolve_sizes(&mut self) -> (f64, f64) {
        let mut resolve = |name: &str, configured: Option<f64>, fallback: f64| match configured {
            Some(value) => {
                self.element.set_attribute(name, &value.to_string());
                value
            }
            None => self
                .element
                .attribute(name)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| *v > 0.0)
                .unwrap_or(fallback),
        };
        let width = resolve("width", self.config.width, DEFAULT_WIDTH);
        let height = resolve("height", self.config.height, DEFAULT_HEIGHT);
        (width, height)
    }

    /// Render the whole chart. Configuration errors surface before anything
    /// is drawn.
    pub fn draw(&mut self) -> Result<()> {
        let (width, height) = self.resolve_sizes();
        tracing::debug!(width, height, "canvas size resolved");

        let (mut axes, axis_layout) = resolve_axes(&self.config, &self.plots)?;
        tracing::debug!(axes = axes.iter().count(), layout = ?axis_layout, "axes resolved");

        let palette = std::mem::take(&mut self.palette);
        self.palette = set_colors(self.plots.iter_mut(), palette);
        tracing::debug!(palette = ?self.palette.colors(), "colors assigned");

        let canvas = self.element.context();
        canvas.clear_rect(0.0, 0.0, width, height);
        let inner = draw_border(canvas, &self.config, width, height);

        let sections = register_layout(&self.config, &axes);
        let scene = Scene { config: &self.config, axes: &axes, plots: &self.plots };
        let (sizes, section_sizes) = calculate_chart_size(canvas, &sections, &scene, &inner);
        let plot_area = inner.inset(&sizes);
        tracing::debug!(?plot_area, ?sizes, "layout negotiated");

        draw_plot_border(canvas, &self.config, &plot_area);
        fix_axis_sizes(&mut axes, &plot_area);

        let scene = Scene { config: &self.config, axes: &axes, plots: &self.plots };
        let bands = render_sections(canvas, &sections, &section_sizes, &scene, &plot_area)?;
        draw_plots(canvas, &axes, &self.plots, &plot_area, self.config.bar_spacer)?;

        self.layout = Some(Layout {
            width,
            height,
            inner,
            plot_area,
            sizes,
            axes,
            axis_layout,
            bands,
        });
        Ok(())
    }
}

// ============================================================================
// DRAW STEPS
// ============================================================================

/// Background and outer border. Returns the canvas area inside the border.
fn draw_border(canvas: &mut dyn Canvas, config: &ChartConfig, width: f64, height: f64) -> Rect {
    let mut scope = CanvasScope::new(canvas);
    if let Some(background) = &config.background {
        scope.set_fill_style(background);
        scope.fill_rect(0.0, 0.0, width, height);
    }

    let bw = config.border_width.max(0.0);
    if bw > 0.0 {
        scope.set_stroke_style(&config.border_color);
        scope.set_line_width(bw);
        scope.stroke_rect(bw / 2.0, bw / 2.0, width - bw, height - bw);
    }
    Rect::new(bw, bw, (width - 2.0 * bw).max(0.0), (height - 2.0 * bw).max(0.0))
}

/// One axis per side used by a visible plot, with every plot folded in.
/// Plots on the default bottom/left pair keep the chart in two-axis mode.
fn resolve_axes(config: &ChartConfig, plots: &[Plot]) -> Result<(AxisSet, AxisLayout)> {
    let mut axes = AxisSet::default();
    let mut layout = AxisLayout::TwoAxis;

    for (index, plot) in plots.iter().enumerate().filter(|(_, p)| p.is_visible()) {
        let (x, y) = (plot.config.x_side, plot.config.y_side);
        if !x.is_perpendicular_to(y) {
            return Err(ChartError::ParallelAxes { x, y });
        }
        if (x, y) != (Side::Bottom, Side::Left) {
            layout = AxisLayout::FourSides;
        }

        for (side, kind, companion) in [(x, AxisKind::X, y), (y, AxisKind::Y, x)] {
            match axes.get(side).map(Axis::kind) {
                Some(existing) if existing != kind => {
                    return Err(ChartError::AxisRoleConflict { side });
                }
                Some(_) => {}
                None => axes.insert(Axis::new(side, kind, companion, config.axis(side).clone())),
            }
            axes.get_mut(side).ok_or(ChartError::MissingAxis(side))?.add_plot(index, plot)?;
        }
    }

    for axis in axes.iter_mut() {
        axis.fix_values();
    }
    Ok((axes, layout))
}

/// Sections per side, ordered from the plot area outward
fn register_layout(config: &ChartConfig, axes: &AxisSet) -> SideSections {
    let mut sections: SideSections = Default::default();
    for side in Side::ALL {
        let list = &mut sections[side.index()];
        if axes.get(side).is_some() {
            list.push(Box::new(Ticks::new(side)));
            list.push(Box::new(Title::axis(side)));
        }
        if config.legend.show && config.legend.side == side {
            list.push(Box::new(Legend::new(side)));
        }
        if side == Side::Top {
            list.push(Box::new(Title::chart()));
        }
    }
    sections
}

/// Ask every section for its size. A side whose sections need nothing
/// still gets a small share of the inner canvas as padding.
fn calculate_chart_size(
    canvas: &mut dyn Canvas,
    sections: &SideSections,
    scene: &Scene<'_>,
    inner: &Rect,
) -> (Insets, [Vec<f64>; 4]) {
    let mut sizes = Insets::default();
    let mut section_sizes: [Vec<f64>; 4] = Default::default();

    for side in Side::ALL {
        let required: Vec<f64> = sections[side.index()]
            .iter()
            .map(|section| section.size_required(canvas, scene).max(0.0))
            .collect();
        let total: f64 = required.iter().sum();
        let total = if total > 0.0 {
            total
        } else {
            EMPTY_SIDE_SHARE * inner.length_across(side)
        };
        sizes.set(side, total);
        section_sizes[side.index()] = required;
    }
    (sizes, section_sizes)
}

fn draw_plot_border(canvas: &mut dyn Canvas, config: &ChartConfig, plot_area: &Rect) {
    if config.plot_border_width <= 0.0 {
        return;
    }
    let mut scope = CanvasScope::new(canvas);
    scope.set_stroke_style(&config.plot_border_color);
    scope.set_line_width(config.plot_border_width);
    scope.stroke_rect(plot_area.x, plot_area.y, plot_area.width, plot_area.height);
}

/// Length along and across each axis, from the plot area
fn fix_axis_sizes(axes: &mut AxisSet, plot_area: &Rect) {
    for axis in axes.iter_mut() {
        let side = axis.side();
        axis.set_sizes(plot_area.length_along(side), plot_area.length_across(side));
    }
}

/// Render each section translated to its band, stacking bands outward
fn render_sections(
    canvas: &mut dyn Canvas,
    sections: &SideSections,
    section_sizes: &[Vec<f64>; 4],
    scene: &Scene<'_>,
    plot_area: &Rect,
) -> Result<Vec<SectionBand>> {
    let mut bands = Vec::new();
    for side in Side::ALL {
        let mut offset = 0.0;
        for (section, &size) in sections[side.index()].iter().zip(&section_sizes[side.index()]) {
            if size <= 0.0 {
                continue;
            }
            let band = plot_area.band(side, offset, size);
            offset += size;

            let mut scope = CanvasScope::new(&mut *canvas);
            scope.translate(band.x, band.y);
            let local_band = Rect::new(0.0, 0.0, band.width, band.height);
            let local_plot = plot_area.translated(-band.x, -band.y);
            section.render(&mut *scope, scene, &local_band, &local_plot)?;

            bands.push(SectionBand { side, section: section.name(), rect: band });
        }
    }
    Ok(bands)
}

/// For each X axis, draw its plots in that axis' plot frame, one type
/// group at a time
fn draw_plots(
    canvas: &mut dyn Canvas,
    axes: &AxisSet,
    plots: &[Plot],
    plot_area: &Rect,
    bar_spacer: f64,
) -> Result<()> {
    for x_axis in axes.x_axes() {
        let members: Vec<&Plot> = x_axis.plots().iter().filter_map(|&i| plots.get(i)).collect();
        if members.is_empty() {
            continue;
        }

        let frame = Frame::for_plot(x_axis.side(), x_axis.companion(), plot_area);
        let m = frame.matrix();
        let mut scope = CanvasScope::new(&mut *canvas);
        scope.transform(m.a, m.b, m.c, m.d, m.e, m.f);

        for (plot_type, group) in sort_plots_by_type(&members) {
            tracing::trace!(side = %x_axis.side(), kind = plot_type.name(), plots = group.len(), "drawing plots");
            let mut ctx = PlotContext {
                canvas: &mut *scope,
                axes,
                x_axis,
                bar_spacer,
            };
            plot_type.renderer().draw_plots(&group, &mut ctx)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawOp, MemoryDocument, MemoryElement};
    use plotkit_core::{PlotConfig, Series, TickPolicy, colors};
    use std::collections::HashSet;

    fn chart() -> Chart<MemoryElement> {
        Chart::new(MemoryElement::with_size(400.0, 300.0))
    }

    fn bars() -> Plot {
        Plot::bar()
            .with_series(Series::from_pairs([("a", 10.0), ("b", 20.0)]).named("first"))
            .with_series(Series::from_pairs([("a", 5.0), ("b", 5.0)]).named("second"))
    }

    #[test]
    fn test_from_document() {
        let mut document = MemoryDocument::new();
        document.insert("sales", MemoryElement::with_size(200.0, 100.0));

        assert!(Chart::from_document(&document, "sales").is_ok());
        assert!(matches!(
            Chart::from_document(&document, "missing"),
            Err(ChartError::CanvasNotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn test_remove_plot() {
        let mut chart = chart();
        let id = chart.add_plot(bars());
        let other = chart.add_plot(Plot::line());

        assert_eq!(chart.remove_plot(id).unwrap().series.len(), 2);
        assert!(matches!(chart.remove_plot(id), Err(ChartError::PlotNotFound(p)) if p == id));
        assert!(chart.plot(other).is_some());
        assert_eq!(chart.plots().count(), 1);
    }

    #[test]
    fn test_set_colors_distinct_and_preserving() {
        let mut plots = vec![
            Plot::bar()
                .with_series(Series::from_values(&[1.0]))
                .with_series(Series::from_values(&[1.0]).with_color("#ef4444")),
            Plot::line().with_series(Series::from_values(&[1.0])),
        ];
        let palette = set_colors(plots.iter_mut(), Palette::default());

        let colors: Vec<String> = plots.iter().flat_map(plot_colors).collect();
        assert_eq!(colors[1], "#ef4444");
        assert_eq!(colors.iter().collect::<HashSet<_>>().len(), 3);
        assert!(!colors[0].eq_ignore_ascii_case("#ef4444"));

        // In-use colors are handed out last next time
        let tail = &palette.colors()[palette.len() - 3..];
        assert!(colors.iter().all(|c| tail.contains(c)));
    }

    #[test]
    fn test_set_colors_skips_hidden_and_plot_colored() {
        let mut hidden = Plot::line().with_series(Series::from_values(&[1.0]));
        hidden.config.visible = false;
        let mut tinted = Plot::scatter().with_series(Series::from_values(&[1.0]));
        tinted.config.style.color = Some("#abcdef".to_string());

        let mut plots = vec![hidden, tinted];
        set_colors(plots.iter_mut(), Palette::default());

        assert_eq!(plots[0].series[0].assigned_color, None);
        assert_eq!(plots[1].series[0].assigned_color, None);
        assert_eq!(plots[1].series_style(0).color.as_deref(), Some("#abcdef"));
    }

    #[test]
    fn test_exhausted_palette_cycles() {
        let mut plots = vec![Plot::scatter()
            .with_series(Series::from_values(&[1.0]))
            .with_series(Series::from_values(&[1.0]))
            .with_series(Series::from_values(&[1.0]))];
        let palette = Palette::new(vec!["red".to_string(), "blue".to_string()]);
        set_colors(plots.iter_mut(), palette);

        let colors = plot_colors(&plots[0]);
        assert_eq!(&colors[..2], ["red", "blue"]);
        assert_eq!(colors[2], "red");
    }

    #[test]
    fn test_removed_colors_are_recycled_last() {
        let mut chart = chart();
        let first = chart.add_plot(Plot::line().with_series(Series::from_values(&[1.0])));
        chart.add_plot(Plot::line().with_series(Series::from_values(&[2.0])));
        chart.draw().unwrap();

        let removed_color = chart.plot(first).and_then(|p| p.series_style(0).color).unwrap();
        chart.remove_plot(first).unwrap();
        assert_eq!(chart.palette().colors().last(), Some(&removed_color));

        chart.add_plot(Plot::line().with_series(Series::from_values(&[3.0])));
        chart.draw().unwrap();
        let colors: Vec<String> = chart.plots().flat_map(|(_, p)| plot_colors(p)).collect();
        assert!(!colors.contains(&removed_color));
    }

    #[test]
    fn test_plot_color_reaches_auto_colored_series() {
        let mut chart = chart();
        let id = chart.add_plot(
            Plot::line()
                .with_series(Series::from_values(&[1.0]))
                .with_series(Series::from_values(&[2.0]).with_color("#ff0000")),
        );
        chart.draw().unwrap();
        let plot = chart.plot(id).unwrap();
        assert_eq!(plot.series_style(0).color.as_deref(), Some(colors::PALETTE[0]));
        assert_eq!(plot.series[0].style.color, None);

        chart.plot_mut(id).unwrap().set("color", Value::from("#000000")).unwrap();
        chart.draw().unwrap();
        let plot = chart.plot(id).unwrap();
        assert_eq!(plot.series_style(0).color.as_deref(), Some("#000000"));
        assert_eq!(plot.series_style(1).color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_draw_balances_save_restore() {
        let mut chart = chart();
        chart.config_mut().title = Some("Sales".to_string());
        chart.config_mut().border_width = 2.0;
        chart.add_plot(bars());
        chart.add_plot(
            Plot::line()
                .with_config(PlotConfig { discrete: Some(true), ..Default::default() })
                .with_series(Series::from_pairs([("a", 3.0), ("b", 4.0)])),
        );
        chart.draw().unwrap();

        assert_eq!(chart.element().canvas.depth(), 0);
        assert!(chart.element().canvas.text_strings().contains(&"Sales"));
    }

    #[test]
    fn test_empty_chart_renders() {
        let mut chart = chart();
        chart.draw().unwrap();

        let layout = chart.layout().unwrap();
        assert!(layout.axes.is_empty());
        assert_eq!(layout.axis_layout, AxisLayout::TwoAxis);
        // Every side falls back to 5% padding
        assert_eq!(layout.plot_area, Rect::new(20.0, 15.0, 360.0, 270.0));

        let ops = chart.element().canvas.ops();
        assert!(matches!(ops[0], DrawOp::ClearRect { .. }));
        assert!(ops.iter().any(|op| matches!(op, DrawOp::StrokeRect { rect, .. } if *rect == layout.plot_area)));
    }

    #[test]
    fn test_sizes_from_config_and_attributes() {
        let mut chart = Chart::new(MemoryElement::new());
        chart.draw().unwrap();
        assert_eq!(chart.layout().map(|l| (l.width, l.height)), Some((DEFAULT_WIDTH, DEFAULT_HEIGHT)));

        chart.set("width", Value::from(640)).unwrap();
        chart.draw().unwrap();
        assert_eq!(chart.layout().map(|l| l.width), Some(640.0));
        assert_eq!(chart.element().attribute("width").as_deref(), Some("640"));
    }

    #[test]
    fn test_border_shrinks_inner_area() {
        let mut chart = chart();
        chart.set("borderWidth", Value::from(4)).unwrap();
        chart.draw().unwrap();
        assert_eq!(chart.layout().unwrap().inner, Rect::new(4.0, 4.0, 392.0, 292.0));
    }

    #[test]
    fn test_layout_bands() {
        let mut chart = chart();
        chart.set("title", Value::from("Quarterly")).unwrap();
        chart.set("yAxisTitle", Value::from("Units")).unwrap();
        chart.add_plot(bars());
        chart.draw().unwrap();

        let layout = chart.layout().unwrap();
        let names = |side: Side| -> Vec<&str> {
            layout.bands.iter().filter(|b| b.side == side).map(|b| b.section).collect()
        };
        assert_eq!(names(Side::Left), vec!["ticks", "axis-title"]);
        assert_eq!(names(Side::Right), vec!["legend"]);
        assert_eq!(names(Side::Top), vec!["chart-title"]);
        assert_eq!(names(Side::Bottom), vec!["ticks"]);

        // Bands stack outward without gaps
        let left: Vec<&SectionBand> = layout.bands.iter().filter(|b| b.side == Side::Left).collect();
        assert!((left[0].rect.right() - layout.plot_area.x).abs() < 1e-9);
        assert!((left[1].rect.right() - left[0].rect.x).abs() < 1e-9);

        let bottom = layout.axes.get(Side::Bottom).unwrap();
        assert_eq!(bottom.size(), layout.plot_area.width);
        assert_eq!(bottom.p_size(), layout.plot_area.height);
    }

    #[test]
    fn test_flat_keys_reach_axis_configs() {
        let mut chart = chart();
        chart.set("xAxisTicks", Value::from(5)).unwrap();
        chart.set("legendShow", Value::from(false)).unwrap();
        assert_eq!(chart.config().bottom_axis.ticks, Some(TickPolicy::Every(5.0)));
        assert_eq!(chart.get("legendShow").unwrap(), Value::from(false));
        assert!(matches!(
            chart.set("xAxisBogus", Value::from(1)),
            Err(ChartError::UnknownOption(name)) if name == "xAxisBogus"
        ));
    }

    #[test]
    fn test_discreteness_mismatch_aborts_draw() {
        let mut chart = chart();
        chart.add_plot(bars());
        chart.add_plot(
            Plot::bar()
                .with_config(PlotConfig { discrete: Some(false), ..Default::default() })
                .with_series(Series::from_values(&[1.0])),
        );
        assert!(matches!(
            chart.draw(),
            Err(ChartError::DiscretenessMismatch { side: Side::Bottom })
        ));
        assert!(chart.element().canvas.ops().is_empty());
    }

    #[test]
    fn test_axis_side_errors() {
        let mut chart = chart();
        chart.add_plot(Plot::scatter().with_config(PlotConfig {
            x_side: Side::Bottom,
            y_side: Side::Top,
            ..Default::default()
        }));
        assert!(matches!(chart.draw(), Err(ChartError::ParallelAxes { .. })));

        let mut chart = self::chart();
        chart.add_plot(Plot::scatter());
        chart.add_plot(Plot::scatter().with_config(PlotConfig {
            x_side: Side::Left,
            y_side: Side::Bottom,
            ..Default::default()
        }));
        assert!(matches!(chart.draw(), Err(ChartError::AxisRoleConflict { .. })));
    }

    #[test]
    fn test_four_sides_layout() {
        let mut chart = chart();
        chart.add_plot(bars());
        chart.add_plot(
            Plot::line()
                .with_config(PlotConfig {
                    x_side: Side::Top,
                    y_side: Side::Right,
                    ..Default::default()
                })
                .with_series(Series::from_values(&[1.0, 2.0])),
        );
        chart.draw().unwrap();

        let layout = chart.layout().unwrap();
        assert_eq!(layout.axis_layout, AxisLayout::FourSides);
        assert_eq!(layout.axes.iter().count(), 4);
        assert_eq!(layout.axes.get(Side::Top).map(Axis::kind), Some(AxisKind::X));
        assert_eq!(layout.axes.get(Side::Right).map(Axis::companion), Some(Side::Top));
    }

    #[test]
    fn test_horizontal_bars() {
        let mut chart = chart();
        chart.config_mut().legend.show = false;
        chart.add_plot(
            Plot::bar()
                .with_config(PlotConfig {
                    x_side: Side::Left,
                    y_side: Side::Bottom,
                    ..Default::default()
                })
                .with_series(Series::from_pairs([("only", 10.0)])),
        );
        chart.draw().unwrap();

        let area = chart.layout().unwrap().plot_area;
        let rects = chart.element().canvas.filled_rects();
        assert_eq!(rects.len(), 1);
        let bar = rects[0];
        // Grows rightward from the left edge across the full width
        assert!((bar.x - area.x).abs() < 1e-9);
        assert!((bar.width - area.width).abs() < 1e-9);
        assert!((bar.height - (area.height - 8.0)).abs() < 1e-9);
    }
}
