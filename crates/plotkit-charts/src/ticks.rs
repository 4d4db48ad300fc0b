//! Tick marks, grid lines and tick labels for one axis
//!
//! Marks and grid lines are drawn in the axis frame (see
//! [`Ticks::move_and_orient`]) so every side shares the bottom-axis code.
//! Labels are drawn upright at frame-mapped anchors.

use crate::axis::{Axis, AxisLabels};
use crate::canvas::{Canvas, CanvasScope, TextAlign, TextBaseline};
use crate::format::Format;
use crate::geometry::{Frame, Rect};
use crate::section::{Scene, Section};
use plotkit_core::{AxisConfig, Result, Side, TickSide};

/// Between the outer end of the tick marks and the labels
const LABEL_GAP: f64 = 3.0;

/// Beyond the labels, towards the next section
const LABEL_PADDING: f64 = 2.0;

const MINOR_GRID_DASH: [f64; 2] = [2.0, 2.0];

/// Most parts a major interval is split into
const MAX_MINOR_TICKS: u32 = 20;

/// Start and end of a mark of `length` on the local y axis, which points
/// away from the plot area
fn tick_span(side: TickSide, length: f64) -> (f64, f64) {
    match side {
        TickSide::Outside => (0.0, length),
        TickSide::Inside => (-length, 0.0),
        TickSide::Middle => (-length / 2.0, length / 2.0),
    }
}

fn label_anchor(side: Side) -> (TextAlign, TextBaseline) {
    match side {
        Side::Bottom => (TextAlign::Center, TextBaseline::Top),
        Side::Top => (TextAlign::Center, TextBaseline::Bottom),
        Side::Left => (TextAlign::Right, TextBaseline::Middle),
        Side::Right => (TextAlign::Left, TextBaseline::Middle),
    }
}

fn label_format(config: &AxisConfig) -> Format<'_> {
    Format::new(&config.label_font, &config.label_color)
}

/// Distance from the axis line to the label anchors
fn label_offset(config: &AxisConfig) -> f64 {
    tick_span(config.tick_side, config.tick_length).1.max(0.0) + LABEL_GAP
}

pub struct Ticks {
    side: Side,
}

impl Ticks {
    pub fn new(side: Side) -> Self {
        Self { side }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Transform the canvas so the axis can be drawn as a bottom axis: x
    /// runs along the axis away from its companion, y points away from the
    /// plot area. Returns the applied frame.
    pub fn move_and_orient(&self, canvas: &mut dyn Canvas, axis: &Axis, plot_area: &Rect) -> Frame {
        let frame = Frame::for_axis(self.side, axis.companion(), plot_area);
        let m = frame.matrix();
        canvas.transform(m.a, m.b, m.c, m.d, m.e, m.f);
        frame
    }

    fn draw_continuous_axis(&self, canvas: &mut dyn Canvas, axis: &Axis, plot_area: &Rect) {
        let config = &axis.config;
        let values: &[f64] = match axis.labels() {
            AxisLabels::Values(values) => values,
            AxisLabels::Categories(_) => &[],
        };
        let positions = axis.positions_of(values);
        let (from, to) = tick_span(config.tick_side, config.tick_length);

        let frame = {
            let mut scope = CanvasScope::new(&mut *canvas);
            let frame = self.move_and_orient(&mut *scope, axis, plot_area);
            scope.set_line_width(1.0);

            for (index, &pos) in positions.iter().enumerate() {
                // Explicit tick lists may reach past the axis range
                if pos < -0.5 || pos > axis.size() + 0.5 {
                    continue;
                }
                if config.major_grid && pos > 1.0 && pos < axis.size() - 1.0 {
                    scope.set_stroke_style(&config.grid_color);
                    scope.line(pos, 0.0, pos, -axis.p_size());
                }
                if config.minor_ticks > 1 {
                    self.draw_minor_ticks(&mut *scope, axis, &positions, index);
                }
                scope.set_stroke_style(&config.tick_color);
                scope.line(pos, from, pos, to);
            }
            frame
        };

        self.draw_labels(canvas, axis, &frame, &axis.label_strings(), &positions);
    }

    /// Split the interval after tick `index` into `minor_ticks` parts. The
    /// last tick reuses the spacing before it; sub-ticks past the axis end
    /// are dropped.
    fn draw_minor_ticks(&self, canvas: &mut dyn Canvas, axis: &Axis, positions: &[f64], index: usize) {
        let config = &axis.config;
        let pos = positions[index];
        let previous = index.checked_sub(1).and_then(|i| positions.get(i));
        let spacing = match (positions.get(index + 1), previous) {
            (Some(next), _) => next - pos,
            (None, Some(prev)) => pos - prev,
            (None, None) => return,
        };

        let parts = config.minor_ticks.min(MAX_MINOR_TICKS);
        let step = spacing / parts as f64;
        let (from, to) = tick_span(config.tick_side, config.minor_tick_length);
        for k in 1..parts {
            let p = pos + k as f64 * step;
            if p > axis.size() {
                break;
            }
            if config.minor_grid {
                let mut scope = CanvasScope::new(&mut *canvas);
                scope.set_stroke_style(&config.grid_color);
                scope.set_line_dash(&MINOR_GRID_DASH);
                scope.line(p, 0.0, p, -axis.p_size());
            }
            canvas.set_stroke_style(&config.tick_color);
            canvas.line(p, from, p, to);
        }
    }

    /// Grid lines on cell boundaries, labels centered in each cell
    fn draw_discrete_axis(&self, canvas: &mut dyn Canvas, axis: &Axis, plot_area: &Rect) {
        let config = &axis.config;
        let count = axis.labels().len();
        if count == 0 {
            return;
        }
        let cell = axis.size() / count as f64;
        let (from, to) = tick_span(config.tick_side, config.tick_length);

        let frame = {
            let mut scope = CanvasScope::new(&mut *canvas);
            let frame = self.move_and_orient(&mut *scope, axis, plot_area);
            scope.set_line_width(1.0);

            for k in 0..=count {
                let pos = k as f64 * cell;
                if config.major_grid && k > 0 && k < count {
                    scope.set_stroke_style(&config.grid_color);
                    scope.line(pos, 0.0, pos, -axis.p_size());
                }
                scope.set_stroke_style(&config.tick_color);
                scope.line(pos, from, pos, to);
            }
            frame
        };

        let centers: Vec<f64> = (0..count).map(|k| (k as f64 + 0.5) * cell).collect();
        self.draw_labels(canvas, axis, &frame, &axis.label_strings(), &centers);
    }

    fn draw_labels(
        &self,
        canvas: &mut dyn Canvas,
        axis: &Axis,
        frame: &Frame,
        labels: &[String],
        positions: &[f64],
    ) {
        if !axis.config.show_labels {
            return;
        }
        let format = label_format(&axis.config);
        let offset = label_offset(&axis.config);
        let (align, baseline) = label_anchor(self.side);

        for (label, &pos) in labels.iter().zip(positions) {
            if pos < -0.5 || pos > axis.size() + 0.5 {
                continue;
            }
            let (x, y) = frame.to_canvas(pos, offset);
            format.draw_text(canvas, label, x, y, align, baseline);
        }
    }
}

impl Section for Ticks {
    fn name(&self) -> &'static str {
        "ticks"
    }

    /// Outward tick length plus the label extent across the axis
    fn size_required(&self, canvas: &mut dyn Canvas, scene: &Scene<'_>) -> f64 {
        let Some(axis) = scene.axes.get(self.side) else {
            return 0.0;
        };
        let config = &axis.config;
        let tick = tick_span(config.tick_side, config.tick_length).1.max(0.0);
        if !config.show_labels || axis.labels().is_empty() {
            return tick;
        }

        let format = label_format(config);
        let extent = if self.side.is_horizontal() {
            format.text_height()
        } else {
            format.max_text_width(canvas, &axis.label_strings())
        };
        tick + LABEL_GAP + extent + LABEL_PADDING
    }

    fn render(&self, canvas: &mut dyn Canvas, scene: &Scene<'_>, _band: &Rect, plot_area: &Rect) -> Result<()> {
        let axis = scene.axes.require(self.side)?;
        tracing::trace!(side = %self.side, labels = axis.labels().len(), "drawing ticks");
        if axis.is_discrete() {
            self.draw_discrete_axis(canvas, axis, plot_area);
        } else {
            self.draw_continuous_axis(canvas, axis, plot_area);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisSet;
    use crate::plot::{BoundingBox, Plot};
    use crate::recording::RecordingCanvas;
    use plotkit_core::{AxisKind, ChartConfig, Series, TickPolicy};

    const AREA: Rect = Rect::new(50.0, 20.0, 200.0, 100.0);

    fn axis(side: Side, companion: Side, config: AxisConfig) -> Axis {
        let kind = if side.is_horizontal() { AxisKind::X } else { AxisKind::Y };
        let mut axis = Axis::new(side, kind, companion, config);
        axis.set_min_and_max(&BoundingBox::new(0.0, 10.0, 0.0, 10.0));
        axis.fix_values();
        axis.set_sizes(AREA.length_along(side), AREA.length_across(side));
        axis
    }

    fn every_five() -> AxisConfig {
        AxisConfig::default().with_ticks(TickPolicy::Every(5.0))
    }

    fn draw(axis: Axis) -> RecordingCanvas {
        let side = axis.side();
        let mut axes = AxisSet::default();
        axes.insert(axis);
        let config = ChartConfig::default();
        let scene = Scene { config: &config, axes: &axes, plots: &[] };

        let mut canvas = RecordingCanvas::new();
        Ticks::new(side).render(&mut canvas, &scene, &Rect::default(), &AREA).unwrap();
        canvas
    }

    #[test]
    fn test_bottom_axis() {
        let canvas = draw(axis(Side::Bottom, Side::Left, every_five()));

        let texts = canvas.texts();
        assert_eq!(canvas.text_strings(), vec!["0", "5", "10"]);
        let anchors: Vec<(f64, f64)> = texts.iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(anchors, vec![(50.0, 129.0), (150.0, 129.0), (250.0, 129.0)]);
        assert!(texts.iter().all(|t| t.align == TextAlign::Center && t.baseline == TextBaseline::Top));

        let strokes = canvas.strokes();
        // Grid line for the middle tick only, then one mark per tick
        assert_eq!(strokes.len(), 4);
        assert!(strokes.contains(&&vec![vec![(150.0, 120.0), (150.0, 20.0)]]));
        assert!(strokes.contains(&&vec![vec![(50.0, 120.0), (50.0, 126.0)]]));
        assert_eq!(canvas.depth(), 0);
    }

    #[test]
    fn test_left_axis_labels() {
        let canvas = draw(axis(Side::Left, Side::Bottom, every_five()));
        let anchors: Vec<(f64, f64)> = canvas.texts().iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(anchors, vec![(41.0, 120.0), (41.0, 70.0), (41.0, 20.0)]);
        assert!(canvas.texts().iter().all(|t| t.align == TextAlign::Right));
    }

    #[test]
    fn test_left_axis_mirrored_by_top_companion() {
        let canvas = draw(axis(Side::Left, Side::Top, every_five()));
        let ys: Vec<f64> = canvas.texts().iter().map(|t| t.y).collect();
        assert_eq!(ys, vec![20.0, 70.0, 120.0]);
    }

    #[test]
    fn test_minor_ticks_stop_at_axis_end() {
        let mut config = every_five();
        config.minor_ticks = 5;
        config.major_grid = false;
        let canvas = draw(axis(Side::Bottom, Side::Left, config));
        // 3 major marks plus 4 sub-ticks in each of the two intervals
        assert_eq!(canvas.strokes().len(), 3 + 8);
    }

    #[test]
    fn test_minor_tick_count_is_capped() {
        let mut config = every_five();
        config.minor_ticks = u32::MAX;
        config.major_grid = false;
        let canvas = draw(axis(Side::Bottom, Side::Left, config));
        // Each of the two intervals is split into at most 20 parts
        assert_eq!(canvas.strokes().len(), 3 + 2 * 19);
    }

    #[test]
    fn test_tick_side() {
        let mut config = every_five();
        config.tick_side = TickSide::Inside;
        config.major_grid = false;
        let canvas = draw(axis(Side::Bottom, Side::Left, config));
        assert_eq!(canvas.strokes()[0], &vec![vec![(50.0, 114.0), (50.0, 120.0)]]);
        // Labels hug the axis when marks point inward
        assert_eq!(canvas.texts()[0].y, 123.0);
    }

    #[test]
    fn test_discrete_axis() {
        let mut x = Axis::new(Side::Bottom, AxisKind::X, Side::Left, AxisConfig::default());
        let plot = Plot::bar().with_series(Series::from_pairs([("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]));
        x.add_plot(0, &plot).unwrap();
        x.fix_values();
        x.set_sizes(200.0, 100.0);
        let canvas = draw(x);

        let xs: Vec<f64> = canvas.texts().iter().map(|t| t.x).collect();
        assert_eq!(xs, vec![75.0, 125.0, 175.0, 225.0]);
        // 3 inner grid lines and 5 boundary marks
        assert_eq!(canvas.strokes().len(), 8);
    }

    #[test]
    fn test_size_required() {
        let mut axes = AxisSet::default();
        axes.insert(axis(Side::Bottom, Side::Left, every_five()));
        axes.insert(axis(Side::Left, Side::Bottom, every_five()));
        let config = ChartConfig::default();
        let scene = Scene { config: &config, axes: &axes, plots: &[] };
        let mut canvas = RecordingCanvas::new();

        assert_eq!(Ticks::new(Side::Bottom).size_required(&mut canvas, &scene), 6.0 + 3.0 + 10.0 + 2.0);
        // Widest label is "10": 2 glyphs at 10px
        assert_eq!(Ticks::new(Side::Left).size_required(&mut canvas, &scene), 6.0 + 3.0 + 12.0 + 2.0);
        assert_eq!(Ticks::new(Side::Top).size_required(&mut canvas, &scene), 0.0);
    }
}
