//! Axis: logical-to-pixel mapping for one edge of the plot area
//!
//! An axis folds in the bounding boxes of the plots assigned to it, resolves
//! its numeric range, picks the values that get tick labels, and maps values
//! to pixel offsets along its length once the layout has sized it.

use crate::plot::{BoundingBox, Plot};
use plotkit_core::{AxisConfig, AxisKind, ChartError, Key, Result, Scale, Side, TickPolicy};

/// Upper bound on the automatic tick search and on fixed-step tick counts
const MAX_TICKS: usize = 100;

/// Absorbs float error when counting whole intervals
const EPSILON: f64 = 1e-8;

/// Tick values or category names, depending on discreteness
#[derive(Debug, Clone, PartialEq)]
pub enum AxisLabels {
    Categories(Vec<String>),
    Values(Vec<f64>),
}

impl AxisLabels {
    pub fn len(&self) -> usize {
        match self {
            Self::Categories(c) => c.len(),
            Self::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn log_of(value: f64, base: f64) -> f64 {
    if base == 10.0 {
        value.log10()
    } else if base == 2.0 {
        value.log2()
    } else {
        value.ln() / base.ln()
    }
}

/// "Nice" evenly spaced ticks from `min` towards `max`.
///
/// The spacing is one of {10, 20, 50} scaled to the order of magnitude at
/// which the range has two significant figures (or one order below). The
/// smallest tick count, starting at 3, that one of those spacings produces
/// wins. The first tick is `min`; no tick exceeds `max`.
pub fn generate_tick_marks(min: f64, max: f64) -> Vec<f64> {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return vec![min];
    }

    let exponent = range.log10().floor() as i32 - 1;
    let unit = 10f64.powi(exponent);
    let spacings = [1.0, 2.0, 5.0, 10.0, 20.0, 50.0].map(|m| m * unit);

    // Strip float noise from the offsets without touching `min` itself
    let clean = |offset: f64| {
        if exponent < 0 {
            let scale = 10f64.powi(3 - exponent);
            (offset * scale).round() / scale
        } else {
            offset
        }
    };

    for count in 3..=MAX_TICKS {
        for spacing in spacings {
            let intervals = (range / spacing + EPSILON).floor() as usize;
            if intervals + 1 == count {
                return (0..count).map(|i| min + clean(i as f64 * spacing)).collect();
            }
        }
    }

    vec![min, max]
}

// ============================================================================
// AXIS
// ============================================================================

#[derive(Debug, Clone)]
pub struct Axis {
    pub config: AxisConfig,
    side: Side,
    kind: AxisKind,
    /// Perpendicular side this axis shares its origin corner with
    companion: Side,
    discrete: Option<bool>,
    min: f64,
    max: f64,
    rmin: f64,
    rmax: f64,
    fixed: bool,
    labels: AxisLabels,
    plots: Vec<usize>,
    size: f64,
    p_size: f64,
}

impl Axis {
    pub fn new(side: Side, kind: AxisKind, companion: Side, config: AxisConfig) -> Self {
        Self {
            config,
            side,
            kind,
            companion,
            discrete: None,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            rmin: f64::INFINITY,
            rmax: f64::NEG_INFINITY,
            fixed: false,
            labels: AxisLabels::Values(Vec::new()),
            plots: Vec::new(),
            size: 0.0,
            p_size: 0.0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn companion(&self) -> Side {
        self.companion
    }

    /// Only X axes are ever discrete
    pub fn is_discrete(&self) -> bool {
        self.kind == AxisKind::X && self.discrete.unwrap_or(false)
    }

    pub fn is_log(&self) -> bool {
        self.config.scale == Scale::Log
    }

    /// Mapping bounds; log-space once [`Axis::fix_values`] has run
    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Data-space bounds, valid once [`Axis::fix_values`] has run
    pub fn rmin(&self) -> f64 {
        self.rmin
    }

    pub fn rmax(&self) -> f64 {
        self.rmax
    }

    pub fn labels(&self) -> &AxisLabels {
        &self.labels
    }

    /// Indices of the chart plots assigned to this axis
    pub fn plots(&self) -> &[usize] {
        &self.plots
    }

    /// Pixel length along the axis
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Pixel extent of the plot area perpendicular to the axis
    pub fn p_size(&self) -> f64 {
        self.p_size
    }

    pub fn set_sizes(&mut self, size: f64, p_size: f64) {
        self.size = size;
        self.p_size = p_size;
    }

    /// Register plot number `index`, folding in its discreteness and range
    pub fn add_plot(&mut self, index: usize, plot: &Plot) -> Result<()> {
        if self.kind == AxisKind::X {
            let discrete = plot.is_discrete();
            match self.discrete {
                Some(existing) if existing != discrete => {
                    return Err(ChartError::DiscretenessMismatch { side: self.side });
                }
                _ => self.discrete = Some(discrete),
            }
        }

        if self.fixed {
            // Back to data space so the new range can be folded in
            self.min = self.rmin;
            self.max = self.rmax;
            self.fixed = false;
        }

        self.plots.push(index);

        if self.is_discrete() {
            if self.labels.is_empty() {
                self.labels = AxisLabels::Categories(plot.categories());
            }
            return Ok(());
        }

        match plot.bounding_box() {
            Some(bbox) => self.set_min_and_max(&bbox),
            None => tracing::trace!(side = %self.side, "plot without data adds no range"),
        }
        self.labels = AxisLabels::Values(self.continuous_axis_values());
        Ok(())
    }

    /// Widen the range to cover `bbox`, then apply the scale's rules:
    /// linear ranges always include zero, log ranges snap outward to powers
    /// of the base.
    pub fn set_min_and_max(&mut self, bbox: &BoundingBox) {
        let (lo, hi, lowest_positive) = match self.kind {
            AxisKind::X => (bbox.min_x, bbox.max_x, bbox.min_positive_x),
            AxisKind::Y => (bbox.min_y, bbox.max_y, bbox.min_positive_y),
        };

        match self.config.scale {
            Scale::Linear => {
                self.min = self.min.min(lo).min(0.0);
                self.max = self.max.max(hi).max(0.0);
            }
            Scale::Log => {
                let base = self.config.log_base;
                if lo <= 0.0 {
                    tracing::warn!(side = %self.side, value = lo, "non-positive values ignored on log axis");
                }
                if lowest_positive.is_finite() {
                    let exponent = (log_of(lowest_positive, base) + EPSILON).floor();
                    self.min = self.min.min(base.powf(exponent));
                }
                if hi > 0.0 {
                    self.max = self.max.max(base.powf((log_of(hi, base) - EPSILON).ceil()));
                }
            }
        }
    }

    /// Settle the range after all plots are folded in. Log axes switch
    /// `min`/`max` to log space and keep data-space bounds in `rmin`/`rmax`.
    pub fn fix_values(&mut self) {
        if self.fixed {
            return;
        }

        if self.is_discrete() {
            self.min = 0.0;
            self.max = self.labels.len().max(1) as f64;
        } else if self.is_log() && !self.min.is_finite() && self.max.is_finite() {
            self.min = self.max / self.config.log_base;
        } else if !self.min.is_finite() || !self.max.is_finite() {
            (self.min, self.max) = match self.config.scale {
                Scale::Linear => (0.0, 1.0),
                Scale::Log => (1.0, self.config.log_base),
            };
        }

        match self.config.scale {
            Scale::Linear if self.max <= self.min => self.max = self.min + 1.0,
            Scale::Log if self.max <= self.min => self.max = self.min * self.config.log_base,
            _ => {}
        }

        self.rmin = self.min;
        self.rmax = self.max;
        if self.is_log() && !self.is_discrete() {
            self.min = log_of(self.rmin, self.config.log_base);
            self.max = log_of(self.rmax, self.config.log_base);
        }
        self.fixed = true;

        if !self.is_discrete() {
            self.labels = AxisLabels::Values(self.continuous_axis_values());
        }
    }

    fn raw_range(&self) -> (f64, f64) {
        if self.fixed { (self.rmin, self.rmax) } else { (self.min, self.max) }
    }

    /// Values that get a tick: explicit list, every `n` units from the
    /// minimum, powers of the base on log axes, or automatic nice ticks
    pub fn continuous_axis_values(&self) -> Vec<f64> {
        if let Some(TickPolicy::Explicit(values)) = &self.config.ticks {
            return values.clone();
        }

        let (lo, hi) = self.raw_range();
        if !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }

        if self.is_log() {
            if lo <= 0.0 {
                return Vec::new();
            }
            if let Some(TickPolicy::Every(step)) = self.config.ticks {
                tracing::warn!(side = %self.side, step, "tick step ignored on log axis, using powers of the base");
            }
            let base = self.config.log_base;
            let first = log_of(lo, base).round() as i32;
            let last = log_of(hi, base).round() as i32;
            return (first..=last).map(|i| base.powi(i)).collect();
        }

        match self.config.ticks {
            Some(TickPolicy::Every(step)) if step > 0.0 => {
                let intervals = ((hi - lo) / step + EPSILON).floor();
                if intervals <= MAX_TICKS as f64 {
                    (0..=intervals as usize).map(|i| lo + i as f64 * step).collect()
                } else {
                    tracing::warn!(side = %self.side, step, "tick step too small, using automatic ticks");
                    generate_tick_marks(lo, hi)
                }
            }
            _ => generate_tick_marks(lo, hi),
        }
    }

    /// Label text for every tick, in order
    pub fn label_strings(&self) -> Vec<String> {
        match &self.labels {
            AxisLabels::Categories(categories) => categories.clone(),
            AxisLabels::Values(values) => {
                let formatter = self.config.label_format.formatter();
                values.iter().map(|v| formatter.format(*v)).collect()
            }
        }
    }

    /// Pixel offset of `value` along the axis
    pub fn position_of(&self, value: f64) -> f64 {
        let value = if self.is_log() {
            if value <= 0.0 {
                return 0.0;
            }
            log_of(value, self.config.log_base)
        } else {
            value
        };

        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() {
            return 0.0;
        }
        (value - self.min) / span * self.size
    }

    pub fn positions_of(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| self.position_of(*v)).collect()
    }

    /// Pixel offset of zero; the axis start on log axes
    pub fn zero(&self) -> f64 {
        if self.is_log() { 0.0 } else { self.position_of(0.0) }
    }

    pub fn category_index(&self, key: &Key) -> Option<usize> {
        match &self.labels {
            AxisLabels::Categories(categories) => {
                let name = key.to_string();
                categories.iter().position(|c| *c == name)
            }
            AxisLabels::Values(_) => None,
        }
    }

    /// Pixel span `(start, width)` reserved for the `index`-th key of a plot
    /// with `count` keys. Discrete axes use the key's category cell;
    /// continuous axes center a `size / count` wide slot on the key.
    pub fn slot(&self, index: usize, key: &Key, count: usize) -> (f64, f64) {
        if self.is_discrete() {
            let cells = self.labels.len().max(1);
            let width = self.size / cells as f64;
            let cell = self.category_index(key).unwrap_or(index);
            (cell as f64 * width, width)
        } else {
            let width = self.size / count.max(1) as f64;
            let center = self.position_of(key.as_number().unwrap_or(index as f64));
            (center - width / 2.0, width)
        }
    }

    /// Center of the slot, see [`Axis::slot`]
    pub fn key_position(&self, index: usize, key: &Key, count: usize) -> f64 {
        if self.is_discrete() {
            let (start, width) = self.slot(index, key, count);
            start + width / 2.0
        } else {
            self.position_of(key.as_number().unwrap_or(index as f64))
        }
    }
}

// ============================================================================
// AXIS SET
// ============================================================================

/// At most one axis per side
#[derive(Debug, Clone, Default)]
pub struct AxisSet {
    axes: [Option<Axis>; 4],
}

impl AxisSet {
    pub fn get(&self, side: Side) -> Option<&Axis> {
        self.axes[side.index()].as_ref()
    }

    pub fn get_mut(&mut self, side: Side) -> Option<&mut Axis> {
        self.axes[side.index()].as_mut()
    }

    pub fn require(&self, side: Side) -> Result<&Axis> {
        self.get(side).ok_or(ChartError::MissingAxis(side))
    }

    pub fn insert(&mut self, axis: Axis) {
        let index = axis.side().index();
        self.axes[index] = Some(axis);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Axis> {
        self.axes.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Axis> {
        self.axes.iter_mut().flatten()
    }

    pub fn x_axes(&self) -> impl Iterator<Item = &Axis> {
        self.iter().filter(|a| a.kind() == AxisKind::X)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_core::{PlotConfig, Series};

    fn y_axis(config: AxisConfig) -> Axis {
        Axis::new(Side::Left, AxisKind::Y, Side::Bottom, config)
    }

    fn scatter(points: &[(f64, f64)]) -> Plot {
        let mut plot = Plot::scatter();
        plot.add_series(Series::from_pairs(points.iter().copied()));
        plot
    }

    fn bbox(min_y: f64, max_y: f64) -> BoundingBox {
        BoundingBox::new(0.0, 1.0, min_y, max_y)
    }

    #[test]
    fn test_generate_tick_marks_fixture() {
        assert_eq!(generate_tick_marks(50.0, 120.0), vec![50.0, 70.0, 90.0, 110.0]);
    }

    #[test]
    fn test_generate_tick_marks_properties() {
        let ranges = [(0.0, 1.0), (0.0, 100.0), (-3.7, 12.2), (0.013, 0.071), (1234.0, 98765.0)];
        for (min, max) in ranges {
            let ticks = generate_tick_marks(min, max);
            assert!(ticks.len() >= 3, "{:?}", ticks);
            assert_eq!(ticks[0], min);
            assert!(*ticks.last().unwrap() <= max + 1e-8);
            assert!(ticks.windows(2).all(|w| w[1] > w[0]));

            let spacing = ticks[1] - ticks[0];
            let mantissa = spacing / 10f64.powf(spacing.log10().floor());
            assert!(
                [1.0, 2.0, 5.0].iter().any(|m| (mantissa - m).abs() < 1e-6),
                "spacing {} for {:?}",
                spacing,
                (min, max)
            );
        }
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(generate_tick_marks(5.0, 5.0), vec![5.0]);
    }

    #[test]
    fn test_explicit_tick_count() {
        let mut axis = y_axis(AxisConfig::default().with_ticks(TickPolicy::Every(5.0)));
        axis.set_min_and_max(&bbox(0.0, 10.0));
        axis.fix_values();
        assert_eq!(axis.labels(), &AxisLabels::Values(vec![0.0, 5.0, 10.0]));
    }

    #[test]
    fn test_tiny_tick_step_falls_back_to_automatic() {
        let mut axis = y_axis(AxisConfig::default().with_ticks(TickPolicy::Every(1e-9)));
        axis.set_min_and_max(&bbox(0.0, 100.0));
        axis.fix_values();
        assert_eq!(axis.labels(), &AxisLabels::Values(generate_tick_marks(0.0, 100.0)));
    }

    #[test]
    fn test_tick_step_on_log_axis_uses_powers() {
        let config = AxisConfig::default().with_scale(Scale::Log).with_ticks(TickPolicy::Every(5.0));
        let mut axis = y_axis(config);
        axis.add_plot(0, &scatter(&[(1.0, 2.0), (2.0, 90.0)])).unwrap();
        axis.fix_values();
        assert_eq!(axis.labels(), &AxisLabels::Values(vec![1.0, 10.0, 100.0]));
    }

    #[test]
    fn test_explicit_tick_values() {
        let config = AxisConfig::default().with_ticks(TickPolicy::Explicit(vec![1.0, 4.0, 9.0]));
        let mut axis = y_axis(config);
        axis.set_min_and_max(&bbox(0.0, 10.0));
        axis.fix_values();
        assert_eq!(axis.labels(), &AxisLabels::Values(vec![1.0, 4.0, 9.0]));
    }

    #[test]
    fn test_linear_range_includes_zero() {
        let mut axis = y_axis(AxisConfig::default());
        axis.add_plot(0, &scatter(&[(1.0, 3.0), (2.0, 8.0)])).unwrap();
        axis.fix_values();
        assert_eq!((axis.min(), axis.max()), (0.0, 8.0));

        let mut axis = y_axis(AxisConfig::default());
        axis.add_plot(0, &scatter(&[(1.0, -3.0), (2.0, -8.0)])).unwrap();
        axis.fix_values();
        assert_eq!((axis.min(), axis.max()), (-8.0, 0.0));
    }

    #[test]
    fn test_union_of_plot_ranges() {
        let mut axis = y_axis(AxisConfig::default());
        axis.add_plot(0, &scatter(&[(0.0, -2.0)])).unwrap();
        axis.add_plot(1, &scatter(&[(0.0, 7.0)])).unwrap();
        axis.fix_values();
        assert_eq!((axis.min(), axis.max()), (-2.0, 7.0));
        assert_eq!(axis.plots(), &[0, 1]);
    }

    #[test]
    fn test_empty_plot_contributes_nothing() {
        let mut axis = y_axis(AxisConfig::default());
        axis.add_plot(0, &Plot::bar()).unwrap();
        axis.fix_values();
        assert_eq!((axis.min(), axis.max()), (0.0, 1.0));
    }

    #[test]
    fn test_log_axis() {
        let mut axis = y_axis(AxisConfig::default().with_scale(Scale::Log));
        axis.add_plot(0, &scatter(&[(1.0, 3.0), (2.0, 700.0)])).unwrap();
        axis.fix_values();

        assert_eq!((axis.rmin(), axis.rmax()), (1.0, 1000.0));
        assert!((axis.min() - 0.0).abs() < 1e-12);
        assert!((axis.max() - 3.0).abs() < 1e-12);
        assert_eq!(axis.labels(), &AxisLabels::Values(vec![1.0, 10.0, 100.0, 1000.0]));

        axis.set_sizes(300.0, 100.0);
        assert!((axis.position_of(100.0) - 200.0).abs() < 1e-9);
        assert_eq!(axis.position_of(0.0), 0.0);
        assert_eq!(axis.zero(), 0.0);
    }

    #[test]
    fn test_log_axis_skips_zero_values() {
        let mut axis = y_axis(AxisConfig::default().with_scale(Scale::Log));
        axis.add_plot(0, &scatter(&[(0.0, 0.0), (1.0, 5.0), (2.0, 500.0)])).unwrap();
        axis.fix_values();

        assert_eq!((axis.rmin(), axis.rmax()), (1.0, 1000.0));
        assert_eq!(axis.labels(), &AxisLabels::Values(vec![1.0, 10.0, 100.0, 1000.0]));

        axis.set_sizes(300.0, 100.0);
        assert!(axis.position_of(500.0) <= 300.0);
        assert_eq!(axis.position_of(0.0), 0.0);
    }

    #[test]
    fn test_log_axis_without_positive_minimum() {
        let mut axis = y_axis(AxisConfig::default().with_scale(Scale::Log));
        let mut bbox = bbox(-5.0, 500.0);
        bbox.min_positive_y = f64::INFINITY;
        axis.set_min_and_max(&bbox);
        axis.fix_values();

        assert_eq!((axis.rmin(), axis.rmax()), (100.0, 1000.0));
    }

    #[test]
    fn test_position_of_is_linear() {
        let mut axis = y_axis(AxisConfig::default());
        axis.set_min_and_max(&bbox(-20.0, 80.0));
        axis.fix_values();
        axis.set_sizes(400.0, 200.0);

        for (a, b) in [(-20.0, 80.0), (0.0, 33.0), (-7.5, 12.25)] {
            let mid = axis.position_of((a + b) / 2.0);
            let avg = (axis.position_of(a) + axis.position_of(b)) / 2.0;
            assert!((mid - avg).abs() < 1e-9);
        }
        assert_eq!(axis.positions_of(&[-20.0, 80.0]), vec![0.0, 400.0]);
        assert_eq!(axis.zero(), axis.position_of(0.0));
        assert_eq!(axis.zero(), 80.0);
    }

    #[test]
    fn test_discreteness_mismatch() {
        let mut axis = Axis::new(Side::Bottom, AxisKind::X, Side::Left, AxisConfig::default());
        let mut discrete = Plot::bar();
        discrete.add_series(Series::from_pairs([("a", 1.0)]));
        let mut continuous = Plot::bar();
        continuous.config = PlotConfig {
            discrete: Some(false),
            ..Default::default()
        };

        axis.add_plot(0, &discrete).unwrap();
        let err = axis.add_plot(1, &continuous).unwrap_err();
        assert!(matches!(err, ChartError::DiscretenessMismatch { side: Side::Bottom }));
    }

    #[test]
    fn test_discrete_labels_and_slots() {
        let mut axis = Axis::new(Side::Bottom, AxisKind::X, Side::Left, AxisConfig::default());
        let mut plot = Plot::bar();
        plot.add_series(Series::from_pairs([("Q1", 1.0), ("Q2", 2.0), ("Q3", 3.0), ("Q4", 4.0)]));
        plot.add_series(Series::from_pairs([("Q9", 1.0)]));
        axis.add_plot(0, &plot).unwrap();
        axis.fix_values();
        axis.set_sizes(400.0, 100.0);

        assert!(axis.is_discrete());
        assert_eq!(axis.label_strings(), vec!["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(axis.slot(0, &Key::from("Q3"), 4), (200.0, 100.0));
        assert_eq!(axis.key_position(0, &Key::from("Q1"), 4), 50.0);
    }

    #[test]
    fn test_y_axes_are_never_discrete() {
        let mut axis = y_axis(AxisConfig::default());
        axis.add_plot(0, &Plot::bar()).unwrap();
        assert!(!axis.is_discrete());
    }

    #[test]
    fn test_axis_set() {
        let mut set = AxisSet::default();
        assert!(set.is_empty());
        set.insert(y_axis(AxisConfig::default()));
        assert!(set.get(Side::Left).is_some());
        assert!(matches!(set.require(Side::Top), Err(ChartError::MissingAxis(Side::Top))));
        assert_eq!(set.x_axes().count(), 0);
    }
}
