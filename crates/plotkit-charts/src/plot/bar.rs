//! Bar plots
//!
//! Every category slot on the X axis is shared by all bar plots drawn
//! against that axis. A stacked plot takes one column per slot, an unstacked
//! plot one column per series; columns are separated by the chart's bar
//! spacer.

use super::{Plot, PlotContext, PlotRenderer};
use crate::canvas::CanvasScope;
use plotkit_core::{Result, colors};

pub struct BarRenderer;

/// Columns a plot occupies in each slot
fn columns(plot: &Plot) -> usize {
    if plot.is_stacked() { 1 } else { plot.series.len().max(1) }
}

/// Column width and offset of column `column` of `total` within a slot
/// `width` pixels wide
fn column_geometry(width: f64, spacer: f64, column: usize, total: usize) -> (f64, f64) {
    let total = total.max(1) as f64;
    let bar_width = ((width - spacer * (total + 1.0)) / total).max(1.0);
    let offset = spacer + column as f64 * (bar_width + spacer);
    (offset, bar_width)
}

impl BarRenderer {
    fn draw_columns(
        &self,
        plot: &Plot,
        first_column: usize,
        total_columns: usize,
        ctx: &mut PlotContext<'_>,
    ) -> Result<()> {
        let x_axis = ctx.x_axis;
        let y_axis = ctx.y_axis(plot)?;
        let spacer = ctx.bar_spacer;
        let count = plot.key_count();
        let stacked = plot.is_stacked();

        for (index, (series, points)) in plot.series.iter().zip(plot.stack()).enumerate() {
            let style = plot.series_style(index);
            let column = first_column + if stacked { 0 } else { index };

            let mut scope = CanvasScope::new(&mut *ctx.canvas);
            scope.set_fill_style(style.color.as_deref().unwrap_or(colors::PALETTE[0]));
            scope.set_global_alpha(style.opacity.unwrap_or(1.0));

            for (i, (point, extent)) in series.data.iter().zip(points).enumerate() {
                let (start, width) = x_axis.slot(i, point.key(), count);
                let (offset, bar_width) = column_geometry(width, spacer, column, total_columns);
                let base = y_axis.position_of(extent.base);
                let top = y_axis.position_of(extent.top);
                scope.fill_rect(start + offset, base, bar_width, top - base);
            }
        }
        Ok(())
    }
}

impl PlotRenderer for BarRenderer {
    fn draw(&self, plot: &Plot, ctx: &mut PlotContext<'_>) -> Result<()> {
        self.draw_columns(plot, 0, columns(plot), ctx)
    }

    fn draw_plots(&self, plots: &[&Plot], ctx: &mut PlotContext<'_>) -> Result<()> {
        let total: usize = plots.iter().map(|p| columns(p)).sum();
        tracing::trace!(plots = plots.len(), columns = total, "drawing bar group");

        let mut first = 0;
        for plot in plots {
            self.draw_columns(plot, first, total, ctx)?;
            first += columns(plot);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::plot::tests::render;
    use plotkit_core::{PlotConfig, Series};

    #[test]
    fn test_column_geometry() {
        assert_eq!(column_geometry(100.0, 4.0, 0, 1), (4.0, 92.0));
        assert_eq!(column_geometry(100.0, 4.0, 1, 2), (52.0, 44.0));
    }

    #[test]
    fn test_one_bar_per_category() {
        let plot = Plot::bar().with_series(Series::from_pairs([("a", 10.0), ("b", 20.0)]));
        let canvas = render(&[&plot]);

        assert_eq!(
            canvas.filled_rects(),
            vec![Rect::new(4.0, 0.0, 92.0, 50.0), Rect::new(104.0, 0.0, 92.0, 100.0)]
        );
        assert_eq!(canvas.depth(), 0);
    }

    #[test]
    fn test_stacked_series_share_a_column() {
        let plot = Plot::bar()
            .with_series(Series::from_pairs([("a", 10.0)]))
            .with_series(Series::from_pairs([("a", 10.0)]));
        let rects = render(&[&plot]).filled_rects();

        assert_eq!(rects[0], Rect::new(4.0, 0.0, 192.0, 50.0));
        assert_eq!(rects[1], Rect::new(4.0, 50.0, 192.0, 50.0));
    }

    #[test]
    fn test_plots_sharing_an_axis_are_grouped() {
        let first = Plot::bar().with_series(Series::from_pairs([("a", 5.0), ("b", 5.0)]));
        let second = Plot::bar().with_series(Series::from_pairs([("a", 10.0), ("b", 10.0)]));
        let rects = render(&[&first, &second]).filled_rects();

        let xs: Vec<f64> = rects.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![4.0, 104.0, 52.0, 152.0]);
        assert!(rects.iter().all(|r| r.width == 44.0));
    }

    #[test]
    fn test_unstacked_series_side_by_side() {
        let plot = Plot::bar()
            .with_config(PlotConfig {
                stacked: Some(false),
                ..Default::default()
            })
            .with_series(Series::from_pairs([("a", 10.0)]))
            .with_series(Series::from_pairs([("a", 5.0)]));
        let rects = render(&[&plot]).filled_rects();

        assert_eq!(rects[0].x, 4.0);
        assert_eq!(rects[1].x, 4.0 + 94.0 + 4.0);
        assert_eq!(rects[1].height, 50.0);
    }
}
