//! Line plots

use super::{DEFAULT_LINE_WIDTH, DEFAULT_SHAPE_SIZE, Plot, PlotContext, PlotRenderer, draw_shape};
use crate::canvas::CanvasScope;
use crate::path::{area_path, line_path};
use plotkit_core::{Result, colors};

/// Alpha of the filled area when the series sets no opacity
const FILL_ALPHA: f64 = 0.3;

pub struct LineRenderer;

impl PlotRenderer for LineRenderer {
    fn draw(&self, plot: &Plot, ctx: &mut PlotContext<'_>) -> Result<()> {
        let x_axis = ctx.x_axis;
        let y_axis = ctx.y_axis(plot)?;
        let count = plot.key_count();
        let stacked = plot.stack();

        // Last series first so lower stack layers paint over the areas above
        for (index, (series, points)) in plot.series.iter().zip(&stacked).enumerate().rev() {
            if series.is_empty() {
                continue;
            }
            let style = plot.series_style(index);
            let color = style.color.as_deref().unwrap_or(colors::PALETTE[0]);

            let vertices: Vec<(f64, f64)> = series
                .data
                .iter()
                .zip(points)
                .enumerate()
                .map(|(i, (point, extent))| {
                    (x_axis.key_position(i, point.key(), count), y_axis.position_of(extent.top))
                })
                .collect();

            let mut scope = CanvasScope::new(&mut *ctx.canvas);
            if plot.config.fill {
                scope.set_fill_style(color);
                scope.set_global_alpha(style.opacity.unwrap_or(FILL_ALPHA));
                area_path(&vertices, y_axis.zero()).fill(&mut *scope);
                scope.set_global_alpha(1.0);
            }

            scope.set_stroke_style(color);
            scope.set_line_width(style.line_width.unwrap_or(DEFAULT_LINE_WIDTH));
            line_path(&vertices).stroke(&mut *scope);

            if let Some(shape) = style.shape {
                let size = style.shape_size.unwrap_or(DEFAULT_SHAPE_SIZE);
                scope.set_fill_style(color);
                for &(x, y) in &vertices {
                    draw_shape(&mut *scope, shape, x, y, size);
                }
            }
        }
        Ok(())
    }
}
