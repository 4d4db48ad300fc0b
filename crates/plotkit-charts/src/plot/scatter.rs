//! Scatter plots

use super::{DEFAULT_SHAPE_SIZE, Plot, PlotContext, PlotRenderer, draw_shape};
use crate::canvas::CanvasScope;
use plotkit_core::{Result, Shape, colors};

pub struct ScatterRenderer;

impl PlotRenderer for ScatterRenderer {
    fn draw(&self, plot: &Plot, ctx: &mut PlotContext<'_>) -> Result<()> {
        let x_axis = ctx.x_axis;
        let y_axis = ctx.y_axis(plot)?;
        let count = plot.key_count();

        for (index, (series, points)) in plot.series.iter().zip(plot.stack()).enumerate() {
            let style = plot.series_style(index);
            let color = style.color.as_deref().unwrap_or(colors::PALETTE[0]);
            let shape = style.shape.unwrap_or(Shape::Circle);
            let size = style.shape_size.unwrap_or(DEFAULT_SHAPE_SIZE);

            let mut scope = CanvasScope::new(&mut *ctx.canvas);
            scope.set_fill_style(color);
            scope.set_stroke_style(color);
            scope.set_line_width(style.line_width.unwrap_or(1.0));
            scope.set_global_alpha(style.opacity.unwrap_or(1.0));

            for (i, (point, extent)) in series.data.iter().zip(points).enumerate() {
                let x = x_axis.key_position(i, point.key(), count);
                let y = y_axis.position_of(extent.top);
                draw_shape(&mut *scope, shape, x, y, size);
            }
        }
        Ok(())
    }
}
