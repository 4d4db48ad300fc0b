//! Peripheral chart sections
//!
//! Titles, tick bands and the legend each claim a band on one side of the
//! plot area. The chart asks every section for its size first, derives the
//! plot area from the totals, then renders each section into its band.

use crate::axis::AxisSet;
use crate::canvas::Canvas;
use crate::geometry::Rect;
use crate::plot::Plot;
use plotkit_core::{ChartConfig, Result};

/// Read-only chart state visible to sections
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub config: &'a ChartConfig,
    pub axes: &'a AxisSet,
    pub plots: &'a [Plot],
}

pub trait Section {
    /// Short name used in layout reports
    fn name(&self) -> &'static str;

    /// Pixel thickness of the band this section needs, 0 for none
    fn size_required(&self, canvas: &mut dyn Canvas, scene: &Scene<'_>) -> f64;

    /// Draw with the canvas origin at the band's top-left corner. `band`
    /// and `plot_area` are given in that same local space.
    fn render(
        &self,
        canvas: &mut dyn Canvas,
        scene: &Scene<'_>,
        band: &Rect,
        plot_area: &Rect,
    ) -> Result<()>;
}
