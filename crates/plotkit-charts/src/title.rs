//! Chart and axis titles

use crate::canvas::{Canvas, TextAlign, TextBaseline};
use crate::format::Format;
use crate::geometry::Rect;
use crate::section::{Scene, Section};
use plotkit_core::{Result, Side};
use std::f64::consts::FRAC_PI_2;

/// Above and below the title text
const TITLE_PADDING: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleSource {
    Chart,
    Axis,
}

pub struct Title {
    side: Side,
    source: TitleSource,
}

impl Title {
    /// The chart title, in the outermost top band
    pub fn chart() -> Self {
        Self {
            side: Side::Top,
            source: TitleSource::Chart,
        }
    }

    /// The title of the axis on `side`
    pub fn axis(side: Side) -> Self {
        Self {
            side,
            source: TitleSource::Axis,
        }
    }

    fn text<'s>(&self, scene: &Scene<'s>) -> Option<(&'s str, Format<'s>)> {
        let (title, font, color) = match self.source {
            TitleSource::Chart => {
                let config = scene.config;
                (&config.title, &config.title_font, &config.title_color)
            }
            TitleSource::Axis => {
                let config = &scene.axes.get(self.side)?.config;
                (&config.title, &config.title_font, &config.title_color)
            }
        };
        let text = title.as_deref().filter(|t| !t.is_empty())?;
        Some((text, Format::new(font, color)))
    }
}

impl Section for Title {
    fn name(&self) -> &'static str {
        match self.source {
            TitleSource::Chart => "chart-title",
            TitleSource::Axis => "axis-title",
        }
    }

    fn size_required(&self, _canvas: &mut dyn Canvas, scene: &Scene<'_>) -> f64 {
        match self.text(scene) {
            Some((_, format)) => format.text_height() + 2.0 * TITLE_PADDING,
            None => 0.0,
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, scene: &Scene<'_>, band: &Rect, _plot_area: &Rect) -> Result<()> {
        let Some((text, format)) = self.text(scene) else {
            return Ok(());
        };
        let (x, y) = band.center();
        match self.side {
            Side::Left => format.draw_text_rotated(canvas, text, x, y, -FRAC_PI_2),
            Side::Right => format.draw_text_rotated(canvas, text, x, y, FRAC_PI_2),
            Side::Top | Side::Bottom => {
                format.draw_text(canvas, text, x, y, TextAlign::Center, TextBaseline::Middle)
            }
        }
        Ok(())
    }
}
