//! Series legend
//!
//! One entry (color swatch and name) per series of every visible plot.
//! Stacked vertically on the left and right sides, laid out in a single row
//! on the top and bottom sides.

use crate::canvas::{Canvas, CanvasScope, TextAlign, TextBaseline};
use crate::format::Format;
use crate::geometry::Rect;
use crate::section::{Scene, Section};
use plotkit_core::{LegendConfig, Result, Side, colors};

/// Around the legend content
const PADDING: f64 = 6.0;

/// Between a swatch and its label
const SWATCH_GAP: f64 = 4.0;

/// Between entries, vertically and horizontally
const ENTRY_GAP: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
}

/// Legend entries in plot then series order; unnamed series are numbered
/// across the whole chart
pub fn legend_entries(scene: &Scene<'_>) -> Vec<LegendEntry> {
    scene
        .plots
        .iter()
        .filter(|plot| plot.is_visible())
        .flat_map(|plot| {
            plot.series.iter().enumerate().map(move |(index, series)| (plot, index, series))
        })
        .enumerate()
        .map(|(n, (plot, index, series))| LegendEntry {
            name: series.name.clone().unwrap_or_else(|| format!("Series {}", n + 1)),
            color: plot
                .series_style(index)
                .color
                .unwrap_or_else(|| colors::PALETTE[0].to_string()),
        })
        .collect()
}

pub struct Legend {
    side: Side,
}

impl Legend {
    pub fn new(side: Side) -> Self {
        Self { side }
    }

    fn vertical(&self) -> bool {
        !self.side.is_horizontal()
    }

    fn formats(config: &LegendConfig) -> (Format<'_>, Format<'_>) {
        (
            Format::new(&config.font, &config.color),
            Format::new(&config.title_font, &config.title_color),
        )
    }

    fn line_height(config: &LegendConfig) -> f64 {
        Format::new(&config.font, &config.color).text_height().max(config.swatch_size)
    }

    fn title(config: &LegendConfig) -> Option<&str> {
        config.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Width of one entry laid out in a row
    fn entry_width(canvas: &mut dyn Canvas, config: &LegendConfig, entry: &LegendEntry) -> f64 {
        let (label, _) = Self::formats(config);
        config.swatch_size + SWATCH_GAP + label.text_width(canvas, &entry.name)
    }

    fn draw_entry(canvas: &mut dyn Canvas, config: &LegendConfig, entry: &LegendEntry, x: f64, y: f64) {
        let (label, _) = Self::formats(config);
        let line = Self::line_height(config);
        let swatch = config.swatch_size;
        {
            let mut scope = CanvasScope::new(&mut *canvas);
            scope.set_fill_style(&entry.color);
            scope.fill_rect(x, y + (line - swatch) / 2.0, swatch, swatch);
        }
        label.draw_text(canvas, &entry.name, x + swatch + SWATCH_GAP, y + line / 2.0, TextAlign::Left, TextBaseline::Middle);
    }
}

impl Section for Legend {
    fn name(&self) -> &'static str {
        "legend"
    }

    fn size_required(&self, canvas: &mut dyn Canvas, scene: &Scene<'_>) -> f64 {
        let config = &scene.config.legend;
        let entries = legend_entries(scene);
        if !config.show || entries.is_empty() {
            return 0.0;
        }
        let (label, heading) = Self::formats(config);
        let title = Self::title(config);

        if self.vertical() {
            let widest_entry = entries
                .iter()
                .map(|e| config.swatch_size + SWATCH_GAP + label.text_width(canvas, &e.name))
                .fold(0.0, f64::max);
            let title_width = title.map(|t| heading.text_width(canvas, t)).unwrap_or(0.0);
            widest_entry.max(title_width) + 2.0 * PADDING
        } else {
            let title_height = title.map(|_| heading.text_height() + ENTRY_GAP).unwrap_or(0.0);
            Self::line_height(config) + title_height + 2.0 * PADDING
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, scene: &Scene<'_>, band: &Rect, _plot_area: &Rect) -> Result<()> {
        let config = &scene.config.legend;
        let entries = legend_entries(scene);
        if !config.show || entries.is_empty() {
            return Ok(());
        }
        let (_, heading) = Self::formats(config);
        let title = Self::title(config);
        let line = Self::line_height(config);
        tracing::trace!(side = %self.side, entries = entries.len(), "drawing legend");

        if self.vertical() {
            let title_height = title.map(|_| heading.text_height() + ENTRY_GAP).unwrap_or(0.0);
            let content = title_height + entries.len() as f64 * (line + ENTRY_GAP) - ENTRY_GAP;
            let mut y = ((band.height - content) / 2.0).max(PADDING);
            if let Some(title) = title {
                heading.draw_text(canvas, title, PADDING, y, TextAlign::Left, TextBaseline::Top);
                y += title_height;
            }
            for entry in &entries {
                Self::draw_entry(canvas, config, entry, PADDING, y);
                y += line + ENTRY_GAP;
            }
        } else {
            let mut y = PADDING;
            if let Some(title) = title {
                heading.draw_text(canvas, title, band.width / 2.0, y, TextAlign::Center, TextBaseline::Top);
                y += heading.text_height() + ENTRY_GAP;
            }
            let widths: Vec<f64> = entries.iter().map(|e| Self::entry_width(canvas, config, e)).collect();
            let total = widths.iter().sum::<f64>() + 2.0 * ENTRY_GAP * (widths.len() as f64 - 1.0);
            let mut x = ((band.width - total) / 2.0).max(0.0);
            for (entry, width) in entries.iter().zip(&widths) {
                Self::draw_entry(canvas, config, entry, x, y);
                x += width + 2.0 * ENTRY_GAP;
            }
        }
        Ok(())
    }
}
