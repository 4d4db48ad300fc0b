//! Declarative chart definitions
//!
//! A whole chart as one JSON document: the chart options plus a list of
//! plots, each with its type, options and series.
//!
//! ```json
//! {
//!   "config": { "title": "Sales", "xAxis": { "title": "Month" } },
//!   "plots": [
//!     { "type": "bar", "series": [{ "name": "2024", "data": [["Jan", 4], ["Feb", 7]] }] }
//!   ]
//! }
//! ```

use crate::canvas::CanvasElement;
use crate::chart::Chart;
use crate::plot::{Plot, PlotType};
use plotkit_core::{ChartConfig, PlotConfig, Result, Series};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDefinition {
    #[serde(default)]
    pub config: ChartConfig,
    #[serde(default)]
    pub plots: Vec<PlotDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotDefinition {
    #[serde(rename = "type")]
    pub kind: PlotType,
    #[serde(default)]
    pub config: PlotConfig,
    #[serde(default)]
    pub series: Vec<Series>,
}

impl PlotDefinition {
    pub fn to_plot(&self) -> Plot {
        self.series
            .iter()
            .cloned()
            .fold(Plot::new(self.kind).with_config(self.config.clone()), Plot::with_series)
    }
}

impl ChartDefinition {
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: Self = serde_json::from_str(json)?;
        tracing::debug!(plots = definition.plots.len(), "chart definition parsed");
        Ok(definition)
    }

    /// A chart on `element` with every plot registered, not yet drawn
    pub fn build<E: CanvasElement>(&self, element: E) -> Chart<E> {
        let mut chart = Chart::new(element).with_config(self.config.clone());
        for plot in &self.plots {
            chart.add_plot(plot.to_plot());
        }
        chart
    }
}
