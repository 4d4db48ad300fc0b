//! Section configuration
//!
//! One typed struct per chart section. Every struct loads from JSON
//! (`camelCase`, missing fields default) and exposes `set`/`get` by option
//! name. Flat keys such as `xAxisTicks` or `legendTitle` are split into a
//! section and an option by [`ConfigKey::parse`].

use crate::palette::colors;
use crate::{ChartError, CompactNumberFormatter, FixedFormatter, LabelFormatter};
use crate::{PlainNumberFormatter, Result, SeriesStyle, Side};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) fn from_value<T: DeserializeOwned>(option: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ChartError::invalid_value(option, e))
}

pub(crate) fn to_value<T: Serialize>(option: &str, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ChartError::invalid_value(option, e))
}

/// Generates `OPTIONS` plus name-based setter/getter for plain fields
macro_rules! config_options {
    ($ty:ty, $set:ident, $get:ident { $($name:literal => $field:ident),* $(,)? }) => {
        impl $ty {
            pub const OPTIONS: &'static [&'static str] = &[$($name),*];

            pub fn $set(&mut self, option: &str, value: Value) -> Result<()> {
                match option {
                    $($name => self.$field = from_value(option, value)?,)*
                    _ => return Err(ChartError::UnknownOption(option.to_string())),
                }
                Ok(())
            }

            pub fn $get(&self, option: &str) -> Result<Value> {
                match option {
                    $($name => to_value(option, &self.$field),)*
                    _ => Err(ChartError::UnknownOption(option.to_string())),
                }
            }
        }
    };
}

// ============================================================================
// AXIS
// ============================================================================

/// Mapping from data values to axis offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

/// Where tick marks sit relative to the axis line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickSide {
    #[default]
    Outside,
    Inside,
    Middle,
}

/// Tick value policy for continuous axes. `None` in [`AxisConfig::ticks`]
/// means automatic "nice" ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickPolicy {
    /// A tick every `n` units starting at the axis minimum
    Every(f64),
    /// Exactly these values
    Explicit(Vec<f64>),
}

/// Label text strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelFormat {
    #[default]
    Plain,
    Compact,
    Fixed(usize),
}

impl LabelFormat {
    pub fn formatter(&self) -> Box<dyn LabelFormatter> {
        match self {
            Self::Plain => Box::new(PlainNumberFormatter),
            Self::Compact => Box::new(CompactNumberFormatter),
            Self::Fixed(decimals) => Box::new(FixedFormatter { decimals: *decimals }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    pub title: Option<String>,
    pub title_font: String,
    pub title_color: String,
    pub major_grid: bool,
    pub minor_grid: bool,
    pub grid_color: String,
    pub ticks: Option<TickPolicy>,
    pub tick_length: f64,
    pub tick_side: TickSide,
    pub tick_color: String,
    pub minor_ticks: u32,
    pub minor_tick_length: f64,
    pub scale: Scale,
    pub log_base: f64,
    pub show_labels: bool,
    pub label_font: String,
    pub label_color: String,
    pub label_format: LabelFormat,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            title: None,
            title_font: "12px sans-serif".to_string(),
            title_color: colors::TEXT_PRIMARY.to_string(),
            major_grid: true,
            minor_grid: false,
            grid_color: colors::GRID.to_string(),
            ticks: None,
            tick_length: 6.0,
            tick_side: TickSide::Outside,
            tick_color: colors::BORDER.to_string(),
            minor_ticks: 0,
            minor_tick_length: 3.0,
            scale: Scale::Linear,
            log_base: 10.0,
            show_labels: true,
            label_font: "10px sans-serif".to_string(),
            label_color: colors::TEXT_MUTED.to_string(),
            label_format: LabelFormat::Plain,
        }
    }
}

impl AxisConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_ticks(mut self, ticks: TickPolicy) -> Self {
        self.ticks = Some(ticks);
        self
    }
}

config_options!(AxisConfig, set, get {
    "title" => title,
    "titleFont" => title_font,
    "titleColor" => title_color,
    "majorGrid" => major_grid,
    "minorGrid" => minor_grid,
    "gridColor" => grid_color,
    "ticks" => ticks,
    "tickLength" => tick_length,
    "tickSide" => tick_side,
    "tickColor" => tick_color,
    "minorTicks" => minor_ticks,
    "minorTickLength" => minor_tick_length,
    "scale" => scale,
    "logBase" => log_base,
    "showLabels" => show_labels,
    "labelFont" => label_font,
    "labelColor" => label_color,
    "labelFormat" => label_format,
});

// ============================================================================
// LEGEND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegendConfig {
    pub show: bool,
    pub side: Side,
    pub title: Option<String>,
    pub font: String,
    pub color: String,
    pub title_font: String,
    pub title_color: String,
    pub swatch_size: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            show: true,
            side: Side::Right,
            title: None,
            font: "10px sans-serif".to_string(),
            color: colors::TEXT_PRIMARY.to_string(),
            title_font: "12px sans-serif".to_string(),
            title_color: colors::TEXT_PRIMARY.to_string(),
            swatch_size: 10.0,
        }
    }
}

config_options!(LegendConfig, set, get {
    "show" => show,
    "side" => side,
    "title" => title,
    "font" => font,
    "color" => color,
    "titleFont" => title_font,
    "titleColor" => title_color,
    "swatchSize" => swatch_size,
});

// ============================================================================
// PLOT
// ============================================================================

/// Plot-level options. `style` holds the defaults cascaded to series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotConfig {
    #[serde(flatten)]
    pub style: SeriesStyle,
    pub visible: bool,
    /// Per-type default when unset
    pub stacked: Option<bool>,
    /// Per-type default when unset
    pub discrete: Option<bool>,
    pub x_side: Side,
    pub y_side: Side,
    /// Line plots only: fill the area down to the zero line
    pub fill: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            style: SeriesStyle::default(),
            visible: true,
            stacked: None,
            discrete: None,
            x_side: Side::Bottom,
            y_side: Side::Left,
            fill: false,
        }
    }
}

impl PlotConfig {
    pub fn set(&mut self, option: &str, value: Value) -> Result<()> {
        if SeriesStyle::is_option(option) {
            return self.style.set(option, value);
        }
        match option {
            "visible" => self.visible = from_value(option, value)?,
            "stacked" => self.stacked = from_value(option, value)?,
            "discrete" => self.discrete = from_value(option, value)?,
            "xSide" => self.x_side = from_value(option, value)?,
            "ySide" => self.y_side = from_value(option, value)?,
            "fill" => self.fill = from_value(option, value)?,
            _ => return Err(ChartError::UnknownOption(option.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, option: &str) -> Result<Value> {
        if SeriesStyle::is_option(option) {
            return self.style.get(option);
        }
        match option {
            "visible" => to_value(option, &self.visible),
            "stacked" => to_value(option, &self.stacked),
            "discrete" => to_value(option, &self.discrete),
            "xSide" => to_value(option, &self.x_side),
            "ySide" => to_value(option, &self.y_side),
            "fill" => to_value(option, &self.fill),
            _ => Err(ChartError::UnknownOption(option.to_string())),
        }
    }
}

// ============================================================================
// CHART
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub title: Option<String>,
    pub title_font: String,
    pub title_color: String,
    pub border_width: f64,
    pub border_color: String,
    pub plot_border_width: f64,
    pub plot_border_color: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Pixels between neighbouring bars and at category edges
    pub bar_spacer: f64,
    pub background: Option<String>,
    pub legend: LegendConfig,
    #[serde(alias = "xAxis")]
    pub bottom_axis: AxisConfig,
    #[serde(alias = "yAxis")]
    pub left_axis: AxisConfig,
    pub top_axis: AxisConfig,
    pub right_axis: AxisConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: None,
            title_font: "16px sans-serif".to_string(),
            title_color: colors::TEXT_PRIMARY.to_string(),
            border_width: 0.0,
            border_color: colors::BORDER.to_string(),
            plot_border_width: 1.0,
            plot_border_color: colors::BORDER.to_string(),
            width: None,
            height: None,
            bar_spacer: 4.0,
            background: None,
            legend: LegendConfig::default(),
            bottom_axis: AxisConfig::default(),
            left_axis: AxisConfig::default(),
            top_axis: AxisConfig::default(),
            right_axis: AxisConfig::default(),
        }
    }
}

config_options!(ChartConfig, set_own, get_own {
    "title" => title,
    "titleFont" => title_font,
    "titleColor" => title_color,
    "borderWidth" => border_width,
    "borderColor" => border_color,
    "plotBorderWidth" => plot_border_width,
    "plotBorderColor" => plot_border_color,
    "width" => width,
    "height" => height,
    "barSpacer" => bar_spacer,
    "background" => background,
});

impl ChartConfig {
    pub fn axis(&self, side: Side) -> &AxisConfig {
        match side {
            Side::Bottom => &self.bottom_axis,
            Side::Left => &self.left_axis,
            Side::Top => &self.top_axis,
            Side::Right => &self.right_axis,
        }
    }

    pub fn axis_mut(&mut self, side: Side) -> &mut AxisConfig {
        match side {
            Side::Bottom => &mut self.bottom_axis,
            Side::Left => &mut self.left_axis,
            Side::Top => &mut self.top_axis,
            Side::Right => &mut self.right_axis,
        }
    }

    /// Set an option by flat key (`title`, `legendShow`, `xAxisTicks`, ...)
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let key = ConfigKey::parse(name);
        let result = match key.target {
            ConfigTarget::Chart => self.set_own(&key.option, value),
            ConfigTarget::Legend => self.legend.set(&key.option, value),
            ConfigTarget::Axis(side) => self.axis_mut(side).set(&key.option, value),
        };
        // Report the key the caller used, not the stripped option
        result.map_err(|err| match err {
            ChartError::UnknownOption(_) => ChartError::UnknownOption(name.to_string()),
            other => other,
        })
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        let key = ConfigKey::parse(name);
        let result = match key.target {
            ConfigTarget::Chart => self.get_own(&key.option),
            ConfigTarget::Legend => self.legend.get(&key.option),
            ConfigTarget::Axis(side) => self.axis(side).get(&key.option),
        };
        result.map_err(|err| match err {
            ChartError::UnknownOption(_) => ChartError::UnknownOption(name.to_string()),
            other => other,
        })
    }
}

// ============================================================================
// FLAT KEY RESOLUTION
// ============================================================================

/// Section addressed by a flat option key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigTarget {
    Chart,
    Legend,
    Axis(Side),
}

/// A flat key split into its section and bare option name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKey {
    pub target: ConfigTarget,
    pub option: String,
}

/// Checked in order; the first match wins. `""` must stay last.
const PREFIXES: [(&str, ConfigTarget); 8] = [
    ("legend", ConfigTarget::Legend),
    ("xAxis", ConfigTarget::Axis(Side::Bottom)),
    ("yAxis", ConfigTarget::Axis(Side::Left)),
    ("bottomAxis", ConfigTarget::Axis(Side::Bottom)),
    ("topAxis", ConfigTarget::Axis(Side::Top)),
    ("leftAxis", ConfigTarget::Axis(Side::Left)),
    ("rightAxis", ConfigTarget::Axis(Side::Right)),
    ("", ConfigTarget::Chart),
];

impl ConfigKey {
    pub fn parse(name: &str) -> Self {
        for (prefix, target) in PREFIXES {
            if let Some(rest) = name.strip_prefix(prefix) {
                if prefix.is_empty() || !rest.is_empty() {
                    return Self {
                        target,
                        option: lower_first(rest),
                    };
                }
            }
        }
        Self {
            target: ConfigTarget::Chart,
            option: name.to_string(),
        }
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_key_prefixes() {
        let key = ConfigKey::parse("legendTitle");
        assert_eq!(key.target, ConfigTarget::Legend);
        assert_eq!(key.option, "title");

        let key = ConfigKey::parse("xAxisTicks");
        assert_eq!(key.target, ConfigTarget::Axis(Side::Bottom));
        assert_eq!(key.option, "ticks");

        let key = ConfigKey::parse("rightAxisMinorTicks");
        assert_eq!(key.target, ConfigTarget::Axis(Side::Right));
        assert_eq!(key.option, "minorTicks");

        let key = ConfigKey::parse("titleFont");
        assert_eq!(key.target, ConfigTarget::Chart);
        assert_eq!(key.option, "titleFont");
    }

    #[test]
    fn test_chart_set_routes_to_sections() {
        let mut config = ChartConfig::default();
        config.set("title", json!("Revenue")).unwrap();
        config.set("yAxisScale", json!("log")).unwrap();
        config.set("xAxisTicks", json!(5)).unwrap();
        config.set("bottomAxisTickSide", json!("middle")).unwrap();
        config.set("legendShow", json!(false)).unwrap();

        assert_eq!(config.title.as_deref(), Some("Revenue"));
        assert_eq!(config.left_axis.scale, Scale::Log);
        assert_eq!(config.bottom_axis.ticks, Some(TickPolicy::Every(5.0)));
        assert_eq!(config.bottom_axis.tick_side, TickSide::Middle);
        assert!(!config.legend.show);
        assert_eq!(config.get("xAxisTicks").unwrap(), json!(5.0));
    }

    #[test]
    fn test_explicit_and_auto_ticks() {
        let mut config = AxisConfig::default();
        config.set("ticks", json!([0, 2.5, 10])).unwrap();
        assert_eq!(config.ticks, Some(TickPolicy::Explicit(vec![0.0, 2.5, 10.0])));
        config.set("ticks", Value::Null).unwrap();
        assert_eq!(config.ticks, None);
    }

    #[test]
    fn test_unknown_and_invalid_options() {
        let mut config = ChartConfig::default();
        let err = config.set("xAxisWobble", json!(1)).unwrap_err();
        assert!(matches!(err, ChartError::UnknownOption(name) if name == "xAxisWobble"));

        let err = config.set("borderWidth", json!("wide")).unwrap_err();
        assert!(matches!(err, ChartError::InvalidOptionValue { option, .. } if option == "borderWidth"));
    }

    #[test]
    fn test_plot_config_cascading_keys() {
        let mut config = PlotConfig::default();
        config.set("color", json!("#00ff00")).unwrap();
        config.set("xSide", json!("top")).unwrap();
        assert_eq!(config.style.color.as_deref(), Some("#00ff00"));
        assert_eq!(config.x_side, Side::Top);
        assert_eq!(config.get("visible").unwrap(), json!(true));
    }

    #[test]
    fn test_chart_config_from_json_aliases() {
        let config: ChartConfig = serde_json::from_value(json!({
            "title": "Sales",
            "xAxis": { "ticks": [1, 2, 3] },
            "yAxis": { "scale": "log", "labelFormat": { "fixed": 1 } }
        }))
        .unwrap();
        assert_eq!(config.bottom_axis.ticks, Some(TickPolicy::Explicit(vec![1.0, 2.0, 3.0])));
        assert_eq!(config.left_axis.scale, Scale::Log);
        assert_eq!(config.left_axis.label_format, LabelFormat::Fixed(1));
        assert_eq!(config.legend, LegendConfig::default());
    }
}
