//! Data points, series and series styles

use crate::config::{from_value, to_value};
use crate::{ChartError, LabelFormatter, PlainNumberFormatter, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

// ============================================================================
// KEYS AND DATA POINTS
// ============================================================================

/// X key of a data point: a number on continuous axes, a category name on
/// discrete ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Number(f64),
    Label(String),
}

impl Key {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Label(_) => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&PlainNumberFormatter.format(*n)),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl From<f64> for Key {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Label(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Label(s)
    }
}

/// One (key, value) pair. Serializes as a two-element array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint(pub Key, pub f64);

impl DataPoint {
    pub fn new(key: impl Into<Key>, value: f64) -> Self {
        Self(key.into(), value)
    }

    pub fn key(&self) -> &Key {
        &self.0
    }

    pub fn value(&self) -> f64 {
        self.1
    }
}

// ============================================================================
// SHAPES
// ============================================================================

/// Marker shape for scatter points and line vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Diamond,
    Triangle,
    Cross,
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Diamond => "diamond",
            Self::Triangle => "triangle",
            Self::Cross => "cross",
        }
    }
}

impl FromStr for Shape {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            "diamond" => Ok(Self::Diamond),
            "triangle" => Ok(Self::Triangle),
            "cross" => Ok(Self::Cross),
            other => Err(ChartError::UnknownShape(other.to_string())),
        }
    }
}

// ============================================================================
// SERIES STYLE
// ============================================================================

/// Display options shared by series and plots.
///
/// A plot's style supplies defaults for every series that leaves the field
/// unset, see [`SeriesStyle::or`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_size: Option<f64>,
}

impl SeriesStyle {
    pub const OPTIONS: [&'static str; 5] = ["color", "opacity", "shape", "lineWidth", "shapeSize"];

    pub fn is_option(option: &str) -> bool {
        Self::OPTIONS.contains(&option)
    }

    pub fn set(&mut self, option: &str, value: Value) -> Result<()> {
        match option {
            "color" => self.color = from_value(option, value)?,
            "opacity" => self.opacity = from_value(option, value)?,
            "shape" => {
                self.shape = match value {
                    Value::Null => None,
                    Value::String(name) => Some(name.parse()?),
                    other => return Err(ChartError::UnknownShape(other.to_string())),
                }
            }
            "lineWidth" => self.line_width = from_value(option, value)?,
            "shapeSize" => self.shape_size = from_value(option, value)?,
            _ => return Err(ChartError::UnknownOption(option.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, option: &str) -> Result<Value> {
        match option {
            "color" => to_value(option, &self.color),
            "opacity" => to_value(option, &self.opacity),
            "shape" => to_value(option, &self.shape),
            "lineWidth" => to_value(option, &self.line_width),
            "shapeSize" => to_value(option, &self.shape_size),
            _ => Err(ChartError::UnknownOption(option.to_string())),
        }
    }

    /// Field-wise merge: own values win, unset fields come from `fallback`
    pub fn or(&self, fallback: &SeriesStyle) -> SeriesStyle {
        SeriesStyle {
            color: self.color.clone().or_else(|| fallback.color.clone()),
            opacity: self.opacity.or(fallback.opacity),
            shape: self.shape.or(fallback.shape),
            line_width: self.line_width.or(fallback.line_width),
            shape_size: self.shape_size.or(fallback.shape_size),
        }
    }
}

// ============================================================================
// SERIES
// ============================================================================

/// A named sequence of data points and its display options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Series {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data: Vec<DataPoint>,
    #[serde(flatten)]
    pub style: SeriesStyle,
    /// Palette color handed out by the chart. Used only when neither the
    /// series nor its plot sets a color.
    #[serde(skip)]
    pub assigned_color: Option<String>,
}

impl Series {
    pub fn new(data: Vec<DataPoint>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// Series keyed by 0-based index
    pub fn from_values(values: &[f64]) -> Self {
        Self::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| DataPoint::new(i as f64, v))
                .collect(),
        )
    }

    /// Series of (category, value) pairs
    pub fn from_pairs<K: Into<Key>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self::new(pairs.into_iter().map(|(k, v)| DataPoint::new(k, v)).collect())
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.style.color = Some(color.into());
        self
    }

    pub fn set_data(&mut self, data: Vec<DataPoint>) {
        self.data = data;
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.data.iter().map(DataPoint::key)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(DataPoint::value)
    }

    pub fn set(&mut self, option: &str, value: Value) -> Result<()> {
        if option == "name" {
            self.name = from_value(option, value)?;
            return Ok(());
        }
        self.style.set(option, value)
    }

    pub fn get(&self, option: &str) -> Result<Value> {
        if option == "name" {
            return to_value(option, &self.name);
        }
        self.style.get(option)
    }
}
