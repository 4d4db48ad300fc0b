//! # plotkit-core
//!
//! Core data model for plotkit canvas charts.
//! Implements Strategy pattern for label formatting.
//!
//! ## Modules
//!
//! - `config` - Typed section configs and flat option-key resolution
//! - `error` - Configuration-time errors
//! - `palette` - Series color assignment
//! - `series` - Data points, series and series styles

pub mod config;
pub mod error;
pub mod palette;
pub mod series;

pub use config::*;
pub use error::*;
pub use palette::*;
pub use series::*;

use serde::{Deserialize, Serialize};

// ============================================================================
// STRATEGY PATTERN: Label Formatters
// ============================================================================

/// Strategy trait for turning tick values into label text
pub trait LabelFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Shortest decimal form, without float noise (`50`, `0.3`, `-2.5`)
#[derive(Debug, Clone, Default)]
pub struct PlainNumberFormatter;

impl LabelFormatter for PlainNumberFormatter {
    fn format(&self, value: f64) -> String {
        let rounded = (value * 1e10).round() / 1e10;
        // Avoid printing "-0"
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        format!("{}", rounded)
    }
}

/// Compact formatter for large numbers (K, M, B suffixes)
#[derive(Debug, Clone, Default)]
pub struct CompactNumberFormatter;

impl LabelFormatter for CompactNumberFormatter {
    fn format(&self, value: f64) -> String {
        let abs = value.abs();
        let sign = if value < 0.0 { "-" } else { "" };

        if abs >= 1_000_000_000.0 {
            format!("{}{}B", sign, PlainNumberFormatter.format(abs / 1_000_000_000.0))
        } else if abs >= 1_000_000.0 {
            format!("{}{}M", sign, PlainNumberFormatter.format(abs / 1_000_000.0))
        } else if abs >= 1_000.0 {
            format!("{}{}K", sign, PlainNumberFormatter.format(abs / 1_000.0))
        } else {
            PlainNumberFormatter.format(value)
        }
    }
}

/// Fixed number of decimals
#[derive(Debug, Clone)]
pub struct FixedFormatter {
    pub decimals: usize,
}

impl Default for FixedFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl LabelFormatter for FixedFormatter {
    fn format(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.decimals)
    }
}

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// Edge of the plot area. Encoded 0-3 in bottom, left, top, right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bottom,
    Left,
    Top,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Left, Side::Top, Side::Right];

    pub fn index(&self) -> usize {
        match self {
            Self::Bottom => 0,
            Self::Left => 1,
            Self::Top => 2,
            Self::Right => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Bottom and top run horizontally
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
        }
    }

    pub fn is_perpendicular_to(&self, other: Side) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    /// Unit vector pointing away from the plot area, in canvas coordinates
    pub fn outward_normal(&self) -> (f64, f64) {
        match self {
            Self::Bottom => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Top => (0.0, -1.0),
            Self::Right => (1.0, 0.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether an axis maps plot keys or plot values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKind {
    X,
    Y,
}

/// Handle returned by `Chart::add_plot`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlotId(pub u64);

impl std::fmt::Display for PlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "plot#{}", self.0)
    }
}
