//! Configuration-time errors
//!
//! Every error here is raised synchronously while a chart is being configured
//! or drawn. None of them is retryable; callers fix the configuration.

use crate::{PlotId, Side};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Canvas element not found: {0}")]
    CanvasNotFound(String),

    #[error("Plot is not registered with this chart: {0}")]
    PlotNotFound(PlotId),

    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    #[error("Plots sharing the {side} axis disagree on whether it is discrete")]
    DiscretenessMismatch { side: Side },

    #[error("X axis on {x} and Y axis on {y} must be perpendicular")]
    ParallelAxes { x: Side, y: Side },

    #[error("The {side} axis is used both as an X axis and as a Y axis")]
    AxisRoleConflict { side: Side },

    #[error("No axis was resolved for the {0} side")]
    MissingAxis(Side),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value for option {option}")]
    InvalidOptionValue {
        option: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid chart definition: {0}")]
    Definition(#[from] serde_json::Error),
}

impl ChartError {
    pub(crate) fn invalid_value(option: &str, source: serde_json::Error) -> Self {
        Self::InvalidOptionValue {
            option: option.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = ChartError::CanvasNotFound("sales".into());
        assert_eq!(err.to_string(), "Canvas element not found: sales");

        let err = ChartError::DiscretenessMismatch { side: Side::Bottom };
        assert!(err.to_string().contains("bottom"));

        let err = ChartError::PlotNotFound(PlotId(7));
        assert!(err.to_string().contains("plot#7"));
    }
}
