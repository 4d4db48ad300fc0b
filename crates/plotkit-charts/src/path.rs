//! Canvas path building
//!
//! Paths are built with a fluent API and replayed onto a canvas, so the same
//! geometry can be filled and stroked without rebuilding it.

use crate::canvas::Canvas;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Begin a new canvas path and replay every command onto it
    pub fn trace(&self, canvas: &mut dyn Canvas) {
        canvas.begin_path();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(x, y) => canvas.move_to(x, y),
                PathCommand::LineTo(x, y) => canvas.line_to(x, y),
                PathCommand::Arc { x, y, radius, start, end } => canvas.arc(x, y, radius, start, end),
                PathCommand::Close => canvas.close_path(),
            }
        }
    }

    pub fn fill(&self, canvas: &mut dyn Canvas) {
        self.trace(canvas);
        canvas.fill();
    }

    pub fn stroke(&self, canvas: &mut dyn Canvas) {
        self.trace(canvas);
        canvas.stroke();
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(x, y));
        self
    }

    pub fn arc(mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Self {
        self.commands.push(PathCommand::Arc { x, y, radius, start, end });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> Path {
        Path {
            commands: self.commands,
        }
    }
}

/// Polyline through `points` (not closed)
pub fn line_path(points: &[(f64, f64)]) -> Path {
    let Some((&(x, y), rest)) = points.split_first() else {
        return Path::default();
    };
    rest.iter()
        .fold(PathBuilder::new().move_to(x, y), |b, &(x, y)| b.line_to(x, y))
        .build()
}

/// Closed area between the polyline through `points` and the horizontal
/// line at `baseline_y`
pub fn area_path(points: &[(f64, f64)], baseline_y: f64) -> Path {
    let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) else {
        return Path::default();
    };

    let builder = points
        .iter()
        .fold(PathBuilder::new().move_to(first_x, baseline_y), |b, &(x, y)| b.line_to(x, y));

    builder.line_to(last_x, baseline_y).close().build()
}
