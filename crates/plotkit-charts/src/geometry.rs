//! Rectangles, per-side insets, affine transforms and axis frames

use plotkit_core::Side;

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrink by `insets`, never below zero size
    pub fn inset(&self, insets: &Insets) -> Self {
        Self::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.left - insets.right).max(0.0),
            (self.height - insets.top - insets.bottom).max(0.0),
        )
    }

    /// Extent along the given side's edge
    pub fn length_along(&self, side: Side) -> f64 {
        if side.is_horizontal() { self.width } else { self.height }
    }

    /// Extent perpendicular to the given side's edge
    pub fn length_across(&self, side: Side) -> f64 {
        if side.is_horizontal() { self.height } else { self.width }
    }

    /// Band of thickness `size` outside `side` of this rectangle, `offset`
    /// pixels away from the edge, spanning the edge's full length.
    pub fn band(&self, side: Side, offset: f64, size: f64) -> Rect {
        match side {
            Side::Bottom => Rect::new(self.x, self.bottom() + offset, self.width, size),
            Side::Top => Rect::new(self.x, self.y - offset - size, self.width, size),
            Side::Left => Rect::new(self.x - offset - size, self.y, size, self.height),
            Side::Right => Rect::new(self.right() + offset, self.y, size, self.height),
        }
    }

    /// Corner where the edge of `a` meets the edge of perpendicular `b`
    pub fn corner(&self, a: Side, b: Side) -> (f64, f64) {
        let (horizontal, vertical) = if a.is_horizontal() { (a, b) } else { (b, a) };
        let y = if horizontal == Side::Top { self.y } else { self.bottom() };
        let x = if vertical == Side::Right { self.right() } else { self.x };
        (x, y)
    }
}

/// Per-side pixel amounts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(amount: f64) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Top => self.top,
            Side::Right => self.right,
        }
    }

    pub fn set(&mut self, side: Side, amount: f64) {
        match side {
            Side::Bottom => self.bottom = amount,
            Side::Left => self.left = amount,
            Side::Top => self.top = amount,
            Side::Right => self.right = amount,
        }
    }
}

// ============================================================================
// AFFINE TRANSFORMS
// ============================================================================

/// 2D affine transform in canvas order: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translation(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// `self * other`: applies `other` first, then `self`
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }
}

// ============================================================================
// FRAMES
// ============================================================================

/// Local coordinate frame: an origin plus two unit axes in canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: (f64, f64),
    pub ux: (f64, f64),
    pub uy: (f64, f64),
}

/// Direction in which values grow along the axis on `side`: away from the
/// companion axis it shares a corner with.
fn along(side: Side, companion: Side) -> (f64, f64) {
    if side.is_horizontal() {
        if companion == Side::Right { (-1.0, 0.0) } else { (1.0, 0.0) }
    } else if companion == Side::Top {
        (0.0, 1.0)
    } else {
        (0.0, -1.0)
    }
}

impl Frame {
    /// Frame for drawing the axis on `side` as if it were a bottom axis:
    /// x runs along the axis, y points away from the plot area.
    pub fn for_axis(side: Side, companion: Side, plot_area: &Rect) -> Self {
        Self {
            origin: plot_area.corner(side, companion),
            ux: along(side, companion),
            uy: side.outward_normal(),
        }
    }

    /// Frame for drawing data against the X axis on `x_side`: x runs along
    /// the X axis, y runs into the plot area away from it.
    pub fn for_plot(x_side: Side, companion: Side, plot_area: &Rect) -> Self {
        let (nx, ny) = x_side.outward_normal();
        Self {
            origin: plot_area.corner(x_side, companion),
            ux: along(x_side, companion),
            uy: (-nx, -ny),
        }
    }

    pub fn matrix(&self) -> Matrix {
        Matrix::new(self.ux.0, self.ux.1, self.uy.0, self.uy.1, self.origin.0, self.origin.1)
    }

    pub fn to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        self.matrix().apply(x, y)
    }
}
