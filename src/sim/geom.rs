//! Rectangle and line primitives for arena-space geometry.
//!
//! Positions are integer pixels throughout. A [`Line`] is stored in the
//! standard form `A*x + B*y = C`, so parallelism reduces to an integer
//! determinant and intersection points to Cramer's rule.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::SimError;

/// Axis-aligned integer rectangle (position + size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// The zero rectangle. Also what [`Bounds::intersection`] collapses to
    /// for disjoint inputs.
    pub const EMPTY: Self = Self { x: 0, y: 0, width: 0, height: 0 };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width >= 0 && height >= 0);
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Center with integer division (a 5-wide box centers at +2).
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Strict overlap test: rectangles that only touch along an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// Overlapping region of two rectangles, or [`Bounds::EMPTY`] when they
    /// are disjoint.
    pub fn intersection(a: &Bounds, b: &Bounds) -> Bounds {
        if !a.intersects(b) {
            return Bounds::EMPTY;
        }
        let left = a.left().max(b.left());
        let top = a.top().max(b.top());
        let right = a.right().min(b.right());
        let bottom = a.bottom().min(b.bottom());
        Bounds::new(left, top, right - left, bottom - top)
    }
}

/// Infinite line in standard form `A*x + B*y = C`.
///
/// Built from two points; a line has no direction, so their order is
/// irrelevant. Two coincident points produce the degenerate `(0, 0, 0)`
/// coefficients, which [`Line::intersects`] rejects against every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub a: i32,
    pub b: i32,
    pub c: i32,
}

impl Line {
    /// Line through two arena-space points.
    pub fn through(p0: IVec2, p1: IVec2) -> Self {
        let a = p1.y - p0.y;
        let b = p0.x - p1.x;
        Self { a, b, c: a * p0.x + b * p0.y }
    }

    /// Determinant of the coefficient matrix of two lines. Zero exactly when
    /// the lines are parallel or coincident.
    #[inline]
    pub fn determinant(self, other: Line) -> i32 {
        self.a * other.b - other.a * self.b
    }

    /// Whether the two lines meet in a unique point.
    #[inline]
    pub fn intersects(self, other: Line) -> bool {
        self.determinant(other) != 0
    }

    /// Intersection point by Cramer's rule, each coordinate rounded to the
    /// nearest pixel. 64-bit intermediates keep the numerators from
    /// wrapping.
    pub fn intersect(self, other: Line) -> Result<IVec2, SimError> {
        let det = self.determinant(other);
        if det == 0 {
            return Err(SimError::ParallelLines);
        }
        let det = det as i64;
        let x_num = other.b as i64 * self.c as i64 - self.b as i64 * other.c as i64;
        let y_num = self.a as i64 * other.c as i64 - other.a as i64 * self.c as i64;
        Ok(IVec2::new(
            (x_num as f64 / det as f64).round() as i32,
            (y_num as f64 / det as f64).round() as i32,
        ))
    }

    /// The four edge lines of a rectangle, in [top, right, bottom, left]
    /// order, each through two adjacent corners.
    pub fn boundary_lines(bounds: Bounds) -> [Line; 4] {
        let top_left = IVec2::new(bounds.left(), bounds.top());
        let top_right = IVec2::new(bounds.right(), bounds.top());
        let bottom_right = IVec2::new(bounds.right(), bounds.bottom());
        let bottom_left = IVec2::new(bounds.left(), bounds.bottom());
        [
            Line::through(top_left, top_right),
            Line::through(top_right, bottom_right),
            Line::through(bottom_right, bottom_left),
            Line::through(bottom_left, top_left),
        ]
    }
}
