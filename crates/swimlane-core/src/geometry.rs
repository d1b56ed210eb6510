//! Geometric primitives for diagram layout.
//!
//! This module provides the geometric types the layout engine works with when
//! moving shapes and routing connectors.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Diagrams use the same coordinate system as BPMN diagram interchange and SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use swimlane_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Returns a new point with absolute values of both coordinates
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates.
///
/// Diagram interchange stores shape geometry as a top-left corner plus a
/// size, so [`Bounds::new_from_top_left`] is the usual constructor.
///
/// # Examples
///
/// ```
/// # use swimlane_core::geometry::{Bounds, Point, Size};
/// let task = Bounds::new_from_top_left(Point::new(100.0, 60.0), Size::new(100.0, 80.0));
///
/// assert_eq!(task.right_mid(), Point::new(200.0, 100.0));
/// assert_eq!(task.left_mid(), Point::new(100.0, 100.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the midpoint of the right edge, where outgoing connectors start
    pub fn right_mid(self) -> Point {
        Point::new(self.max_x, self.center().y)
    }

    /// Returns the midpoint of the left edge, where incoming connectors end
    pub fn left_mid(self) -> Point {
        Point::new(self.min_x, self.center().y)
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Returns bounds of the same size whose top edge sits at `y`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swimlane_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));
    ///
    /// let moved = bounds.with_min_y(100.0);
    /// assert_eq!(moved.min_x(), 10.0);
    /// assert_eq!(moved.min_y(), 100.0);
    /// assert_eq!(moved.height(), 30.0);
    /// ```
    pub fn with_min_y(self, y: f32) -> Self {
        self.translate(Point::new(0.0, y - self.min_y))
    }

    /// Returns bounds of the same size whose vertical center sits at `y`
    pub fn with_center_y(self, y: f32) -> Self {
        self.with_min_y(y - self.height() / 2.0)
    }

    /// Moves the bounds by the specified offset.
    ///
    /// This translates both the minimum and maximum coordinates by the given amount.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Returns `true` when `y` lies in the half-open band `[min_y, max_y)`
    pub fn contains_y(self, y: f32) -> bool {
        y >= self.min_y && y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_sub_and_abs() {
        let delta = Point::new(1.0, 8.0).sub_point(Point::new(4.0, 2.0));
        assert_eq!(delta, Point::new(-3.0, 6.0));
        assert_eq!(delta.abs(), Point::new(3.0, 6.0));
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(80.0, 40.0));

        assert_eq!(bounds.min_x(), 100.0);
        assert_eq!(bounds.min_y(), 100.0);
        assert_eq!(bounds.max_x(), 180.0);
        assert_eq!(bounds.max_y(), 140.0);
        assert_eq!(bounds.width(), 80.0);
        assert_eq!(bounds.height(), 40.0);
    }

    #[test]
    fn test_bounds_edge_midpoints() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(100.0, 36.0));

        assert_eq!(bounds.right_mid(), Point::new(110.0, 38.0));
        assert_eq!(bounds.left_mid(), Point::new(10.0, 38.0));
    }

    #[test]
    fn test_bounds_with_min_y_keeps_size_and_x() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(100.0, 36.0));
        let moved = bounds.with_min_y(-50.0);

        assert_eq!(moved.min_x(), 10.0);
        assert_eq!(moved.min_y(), -50.0);
        assert_eq!(moved.width(), bounds.width());
        assert_eq!(moved.height(), bounds.height());
    }

    #[test]
    fn test_bounds_with_center_y() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(36.0, 36.0));
        let moved = bounds.with_center_y(100.0);

        assert_approx_eq!(f32, moved.center().y(), 100.0);
        assert_approx_eq!(f32, moved.min_y(), 82.0);
    }

    #[test]
    fn test_bounds_contains_y_is_half_open() {
        let lane = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(500.0, 200.0));

        assert!(lane.contains_y(0.0));
        assert!(lane.contains_y(199.9));
        assert!(!lane.contains_y(200.0));
        assert!(!lane.contains_y(-0.1));
    }

}
