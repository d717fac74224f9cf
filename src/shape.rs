// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A generic trait for shapes.

use crate::{Affine, Direction, Path, Point, Rect};

/// Queries common to closed shapes.
pub trait Shape {
    /// Winding number of the shape around `pt`.
    ///
    /// Edges heading down (increasing y) that pass to the left of the point
    /// count +1, those heading up count −1.
    fn winding(&self, pt: Point) -> i32;

    /// The smallest rectangle that encloses the shape.
    fn bounding_box(&self) -> Rect;

    /// If the shape is a rectangle, make it available.
    fn as_rect(&self) -> Option<Rect> {
        None
    }

    /// Whether `pt` is inside the shape.
    ///
    /// The default fills where the winding number is non-zero.
    fn contains(&self, pt: Point) -> bool {
        self.winding(pt) != 0
    }

    /// Append the outline of the shape to `path` as a new contour.
    fn add_to_path(&self, path: &mut Path, dir: Direction);
}

impl Shape for Rect {
    /// A rectangle traced clockwise from `(x0, y0)` winds −1 around points
    /// inside it; unsorted rectangles wind the other way on each flipped
    /// axis.
    #[inline]
    fn winding(&self, pt: Point) -> i32 {
        if !self.abs().contains(pt) {
            return 0;
        }
        if (self.x1 > self.x0) != (self.y1 > self.y0) {
            1
        } else {
            -1
        }
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        self.abs()
    }

    #[inline]
    fn as_rect(&self) -> Option<Rect> {
        Some(*self)
    }

    #[inline]
    fn contains(&self, pt: Point) -> bool {
        self.abs().contains(pt)
    }

    fn add_to_path(&self, path: &mut Path, dir: Direction) {
        path.add_rect(*self, dir);
    }
}

impl Shape for Path {
    fn winding(&self, pt: Point) -> i32 {
        Path::winding(self, pt)
    }

    fn bounding_box(&self) -> Rect {
        self.bounds()
    }

    fn as_rect(&self) -> Option<Rect> {
        Path::as_rect(self)
    }

    /// Containment under the path's own fill type.
    fn contains(&self, pt: Point) -> bool {
        Path::contains(self, pt)
    }

    fn add_to_path(&self, path: &mut Path, dir: Direction) {
        match dir {
            Direction::CounterClockwise if self.direction() == Direction::Clockwise => {
                path.reverse_add_path(self);
            }
            Direction::Clockwise if self.direction() == Direction::CounterClockwise => {
                path.reverse_add_path(self);
            }
            _ => path.add_path(self, &Affine::IDENTITY),
        }
    }
}
