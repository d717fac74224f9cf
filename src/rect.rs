// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangles: bounds, rect contours and oval frames.

use core::fmt;
use core::ops::Add;

use crate::{Point, Vec2};

/// A rectangle, stored as two corners.
///
/// A rect with `x0 < x1` and `y0 < y1` is sorted; the path engine always
/// reports sorted rectangles, but accepts unsorted ones as input.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left.
    pub x0: f64,
    /// Top.
    pub y0: f64,
    /// Right.
    pub x1: f64,
    /// Bottom.
    pub y1: f64,
}

impl Rect {
    /// The bounds of an empty path.
    pub const ZERO: Rect = Rect::new(0., 0., 0., 0.);

    /// The rectangle with edges at the given coordinates, unsorted if they
    /// come out of order.
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// The sorted rectangle with `p0` and `p1` at opposite corners.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect::new(p0.x, p0.y, p1.x, p1.y).abs()
    }

    /// The frame of an ellipse with the given center and radii.
    #[inline]
    pub fn from_center(center: impl Into<Point>, half_width: f64, half_height: f64) -> Rect {
        let c = center.into();
        Rect::new(
            c.x - half_width,
            c.y - half_height,
            c.x + half_width,
            c.y + half_height,
        )
    }

    /// `x1 - x0`, negative when unsorted.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// `y1 - y0`, negative when unsorted.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Midpoint of the diagonal.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// The same area with its edges sorted.
    #[inline]
    pub fn abs(&self) -> Rect {
        let Rect { x0, y0, x1, y1 } = *self;
        Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// Whether the rectangle encloses no area.
    ///
    /// Unsorted rectangles and rectangles with NaN coordinates are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.x0 < self.x1 && self.y0 < self.y1)
    }

    /// Whether all four coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    /// Bounds covering both sorted rectangles.
    #[inline]
    pub fn union(&self, other: Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Bounds grown to take in `pt`.
    #[inline]
    pub fn union_pt(&self, pt: Point) -> Rect {
        Rect::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// Half-open containment: the left and top edges are inside, the right
    /// and bottom edges are not.
    ///
    /// An empty rectangle contains nothing, and no rectangle contains a NaN
    /// point.
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        !self.is_empty() && pt.x >= self.x0 && pt.x < self.x1 && pt.y >= self.y0 && pt.y < self.y1
    }

    /// Whether `other` lies entirely inside `self`, edges included.
    ///
    /// Both rectangles must be non-empty.
    #[inline]
    pub fn contains_rect(&self, other: Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x0 <= other.x0
            && self.y0 <= other.y0
            && self.x1 >= other.x1
            && self.y1 >= other.y1
    }

    /// The bounding box of a slice of points, and whether they were all finite.
    ///
    /// Fewer than two points, or any non-finite coordinate, give [`Rect::ZERO`].
    pub fn bounding(points: &[Point]) -> (Rect, bool) {
        let Some((&first, rest)) = points.split_first() else {
            return (Rect::ZERO, true);
        };
        if rest.is_empty() {
            return (Rect::ZERO, first.is_finite());
        }
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        // 0 * inf and 0 * NaN are both NaN, and NaN is sticky.
        let mut accum = 0.0;
        for &p in points {
            accum = accum * p.x * p.y;
            rect = rect.union_pt(p);
        }
        if accum == 0.0 {
            (rect, true)
        } else {
            (Rect::ZERO, false)
        }
    }
}

impl Add<Vec2> for Rect {
    type Output = Rect;

    #[inline]
    fn add(self, v: Vec2) -> Rect {
        Rect::new(self.x0 + v.x, self.y0 + v.y, self.x1 + v.x, self.y1 + v.y)
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect[{:?}, {:?} .. {:?}, {:?}]", self.x0, self.y0, self.x1, self.y1)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Point, Rect, Vec2};

    #[test]
    fn half_open_contains() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.999, 5.0)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.0)));
        assert!(!r.contains(Point::new(f64::NAN, 5.0)));
        assert!(!Rect::ZERO.contains(Point::ZERO));
    }

    #[test]
    fn contains_rect() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains_rect(Rect::new(2.0, 2.0, 8.0, 8.0)));
        assert!(outer.contains_rect(outer));
        assert!(!outer.contains_rect(Rect::new(2.0, 2.0, 11.0, 8.0)));
        assert!(!outer.contains_rect(Rect::new(2.0, 2.0, 2.0, 8.0)));
    }

    #[test]
    fn bounding_points() {
        let pts = [
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(1.0, 1.0),
        ];
        assert_eq!(Rect::bounding(&pts), (Rect::new(-2.0, -1.0, 3.0, 4.0), true));
        assert_eq!(Rect::bounding(&pts[..1]), (Rect::ZERO, true));
        assert_eq!(Rect::bounding(&[]), (Rect::ZERO, true));
        let bad = [Point::new(0.0, 0.0), Point::new(f64::INFINITY, 1.0)];
        assert_eq!(Rect::bounding(&bad), (Rect::ZERO, false));
        let nan = [Point::new(f64::NAN, 0.0)];
        assert_eq!(Rect::bounding(&nan), (Rect::ZERO, false));
    }

    #[test]
    fn abs_and_offset() {
        let r = Rect::new(5.0, 6.0, 1.0, 2.0).abs();
        assert_eq!(r, Rect::new(1.0, 2.0, 5.0, 6.0));
        assert_eq!(r + Vec2::new(1.0, 1.0), Rect::new(2.0, 3.0, 6.0, 7.0));
        assert!(!r.is_empty());
        assert!(Rect::new(5.0, 6.0, 1.0, 2.0).is_empty());
    }
}
