// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points in the path's coordinate space.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::Vec2;

/// A location in the y-down plane of a path.
///
/// Coordinates may be NaN or infinite. Paths store such points as given and
/// report themselves as non-finite rather than rejecting them.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal position, growing to the right.
    pub x: f64,
    /// Vertical position, growing downwards.
    pub y: f64,
}

impl Point {
    /// The origin, where drawing starts on an empty path.
    pub const ZERO: Point = Point::new(0., 0.);

    /// A point at `(x, y)`.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// The offset of this point from the origin.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// The point a fraction `t` of the way towards `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }

    /// Halfway between two points; exact for the de Casteljau splits.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).hypot()
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Whether either coordinate is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Point {
        Point::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(p: Point) -> (f64, f64) {
        (p.x, p.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, v: Vec2) -> Point {
        Point::new(self.x + v.x, self.y + v.y)
    }
}

impl AddAssign<Vec2> for Point {
    #[inline]
    fn add_assign(&mut self, v: Vec2) {
        *self = *self + v;
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, v: Vec2) -> Point {
        Point::new(self.x - v.x, self.y - v.y)
    }
}

impl SubAssign<Vec2> for Point {
    #[inline]
    fn sub_assign(&mut self, v: Vec2) {
        *self = *self - v;
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, origin: Point) -> Vec2 {
        Vec2::new(self.x - origin.x, self.y - origin.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

#[cfg(feature = "mint")]
impl From<Point> for mint::Point2<f64> {
    #[inline]
    fn from(p: Point) -> mint::Point2<f64> {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point2<f64>> for Point {
    #[inline]
    fn from(p: mint::Point2<f64>) -> Point {
        Point::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Point, Vec2};

    #[test]
    fn offsets() {
        let mut p = Point::new(3.0, -4.0);
        assert_eq!(p - Point::ZERO, Vec2::new(3.0, -4.0));
        p += Vec2::new(1.0, 1.0);
        assert_eq!(p, Point::new(4.0, -3.0));
        p -= Vec2::new(4.0, 0.0);
        assert_eq!(p, Point::new(0.0, -3.0));
        assert_eq!(p.distance(Point::new(4.0, 0.0)), 5.0);
    }

    #[test]
    fn interpolation() {
        let a = Point::new(-2.0, 8.0);
        let b = Point::new(6.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 0.25), Point::new(0.0, 6.0));
        assert_eq!(a.midpoint(b), a.lerp(b, 0.5));
    }

    #[test]
    fn non_finite_coordinates() {
        assert!(Point::new(1.0, -3.0).is_finite());
        let inf = Point::new(f64::INFINITY, 0.0);
        assert!(!inf.is_finite() && !inf.is_nan());
        let nan = Point::new(0.0, f64::NAN);
        assert!(!nan.is_finite() && nan.is_nan());
        assert_ne!(nan, nan);
        assert_eq!(Point::from((1.5, 2.5)), Point::new(1.5, 2.5));
        assert_eq!(<(f64, f64)>::from(Point::new(1.5, 2.5)), (1.5, 2.5));
    }
}
