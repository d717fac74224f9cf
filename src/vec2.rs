// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Displacements between points.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::Point;

/// An offset in the plane: an edge vector, a tangent, or the argument of a
/// relative builder call.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component, positive downwards.
    pub y: f64,
}

impl Vec2 {
    /// No displacement.
    pub const ZERO: Vec2 = Vec2::new(0., 0.);

    /// The offset `(x, y)`.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Vec2 {
        Vec2 { x, y }
    }

    /// The point reached by moving from the origin by this offset.
    #[inline]
    pub const fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// The z component of the 3D cross product.
    ///
    /// Positive when `rhs` turns clockwise from `self` on screen, so
    /// `(1, 0) × (0, 1) = 1`.
    #[inline]
    pub fn cross(self, rhs: Vec2) -> f64 {
        self.x * rhs.y - self.y * rhs.x
    }

    /// Length.
    #[inline]
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Squared length, avoiding the square root.
    #[inline]
    pub fn hypot2(self) -> f64 {
        self.dot(self)
    }

    /// Direction in radians, measured from +x towards +y.
    #[inline]
    pub fn atan2(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// The unit vector pointing at angle `th`, with `th` measured like
    /// [`Vec2::atan2`]. Growing angles sweep clockwise on screen.
    #[inline]
    pub fn from_angle(th: f64) -> Vec2 {
        let (s, c) = th.sin_cos();
        Vec2::new(c, s)
    }

    /// Component-wise interpolation towards `rhs`.
    #[inline]
    pub fn lerp(self, rhs: Vec2, t: f64) -> Vec2 {
        self + (rhs - self) * t
    }

    /// This direction scaled to unit length.
    ///
    /// The zero vector has no direction and yields NaN components.
    #[inline]
    pub fn normalize(self) -> Vec2 {
        self / self.hypot()
    }

    /// Whether both components are exactly zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Rotated a quarter turn counter-clockwise on screen: (x, y) → (y, −x).
    #[inline]
    pub fn turn_ccw(self) -> Vec2 {
        Vec2::new(self.y, -self.x)
    }

    /// Rotated a quarter turn clockwise on screen: (x, y) → (−y, x).
    #[inline]
    pub fn turn_cw(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }
}

impl From<(f64, f64)> for Vec2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Vec2 {
        Vec2::new(x, y)
    }
}

impl From<Vec2> for (f64, f64) {
    #[inline]
    fn from(v: Vec2) -> (f64, f64) {
        (v.x, v.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn div(self, s: f64) -> Vec2 {
        Vec2::new(self.x / s, self.y / s)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(feature = "mint")]
impl From<Vec2> for mint::Vector2<f64> {
    #[inline]
    fn from(v: Vec2) -> mint::Vector2<f64> {
        mint::Vector2 { x: v.x, y: v.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Vector2<f64>> for Vec2 {
    #[inline]
    fn from(v: mint::Vector2<f64>) -> Vec2 {
        Vec2::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use crate::Vec2;

    #[test]
    fn cross_sign_is_screen_clockwise() {
        let right = Vec2::new(1.0, 0.0);
        let down = Vec2::new(0.0, 1.0);
        assert!(right.cross(down) > 0.0);
        assert!(down.cross(right) < 0.0);
        assert_eq!(right.cross(right * 3.0), 0.0);
    }

    #[test]
    fn quarter_turns() {
        let v = Vec2::new(2.0, 1.0);
        assert_eq!(v.turn_cw(), Vec2::new(-1.0, 2.0));
        assert_eq!(v.turn_ccw(), Vec2::new(1.0, -2.0));
        assert_eq!(v.turn_cw().turn_ccw(), v);
        assert!(v.cross(v.turn_cw()) > 0.0);
    }

    #[test]
    fn length_and_direction() {
        let v = Vec2::new(-3.0, 4.0);
        assert_eq!(v.hypot(), 5.0);
        assert_eq!(v.hypot2(), 25.0);
        assert_eq!(v.normalize(), Vec2::new(-0.6, 0.8));
        assert!(Vec2::ZERO.normalize().x.is_nan());
        let down = Vec2::from_angle(core::f64::consts::FRAC_PI_2);
        assert!((down - Vec2::new(0.0, 1.0)).hypot() < 1e-15);
        assert!((down.atan2() - core::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }
}
