// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine maps applied to path points.

use core::ops::Mul;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::{Point, Vec2};

/// A 2×3 matrix acting on points.
///
/// With coefficients `[a, b, c, d, e, f]` a point `(x, y)` lands on
/// `(a x + c y + e, b x + d y + f)`. The first four entries are the linear
/// part, column by column.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// Leaves every point in place.
    pub const IDENTITY: Affine = Affine::scale(1.0);

    /// The map with the given coefficients.
    #[inline]
    pub const fn new(coeffs: [f64; 6]) -> Affine {
        Affine(coeffs)
    }

    /// Uniform scaling about the origin.
    #[inline]
    pub const fn scale(s: f64) -> Affine {
        Affine::scale_non_uniform(s, s)
    }

    /// Independent scaling of each axis about the origin. A negative factor
    /// mirrors and so reverses winding.
    #[inline]
    pub const fn scale_non_uniform(sx: f64, sy: f64) -> Affine {
        Affine([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Rotation about the origin by `th` radians, clockwise on screen.
    #[inline]
    pub fn rotate(th: f64) -> Affine {
        let (sin, cos) = th.sin_cos();
        Affine([cos, sin, -sin, cos, 0.0, 0.0])
    }

    /// Shift by a fixed offset.
    #[inline]
    pub fn translate(offset: impl Into<Vec2>) -> Affine {
        let Vec2 { x, y } = offset.into();
        Affine([1.0, 0.0, 0.0, 1.0, x, y])
    }

    /// `[a, b, c, d, e, f]`.
    #[inline]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// Signed area scale of the linear part. Negative for mirroring maps.
    #[inline]
    pub fn determinant(self) -> f64 {
        let [a, b, c, d, _, _] = self.0;
        a * d - b * c
    }

    /// Whether every axis-aligned rectangle maps to an axis-aligned rectangle.
    ///
    /// True for scales and translations, optionally combined with a quarter
    /// turn, as long as neither axis collapses.
    pub fn rect_stays_rect(self) -> bool {
        let [a, b, c, d, _, _] = self.0;
        (b == 0.0 && c == 0.0 && a != 0.0 && d != 0.0)
            || (a == 0.0 && d == 0.0 && b != 0.0 && c != 0.0)
    }
}

impl Default for Affine {
    #[inline]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }
}

/// `outer * inner` applies `inner` first.
impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, inner: Affine) -> Affine {
        let [a, b, c, d, e, f] = self.0;
        let apply_linear = |x: f64, y: f64| (a * x + c * y, b * x + d * y);
        let [ia, ib, ic, id, ie, if_] = inner.0;
        let (na, nb) = apply_linear(ia, ib);
        let (nc, nd) = apply_linear(ic, id);
        let (ne, nf) = apply_linear(ie, if_);
        Affine([na, nb, nc, nd, ne + e, nf + f])
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, Point};
    use core::f64::consts::FRAC_PI_2;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn elementary_maps() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(Affine::default() * p, p);
        assert_eq!(Affine::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_eq!(Affine::scale_non_uniform(-1.0, 0.5) * p, Point::new(-3.0, 2.0));
        assert_eq!(Affine::translate((5.0, -6.0)) * p, Point::new(8.0, -2.0));
        // A quarter turn takes +x to +y: clockwise on screen.
        assert!(close(Affine::rotate(FRAC_PI_2) * Point::new(1.0, 0.0), Point::new(0.0, 1.0)));
        assert!(close(Affine::rotate(FRAC_PI_2) * p, Point::new(-4.0, 3.0)));
    }

    #[test]
    fn composition_applies_right_first() {
        let shift = Affine::translate((10.0, 0.0));
        let double = Affine::scale(2.0);
        let p = Point::new(1.0, 1.0);
        assert_eq!((shift * double) * p, Point::new(12.0, 2.0));
        assert_eq!((double * shift) * p, Point::new(22.0, 2.0));

        let m = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let n = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);
        for q in [Point::ZERO, Point::new(1.0, 0.0), Point::new(-2.0, 7.0)] {
            assert!(close(m * (n * q), (m * n) * q));
        }
        assert!(((m * n).determinant() - m.determinant() * n.determinant()).abs() < 1e-9);
    }

    #[test]
    fn rect_preservation() {
        assert!(Affine::scale_non_uniform(2.0, -3.0).rect_stays_rect());
        assert!(Affine::translate((1.0, 2.0)).rect_stays_rect());
        assert!(Affine::new([0.0, 1.0, -1.0, 0.0, 0.0, 0.0]).rect_stays_rect());
        assert!(!Affine::rotate(0.3).rect_stays_rect());
        assert!(!Affine::scale_non_uniform(0.0, 1.0).rect_stays_rect());
        assert!(Affine::scale_non_uniform(1.0, -1.0).determinant() < 0.0);
    }
}
