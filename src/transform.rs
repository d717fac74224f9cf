// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interface through which paths consume coordinate transforms.

use crate::{Affine, Point, Rect};

/// A coordinate transform that can be applied to a path.
///
/// The path engine needs only to map points, plus enough structural
/// information to keep its cached metadata consistent: whether curves
/// survive mapping of their control points, whether rectangles stay
/// rectangles, and the orientation of the linear part.
pub trait Transform {
    /// Map a single point.
    fn map_point(&self, p: Point) -> Point;

    /// Whether the transform has a projective component.
    ///
    /// Projective maps do not preserve Bézier parametrization, so curves
    /// must be subdivided before their control points are mapped.
    fn has_perspective(&self) -> bool {
        false
    }

    /// Whether axis-aligned rectangles map to axis-aligned rectangles.
    fn rect_stays_rect(&self) -> bool;

    /// The determinant of the linear part.
    ///
    /// A negative value mirrors the plane, reversing winding direction.
    fn determinant(&self) -> f64;

    /// Map a rectangle, returning the bounds of its four mapped corners.
    fn map_rect(&self, rect: Rect) -> Rect {
        let p0 = self.map_point(Point::new(rect.x0, rect.y0));
        Rect::new(p0.x, p0.y, p0.x, p0.y)
            .union_pt(self.map_point(Point::new(rect.x1, rect.y0)))
            .union_pt(self.map_point(Point::new(rect.x1, rect.y1)))
            .union_pt(self.map_point(Point::new(rect.x0, rect.y1)))
    }
}

impl Transform for Affine {
    #[inline]
    fn map_point(&self, p: Point) -> Point {
        *self * p
    }

    #[inline]
    fn rect_stays_rect(&self) -> bool {
        Affine::rect_stays_rect(*self)
    }

    #[inline]
    fn determinant(&self) -> f64 {
        Affine::determinant(*self)
    }
}

/// A projective transform, stored as a row-major 3×3 matrix.
///
/// A point `(x, y)` maps to `(X / W, Y / W)` where
/// `[X, Y, W] = M · [x, y, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perspective(pub [f64; 9]);

impl Perspective {
    /// The identity transform.
    pub const IDENTITY: Perspective =
        Perspective([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// The projective matrix equivalent to an affine transform.
    pub fn from_affine(affine: Affine) -> Perspective {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Perspective([a, c, e, b, d, f, 0.0, 0.0, 1.0])
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Perspective::IDENTITY
    }
}

impl Transform for Perspective {
    fn map_point(&self, p: Point) -> Point {
        let m = &self.0;
        let x = m[0] * p.x + m[1] * p.y + m[2];
        let y = m[3] * p.x + m[4] * p.y + m[5];
        let w = m[6] * p.x + m[7] * p.y + m[8];
        // A point at infinity maps to a non-finite point, which the path
        // reports through `is_finite`.
        let w_recip = w.recip();
        Point::new(x * w_recip, y * w_recip)
    }

    fn has_perspective(&self) -> bool {
        self.0[6] != 0.0 || self.0[7] != 0.0 || self.0[8] != 1.0
    }

    fn rect_stays_rect(&self) -> bool {
        if self.has_perspective() {
            return false;
        }
        let m = &self.0;
        Affine::new([m[0], m[3], m[1], m[4], m[2], m[5]]).rect_stays_rect()
    }

    fn determinant(&self) -> f64 {
        self.0[0] * self.0[4] - self.0[1] * self.0[3]
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, Perspective, Point, Rect, Transform};

    #[test]
    fn affine_round_trip() {
        let a = Affine::new([2.0, 0.5, -1.0, 3.0, 4.0, 5.0]);
        let p = Perspective::from_affine(a);
        assert!(!p.has_perspective());
        let pt = Point::new(1.5, -2.0);
        assert!((a.map_point(pt) - p.map_point(pt)).hypot() < 1e-12);
        assert!((a.determinant() - Transform::determinant(&p)).abs() < 1e-12);
    }

    #[test]
    fn projective_map() {
        // w = 1 + x
        let p = Perspective([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        assert!(p.has_perspective());
        assert!(!p.rect_stays_rect());
        assert_eq!(p.map_point(Point::new(1.0, 4.0)), Point::new(0.5, 2.0));
        assert!(!p.map_point(Point::new(-1.0, 0.0)).is_finite());
    }

    #[test]
    fn map_rect_bounds_corners() {
        let r = Affine::rotate(core::f64::consts::FRAC_PI_4).map_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        let h = core::f64::consts::FRAC_1_SQRT_2;
        assert!((r.x0 + h).abs() < 1e-12);
        assert!((r.x1 - h).abs() < 1e-12);
        assert!(r.y0.abs() < 1e-12);
        assert!((r.y1 - 2.0 * h).abs() < 1e-12);
    }
}
