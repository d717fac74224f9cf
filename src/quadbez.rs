// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::common::nearly_equal;
use crate::param_curve::MAX_Y_EXTREMA;
use crate::{ParamCurve, ParamCurveExtrema, Point};

/// A quadratic Bézier segment, as stored by a quad verb together with the
/// point before it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadBez {
    /// Start, the current point before the verb.
    pub p0: Point,
    /// Off-curve control point.
    pub p1: Point,
    /// End.
    pub p2: Point,
}

impl QuadBez {
    /// A segment from `p0` to `p2` pulled towards `p1`.
    #[inline]
    pub fn new<V: Into<Point>>(p0: V, p1: V, p2: V) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    /// Whether every point collapses onto the start point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        nearly_equal(self.p0, self.p1) && nearly_equal(self.p1, self.p2)
    }

    /// Whether y never turns back along the curve.
    #[inline]
    pub fn is_y_monotonic(&self) -> bool {
        let (y0, y1, y2) = (self.p0.y, self.p1.y, self.p2.y);
        if y0 == y1 {
            return true;
        }
        if y0 < y1 {
            y1 <= y2
        } else {
            y1 >= y2
        }
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let (w0, w1, w2) = (mt * mt, 2.0 * mt * t, t * t);
        Point::new(
            w0 * self.p0.x + w1 * self.p1.x + w2 * self.p2.x,
            w0 * self.p0.y + w1 * self.p1.y + w2 * self.p2.y,
        )
    }

    fn subsegment(&self, range: Range<f64>) -> QuadBez {
        // Blossom: the control point of the piece over [a, b] is B(a, b).
        let (a, b) = (range.start, range.end);
        let blossom = |u: f64, v: f64| {
            let first = self.p0.lerp(self.p1, u);
            let second = self.p1.lerp(self.p2, u);
            first.lerp(second, v)
        };
        QuadBez {
            p0: self.eval(a),
            p1: blossom(a, b),
            p2: self.eval(b),
        }
    }

    /// De Casteljau at one half.
    #[inline]
    fn subdivide(&self) -> (QuadBez, QuadBez) {
        let pm = self.eval(0.5);
        (
            QuadBez::new(self.p0, self.p0.midpoint(self.p1), pm),
            QuadBez::new(pm, self.p1.midpoint(self.p2), self.p2),
        )
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p2
    }
}

impl ParamCurveExtrema for QuadBez {
    fn y_extrema(&self) -> ArrayVec<f64, MAX_Y_EXTREMA> {
        // dy/dt is linear: zero where the two hull edges balance.
        let mut turns = ArrayVec::new();
        let rise = self.p1.y - self.p0.y;
        let fall = self.p1.y - self.p2.y;
        let t = rise / (rise + fall);
        if t > 0.0 && t < 1.0 {
            turns.push(t);
        }
        turns
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParamCurve, ParamCurveExtrema, Point, QuadBez};

    #[test]
    fn pieces_follow_the_parent() {
        let q = QuadBez::new((-2.0, 7.5), (4.0, -1.0), (9.0, 3.0));
        for (a, b) in [(0.0, 1.0), (0.2, 0.9), (0.5, 0.6)] {
            let piece = q.subsegment(a..b);
            for i in 0..=8_u32 {
                let u = f64::from(i) / 8.0;
                let on_parent = q.eval(a + u * (b - a));
                assert!(piece.eval(u).distance(on_parent) < 1e-12);
            }
        }
        let (left, right) = q.subdivide();
        assert_eq!(left.p2, right.p0);
        assert!(left.p1.distance(q.subsegment(0.0..0.5).p1) < 1e-12);
        assert_eq!(q.start(), Point::new(-2.0, 7.5));
        assert_eq!(q.end(), Point::new(9.0, 3.0));
    }

    #[test]
    fn turning_point_in_y() {
        let arch = QuadBez::new((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        assert_eq!(arch.y_extrema().as_slice(), &[0.5]);
        assert!(!arch.is_y_monotonic());
        assert_eq!(arch.y_monotonic_ranges().as_slice(), &[0.0..0.5, 0.5..1.0]);

        let climb = QuadBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 3.0));
        assert!(climb.y_extrema().is_empty());
        assert!(climb.is_y_monotonic());
        let flat = QuadBez::new((0.0, 1.0), (1.0, 1.0), (2.0, 1.0));
        assert!(flat.y_extrema().is_empty());
    }

    #[test]
    fn collapsed_segments() {
        let p = (1.0, 1.0);
        assert!(QuadBez::new(p, p, p).is_degenerate());
        assert!(QuadBez::new(p, p, (1.0001, 1.0)).is_degenerate());
        assert!(!QuadBez::new(p, p, (2.0, 1.0)).is_degenerate());
    }
}
