// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::common::{nearly_equal, solve_quadratic_open_unit};
use crate::param_curve::MAX_Y_EXTREMA;
use crate::{ParamCurve, ParamCurveExtrema, Point};

/// A cubic Bézier segment: the point before a cubic verb and its three
/// points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// Start.
    pub p0: Point,
    /// Control point leaving the start.
    pub p1: Point,
    /// Control point entering the end.
    pub p2: Point,
    /// End.
    pub p3: Point,
}

impl CubicBez {
    /// A segment from `p0` to `p3` shaped by `p1` and `p2`.
    #[inline]
    pub fn new<V: Into<Point>>(p0: V, p1: V, p2: V, p3: V) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Whether every point collapses onto the start point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        nearly_equal(self.p0, self.p1) && nearly_equal(self.p1, self.p2) && nearly_equal(self.p2, self.p3)
    }

    /// The same curve traversed from end to start.
    #[inline]
    #[must_use]
    pub fn reverse(&self) -> CubicBez {
        CubicBez::new(self.p3, self.p2, self.p1, self.p0)
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let w = [mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t];
        let pts = [self.p0, self.p1, self.p2, self.p3];
        let (mut x, mut y) = (0.0, 0.0);
        for (w, p) in w.iter().zip(pts) {
            x += w * p.x;
            y += w * p.y;
        }
        Point::new(x, y)
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        // Control points of the piece over [a, b] are the blossom values
        // B(a, a, b) and B(a, b, b).
        let (a, b) = (range.start, range.end);
        let blossom = |u: f64, v: f64, w: f64| {
            let q0 = self.p0.lerp(self.p1, u);
            let q1 = self.p1.lerp(self.p2, u);
            let q2 = self.p2.lerp(self.p3, u);
            let r0 = q0.lerp(q1, v);
            let r1 = q1.lerp(q2, v);
            r0.lerp(r1, w)
        };
        CubicBez {
            p0: self.eval(a),
            p1: blossom(a, a, b),
            p2: blossom(a, b, b),
            p3: self.eval(b),
        }
    }

    /// De Casteljau at one half.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        let p01 = self.p0.midpoint(self.p1);
        let p12 = self.p1.midpoint(self.p2);
        let p23 = self.p2.midpoint(self.p3);
        let p012 = p01.midpoint(p12);
        let p123 = p12.midpoint(p23);
        let pm = p012.midpoint(p123);
        (
            CubicBez::new(self.p0, p01, p012, pm),
            CubicBez::new(pm, p123, p23, self.p3),
        )
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveExtrema for CubicBez {
    fn y_extrema(&self) -> ArrayVec<f64, MAX_Y_EXTREMA> {
        // dy/dt / 3 is the quadratic Bézier over the hull edge heights.
        let [e0, e1, e2] = [
            self.p1.y - self.p0.y,
            self.p2.y - self.p1.y,
            self.p3.y - self.p2.y,
        ];
        solve_quadratic_open_unit(e0, 2.0 * (e1 - e0), e0 - 2.0 * e1 + e2)
    }
}

#[cfg(test)]
mod tests {
    use crate::{CubicBez, ParamCurve, ParamCurveExtrema, Point};

    #[test]
    fn pieces_follow_the_parent() {
        let c = CubicBez::new((1.5, -2.0), (8.0, 0.5), (-3.0, 6.0), (4.0, 4.0));
        for (a, b) in [(0.0, 1.0), (0.1, 0.8), (0.45, 0.5)] {
            let piece = c.subsegment(a..b);
            for i in 0..=10_u32 {
                let u = f64::from(i) / 10.0;
                assert!(piece.eval(u).distance(c.eval(a + u * (b - a))) < 1e-12);
            }
        }
        let (left, right) = c.subdivide();
        assert_eq!(left.p3, right.p0);
        assert!(left.eval(0.5).distance(c.eval(0.25)) < 1e-12);
        assert!(right.eval(0.5).distance(c.eval(0.75)) < 1e-12);
        assert_eq!((c.start(), c.end()), (c.p0, c.p3));
    }

    #[test]
    fn s_curve_turns_twice_in_y() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 3.0), (2.0, -3.0), (3.0, 0.0));
        let turns = c.y_extrema();
        assert_eq!(turns.len(), 2);
        assert!(turns[0] < turns[1]);
        for t in turns {
            let h = 1e-6;
            let slope = (c.eval(t + h).y - c.eval(t - h).y) / (2.0 * h);
            assert!(slope.abs() < 1e-5, "slope {slope} at {t}");
        }
        assert_eq!(c.y_monotonic_ranges().len(), 3);

        let line_like = CubicBez::new((0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (0.0, 3.0));
        assert!(line_like.y_extrema().is_empty());
    }

    #[test]
    fn reversal_and_collapse() {
        let dot = Point::new(1.0, 1.0);
        assert!(CubicBez::new(dot, dot, dot, dot).is_degenerate());
        let c = CubicBez::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 1.0));
        assert!(!c.is_degenerate());
        let r = c.reverse();
        assert_eq!((r.p0, r.p1, r.p2, r.p3), (c.p3, c.p2, c.p1, c.p0));
        assert!(r.eval(0.3).distance(c.eval(0.7)) < 1e-12);
    }
}
