// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight segments.

use core::ops::Range;

use crate::common::nearly_equal;
use crate::{ParamCurve, Point};

/// A straight segment: the point before a line verb and the verb's point,
/// or the implicit edge a close verb draws back to the contour start.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Where the segment leaves from.
    pub p0: Point,
    /// Where it arrives.
    pub p1: Point,
}

impl Line {
    /// The segment from `p0` to `p1`.
    #[inline]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// Whether both ends fall within
    /// [`DEGENERATE_TOLERANCE`](crate::common::DEGENERATE_TOLERANCE) of each
    /// other.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        nearly_equal(self.p0, self.p1)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> Line {
        Line::new(self.eval(range.start), self.eval(range.end))
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p1
    }
}

#[cfg(test)]
mod tests {
    use crate::{Line, ParamCurve, Point};

    #[test]
    fn parametrization() {
        let edge = Line::new((-1.0, 0.0), (3.0, 2.0));
        assert_eq!(edge.eval(0.25), Point::new(0.0, 0.5));
        let tail = edge.subsegment(0.5..1.0);
        assert_eq!(tail, Line::new((1.0, 1.0), (3.0, 2.0)));
        assert_eq!((tail.start(), tail.end()), (tail.p0, tail.p1));
    }

    #[test]
    fn short_edges_are_degenerate() {
        let p = (1.0, 1.0);
        assert!(Line::new(p, p).is_degenerate());
        assert!(Line::new(p, (1.0, 1.0 + 1e-6)).is_degenerate());
        assert!(!Line::new(p, (1.0, 1.01)).is_degenerate());
    }
}
