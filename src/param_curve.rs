// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segments as functions of a parameter `t` in `[0, 1]`.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::Point;

/// A path segment evaluated over `t` in `[0, 1]`.
pub trait ParamCurve: Sized {
    /// The point at `t`.
    fn eval(&self, t: f64) -> Point;

    /// The part of the segment between two parameters, reparametrized to
    /// `[0, 1]`.
    fn subsegment(&self, range: Range<f64>) -> Self;

    /// Split at `t = 0.5`.
    #[inline]
    fn subdivide(&self) -> (Self, Self) {
        (self.subsegment(0.0..0.5), self.subsegment(0.5..1.0))
    }

    /// The point at `t = 0`.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The point at `t = 1`.
    fn end(&self) -> Point {
        self.eval(1.0)
    }
}

/// Upper bound on interior y turning points of a quadratic or cubic.
pub const MAX_Y_EXTREMA: usize = 2;

/// Segments that can be cut into pieces monotonic in y, as the winding
/// count needs.
pub trait ParamCurveExtrema: ParamCurve {
    /// Parameters in the open interval `(0, 1)` where `dy/dt` changes sign,
    /// sorted.
    fn y_extrema(&self) -> ArrayVec<f64, MAX_Y_EXTREMA>;

    /// `[0, 1]` cut at each of [`y_extrema`](Self::y_extrema).
    fn y_monotonic_ranges(&self) -> ArrayVec<Range<f64>, { MAX_Y_EXTREMA + 1 }> {
        let mut pieces = ArrayVec::new();
        let mut from = 0.0;
        for t in self.y_extrema() {
            pieces.push(from..t);
            from = t;
        }
        pieces.push(from..1.0);
        pieces
    }
}
