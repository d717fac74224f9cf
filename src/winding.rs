// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point containment through winding numbers.
//!
//! Winding counts the crossings of a ray from the query point towards
//! negative x, +1 for edges heading down (increasing y) and −1 for edges
//! heading up. Each edge covers the half-open y range from its lower to its
//! upper end, so a vertex shared by two edges is counted once.

use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;
use crate::common::{solve_bisect, solve_quadratic_open_unit};
use crate::{CubicBez, Line, ParamCurve, ParamCurveExtrema, Path, PathEl, Point, QuadBez};

/// Halvings allowed when solving a cubic for t.
pub const CUBIC_BISECT_ITERATIONS: usize = 64;

/// Residual in y, relative to the cubic's coordinate scale, at which
/// bisection stops early.
pub const CUBIC_BISECT_TOLERANCE: f64 = 1e-12;

fn winding_line(line: Line, pt: Point) -> i32 {
    let Line { p0, p1 } = line;
    let (mut y0, mut y1) = (p0.y, p1.y);
    let mut dir = 1;
    if y0 > y1 {
        core::mem::swap(&mut y0, &mut y1);
        dir = -1;
    }
    if pt.y < y0 || pt.y >= y1 {
        return 0;
    }
    let cross = (p1 - p0).cross(pt - p0);
    let side = if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    };
    // Zero unless the edge passes on the ray's side of the point.
    if side == dir {
        0
    } else {
        dir
    }
}

/// Winding of a quad whose y is monotonic.
fn winding_mono_quad(q: QuadBez, pt: Point) -> i32 {
    let (mut y0, mut y2) = (q.p0.y, q.p2.y);
    let mut dir = 1;
    if y0 > y2 {
        core::mem::swap(&mut y0, &mut y2);
        dir = -1;
    }
    if pt.y < y0 || pt.y >= y2 {
        return 0;
    }
    let roots = solve_quadratic_open_unit(
        q.p0.y - pt.y,
        2.0 * (q.p1.y - q.p0.y),
        q.p0.y - 2.0 * q.p1.y + q.p2.y,
    );
    let xt = match roots.first() {
        Some(&t) => q.eval(t).x,
        None => {
            // The crossing is at an end point; take the one nearer in y.
            let (low, high) = if dir == 1 { (q.p0, q.p2) } else { (q.p2, q.p0) };
            if pt.y < 0.5 * (y0 + y2) {
                low.x
            } else {
                high.x
            }
        }
    };
    if xt < pt.x {
        dir
    } else {
        0
    }
}

fn winding_quad(q: QuadBez, pt: Point) -> i32 {
    if q.is_y_monotonic() {
        return winding_mono_quad(q, pt);
    }
    let Some(&t) = q.y_extrema().first() else {
        return winding_mono_quad(q, pt);
    };
    let (mut a, mut b) = (q.subsegment(0.0..t), q.subsegment(t..1.0));
    // Share the joint exactly and make the tangents there horizontal.
    b.p0 = a.p2;
    a.p1.y = a.p2.y;
    b.p1.y = b.p0.y;
    winding_mono_quad(a, pt) + winding_mono_quad(b, pt)
}

/// Winding of a cubic whose y is monotonic.
fn winding_mono_cubic(c: CubicBez, pt: Point) -> i32 {
    let (c, dir) = if c.p0.y > c.p3.y {
        (c.reverse(), -1)
    } else {
        (c, 1)
    };
    if pt.y < c.p0.y || pt.y >= c.p3.y {
        return 0;
    }
    let min_x = c.p0.x.min(c.p1.x).min(c.p2.x).min(c.p3.x);
    let max_x = c.p0.x.max(c.p1.x).max(c.p2.x).max(c.p3.x);
    if pt.x < min_x {
        return 0;
    }
    if pt.x > max_x {
        return dir;
    }
    let scale = c
        .p0
        .y
        .abs()
        .max(c.p1.y.abs())
        .max(c.p2.y.abs())
        .max(c.p3.y.abs())
        .max(1.0);
    let t = solve_bisect(
        |t| c.eval(t).y - pt.y,
        0.0,
        1.0,
        CUBIC_BISECT_TOLERANCE * scale,
        CUBIC_BISECT_ITERATIONS,
    );
    if c.eval(t).x < pt.x {
        dir
    } else {
        0
    }
}

fn winding_cubic(c: CubicBez, pt: Point) -> i32 {
    let ranges = c.y_monotonic_ranges();
    if ranges.len() == 1 {
        return winding_mono_cubic(c, pt);
    }
    let mut pieces: SmallVec<[CubicBez; 3]> =
        ranges.into_iter().map(|r| c.subsegment(r)).collect();
    for i in 1..pieces.len() {
        let joint = pieces[i - 1].p3;
        pieces[i - 1].p2.y = joint.y;
        pieces[i].p0 = joint;
        pieces[i].p1.y = joint.y;
    }
    pieces.into_iter().map(|piece| winding_mono_cubic(piece, pt)).sum()
}

impl Path {
    /// The winding number of the path around `pt`.
    ///
    /// Every contour is treated as closed. A path with non-finite points
    /// winds zero times around everything.
    pub fn winding(&self, pt: impl Into<Point>) -> i32 {
        let pt = pt.into();
        if !self.is_finite() {
            return 0;
        }
        let mut iter = self.iter(true);
        let mut winding = 0;
        while let Some(el) = iter.next_with(false) {
            winding += match el {
                PathEl::MoveTo(_) | PathEl::Close(_) => 0,
                PathEl::Line(line) => winding_line(line, pt),
                PathEl::Quad(q) => winding_quad(q, pt),
                PathEl::Cubic(c) => winding_cubic(c, pt),
            };
        }
        winding
    }

    /// Whether `pt` is inside the path under its fill type.
    ///
    /// Points outside the bounds, which for a right or bottom edge includes
    /// points on it, are outside without further work; an inverse fill type
    /// reports them inside. The same goes for empty and non-finite paths and
    /// NaN points.
    pub fn contains(&self, pt: impl Into<Point>) -> bool {
        let pt = pt.into();
        let inverse = self.is_inverse_fill_type();
        if self.is_empty() || !self.bounds().contains(pt) {
            return inverse;
        }
        self.fill_type().is_inside(self.winding(pt))
    }
}
