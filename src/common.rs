// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerances and the small root finders shared by the curve code.

#![allow(missing_docs)]

use arrayvec::ArrayVec;

/// Routes float methods to `libm` when `std` is unavailable.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("vojo requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn acos(self) -> Self => acos;
    fn atan2(self, other: Self) -> Self => atan2;
    fn ceil(self) -> Self => ceil;
    fn copysign(self, sign: Self) -> Self => copysign;
    fn cos(self) -> Self => cos;
    fn hypot(self, other: Self) -> Self => hypot;
    fn sin(self) -> Self => sin;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn sqrt(self) -> Self => sqrt;
}

/// Distance below which two coordinates are considered to coincide when
/// deciding whether a segment is degenerate.
pub const DEGENERATE_TOLERANCE: f64 = 1.0 / 4096.0;

/// Whether `a` and `b` are within [`DEGENERATE_TOLERANCE`] on both axes.
#[inline]
pub(crate) fn nearly_equal(a: crate::Point, b: crate::Point) -> bool {
    (a.x - b.x).abs() <= DEGENERATE_TOLERANCE && (a.y - b.y).abs() <= DEGENERATE_TOLERANCE
}

/// Real roots of `c0 + c1 t + c2 t² = 0`, in increasing order.
///
/// When `c2` is too small for the monic form to be finite the equation is
/// solved as linear. All-zero coefficients yield the single root `0.0`.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut roots = ArrayVec::new();
    let inv = c2.recip();
    let (b, c) = (c1 * inv, c0 * inv);
    if !(b.is_finite() && c.is_finite()) {
        let t = -c0 / c1;
        if t.is_finite() {
            roots.push(t);
        } else if c0 == 0.0 && c1 == 0.0 {
            roots.push(0.0);
        }
        return roots;
    }
    // t² + b t + c = 0. Take the larger-magnitude root from the formula and
    // the other from Vieta, so neither suffers cancellation.
    let disc = b * b - 4.0 * c;
    let big = if disc.is_finite() {
        if disc < 0.0 {
            return roots;
        }
        if disc == 0.0 {
            roots.push(-0.5 * b);
            return roots;
        }
        -0.5 * (b + disc.sqrt().copysign(b))
    } else {
        // b² overflowed; b dominates.
        -b
    };
    let small = c / big;
    if !small.is_finite() {
        roots.push(big);
    } else if small < big {
        roots.extend([small, big]);
    } else {
        roots.extend([big, small]);
    }
    roots
}

/// Roots of `c0 + c1 t + c2 t² = 0` lying strictly inside the unit interval,
/// in increasing order.
pub fn solve_quadratic_open_unit(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut inside = ArrayVec::new();
    for t in solve_quadratic(c0, c1, c2) {
        if t > 0.0 && t < 1.0 && inside.last() != Some(&t) {
            inside.push(t);
        }
    }
    inside
}

/// A zero of `f` on `[lo, hi]` by bisection.
///
/// `f(lo) <= 0 <= f(hi)` is assumed. Stops once `|f(t)| <= epsilon` or after
/// `max_iter` halvings.
pub fn solve_bisect(
    mut f: impl FnMut(f64) -> f64,
    mut lo: f64,
    mut hi: f64,
    epsilon: f64,
    max_iter: usize,
) -> f64 {
    let mut t = 0.5 * (lo + hi);
    for _ in 0..max_iter {
        let y = f(t);
        if y.abs() <= epsilon {
            break;
        }
        if y < 0.0 {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}

#[cfg(test)]
mod tests {
    use crate::common::{solve_bisect, solve_quadratic, solve_quadratic_open_unit};

    fn assert_roots(roots: &[f64], expected: &[f64]) {
        assert_eq!(roots.len(), expected.len(), "{roots:?} vs {expected:?}");
        for (r, e) in roots.iter().zip(expected) {
            assert!((r - e).abs() < 1e-12, "{roots:?} vs {expected:?}");
        }
    }

    #[test]
    fn quadratic_cases() {
        let s5 = 5.0f64.sqrt();
        assert_roots(&solve_quadratic(-5.0, 0.0, 1.0), &[-s5, s5]);
        assert_roots(&solve_quadratic(5.0, 0.0, 1.0), &[]);
        assert_roots(&solve_quadratic(1.0, 2.0, 1.0), &[-1.0]);
        // Linear and fully degenerate.
        assert_roots(&solve_quadratic(5.0, 1.0, 0.0), &[-5.0]);
        assert_roots(&solve_quadratic(0.0, 0.0, 0.0), &[0.0]);
        assert_roots(&solve_quadratic(3.0, 0.0, 0.0), &[]);
    }

    #[test]
    fn quadratic_without_cancellation() {
        // Roots 1e-9 and 1e9.
        let roots = solve_quadratic(1.0, -(1e9 + 1e-9), 1.0);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - 1e-9).abs() < 1e-20);
        assert!((roots[1] - 1e9).abs() < 1e-3);
    }

    #[test]
    fn open_unit_roots() {
        // (t - 0.25)(t - 0.75)
        assert_roots(&solve_quadratic_open_unit(0.1875, -1.0, 1.0), &[0.25, 0.75]);
        // t(t - 1): both roots on the boundary.
        assert_roots(&solve_quadratic_open_unit(0.0, -1.0, 1.0), &[]);
    }

    #[test]
    fn bisect_sqrt2() {
        let t = solve_bisect(|x| x * x - 2.0, 0.0, 2.0, 1e-14, 64);
        assert!((t - 2.0f64.sqrt()).abs() < 1e-12);
    }
}
