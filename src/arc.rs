// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elliptical arcs, approximated with quadratic Béziers.

use core::f64::consts::{FRAC_PI_4, TAU};

use arrayvec::ArrayVec;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;
use crate::common::DEGENERATE_TOLERANCE;
use crate::{Direction, Path, Point, Rect, Vec2};

/// The most points an arc can produce: a start point and eight quads.
pub const MAX_ARC_POINTS: usize = 17;

/// An axis-aligned elliptical arc.
///
/// Angles are in radians, measured from the positive x axis. Positive sweeps
/// turn clockwise in the y-down coordinate space of paths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipticArc {
    /// The center of the ellipse.
    pub center: Point,
    /// The x and y radii of the ellipse.
    pub radii: Vec2,
    /// The angle of the arc's start point.
    pub start_angle: f64,
    /// The signed angle swept by the arc.
    pub sweep_angle: f64,
}

impl EllipticArc {
    /// The arc of the ellipse inscribed in `oval`.
    pub fn from_oval(oval: Rect, start_angle: f64, sweep_angle: f64) -> EllipticArc {
        EllipticArc {
            center: oval.center(),
            radii: Vec2::new(0.5 * oval.width(), 0.5 * oval.height()),
            start_angle,
            sweep_angle,
        }
    }

    /// The point at `angle` on the ellipse.
    #[inline]
    fn sample(&self, angle: f64) -> Point {
        let u = Vec2::from_angle(angle);
        self.center + Vec2::new(u.x * self.radii.x, u.y * self.radii.y)
    }

    /// The start point followed by control and end point pairs of the
    /// quadratic segments approximating the arc.
    ///
    /// Each quad spans at most π/4. A zero sweep yields only the start
    /// point, and sweeps beyond a full turn are clamped to one.
    pub fn quad_points(&self) -> ArrayVec<Point, MAX_ARC_POINTS> {
        let mut pts = ArrayVec::new();
        pts.push(self.sample(self.start_angle));
        let sweep = self.sweep_angle.clamp(-TAU, TAU);
        if sweep == 0.0 || sweep.is_nan() {
            return pts;
        }
        let n = (sweep.abs() / FRAC_PI_4).ceil().clamp(1.0, 8.0);
        let step = sweep / n;
        // The control point sits where the tangents at both ends meet.
        let ctrl_scale = (0.5 * step).cos().recip();
        for i in 0..n as usize {
            let a0 = self.start_angle + step * i as f64;
            let mid = Vec2::from_angle(a0 + 0.5 * step) * ctrl_scale;
            pts.push(self.center + Vec2::new(mid.x * self.radii.x, mid.y * self.radii.y));
            pts.push(self.sample(a0 + step));
        }
        pts
    }
}

impl Path {
    /// Append an arc of the ellipse inscribed in `oval`.
    ///
    /// The arc is joined to the current contour with a line, unless
    /// `force_move_to` is set or the path is empty, in which case it starts a
    /// new contour. The joining line is omitted when the current point is
    /// already the arc's start. A zero-size oval contributes just its corner
    /// point.
    pub fn arc_to(&mut self, oval: Rect, start_angle: f64, sweep_angle: f64, force_move_to: bool) {
        if oval.width() < 0.0 || oval.height() < 0.0 {
            return;
        }
        let pts = if oval.width() == 0.0 && oval.height() == 0.0 {
            let mut pts = ArrayVec::<Point, MAX_ARC_POINTS>::new();
            pts.push(Point::new(oval.x1, oval.y0));
            pts
        } else {
            EllipticArc::from_oval(oval, start_angle, sweep_angle).quad_points()
        };
        self.append_arc_points(&pts, force_move_to || self.is_empty());
    }

    /// Start a new contour holding an arc of the ellipse inscribed in `oval`.
    ///
    /// Nothing is added for an empty oval or a zero sweep. A sweep of a full
    /// turn or more adds the whole oval, clockwise for positive sweeps.
    pub fn add_arc(&mut self, oval: Rect, start_angle: f64, sweep_angle: f64) {
        if oval.is_empty() || sweep_angle == 0.0 {
            return;
        }
        if sweep_angle.abs() >= TAU {
            let dir = if sweep_angle > 0.0 {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            self.add_oval(oval, dir);
            return;
        }
        let pts = EllipticArc::from_oval(oval, start_angle, sweep_angle).quad_points();
        self.append_arc_points(&pts, true);
    }

    /// Append a circular arc of `radius` tangent to the line from the current
    /// point to `p1` and to the line from `p1` to `p2`.
    ///
    /// The contour is extended with a line to the arc's first tangent point.
    /// When no such arc exists (zero radius, coincident or collinear points,
    /// or no current point) this is `line_to(p1)`.
    pub fn arc_to_tangent(&mut self, p1: impl Into<Point>, p2: impl Into<Point>, radius: f64) {
        let p1 = p1.into();
        let p2 = p2.into();
        let Some(start) = self.last_point() else {
            self.line_to(p1);
            return;
        };
        if radius == 0.0 || start == p1 || p1 == p2 {
            self.line_to(p1);
            return;
        }
        let before = (p1 - start).normalize();
        let after = (p2 - p1).normalize();
        let cos_h = before.dot(after);
        let sin_h = before.cross(after);
        if !(sin_h.abs() > DEGENERATE_TOLERANCE) {
            // Too tight a turn, or a non-finite input.
            self.line_to(p1);
            return;
        }
        let dist = (radius * (1.0 - cos_h) / sin_h).abs();
        let tangent_start = p1 - dist * before;
        let (normal, sweep) = if sin_h > 0.0 {
            (before.turn_ccw(), cos_h.clamp(-1.0, 1.0).acos())
        } else {
            (before.turn_cw(), -cos_h.clamp(-1.0, 1.0).acos())
        };
        let arc = EllipticArc {
            center: tangent_start - radius * normal,
            radii: Vec2::new(radius, radius),
            start_angle: normal.atan2(),
            sweep_angle: sweep,
        };
        let pts = arc.quad_points();
        self.line_to(tangent_start);
        for pair in pts[1..].chunks_exact(2) {
            self.quad_to(pair[0], pair[1]);
        }
    }

    fn append_arc_points(&mut self, pts: &[Point], move_to: bool) {
        let Some((&first, rest)) = pts.split_first() else {
            return;
        };
        self.reserve(1 + rest.len() / 2, pts.len());
        if move_to {
            self.move_to(first);
        } else if self.last_point() != Some(first) {
            self.line_to(first);
        }
        for pair in rest.chunks_exact(2) {
            self.quad_to(pair[0], pair[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use super::EllipticArc;
    use crate::{Direction, ParamCurve, Path, PathEl, Point, QuadBez, Rect, Vec2, Verb};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    #[test]
    fn quarter_arc_points() {
        let arc = EllipticArc {
            center: Point::ZERO,
            radii: Vec2::new(1.0, 1.0),
            start_angle: 0.0,
            sweep_angle: FRAC_PI_2,
        };
        let pts = arc.quad_points();
        assert_eq!(pts.len(), 5);
        assert_near(pts[0], Point::new(1.0, 0.0), 1e-12);
        assert_near(pts[4], Point::new(0.0, 1.0), 1e-12);
        // The approximation stays close to the circle.
        for pair in pts.windows(3).step_by(2) {
            let q = QuadBez::new(pair[0], pair[1], pair[2]);
            let r = q.eval(0.5).to_vec2().hypot();
            assert!((r - 1.0).abs() < 1e-2, "r = {r}");
        }
    }

    #[test]
    fn sweep_is_clamped() {
        let arc = EllipticArc {
            center: Point::ZERO,
            radii: Vec2::new(2.0, 1.0),
            start_angle: 0.0,
            sweep_angle: -10.0 * PI,
        };
        assert_eq!(arc.quad_points().len(), 17);
        let arc = EllipticArc { sweep_angle: 0.0, ..arc };
        assert_eq!(arc.quad_points().len(), 1);
    }

    #[test]
    fn add_arc_cases() {
        let oval = Rect::new(0.0, 0.0, 20.0, 10.0);
        let mut path = Path::new();
        path.add_arc(oval, 0.0, 0.0);
        path.add_arc(Rect::new(0.0, 0.0, 0.0, 10.0), 0.0, 1.0);
        assert!(path.is_empty());

        path.add_arc(oval, 0.0, PI);
        assert_eq!(path.verbs()[0], Verb::Move);
        assert_eq!(path.count_verbs(), 5);
        assert_near(path.point(0).unwrap(), Point::new(20.0, 5.0), 1e-12);
        assert_near(path.last_point().unwrap(), Point::new(0.0, 5.0), 1e-12);

        let mut full = Path::new();
        full.add_arc(oval, 0.3, -2.0 * PI);
        assert!(full.is_oval());
        assert_eq!(full.direction(), Direction::CounterClockwise);
    }

    #[test]
    fn arc_to_joins_contour() {
        let mut path = Path::new();
        path.arc_to(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, FRAC_PI_2, false);
        assert_eq!(path.verbs(), &[Verb::Move, Verb::Quad, Verb::Quad]);

        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.arc_to(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, FRAC_PI_2, false);
        assert_eq!(path.verbs(), &[Verb::Move, Verb::Line, Verb::Quad, Verb::Quad]);

        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.arc_to(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, FRAC_PI_2, true);
        assert_eq!(path.verbs(), &[Verb::Move, Verb::Move, Verb::Quad, Verb::Quad]);

        // A zero-size oval is just its point.
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.arc_to(Rect::new(3.0, 4.0, 3.0, 4.0), 0.0, FRAC_PI_2, false);
        assert_eq!(path.verbs(), &[Verb::Move, Verb::Line]);
        assert_eq!(path.last_point(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn tangent_arc_rounds_corner() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.arc_to_tangent((10.0, 0.0), (10.0, 10.0), 2.0);
        // The arc starts where the first line is tangent to the circle.
        assert_eq!(path.verbs()[1], Verb::Line);
        assert_near(path.point(1).unwrap(), Point::new(8.0, 0.0), 1e-12);
        assert_near(path.last_point().unwrap(), Point::new(10.0, 2.0), 1e-9);
        for el in path.raw_iter() {
            if let PathEl::Quad(q) = el {
                let r = (q.eval(0.5) - Point::new(8.0, 2.0)).hypot();
                assert!((r - 2.0).abs() < 2e-2);
            }
        }

        // Collinear points degrade to a line.
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.arc_to_tangent((10.0, 0.0), (20.0, 0.0), 2.0);
        assert_eq!(path.verbs(), &[Verb::Move, Verb::Line]);
        assert_eq!(path.last_point(), Some(Point::new(10.0, 0.0)));

        let mut path = Path::new();
        path.arc_to_tangent((10.0, 0.0), (20.0, 5.0), 2.0);
        assert_eq!(path.verbs(), &[Verb::Move, Verb::Line]);
    }
}
