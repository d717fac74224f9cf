// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Appending to paths: drawing primitives and shape constructors.

use core::f64::consts::SQRT_2;

use crate::path::{LastMove, PathBounds};
use crate::{
    Affine, Convexity, Direction, Path, PathEl, Point, Rect, RoundedRectRadii, SegmentMask,
    Transform, Vec2, Verb,
};

/// Control point offset, relative to the radius, of a cubic approximating a
/// quarter circle.
const CUBIC_ARC_FACTOR: f64 = (SQRT_2 - 1.0) * 4.0 / 3.0;

/// tan(π/8): control point offset of a quad spanning an eighth of a circle.
const TAN_PI_OVER_8: f64 = SQRT_2 - 1.0;

/// What a shape constructor knows about the path before it starts, so that
/// bounds and convexity can be set directly afterwards.
struct ShapeUpdate {
    /// The shape's bounds, sorted.
    rect: Option<Rect>,
    /// The path's bounds, if cached, finite and meaningful.
    prior: Option<Rect>,
    was_empty: bool,
    was_degenerate: bool,
    only_moves: bool,
}

impl ShapeUpdate {
    fn begin(path: &Path, rect: Option<Rect>) -> ShapeUpdate {
        let prior = match path.bounds.get() {
            // With a single point the cached bounds are empty, not the point.
            Some(entry) if entry.is_finite && path.count_points() > 1 => Some(entry.rect),
            _ => None,
        };
        ShapeUpdate {
            rect: rect.map(|r| r.abs()),
            prior,
            was_empty: path.is_empty(),
            was_degenerate: path.is_degenerate(),
            only_moves: path.has_only_moves(),
        }
    }

    fn finish(self, path: &mut Path, dir: Direction, is_oval: bool) {
        path.convexity.set(if self.was_degenerate {
            Convexity::Convex
        } else {
            Convexity::Concave
        });
        path.direction.set(if self.only_moves {
            dir
        } else {
            Direction::Unknown
        });
        path.is_oval = is_oval && self.only_moves;
        let bounds = match (self.rect, self.prior) {
            (Some(rect), _) if self.was_empty => Some(rect),
            (Some(rect), Some(prior)) => Some(prior.union(rect)),
            _ => None,
        };
        if let Some(rect) = bounds.filter(Rect::is_finite) {
            path.bounds.set(Some(PathBounds {
                rect,
                is_finite: true,
            }));
        }
    }
}

impl Path {
    /// Start a new contour at `p`.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        let p = p.into();
        let ix = self.count_points();
        self.edit().grow_for_verb(Verb::Move)[0] = p;
        self.last_move = LastMove::Open(ix);
        // A move cannot change convexity or direction on its own.
        self.bounds.set(None);
        self.is_oval = false;
    }

    /// Start a new contour offset by `v` from the last point.
    pub fn rel_move_to(&mut self, v: impl Into<Vec2>) {
        let p = self.last_point().unwrap_or(Point::ZERO);
        self.move_to(p + v.into());
    }

    /// Add a move to where drawing should continue, if the current contour
    /// was closed or none was started.
    fn inject_move_if_needed(&mut self) {
        let p = match self.last_move {
            LastMove::Open(_) => return,
            LastMove::Closed(ix) => self.point(ix).unwrap_or(Point::ZERO),
            LastMove::None => Point::ZERO,
        };
        self.move_to(p);
    }

    /// Add a line from the current point to `p`.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        self.inject_move_if_needed();
        self.edit().grow_for_verb(Verb::Line)[0] = p.into();
        self.segment_mask |= SegmentMask::LINE;
        self.dirty_after_edit();
    }

    /// Add a line to the last point offset by `v`.
    pub fn rel_line_to(&mut self, v: impl Into<Vec2>) {
        let p = self.last_point().unwrap_or(Point::ZERO);
        self.line_to(p + v.into());
    }

    /// Add a quadratic Bézier from the current point.
    pub fn quad_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) {
        self.inject_move_if_needed();
        let pts = self.edit().grow_for_verb(Verb::Quad);
        pts[0] = p1.into();
        pts[1] = p2.into();
        self.segment_mask |= SegmentMask::QUAD;
        self.dirty_after_edit();
    }

    /// Add a quadratic Bézier with points relative to the last point.
    pub fn rel_quad_to(&mut self, v1: impl Into<Vec2>, v2: impl Into<Vec2>) {
        let p = self.last_point().unwrap_or(Point::ZERO);
        self.quad_to(p + v1.into(), p + v2.into());
    }

    /// Add a cubic Bézier from the current point.
    pub fn cubic_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>, p3: impl Into<Point>) {
        self.inject_move_if_needed();
        let pts = self.edit().grow_for_verb(Verb::Cubic);
        pts[0] = p1.into();
        pts[1] = p2.into();
        pts[2] = p3.into();
        self.segment_mask |= SegmentMask::CUBIC;
        self.dirty_after_edit();
    }

    /// Add a cubic Bézier with points relative to the last point.
    pub fn rel_cubic_to(&mut self, v1: impl Into<Vec2>, v2: impl Into<Vec2>, v3: impl Into<Vec2>) {
        let p = self.last_point().unwrap_or(Point::ZERO);
        self.cubic_to(p + v1.into(), p + v2.into(), p + v3.into());
    }

    /// Close the current contour.
    ///
    /// A close verb is recorded only after a move or a segment; closing an
    /// empty path or closing twice records nothing. Either way, the next
    /// drawing call starts a new contour at the closed contour's start.
    pub fn close(&mut self) {
        if matches!(
            self.verbs().last(),
            Some(Verb::Move | Verb::Line | Verb::Quad | Verb::Cubic)
        ) {
            self.edit().grow_for_verb(Verb::Close);
            self.dirty_after_edit();
        }
        if let LastMove::Open(ix) = self.last_move {
            self.last_move = LastMove::Closed(ix);
        }
    }

    /// Replace the last point, or move to `p` if the path has no points.
    pub fn set_last_point(&mut self, p: impl Into<Point>) {
        let p = p.into();
        if self.count_points() == 0 {
            self.move_to(p);
            return;
        }
        if let Some(last) = self.edit().points_mut().last_mut() {
            *last = p;
        }
        self.dirty_after_edit();
    }

    /// Add a contour through `points`, closing it if requested.
    pub fn add_poly(&mut self, points: &[Point], close: bool) {
        let Some((&first, rest)) = points.split_first() else {
            return;
        };
        let ix = self.count_points();
        let store = self.edit();
        store.reserve(points.len() + usize::from(close), points.len());
        store.grow_for_verb(Verb::Move)[0] = first;
        for &p in rest {
            store.grow_for_verb(Verb::Line)[0] = p;
        }
        if close {
            store.grow_for_verb(Verb::Close);
        }
        if !rest.is_empty() {
            self.segment_mask |= SegmentMask::LINE;
        }
        self.last_move = if close {
            LastMove::Closed(ix)
        } else {
            LastMove::Open(ix)
        };
        self.dirty_after_edit();
    }

    /// Add a closed rectangle contour starting at `(x0, y0)`.
    ///
    /// Clockwise visits `(x1, y0)` next, counter-clockwise `(x0, y1)`. The
    /// direction is recorded if nothing but moves preceded the rectangle.
    pub fn add_rect(&mut self, rect: Rect, dir: Direction) {
        let update = ShapeUpdate::begin(self, Some(rect));
        let Rect { x0, y0, x1, y1 } = rect;
        self.reserve(5, 4);
        self.move_to((x0, y0));
        if dir == Direction::CounterClockwise {
            self.line_to((x0, y1));
            self.line_to((x1, y1));
            self.line_to((x1, y0));
        } else {
            self.line_to((x1, y0));
            self.line_to((x1, y1));
            self.line_to((x0, y1));
        }
        self.close();
        update.finish(self, dir, false);
    }

    /// Add a closed oval inscribed in `oval`, as eight quadratic segments
    /// starting at the middle of the right side.
    ///
    /// If nothing but moves preceded the oval, the path remembers that it is
    /// an oval (see [`Path::is_oval`]) and records the direction.
    pub fn add_oval(&mut self, oval: Rect, dir: Direction) {
        let update = ShapeUpdate::begin(self, Some(oval));
        let Rect {
            x0: l,
            y0: t,
            x1: r,
            y1: b,
        } = oval;
        let Point { x: cx, y: cy } = oval.center();
        let rx = 0.5 * oval.width();
        let ry = 0.5 * oval.height();
        let (sx, sy) = (rx * TAN_PI_OVER_8, ry * TAN_PI_OVER_8);
        let (mx, my) = (rx * 0.5 * SQRT_2, ry * 0.5 * SQRT_2);

        self.reserve(10, 17);
        // The extreme points use the given edges rather than center ± radius,
        // so the points never stray outside the oval.
        self.move_to((r, cy));
        if dir == Direction::CounterClockwise {
            self.quad_to((r, cy - sy), (cx + mx, cy - my));
            self.quad_to((cx + sx, t), (cx, t));
            self.quad_to((cx - sx, t), (cx - mx, cy - my));
            self.quad_to((l, cy - sy), (l, cy));
            self.quad_to((l, cy + sy), (cx - mx, cy + my));
            self.quad_to((cx - sx, b), (cx, b));
            self.quad_to((cx + sx, b), (cx + mx, cy + my));
            self.quad_to((r, cy + sy), (r, cy));
        } else {
            self.quad_to((r, cy + sy), (cx + mx, cy + my));
            self.quad_to((cx + sx, b), (cx, b));
            self.quad_to((cx - sx, b), (cx - mx, cy + my));
            self.quad_to((l, cy + sy), (l, cy));
            self.quad_to((l, cy - sy), (cx - mx, cy - my));
            self.quad_to((cx - sx, t), (cx, t));
            self.quad_to((cx + sx, t), (cx + mx, cy - my));
            self.quad_to((r, cy - sy), (r, cy));
        }
        self.close();
        update.finish(self, dir, true);
    }

    /// Add a circle as an oval, if `radius` is positive.
    pub fn add_circle(&mut self, center: impl Into<Point>, radius: f64, dir: Direction) {
        if radius > 0.0 {
            self.add_oval(Rect::from_center(center, radius, radius), dir);
        }
    }

    /// Add a rectangle with elliptical corners of radii `rx` and `ry`.
    ///
    /// Nothing is added for an empty rectangle. Radii reaching half the
    /// rectangle's size on both axes give an oval; a zero radius gives a
    /// plain rectangle. The contour starts at `(x1 - rx, y0)`.
    pub fn add_round_rect(&mut self, rect: Rect, rx: f64, ry: f64, dir: Direction) {
        let half_w = 0.5 * rect.width();
        let half_h = 0.5 * rect.height();
        if !(half_w > 0.0 && half_h > 0.0) {
            return;
        }
        let (mut rx, mut ry) = (rx.max(0.0), ry.max(0.0));
        if rx == 0.0 || ry == 0.0 {
            self.add_rect(rect, dir);
            return;
        }
        let skip_hori = rx >= half_w;
        let skip_vert = ry >= half_h;
        if skip_hori && skip_vert {
            self.add_oval(rect, dir);
            return;
        }
        if skip_hori {
            rx = half_w;
        } else if skip_vert {
            ry = half_h;
        }

        let update = ShapeUpdate::begin(self, Some(rect));
        let Rect {
            x0: l,
            y0: t,
            x1: r,
            y1: b,
        } = rect;
        let sx = rx * CUBIC_ARC_FACTOR;
        let sy = ry * CUBIC_ARC_FACTOR;
        self.reserve(10, 17);
        self.move_to((r - rx, t));
        if dir == Direction::CounterClockwise {
            if !skip_hori {
                self.line_to((l + rx, t));
            }
            self.cubic_to((l + rx - sx, t), (l, t + ry - sy), (l, t + ry));
            if !skip_vert {
                self.line_to((l, b - ry));
            }
            self.cubic_to((l, b - ry + sy), (l + rx - sx, b), (l + rx, b));
            if !skip_hori {
                self.line_to((r - rx, b));
            }
            self.cubic_to((r - rx + sx, b), (r, b - ry + sy), (r, b - ry));
            if !skip_vert {
                self.line_to((r, t + ry));
            }
            self.cubic_to((r, t + ry - sy), (r - rx + sx, t), (r - rx, t));
        } else {
            self.cubic_to((r - rx + sx, t), (r, t + ry - sy), (r, t + ry));
            if !skip_vert {
                self.line_to((r, b - ry));
            }
            self.cubic_to((r, b - ry + sy), (r - rx + sx, b), (r - rx, b));
            if !skip_hori {
                self.line_to((l + rx, b));
            }
            self.cubic_to((l + rx - sx, b), (l, b - ry + sy), (l, b - ry));
            if !skip_vert {
                self.line_to((l, t + ry));
            }
            self.cubic_to((l, t + ry - sy), (l + rx - sx, t), (l + rx, t));
            if !skip_hori {
                self.line_to((r - rx, t));
            }
        }
        self.close();
        update.finish(self, dir, false);
    }

    /// Add a rectangle with a separate circular radius at each corner.
    ///
    /// Negative radii count as zero. When the radii of two adjacent corners
    /// add up to more than the side between them, all radii are scaled down
    /// by the same factor. With every radius zero this is
    /// [`Path::add_rect`]. The contour starts at `(x0, y0 + top_left)`.
    pub fn add_round_rect_radii(
        &mut self,
        rect: Rect,
        radii: impl Into<RoundedRectRadii>,
        dir: Direction,
    ) {
        if rect.is_empty() {
            return;
        }
        let radii = radii.into().clamped_to(rect);
        if radii.is_zero() {
            self.add_rect(rect, dir);
            return;
        }
        let update = ShapeUpdate::begin(self, Some(rect));
        let RoundedRectRadii {
            top_left: tl,
            top_right: tr,
            bottom_right: br,
            bottom_left: bl,
        } = radii;
        let Rect { x0, y0, x1, y1 } = rect.abs();
        let k = CUBIC_ARC_FACTOR;
        // Each corner runs clockwise: entry point, two controls, exit point.
        let corners = [
            [
                Point::new(x0, y0 + tl),
                Point::new(x0, y0 + tl - k * tl),
                Point::new(x0 + tl - k * tl, y0),
                Point::new(x0 + tl, y0),
            ],
            [
                Point::new(x1 - tr, y0),
                Point::new(x1 - tr + k * tr, y0),
                Point::new(x1, y0 + tr - k * tr),
                Point::new(x1, y0 + tr),
            ],
            [
                Point::new(x1, y1 - br),
                Point::new(x1, y1 - br + k * br),
                Point::new(x1 - br + k * br, y1),
                Point::new(x1 - br, y1),
            ],
            [
                Point::new(x0 + bl, y1),
                Point::new(x0 + bl - k * bl, y1),
                Point::new(x0, y1 - bl + k * bl),
                Point::new(x0, y1 - bl),
            ],
        ];
        let corners = if dir == Direction::CounterClockwise {
            [corners[3], corners[2], corners[1], corners[0]].map(|[a, b, c, d]| [d, c, b, a])
        } else {
            corners
        };
        self.reserve(10, 17);
        self.move_to(Point::new(x0, y0 + tl));
        for [entry, c1, c2, exit] in corners {
            if self.last_point() != Some(entry) {
                self.line_to(entry);
            }
            if entry != exit {
                self.cubic_to(c1, c2, exit);
            }
        }
        self.close();
        update.finish(self, dir, false);
    }

    /// Append the verbs of `other` with every point mapped through `t`.
    ///
    /// The stored verbs are replayed as they are, degenerate segments
    /// included.
    pub fn add_path<T: Transform + ?Sized>(&mut self, other: &Path, t: &T) {
        self.reserve(other.count_verbs(), other.count_points());
        for el in other.raw_iter() {
            match el {
                PathEl::MoveTo(p) => self.move_to(t.map_point(p)),
                PathEl::Line(line) => self.line_to(t.map_point(line.p1)),
                PathEl::Quad(q) => self.quad_to(t.map_point(q.p1), t.map_point(q.p2)),
                PathEl::Cubic(c) => {
                    self.cubic_to(t.map_point(c.p1), t.map_point(c.p2), t.map_point(c.p3));
                }
                PathEl::Close(_) => self.close(),
            }
        }
        self.is_oval = false;
    }

    /// Append the verbs of `other`, translated by `v`.
    pub fn add_path_offset(&mut self, other: &Path, v: impl Into<Vec2>) {
        self.add_path(other, &Affine::translate(v));
    }

    /// Append the contours of `other` in reverse order, each traversed
    /// backwards. Closed contours stay closed.
    pub fn reverse_add_path(&mut self, other: &Path) {
        let pts = other.points();
        let mut pt_ix = pts.len();
        let mut need_move = true;
        let mut need_close = false;
        self.reserve(other.count_verbs(), other.count_points());
        for &verb in other.verbs().iter().rev() {
            if need_move {
                pt_ix -= 1;
                self.move_to(pts[pt_ix]);
                need_move = false;
            }
            match verb {
                Verb::Move => {
                    if need_close {
                        self.close();
                        need_close = false;
                    }
                    // The move's point starts the next reversed contour.
                    need_move = true;
                }
                Verb::Line => {
                    pt_ix -= 1;
                    self.line_to(pts[pt_ix]);
                }
                Verb::Quad => {
                    pt_ix -= 2;
                    self.quad_to(pts[pt_ix + 1], pts[pt_ix]);
                }
                Verb::Cubic => {
                    pt_ix -= 3;
                    self.cubic_to(pts[pt_ix + 2], pts[pt_ix + 1], pts[pt_ix]);
                }
                Verb::Close => need_close = true,
            }
        }
        self.is_oval = false;
    }
}
