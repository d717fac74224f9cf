// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convexity classification and winding direction.

use crate::{Path, PathEl, Point, Rect, Vec2, Verb};

/// The winding direction of a contour.
///
/// Paths use y-down coordinates, so clockwise means a positive cross product
/// between successive edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Not known, or not defined.
    #[default]
    Unknown,
    /// Clockwise.
    Clockwise,
    /// Counter-clockwise.
    CounterClockwise,
}

impl Direction {
    /// The opposite direction; `Unknown` stays `Unknown`.
    #[inline]
    #[must_use]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Unknown => Direction::Unknown,
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    fn from_cross(cross: f64) -> Direction {
        if cross > 0.0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    pub(crate) const fn code(self) -> u32 {
        match self {
            Direction::Unknown => 0,
            Direction::Clockwise => 1,
            Direction::CounterClockwise => 2,
        }
    }

    pub(crate) const fn from_code(code: u32) -> Option<Direction> {
        match code {
            0 => Some(Direction::Unknown),
            1 => Some(Direction::Clockwise),
            2 => Some(Direction::CounterClockwise),
            _ => None,
        }
    }
}

/// Whether a path is a single convex contour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Convexity {
    /// Not yet computed.
    #[default]
    Unknown,
    /// A single contour that never turns back on itself.
    Convex,
    /// Anything else, including any path with more than one contour.
    Concave,
}

impl Convexity {
    pub(crate) const fn code(self) -> u32 {
        match self {
            Convexity::Unknown => 0,
            Convexity::Convex => 1,
            Convexity::Concave => 2,
        }
    }

    pub(crate) const fn from_code(code: u32) -> Option<Convexity> {
        match code {
            0 => Some(Convexity::Unknown),
            1 => Some(Convexity::Convex),
            2 => Some(Convexity::Concave),
            _ => None,
        }
    }
}

/// Never produced by [`axis_sign`], so the first vector always counts as a
/// sign change.
const SIGN_SENTINEL: u8 = 2;

#[inline]
fn axis_sign(x: f64) -> u8 {
    u8::from(x < 0.0)
}

#[inline]
fn cross_sign(a: Vec2, b: Vec2) -> i32 {
    let cross = a.cross(b);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

/// Incremental convexity test for a single contour.
///
/// Points are fed one at a time; repeated points are ignored. The contour is
/// concave once successive turns disagree in sign, or once either coordinate
/// of the edge vectors changes sign more than three times.
struct Convexicator {
    point_count: usize,
    current: Point,
    vec0: Vec2,
    vec1: Vec2,
    first_vec: Vec2,
    turn_sign: i32,
    convexity: Convexity,
    direction: Direction,
    dx: u32,
    dy: u32,
    sx: u8,
    sy: u8,
}

impl Convexicator {
    fn new() -> Convexicator {
        Convexicator {
            point_count: 0,
            current: Point::ZERO,
            vec0: Vec2::ZERO,
            vec1: Vec2::ZERO,
            first_vec: Vec2::ZERO,
            turn_sign: 0,
            convexity: Convexity::Convex,
            direction: Direction::Unknown,
            dx: 0,
            dy: 0,
            sx: SIGN_SENTINEL,
            sy: SIGN_SENTINEL,
        }
    }

    fn add_point(&mut self, pt: Point) {
        if self.convexity == Convexity::Concave {
            return;
        }
        if self.point_count == 0 {
            self.current = pt;
            self.point_count = 1;
            return;
        }
        let vec = pt - self.current;
        if vec.is_zero() {
            return;
        }
        self.current = pt;
        self.point_count += 1;
        if self.point_count == 2 {
            self.first_vec = vec;
            self.vec1 = vec;
        } else {
            self.add_vec(vec);
        }
        let sx = axis_sign(vec.x);
        let sy = axis_sign(vec.y);
        self.dx += u32::from(sx != self.sx);
        self.dy += u32::from(sy != self.sy);
        self.sx = sx;
        self.sy = sy;
        if self.dx > 3 || self.dy > 3 {
            self.convexity = Convexity::Concave;
        }
    }

    fn close(&mut self) {
        if self.point_count > 2 {
            self.add_vec(self.first_vec);
        }
    }

    fn add_vec(&mut self, vec: Vec2) {
        self.vec0 = self.vec1;
        self.vec1 = vec;
        let sign = cross_sign(self.vec0, self.vec1);
        if self.turn_sign == 0 {
            self.turn_sign = sign;
            self.direction = match sign {
                1 => Direction::Clockwise,
                -1 => Direction::CounterClockwise,
                _ => Direction::Unknown,
            };
        } else if sign != 0 && sign != self.turn_sign {
            self.convexity = Convexity::Concave;
            self.direction = Direction::Unknown;
        }
    }
}

/// Splits a verb stream into contours, each the run of points from a move up
/// to the next move.
struct Contours<'a> {
    verbs: &'a [Verb],
    points: &'a [Point],
    verb_ix: usize,
    pt_ix: usize,
}

impl<'a> Iterator for Contours<'a> {
    type Item = &'a [Point];

    fn next(&mut self) -> Option<&'a [Point]> {
        let first = *self.verbs.get(self.verb_ix)?;
        let start = self.pt_ix;
        let mut count = first.num_points();
        self.verb_ix += 1;
        while let Some(&verb) = self.verbs.get(self.verb_ix) {
            if verb == Verb::Move {
                break;
            }
            count += verb.num_points();
            self.verb_ix += 1;
        }
        self.pt_ix += count;
        Some(&self.points[start..start + count])
    }
}

/// The direction of the first non-degenerate triangle fanned from `pts[0]`.
fn convex_dir_test(pts: &[Point]) -> Option<Direction> {
    let n = pts.len();
    let mut i = 0;
    let v0 = loop {
        let v = pts[i] - pts[0];
        if !v.is_zero() {
            break v;
        }
        i += 1;
        if i == n - 1 {
            return None;
        }
    };
    pts[i + 1..]
        .iter()
        .map(|&p| v0.cross(p - pts[0]))
        .find(|&cross| cross != 0.0)
        .map(Direction::from_cross)
}

/// The index of the first point with the greatest y.
fn find_max_y(pts: &[Point]) -> usize {
    let mut max = pts[0].y;
    let mut index = 0;
    for (i, p) in pts.iter().enumerate().skip(1) {
        if p.y > max {
            max = p.y;
            index = i;
        }
    }
    index
}

/// Step from `index` by `inc` (mod n) until a point differing from
/// `pts[index]` is found; returns `index` if there is none.
fn find_diff_pt(pts: &[Point], index: usize, inc: usize) -> usize {
    let n = pts.len();
    let mut i = index;
    loop {
        i = (i + inc) % n;
        if i == index || pts[index] != pts[i] {
            return i;
        }
    }
}

/// Indices of the min and max x among the run of points following `index`
/// that share its y.
fn find_min_max_x_at_y(pts: &[Point], index: usize) -> (usize, usize) {
    let y = pts[index].y;
    let (mut min, mut max) = (pts[index].x, pts[index].x);
    let (mut min_ix, mut max_ix) = (index, index);
    for (i, p) in pts.iter().enumerate().skip(index + 1) {
        if p.y != y {
            break;
        }
        if p.x < min {
            min = p.x;
            min_ix = i;
        } else if p.x > max {
            max = p.x;
            max_ix = i;
        }
    }
    (min_ix, max_ix)
}

/// The turn at the y-max vertex `index` of a contour, or `None` if the
/// contour collapses onto that vertex.
fn cross_at(pts: &[Point], index: usize) -> Option<f64> {
    let n = pts.len();
    let prev = find_diff_pt(pts, index, n - 1);
    if prev == index {
        return None;
    }
    let next = find_diff_pt(pts, index, 1);
    let cross = (pts[index] - pts[prev]).cross(pts[next] - pts[prev]);
    if cross == 0.0 && pts[prev].y == pts[index].y && pts[next].y == pts[index].y {
        return Some(pts[index].x - pts[next].x);
    }
    Some(cross)
}

/// Whether the whole of `rect` lies on the inner side of the edge `p0 → p1`.
fn check_edge_against_rect(p0: Point, p1: Point, rect: Rect, dir: Direction) -> bool {
    let (v, begin) = if dir == Direction::Clockwise {
        (p1 - p0, p0)
    } else {
        (p0 - p1, p1)
    };
    if v.is_zero() {
        return true;
    }
    let y_l = v.y * (rect.x0 - begin.x);
    let x_t = v.x * (rect.y0 - begin.y);
    let y_r = v.y * (rect.x1 - begin.x);
    let x_b = v.x * (rect.y1 - begin.y);
    !(x_t < y_l || x_t < y_r || x_b < y_l || x_b < y_r)
}

impl Path {
    /// Whether the path is a single convex contour.
    ///
    /// The result is computed on first use and cached until the next edit.
    /// An empty path is convex.
    pub fn convexity(&self) -> Convexity {
        let cached = self.convexity.get();
        if cached != Convexity::Unknown {
            return cached;
        }
        let convexity = self.compute_convexity();
        log::trace!(
            "classified {} verbs as {convexity:?}, direction {:?}",
            self.count_verbs(),
            self.direction.get()
        );
        self.convexity.set(convexity);
        convexity
    }

    /// Whether [`Path::convexity`] is [`Convexity::Convex`].
    #[inline]
    pub fn is_convex(&self) -> bool {
        self.convexity() == Convexity::Convex
    }

    /// Assert the path's convexity, overriding the cached value until the
    /// next edit.
    ///
    /// Passing [`Convexity::Unknown`] forces recomputation. Anything other
    /// than [`Convexity::Convex`] drops the cached direction.
    pub fn set_convexity(&mut self, convexity: Convexity) {
        self.convexity.set(convexity);
        if convexity != Convexity::Convex {
            self.direction.set(Direction::Unknown);
        }
    }

    fn compute_convexity(&self) -> Convexity {
        let mut state = Convexicator::new();
        let mut contours = 0;
        for el in self.iter(true) {
            match el {
                PathEl::MoveTo(p) => {
                    contours += 1;
                    if contours > 1 {
                        return Convexity::Concave;
                    }
                    state.add_point(p);
                }
                PathEl::Line(line) => state.add_point(line.p1),
                PathEl::Quad(q) => {
                    state.add_point(q.p1);
                    state.add_point(q.p2);
                }
                PathEl::Cubic(c) => {
                    state.add_point(c.p1);
                    state.add_point(c.p2);
                    state.add_point(c.p3);
                }
                PathEl::Close(_) => state.close(),
            }
            if state.convexity == Convexity::Concave {
                return Convexity::Concave;
            }
        }
        if state.convexity == Convexity::Convex && self.direction.get() == Direction::Unknown {
            self.direction.set(state.direction);
        }
        state.convexity
    }

    /// The winding direction of a convex path.
    ///
    /// Concave paths, and convex paths whose points are all collinear,
    /// report [`Direction::Unknown`].
    pub fn direction(&self) -> Direction {
        let cached = self.direction.get();
        if cached != Direction::Unknown {
            return cached;
        }
        if self.convexity() != Convexity::Convex {
            return Direction::Unknown;
        }
        self.cheap_direction().unwrap_or(Direction::Unknown)
    }

    /// Estimate the winding direction without classifying convexity.
    ///
    /// For a path already known to be convex, this is the orientation of the
    /// first non-degenerate triangle. Otherwise it is the turn at the highest
    /// y of the contour reaching furthest in y, which is the outer contour
    /// for the usual nested shapes. Returns `None` when every contour is
    /// degenerate.
    ///
    /// The result is cached only for convex paths.
    pub fn cheap_direction(&self) -> Option<Direction> {
        let cached = self.direction.get();
        if cached != Direction::Unknown {
            return Some(cached);
        }
        let convex = self.convexity.get() == Convexity::Convex;
        let contours = Contours {
            verbs: self.verbs(),
            points: self.points(),
            verb_ix: 0,
            pt_ix: 0,
        };
        let mut y_max = self.bounds().y0;
        let mut y_max_cross = 0.0;
        for pts in contours {
            let n = pts.len();
            if n < 3 {
                continue;
            }
            if convex {
                let dir = convex_dir_test(pts)?;
                self.direction.set(dir);
                return Some(dir);
            }
            let index = find_max_y(pts);
            if pts[index].y < y_max {
                continue;
            }
            let cross = if pts[(index + 1) % n].y == pts[index].y {
                let (min_ix, max_ix) = find_min_max_x_at_y(pts, index);
                if min_ix == max_ix {
                    cross_at(pts, index)
                } else {
                    // Only the sign matters here.
                    Some(min_ix as f64 - max_ix as f64)
                }
            } else {
                cross_at(pts, index)
            };
            match cross {
                Some(cross) if cross != 0.0 => {
                    y_max = pts[index].y;
                    y_max_cross = cross;
                }
                _ => {}
            }
        }
        (y_max_cross != 0.0).then(|| Direction::from_cross(y_max_cross))
    }

    /// Whether `rect` certainly lies inside the path.
    ///
    /// Only convex paths with a known direction are analysed; anything else
    /// answers `false`. A `true` answer is always correct, while `false` may
    /// be returned for some contained rectangles.
    pub fn conservatively_contains_rect(&self, rect: Rect) -> bool {
        if self.convexity() != Convexity::Convex {
            return false;
        }
        let Some(dir) = self.cheap_direction() else {
            return false;
        };
        let mut first = Point::ZERO;
        let mut prev = Point::ZERO;
        for el in self.raw_iter() {
            let next = match el {
                PathEl::MoveTo(p) => {
                    first = p;
                    prev = p;
                    continue;
                }
                PathEl::Close(_) => continue,
                seg => seg.end_point(),
            };
            if !check_edge_against_rect(prev, next, rect, dir) {
                return false;
            }
            prev = next;
        }
        check_edge_against_rect(prev, first, rect, dir)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use crate::{Convexity, Direction, Path, Point, Rect};

    fn polygon(points: &[(f64, f64)], close: bool) -> Path {
        let mut path = Path::new();
        let pts: Vec<Point> = points.iter().map(|&p| p.into()).collect();
        path.add_poly(&pts, close);
        path
    }

    #[test]
    fn empty_is_convex() {
        assert_eq!(Path::new().convexity(), Convexity::Convex);
        assert_eq!(Path::new().direction(), Direction::Unknown);
    }

    #[test]
    fn triangle_directions() {
        // y-down: (0,0) → (10,0) → (10,10) turns clockwise.
        let cw = polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], true);
        assert_eq!(cw.convexity(), Convexity::Convex);
        assert_eq!(cw.direction(), Direction::Clockwise);
        let ccw = polygon(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0)], true);
        assert_eq!(ccw.direction(), Direction::CounterClockwise);
    }

    #[test]
    fn concave_shapes() {
        let dart = polygon(
            &[(0.0, 0.0), (10.0, 5.0), (0.0, 10.0), (3.0, 5.0)],
            true,
        );
        assert_eq!(dart.convexity(), Convexity::Concave);
        assert_eq!(dart.direction(), Direction::Unknown);

        let mut two = Path::new();
        two.add_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Direction::Clockwise);
        two.add_rect(Rect::new(2.0, 0.0, 3.0, 1.0), Direction::Clockwise);
        assert_eq!(two.convexity(), Convexity::Concave);
    }

    #[test]
    fn zigzag_is_concave_by_sign_flips() {
        // A spiral-like polyline whose turns agree but which winds twice.
        let star = polygon(
            &[
                (0.0, -10.0),
                (6.0, 8.0),
                (-9.0, -3.0),
                (9.0, -3.0),
                (-6.0, 8.0),
            ],
            true,
        );
        assert_eq!(star.convexity(), Convexity::Concave);
    }

    #[test]
    fn collinear_points_are_convex() {
        let line = polygon(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)], false);
        assert_eq!(line.convexity(), Convexity::Convex);
        assert_eq!(line.direction(), Direction::Unknown);
        assert_eq!(line.cheap_direction(), None);
    }

    #[test]
    fn set_convexity_overrides_until_edit() {
        let mut path = polygon(&[(0.0, 0.0), (10.0, 5.0), (0.0, 10.0), (3.0, 5.0)], true);
        path.set_convexity(Convexity::Convex);
        assert_eq!(path.convexity(), Convexity::Convex);
        path.line_to((1.0, 1.0));
        assert_eq!(path.convexity(), Convexity::Concave);

        let mut square = Path::new();
        square.add_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Direction::Clockwise);
        assert_eq!(square.direction(), Direction::Clockwise);
        square.set_convexity(Convexity::Concave);
        assert_eq!(square.direction(), Direction::Unknown);
        square.set_convexity(Convexity::Unknown);
        assert_eq!(square.convexity(), Convexity::Convex);
        assert_eq!(square.direction(), Direction::Clockwise);
    }

    #[test]
    fn random_convex_polygons() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let n = rng.random_range(3..24);
            let mut angles: Vec<f64> = (0..n)
                .map(|_| rng.random_range(0.0..core::f64::consts::TAU))
                .collect();
            angles.sort_by(f64::total_cmp);
            angles.dedup_by(|a, b| (*a - *b).abs() < 1e-3);
            if angles.len() < 3 || angles[0] + core::f64::consts::TAU - angles[angles.len() - 1] < 1e-3 {
                continue;
            }
            let (cx, cy) = (rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));
            let r = rng.random_range(1.0..100.0);
            let pts: Vec<(f64, f64)> = angles
                .iter()
                .map(|a| (cx + r * a.cos(), cy + r * a.sin()))
                .collect();
            let path = polygon(&pts, true);
            assert_eq!(path.convexity(), Convexity::Convex, "{pts:?}");
            // Increasing angle is clockwise when y points down.
            assert_eq!(path.direction(), Direction::Clockwise, "{pts:?}");
            let mut reversed = pts.clone();
            reversed.reverse();
            let path = polygon(&reversed, true);
            assert_eq!(path.direction(), Direction::CounterClockwise);
        }
    }

    #[test]
    fn cheap_direction_uses_outer_contour() {
        // An 'o': outer clockwise, inner counter-clockwise.
        let mut path = Path::new();
        path.add_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Direction::Clockwise);
        path.add_rect(Rect::new(3.0, 3.0, 7.0, 7.0), Direction::CounterClockwise);
        assert_eq!(path.cheap_direction(), Some(Direction::Clockwise));
        // Not convex, so not cached.
        assert_eq!(path.direction.get(), Direction::Unknown);

        let mut path = Path::new();
        path.add_rect(Rect::new(3.0, 3.0, 7.0, 7.0), Direction::Clockwise);
        path.add_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Direction::CounterClockwise);
        assert_eq!(path.cheap_direction(), Some(Direction::CounterClockwise));
    }

    #[test]
    fn conservative_rect_containment() {
        for dir in [Direction::Clockwise, Direction::CounterClockwise] {
            let mut path = Path::new();
            path.add_oval(Rect::new(0.0, 0.0, 100.0, 100.0), dir);
            assert!(path.conservatively_contains_rect(Rect::new(40.0, 40.0, 60.0, 60.0)));
            assert!(!path.conservatively_contains_rect(Rect::new(0.0, 0.0, 20.0, 20.0)));
            assert!(!path.conservatively_contains_rect(Rect::new(90.0, 40.0, 110.0, 60.0)));
        }
        let dart = polygon(&[(0.0, 0.0), (10.0, 5.0), (0.0, 10.0), (3.0, 5.0)], true);
        assert!(!dart.conservatively_contains_rect(Rect::new(4.0, 4.0, 5.0, 6.0)));
    }
}
