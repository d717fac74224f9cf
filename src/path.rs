// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path value type and its cached metadata.

use alloc::sync::Arc;
use core::cell::Cell;
use core::fmt;

use crate::path_store::PathStore;
use crate::{
    Affine, Convexity, CubicBez, Direction, FillType, Iter, ParamCurve, PathEl, Point, QuadBez,
    Rect, SegmentMask, Transform, Vec2, Verb,
};

/// A sequence of contours made of lines, quadratic and cubic Béziers.
///
/// A `Path` is a value: cloning one is cheap because the verb and point
/// storage is shared between clones, and is copied only when one of them
/// is edited.
///
/// Derived properties (bounds, convexity, direction) are computed lazily
/// and cached until the next edit.
///
/// Coordinates are interpreted in a y-down space, so that a positive
/// cross product of successive edges is a clockwise turn.
#[derive(Clone)]
pub struct Path {
    pub(crate) store: Arc<PathStore>,
    pub(crate) fill_type: FillType,
    /// `None` while dirty.
    pub(crate) bounds: Cell<Option<PathBounds>>,
    /// `Convexity::Unknown` while dirty.
    pub(crate) convexity: Cell<Convexity>,
    pub(crate) direction: Cell<Direction>,
    pub(crate) segment_mask: SegmentMask,
    pub(crate) last_move: LastMove,
    pub(crate) is_oval: bool,
}

/// The bounds cache entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PathBounds {
    pub(crate) rect: Rect,
    pub(crate) is_finite: bool,
}

/// Where the current contour starts, and whether drawing may continue it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LastMove {
    /// Nothing has been drawn yet.
    None,
    /// The contour starting at this point index is open.
    Open(usize),
    /// The contour starting at this point index was closed; the next drawing
    /// call must first move back to that point.
    Closed(usize),
}

impl Path {
    /// Create a new, empty path.
    pub fn new() -> Path {
        Path::from_store(PathStore::default())
    }

    pub(crate) fn from_store(store: PathStore) -> Path {
        Path {
            store: Arc::new(store),
            fill_type: FillType::Winding,
            bounds: Cell::new(None),
            convexity: Cell::new(Convexity::Unknown),
            direction: Cell::new(Direction::Unknown),
            segment_mask: SegmentMask::EMPTY,
            last_move: LastMove::None,
            is_oval: false,
        }
    }

    /// The fill rule.
    #[inline]
    pub fn fill_type(&self) -> FillType {
        self.fill_type
    }

    /// Set the fill rule.
    ///
    /// This does not affect any cached geometry.
    #[inline]
    pub fn set_fill_type(&mut self, fill_type: FillType) {
        self.fill_type = fill_type;
    }

    /// Whether the fill rule fills the outside of the shape.
    #[inline]
    pub fn is_inverse_fill_type(&self) -> bool {
        self.fill_type.is_inverse()
    }

    /// Flip between a fill rule and its inverse.
    #[inline]
    pub fn toggle_inverse_fill_type(&mut self) {
        self.fill_type = self.fill_type.toggle_inverse();
    }

    /// Whether the path has no verbs at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.verbs().is_empty()
    }

    /// The number of stored points.
    #[inline]
    pub fn count_points(&self) -> usize {
        self.store.points().len()
    }

    /// The number of stored verbs.
    #[inline]
    pub fn count_verbs(&self) -> usize {
        self.store.verbs().len()
    }

    /// The stored points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        self.store.points()
    }

    /// The stored verbs.
    #[inline]
    pub fn verbs(&self) -> &[Verb] {
        self.store.verbs()
    }

    /// The point at `index`, if there is one.
    #[inline]
    pub fn point(&self, index: usize) -> Option<Point> {
        self.store.points().get(index).copied()
    }

    /// The last stored point, if any.
    #[inline]
    pub fn last_point(&self) -> Option<Point> {
        self.store.points().last().copied()
    }

    /// The kinds of segment present in the path.
    #[inline]
    pub fn segment_mask(&self) -> SegmentMask {
        self.segment_mask
    }

    /// A counter that changes whenever the path's storage is edited.
    ///
    /// Paths sharing storage report the same value.
    #[inline]
    pub fn generation_id(&self) -> u32 {
        self.store.generation()
    }

    /// Whether `self` and `other` currently share their storage.
    #[inline]
    pub fn shares_storage_with(&self, other: &Path) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    /// Exchange the contents of two paths.
    #[inline]
    pub fn swap(&mut self, other: &mut Path) {
        core::mem::swap(self, other);
    }

    /// Remove all verbs and points, releasing the storage.
    ///
    /// The fill type is kept.
    pub fn reset(&mut self) {
        let fill_type = self.fill_type;
        *self = Path::new();
        self.fill_type = fill_type;
    }

    /// Remove all verbs and points, keeping the storage allocation if it is
    /// not shared with another path.
    ///
    /// The fill type is kept.
    pub fn rewind(&mut self) {
        match Arc::get_mut(&mut self.store) {
            Some(store) => {
                store.clear();
                store.bump_generation();
            }
            None => self.store = Arc::new(PathStore::default()),
        }
        self.segment_mask = SegmentMask::EMPTY;
        self.last_move = LastMove::None;
        self.dirty_after_edit();
    }

    /// Reserve capacity for at least this many more verbs and points.
    pub fn reserve(&mut self, extra_verbs: usize, extra_points: usize) {
        self.edit().reserve(extra_verbs, extra_points);
    }

    /// The bounding box of all stored points.
    ///
    /// A path with at most one point, or with any non-finite coordinate,
    /// has empty bounds ([`Rect::ZERO`]).
    pub fn bounds(&self) -> Rect {
        self.bounds_entry().rect
    }

    /// Whether every stored coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.bounds_entry().is_finite
    }

    pub(crate) fn bounds_entry(&self) -> PathBounds {
        if let Some(entry) = self.bounds.get() {
            return entry;
        }
        let (rect, is_finite) = Rect::bounding(self.store.points());
        let entry = PathBounds { rect, is_finite };
        self.bounds.set(Some(entry));
        entry
    }

    /// Whether the path was built as a single oval and not edited since.
    ///
    /// This is a hint recorded by [`Path::add_oval`]; it is never derived
    /// from the geometry.
    #[inline]
    pub fn is_oval(&self) -> bool {
        self.is_oval
    }

    /// The oval's bounds, if [`Path::is_oval`] holds.
    pub fn as_oval(&self) -> Option<Rect> {
        self.is_oval.then(|| self.bounds())
    }

    /// Exclusive access to the storage, copying it first if it is shared.
    pub(crate) fn edit(&mut self) -> &mut PathStore {
        let holders = Arc::strong_count(&self.store);
        if holders > 1 {
            log::trace!("path storage shared by {holders} handles, copying before edit");
        }
        let store = Arc::make_mut(&mut self.store);
        store.bump_generation();
        store
    }

    /// Invalidate everything derived from the geometry.
    pub(crate) fn dirty_after_edit(&mut self) {
        self.bounds.set(None);
        self.convexity.set(Convexity::Unknown);
        self.direction.set(Direction::Unknown);
        self.is_oval = false;
    }

    /// Whether every verb so far is a move.
    pub(crate) fn has_only_moves(&self) -> bool {
        self.store.verbs().iter().all(|&v| v == Verb::Move)
    }

    /// Whether the canonical iterator yields nothing for this path.
    pub(crate) fn is_degenerate(&self) -> bool {
        Iter::new(self, false).next().is_none()
    }

    /// Translate every point by `v`.
    pub fn offset(&mut self, v: impl Into<Vec2>) {
        self.transform(&Affine::translate(v));
    }

    /// A copy of this path with `t` applied.
    #[must_use]
    pub fn transformed<T: Transform + ?Sized>(&self, t: &T) -> Path {
        let mut path = self.clone();
        path.transform(t);
        path
    }

    /// Map every point of the path through `t`.
    ///
    /// Under a perspective transform curves are first subdivided, since
    /// projective maps do not carry Bézier control points to the control
    /// points of the image curve. Otherwise cached metadata is carried over
    /// where the transform preserves it.
    pub fn transform<T: Transform + ?Sized>(&mut self, t: &T) {
        if t.has_perspective() {
            self.transform_perspective(t);
            return;
        }
        let bounds = self.bounds.get();
        let point_count = self.count_points();
        for p in self.edit().points_mut() {
            *p = t.map_point(*p);
        }
        let mapped_bounds = match bounds {
            Some(entry) if entry.is_finite && point_count > 1 && t.rect_stays_rect() => {
                let rect = t.map_rect(entry.rect);
                rect.is_finite().then_some(PathBounds {
                    rect,
                    is_finite: true,
                })
            }
            _ => None,
        };
        self.bounds.set(mapped_bounds);
        let det = t.determinant();
        if det == 0.0 {
            self.convexity.set(Convexity::Unknown);
            self.direction.set(Direction::Unknown);
        } else if det < 0.0 {
            self.direction.set(self.direction.get().reverse());
        }
        self.is_oval &= t.rect_stays_rect();
    }

    fn transform_perspective<T: Transform + ?Sized>(&mut self, t: &T) {
        log::debug!(
            "rebuilding {} verbs under a perspective transform",
            self.count_verbs()
        );
        let mut dst = Path::new();
        dst.reserve(self.count_verbs() * 4, self.count_points() * 4);
        let mut iter = Iter::new(self, false);
        while let Some(el) = iter.next_with(false) {
            match el {
                PathEl::MoveTo(p) => dst.move_to(p),
                PathEl::Line(line) => dst.line_to(line.p1),
                PathEl::Quad(q) => subdivide_quad(&mut dst, q, 2),
                PathEl::Cubic(c) => subdivide_cubic(&mut dst, c, 2),
                PathEl::Close(_) => dst.close(),
            }
        }
        for p in dst.edit().points_mut() {
            *p = t.map_point(*p);
        }
        dst.dirty_after_edit();
        dst.fill_type = self.fill_type;
        *self = dst;
    }
}

fn subdivide_quad(dst: &mut Path, q: QuadBez, level: u32) {
    if level == 0 {
        dst.quad_to(q.p1, q.p2);
    } else {
        let (a, b) = q.subdivide();
        subdivide_quad(dst, a, level - 1);
        subdivide_quad(dst, b, level - 1);
    }
}

fn subdivide_cubic(dst: &mut Path, c: CubicBez, level: u32) {
    if level == 0 {
        dst.cubic_to(c.p1, c.p2, c.p3);
    } else {
        let (a, b) = c.subdivide();
        subdivide_cubic(dst, a, level - 1);
        subdivide_cubic(dst, b, level - 1);
    }
}

impl Default for Path {
    fn default() -> Path {
        Path::new()
    }
}

impl PartialEq for Path {
    /// Paths are equal when they have the same fill rule and the same verbs
    /// and points; cached metadata is not compared.
    fn eq(&self, other: &Path) -> bool {
        self.fill_type == other.fill_type
            && self.segment_mask == other.segment_mask
            && (Arc::ptr_eq(&self.store, &other.store) || *self.store == *other.store)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("fill_type", &self.fill_type)
            .field("verbs", &self.store.verbs())
            .field("points", &self.store.points())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, Convexity, Direction, Path, Perspective, Point, Rect, SegmentMask, Verb};

    fn square() -> Path {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        path.line_to((0.0, 10.0));
        path.close();
        path
    }

    #[test]
    fn square_scenario() {
        let path = square();
        assert_eq!(path.as_rect(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(path.convexity(), Convexity::Convex);
        assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(path.contains(Point::new(5.0, 5.0)));
        assert!(!path.contains(Point::new(15.0, 5.0)));
    }

    #[test]
    fn bounds_idempotent() {
        let path = square();
        let a = path.bounds();
        let b = path.bounds();
        assert_eq!(a.x0.to_bits(), b.x0.to_bits());
        assert_eq!(a.y1.to_bits(), b.y1.to_bits());
        assert_eq!(path.bounds.get().map(|e| e.rect), Some(a));
    }

    #[test]
    fn bounds_edge_cases() {
        let mut path = Path::new();
        assert_eq!(path.bounds(), Rect::ZERO);
        assert!(path.is_finite());
        path.move_to((3.0, 4.0));
        assert_eq!(path.bounds(), Rect::ZERO);
        assert!(path.is_finite());
        path.line_to((f64::NAN, 1.0));
        assert_eq!(path.bounds(), Rect::ZERO);
        assert!(!path.is_finite());
        assert!(!path.contains(Point::new(3.0, 2.0)));
    }

    #[test]
    fn copy_on_write() {
        let a = square();
        let mut b = a.clone();
        assert!(a.shares_storage_with(&b));
        assert_eq!(a.generation_id(), b.generation_id());
        b.line_to((20.0, 20.0));
        assert!(!a.shares_storage_with(&b));
        assert_eq!(a.count_verbs(), 5);
        assert_eq!(b.count_verbs(), 7);
        assert_eq!(a.last_point(), Some(Point::new(0.0, 10.0)));
    }

    #[test]
    fn reset_and_rewind() {
        let mut path = square();
        path.toggle_inverse_fill_type();
        let shared = path.clone();
        path.rewind();
        assert!(path.is_empty());
        assert_eq!(path.segment_mask(), SegmentMask::EMPTY);
        assert!(path.is_inverse_fill_type());
        assert_eq!(shared.count_verbs(), 5);

        let mut path = square();
        path.reset();
        assert!(path.is_empty());
        assert_eq!(path.bounds(), Rect::ZERO);
        // Drawing after a reset starts from the origin.
        path.line_to((1.0, 1.0));
        assert_eq!(path.verbs(), &[Verb::Move, Verb::Line]);
        assert_eq!(path.point(0), Some(Point::ZERO));
    }

    #[test]
    fn equality() {
        let a = square();
        let mut b = square();
        assert_eq!(a, b);
        b.set_fill_type(crate::FillType::EvenOdd);
        assert_ne!(a, b);
        let mut c = square();
        c.line_to((1.0, 1.0));
        assert_ne!(a, c);
    }

    #[test]
    fn affine_transform_keeps_metadata() {
        let mut path = Path::new();
        path.add_rect(Rect::new(0.0, 0.0, 4.0, 2.0), Direction::Clockwise);
        assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 4.0, 2.0));
        path.transform(&Affine::scale_non_uniform(2.0, -1.0));
        assert_eq!(path.bounds(), Rect::new(0.0, -2.0, 8.0, 0.0));
        assert_eq!(path.direction(), Direction::CounterClockwise);
        assert_eq!(path.convexity(), Convexity::Convex);

        let mut oval = Path::new();
        oval.add_oval(Rect::new(0.0, 0.0, 4.0, 2.0), Direction::Clockwise);
        oval.offset((1.0, 1.0));
        assert_eq!(oval.as_oval(), Some(Rect::new(1.0, 1.0, 5.0, 3.0)));
        oval.transform(&Affine::rotate(0.5));
        assert!(!oval.is_oval());
    }

    #[test]
    fn perspective_subdivides_curves() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.quad_to((5.0, 10.0), (10.0, 0.0));
        path.cubic_to((12.0, 1.0), (13.0, 2.0), (14.0, 5.0));
        let before = path.clone();
        path.transform(&Perspective([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.001, 0.0, 1.0]));
        let quads = path.verbs().iter().filter(|&&v| v == Verb::Quad).count();
        let cubics = path.verbs().iter().filter(|&&v| v == Verb::Cubic).count();
        assert_eq!(quads, 4);
        assert_eq!(cubics, 4);
        // The end point is mapped exactly.
        let w = 1.0 + 0.001 * 14.0;
        let end = path.last_point().unwrap();
        assert!((end.x - 14.0 / w).abs() < 1e-12);
        assert!((end.y - 5.0 / w).abs() < 1e-12);
        assert_eq!(before.count_verbs(), 3);
    }
}
