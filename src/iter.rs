// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Iteration over the elements of a path.
//!
//! [`RawIter`] plays the stored verbs back exactly as recorded. [`Iter`]
//! yields a canonical form: degenerate segments are dropped, stray moves and
//! closes are elided, and contours can be closed with an explicit line.

use crate::{CubicBez, Line, Path, Point, QuadBez, Verb};

/// One element of a path, with the full point tuple of each segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEl {
    /// Start a new contour at the point.
    MoveTo(Point),
    /// A line segment.
    Line(Line),
    /// A quadratic Bézier segment.
    Quad(QuadBez),
    /// A cubic Bézier segment.
    Cubic(CubicBez),
    /// Close the contour that started at the point.
    Close(Point),
}

impl PathEl {
    /// The verb this element was produced from.
    pub fn verb(&self) -> Verb {
        match self {
            PathEl::MoveTo(_) => Verb::Move,
            PathEl::Line(_) => Verb::Line,
            PathEl::Quad(_) => Verb::Quad,
            PathEl::Cubic(_) => Verb::Cubic,
            PathEl::Close(_) => Verb::Close,
        }
    }

    /// The element's final point: the target of a segment, the point moved
    /// to, or the start of the contour being closed.
    pub fn end_point(&self) -> Point {
        match self {
            PathEl::MoveTo(p) | PathEl::Close(p) => *p,
            PathEl::Line(line) => line.p1,
            PathEl::Quad(q) => q.p2,
            PathEl::Cubic(c) => c.p3,
        }
    }
}

/// An iterator over the stored verbs of a path, with no canonicalization.
///
/// `Close` elements carry the start point of the contour they close.
#[derive(Clone, Debug)]
pub struct RawIter<'a> {
    verbs: &'a [Verb],
    points: &'a [Point],
    verb_ix: usize,
    pt_ix: usize,
    move_to: Point,
    last_pt: Point,
}

impl<'a> RawIter<'a> {
    /// Iterate over `path` from its first verb.
    pub fn new(path: &'a Path) -> RawIter<'a> {
        RawIter {
            verbs: path.verbs(),
            points: path.points(),
            verb_ix: 0,
            pt_ix: 0,
            move_to: Point::ZERO,
            last_pt: Point::ZERO,
        }
    }

    /// Restart iteration over another path.
    pub fn set_path(&mut self, path: &'a Path) {
        *self = RawIter::new(path);
    }
}

impl Iterator for RawIter<'_> {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        let verb = *self.verbs.get(self.verb_ix)?;
        self.verb_ix += 1;
        let pts = &self.points[self.pt_ix..self.pt_ix + verb.num_points()];
        self.pt_ix += verb.num_points();
        let el = match verb {
            Verb::Move => {
                self.move_to = pts[0];
                PathEl::MoveTo(pts[0])
            }
            Verb::Line => PathEl::Line(Line::new(self.last_pt, pts[0])),
            Verb::Quad => PathEl::Quad(QuadBez::new(self.last_pt, pts[0], pts[1])),
            Verb::Cubic => PathEl::Cubic(CubicBez::new(self.last_pt, pts[0], pts[1], pts[2])),
            Verb::Close => PathEl::Close(self.move_to),
        };
        self.last_pt = el.end_point();
        Some(el)
    }
}

/// Where the canonical iterator is within the current contour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentState {
    /// No contour is open, either initially or just after a close.
    EmptyContour,
    /// A move has been seen but no segment yet.
    AfterMove,
    /// A segment has been seen and the contour is not closed.
    AfterPrimitive,
}

/// An input to [`SegmentState::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentEvent {
    /// A move was emitted.
    Move,
    /// A line, quad or cubic was emitted.
    Primitive,
    /// A close was emitted.
    Close,
}

impl SegmentState {
    /// The state after `event`.
    #[inline]
    #[must_use]
    pub const fn advance(self, event: SegmentEvent) -> SegmentState {
        match event {
            SegmentEvent::Move => SegmentState::AfterMove,
            SegmentEvent::Primitive => SegmentState::AfterPrimitive,
            SegmentEvent::Close => SegmentState::EmptyContour,
        }
    }
}

/// The canonicalizing iterator over a path.
///
/// Segments whose points coincide within
/// [`DEGENERATE_TOLERANCE`](crate::common::DEGENERATE_TOLERANCE) are skipped,
/// as are moves that start no segment and closes of empty contours. A contour
/// is closed with an explicit [`PathEl::Line`] back to its start before the
/// [`PathEl::Close`] whenever the two points differ. With `force_close` every
/// open contour is closed this way too.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    verbs: &'a [Verb],
    points: &'a [Point],
    verb_ix: usize,
    pt_ix: usize,
    move_to: Point,
    last_pt: Point,
    force_close: bool,
    need_close: bool,
    close_line: bool,
    state: SegmentState,
}

impl<'a> Iter<'a> {
    /// Iterate over `path`, optionally closing every open contour.
    pub fn new(path: &'a Path, force_close: bool) -> Iter<'a> {
        Iter {
            verbs: path.verbs(),
            points: path.points(),
            verb_ix: 0,
            pt_ix: 0,
            move_to: Point::ZERO,
            last_pt: Point::ZERO,
            force_close,
            need_close: false,
            close_line: false,
            state: SegmentState::EmptyContour,
        }
    }

    /// Restart iteration over another path.
    pub fn set_path(&mut self, path: &'a Path, force_close: bool) {
        *self = Iter::new(path, force_close);
    }

    /// The current contour state.
    #[inline]
    pub fn state(&self) -> SegmentState {
        self.state
    }

    /// Whether the most recent line was synthesized to close a contour.
    #[inline]
    pub fn is_close_line(&self) -> bool {
        self.close_line
    }

    /// Whether the contour about to be iterated will be closed, either by an
    /// explicit close verb or because the iterator forces closing.
    pub fn is_closed_contour(&self) -> bool {
        if self.verb_ix >= self.verbs.len() {
            return false;
        }
        if self.force_close {
            return true;
        }
        let mut rest = &self.verbs[self.verb_ix..];
        if rest.first() == Some(&Verb::Move) {
            rest = &rest[1..];
        }
        for verb in rest {
            match verb {
                Verb::Move => break,
                Verb::Close => return true,
                _ => {}
            }
        }
        false
    }

    /// The next element, optionally without skipping degenerate segments.
    pub fn next_with(&mut self, consume_degenerates: bool) -> Option<PathEl> {
        if consume_degenerates {
            self.consume_degenerates();
        }
        self.do_next()
    }

    fn auto_close(&mut self) -> PathEl {
        if self.last_pt != self.move_to {
            // A NaN point never compares equal, so a line back to it would
            // never be seen as closing the contour.
            if self.last_pt.is_nan() || self.move_to.is_nan() {
                return PathEl::Close(self.move_to);
            }
            let line = Line::new(self.last_pt, self.move_to);
            self.last_pt = self.move_to;
            self.close_line = true;
            PathEl::Line(line)
        } else {
            PathEl::Close(self.move_to)
        }
    }

    /// The start point for the next segment.
    fn segment_start(&mut self) -> Point {
        if self.state == SegmentState::AfterMove {
            self.state = self.state.advance(SegmentEvent::Primitive);
            self.move_to
        } else {
            self.pt_ix
                .checked_sub(1)
                .map_or(self.last_pt, |ix| self.points[ix])
        }
    }

    /// Step over everything that would not advance the current point before
    /// the next move.
    fn consume_degenerates(&mut self) {
        let mut last_move: Option<(usize, usize)> = None;
        let mut last_pt = self.last_pt;
        while let Some(&verb) = self.verbs.get(self.verb_ix) {
            let pts = &self.points[self.pt_ix..self.pt_ix + verb.num_points()];
            let degenerate = match verb {
                Verb::Move => {
                    last_move = Some((self.verb_ix, self.pt_ix));
                    last_pt = pts[0];
                    true
                }
                Verb::Close => {
                    // A close is kept inside a contour, unless a move has
                    // intervened since the contour's last segment.
                    if self.state == SegmentState::AfterPrimitive && last_move.is_none() {
                        return;
                    }
                    true
                }
                Verb::Line => Line::new(last_pt, pts[0]).is_degenerate(),
                Verb::Quad => QuadBez::new(last_pt, pts[0], pts[1]).is_degenerate(),
                Verb::Cubic => CubicBez::new(last_pt, pts[0], pts[1], pts[2]).is_degenerate(),
            };
            if !degenerate {
                if let Some((verb_ix, pt_ix)) = last_move {
                    self.verb_ix = verb_ix;
                    self.pt_ix = pt_ix;
                }
                return;
            }
            self.verb_ix += 1;
            self.pt_ix += verb.num_points();
        }
    }

    fn do_next(&mut self) -> Option<PathEl> {
        let Some(&verb) = self.verbs.get(self.verb_ix) else {
            if self.need_close && self.state == SegmentState::AfterPrimitive {
                let el = self.auto_close();
                if el.verb() == Verb::Close {
                    self.need_close = false;
                }
                return Some(el);
            }
            return None;
        };
        self.verb_ix += 1;
        let start = self.pt_ix;
        let el = match verb {
            Verb::Move => {
                if self.need_close {
                    self.verb_ix -= 1;
                    let el = self.auto_close();
                    if el.verb() == Verb::Close {
                        self.need_close = false;
                    }
                    return Some(el);
                }
                if self.verb_ix == self.verbs.len() {
                    // A trailing move starts nothing.
                    return None;
                }
                let p = self.points[start];
                self.pt_ix += 1;
                self.move_to = p;
                self.last_pt = p;
                self.state = self.state.advance(SegmentEvent::Move);
                self.need_close = self.force_close;
                PathEl::MoveTo(p)
            }
            Verb::Line => {
                let p0 = self.segment_start();
                let p1 = self.points[start];
                self.pt_ix += 1;
                self.last_pt = p1;
                self.close_line = false;
                PathEl::Line(Line::new(p0, p1))
            }
            Verb::Quad => {
                let p0 = self.segment_start();
                let q = QuadBez::new(p0, self.points[start], self.points[start + 1]);
                self.pt_ix += 2;
                self.last_pt = q.p2;
                PathEl::Quad(q)
            }
            Verb::Cubic => {
                let p0 = self.segment_start();
                let c = CubicBez::new(
                    p0,
                    self.points[start],
                    self.points[start + 1],
                    self.points[start + 2],
                );
                self.pt_ix += 3;
                self.last_pt = c.p3;
                PathEl::Cubic(c)
            }
            Verb::Close => {
                let el = self.auto_close();
                if el.verb() == Verb::Line {
                    // Emit the close itself on the next call.
                    self.verb_ix -= 1;
                } else {
                    self.need_close = false;
                    self.state = self.state.advance(SegmentEvent::Close);
                }
                self.last_pt = self.move_to;
                el
            }
        };
        Some(el)
    }
}

impl Iterator for Iter<'_> {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        self.next_with(true)
    }
}

impl Path {
    /// The canonical elements of the path, see [`Iter`].
    #[inline]
    pub fn iter(&self, force_close: bool) -> Iter<'_> {
        Iter::new(self, force_close)
    }

    /// The stored elements of the path, see [`RawIter`].
    #[inline]
    pub fn raw_iter(&self) -> RawIter<'_> {
        RawIter::new(self)
    }
}
