// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizing rectangles and lines in a verb stream.

use crate::{Direction, Line, Path, Point, Rect, Verb};

/// A contour recognized as an axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectContour {
    /// The rectangle's bounds.
    pub rect: Rect,
    /// Whether the contour ends with a close verb.
    pub closed: bool,
    /// The order in which the corners are visited.
    pub direction: Direction,
}

/// Two-bit code of an axis-aligned edge: 0 up, 1 left, 2 down, 3 right.
#[inline]
fn edge_code(from: Point, to: Point) -> u8 {
    u8::from(from.x != to.x) | (u8::from(from.x < to.x || from.y < to.y) << 1)
}

/// State of a rectangle scan over one contour.
#[derive(Default)]
struct RectScan {
    corners: u8,
    first: Point,
    last: Point,
    first_dir: u8,
    last_dir: u8,
    next_dir: u8,
    closed_or_moved: bool,
    /// Bounds of the accepted edges only; moves do not contribute.
    traced: Rect,
}

impl RectScan {
    /// Feed the edge from the current point to `to`, returning `false` once
    /// the contour cannot be a rectangle.
    ///
    /// Zero-length edges are ignored, as are runs of collinear edges along
    /// one side.
    fn edge(&mut self, to: Point, auto_close: bool) -> bool {
        let from = self.last;
        if !to.is_finite() || (from.x != to.x && from.y != to.y) {
            return false;
        }
        if from == to {
            return true;
        }
        self.next_dir = edge_code(from, to);
        if self.corners == 0 {
            self.first_dir = self.next_dir;
            self.first = from;
            self.last = to;
            self.traced = Rect::from_points(from, to);
            self.corners = 1;
            self.closed_or_moved = false;
            return true;
        }
        if self.closed_or_moved {
            return false;
        }
        if auto_close && self.next_dir == self.first_dir {
            return true;
        }
        self.closed_or_moved = auto_close;
        if self.last_dir != self.next_dir {
            self.corners += 1;
            if self.corners > 4 {
                return false;
            }
        }
        self.last = to;
        self.traced = self.traced.union_pt(to);
        if self.last_dir == self.next_dir {
            return true;
        }
        // At the third corner the edge opposes the first edge; at the second
        // and fourth, opposite edges oppose each other.
        let turn = self.first_dir ^ (self.corners - 1);
        let cycle = if self.corners == 3 {
            0
        } else {
            self.next_dir ^ turn
        };
        cycle ^ turn == self.next_dir
    }
}

impl Path {
    /// Scan for a rectangle starting at the given verb and point indices,
    /// which are advanced past the verbs consumed.
    ///
    /// With `allow_partial`, the scan stops after the first close verb, so
    /// that a following contour can be scanned separately.
    fn scan_rect(
        &self,
        verb_ix: &mut usize,
        pt_ix: &mut usize,
        allow_partial: bool,
    ) -> Option<RectContour> {
        let verbs = self.verbs();
        let pts = self.points();
        let mut contour_start = pts.get(*pt_ix).copied().unwrap_or(Point::ZERO);
        let mut scan = RectScan::default();
        let mut auto_close = false;
        while let Some(&verb) = verbs.get(*verb_ix) {
            if allow_partial && auto_close {
                break;
            }
            match verb {
                Verb::Move => {
                    let p = pts[*pt_ix];
                    *pt_ix += 1;
                    if scan.corners == 0 {
                        contour_start = p;
                    }
                    scan.last = p;
                    scan.closed_or_moved = true;
                }
                Verb::Line => {
                    let p = pts[*pt_ix];
                    *pt_ix += 1;
                    if !scan.edge(p, auto_close) {
                        return None;
                    }
                }
                Verb::Close => {
                    auto_close = true;
                    if !scan.edge(contour_start, true) {
                        return None;
                    }
                }
                Verb::Quad | Verb::Cubic => return None,
            }
            *verb_ix += 1;
            scan.last_dir = scan.next_dir;
        }
        if scan.corners != 4 || !(scan.first == scan.last || auto_close) {
            return None;
        }
        let direction = if scan.first_dir == (scan.last_dir + 1) & 3 {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        };
        Some(RectContour {
            rect: scan.traced,
            closed: auto_close,
            direction,
        })
    }

    /// Recognize the whole path as a single axis-aligned rectangle.
    ///
    /// Every segment must be a horizontal or vertical line, the edges must
    /// turn the same way at four corners, and the contour must end where it
    /// started or be closed. Collinear pieces of a side and zero-length
    /// segments are tolerated; curves are not.
    pub fn rect_contour(&self) -> Option<RectContour> {
        self.scan_rect(&mut 0, &mut 0, false)
    }

    /// The rectangle this path traces, if any. See [`Path::rect_contour`].
    pub fn as_rect(&self) -> Option<Rect> {
        self.rect_contour().map(|contour| contour.rect)
    }

    /// Recognize two rectangle contours, one containing the other.
    ///
    /// The first contour must be closed. Returns `[outer, inner]`.
    pub fn is_nested_rects(&self) -> Option<[Rect; 2]> {
        let (mut verb_ix, mut pt_ix) = (0, 0);
        let first = self.scan_rect(&mut verb_ix, &mut pt_ix, true)?.rect;
        let second = self.scan_rect(&mut verb_ix, &mut pt_ix, false)?.rect;
        if first.contains_rect(second) {
            Some([first, second])
        } else if second.contains_rect(first) {
            Some([second, first])
        } else {
            None
        }
    }

    /// The line this path consists of, if it is exactly one move followed
    /// by one line.
    pub fn as_line(&self) -> Option<Line> {
        match (self.verbs(), self.points()) {
            ([Verb::Move, Verb::Line], &[p0, p1]) => Some(Line::new(p0, p1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::{edge_code, RectContour};
    use crate::{Direction, Line, Path, Point, Rect};

    fn poly(points: &[(f64, f64)], close: bool) -> Path {
        let pts: Vec<Point> = points.iter().map(|&p| p.into()).collect();
        let mut path = Path::new();
        path.add_poly(&pts, close);
        path
    }

    #[test]
    fn edge_codes() {
        let o = Point::new(0.0, 0.0);
        assert_eq!(edge_code(o, Point::new(0.0, -1.0)), 0);
        assert_eq!(edge_code(o, Point::new(-1.0, 0.0)), 1);
        assert_eq!(edge_code(o, Point::new(0.0, 1.0)), 2);
        assert_eq!(edge_code(o, Point::new(1.0, 0.0)), 3);
    }

    #[test]
    fn closed_square() {
        let path = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], true);
        assert_eq!(
            path.rect_contour(),
            Some(RectContour {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                closed: true,
                direction: Direction::Clockwise,
            })
        );
    }

    #[test]
    fn open_square_returning_to_start() {
        let path = poly(
            &[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)],
            false,
        );
        let contour = path.rect_contour().unwrap();
        assert!(!contour.closed);
        assert_eq!(contour.direction, Direction::CounterClockwise);
        // Three sides without a close do not make a rectangle.
        let path = poly(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)], false);
        assert_eq!(path.as_rect(), None);
    }

    #[test]
    fn added_rects_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let x0 = rng.random_range(-100.0..100.0);
            let y0 = rng.random_range(-100.0..100.0);
            let rect = Rect::new(
                x0,
                y0,
                x0 + rng.random_range(0.1..50.0),
                y0 + rng.random_range(0.1..50.0),
            );
            for dir in [Direction::Clockwise, Direction::CounterClockwise] {
                let mut path = Path::new();
                path.add_rect(rect, dir);
                let contour = path.rect_contour().unwrap();
                assert_eq!(contour.rect, rect);
                assert_eq!(contour.direction, dir);
                assert!(contour.closed);
            }
        }
    }

    #[test]
    fn tolerated_irregularities() {
        // Collinear pieces, a repeated point, and a final edge folded into
        // the close.
        let path = poly(
            &[
                (0.0, 0.0),
                (5.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (10.0, 10.0),
                (0.0, 10.0),
                (0.0, 5.0),
            ],
            true,
        );
        assert_eq!(path.as_rect(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        // Stray moves before or after the contour are not part of the rect.
        let square = Rect::new(0.0, 0.0, 2.0, 2.0);
        let mut path = Path::new();
        path.move_to((50.0, 50.0));
        path.add_rect(square, Direction::Clockwise);
        assert_eq!(path.as_rect(), Some(square));
        let mut path = Path::new();
        path.add_rect(square, Direction::Clockwise);
        path.move_to((50.0, 50.0));
        assert_eq!(path.as_rect(), Some(square));
        let mut path = Path::new();
        path.move_to((-7.0, 3.0));
        path.add_rect(square, Direction::CounterClockwise);
        path.move_to((50.0, -50.0));
        let contour = path.rect_contour().unwrap();
        assert_eq!(contour.rect, square);
        assert_eq!(contour.direction, Direction::CounterClockwise);
    }

    #[test]
    fn rejected_shapes() {
        // Diagonal edge.
        let path = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (1.0, 10.0)], true);
        assert_eq!(path.as_rect(), None);
        // Five corners.
        let path = poly(
            &[
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 5.0),
                (5.0, 5.0),
                (5.0, 10.0),
                (0.0, 10.0),
            ],
            true,
        );
        assert_eq!(path.as_rect(), None);
        // Curves.
        let mut path = Path::new();
        path.add_oval(Rect::new(0.0, 0.0, 10.0, 10.0), Direction::Clockwise);
        assert_eq!(path.as_rect(), None);
        // Two rectangles.
        let mut path = Path::new();
        path.add_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Direction::Clockwise);
        path.add_rect(Rect::new(2.0, 2.0, 4.0, 4.0), Direction::Clockwise);
        assert_eq!(path.as_rect(), None);
        // Non-finite corner.
        let path = poly(
            &[(0.0, 0.0), (f64::INFINITY, 0.0), (f64::INFINITY, 10.0), (0.0, 10.0)],
            true,
        );
        assert_eq!(path.as_rect(), None);
        assert_eq!(Path::new().as_rect(), None);
    }

    #[test]
    fn nested_rects() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = Rect::new(2.0, 3.0, 8.0, 7.0);
        let mut path = Path::new();
        path.add_rect(outer, Direction::Clockwise);
        path.add_rect(inner, Direction::CounterClockwise);
        assert_eq!(path.is_nested_rects(), Some([outer, inner]));

        let mut swapped = Path::new();
        swapped.add_rect(inner, Direction::Clockwise);
        swapped.add_rect(outer, Direction::Clockwise);
        assert_eq!(swapped.is_nested_rects(), Some([outer, inner]));

        let mut apart = Path::new();
        apart.add_rect(outer, Direction::Clockwise);
        apart.add_rect(outer + crate::Vec2::new(20.0, 0.0), Direction::Clockwise);
        assert_eq!(apart.is_nested_rects(), None);

        let mut single = Path::new();
        single.add_rect(outer, Direction::Clockwise);
        assert_eq!(single.is_nested_rects(), None);
    }

    #[test]
    fn line_recognition() {
        let mut path = Path::new();
        path.move_to((1.0, 2.0));
        path.line_to((3.0, 4.0));
        assert_eq!(path.as_line(), Some(Line::new((1.0, 2.0), (3.0, 4.0))));
        path.line_to((5.0, 4.0));
        assert_eq!(path.as_line(), None);
        assert_eq!(Path::new().as_line(), None);
    }
}
