// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared verb and point storage behind a [`Path`](crate::Path).

use alloc::vec::Vec;

use crate::{Point, Verb};

/// Verbs and points of a path.
///
/// The store is shared between path handles through an `Arc` and is only
/// ever edited while uniquely owned; see `Path::edit`.
///
/// The sum of the verbs' point counts always equals `points.len()`.
#[derive(Clone, Debug, Default)]
pub(crate) struct PathStore {
    verbs: Vec<Verb>,
    points: Vec<Point>,
    generation: u32,
}

impl PathStore {
    /// A store from parts that already satisfy the arity invariant.
    pub(crate) fn from_parts(verbs: Vec<Verb>, points: Vec<Point>) -> PathStore {
        debug_assert_eq!(
            verbs.iter().map(|v| v.num_points()).sum::<usize>(),
            points.len(),
            "verb arities must account for every point"
        );
        PathStore {
            verbs,
            points,
            generation: 0,
        }
    }

    #[inline]
    pub(crate) fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    #[inline]
    pub(crate) fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub(crate) fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    #[inline]
    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub(crate) fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Append `verb` and return the slice of points it owns, for the caller
    /// to fill in.
    pub(crate) fn grow_for_verb(&mut self, verb: Verb) -> &mut [Point] {
        let start = self.points.len();
        self.verbs.push(verb);
        self.points.resize(start + verb.num_points(), Point::ZERO);
        &mut self.points[start..]
    }

    pub(crate) fn reserve(&mut self, extra_verbs: usize, extra_points: usize) {
        self.verbs.reserve(extra_verbs);
        self.points.reserve(extra_points);
    }

    /// Drop all verbs and points, keeping the allocations.
    pub(crate) fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
    }
}

impl PartialEq for PathStore {
    fn eq(&self, other: &PathStore) -> bool {
        self.verbs == other.verbs && self.points == other.points
    }
}

#[cfg(test)]
mod tests {
    use super::PathStore;
    use crate::{Point, Verb};

    #[test]
    fn grow_keeps_arity() {
        let mut store = PathStore::default();
        store.grow_for_verb(Verb::Move)[0] = Point::new(1.0, 2.0);
        let pts = store.grow_for_verb(Verb::Cubic);
        assert_eq!(pts.len(), 3);
        pts[2] = Point::new(3.0, 4.0);
        assert_eq!(store.grow_for_verb(Verb::Close).len(), 0);
        assert_eq!(store.verbs(), &[Verb::Move, Verb::Cubic, Verb::Close]);
        assert_eq!(store.points().len(), 4);
        assert_eq!(store.points()[3], Point::new(3.0, 4.0));
    }

    #[test]
    fn equality_ignores_generation() {
        let mut a = PathStore::default();
        a.grow_for_verb(Verb::Move);
        let mut b = a.clone();
        b.bump_generation();
        assert_eq!(a, b);
        a.clear();
        assert_ne!(a, b);
    }
}
