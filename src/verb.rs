// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path verbs and the segment-kind mask.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// A drawing command recorded in a path.
///
/// Each verb consumes a fixed number of points from the path's point
/// sequence, see [`Verb::num_points`]. The end of a verb stream is signalled
/// by iterator exhaustion rather than by a stored terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Verb {
    /// Start a new contour.
    Move = 0,
    /// A straight segment.
    Line = 1,
    /// A quadratic Bézier segment.
    Quad = 2,
    /// A cubic Bézier segment.
    Cubic = 3,
    /// Close the current contour.
    Close = 4,
}

impl Verb {
    /// The number of points stored for this verb.
    #[inline]
    pub const fn num_points(self) -> usize {
        match self {
            Verb::Move | Verb::Line => 1,
            Verb::Quad => 2,
            Verb::Cubic => 3,
            Verb::Close => 0,
        }
    }

    /// The serialized code of this verb.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The verb for a serialized code, if the code is valid.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Verb> {
        match code {
            0 => Some(Verb::Move),
            1 => Some(Verb::Line),
            2 => Some(Verb::Quad),
            3 => Some(Verb::Cubic),
            4 => Some(Verb::Close),
            _ => None,
        }
    }

    /// The segment-kind bit this verb contributes, if it draws a segment.
    #[inline]
    pub const fn segment_mask(self) -> SegmentMask {
        match self {
            Verb::Line => SegmentMask::LINE,
            Verb::Quad => SegmentMask::QUAD,
            Verb::Cubic => SegmentMask::CUBIC,
            Verb::Move | Verb::Close => SegmentMask::EMPTY,
        }
    }
}

/// The set of segment kinds present in a path.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SegmentMask(u8);

impl SegmentMask {
    /// No segments.
    pub const EMPTY: SegmentMask = SegmentMask(0);
    /// At least one line.
    pub const LINE: SegmentMask = SegmentMask(1 << 0);
    /// At least one quadratic.
    pub const QUAD: SegmentMask = SegmentMask(1 << 1);
    /// At least one cubic.
    pub const CUBIC: SegmentMask = SegmentMask(1 << 2);

    const ALL_BITS: u8 = 0b111;

    /// The raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// A mask from raw bits, if no unknown bits are set.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<SegmentMask> {
        if bits & !Self::ALL_BITS == 0 {
            Some(SegmentMask(bits))
        } else {
            None
        }
    }

    /// Whether every kind in `other` is also in `self`.
    #[inline]
    pub const fn contains(self, other: SegmentMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no segment kind is present.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The mask describing a verb stream.
    pub fn from_verbs(verbs: &[Verb]) -> SegmentMask {
        verbs
            .iter()
            .fold(SegmentMask::EMPTY, |mask, v| mask | v.segment_mask())
    }
}

impl BitOr for SegmentMask {
    type Output = SegmentMask;

    #[inline]
    fn bitor(self, rhs: SegmentMask) -> SegmentMask {
        SegmentMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for SegmentMask {
    #[inline]
    fn bitor_assign(&mut self, rhs: SegmentMask) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for SegmentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(SegmentMask::LINE) {
            set.entry(&"Line");
        }
        if self.contains(SegmentMask::QUAD) {
            set.entry(&"Quad");
        }
        if self.contains(SegmentMask::CUBIC) {
            set.entry(&"Cubic");
        }
        set.finish()
    }
}
