// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A compact binary encoding of paths.
//!
//! All values are little-endian:
//!
//! | Field        | Encoding                                              |
//! |--------------|-------------------------------------------------------|
//! | flags        | `u32`, see below                                      |
//! | verb count   | `u32`                                                 |
//! | point count  | `u32`                                                 |
//! | verbs        | one byte per verb, zero-padded to a multiple of four  |
//! | points       | `x`, `y` as `f64` per point                           |
//! | bounds       | `x0`, `y0`, `x1`, `y1` as `f64`                       |
//!
//! The flags word holds the segment mask in bits 0–2, the fill type in bits
//! 8–15, the convexity in bits 16–23, the oval hint in bit 24, finiteness in
//! bit 25 and the direction in bits 26–27.

use alloc::vec::Vec;

use thiserror::Error;

use crate::path::{LastMove, PathBounds};
use crate::path_store::PathStore;
use crate::{Convexity, Direction, FillType, Path, Point, Rect, SegmentMask, Verb};

const HEADER_LEN: usize = 12;
const POINT_LEN: usize = 16;
const BOUNDS_LEN: usize = 32;

const FILL_SHIFT: u32 = 8;
const CONVEXITY_SHIFT: u32 = 16;
const OVAL_BIT: u32 = 1 << 24;
const FINITE_BIT: u32 = 1 << 25;
const DIRECTION_SHIFT: u32 = 26;

/// The most verbs, and separately the most points, a path can have and still
/// be encoded. The header stores both counts as `u32`.
pub const MAX_ENCODED_COUNT: usize = u32::MAX as usize;

/// A verb or point count as stored in the header.
fn encoded_count(n: usize, what: &str) -> u32 {
    match u32::try_from(n) {
        Ok(n) => n,
        Err(_) => panic!("cannot encode a path with {n} {what}, the limit is {MAX_ENCODED_COUNT}"),
    }
}

/// Errors from decoding a serialized path.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The buffer ends before the encoded path does.
    #[error("buffer too short: need {needed} bytes, have {available}")]
    UnexpectedEof {
        /// Bytes required by the encoding read so far.
        needed: usize,
        /// Bytes in the buffer.
        available: usize,
    },
    /// A verb byte is not a known verb.
    #[error("invalid verb code {0}")]
    InvalidVerb(u8),
    /// The verbs require a different number of points than were stored.
    #[error("verbs need {expected} points but {actual} are stored")]
    PointCountMismatch {
        /// Points required by the verbs.
        expected: usize,
        /// Points stored.
        actual: usize,
    },
    /// The verb stream does not begin with a move.
    #[error("verb stream does not start with a move")]
    MissingMove,
    /// The fill type code is out of range.
    #[error("invalid fill type")]
    InvalidFillType,
    /// The convexity code is out of range.
    #[error("invalid convexity")]
    InvalidConvexity,
    /// The direction code is out of range.
    #[error("invalid direction")]
    InvalidDirection,
    /// The stored segment mask does not describe the verbs.
    #[error("segment mask does not match the verbs")]
    SegmentMaskMismatch,
}

#[inline]
fn padded(len: usize) -> usize {
    len.saturating_add(3) & !3
}

/// Sequential little-endian reads with bounds checking.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(len).ok_or(DecodeError::UnexpectedEof {
            needed: usize::MAX,
            available: self.buf.len(),
        })?;
        let bytes = self
            .buf
            .get(self.pos..end)
            .ok_or(DecodeError::UnexpectedEof {
                needed: end,
                available: self.buf.len(),
            })?;
        self.pos = end;
        Ok(bytes)
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let mut word = [0; 4];
        word.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(word))
    }

    fn f64(&mut self) -> Result<f64, DecodeError> {
        let mut word = [0; 8];
        word.copy_from_slice(self.take(8)?);
        Ok(f64::from_le_bytes(word))
    }

    fn point(&mut self) -> Result<Point, DecodeError> {
        Ok(Point::new(self.f64()?, self.f64()?))
    }
}

impl Path {
    /// The number of bytes [`Path::write_to_vec`] appends.
    pub fn serialized_len(&self) -> usize {
        HEADER_LEN
            + padded(self.count_verbs())
            + self.count_points() * POINT_LEN
            + BOUNDS_LEN
    }

    fn packed_flags(&self) -> u32 {
        let PathBounds { is_finite, .. } = self.bounds_entry();
        let mut flags = u32::from(self.segment_mask().bits())
            | self.fill_type.code() << FILL_SHIFT
            | self.convexity.get().code() << CONVEXITY_SHIFT
            | self.direction.get().code() << DIRECTION_SHIFT;
        if self.is_oval {
            flags |= OVAL_BIT;
        }
        if is_finite {
            flags |= FINITE_BIT;
        }
        flags
    }

    /// Append the encoding of this path to `buf`.
    ///
    /// Cached metadata is written as it stands; bounds are computed first if
    /// needed.
    ///
    /// # Panics
    ///
    /// Panics if the path has more than [`MAX_ENCODED_COUNT`] verbs or
    /// points, rather than writing a header that would not decode.
    pub fn write_to_vec(&self, buf: &mut Vec<u8>) {
        let verb_count = encoded_count(self.count_verbs(), "verbs");
        let point_count = encoded_count(self.count_points(), "points");
        buf.reserve(self.serialized_len());
        buf.extend_from_slice(&self.packed_flags().to_le_bytes());
        buf.extend_from_slice(&verb_count.to_le_bytes());
        buf.extend_from_slice(&point_count.to_le_bytes());
        buf.extend(self.verbs().iter().map(|v| v.code()));
        buf.resize(buf.len() + padded(self.count_verbs()) - self.count_verbs(), 0);
        for p in self.points() {
            buf.extend_from_slice(&p.x.to_le_bytes());
            buf.extend_from_slice(&p.y.to_le_bytes());
        }
        let Rect { x0, y0, x1, y1 } = self.bounds();
        for v in [x0, y0, x1, y1] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
    }

    /// The encoding of this path. Panics under the same conditions as
    /// [`Path::write_to_vec`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.serialized_len());
        self.write_to_vec(&mut buf);
        buf
    }

    /// Decode a path from the start of `buf`, returning it along with the
    /// number of bytes consumed.
    ///
    /// The stored bounds, finiteness and cached analysis results are
    /// trusted; only the structure is validated. A direction stored for a
    /// path that is not convex is dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the buffer is truncated, holds an unknown
    /// verb or flag value, or describes an inconsistent verb stream.
    pub fn read_from(buf: &[u8]) -> Result<(Path, usize), DecodeError> {
        let result = decode(buf);
        if let Err(err) = &result {
            log::debug!("rejected serialized path: {err}");
        }
        result
    }
}

fn decode(buf: &[u8]) -> Result<(Path, usize), DecodeError> {
    let mut reader = Reader { buf, pos: 0 };
    let flags = reader.u32()?;
    let verb_count = reader.u32()? as usize;
    let point_count = reader.u32()? as usize;

    let fill_type =
        FillType::from_code((flags >> FILL_SHIFT) & 0xff).ok_or(DecodeError::InvalidFillType)?;
    let convexity = Convexity::from_code((flags >> CONVEXITY_SHIFT) & 0xff)
        .ok_or(DecodeError::InvalidConvexity)?;
    let direction = Direction::from_code((flags >> DIRECTION_SHIFT) & 0x3)
        .ok_or(DecodeError::InvalidDirection)?;
    let mask =
        SegmentMask::from_bits((flags & 0xff) as u8).ok_or(DecodeError::SegmentMaskMismatch)?;

    let verb_bytes = reader.take(padded(verb_count))?;
    let mut verbs = Vec::with_capacity(verb_count);
    for &code in &verb_bytes[..verb_count] {
        verbs.push(Verb::from_code(code).ok_or(DecodeError::InvalidVerb(code))?);
    }
    if verbs.first().is_some_and(|&v| v != Verb::Move) {
        return Err(DecodeError::MissingMove);
    }
    let expected: usize = verbs.iter().map(|v| v.num_points()).sum();
    if expected != point_count {
        return Err(DecodeError::PointCountMismatch {
            expected,
            actual: point_count,
        });
    }
    if SegmentMask::from_verbs(&verbs) != mask {
        return Err(DecodeError::SegmentMaskMismatch);
    }

    // Check the whole length up front rather than failing midway.
    let points_len = point_count
        .checked_mul(POINT_LEN)
        .and_then(|len| len.checked_add(BOUNDS_LEN))
        .unwrap_or(usize::MAX);
    let needed = reader.pos.saturating_add(points_len);
    if needed > buf.len() {
        return Err(DecodeError::UnexpectedEof {
            needed,
            available: buf.len(),
        });
    }
    let mut points = Vec::with_capacity(point_count);
    for _ in 0..point_count {
        points.push(reader.point()?);
    }
    let bounds = Rect::new(reader.f64()?, reader.f64()?, reader.f64()?, reader.f64()?);

    let last_move = last_move_of(&verbs);
    let mut path = Path::from_store(PathStore::from_parts(verbs, points));
    path.fill_type = fill_type;
    path.segment_mask = mask;
    path.last_move = last_move;
    path.is_oval = flags & OVAL_BIT != 0;
    path.bounds.set(Some(PathBounds {
        rect: bounds,
        is_finite: flags & FINITE_BIT != 0,
    }));
    path.convexity.set(convexity);
    if convexity == Convexity::Convex {
        path.direction.set(direction);
    }
    Ok((path, reader.pos))
}

/// Where the next drawing call continues, as recorded by the builder.
fn last_move_of(verbs: &[Verb]) -> LastMove {
    let mut pt_ix = 0;
    let mut last_move = LastMove::None;
    for &verb in verbs {
        match verb {
            Verb::Move => last_move = LastMove::Open(pt_ix),
            Verb::Close => {
                if let LastMove::Open(ix) = last_move {
                    last_move = LastMove::Closed(ix);
                }
            }
            _ => {}
        }
        pt_ix += verb.num_points();
    }
    last_move
}
