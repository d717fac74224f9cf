// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector path geometry.
//!
//! The vojo library stores 2D vector paths as a verb stream with points, and
//! answers the questions a renderer asks before drawing one: its bounds,
//! whether it is convex and which way it winds, whether it is really a
//! rectangle, an oval or a line, and whether a point is inside it under a
//! given fill rule.
//!
//! Coordinates are y-down, as on screens. A contour that visits the corners
//! of a rectangle in the order top-left, top-right, bottom-right is
//! [`Direction::Clockwise`].
//!
//! # Examples
//!
//! Building a path and querying it:
//! ```
//! use vojo::{Convexity, Direction, FillType, Path, Point, Rect};
//!
//! let mut path = Path::new();
//! path.add_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Direction::Clockwise);
//! assert_eq!(path.as_rect(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! assert_eq!(path.convexity(), Convexity::Convex);
//! assert_eq!(path.direction(), Direction::Clockwise);
//!
//! // Punch a hole with an oval running the other way.
//! path.add_oval(Rect::new(2.0, 2.0, 8.0, 8.0), Direction::CounterClockwise);
//! assert!(!path.contains(Point::new(5.0, 5.0)));
//! assert!(path.contains(Point::new(1.0, 5.0)));
//!
//! path.set_fill_type(FillType::InverseWinding);
//! assert!(path.contains(Point::new(5.0, 5.0)));
//! ```
//!
//! Paths share storage on clone and survive a trip through bytes:
//! ```
//! use vojo::{Direction, Path};
//!
//! let mut path = Path::new();
//! path.add_circle((0.0, 0.0), 4.0, Direction::Clockwise);
//! let copy = path.clone();
//! assert!(copy.shares_storage_with(&path));
//!
//! let bytes = path.to_bytes();
//! let (decoded, used) = Path::read_from(&bytes).unwrap();
//! assert_eq!(used, bytes.len());
//! assert_eq!(decoded, path);
//! assert!(decoded.is_oval());
//! ```
//!
//! # Features
//!
//! The following crate [feature flags](https://doc.rust-lang.org/cargo/reference/features.html#dependency-features) are available:
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//!   This is useful for `no_std` environments.
//!   However, note that the `libm` crate is not as efficient as the standard library.
//! - `mint`: Enable `From`/`Into` conversion of vojo and [mint][] types, enabling interoperability
//!   with other graphics libraries.
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on the value types.
//! - `schemars`: Add best-effort support for using vojo types in JSON schemas using [schemars][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//! Note that vojo does require that an allocator is available (i.e. it uses [alloc]).
//!
//! [libm]: https://docs.rs/libm
//! [mint]: https://docs.rs/mint
//! [schemars]: https://docs.rs/schemars

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if
)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
#![allow(
    missing_debug_implementations,
    elided_lifetimes_in_paths,
    single_use_lifetimes,
    trivial_numeric_casts,
    unnameable_types,
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::wildcard_imports,
    clippy::shadow_unrelated,
    clippy::missing_assert_message,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::exhaustive_enums,
    clippy::match_same_arms,
    clippy::partial_pub_fields,
    clippy::unseparated_literal_suffix,
    clippy::duplicated_attributes,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("vojo requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod affine;
mod arc;
mod builder;
pub mod common;
mod convexity;
mod cubicbez;
mod fill_type;
mod iter;
mod line;
mod param_curve;
mod path;
mod path_store;
mod point;
mod quadbez;
mod rect;
mod recognize;
mod rounded_rect_radii;
mod serialize;
mod shape;
mod svg;
mod transform;
mod vec2;
mod verb;
mod winding;

pub use crate::affine::*;
pub use crate::arc::*;
pub use crate::convexity::*;
pub use crate::cubicbez::*;
pub use crate::fill_type::*;
pub use crate::iter::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::path::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::rect::*;
pub use crate::recognize::*;
pub use crate::rounded_rect_radii::*;
pub use crate::serialize::*;
pub use crate::shape::*;
pub use crate::svg::*;
pub use crate::transform::*;
pub use crate::vec2::*;
pub use crate::verb::*;
pub use crate::winding::*;
