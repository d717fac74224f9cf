// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-corner radii for rounded rectangles.

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::Rect;

/// Corner radii for [`Path::add_round_rect_radii`](crate::Path::add_round_rect_radii).
///
/// Each corner is a circular quarter arc; a zero radius leaves it sharp.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundedRectRadii {
    /// At `(x0, y0)`.
    pub top_left: f64,
    /// At `(x1, y0)`.
    pub top_right: f64,
    /// At `(x1, y1)`.
    pub bottom_right: f64,
    /// At `(x0, y1)`.
    pub bottom_left: f64,
}

impl RoundedRectRadii {
    /// Radii listed clockwise from the top-left corner.
    pub const fn new(top_left: f64, top_right: f64, bottom_right: f64, bottom_left: f64) -> Self {
        RoundedRectRadii {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// The same radius at every corner.
    pub const fn from_single_radius(radius: f64) -> Self {
        RoundedRectRadii::new(radius, radius, radius, radius)
    }

    /// Whether every corner is sharp.
    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_right == 0.0
            && self.bottom_left == 0.0
    }

    /// Radii that fit inside `rect`.
    ///
    /// Negative and NaN radii become zero. If two corners sharing a side
    /// need more than that side's length, every radius is scaled by the
    /// largest factor that makes all sides fit.
    pub fn clamped_to(&self, rect: Rect) -> RoundedRectRadii {
        let fix = |r: f64| if r > 0.0 { r } else { 0.0 };
        let radii = RoundedRectRadii::new(
            fix(self.top_left),
            fix(self.top_right),
            fix(self.bottom_right),
            fix(self.bottom_left),
        );
        let width = rect.width().abs();
        let height = rect.height().abs();
        let mut scale = 1.0_f64;
        for (sum, side) in [
            (radii.top_left + radii.top_right, width),
            (radii.top_right + radii.bottom_right, height),
            (radii.bottom_right + radii.bottom_left, width),
            (radii.bottom_left + radii.top_left, height),
        ] {
            if sum > side {
                scale = scale.min(side / sum);
            }
        }
        if scale < 1.0 {
            RoundedRectRadii::new(
                radii.top_left * scale,
                radii.top_right * scale,
                radii.bottom_right * scale,
                radii.bottom_left * scale,
            )
        } else {
            radii
        }
    }
}

impl From<f64> for RoundedRectRadii {
    fn from(radius: f64) -> Self {
        RoundedRectRadii::from_single_radius(radius)
    }
}

impl From<(f64, f64, f64, f64)> for RoundedRectRadii {
    fn from((tl, tr, br, bl): (f64, f64, f64, f64)) -> Self {
        RoundedRectRadii::new(tl, tr, br, bl)
    }
}
