// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path data output.

use alloc::string::{String, ToString};
use core::fmt;

use crate::{Path, PathEl};

/// Displays a path as SVG path data, see [`Path::svg`].
#[derive(Clone, Copy, Debug)]
pub struct SvgPathData<'a> {
    path: &'a Path,
}

impl fmt::Display for SvgPathData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, el) in self.path.raw_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match el {
                PathEl::MoveTo(p) => write!(f, "M{} {}", p.x, p.y)?,
                PathEl::Line(line) => write!(f, "L{} {}", line.p1.x, line.p1.y)?,
                PathEl::Quad(q) => write!(f, "Q{} {} {} {}", q.p1.x, q.p1.y, q.p2.x, q.p2.y)?,
                PathEl::Cubic(c) => write!(
                    f,
                    "C{} {} {} {} {} {}",
                    c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y
                )?,
                PathEl::Close(_) => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

impl Path {
    /// The stored verbs as SVG path data with absolute commands.
    ///
    /// No effort is made to shorten the output. The fill type is not part of
    /// path data; use `fill-rule` alongside it.
    pub fn svg(&self) -> SvgPathData<'_> {
        SvgPathData { path: self }
    }

    /// The stored verbs as an SVG path data string.
    pub fn to_svg(&self) -> String {
        self.svg().to_string()
    }
}
