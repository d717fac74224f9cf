// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill rules.

/// The rule that turns a winding number into an inside/outside decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillType {
    /// Inside where the winding number is non-zero.
    #[default]
    Winding,
    /// Inside where the winding number is odd.
    EvenOdd,
    /// Inside where the winding number is zero.
    InverseWinding,
    /// Inside where the winding number is even.
    InverseEvenOdd,
}

impl FillType {
    /// Whether the rule fills the outside of the shape.
    #[inline]
    pub const fn is_inverse(self) -> bool {
        matches!(self, FillType::InverseWinding | FillType::InverseEvenOdd)
    }

    /// Whether the rule uses the parity of the winding number.
    #[inline]
    pub const fn is_even_odd(self) -> bool {
        matches!(self, FillType::EvenOdd | FillType::InverseEvenOdd)
    }

    /// The same rule with the inverse flag flipped.
    #[inline]
    #[must_use]
    pub const fn toggle_inverse(self) -> FillType {
        match self {
            FillType::Winding => FillType::InverseWinding,
            FillType::EvenOdd => FillType::InverseEvenOdd,
            FillType::InverseWinding => FillType::Winding,
            FillType::InverseEvenOdd => FillType::EvenOdd,
        }
    }

    /// Resolve a winding number into containment.
    #[inline]
    pub const fn is_inside(self, winding: i32) -> bool {
        let inside = if self.is_even_odd() {
            winding & 1 != 0
        } else {
            winding != 0
        };
        inside != self.is_inverse()
    }

    pub(crate) const fn code(self) -> u32 {
        match self {
            FillType::Winding => 0,
            FillType::EvenOdd => 1,
            FillType::InverseWinding => 2,
            FillType::InverseEvenOdd => 3,
        }
    }

    pub(crate) const fn from_code(code: u32) -> Option<FillType> {
        match code {
            0 => Some(FillType::Winding),
            1 => Some(FillType::EvenOdd),
            2 => Some(FillType::InverseWinding),
            3 => Some(FillType::InverseEvenOdd),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FillType;

    #[test]
    fn resolution() {
        assert!(FillType::Winding.is_inside(2));
        assert!(!FillType::EvenOdd.is_inside(2));
        assert!(FillType::EvenOdd.is_inside(-1));
        assert!(!FillType::InverseWinding.is_inside(-1));
        assert!(FillType::InverseWinding.is_inside(0));
        assert!(FillType::InverseEvenOdd.is_inside(2));
    }

    #[test]
    fn toggle() {
        for ft in [
            FillType::Winding,
            FillType::EvenOdd,
            FillType::InverseWinding,
            FillType::InverseEvenOdd,
        ] {
            assert_ne!(ft.is_inverse(), ft.toggle_inverse().is_inverse());
            assert_eq!(ft.is_even_odd(), ft.toggle_inverse().is_even_odd());
            assert_eq!(ft.toggle_inverse().toggle_inverse(), ft);
            assert_eq!(FillType::from_code(ft.code()), Some(ft));
        }
    }
}
