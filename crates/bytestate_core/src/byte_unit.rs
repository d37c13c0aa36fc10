//! ByteUnit: one quantized feature, 8 bits, with a saturating algebra.
//!
//! The reference point of the domain is the midpoint `128`. `power` scales the
//! signed deviation from that midpoint, `blend` averages toward a partner,
//! `multiply` is the normalized product and `bitwise_combine` is plain XOR.
//! Every operation is closed over `0..=255`.

use core::fmt;
use serde::{Deserialize, Serialize};

/// An 8-bit quantized value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ByteUnit(u8);

impl ByteUnit {
    pub const MIN: Self = Self(0);

    /// Domain midpoint; `blend` toward it is the neutral mix.
    pub const NEUTRAL: Self = Self(128);

    pub const MAX: Self = Self(255);

    #[inline]
    pub const fn from_raw(byte: u8) -> Self {
        Self(byte)
    }

    #[inline]
    pub const fn to_raw(self) -> u8 {
        self.0
    }

    /// Signed distance from [`ByteUnit::NEUTRAL`], in `-128..=127`.
    #[inline]
    pub const fn deviation(self) -> i16 {
        self.0 as i16 - Self::NEUTRAL.0 as i16
    }

    /// Amplify the deviation from the midpoint by `exponent`, saturating at the
    /// domain edges: `clamp(128 + (v - 128) * n, 0, 255)`.
    ///
    /// `exponent == 1` is an exact identity. `exponent == 0` collapses to the
    /// midpoint, the same way any value raised to zero lands on the unit.
    #[inline]
    pub fn power(self, exponent: u32) -> Self {
        let n = exponent.min(i32::MAX as u32) as i32;
        let scaled = (self.deviation() as i32).saturating_mul(n);
        let value = (Self::NEUTRAL.0 as i32).saturating_add(scaled);
        Self(value.clamp(0, 255) as u8)
    }

    /// Normalized product `round(a * b / 255)`.
    ///
    /// `MAX` is the identity element and `MIN` absorbs. Monotonic in both
    /// arguments and never above `min(a, b)`.
    #[inline]
    pub const fn multiply(self, other: Self) -> Self {
        let product = self.0 as u16 * other.0 as u16;
        Self(((product + 127) / 255) as u8)
    }

    /// Symmetric midpoint of two values, ties rounded to even.
    ///
    /// Half-to-even keeps `blend(x, NEUTRAL)` strictly closer to the midpoint
    /// than `x` for every `x != 128`, from either side.
    #[inline]
    pub const fn blend(self, other: Self) -> Self {
        let sum = self.0 as u16 + other.0 as u16;
        let half = sum / 2;
        let rounded = if sum % 2 == 1 && half % 2 == 1 {
            half + 1
        } else {
            half
        };
        Self(rounded as u8)
    }

    /// XOR of the raw bytes.
    #[inline]
    pub const fn bitwise_combine(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// Mirror about the midpoint (`255 - v`).
    #[inline]
    pub const fn invert(self) -> Self {
        Self(255 - self.0)
    }
}

impl From<u8> for ByteUnit {
    fn from(byte: u8) -> Self {
        Self::from_raw(byte)
    }
}

impl From<ByteUnit> for u8 {
    fn from(unit: ByteUnit) -> Self {
        unit.to_raw()
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}
