//! A 128-bit unsigned value made of two 64-bit halves.
//!
//! Arithmetic works on the halves directly: the carry (or borrow) out of the low half is
//! computed with bit logic, so nothing here depends on a native 128-bit integer.

use std::fmt;
use std::ops::{Add, Sub};

use num_traits::{Bounded, CheckedAdd, CheckedSub, WrappingAdd, WrappingSub, Zero};

pub mod convert;

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value128 {
    // Field order gives the derived ordering: higher half first.
    higher: u64,
    lower: u64,
}

/// Carry out of `a + b` without widening: halve both operands, add back the bit both
/// low bits would have produced, and look at the top bit.
#[inline]
const fn add_carry(a: u64, b: u64) -> u64 {
    ((a & b & 1) + (a >> 1) + (b >> 1)) >> 63
}

/// Borrow out of `a - b`, i.e. `1` exactly when `a < b`.
#[inline]
const fn sub_borrow(a: u64, b: u64) -> u64 {
    ((!a & b) | (!(a ^ b) & a.wrapping_sub(b))) >> 63
}

impl Value128 {
    pub const ZERO: Value128 = Value128::new(0, 0);
    pub const ONE: Value128 = Value128::new(0, 1);
    pub const MAX: Value128 = Value128::new(u64::MAX, u64::MAX);

    #[inline]
    pub const fn new(higher: u64, lower: u64) -> Self {
        Self { higher, lower }
    }

    #[inline]
    pub const fn higher(self) -> u64 {
        self.higher
    }

    #[inline]
    pub const fn lower(self) -> u64 {
        self.lower
    }

    /// Sum and whether it wrapped past [`Value128::MAX`].
    pub const fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let carry = add_carry(self.lower, rhs.lower);
        let lower = self.lower.wrapping_add(rhs.lower);
        let (higher, o1) = self.higher.overflowing_add(rhs.higher);
        let (higher, o2) = higher.overflowing_add(carry);
        (Self::new(higher, lower), o1 || o2)
    }

    /// Difference and whether it wrapped below zero.
    pub const fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let borrow = sub_borrow(self.lower, rhs.lower);
        let lower = self.lower.wrapping_sub(rhs.lower);
        let (higher, o1) = self.higher.overflowing_sub(rhs.higher);
        let (higher, o2) = higher.overflowing_sub(borrow);
        (Self::new(higher, lower), o1 || o2)
    }

    #[inline]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    #[inline]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.overflowing_add(rhs) {
            (v, false) => Some(v),
            (_, true) => None,
        }
    }

    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.overflowing_sub(rhs) {
            (v, false) => Some(v),
            (_, true) => None,
        }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.higher == 0 && self.lower == 0
    }
}

/// Wrapping addition.
impl Add for Value128 {
    type Output = Value128;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.wrapping_add(rhs)
    }
}

/// Wrapping subtraction.
impl Sub for Value128 {
    type Output = Value128;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.wrapping_sub(rhs)
    }
}

impl Zero for Value128 {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        Value128::is_zero(*self)
    }
}

impl Bounded for Value128 {
    fn min_value() -> Self {
        Self::ZERO
    }

    fn max_value() -> Self {
        Self::MAX
    }
}

impl WrappingAdd for Value128 {
    fn wrapping_add(&self, v: &Self) -> Self {
        Value128::wrapping_add(*self, *v)
    }
}

impl WrappingSub for Value128 {
    fn wrapping_sub(&self, v: &Self) -> Self {
        Value128::wrapping_sub(*self, *v)
    }
}

impl CheckedAdd for Value128 {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        Value128::checked_add(*self, *v)
    }
}

impl CheckedSub for Value128 {
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        Value128::checked_sub(*self, *v)
    }
}

impl From<u128> for Value128 {
    fn from(v: u128) -> Self {
        Self::new((v >> 64) as u64, v as u64)
    }
}

impl From<Value128> for u128 {
    fn from(v: Value128) -> Self {
        (v.higher as u128) << 64 | v.lower as u128
    }
}

impl From<(u64, u64)> for Value128 {
    fn from((higher, lower): (u64, u64)) -> Self {
        Self::new(higher, lower)
    }
}

impl From<u64> for Value128 {
    fn from(lower: u64) -> Self {
        Self::new(0, lower)
    }
}

impl fmt::Debug for Value128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value128({:#018x}, {:#018x})", self.higher, self.lower)
    }
}

impl fmt::Display for Value128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&u128::from(*self), f)
    }
}

impl fmt::LowerHex for Value128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:016x}{:016x}", self.higher, self.lower)
    }
}

impl fmt::UpperHex for Value128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:016X}{:016X}", self.higher, self.lower)
    }
}
