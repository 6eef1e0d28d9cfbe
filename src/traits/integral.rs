/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// Values that can be written to and read from a bit stream by the typed
/// methods of [`BitWrite`](crate::traits::BitWrite) and
/// [`BitRead`](crate::traits::BitRead).
///
/// The generic core of the stream works on `u64` bit patterns: this trait
/// maps a value to its pattern and back. Signed values use their two's
/// complement pattern of [`Integral::BITS`] bits, zero-extended to 64 bits,
/// so that reading back the same width reproduces the sign.
pub trait Integral: Copy {
    /// The natural width of the type.
    const BITS: usize;

    /// The bit pattern of the value, zero-extended beyond [`Integral::BITS`].
    fn to_bits(self) -> u64;

    /// Build a value from the lowest [`Integral::BITS`] bits of `bits`.
    fn from_bits(bits: u64) -> Self;

    /// Zig-zag coding: non-negative values are doubled, negative values `v`
    /// become `-2v - 1`. For unsigned types this is [`Integral::to_bits`].
    fn to_zigzag(self) -> u64;

    /// Inverse of [`Integral::to_zigzag`].
    fn from_zigzag(bits: u64) -> Self;
}

impl Integral for bool {
    const BITS: usize = 1;

    #[inline(always)]
    fn to_bits(self) -> u64 {
        self as u64
    }

    #[inline(always)]
    fn from_bits(bits: u64) -> Self {
        bits & 1 != 0
    }

    #[inline(always)]
    fn to_zigzag(self) -> u64 {
        self as u64
    }

    #[inline(always)]
    fn from_zigzag(bits: u64) -> Self {
        bits & 1 != 0
    }
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl Integral for $ty {
            const BITS: usize = <$ty>::BITS as usize;

            #[inline(always)]
            fn to_bits(self) -> u64 {
                self as u64
            }

            #[inline(always)]
            fn from_bits(bits: u64) -> Self {
                bits as $ty
            }

            #[inline(always)]
            fn to_zigzag(self) -> u64 {
                self as u64
            }

            #[inline(always)]
            fn from_zigzag(bits: u64) -> Self {
                bits as $ty
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($ty:ty => $uty:ty),*) => {$(
        impl Integral for $ty {
            const BITS: usize = <$ty>::BITS as usize;

            #[inline(always)]
            fn to_bits(self) -> u64 {
                self as $uty as u64
            }

            #[inline(always)]
            fn from_bits(bits: u64) -> Self {
                bits as $uty as $ty
            }

            #[inline(always)]
            fn to_zigzag(self) -> u64 {
                let value = self as i64;
                ((value << 1) ^ (value >> 63)) as u64 as $uty as u64
            }

            #[inline(always)]
            fn from_zigzag(bits: u64) -> Self {
                ((bits >> 1) as i64 ^ -((bits & 1) as i64)) as $ty
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, usize);
impl_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, isize => usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_patterns() {
        assert_eq!((-1_i8).to_bits(), 0xFF);
        assert_eq!(i8::from_bits(0xFF), -1);
        assert_eq!(i16::MIN.to_bits(), 0x8000);
        assert_eq!(i64::from_bits(i64::MIN.to_bits()), i64::MIN);
        assert_eq!(u16::from_bits(0x1_0002), 2);
        assert!(bool::from_bits(3));
        assert_eq!(<bool as Integral>::BITS, 1);
        assert_eq!(<usize as Integral>::BITS, usize::BITS as usize);
    }

    #[test]
    fn test_zigzag() {
        assert_eq!(0_i32.to_zigzag(), 0);
        assert_eq!((-1_i32).to_zigzag(), 1);
        assert_eq!(1_i32.to_zigzag(), 2);
        assert_eq!((-2_i32).to_zigzag(), 3);
        assert_eq!(i8::MIN.to_zigzag(), 0xFF);
        assert_eq!(i8::MAX.to_zigzag(), 0xFE);
        assert_eq!(i64::MIN.to_zigzag(), u64::MAX);
        for value in [i8::MIN, -100, -1, 0, 1, 100, i8::MAX] {
            assert_eq!(i8::from_zigzag(value.to_zigzag()), value);
        }
        for value in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX - 1, i64::MAX] {
            assert_eq!(i64::from_zigzag(value.to_zigzag()), value);
        }
    }
}
