/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt::{Debug, Display};

use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// The storage word of a [`BitBuffer`](crate::impls::BitBuffer).
///
/// This is a trait alias for the properties we need from the unsigned
/// integers backing a buffer, plus a few constants describing their width.
/// All bit manipulation happens in `u64`, so words are converted with
/// [`AsPrimitive<u64>`] and [`Word::from_u64`].
pub trait Word:
    PrimInt + Unsigned + AsPrimitive<u64> + Debug + Display + Default + Send + Sync + 'static
{
    /// Number of bits in a word.
    const BITS: usize;
    /// Number of bytes in a word.
    const BYTES: usize;
    /// Base-two logarithm of [`Word::BITS`], that is, the number of bits
    /// needed to store a bit index within a word.
    const LOG2_BITS: usize;

    /// Truncate `value` to its lowest [`Word::BITS`] bits.
    fn from_u64(value: u64) -> Self;

    /// Append the little-endian representation of the word to `out`.
    fn extend_le_bytes(self, out: &mut Vec<u8>);

    /// Build a word from exactly [`Word::BYTES`] little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_word {
    ($($ty:ty),*) => {$(
        impl Word for $ty {
            const BITS: usize = <$ty>::BITS as usize;
            const BYTES: usize = core::mem::size_of::<$ty>();
            const LOG2_BITS: usize = <$ty>::BITS.trailing_zeros() as usize;

            #[inline(always)]
            fn from_u64(value: u64) -> Self {
                value as $ty
            }

            #[inline]
            fn extend_le_bytes(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_le_bytes(raw)
            }
        }
    )*};
}

impl_word!(u8, u16, u32, u64, usize);
