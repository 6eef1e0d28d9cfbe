/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::marker::PhantomData;

use crate::traits::Word;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// A bit position within a [`BitBuffer`](crate::impls::BitBuffer) whose
/// storage word is `W`: the index of a word plus the index of a bit within
/// that word.
///
/// Positions are ordered as their linear bit address
/// [`bit_pos`](Position::bit_pos). They can be packed in a single `u32` or
/// `u64` with [`encode32`](Position::encode32) and
/// [`encode64`](Position::encode64), which is handy when many positions must
/// be kept around, e.g., for lazy decoding of data.
///
/// Positions perform no bounds checks against any buffer.
///
/// # Examples
/// ```
/// use bitbuffer::prelude::*;
///
/// let p = Position::<u32>::new(3, 7);
/// assert_eq!(p.bit_pos(), 3 * 32 + 7);
/// assert_eq!(Position::decode32(p.encode32()), p);
/// assert_eq!(Position::decode64(p.encode64()), p);
/// assert!(p < Position::new(4, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct Position<W: Word> {
    /// Index of the word containing the bit; compared first.
    word: usize,
    /// Index of the bit within the word.
    bit: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<W>,
}

impl<W: Word> Position<W> {
    /// Number of low bits holding the word index in [`encode32`](Position::encode32).
    const WORD_BITS_32: usize = 32 - W::LOG2_BITS;
    /// Number of low bits holding the word index in [`encode64`](Position::encode64).
    const WORD_BITS_64: usize = 64 - W::LOG2_BITS;

    /// The first bit of the buffer.
    pub const ZERO: Self = Self {
        word: 0,
        bit: 0,
        _marker: PhantomData,
    };

    /// Create a position from a word index and a bit index smaller than
    /// `W::BITS`.
    #[inline]
    #[must_use]
    pub fn new(word: usize, bit: usize) -> Self {
        debug_assert!(
            bit < W::BITS,
            "Bit index {} out of range for {}-bit words",
            bit,
            W::BITS
        );
        Self {
            word,
            bit,
            _marker: PhantomData,
        }
    }

    /// Create a position from a linear bit address.
    #[inline]
    #[must_use]
    pub fn from_bit_pos(bit_pos: u64) -> Self {
        Self::new(
            (bit_pos / W::BITS as u64) as usize,
            (bit_pos % W::BITS as u64) as usize,
        )
    }

    /// Create the position of the first bit of the word containing the given
    /// byte offset.
    ///
    /// This is the inverse of [`byte_offset`](Position::byte_offset), and it
    /// is useful when a buffer is deserialized from a byte stream.
    #[inline]
    #[must_use]
    pub fn from_byte_offset(byte_offset: usize) -> Self {
        Self::new(
            byte_offset / W::BYTES,
            (byte_offset % W::BYTES) * 8,
        )
    }

    /// The index of the word containing the bit.
    #[inline(always)]
    pub fn word(&self) -> usize {
        self.word
    }

    /// The index of the bit within its word.
    #[inline(always)]
    pub fn bit(&self) -> usize {
        self.bit
    }

    /// The linear bit address, that is, the number of bits before this
    /// position.
    #[inline(always)]
    pub fn bit_pos(&self) -> u64 {
        self.word as u64 * W::BITS as u64 + self.bit as u64
    }

    /// Whether this position is the first bit of a word.
    ///
    /// Alignment matters when buffers are serialized; see
    /// [`BitBuffer::terminate`](crate::impls::BitBuffer::terminate).
    #[inline(always)]
    pub fn is_aligned(&self) -> bool {
        self.bit == 0
    }

    /// Move this position to the first bit of the buffer.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::ZERO;
    }

    /// The size in bytes of the words from `start` up to (excluding) the word
    /// of this position.
    #[inline]
    pub fn byte_offset(&self, start: Self) -> usize {
        debug_assert!(
            start <= *self,
            "Start position {:?} is greater than this position {:?}",
            start,
            self
        );
        (self.word - start.word) * W::BYTES
    }

    /// Pack this position in 32 bits: the bit index goes in the upper
    /// `W::LOG2_BITS` bits, the word index in the remaining lower bits.
    ///
    /// With 32-bit words 27 bits are left for the word index, and with 64-bit
    /// words 26 bits, in both cases addressing 512 MiB. Larger buffers need
    /// [`encode64`](Position::encode64); this is checked in debug builds.
    #[inline]
    pub fn encode32(&self) -> u32 {
        debug_assert!(
            (self.word as u64) < 1 << Self::WORD_BITS_32,
            "32 bits are too few to encode word index {}",
            self.word
        );
        self.word as u32 | ((self.bit as u32) << Self::WORD_BITS_32)
    }

    /// Unpack a position packed by [`encode32`](Position::encode32).
    #[inline]
    #[must_use]
    pub fn decode32(code: u32) -> Self {
        Self::new(
            (code & ((1 << Self::WORD_BITS_32) - 1)) as usize,
            (code >> Self::WORD_BITS_32) as usize,
        )
    }

    /// Pack this position in 64 bits, with the same layout as
    /// [`encode32`](Position::encode32).
    #[inline]
    pub fn encode64(&self) -> u64 {
        debug_assert!(
            (self.word as u64) < 1 << Self::WORD_BITS_64,
            "64 bits are too few to encode word index {}",
            self.word
        );
        self.word as u64 | ((self.bit as u64) << Self::WORD_BITS_64)
    }

    /// Unpack a position packed by [`encode64`](Position::encode64).
    #[inline]
    #[must_use]
    pub fn decode64(code: u64) -> Self {
        Self::new(
            (code & ((1 << Self::WORD_BITS_64) - 1)) as usize,
            (code >> Self::WORD_BITS_64) as usize,
        )
    }
}

impl<W: Word> core::fmt::Display for Position<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}[{}]", self.word, self.bit)
    }
}
