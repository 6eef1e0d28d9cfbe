/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::impls::{BitBuffer, Position};
use crate::traits::*;
use crate::utils::lower_mask;

/// An implementation of [`BitRead`] and [`BitSeek`] on a [`WordSource`],
/// that is, a [`BitBuffer`] or a [`FrozenBitBuffer`](crate::impls::FrozenBitBuffer).
///
/// The reader keeps a copy of the word containing the current position,
/// shifted so that the next bit to read is the lowest one. The following
/// words are fetched from the buffer as they are reached. Changes made by a
/// writer to the current word become visible only after
/// [`sync`](BitReader::sync).
///
/// Bits past the end of the storage read as zero; reading past the capacity
/// is detected by a debug assertion.
#[derive(Debug)]
pub struct BitReader<'a, W: Word, B: WordSource<Word = W> = BitBuffer<W>> {
    buffer: &'a B,
    /// The position of the next bit to read.
    index: Position<W>,
    /// The current word shifted right by the bit index.
    current: u64,
}

impl<'a, W: Word, B: WordSource<Word = W>> BitReader<'a, W, B> {
    /// Create a reader at the start of `buffer`.
    pub fn new(buffer: &'a B) -> Self {
        Self::at(buffer, Position::ZERO)
    }

    /// Create a reader at `index`.
    pub fn at(buffer: &'a B, index: Position<W>) -> Self {
        tracing::trace!(%index, "binding reader");
        Self {
            buffer,
            index,
            current: buffer.fetch(index.word()) >> index.bit(),
        }
    }

    /// Reload the current word from the buffer.
    #[inline]
    pub fn sync(&mut self) -> &mut Self {
        self.current = self.buffer.fetch(self.index.word()) >> self.index.bit();
        self
    }

    /// Move to the start of the buffer.
    #[inline]
    pub fn reset(&mut self) {
        self.reset_to(Position::ZERO);
    }

    /// Move to `index`.
    pub fn reset_to(&mut self, index: Position<W>) {
        tracing::trace!(from = %self.index, to = %index, "moving reader");
        self.index = index;
        self.sync();
    }

    /// The number of bits between the current position and the position
    /// published by the last writer flush.
    #[inline]
    pub fn available(&self) -> u64 {
        self.buffer
            .flushed_index()
            .bit_pos()
            .saturating_sub(self.index.bit_pos())
    }
}

impl<W: Word, B: WordSource<Word = W>> Clone for BitReader<'_, W, B> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer,
            index: self.index,
            current: self.current,
        }
    }
}

impl<W: Word, B: WordSource<Word = W>> BitRead for BitReader<'_, W, B> {
    #[inline]
    fn read_bits(&mut self, n: usize) -> u64 {
        debug_assert!(n <= 64, "Cannot read {} bits at once", n);
        if n == 0 {
            return 0;
        }
        debug_assert!(
            n as u64 <= self.remaining_size(),
            "Cannot read {} bits at {}: capacity is {} bits",
            n,
            self.index,
            self.buffer.capacity()
        );

        let bit = self.index.bit();
        let in_word = W::BITS - bit;
        if n < in_word {
            // single word access
            let value = self.current & lower_mask(n);
            self.current >>= n;
            self.index = Position::new(self.index.word(), bit + n);
            return value;
        }

        let mut value = self.current;
        let mut read = in_word;
        let mut word = self.index.word() + 1;
        let mut next = self.buffer.fetch(word);
        while n - read >= W::BITS {
            value |= next << read;
            read += W::BITS;
            word += 1;
            next = self.buffer.fetch(word);
        }
        let rest = n - read;
        if rest > 0 {
            value |= (next & lower_mask(rest)) << read;
        }
        self.current = next >> rest;
        self.index = Position::new(word, rest);
        value
    }
}

impl<W: Word, B: WordSource<Word = W>> BitSeek<W> for BitReader<'_, W, B> {
    #[inline(always)]
    fn index(&self) -> Position<W> {
        self.index
    }

    #[inline]
    fn set_index(&mut self, index: Position<W>) {
        self.reset_to(index);
    }

    #[inline(always)]
    fn capacity(&self) -> u64 {
        self.buffer.capacity()
    }
}
