/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::cell::Cell;

use crate::impls::{BitBuffer, Position};
use crate::traits::{Word, WordSource};

/// An immutable buffer of bits stored in words of type `W`.
///
/// A frozen buffer is obtained from a [`BitBuffer`] once writing is done
/// ([`BitBuffer::into_frozen`], [`BitBuffer::freeze`]). Its words are plain
/// `W`s, so it is [`Sync`]: any number of
/// [`BitReader`](crate::impls::BitReader)s can read it from different threads
/// at the same time.
///
/// # Examples
/// ```
/// use bitbuffer::prelude::*;
///
/// let buffer = BitBuffer::<u64>::with_capacity(128);
/// BitWriter::new(&buffer).write(0xCAFE_u16);
/// let frozen = buffer.into_frozen();
///
/// std::thread::scope(|scope| {
///     for _ in 0..4 {
///         scope.spawn(|| assert_eq!(BitReader::new(&frozen).read::<u16>(), 0xCAFE));
///     }
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenBitBuffer<W: Word> {
    words: Box<[W]>,
    /// The end of the data.
    flushed: Position<W>,
}

impl<W: Word> FrozenBitBuffer<W> {
    /// Create a frozen buffer from its words and the end of its data.
    pub fn new(words: impl Into<Box<[W]>>, flushed: Position<W>) -> Self {
        let words = words.into();
        debug_assert!(
            flushed.bit_pos() <= words.len() as u64 * W::BITS as u64,
            "Position {} is beyond the capacity of {} words",
            flushed,
            words.len()
        );
        Self { words, flushed }
    }

    /// The number of storage words.
    #[inline(always)]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The number of bits the buffer holds.
    #[inline(always)]
    pub fn capacity(&self) -> u64 {
        self.words.len() as u64 * W::BITS as u64
    }

    /// The word containing the bit at `index`.
    #[inline]
    pub fn word(&self, index: Position<W>) -> W {
        self.words[index.word()]
    }

    #[inline(always)]
    pub fn words(&self) -> &[W] {
        &self.words
    }

    /// The end of the data, as published by the last writer flush before
    /// freezing.
    #[inline(always)]
    pub fn flushed_index(&self) -> Position<W> {
        self.flushed
    }

    /// Turn back into a writable heap buffer with the same flushed position.
    pub fn thaw(self) -> BitBuffer<W> {
        let buffer = BitBuffer::from_storage(
            Vec::from(self.words)
                .into_iter()
                .map(Cell::new)
                .collect::<Vec<_>>(),
        );
        buffer.publish_flushed(self.flushed);
        buffer
    }
}

impl<W: Word> WordSource for FrozenBitBuffer<W> {
    type Word = W;

    #[inline(always)]
    fn word_count(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    fn fetch(&self, word: usize) -> u64 {
        self.words.get(word).map_or(0, |&word| word.as_())
    }

    #[inline(always)]
    fn flushed_index(&self) -> Position<W> {
        self.flushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::BitReader;
    use crate::traits::{BitRead, BitSeek};

    #[test]
    fn test_read() {
        let frozen = FrozenBitBuffer::new(vec![0x0403_0201_u32, 0x0807_0605], Position::new(1, 8));
        assert_eq!(frozen.capacity(), 64);
        assert_eq!(WordSource::fetch(&frozen, 2), 0);
        let mut reader = BitReader::new(&frozen);
        assert_eq!(reader.available(), 40);
        assert_eq!(reader.read_bits(24), 0x03_0201);
        assert_eq!(reader.read_bits(16), 0x0504);
        assert_eq!(reader.index(), frozen.flushed_index());
        assert_eq!(reader.available(), 0);
    }
}
