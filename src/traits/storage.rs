/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::cell::Cell;

use crate::error::BitBufferError;
use crate::impls::Position;
use crate::traits::Word;

/// The backing store of a [`BitBuffer`](crate::impls::BitBuffer).
///
/// Words are [`Cell`]s so that a writer and any number of readers can share
/// the buffer by reference within a thread. Implementations are provided for
/// a growable [`Vec`], for a fixed-size array (local storage) and for a
/// borrowed slice of cells, which can be obtained from a `&mut [W]` with
/// [`Cell::from_mut`].
pub trait WordStorage<W: Word>: AsRef<[Cell<W>]> {
    /// Make room for at least `words` words.
    ///
    /// Storages that cannot grow return
    /// [`BitBufferError::CapacityExceeded`] if they are too small.
    fn reserve_words(&mut self, words: usize) -> Result<(), BitBufferError>;
}

#[inline]
fn check_fixed<W: Word>(len: usize, words: usize) -> Result<(), BitBufferError> {
    if words > len {
        return Err(BitBufferError::CapacityExceeded {
            required: (words * W::BITS) as u64,
            capacity: (len * W::BITS) as u64,
        });
    }
    Ok(())
}

impl<W: Word> WordStorage<W> for Vec<Cell<W>> {
    fn reserve_words(&mut self, words: usize) -> Result<(), BitBufferError> {
        if words > self.len() {
            let new_len = words.max(self.len() * 2);
            tracing::debug!(from = self.len(), to = new_len, "growing bit buffer storage");
            self.resize_with(new_len, || Cell::new(W::zero()));
        }
        Ok(())
    }
}

impl<W: Word, const N: usize> WordStorage<W> for [Cell<W>; N] {
    #[inline]
    fn reserve_words(&mut self, words: usize) -> Result<(), BitBufferError> {
        check_fixed::<W>(N, words)
    }
}

impl<W: Word> WordStorage<W> for Box<[Cell<W>]> {
    #[inline]
    fn reserve_words(&mut self, words: usize) -> Result<(), BitBufferError> {
        check_fixed::<W>(self.len(), words)
    }
}

impl<W: Word> WordStorage<W> for &[Cell<W>] {
    #[inline]
    fn reserve_words(&mut self, words: usize) -> Result<(), BitBufferError> {
        check_fixed::<W>(self.len(), words)
    }
}

/// Read access to the words of a buffer.
///
/// This is what a [`BitReader`](crate::impls::BitReader) needs from the
/// buffer it reads. It is implemented by
/// [`BitBuffer`](crate::impls::BitBuffer), whose words may change under the
/// reader, and by [`FrozenBitBuffer`](crate::impls::FrozenBitBuffer), which
/// is immutable and can be read from several threads at once.
pub trait WordSource {
    type Word: Word;

    /// The number of words.
    fn word_count(&self) -> usize;

    /// The word at index `word` as a `u64`, or zero past the last word.
    fn fetch(&self, word: usize) -> u64;

    /// The end of the data written so far.
    fn flushed_index(&self) -> Position<Self::Word>;

    /// The number of bits the source can hold.
    #[inline(always)]
    fn capacity(&self) -> u64 {
        self.word_count() as u64 * <Self::Word as Word>::BITS as u64
    }
}
