/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::cell::Cell;

use crate::impls::{BitBuffer, Position};
use crate::traits::*;
use crate::utils::{lower_bits, lower_mask};

/// An implementation of [`BitWrite`] and [`BitSeek`] on a [`BitBuffer`].
///
/// The writer stores bits directly in the words of the buffer, starting from
/// the least significant bit of each word. Bits above the last written bit
/// of the current word are cleared by each write, and again by
/// [`flush`](BitWriter::flush), which also publishes the current position to
/// the buffer (see [`BitBuffer::flushed_index`]) so that readers know how far
/// the data goes.
///
/// A writer starts flushed; any write makes it unflushed until the next
/// flush. Dropping the writer flushes it.
///
/// Writing beyond the capacity of the buffer is detected by a debug
/// assertion, and by a bounds check on the storage otherwise.
#[derive(Debug)]
pub struct BitWriter<'a, W: Word, S: WordStorage<W> = Vec<Cell<W>>> {
    buffer: &'a BitBuffer<W, S>,
    /// The position of the next bit to write.
    index: Position<W>,
    /// The position at the last flush.
    flushed: Position<W>,
}

impl<'a, W: Word, S: WordStorage<W>> BitWriter<'a, W, S> {
    /// Create a writer at the start of `buffer`.
    pub fn new(buffer: &'a BitBuffer<W, S>) -> Self {
        Self::at(buffer, Position::ZERO)
    }

    /// Create a writer at `index`.
    ///
    /// # Panics
    /// In debug builds, if critical sections are enabled on `buffer` and
    /// another writer on it is alive.
    pub fn at(buffer: &'a BitBuffer<W, S>, index: Position<W>) -> Self {
        debug_assert!(
            index.bit_pos() <= buffer.capacity(),
            "Position {} is beyond the capacity of {} bits",
            index,
            buffer.capacity()
        );
        buffer.enter_writer();
        tracing::trace!(%index, "binding writer");
        Self {
            buffer,
            index,
            flushed: index,
        }
    }

    /// The buffer this writer writes to.
    #[inline]
    pub fn buffer(&self) -> &'a BitBuffer<W, S> {
        self.buffer
    }

    /// Clear the unwritten bits of the current word and publish the current
    /// position to the buffer. Return the current position.
    ///
    /// At a word boundary the whole following word is cleared, unless the
    /// buffer ends there.
    pub fn flush(&mut self) -> Position<W> {
        if let Some(cell) = self.buffer.cells().get(self.index.word()) {
            cell.set(W::from_u64(
                cell.get().as_() & lower_mask(self.index.bit()),
            ));
        }
        self.flushed = self.index;
        self.buffer.publish_flushed(self.index);
        self.index
    }

    /// Whether no bit has been written since the last flush.
    #[inline]
    pub fn is_flushed(&self) -> bool {
        self.index == self.flushed
    }

    /// Move to the start of the buffer. Memory is not cleared.
    #[inline]
    pub fn reset(&mut self) {
        self.reset_to(Position::ZERO);
    }

    /// Move to `index`. Memory is not cleared.
    pub fn reset_to(&mut self, index: Position<W>) {
        debug_assert!(index.bit_pos() <= self.buffer.capacity());
        tracing::trace!(from = %self.index, to = %index, "moving writer");
        self.index = index;
    }
}

impl<W: Word, S: WordStorage<W>> BitWrite for BitWriter<'_, W, S> {
    #[inline]
    fn write_bits(&mut self, value: u64, n: usize) -> usize {
        debug_assert!(n <= 64, "Cannot write {} bits at once", n);
        #[cfg(feature = "checks")]
        assert!(
            value & !lower_mask(n) == 0,
            "Value {} does not fit in {} bits",
            value,
            n
        );
        if n == 0 {
            return 0;
        }
        debug_assert!(
            n as u64 <= self.remaining_size(),
            "Cannot write {} bits at {}: capacity is {} bits",
            n,
            self.index,
            self.buffer.capacity()
        );

        let value = lower_bits(value, n);
        let cells = self.buffer.cells();
        let bit = self.index.bit();
        let mut word = self.index.word();

        let cell = &cells[word];
        cell.set(W::from_u64(
            (cell.get().as_() & lower_mask(bit)) | (value << bit),
        ));
        // Bits of value stored so far
        let mut written = W::BITS - bit;
        while written < n {
            word += 1;
            cells[word].set(W::from_u64(value >> written));
            written += W::BITS;
        }

        let end = bit + n;
        self.index = Position::new(self.index.word() + end / W::BITS, end % W::BITS);
        n
    }
}

impl<W: Word, S: WordStorage<W>> BitSeek<W> for BitWriter<'_, W, S> {
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

impl<W: Word, S: WordStorage<W>> Drop for BitWriter<'_, W, S> {
    fn drop(&mut self) {
        self.flush();
        self.buffer.exit_writer();
    }
}
