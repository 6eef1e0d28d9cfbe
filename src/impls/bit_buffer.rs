/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::cell::Cell;

use crate::error::BitBufferError;
use crate::impls::{FrozenBitBuffer, Position};
use crate::traits::{Word, WordSource, WordStorage};
use crate::utils::{lower_mask, significant_bits};
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// Run-time options of a [`BitBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct BitBufferConfig {
    /// Panic if a second [`BitWriter`](crate::impls::BitWriter) is bound to
    /// the buffer while another one is alive. Only effective in debug builds.
    pub critical_sections: bool,
}

impl Default for BitBufferConfig {
    fn default() -> Self {
        Self {
            critical_sections: cfg!(debug_assertions),
        }
    }
}

/// A buffer of bits stored in words of type `W`.
///
/// The buffer does not move any cursor by itself: bits are written by a
/// [`BitWriter`](crate::impls::BitWriter) and read by a
/// [`BitReader`](crate::impls::BitReader), both borrowing the buffer. Words
/// are held in [`Cell`]s, so a writer and several readers can be alive at the
/// same time within a thread. A buffer can be sent to another thread, but it
/// is not [`Sync`]: to share it while writing, wrap it in a
/// [`Mutex`](std::sync::Mutex). Once writing is done,
/// [`into_frozen`](BitBuffer::into_frozen) (or [`freeze`](BitBuffer::freeze))
/// gives a [`FrozenBitBuffer`] that any number of threads can read at once.
///
/// The storage `S` is a [`Vec`] by default (see
/// [`with_capacity`](BitBuffer::with_capacity)); it can also be an array
/// ([`new`](BitBuffer::new)) or a borrowed slice
/// ([`from_words`](BitBuffer::from_words)). The capacity in bits is always a
/// multiple of `W::BITS`.
///
/// Bits are stored starting from the least significant bit of each word.
///
/// # Examples
/// ```
/// use bitbuffer::prelude::*;
///
/// let buffer = BitBuffer::<u32>::with_capacity(100);
/// assert_eq!(buffer.capacity(), 128);
///
/// let mut writer = BitWriter::new(&buffer);
/// writer.write(true);
/// writer.write_fixed::<35, u64>(0x4_0000_0001);
/// let end = writer.flush();
///
/// let mut reader = BitReader::new(&buffer);
/// assert!(reader.read::<bool>());
/// assert_eq!(reader.read_fixed::<35, u64>(), 0x4_0000_0001);
/// assert_eq!(reader.index(), end);
/// ```
#[derive(Debug)]
pub struct BitBuffer<W: Word, S: WordStorage<W> = Vec<Cell<W>>> {
    storage: S,
    /// The position published by the last [`flush`](crate::impls::BitWriter::flush).
    flushed: Cell<Position<W>>,
    config: BitBufferConfig,
    /// Number of live writers.
    #[cfg(debug_assertions)]
    writers: Cell<usize>,
}

impl<W: Word> BitBuffer<W> {
    /// Create a zeroed heap buffer holding at least `bits` bits.
    pub fn with_capacity(bits: u64) -> Self {
        let words = bits.div_ceil(W::BITS as u64) as usize;
        Self::from_storage((0..words).map(|_| Cell::new(W::zero())).collect())
    }

    /// Deserialize a heap buffer from the little-endian bytes produced by
    /// [`to_le_bytes`](BitBuffer::to_le_bytes).
    ///
    /// The whole content is considered flushed.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, BitBufferError> {
        if bytes.len() % W::BYTES != 0 {
            return Err(BitBufferError::UnalignedLength {
                len: bytes.len(),
                word_bytes: W::BYTES,
            });
        }
        let buffer = Self::from_storage(
            bytes
                .chunks_exact(W::BYTES)
                .map(|chunk| Cell::new(W::from_le_slice(chunk)))
                .collect(),
        );
        buffer
            .flushed
            .set(Position::new(buffer.word_count(), 0));
        Ok(buffer)
    }

    /// Turn the buffer into an immutable one, keeping the words and the
    /// flushed position, without copying.
    pub fn into_frozen(self) -> FrozenBitBuffer<W> {
        let flushed = self.flushed.get();
        tracing::debug!(words = self.storage.len(), %flushed, "freezing bit buffer");
        FrozenBitBuffer::new(
            self.storage
                .into_iter()
                .map(Cell::into_inner)
                .collect::<Vec<_>>(),
            flushed,
        )
    }
}

impl<W: Word, const N: usize> BitBuffer<W, [Cell<W>; N]> {
    /// Create a zeroed buffer of `N` words stored inline.
    pub fn new() -> Self {
        Self::from_storage(core::array::from_fn(|_| Cell::new(W::zero())))
    }
}

impl<W: Word, const N: usize> Default for BitBuffer<W, [Cell<W>; N]> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, W: Word> BitBuffer<W, &'a [Cell<W>]> {
    /// Create a buffer over borrowed memory.
    ///
    /// The content of `words` is left untouched, so existing data can be
    /// read back.
    pub fn from_words(words: &'a mut [W]) -> Self {
        Self::from_storage(Cell::from_mut(words).as_slice_of_cells())
    }
}

impl<W: Word, S: WordStorage<W>> BitBuffer<W, S> {
    /// Create a buffer over the given storage, with the default
    /// configuration.
    pub fn from_storage(storage: S) -> Self {
        Self {
            storage,
            flushed: Cell::new(Position::ZERO),
            config: BitBufferConfig::default(),
            #[cfg(debug_assertions)]
            writers: Cell::new(0),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: BitBufferConfig) -> Self {
        self.config = config;
        self
    }

    /// The current configuration.
    #[inline]
    pub fn config(&self) -> BitBufferConfig {
        self.config
    }

    /// Enable or disable the detection of concurrent writers.
    pub fn set_critical_sections(&mut self, on: bool) {
        self.config.critical_sections = on;
    }

    #[inline(always)]
    pub(crate) fn cells(&self) -> &[Cell<W>] {
        self.storage.as_ref()
    }

    /// The number of storage words.
    #[inline(always)]
    pub fn word_count(&self) -> usize {
        self.cells().len()
    }

    /// The number of bits the buffer can hold.
    #[inline(always)]
    pub fn capacity(&self) -> u64 {
        self.word_count() as u64 * W::BITS as u64
    }

    /// The number of bits from `index` to the end of the buffer.
    #[inline]
    pub fn remaining_size(&self, index: Position<W>) -> u64 {
        debug_assert!(
            index.bit_pos() <= self.capacity(),
            "Position {} is beyond the capacity of {} bits",
            index,
            self.capacity()
        );
        self.capacity() - index.bit_pos()
    }

    /// The word containing the bit at `index`.
    #[inline]
    pub fn word(&self, index: Position<W>) -> W {
        debug_assert!(
            index.word() < self.word_count(),
            "Word {} out of range ({} words)",
            index.word(),
            self.word_count()
        );
        self.cells()[index.word()].get()
    }

    /// Overwrite the word containing the bit at `index`.
    #[inline]
    pub fn set_word(&self, index: Position<W>, word: W) {
        debug_assert!(
            index.word() < self.word_count(),
            "Word {} out of range ({} words)",
            index.word(),
            self.word_count()
        );
        self.cells()[index.word()].set(word);
    }

    /// An iterator over the current content of the storage words.
    pub fn words(&self) -> impl Iterator<Item = W> + '_ {
        self.cells().iter().map(Cell::get)
    }

    /// The position published by the last writer flush.
    #[inline]
    pub fn flushed_index(&self) -> Position<W> {
        self.flushed.get()
    }

    #[inline]
    pub(crate) fn publish_flushed(&self, index: Position<W>) {
        self.flushed.set(index);
    }

    /// Mark the end of the data at `index`, padding to the next word.
    ///
    /// The bits of the word below `index` are kept, a marker bit is set at
    /// `index` and the bits above it are cleared. The returned position is
    /// the first bit of the following word, which is always greater than
    /// `index`; passing it to [`unterminate`](BitBuffer::unterminate)
    /// recovers `index`.
    ///
    /// The marker needs one bit past `index`: a buffer that is full up to
    /// `index` must first be grown with
    /// [`ensure_capacity(1, index)`](BitBuffer::ensure_capacity).
    ///
    /// # Panics
    /// If there is no bit at `index`, that is, if `index` is at or beyond the
    /// end of the buffer.
    pub fn terminate(&self, index: Position<W>) -> Position<W> {
        assert!(
            index.word() < self.word_count(),
            "No room for the termination word at {} (capacity is {} bits)",
            index,
            self.capacity()
        );
        let cell = &self.cells()[index.word()];
        let kept = cell.get().as_() & lower_mask(index.bit());
        cell.set(W::from_u64(kept | (1 << index.bit())));
        tracing::trace!(%index, "terminated");
        Position::new(index.word() + 1, 0)
    }

    /// Undo [`terminate`](BitBuffer::terminate): find the marker bit in the
    /// word preceding `end`, clear it and return its position.
    ///
    /// # Panics
    /// If `end` is the first word of the buffer or lies beyond the buffer.
    pub fn unterminate(&self, end: Position<W>) -> Position<W> {
        assert!(end.word() > 0, "No word precedes position {}", end);
        let cell = &self.cells()[end.word() - 1];
        let word = cell.get().as_();
        debug_assert!(word != 0, "No termination marker before position {}", end);
        let bit = significant_bits(word).saturating_sub(1);
        cell.set(W::from_u64(word & lower_mask(bit)));
        let index = Position::new(end.word() - 1, bit);
        tracing::trace!(%end, %index, "unterminated");
        index
    }

    /// Copy the words and the flushed position into an immutable buffer.
    pub fn freeze(&self) -> FrozenBitBuffer<W> {
        FrozenBitBuffer::new(self.words().collect::<Vec<_>>(), self.flushed.get())
    }

    /// Zero all words and the flushed position.
    ///
    /// This needs exclusive access, so no reader or writer can be alive.
    pub fn reset(&mut self) {
        tracing::debug!(words = self.word_count(), "resetting bit buffer");
        for cell in self.cells() {
            cell.set(W::zero());
        }
        self.flushed.set(Position::ZERO);
    }

    /// Make sure `bits_required` bits can be written starting at `index`.
    ///
    /// Heap buffers grow to the larger of the required size and twice the
    /// current size; the new words are zero. Other storages fail with
    /// [`BitBufferError::CapacityExceeded`] if they are too small.
    pub fn ensure_capacity(
        &mut self,
        bits_required: u64,
        index: Position<W>,
    ) -> Result<(), BitBufferError> {
        let end = index.bit_pos() + bits_required;
        if end <= self.capacity() {
            return Ok(());
        }
        self.storage
            .reserve_words(end.div_ceil(W::BITS as u64) as usize)
    }

    /// Serialize the words up to `end` in little-endian order, independently
    /// of the platform. The word containing a non-aligned `end` is included.
    pub fn to_le_bytes(&self, end: Position<W>) -> Vec<u8> {
        let words = end.word() + !end.is_aligned() as usize;
        debug_assert!(words <= self.word_count());
        let mut bytes = Vec::with_capacity(words * W::BYTES);
        for word in self.words().take(words) {
            word.extend_le_bytes(&mut bytes);
        }
        bytes
    }

    /// Register a new writer.
    #[inline]
    pub(crate) fn enter_writer(&self) {
        #[cfg(debug_assertions)]
        {
            let writers = self.writers.get();
            if self.config.critical_sections {
                assert!(
                    writers == 0,
                    "A writer is already bound to this buffer"
                );
            }
            self.writers.set(writers + 1);
        }
    }

    /// Unregister a writer.
    #[inline]
    pub(crate) fn exit_writer(&self) {
        #[cfg(debug_assertions)]
        self.writers.set(self.writers.get() - 1);
    }
}

impl<W: Word, S: WordStorage<W>> WordSource for BitBuffer<W, S> {
    type Word = W;

    #[inline(always)]
    fn word_count(&self) -> usize {
        self.cells().len()
    }

    #[inline(always)]
    fn fetch(&self, word: usize) -> u64 {
        self.cells().get(word).map_or(0, |cell| cell.get().as_())
    }

    #[inline(always)]
    fn flushed_index(&self) -> Position<W> {
        self.flushed.get()
    }
}
