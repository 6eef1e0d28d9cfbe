/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::impls::Position;
use crate::traits::{Integral, Word};
use crate::utils::{bytes_needed, lower_bits};

/// Number of bits of the byte-count prefix used by
/// [`BitWrite::write_compact`] for a type of the given width.
#[inline(always)]
const fn compact_prefix_bits(bits: usize) -> usize {
    // 16 -> 1, 32 -> 2, 64 -> 3
    (bits / 8).trailing_zeros() as usize
}

/// Sequential bit-by-bit writes.
///
/// The only required method is [`write_bits`](BitWrite::write_bits); the
/// typed methods mask their argument and delegate to it. Bits are laid out
/// starting from the least significant bit of each storage word.
pub trait BitWrite {
    /// Write the lowest `n` bits of `value` and return the number of bits
    /// written, that is, `n`.
    ///
    /// `n` must be at most 64. Bits of `value` above `n` are ignored; if the
    /// feature `checks` is enabled, implementations panic if they are not
    /// zero.
    fn write_bits(&mut self, value: u64, n: usize) -> usize;

    /// Write `value` using the natural width of its type.
    #[inline]
    fn write<T: Integral>(&mut self, value: T) -> usize {
        self.write_bits(value.to_bits(), T::BITS)
    }

    /// Write the lowest `N` bits of `value`.
    ///
    /// If `N` exceeds the width of `T`, the bit pattern of `value` is
    /// zero-extended.
    #[inline]
    fn write_fixed<const N: usize, T: Integral>(&mut self, value: T) -> usize {
        const { assert!(N <= 64, "at most 64 bits can be written at once") };
        self.write_bits(lower_bits(value.to_bits(), N), N)
    }

    /// Write the lowest `n` bits of `value`, where `n` is known only at run
    /// time.
    #[inline]
    fn write_width<T: Integral>(&mut self, n: usize, value: T) -> usize {
        self.write_bits(lower_bits(value.to_bits(), n), n)
    }

    /// Write `value` using a variable-length encoding that favors small
    /// values, and return the number of bits written.
    ///
    /// - `bool` values use one bit.
    /// - 8-bit values below 8 are written as a `0` flag followed by three
    ///   bits; other 8-bit values as a `1` flag followed by eight bits.
    /// - 16-, 32- and 64-bit values are written as the number of bytes needed
    ///   minus one (in one, two and three bits, respectively) followed by
    ///   that many bytes.
    ///
    /// Signed values are zig-zag coded first (see
    /// [`Integral::to_zigzag`]), so that small negative values remain short.
    fn write_compact<T: Integral>(&mut self, value: T) -> usize {
        let value = value.to_zigzag();
        match T::BITS {
            1 => self.write_bits(value, 1),
            8 => {
                if value < 8 {
                    self.write_bits(value << 1, 4)
                } else {
                    self.write_bits((value << 1) | 1, 9)
                }
            }
            bits => {
                let bytes = bytes_needed(value);
                self.write_bits(bytes as u64 - 1, compact_prefix_bits(bits))
                    + self.write_bits(value, bytes * 8)
            }
        }
    }

    /// Copy `n` bits from `bit_read` into this stream.
    fn copy_from<R: BitRead>(&mut self, bit_read: &mut R, mut n: u64) {
        while n > 0 {
            let chunk = n.min(64) as usize;
            self.write_bits(bit_read.read_bits(chunk), chunk);
            n -= chunk as u64;
        }
    }
}

/// Sequential bit-by-bit reads, mirroring [`BitWrite`] one-for-one.
///
/// Reading a different width or type than the one written is not detected:
/// the stream carries no type information.
pub trait BitRead {
    /// Read `n` bits and return them in the lowest bits of the result.
    ///
    /// `n` must be at most 64.
    fn read_bits(&mut self, n: usize) -> u64;

    /// Read a value written with [`BitWrite::write`].
    #[inline]
    fn read<T: Integral>(&mut self) -> T {
        T::from_bits(self.read_bits(T::BITS))
    }

    /// Read a value written with [`BitWrite::write_fixed`].
    ///
    /// No sign extension takes place: if `N` is smaller than the width of a
    /// signed `T`, the result is the zero-extended pattern.
    #[inline]
    fn read_fixed<const N: usize, T: Integral>(&mut self) -> T {
        const { assert!(N <= 64, "at most 64 bits can be read at once") };
        T::from_bits(self.read_bits(N))
    }

    /// Read a value written with [`BitWrite::write_width`].
    #[inline]
    fn read_width<T: Integral>(&mut self, n: usize) -> T {
        T::from_bits(self.read_bits(n))
    }

    /// Read a value written with [`BitWrite::write_compact`].
    fn read_compact<T: Integral>(&mut self) -> T {
        let value = match T::BITS {
            1 => self.read_bits(1),
            8 => {
                if self.read_bits(1) == 0 {
                    self.read_bits(3)
                } else {
                    self.read_bits(8)
                }
            }
            bits => {
                let bytes = self.read_bits(compact_prefix_bits(bits)) as usize + 1;
                self.read_bits(bytes * 8)
            }
        };
        T::from_zigzag(value)
    }

    /// Copy `n` bits from this stream into `bit_write`.
    fn copy_to<W: BitWrite>(&mut self, bit_write: &mut W, mut n: u64) {
        while n > 0 {
            let chunk = n.min(64) as usize;
            bit_write.write_bits(self.read_bits(chunk), chunk);
            n -= chunk as u64;
        }
    }
}

/// Position queries shared by readers and writers.
pub trait BitSeek<W: Word> {
    /// The position of the next bit to read or write.
    fn index(&self) -> Position<W>;

    /// Move to `index`.
    fn set_index(&mut self, index: Position<W>);

    /// The capacity in bits of the underlying buffer.
    fn capacity(&self) -> u64;

    /// The number of bits before the current position.
    #[inline]
    fn usage(&self) -> u64 {
        self.index().bit_pos()
    }

    /// The number of bits between the current position and the end of the
    /// buffer. `usage() + remaining_size()` is always the capacity.
    #[inline]
    fn remaining_size(&self) -> u64 {
        self.capacity() - self.usage()
    }
}
