/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Bit buffers and the cursors reading and writing them.

A [`BitBuffer`] holds the words; a [`BitWriter`] and any number of
[`BitReader`]s borrow it and move independently, each tracking its own
[`Position`]. The storage of the buffer is selected by a type parameter: a
[`Vec`] by default, or an array or a borrowed slice (see
[`WordStorage`](crate::traits::WordStorage)).

Writers publish their position when they are flushed; readers see data
written in their current word after [`BitReader::sync`], and can ask how many
flushed bits are left with [`BitReader::available`].

A [`BitBuffer`] is not [`Sync`]. When writing is over, it can be turned into
a [`FrozenBitBuffer`], which readers on several threads can share.

*/

mod position;
pub use position::Position;

mod bit_buffer;
pub use bit_buffer::{BitBuffer, BitBufferConfig};

mod frozen_bit_buffer;
pub use frozen_bit_buffer::FrozenBitBuffer;

mod bit_writer;
pub use bit_writer::BitWriter;

mod bit_reader;
pub use bit_reader::BitReader;
