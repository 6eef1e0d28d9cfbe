/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use thiserror::Error;

/// Errors of the structural operations of a
/// [`BitBuffer`](crate::impls::BitBuffer).
///
/// Bit reads and writes never return errors: misuse is caught by debug
/// assertions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitBufferError {
    /// A fixed-size storage was asked for more bits than it holds.
    #[error("Cannot provide {required} bits: the storage is fixed at {capacity} bits")]
    CapacityExceeded { required: u64, capacity: u64 },
    /// Serialized data whose length is not a multiple of the word size.
    #[error("Data length {len} is not a multiple of the word size ({word_bytes} bytes)")]
    UnalignedLength { len: usize, word_bytes: usize },
}
