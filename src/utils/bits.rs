/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// Return a mask with the lowest `n` bits set.
///
/// `n` must be at most 64; `lower_mask(64)` is `u64::MAX`.
#[inline(always)]
#[must_use]
pub const fn lower_mask(n: usize) -> u64 {
    debug_assert!(n <= 64);
    if n >= 64 { u64::MAX } else { (1_u64 << n) - 1 }
}

/// Keep only the lowest `n` bits of `value`.
///
/// This is the truncation applied by every fixed-width write:
/// ```
/// use bitbuffer::utils::lower_bits;
///
/// assert_eq!(lower_bits(0xAAAA_AAAA, 4), 0xA);
/// assert_eq!(lower_bits(0x5555_5555, 29), 0x1555_5555);
/// assert_eq!(lower_bits(u64::MAX, 64), u64::MAX);
/// assert_eq!(lower_bits(u64::MAX, 0), 0);
/// ```
#[inline(always)]
#[must_use]
pub const fn lower_bits(value: u64, n: usize) -> u64 {
    value & lower_mask(n)
}

/// Number of significant bits of `value` (zero for zero).
#[inline(always)]
#[must_use]
pub const fn significant_bits(value: u64) -> usize {
    (u64::BITS - value.leading_zeros()) as usize
}

/// Number of bytes needed to store `value`; at least one.
#[inline(always)]
#[must_use]
pub const fn bytes_needed(value: u64) -> usize {
    let bytes = significant_bits(value).div_ceil(8);
    if bytes == 0 { 1 } else { bytes }
}
