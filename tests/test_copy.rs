/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use bitbuffer::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn test() {
    test_words::<u32, u64>();
    test_words::<u64, u8>();
    test_words::<u16, u16>();
}

fn test_words<S: Word, T: Word>() {
    for len in (0..1000).step_by(7) {
        let source = BitBuffer::<S>::with_capacity(len);
        let mut write = BitWriter::new(&source);

        let mut r = SmallRng::seed_from_u64(0);
        for _ in 0..len {
            write.write_bits(r.gen_range(0..2), 1);
        }
        write.flush();

        let mut read = BitReader::new(&source);
        let target = BitBuffer::<T>::with_capacity(len);
        let mut copy_write = BitWriter::new(&target);
        read.copy_to(&mut copy_write, len);
        assert_eq!(copy_write.usage(), len);
        copy_write.flush();

        let mut read = BitReader::new(&target);
        let mut r = SmallRng::seed_from_u64(0);
        for _ in 0..len {
            assert_eq!(read.read_bits(1), r.gen_range(0..2));
        }

        let copy = BitBuffer::<S>::with_capacity(len);
        let mut copy_write = BitWriter::new(&copy);
        read.reset();
        copy_write.copy_from(&mut read, len);
        copy_write.flush();
        assert_eq!(
            copy.words().collect::<Vec<_>>(),
            source.words().collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_unaligned() {
    let source = BitBuffer::<u64>::with_capacity(1024);
    let mut write = BitWriter::new(&source);
    let mut r = SmallRng::seed_from_u64(1);
    let values: Vec<u64> = (0..15).map(|_| r.r#gen()).collect();
    write.write_bits(0b101, 3);
    for &value in &values {
        write.write_bits(value, 64);
    }
    write.flush();

    // Copy starting at an odd position to an odd position
    let target = BitBuffer::<u32>::with_capacity(1024);
    let mut read = BitReader::at(&source, Position::new(0, 3));
    let mut copy_write = BitWriter::at(&target, Position::new(0, 5));
    read.copy_to(&mut copy_write, 15 * 64);
    copy_write.flush();

    let mut read = BitReader::at(&target, Position::new(0, 5));
    for &value in &values {
        assert_eq!(read.read_bits(64), value);
    }
}
