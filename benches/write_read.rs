/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use bitbuffer::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const VALUES: usize = 1 << 16;

/// Random (value, width) pairs with widths in 1..=64.
fn gen_data() -> Vec<(u64, usize)> {
    let mut r = SmallRng::seed_from_u64(0);
    (0..VALUES)
        .map(|_| {
            let n = r.gen_range(1..=64);
            (lower_bits(r.r#gen::<u64>(), n), n)
        })
        .collect()
}

fn bench_word<W: Word>(c: &mut Criterion, data: &[(u64, usize)]) {
    let bits: u64 = data.iter().map(|&(_, n)| n as u64).sum();
    let buffer = BitBuffer::<W>::with_capacity(bits);

    let mut group = c.benchmark_group("bit_buffer");
    group.throughput(Throughput::Elements(data.len() as u64));

    group.bench_function(BenchmarkId::new("write_bits", W::BITS), |b| {
        b.iter(|| {
            let mut writer = BitWriter::new(&buffer);
            for &(value, n) in data {
                writer.write_bits(black_box(value), n);
            }
            writer.flush()
        })
    });

    group.bench_function(BenchmarkId::new("read_bits", W::BITS), |b| {
        b.iter(|| {
            let mut reader = BitReader::new(&buffer);
            let mut sum = 0_u64;
            for &(_, n) in data {
                sum = sum.wrapping_add(reader.read_bits(black_box(n)));
            }
            sum
        })
    });

    group.bench_function(BenchmarkId::new("write_compact", W::BITS), |b| {
        b.iter(|| {
            let mut writer = BitWriter::new(&buffer);
            for &(value, _) in data.iter().take(data.len() / 2) {
                writer.write_compact(black_box(value as u32));
            }
            writer.flush()
        })
    });

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let data = gen_data();
    bench_word::<u32>(c, &data);
    bench_word::<u64>(c, &data);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
