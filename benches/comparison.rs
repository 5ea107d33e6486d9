//! Benchmark comparison between `BitSet` and bitvec

use bitvec::prelude::*;
use core::hint::black_box;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use signed_bitset::BitSet;

const SIZES: &[usize] = &[100, 1000, 10_000, 100_000];

fn bench_set_bit(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_bit");

    for &size in SIZES {
        let indices: Vec<usize> = (0..size).step_by(10).collect();
        group.throughput(Throughput::Elements(indices.len() as u64));

        // BitSet grows on demand; BitVec must be sized up front.
        group.bench_with_input(BenchmarkId::new("BitSet", size), &indices, |b, indices| {
            b.iter(|| {
                let mut bits = BitSet::new();
                for &i in indices {
                    bits.insert(i);
                }
                black_box(&bits);
            });
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &indices, |b, indices| {
            b.iter(|| {
                let mut bv = BitVec::<u64, Lsb0>::repeat(false, size);
                for &i in indices {
                    bv.set(i, true);
                }
                black_box(&bv);
            });
        });
    }

    group.finish();
}

fn bench_get_bit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_bit");

    for &size in SIZES {
        group.throughput(Throughput::Elements(1000));

        let mut bits = BitSet::new();
        let mut bv = BitVec::<u64, Lsb0>::repeat(false, size);
        for i in (0..size).step_by(3) {
            bits.insert(i);
            bv.set(i, true);
        }

        let probes: Vec<usize> = (0..1000).map(|i| (i * 7919) % size).collect();

        group.bench_with_input(
            BenchmarkId::new("BitSet", size),
            &(&bits, &probes),
            |b, (bits, probes)| {
                b.iter(|| probes.iter().filter(|&&i| bits.get(i)).count());
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BitVec", size),
            &(&bv, &probes),
            |b, (bv, probes)| {
                b.iter(|| probes.iter().filter(|&&i| bv[i]).count());
            },
        );
    }

    group.finish();
}

fn bench_bitwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitwise_and");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let a: BitSet = (0..size).step_by(2).collect();
        let b: BitSet = (0..size).step_by(3).collect();
        let mut av = BitVec::<u64, Lsb0>::repeat(false, size);
        let mut bvv = BitVec::<u64, Lsb0>::repeat(false, size);
        for i in (0..size).step_by(2) {
            av.set(i, true);
        }
        for i in (0..size).step_by(3) {
            bvv.set(i, true);
        }

        group.bench_with_input(BenchmarkId::new("BitSet", size), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.and(b)));
        });

        group.bench_with_input(
            BenchmarkId::new("BitVec", size),
            &(&av, &bvv),
            |bench, (a, b)| {
                bench.iter(|| black_box((*a).clone() & b.as_bitslice()));
            },
        );
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for &size in SIZES {
        let mut bits = BitSet::new();
        let mut bv = BitVec::<u64, Lsb0>::repeat(false, size);
        for i in (0..size).step_by(10) {
            bits.insert(i);
            bv.set(i, true);
        }

        group.throughput(Throughput::Elements((size / 10) as u64));

        group.bench_with_input(BenchmarkId::new("BitSet", size), &bits, |b, bits| {
            b.iter(|| black_box(bits.iter().sum::<usize>()));
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &bv, |b, bv| {
            b.iter(|| black_box(bv.iter_ones().sum::<usize>()));
        });
    }

    group.finish();
}

fn bench_count_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_ones");

    for &size in SIZES {
        let bits: BitSet = (0..size).step_by(2).collect();
        let mut bv = BitVec::<u64, Lsb0>::repeat(false, size);
        for i in (0..size).step_by(2) {
            bv.set(i, true);
        }

        group.bench_with_input(BenchmarkId::new("BitSet", size), &bits, |b, bits| {
            b.iter(|| black_box(bits.cardinality()));
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &bv, |b, bv| {
            b.iter(|| black_box(bv.count_ones()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_set_bit,
    bench_get_bit,
    bench_bitwise,
    bench_iteration,
    bench_count_ones,
);
criterion_main!(benches);
