//! Criterion benchmarks for the MK4 kernels and the blocked driver.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mk4dot::blocked::pack::{pack_a, pack_b, packed_a_size, packed_b_size};
use mk4dot::kernels::{kern_4x4, kern_4x6, kern_8x4, kern_8x6};
use mk4dot::{GemmConfig, gemm_mk4};

/// One tile of each kernel shape at a fixed depth.
fn bench_kernels(c: &mut Criterion) {
    let k = 256;
    let a: Vec<i8> = (0..8 * k).map(|i| (i % 251) as i8).collect();
    let b: Vec<i8> = (0..6 * k).map(|i| (i % 127) as i8 - 63).collect();

    let mut a_pack = vec![0i8; packed_a_size(8, k)];
    pack_a(&mut a_pack, &a, k * 4, 0, 8, 0, k);
    let mut b_pack6 = vec![0i8; packed_b_size(6, k)];
    pack_b(&mut b_pack6, &b, 6 * 4, 0, 6, 0, k);
    let mut b_pack4 = vec![0i8; packed_b_size(4, k)];
    pack_b(&mut b_pack4, &b[..4 * k], 4 * 4, 0, 4, 0, k);

    let mut group = c.benchmark_group("Kernels");
    let mut out = vec![0i32; 2 * 6 * 4];

    group.throughput(Throughput::Elements((8 * 6 * k) as u64));
    group.bench_function("8x6", |bench| {
        bench.iter(|| unsafe {
            kern_8x6(a_pack.as_ptr(), b_pack6.as_ptr(), k, out.as_mut_ptr(), 24, true);
            black_box(&out);
        })
    });

    group.throughput(Throughput::Elements((8 * 4 * k) as u64));
    group.bench_function("8x4", |bench| {
        bench.iter(|| unsafe {
            kern_8x4(a_pack.as_ptr(), b_pack4.as_ptr(), k, out.as_mut_ptr(), 24, true, 4);
            black_box(&out);
        })
    });

    group.throughput(Throughput::Elements((4 * 6 * k) as u64));
    group.bench_function("4x6", |bench| {
        bench.iter(|| unsafe {
            kern_4x6(a_pack.as_ptr(), b_pack6.as_ptr(), k, out.as_mut_ptr(), 24, true);
            black_box(&out);
        })
    });

    group.throughput(Throughput::Elements((4 * 4 * k) as u64));
    group.bench_function("4x4", |bench| {
        bench.iter(|| unsafe {
            kern_4x4(a_pack.as_ptr(), b_pack4.as_ptr(), k, out.as_mut_ptr(), 24, true, 4);
            black_box(&out);
        })
    });

    group.finish();
}

fn bench_gemm(c: &mut Criterion) {
    let mut group = c.benchmark_group("GEMM_MK4");
    group.sample_size(20);

    for size in [64, 128, 256, 512] {
        let a: Vec<i8> = (0..size * size).map(|i| (i % 255) as i8).collect();
        let b: Vec<i8> = (0..size * size).map(|i| (i % 127) as i8 - 63).collect();
        let mut out = vec![0i32; size * size];
        let cfg = GemmConfig::default();

        group.throughput(Throughput::Elements((2 * size * size * size) as u64));
        group.bench_with_input(BenchmarkId::new("square", size), &size, |bench, &s| {
            bench.iter(|| {
                gemm_mk4(&a, &b, &mut out, s, s, s, &cfg).unwrap();
                black_box(&out);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_kernels, bench_gemm);
criterion_main!(benches);
