//! Benchmark runner for the int8 MK4 GEMM.

use mk4dot::blocked::gemm_mk4::gemm_mk4;
use mk4dot::matrix::mk4::{a_to_mk4, b_to_mk4, c_from_mk4};
use mk4dot::matrix::naive::matmul_naive_i8;
use mk4dot::{GemmConfig, simd_level};
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Int8 MK4 Dot-Product GEMM Benchmark ===\n");

    let sizes = [128, 256, 512];
    let iterations = 3;
    let mut all_results = Vec::new();

    log::info!("SIMD level: {:?}", simd_level());

    for &size in &sizes {
        println!("Matrix: {}×{}", size, size);
        println!("{}", "-".repeat(50));

        let (m, n, k) = (size, size, size);
        let a: Vec<i8> = (0..m * k).map(|i| (i % 255) as i8).collect();
        let b: Vec<i8> = (0..k * n).map(|i| (i % 127) as i8 - 63).collect();
        let a_mk4 = a_to_mk4(&a, m, k);
        let b_mk4 = b_to_mk4(&b, k, n);

        let mut c_ref = vec![0i32; m * n];
        matmul_naive_i8(&a, &b, &mut c_ref, m, n, k);

        let mut results: Vec<(&str, (f64, f64))> = vec![(
            "Naive (i-k-j)",
            bench_fn(m, n, k, iterations, |c| matmul_naive_i8(&a, &b, c, m, n, k)),
        )];

        for (name, kc) in [("MK4 kc=64", 64), ("MK4 kc=256", 256)] {
            let cfg = GemmConfig::default().with_kc(kc);
            let mut c_mk4 = vec![0i32; m * n];
            gemm_mk4(&a_mk4, &b_mk4, &mut c_mk4, m, n, k, &cfg).expect("valid shapes");
            assert_eq!(c_from_mk4(&c_mk4, m, n), c_ref, "{} disagrees with naive", name);

            results.push((
                name,
                bench_fn(m, n, k, iterations, |c| {
                    gemm_mk4(&a_mk4, &b_mk4, c, m, n, k, &cfg).expect("valid shapes")
                }),
            ));
        }

        let baseline_time = results[0].1.0;
        for (i, (name, (time_ms, gops))) in results.iter().enumerate() {
            let speedup = baseline_time / time_ms;
            println!(
                "{}. {:16} {:8.2} ms  {:6.2} GOPS  ({:.1}×)",
                i + 1,
                name,
                time_ms,
                gops,
                speedup
            );
        }
        println!();

        all_results.push((size, results));
    }

    print_summary_table(&all_results);
}

/// Times `f` writing into a fresh m×n int32 buffer, after one warmup run.
fn bench_fn<F>(m: usize, n: usize, k: usize, iterations: usize, mut f: F) -> (f64, f64)
where
    F: FnMut(&mut [i32]),
{
    let mut c = vec![0i32; m * n];
    f(&mut c);

    let mut total = 0.0;
    for _ in 0..iterations {
        let mut c = vec![0i32; m * n];
        let start = Instant::now();
        f(&mut c);
        total += start.elapsed().as_secs_f64();
    }

    let avg = total / iterations as f64;
    let gops = 2.0 * (m * n * k) as f64 / avg / 1e9;
    (avg * 1000.0, gops)
}

#[allow(clippy::type_complexity)]
fn print_summary_table(all_results: &[(usize, Vec<(&str, (f64, f64))>)]) {
    println!("\n{}", "=".repeat(70));
    println!("SUMMARY (ms)");
    println!("{}", "=".repeat(70));

    print!("\n{:<18}", "Method");
    for (size, _) in all_results {
        print!(" {:>12}", format!("{}×{}", size, size));
    }
    println!();
    println!("{}", "-".repeat(70));

    let num_methods = all_results[0].1.len();
    for method in 0..num_methods {
        print!("{:<18}", all_results[0].1[method].0);
        for (_, results) in all_results {
            print!(" {:>12.2}", results[method].1.0);
        }
        println!();
    }
}
