//! Benchmark runner for the SGEMM kernel.

use log::info;
use sgemm::matrix::naive::sgemm_naive;
use sgemm::{NativeF32x4, PortableF32x4, Result, Transpose, sgemm_with};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== SGEMM Kernel Benchmark ===\n");

    let sizes = [128, 256, 512];
    let iterations = 3;
    let mut all_results = Vec::new();

    #[cfg(target_arch = "x86_64")]
    info!("native backend: SSE (__m128)");
    #[cfg(target_arch = "aarch64")]
    info!("native backend: NEON (float32x4_t)");
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    info!("native backend: portable (wide::f32x4)");

    for &size in &sizes {
        println!("Matrix: {}×{}", size, size);
        println!("{}", "-".repeat(50));

        let (m, n, k) = (size, size, size);
        let a: Vec<f32> = (0..m * k).map(|i| (i % 100) as f32 * 0.01).collect();
        let b: Vec<f32> = (0..k * n).map(|i| (i % 100) as f32 * 0.01).collect();

        let results: Vec<(&str, (f64, f64))> = vec![
            (
                "Naive (i-j-k)",
                bench_fn(m, n, k, iterations, |c| {
                    sgemm_naive(&a, &b, c, m, n, k, k, n, n, 1.0, true);
                    Ok(())
                })?,
            ),
            (
                "Packed portable",
                bench_fn(m, n, k, iterations, |c| {
                    sgemm_with::<PortableF32x4>(
                        Transpose::NoTrans,
                        m,
                        n,
                        k,
                        1.0,
                        &a,
                        k,
                        &b,
                        n,
                        c,
                        n,
                        true,
                    )
                })?,
            ),
            (
                "Packed native",
                bench_fn(m, n, k, iterations, |c| {
                    sgemm_with::<NativeF32x4>(
                        Transpose::NoTrans,
                        m,
                        n,
                        k,
                        1.0,
                        &a,
                        k,
                        &b,
                        n,
                        c,
                        n,
                        true,
                    )
                })?,
            ),
            (
                "Packed native Bᵀ",
                bench_fn(m, n, k, iterations, |c| {
                    sgemm_with::<NativeF32x4>(
                        Transpose::Trans,
                        m,
                        n,
                        k,
                        1.0,
                        &a,
                        k,
                        &b,
                        k,
                        c,
                        n,
                        true,
                    )
                })?,
            ),
        ];

        // Print results
        let baseline_time = results[0].1.0;
        for (i, (name, (time_ms, gflops))) in results.iter().enumerate() {
            let speedup = baseline_time / time_ms;
            println!(
                "{}. {:18} {:8.2} ms  {:6.2} GFLOPS  ({:.1}×)",
                i + 1,
                name,
                time_ms,
                gflops,
                speedup
            );
        }
        println!();

        all_results.push((size, results));
    }

    print_summary_table(&sizes, &all_results);
    Ok(())
}

/// Time `f` over `iterations` runs after one warmup; returns (ms, GFLOPS).
fn bench_fn<F>(m: usize, n: usize, k: usize, iterations: usize, f: F) -> Result<(f64, f64)>
where
    F: Fn(&mut [f32]) -> Result<()>,
{
    // Warmup
    let mut c = vec![0.0f32; m * n];
    f(&mut c)?;

    // Timed runs
    let mut total = 0.0;
    for _ in 0..iterations {
        let mut c = vec![0.0f32; m * n];
        let start = Instant::now();
        f(&mut c)?;
        total += start.elapsed().as_secs_f64();
    }

    let avg = total / iterations as f64;
    let gflops = 2.0 * (m * n * k) as f64 / avg / 1e9;
    Ok((avg * 1000.0, gflops))
}

#[allow(clippy::type_complexity)]
fn print_summary_table(sizes: &[usize], all_results: &[(usize, Vec<(&str, (f64, f64))>)]) {
    println!("\n{}", "=".repeat(90));
    println!("SUMMARY");
    println!("{}", "=".repeat(90));

    print!("\n{:<20}", "Method");
    for size in sizes {
        print!(" {:>14}", format!("{}×{}", size, size));
    }
    println!(" {:>12}", "Speedup");
    println!("{}", "-".repeat(90));

    let num_methods = all_results[0].1.len();

    for method_idx in 0..num_methods {
        let method_name = all_results[0].1[method_idx].0;

        let mut speedups = Vec::new();
        print!("{:<20}", method_name);

        for (_, results) in all_results {
            let (time_ms, gflops) = results[method_idx].1;
            let baseline_time = results[0].1.0;
            print!(" {:>11.2} GF", gflops);
            speedups.push(baseline_time / time_ms);
        }

        let avg_speedup: f64 = speedups.iter().sum::<f64>() / speedups.len() as f64;
        println!(" {:>11.1}×", avg_speedup);
    }

    println!("{}", "=".repeat(90));
    println!("\nGF = GFLOPS (billion floating point operations per second)");
    println!("Speedup relative to Naive (i-j-k). Higher is better.\n");
}
