use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sgemm::pack::{PACK_TILE_ROWS, PACKED_TILE_LEN};
use sgemm::{
    NativeF32x4, PortableF32x4, Transpose, compute_row_tile, copy_pack_b, pack_transpose_tile,
    packed_len, sgemm_with,
};

fn bench_pack_tile(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_transpose_tile");
    let ldb = 64;
    let src: Vec<f32> = (0..PACK_TILE_ROWS * ldb).map(|i| i as f32).collect();
    let mut dst = vec![0.0f32; PACKED_TILE_LEN];

    group.throughput(Throughput::Elements(PACKED_TILE_LEN as u64));
    group.bench_function("native", |bench| {
        bench.iter(|| unsafe {
            pack_transpose_tile::<NativeF32x4>(dst.as_mut_ptr(), black_box(src.as_ptr()), ldb)
        });
    });
    group.bench_function("portable", |bench| {
        bench.iter(|| unsafe {
            pack_transpose_tile::<PortableF32x4>(dst.as_mut_ptr(), black_box(src.as_ptr()), ldb)
        });
    });
    group.finish();
}

fn bench_row_tile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_row_tile");
    let (n, k) = (256, 256);
    let a: Vec<f32> = (0..4 * k).map(|i| (i % 13) as f32 * 0.1).collect();
    let b: Vec<f32> = (0..k * n).map(|i| (i % 7) as f32 * 0.1).collect();
    let mut packed = vec![0.0f32; packed_len(n, k)];
    copy_pack_b(&mut packed, &b, n, k, n).unwrap();

    for rows in [1usize, 2, 4] {
        let mut out = vec![0.0f32; rows * n];
        group.throughput(Throughput::Elements((2 * rows * n * k) as u64));
        group.bench_with_input(BenchmarkId::new("native", rows), &rows, |bench, &rows| {
            bench.iter(|| unsafe {
                compute_row_tile::<NativeF32x4>(
                    a.as_ptr(),
                    packed.as_ptr(),
                    out.as_mut_ptr(),
                    k,
                    rows,
                    n,
                    k,
                    n,
                    1.0,
                    true,
                )
            });
        });
    }
    group.finish();
}

fn bench_sgemm(c: &mut Criterion) {
    let mut group = c.benchmark_group("sgemm");
    group.sample_size(20);

    for size in [64usize, 128, 256, 512] {
        let a: Vec<f32> = (0..size * size).map(|i| ((i % 1000) as f32) * 0.01).collect();
        let b: Vec<f32> = (0..size * size).map(|i| (((i + 500) % 1000) as f32) * 0.01).collect();
        let mut out = vec![0.0f32; size * size];

        group.throughput(Throughput::Elements((2 * size * size * size) as u64));
        for (name, trans_b) in [("NoTrans", Transpose::NoTrans), ("Trans", Transpose::Trans)] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |bench, &size| {
                bench.iter(|| {
                    sgemm_with::<NativeF32x4>(
                        trans_b, size, size, size, 1.0, &a, size, &b, size, &mut out, size, true,
                    )
                    .unwrap()
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_pack_tile, bench_row_tile, bench_sgemm);
criterion_main!(benches);
