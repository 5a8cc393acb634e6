use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{thread_rng, RngCore};

use edmers::edwards::generator;
use edmers::hash::sha3;
use edmers::keccak;
use edmers::keys::random_scalar;
use edmers::Variant;

fn bench_permutation(c: &mut Criterion) {
    let mut lanes = [0u64; keccak::LANES];
    c.bench_function("keccak-f[1600]", |b| {
        b.iter(|| keccak::f1600(black_box(&mut lanes)))
    });
}

fn bench_sha3_256(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA3-256");
    let mut rng = thread_rng();

    for size in [64usize, 1024, 16 * 1024].iter() {
        let mut msg = vec![0u8; *size];
        rng.fill_bytes(&mut msg);

        group.bench_with_input(BenchmarkId::new("bytes", size), size, |b, _| {
            b.iter(|| sha3(Variant::Sha3_256, black_box(&msg)))
        });
    }
    group.finish();
}

fn bench_scalar_mul(c: &mut Criterion) {
    let mut rng = thread_rng();
    let G = generator();
    let k = random_scalar(&mut rng);

    c.bench_function("NUMS-256 scalar mul", |b| {
        b.iter(|| black_box(&G).mul(black_box(&k)))
    });
}

criterion_group!(benches, bench_permutation, bench_sha3_256, bench_scalar_mul);
criterion_main!(benches);
