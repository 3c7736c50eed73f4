use passhash::derivation::argon2::{Params, SecretMaterial, Variant, Version, derive_key};
use passhash::hash::blake2b_long;
use passhash::password::{Policy, hash_with_salt, verify};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn params(variant: Variant, memory_kib: u32, parallelism: u32) -> Params {
    Params {
        variant,
        version: Version::V0x13,
        time_cost: 1,
        memory_kib,
        parallelism,
        output_len: 32,
    }
}

pub fn bench_blake2b_long(c: &mut Criterion) {
    let mut out = [0u8; 1024];
    c.bench_function("blake2b_long 1024 bytes", |b| {
        b.iter(|| blake2b_long(black_box(&mut out), &[black_box(&[0u8; 72][..])]))
    });
}

pub fn bench_variants(c: &mut Criterion) {
    let material = SecretMaterial::new(b"password", b"somesalt");
    let mut group = c.benchmark_group("argon2 1 MiB t=1");

    for variant in [Variant::Argon2d, Variant::Argon2i, Variant::Argon2id] {
        let p = params(variant, 1024, 1);
        group.bench_function(variant.as_str(), |b| {
            b.iter(|| derive_key(black_box(&p), black_box(&material)))
        });
    }

    group.finish();
}

pub fn bench_lanes(c: &mut Criterion) {
    let material = SecretMaterial::new(b"password", b"somesalt");
    let mut group = c.benchmark_group("argon2id 8 MiB lanes");
    group.sample_size(20);

    for lanes in [1u32, 2, 4] {
        let p = params(Variant::Argon2id, 8 * 1024, lanes);
        group.bench_with_input(BenchmarkId::from_parameter(lanes), &p, |b, p| {
            b.iter(|| derive_key(black_box(p), black_box(&material)))
        });
    }

    group.finish();
}

pub fn bench_verify(c: &mut Criterion) {
    let policy = Policy::default().memory_kib(4096).time_cost(1);
    let stored = hash_with_salt(b"password", b"somesalt", &policy).unwrap();

    c.bench_function("verify argon2id 4 MiB", |b| {
        b.iter(|| verify(black_box(&stored), black_box(b"password")))
    });
}

criterion_group!(
    benches,
    bench_blake2b_long,
    bench_variants,
    bench_lanes,
    bench_verify
);
criterion_main!(benches);
