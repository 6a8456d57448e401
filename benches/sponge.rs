use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sponge_rng::{Hash, Prng, Sponge};

fn sponge_benchmark(c: &mut Criterion) {
    {
        let mut s = Sponge::new(3, 13, 0).unwrap();
        c.bench_function("perm 22 lanes / 13 rounds", move |b| {
            b.iter(|| black_box(s.perm(None).unwrap().len()))
        });
    }

    {
        let mut h = Hash::new(3, 13, 0).unwrap();
        let x1kib = vec![0x5a_u8; 1024];
        c.bench_function("hash (1KiB)", move |b| {
            b.iter(|| {
                h.write(&x1kib);
                black_box(h.sum())
            })
        });
    }

    {
        let mut h = Hash::new(3, 13, 0).unwrap();
        let x1mib = vec![0x5a_u8; 1024 * 1024];
        c.bench_function("hash (1MiB)", move |b| {
            b.iter(|| {
                h.write(&x1mib);
                black_box(h.sum())
            })
        });
    }

    {
        let mut p = Prng::new(4, 13, 0).unwrap();
        c.bench_function("prng limb", move |b| b.iter(|| black_box(p.next_u64())));
    }
}

criterion_group!(benches, sponge_benchmark);
criterion_main!(benches);
