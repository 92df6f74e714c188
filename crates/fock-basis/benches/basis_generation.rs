use criterion::{criterion_group, criterion_main, Criterion};
use fock_basis::{Basis, BasisFilter, BasisKind};

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("basis_generation");
    group.bench_function("fermionic_8x4", |b| {
        b.iter(|| Basis::fermionic(8, 4, true).expect("basis"))
    });
    group.bench_function("fermionic_8x4_sz0", |b| {
        b.iter(|| {
            Basis::new(
                BasisKind::Fermionic {
                    allow_double_occupancy: true,
                },
                8,
                4,
                BasisFilter::total_spin(0),
            )
            .expect("basis")
        })
    });
    group.bench_function("bosonic_6x5", |b| {
        b.iter(|| Basis::bosonic(6, 5).expect("basis"))
    });
    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
