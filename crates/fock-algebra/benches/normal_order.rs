use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use fock_algebra::{normal_order, spin, Expression, Operator, Spin, Statistics, Term};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_string(rng: &mut StdRng, len: usize) -> Vec<Operator> {
    (0..len)
        .map(|_| {
            let spin = if rng.gen_bool(0.5) { Spin::Down } else { Spin::Up };
            let orbital = rng.gen_range(0..6);
            if rng.gen_bool(0.5) {
                Operator::creation(Statistics::Fermion, spin, orbital)
            } else {
                Operator::annihilation(Statistics::Fermion, spin, orbital)
            }
        })
        .collect()
}

fn bench_normal_order(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let random: Expression = (0..64)
        .map(|_| Term::new(1.0, random_string(&mut rng, 6)))
        .collect();

    let mut heisenberg = Expression::new();
    for site in 0..4 {
        let next = (site + 1) % 4;
        heisenberg += spin::spin_x(site).product(&spin::spin_x(next));
        heisenberg += spin::spin_y(site).product(&spin::spin_y(next));
        heisenberg += spin::spin_z(site).product(&spin::spin_z(next));
    }

    let mut group = c.benchmark_group("normal_order");
    group.bench_function("random_strings", |b| {
        b.iter_batched(|| random.clone(), |expr| normal_order(&expr), BatchSize::SmallInput)
    });
    group.bench_function("heisenberg_ring", |b| b.iter(|| normal_order(&heisenberg)));
    group.finish();
}

criterion_group!(benches, bench_normal_order);
criterion_main!(benches);
