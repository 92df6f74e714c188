//! Building blocks for lattice Hamiltonians.
//!
//! The spin operators act on a single orbital occupied by spin-1/2
//! fermions and are expressed through fermionic ladder operators.

use fock_core::{imag, real, Coefficient};

use crate::expression::Expression;
use crate::operator::{Spin, Statistics};
use crate::term::{one_body, Term};

/// `-t (a†(spin, from) a(spin, to) + h.c.)`.
pub fn hopping(
    t: impl Into<Coefficient>,
    statistics: Statistics,
    spin: Spin,
    from: usize,
    to: usize,
) -> Expression {
    let t: Coefficient = t.into();
    let forward = one_body(-t, statistics, spin, from, spin, to);
    let backward = forward.adjoint();
    let mut expression = Expression::from(forward);
    expression += backward;
    expression
}

/// Occupation number `a†(spin, orbital) a(spin, orbital)`.
pub fn number(statistics: Statistics, spin: Spin, orbital: usize) -> Term {
    one_body(real(1.0), statistics, spin, orbital, spin, orbital)
}

/// `S^x = c†↑ c↓ + c†↓ c↑` on `orbital`.
pub fn spin_x(orbital: usize) -> Expression {
    flip_pair(orbital, real(1.0), real(1.0))
}

/// `S^y = i c†↑ c↓ - i c†↓ c↑` on `orbital`.
pub fn spin_y(orbital: usize) -> Expression {
    flip_pair(orbital, imag(1.0), imag(-1.0))
}

/// `S^z = n↑ - n↓` on `orbital`.
pub fn spin_z(orbital: usize) -> Expression {
    let mut expression = Expression::from(number(Statistics::Fermion, Spin::Up, orbital));
    expression += number(Statistics::Fermion, Spin::Down, orbital).negate();
    expression
}

fn flip_pair(orbital: usize, raise: Coefficient, lower: Coefficient) -> Expression {
    let mut expression = Expression::from(one_body(
        raise,
        Statistics::Fermion,
        Spin::Up,
        orbital,
        Spin::Down,
        orbital,
    ));
    expression += one_body(
        lower,
        Statistics::Fermion,
        Spin::Down,
        orbital,
        Spin::Up,
        orbital,
    );
    expression
}

/// Particle number operator summed over both spins of every orbital.
pub fn total_number(orbitals: usize) -> Expression {
    (0..orbitals)
        .flat_map(|orbital| Spin::ALL.map(|spin| number(Statistics::Fermion, spin, orbital)))
        .collect()
}
