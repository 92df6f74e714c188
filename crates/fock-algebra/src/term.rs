use std::fmt;

use fock_core::{real, Coefficient};
use serde::{Deserialize, Serialize};

use crate::operator::{Operator, Spin, Statistics};

/// A coefficient times an ordered product of ladder operators.
///
/// Terms are not canonical: the operator string may be unordered and may
/// repeat modes. The `phase` counter records pending transpositions; the
/// effective coefficient is `coefficient * (-1)^phase`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    coefficient: Coefficient,
    operators: Vec<Operator>,
    #[serde(default)]
    phase: usize,
}

impl Term {
    /// A term with no pending phase.
    pub fn new(coefficient: impl Into<Coefficient>, operators: Vec<Operator>) -> Self {
        Self {
            coefficient: coefficient.into(),
            operators,
            phase: 0,
        }
    }

    /// A multiple of the identity.
    pub fn scalar(coefficient: impl Into<Coefficient>) -> Self {
        Self::new(coefficient, Vec::new())
    }

    /// Replaces the pending transposition count.
    pub fn with_phase(mut self, phase: usize) -> Self {
        self.phase = phase;
        self
    }

    /// Stored coefficient, without the phase applied.
    pub fn coefficient(&self) -> Coefficient {
        self.coefficient
    }

    /// The operator string, leftmost first.
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Consumes the term, returning its operator string.
    pub fn into_operators(self) -> Vec<Operator> {
        self.operators
    }

    /// Pending transpositions.
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Records `swaps` further transpositions.
    pub fn increment_phase(&mut self, swaps: usize) {
        self.phase += swaps;
    }

    /// Coefficient with the pending phase applied.
    pub fn signed_coefficient(&self) -> Coefficient {
        if self.phase % 2 == 0 {
            self.coefficient
        } else {
            -self.coefficient
        }
    }

    /// Number of operators in the string.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// True for multiples of the identity.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Concatenates `self` then `other`; coefficients multiply.
    pub fn product(&self, other: &Term) -> Term {
        let mut operators = Vec::with_capacity(self.operators.len() + other.operators.len());
        operators.extend_from_slice(&self.operators);
        operators.extend_from_slice(&other.operators);
        Term::new(
            self.signed_coefficient() * other.signed_coefficient(),
            operators,
        )
    }

    /// Appends a raw operator string, keeping the coefficient.
    pub fn product_operators(&self, operators: &[Operator]) -> Term {
        let mut joined = Vec::with_capacity(self.operators.len() + operators.len());
        joined.extend_from_slice(&self.operators);
        joined.extend_from_slice(operators);
        Term::new(self.signed_coefficient(), joined)
    }

    /// Hermitian adjoint: reversed string of adjoint operators and the
    /// conjugate coefficient.
    pub fn adjoint(&self) -> Term {
        let operators = self.operators.iter().rev().map(|op| op.adjoint()).collect();
        Term::new(self.signed_coefficient().conj(), operators)
    }

    /// `-self`.
    pub fn negate(&self) -> Term {
        Term::new(-self.signed_coefficient(), self.operators.clone())
    }

    /// `factor * self`.
    pub fn scale(&self, factor: impl Into<Coefficient>) -> Term {
        Term::new(self.signed_coefficient() * factor.into(), self.operators.clone())
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.coefficient == other.coefficient && self.operators == other.operators
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.signed_coefficient())?;
        for (idx, op) in self.operators.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{op}")?;
        }
        write!(f, "}}")
    }
}

/// `c · a†(s1, o1) a(s2, o2)`.
pub fn one_body(
    coefficient: impl Into<Coefficient>,
    statistics: Statistics,
    spin1: Spin,
    orbital1: usize,
    spin2: Spin,
    orbital2: usize,
) -> Term {
    Term::new(
        coefficient,
        vec![
            Operator::creation(statistics, spin1, orbital1),
            Operator::annihilation(statistics, spin2, orbital2),
        ],
    )
}

/// `c · a†(s1, o1) a(s2, o2) a†(s3, o3) a(s4, o4)`.
#[allow(clippy::too_many_arguments)]
pub fn two_body(
    coefficient: impl Into<Coefficient>,
    statistics: Statistics,
    (spin1, orbital1): (Spin, usize),
    (spin2, orbital2): (Spin, usize),
    (spin3, orbital3): (Spin, usize),
    (spin4, orbital4): (Spin, usize),
) -> Term {
    Term::new(
        coefficient,
        vec![
            Operator::creation(statistics, spin1, orbital1),
            Operator::annihilation(statistics, spin2, orbital2),
            Operator::creation(statistics, spin3, orbital3),
            Operator::annihilation(statistics, spin4, orbital4),
        ],
    )
}

/// `c · n(s1, o1) n(s2, o2)` written as `a† a a† a`.
pub fn density_density(
    coefficient: impl Into<Coefficient>,
    statistics: Statistics,
    spin1: Spin,
    orbital1: usize,
    spin2: Spin,
    orbital2: usize,
) -> Term {
    two_body(
        coefficient,
        statistics,
        (spin1, orbital1),
        (spin1, orbital1),
        (spin2, orbital2),
        (spin2, orbital2),
    )
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::scalar(real(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fock_core::imag;

    fn c(spin: Spin, orbital: usize) -> Operator {
        Operator::creation(Statistics::Fermion, spin, orbital)
    }

    fn a(spin: Spin, orbital: usize) -> Operator {
        Operator::annihilation(Statistics::Fermion, spin, orbital)
    }

    #[test]
    fn product_concatenates_in_order() {
        let left = Term::new(2.0, vec![c(Spin::Up, 0)]);
        let right = Term::new(3.0, vec![a(Spin::Down, 1)]);
        let prod = left.product(&right);
        assert_eq!(prod.coefficient(), real(6.0));
        assert_eq!(prod.operators(), &[c(Spin::Up, 0), a(Spin::Down, 1)]);

        let reversed = right.product(&left);
        assert_eq!(reversed.operators(), &[a(Spin::Down, 1), c(Spin::Up, 0)]);
    }

    #[test]
    fn product_operators_appends_and_applies_phase() {
        let term = Term::new(2.0, vec![c(Spin::Up, 0)]).with_phase(1);
        let joined = term.product_operators(&[a(Spin::Up, 1), c(Spin::Down, 2)]);
        assert_eq!(joined.coefficient(), real(-2.0));
        assert_eq!(joined.phase(), 0);
        assert_eq!(
            joined.operators(),
            &[c(Spin::Up, 0), a(Spin::Up, 1), c(Spin::Down, 2)]
        );
        assert_eq!(term.product_operators(&[]).operators(), term.operators());
    }

    #[test]
    fn adjoint_reverses_and_conjugates() {
        let term = Term::new(imag(1.5), vec![c(Spin::Up, 0), a(Spin::Down, 2)]);
        let adj = term.adjoint();
        assert_eq!(adj.coefficient(), imag(-1.5));
        assert_eq!(adj.operators(), &[c(Spin::Down, 2), a(Spin::Up, 0)]);
        assert_eq!(adj.adjoint(), term);
    }

    #[test]
    fn phase_flips_effective_sign() {
        let term = Term::new(1.0, vec![c(Spin::Up, 0)]).with_phase(3);
        assert_eq!(term.signed_coefficient(), real(-1.0));
        let prod = term.product(&Term::scalar(2.0));
        assert_eq!(prod.coefficient(), real(-2.0));
        assert_eq!(prod.phase(), 0);
    }

    #[test]
    fn equality_ignores_phase_counter() {
        let a_term = Term::new(1.0, vec![c(Spin::Up, 0)]);
        let mut b_term = a_term.clone();
        b_term.increment_phase(2);
        assert_eq!(a_term, b_term);
    }

    #[test]
    fn density_density_expands_to_four_operators() {
        let term = density_density(0.5, Statistics::Fermion, Spin::Up, 1, Spin::Down, 1);
        assert_eq!(
            term.operators(),
            &[
                c(Spin::Up, 1),
                a(Spin::Up, 1),
                c(Spin::Down, 1),
                a(Spin::Down, 1)
            ]
        );
    }
}
