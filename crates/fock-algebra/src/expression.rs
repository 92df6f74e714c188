use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg};

use fock_core::{Coefficient, DEFAULT_TOLERANCE};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::operator::Operator;
use crate::term::Term;

/// Map from operator strings to accumulated coefficients.
pub type TermMap = IndexMap<Vec<Operator>, Coefficient>;

/// A sum of terms keyed by their exact operator string.
///
/// Keys are not canonicalized: `c†₀c₁` and `-c₁c†₀` are different keys even
/// though they are algebraically equal. Normal-order both sides before
/// comparing expressions for algebraic equivalence. Entries that cancel to
/// zero are kept until [`Expression::clean`] is called.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Term>", from = "Vec<Term>")]
pub struct Expression {
    terms: TermMap,
}

impl Expression {
    /// An empty sum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing map, in insertion order.
    pub fn terms(&self) -> &TermMap {
        &self.terms
    }

    /// Entries as `(operators, coefficient)` pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&[Operator], Coefficient)> {
        self.terms.iter().map(|(ops, coeff)| (ops.as_slice(), *coeff))
    }

    /// Number of distinct operator strings, zero entries included.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when no string has been inserted.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient stored under exactly `operators`.
    pub fn get(&self, operators: &[Operator]) -> Option<Coefficient> {
        self.terms.get(operators).copied()
    }

    /// Merge-adds a term under its operator string.
    pub fn insert(&mut self, term: Term) {
        let coefficient = term.signed_coefficient();
        self.insert_sequence(term.into_operators(), coefficient);
    }

    /// Merge-adds `coefficient` under `operators`.
    pub fn insert_sequence(&mut self, operators: Vec<Operator>, coefficient: Coefficient) {
        match self.terms.entry(operators) {
            Entry::Occupied(mut slot) => *slot.get_mut() += coefficient,
            Entry::Vacant(slot) => {
                slot.insert(coefficient);
            }
        }
    }

    /// Distributive product: every left string followed by every right string.
    pub fn product(&self, other: &Expression) -> Expression {
        let mut result = Expression::new();
        for (left_ops, left_coeff) in &self.terms {
            for (right_ops, right_coeff) in &other.terms {
                let mut operators = Vec::with_capacity(left_ops.len() + right_ops.len());
                operators.extend_from_slice(left_ops);
                operators.extend_from_slice(right_ops);
                result.insert_sequence(operators, left_coeff * right_coeff);
            }
        }
        result
    }

    /// Appends `term` to every string of `self`.
    pub fn product_term(&self, term: &Term) -> Expression {
        let right_coeff = term.signed_coefficient();
        let mut result = Expression::new();
        for (left_ops, left_coeff) in &self.terms {
            let mut operators = Vec::with_capacity(left_ops.len() + term.len());
            operators.extend_from_slice(left_ops);
            operators.extend_from_slice(term.operators());
            result.insert_sequence(operators, left_coeff * right_coeff);
        }
        result
    }

    /// Hermitian adjoint of every entry.
    pub fn adjoint(&self) -> Expression {
        let mut result = Expression::new();
        for (ops, coeff) in &self.terms {
            let adjoint_ops = ops.iter().rev().map(|op| op.adjoint()).collect();
            result.insert_sequence(adjoint_ops, coeff.conj());
        }
        result
    }

    /// `-self`.
    pub fn negate(&self) -> Expression {
        self.scale(-1.0)
    }

    /// `factor * self`.
    pub fn scale(&self, factor: impl Into<Coefficient>) -> Expression {
        let factor = factor.into();
        Expression {
            terms: self
                .terms
                .iter()
                .map(|(ops, coeff)| (ops.clone(), coeff * factor))
                .collect(),
        }
    }

    /// Removes entries whose magnitude is below `tolerance`.
    pub fn clean(&mut self, tolerance: f64) {
        self.terms.retain(|_, coeff| coeff.norm() >= tolerance);
    }

    /// [`clean`](Expression::clean) with [`DEFAULT_TOLERANCE`].
    pub fn cleaned(mut self) -> Expression {
        self.clean(DEFAULT_TOLERANCE);
        self
    }

    /// Flattens the expression back into terms, in insertion order.
    pub fn to_terms(&self) -> Vec<Term> {
        self.terms
            .iter()
            .map(|(ops, coeff)| Term::new(*coeff, ops.clone()))
            .collect()
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        let mut expression = Expression::new();
        expression.insert(term);
        expression
    }
}

impl From<Vec<Term>> for Expression {
    fn from(terms: Vec<Term>) -> Self {
        terms.into_iter().collect()
    }
}

impl From<Expression> for Vec<Term> {
    fn from(expression: Expression) -> Self {
        expression.to_terms()
    }
}

impl FromIterator<Term> for Expression {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        let mut expression = Expression::new();
        for term in iter {
            expression.insert(term);
        }
        expression
    }
}

impl Extend<Term> for Expression {
    fn extend<I: IntoIterator<Item = Term>>(&mut self, iter: I) {
        for term in iter {
            self.insert(term);
        }
    }
}

impl AddAssign<Term> for Expression {
    fn add_assign(&mut self, term: Term) {
        self.insert(term);
    }
}

impl AddAssign<Expression> for Expression {
    fn add_assign(&mut self, other: Expression) {
        for (ops, coeff) in other.terms {
            self.insert_sequence(ops, coeff);
        }
    }
}

impl AddAssign<&Expression> for Expression {
    fn add_assign(&mut self, other: &Expression) {
        for (ops, coeff) in &other.terms {
            self.insert_sequence(ops.clone(), *coeff);
        }
    }
}

impl Add for Expression {
    type Output = Expression;

    fn add(mut self, other: Expression) -> Expression {
        self += other;
        self
    }
}

impl Mul for &Expression {
    type Output = Expression;

    fn mul(self, other: &Expression) -> Expression {
        self.product(other)
    }
}

impl Mul for Expression {
    type Output = Expression;

    fn mul(self, other: Expression) -> Expression {
        self.product(&other)
    }
}

impl Mul<Expression> for f64 {
    type Output = Expression;

    fn mul(self, expression: Expression) -> Expression {
        expression.scale(self)
    }
}

impl Mul<Expression> for Coefficient {
    type Output = Expression;

    fn mul(self, expression: Expression) -> Expression {
        expression.scale(self)
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        self.negate()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ops, coeff) in &self.terms {
            write!(f, "{coeff}  {{")?;
            for (idx, op) in ops.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{op}")?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}
