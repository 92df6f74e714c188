#![deny(missing_docs)]
#![doc = "Ladder-operator algebra: packed operators, symbolic terms and normal ordering."]

/// Sums of terms keyed by operator string.
pub mod expression;
/// Normal-ordering rewriting engine.
pub mod normal_order;
/// Bit-packed ladder operators.
pub mod operator;
/// Spin, hopping and number operators on fermionic orbitals.
pub mod spin;
/// Coefficient-weighted operator strings.
pub mod term;

pub use expression::{Expression, TermMap};
pub use normal_order::{
    anticommute, commute, normal_order, normal_order_term, normal_order_terms, try_normal_order,
    NormalOrderer,
};
pub use operator::{Operator, OperatorType, Spin, Statistics, MAX_ORBITAL};
pub use term::{density_density, one_body, two_body, Term};
