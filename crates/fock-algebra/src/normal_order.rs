use fock_core::{Coefficient, ErrorInfo, FockError};

use crate::expression::Expression;
use crate::operator::{Operator, OperatorType};
use crate::term::Term;

/// Rewrites operator strings into normal order.
///
/// Creation operators end up left of annihilation operators, creations in
/// ascending identifier order and annihilations in descending identifier
/// order. Every transposition of two fermionic operators flips the sign and
/// every annihilation/creation pair on the same mode spawns a contracted
/// term. Results accumulate into one [`Expression`]; entries that cancel to
/// zero stay in the map.
///
/// Each pushed string must carry a single statistics. The `push_*` methods
/// panic on mixed strings; the `try_push_*` methods report
/// [`FockError::Algebra`] and leave the accumulated result untouched.
#[derive(Debug, Clone, Default)]
pub struct NormalOrderer {
    expression: Expression,
}

impl NormalOrderer {
    /// An orderer with an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders one term and accumulates the result.
    pub fn push_term(&mut self, term: &Term) {
        self.push_sequence(term.operators(), term.signed_coefficient());
    }

    /// Orders each term in turn.
    pub fn push_terms<'a>(&mut self, terms: impl IntoIterator<Item = &'a Term>) {
        for term in terms {
            self.push_term(term);
        }
    }

    /// Orders every entry of `expression`.
    pub fn push_expression(&mut self, expression: &Expression) {
        for (operators, coefficient) in expression.iter() {
            self.push_sequence(operators, coefficient);
        }
    }

    /// Orders every entry of every expression, in iteration order.
    pub fn push_expressions<'a>(&mut self, expressions: impl IntoIterator<Item = &'a Expression>) {
        for expression in expressions {
            self.push_expression(expression);
        }
    }

    /// Orders a raw operator string weighted by `coefficient`.
    ///
    /// # Panics
    ///
    /// Panics when `operators` mixes bosonic and fermionic operators.
    pub fn push_sequence(&mut self, operators: &[Operator], coefficient: Coefficient) {
        assert!(
            is_homogeneous(operators),
            "operator string mixes bosonic and fermionic statistics: {operators:?}"
        );
        self.order(operators.to_vec(), coefficient);
    }

    /// Fallible [`NormalOrderer::push_term`].
    pub fn try_push_term(&mut self, term: &Term) -> Result<(), FockError> {
        self.try_push_sequence(term.operators(), term.signed_coefficient())
    }

    /// Validates every term before ordering any of them.
    pub fn try_push_terms(&mut self, terms: &[Term]) -> Result<(), FockError> {
        for term in terms {
            check_homogeneous(term.operators())?;
        }
        self.push_terms(terms);
        Ok(())
    }

    /// Validates every entry before ordering any of them.
    pub fn try_push_expression(&mut self, expression: &Expression) -> Result<(), FockError> {
        for (operators, _) in expression.iter() {
            check_homogeneous(operators)?;
        }
        self.push_expression(expression);
        Ok(())
    }

    /// Fallible [`NormalOrderer::push_sequence`].
    pub fn try_push_sequence(
        &mut self,
        operators: &[Operator],
        coefficient: Coefficient,
    ) -> Result<(), FockError> {
        check_homogeneous(operators)?;
        self.order(operators.to_vec(), coefficient);
        Ok(())
    }

    /// Accumulated normal-ordered result.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Consumes the orderer, returning its result.
    pub fn into_expression(self) -> Expression {
        self.expression
    }

    fn order(&mut self, operators: Vec<Operator>, coefficient: Coefficient) {
        let mut pending = vec![(operators, 0usize)];
        while let Some((mut operators, mut swaps)) = pending.pop() {
            if operators.len() >= 2 {
                loop {
                    let mut swapped = false;
                    for i in 1..operators.len() {
                        for j in (1..=i).rev() {
                            let (left, right) = (operators[j - 1], operators[j]);
                            let exchange = usize::from(left.is_fermion() && right.is_fermion());
                            match (left.op_type(), right.op_type()) {
                                (OperatorType::Creation, OperatorType::Creation)
                                    if left.identifier() > right.identifier() =>
                                {
                                    operators.swap(j - 1, j);
                                    swaps += exchange;
                                    swapped = true;
                                }
                                (OperatorType::Annihilation, OperatorType::Annihilation)
                                    if left.identifier() < right.identifier() =>
                                {
                                    operators.swap(j - 1, j);
                                    swaps += exchange;
                                    swapped = true;
                                }
                                (OperatorType::Annihilation, OperatorType::Creation) => {
                                    if left.identifier() == right.identifier() {
                                        let mut contracted = operators.clone();
                                        contracted.remove(j);
                                        contracted.remove(j - 1);
                                        pending.push((contracted, swaps));
                                    }
                                    operators.swap(j - 1, j);
                                    swaps += exchange;
                                    swapped = true;
                                }
                                _ => {}
                            }
                        }
                    }
                    if !swapped {
                        break;
                    }
                }
            }
            let signed = if swaps % 2 == 0 {
                coefficient
            } else {
                -coefficient
            };
            self.expression.insert_sequence(operators, signed);
        }
    }
}

fn is_homogeneous(operators: &[Operator]) -> bool {
    operators
        .windows(2)
        .all(|pair| pair[0].statistics() == pair[1].statistics())
}

fn check_homogeneous(operators: &[Operator]) -> Result<(), FockError> {
    if is_homogeneous(operators) {
        return Ok(());
    }
    let rendered = operators
        .iter()
        .map(|op| op.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    Err(FockError::Algebra(
        ErrorInfo::new(
            "mixed-statistics",
            "operator string mixes bosonic and fermionic statistics",
        )
        .with_context("operators", rendered)
        .with_hint("split bosonic and fermionic sectors into separate strings"),
    ))
}

/// Normal-orders every entry of `expression`.
pub fn normal_order(expression: &Expression) -> Expression {
    let mut orderer = NormalOrderer::new();
    orderer.push_expression(expression);
    orderer.into_expression()
}

/// Normal-orders a single term.
pub fn normal_order_term(term: &Term) -> Expression {
    let mut orderer = NormalOrderer::new();
    orderer.push_term(term);
    orderer.into_expression()
}

/// Normal-orders a list of terms into one expression.
pub fn normal_order_terms(terms: &[Term]) -> Expression {
    let mut orderer = NormalOrderer::new();
    orderer.push_terms(terms);
    orderer.into_expression()
}

/// Fallible [`normal_order`].
pub fn try_normal_order(expression: &Expression) -> Result<Expression, FockError> {
    let mut orderer = NormalOrderer::new();
    orderer.try_push_expression(expression)?;
    Ok(orderer.into_expression())
}

/// Normal-ordered commutator `AB - BA`.
pub fn commute(a: impl Into<Expression>, b: impl Into<Expression>) -> Expression {
    let (a, b) = (a.into(), b.into());
    let mut combined = a.product(&b);
    combined += b.product(&a).negate();
    normal_order(&combined)
}

/// Normal-ordered anticommutator `AB + BA`.
pub fn anticommute(a: impl Into<Expression>, b: impl Into<Expression>) -> Expression {
    let (a, b) = (a.into(), b.into());
    let mut combined = a.product(&b);
    combined += b.product(&a);
    normal_order(&combined)
}
