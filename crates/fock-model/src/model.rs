use fock_algebra::{normal_order, Expression, Operator, Term};
use fock_basis::Basis;
use fock_core::{stable_hash_string, Coefficient, ErrorInfo, FockError};
use rayon::prelude::*;
use tracing::{info, trace};

use crate::matrix::SparseMatrix;
use crate::opts::AssemblyOpts;
use crate::report::AssemblyReport;

/// A Hamiltonian as either a plain list of terms or a merged expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Hamiltonian {
    /// Unmerged terms, summed on conversion.
    Terms(Vec<Term>),
    /// An already merged expression.
    Expression(Expression),
}

impl Hamiltonian {
    /// Merges into a single expression.
    pub fn into_expression(self) -> Expression {
        match self {
            Hamiltonian::Terms(terms) => terms.into_iter().collect(),
            Hamiltonian::Expression(expression) => expression,
        }
    }
}

impl From<Vec<Term>> for Hamiltonian {
    fn from(terms: Vec<Term>) -> Self {
        Hamiltonian::Terms(terms)
    }
}

impl From<Expression> for Hamiltonian {
    fn from(expression: Expression) -> Self {
        Hamiltonian::Expression(expression)
    }
}

/// A physical model that can be projected onto a basis.
pub trait Model: Sync {
    /// Name recorded in logs and reports.
    fn name(&self) -> &str;

    /// Operator sum projected by [`assemble`].
    fn hamiltonian(&self) -> Hamiltonian;

    /// Assembles the matrix with default [`AssemblyOpts`].
    fn compute_matrix_elements<M>(
        &self,
        basis: &Basis,
        matrix: &mut M,
    ) -> Result<AssemblyReport, FockError>
    where
        Self: Sized,
        M: SparseMatrix + ?Sized,
    {
        assemble(self, basis, matrix, &AssemblyOpts::default())
    }

    /// Assembles the matrix with explicit [`AssemblyOpts`].
    fn compute_matrix_elements_with<M>(
        &self,
        basis: &Basis,
        matrix: &mut M,
        opts: &AssemblyOpts,
    ) -> Result<AssemblyReport, FockError>
    where
        Self: Sized,
        M: SparseMatrix + ?Sized,
    {
        assemble(self, basis, matrix, opts)
    }
}

#[derive(Debug, Default)]
struct RowOutcome {
    row: usize,
    entries: Vec<(usize, Coefficient)>,
    discarded_unphysical: usize,
    outside_basis: usize,
    below_tolerance: usize,
}

/// Projects `model` onto `basis` and writes the elements into `matrix`.
///
/// For every element `e` at index `row`, the Hamiltonian is multiplied by
/// `e` on the right and normal-ordered. Each resulting string that is a
/// basis element `f` stores its coefficient at `(row, index(f))`. Rows are
/// computed on a rayon pool and written back serially in row order.
pub fn assemble<Mo, M>(
    model: &Mo,
    basis: &Basis,
    matrix: &mut M,
    opts: &AssemblyOpts,
) -> Result<AssemblyReport, FockError>
where
    Mo: Model + ?Sized,
    M: SparseMatrix + ?Sized,
{
    opts.validate()?;
    let hamiltonian = model.hamiltonian().into_expression();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.threads)
        .build()
        .map_err(|err| {
            FockError::Model(
                ErrorInfo::new("thread-pool", err.to_string())
                    .with_context("threads", opts.threads),
            )
        })?;
    let threads = pool.current_num_threads();
    info!(
        model = model.name(),
        dimension = basis.len(),
        hamiltonian_terms = hamiltonian.len(),
        threads,
        "assembling matrix"
    );

    let outcomes: Vec<RowOutcome> = pool.install(|| {
        basis
            .elements()
            .par_iter()
            .enumerate()
            .map(|(row, element)| project_row(&hamiltonian, basis, row, element, opts))
            .collect()
    });

    let mut report = AssemblyReport {
        model: model.name().to_string(),
        dimension: basis.len(),
        entries: 0,
        discarded_unphysical: 0,
        outside_basis: 0,
        below_tolerance: 0,
        threads,
        hash: String::new(),
    };
    let mut written = Vec::new();
    for outcome in outcomes {
        report.discarded_unphysical += outcome.discarded_unphysical;
        report.outside_basis += outcome.outside_basis;
        report.below_tolerance += outcome.below_tolerance;
        for (col, value) in outcome.entries {
            matrix.set(outcome.row, col, value);
            written.push((outcome.row, col, value));
        }
    }
    written.sort_by_key(|&(row, col, _)| (row, col));
    report.entries = written.len();
    report.hash = stable_hash_string(&written)?;

    info!(
        model = %report.model,
        dimension = report.dimension,
        entries = report.entries,
        discarded_unphysical = report.discarded_unphysical,
        outside_basis = report.outside_basis,
        below_tolerance = report.below_tolerance,
        "assembled matrix"
    );
    Ok(report)
}

fn project_row(
    hamiltonian: &Expression,
    basis: &Basis,
    row: usize,
    element: &[Operator],
    opts: &AssemblyOpts,
) -> RowOutcome {
    let applied = hamiltonian.product_term(&Term::new(1.0, element.to_vec()));
    let ordered = normal_order(&applied);
    let mut outcome = RowOutcome {
        row,
        ..RowOutcome::default()
    };
    for (operators, coefficient) in ordered.iter() {
        if opts.require_trailing_creation
            && operators.last().is_some_and(|op| op.is_annihilation())
        {
            outcome.discarded_unphysical += 1;
            continue;
        }
        if let Some(tolerance) = opts.drop_tolerance {
            if coefficient.norm() < tolerance {
                outcome.below_tolerance += 1;
                continue;
            }
        }
        match basis.position(operators) {
            Some(col) => outcome.entries.push((col, coefficient)),
            None => outcome.outside_basis += 1,
        }
    }
    trace!(row, entries = outcome.entries.len(), "projected basis element");
    outcome
}
