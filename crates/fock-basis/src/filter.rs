use std::fmt;
use std::sync::Arc;

use fock_algebra::{Operator, Spin};
use serde::{Deserialize, Serialize};

type Predicate = dyn Fn(&[Operator]) -> bool + Send + Sync;

/// Predicate deciding whether a candidate element joins a basis.
///
/// Filters are immutable closures shared behind an [`Arc`]; cloning a filter
/// is cheap and the clone observes exactly the same decisions.
#[derive(Clone)]
pub struct BasisFilter {
    label: String,
    predicate: Arc<Predicate>,
}

impl BasisFilter {
    /// Accepts every element.
    pub fn accept_all() -> Self {
        Self::from_fn("accept-all", |_| true)
    }

    /// Wraps an arbitrary predicate.
    pub fn from_fn<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&[Operator]) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Keeps elements whose spin count equals `total`.
    ///
    /// Each `Down` operator counts `+1` and each `Up` operator `-1`.
    pub fn total_spin(total: i32) -> Self {
        Self::from_fn(format!("total-spin({total})"), move |element| {
            element.iter().map(|op| spin_count(op.spin())).sum::<i32>() == total
        })
    }

    /// Keeps single-operator elements carrying `spin`.
    ///
    /// # Panics
    ///
    /// The predicate panics when evaluated on an element that does not hold
    /// exactly one operator.
    pub fn single_spin(spin: Spin) -> Self {
        Self::from_fn(format!("single-spin({spin:?})"), move |element| {
            assert_eq!(
                element.len(),
                1,
                "single-spin filter expects exactly one operator"
            );
            element[0].spin() == spin
        })
    }

    /// Keeps elements accepted by both filters.
    pub fn and(self, other: BasisFilter) -> Self {
        let label = format!("({} and {})", self.label, other.label);
        let (left, right) = (self.predicate, other.predicate);
        Self::from_fn(label, move |element| left(element) && right(element))
    }

    /// Keeps elements accepted by either filter.
    pub fn or(self, other: BasisFilter) -> Self {
        let label = format!("({} or {})", self.label, other.label);
        let (left, right) = (self.predicate, other.predicate);
        Self::from_fn(label, move |element| left(element) || right(element))
    }

    /// Inverts the decision.
    pub fn not(self) -> Self {
        let label = format!("not {}", self.label);
        let inner = self.predicate;
        Self::from_fn(label, move |element| !inner(element))
    }

    /// Evaluates the predicate on a candidate element.
    pub fn accepts(&self, element: &[Operator]) -> bool {
        (self.predicate)(element)
    }

    /// Human-readable description used in logs.
    pub fn label(&self) -> &str {
        &self.label
    }
}

fn spin_count(spin: Spin) -> i32 {
    match spin {
        Spin::Up => -1,
        Spin::Down => 1,
    }
}

impl Default for BasisFilter {
    fn default() -> Self {
        Self::accept_all()
    }
}

impl fmt::Debug for BasisFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BasisFilter").field(&self.label).finish()
    }
}

/// Declarative filter description, loadable from YAML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterSpec {
    /// Keep everything.
    #[default]
    AcceptAll,
    /// See [`BasisFilter::total_spin`].
    TotalSpin {
        /// Required spin count.
        total: i32,
    },
    /// See [`BasisFilter::single_spin`].
    SingleSpin {
        /// Spin of the single operator.
        spin: Spin,
    },
    /// Conjunction; an empty list accepts everything.
    AllOf {
        /// Operands.
        filters: Vec<FilterSpec>,
    },
    /// Disjunction; an empty list rejects everything.
    AnyOf {
        /// Operands.
        filters: Vec<FilterSpec>,
    },
    /// Negation.
    Not {
        /// Negated filter.
        filter: Box<FilterSpec>,
    },
}

impl FilterSpec {
    /// Turns the description into a predicate.
    pub fn build(&self) -> BasisFilter {
        match self {
            FilterSpec::AcceptAll => BasisFilter::accept_all(),
            FilterSpec::TotalSpin { total } => BasisFilter::total_spin(*total),
            FilterSpec::SingleSpin { spin } => BasisFilter::single_spin(*spin),
            FilterSpec::AllOf { filters } => filters
                .iter()
                .map(FilterSpec::build)
                .reduce(BasisFilter::and)
                .unwrap_or_default(),
            FilterSpec::AnyOf { filters } => filters
                .iter()
                .map(FilterSpec::build)
                .reduce(BasisFilter::or)
                .unwrap_or_else(|| BasisFilter::from_fn("reject-all", |_| false)),
            FilterSpec::Not { filter } => filter.build().not(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fock_algebra::Statistics;

    fn op(spin: Spin, orbital: usize) -> Operator {
        Operator::creation(Statistics::Fermion, spin, orbital)
    }

    #[test]
    fn total_spin_counts_down_minus_up() {
        let filter = BasisFilter::total_spin(0);
        assert!(filter.accepts(&[op(Spin::Up, 0), op(Spin::Down, 1)]));
        assert!(!filter.accepts(&[op(Spin::Up, 0), op(Spin::Up, 1)]));
        assert!(filter.accepts(&[]));
        assert!(BasisFilter::total_spin(2).accepts(&[op(Spin::Down, 0), op(Spin::Down, 1)]));
        assert!(!BasisFilter::total_spin(2).accepts(&[op(Spin::Up, 0), op(Spin::Up, 1)]));
        assert!(BasisFilter::total_spin(-2).accepts(&[op(Spin::Up, 0), op(Spin::Up, 1)]));
    }

    #[test]
    fn nonzero_total_spin_selects_down_sector() {
        assert!(BasisFilter::total_spin(1).accepts(&[op(Spin::Down, 0)]));
        assert!(!BasisFilter::total_spin(1).accepts(&[op(Spin::Up, 0)]));
        assert!(!BasisFilter::total_spin(-1).accepts(&[op(Spin::Down, 0)]));
        assert!(BasisFilter::total_spin(-1).accepts(&[op(Spin::Up, 0)]));
    }

    #[test]
    fn combinators_compose() {
        let up = BasisFilter::single_spin(Spin::Up);
        let down = BasisFilter::single_spin(Spin::Down);
        let either = up.clone().or(down.clone());
        let both = up.clone().and(down);
        assert!(either.accepts(&[op(Spin::Down, 3)]));
        assert!(!both.accepts(&[op(Spin::Up, 3)]));
        assert!(up.not().accepts(&[op(Spin::Down, 0)]));
    }

    #[test]
    #[should_panic(expected = "exactly one operator")]
    fn single_spin_rejects_multi_operator_elements() {
        BasisFilter::single_spin(Spin::Up).accepts(&[op(Spin::Up, 0), op(Spin::Up, 1)]);
    }

    #[test]
    fn declarative_filters_build_equivalent_predicates() {
        let spec = FilterSpec::AllOf {
            filters: vec![
                FilterSpec::TotalSpin { total: 0 },
                FilterSpec::Not {
                    filter: Box::new(FilterSpec::AnyOf { filters: vec![] }),
                },
            ],
        };
        let filter = spec.build();
        assert!(filter.accepts(&[op(Spin::Up, 0), op(Spin::Down, 0)]));
        assert!(!filter.accepts(&[op(Spin::Up, 0)]));
        assert!(FilterSpec::default().build().accepts(&[op(Spin::Down, 4)]));
    }

    #[test]
    fn filter_tags_are_kebab_case() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"kind":"single-spin","spin":"Down"}"#).expect("decode filter");
        assert_eq!(spec, FilterSpec::SingleSpin { spin: Spin::Down });
    }
}
