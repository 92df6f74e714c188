use std::cmp::Ordering;
use std::collections::HashMap;

use fock_algebra::{Operator, Spin, Statistics, MAX_ORBITAL};
use fock_core::{ErrorInfo, FockError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BasisSpec;
use crate::filter::BasisFilter;

/// An ordered string of creation operators applied to the vacuum.
pub type BasisElement = Vec<Operator>;

/// Enumeration strategy used to generate a [`Basis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BasisKind {
    /// Spin-1/2 fermions. Without double occupancy every orbital holds at
    /// most one particle.
    Fermionic {
        /// Whether one orbital may hold both an `Up` and a `Down` particle.
        #[serde(default = "default_double_occupancy")]
        allow_double_occupancy: bool,
    },
    /// Spinless bosons with unbounded occupation per orbital.
    Bosonic,
    /// Like [`BasisKind::Bosonic`], but every particle count from zero up to
    /// the requested one is kept, subject to the filter.
    Generic,
}

fn default_double_occupancy() -> bool {
    true
}

impl Default for BasisKind {
    fn default() -> Self {
        BasisKind::Fermionic {
            allow_double_occupancy: true,
        }
    }
}

impl BasisKind {
    fn statistics(self) -> Statistics {
        match self {
            BasisKind::Fermionic { .. } => Statistics::Fermion,
            BasisKind::Bosonic | BasisKind::Generic => Statistics::Boson,
        }
    }

    /// Whether `next` may follow `current` in a generated element.
    fn admits(self, current: &[Operator], orbital: usize, spin: Spin) -> bool {
        let Some(last) = current.last() else {
            return true;
        };
        match self {
            BasisKind::Fermionic {
                allow_double_occupancy,
            } => {
                last.orbital() < orbital
                    || (allow_double_occupancy && last.orbital() == orbital && spin > last.spin())
            }
            BasisKind::Bosonic | BasisKind::Generic => last.orbital() <= orbital,
        }
    }

    fn spins(self) -> &'static [Spin] {
        match self {
            BasisKind::Fermionic { .. } => &Spin::ALL,
            BasisKind::Bosonic | BasisKind::Generic => &[Spin::Up],
        }
    }
}

/// Occupation-number basis with a bijection between elements and indices.
///
/// Elements are generated once at construction in depth-first order over
/// non-decreasing orbitals. Afterwards the basis is read-only, except for
/// [`Basis::sort_by`], which reorders elements and re-derives every index.
#[derive(Debug, Clone)]
pub struct Basis {
    orbitals: usize,
    particles: usize,
    kind: BasisKind,
    filter: BasisFilter,
    elements: Vec<BasisElement>,
    lookup: HashMap<BasisElement, usize>,
}

impl Basis {
    /// Enumerates every element of `kind` with `particles` creation operators over
    /// `orbitals` orbitals that `filter` accepts.
    ///
    /// Fails with `too-many-orbitals` when `orbitals` exceeds the operator encoding.
    pub fn new(
        kind: BasisKind,
        orbitals: usize,
        particles: usize,
        filter: BasisFilter,
    ) -> Result<Self, FockError> {
        if orbitals > MAX_ORBITAL + 1 {
            return Err(FockError::Basis(
                ErrorInfo::new("too-many-orbitals", "orbital count exceeds the operator encoding")
                    .with_context("orbitals", orbitals)
                    .with_context("max", MAX_ORBITAL + 1),
            ));
        }
        let mut basis = Self {
            orbitals,
            particles,
            kind,
            filter,
            elements: Vec::new(),
            lookup: HashMap::new(),
        };
        let mut current = Vec::with_capacity(particles);
        basis.generate(&mut current, 0);
        debug!(
            kind = ?kind,
            orbitals,
            particles,
            filter = basis.filter.label(),
            size = basis.elements.len(),
            "generated basis"
        );
        Ok(basis)
    }

    /// Unfiltered spin-1/2 fermion basis.
    pub fn fermionic(
        orbitals: usize,
        particles: usize,
        allow_double_occupancy: bool,
    ) -> Result<Self, FockError> {
        Self::new(
            BasisKind::Fermionic {
                allow_double_occupancy,
            },
            orbitals,
            particles,
            BasisFilter::default(),
        )
    }

    /// Unfiltered boson basis.
    pub fn bosonic(orbitals: usize, particles: usize) -> Result<Self, FockError> {
        Self::new(BasisKind::Bosonic, orbitals, particles, BasisFilter::default())
    }

    /// Unfiltered basis of every particle count up to `particles`.
    pub fn generic(orbitals: usize, particles: usize) -> Result<Self, FockError> {
        Self::new(BasisKind::Generic, orbitals, particles, BasisFilter::default())
    }

    /// Builds the basis a [`BasisSpec`] describes.
    pub fn from_spec(spec: &BasisSpec) -> Result<Self, FockError> {
        Self::new(spec.kind, spec.orbitals, spec.particles, spec.filter.build())
    }

    fn generate(&mut self, current: &mut Vec<Operator>, first_orbital: usize) {
        let depth = current.len();
        if matches!(self.kind, BasisKind::Generic) {
            if self.filter.accepts(current) {
                self.register(current.clone());
            }
            if depth == self.particles {
                return;
            }
        } else if depth == self.particles {
            if self.filter.accepts(current) {
                self.register(current.clone());
            }
            return;
        }

        let statistics = self.kind.statistics();
        for orbital in first_orbital..self.orbitals {
            for &spin in self.kind.spins() {
                if self.kind.admits(current, orbital, spin) {
                    current.push(Operator::creation(statistics, spin, orbital));
                    self.generate(current, orbital);
                    current.pop();
                }
            }
        }
    }

    fn register(&mut self, element: BasisElement) {
        self.lookup.insert(element.clone(), self.elements.len());
        self.elements.push(element);
    }

    /// True when `element` is part of the basis.
    pub fn contains(&self, element: &[Operator]) -> bool {
        self.lookup.contains_key(element)
    }

    /// Index of `element`.
    ///
    /// # Panics
    ///
    /// Panics when `element` is not part of the basis; check with
    /// [`Basis::contains`] or use [`Basis::position`] instead.
    pub fn index(&self, element: &[Operator]) -> usize {
        match self.lookup.get(element) {
            Some(&index) => index,
            None => panic!("element {element:?} is not part of the basis"),
        }
    }

    /// Index of `element`, or `None` outside the basis.
    pub fn position(&self, element: &[Operator]) -> Option<usize> {
        self.lookup.get(element).copied()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Alias of [`Basis::len`].
    pub fn size(&self) -> usize {
        self.len()
    }

    /// True when no element passed the filter.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in index order.
    pub fn elements(&self) -> &[BasisElement] {
        &self.elements
    }

    /// Orbital count.
    pub fn orbitals(&self) -> usize {
        self.orbitals
    }

    /// Particle count.
    pub fn particles(&self) -> usize {
        self.particles
    }

    /// Enumeration strategy.
    pub fn kind(&self) -> BasisKind {
        self.kind
    }

    /// Filter applied during generation.
    pub fn filter(&self) -> &BasisFilter {
        &self.filter
    }

    /// Reorders the elements under `compare` and re-derives every index.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&BasisElement, &BasisElement) -> Ordering,
    {
        self.elements.sort_by(compare);
        for (index, element) in self.elements.iter().enumerate() {
            if let Some(slot) = self.lookup.get_mut(element) {
                *slot = index;
            }
        }
    }

    /// Renders the per-orbital occupations of `element`.
    ///
    /// Fermionic bases print one glyph pair per orbital (`|↑↓, ↓,  ,>`);
    /// bosonic bases print occupation counts (`|2,0,1,>`).
    pub fn render_state(&self, element: &[Operator]) -> String {
        let width = element
            .iter()
            .map(|op| op.orbital() + 1)
            .max()
            .unwrap_or(0)
            .max(self.orbitals);
        let mut up = vec![0i32; width];
        let mut down = vec![0i32; width];
        for op in element {
            let delta = if op.is_creation() { 1 } else { -1 };
            match op.spin() {
                Spin::Up => up[op.orbital()] += delta,
                Spin::Down => down[op.orbital()] += delta,
            }
        }

        let mut out = String::from("|");
        for (u, d) in up.into_iter().zip(down) {
            match self.kind {
                BasisKind::Fermionic { .. } => match (u, d) {
                    (1, 1) => out.push_str("↑↓"),
                    (1, 0) => out.push_str("↑ "),
                    (0, 1) => out.push_str(" ↓"),
                    (0, 0) => out.push_str("  "),
                    (u, d) => out.push_str(&format!("{u}/{d}")),
                },
                BasisKind::Bosonic | BasisKind::Generic => out.push_str(&(u + d).to_string()),
            }
            out.push(',');
        }
        out.push('>');
        out
    }
}

impl PartialEq for Basis {
    fn eq(&self, other: &Self) -> bool {
        self.orbitals == other.orbitals
            && self.particles == other.particles
            && self.elements == other.elements
    }
}
