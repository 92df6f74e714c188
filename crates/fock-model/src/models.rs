//! Reference lattice models on periodic chains.

use fock_algebra::spin::{spin_x, spin_y, spin_z};
use fock_algebra::{density_density, one_body, Expression, Spin, Statistics, Term};
use serde::{Deserialize, Serialize};

use crate::model::{Hamiltonian, Model};

/// Tight-binding ring: on-site energy `-u` and nearest-neighbour hopping
/// `-t` for both spins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearChain {
    /// Number of sites on the ring.
    pub sites: usize,
    /// Hopping amplitude.
    pub t: f64,
    /// On-site energy.
    pub u: f64,
}

impl LinearChain {
    /// A ring of `sites` sites.
    pub fn new(sites: usize, t: f64, u: f64) -> Self {
        Self { sites, t, u }
    }

    fn terms(&self) -> Vec<Term> {
        let mut terms = Vec::new();
        if self.sites == 0 {
            return terms;
        }
        let last = self.sites - 1;
        for spin in Spin::ALL {
            for site in 0..self.sites {
                terms.push(fermion_one_body(-self.u, spin, site, site));
            }
            for site in 0..last {
                let hop = fermion_one_body(-self.t, spin, site, site + 1);
                let back = hop.adjoint();
                terms.push(hop);
                terms.push(back);
            }
            let wrap = fermion_one_body(-self.t, spin, last, 0);
            let back = wrap.adjoint();
            terms.push(wrap);
            terms.push(back);
        }
        terms
    }
}

impl Model for LinearChain {
    fn name(&self) -> &str {
        "linear-chain"
    }

    fn hamiltonian(&self) -> Hamiltonian {
        Hamiltonian::Terms(self.terms())
    }
}

/// [`LinearChain`] plus the on-site repulsion `u n↑ n↓`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubbardChain {
    /// Number of sites on the ring.
    pub sites: usize,
    /// Hopping amplitude.
    pub t: f64,
    /// On-site energy and repulsion.
    pub u: f64,
}

impl HubbardChain {
    /// A ring of `sites` sites.
    pub fn new(sites: usize, t: f64, u: f64) -> Self {
        Self { sites, t, u }
    }
}

impl Model for HubbardChain {
    fn name(&self) -> &str {
        "hubbard-chain"
    }

    fn hamiltonian(&self) -> Hamiltonian {
        let mut terms = LinearChain::new(self.sites, self.t, self.u).terms();
        terms.extend((0..self.sites).map(|site| {
            density_density(self.u, Statistics::Fermion, Spin::Up, site, Spin::Down, site)
        }));
        Hamiltonian::Terms(terms)
    }
}

/// Heisenberg ring `-h Σ S^z_i + J Σ S_i · S_{i+1}` in Pauli normalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeisenbergChain {
    /// Number of sites on the ring.
    pub sites: usize,
    /// Exchange coupling.
    pub j: f64,
    /// Longitudinal field.
    pub h: f64,
}

impl HeisenbergChain {
    /// A ring of `sites` sites.
    pub fn new(sites: usize, j: f64, h: f64) -> Self {
        Self { sites, j, h }
    }
}

impl Model for HeisenbergChain {
    fn name(&self) -> &str {
        "heisenberg-chain"
    }

    fn hamiltonian(&self) -> Hamiltonian {
        let mut expression = Expression::new();
        for site in 0..self.sites {
            expression += spin_z(site).scale(-self.h);
        }
        for site in 0..self.sites {
            let next = (site + 1) % self.sites;
            expression += (spin_x(site) * spin_x(next)).scale(self.j);
            expression += (spin_y(site) * spin_y(next)).scale(self.j);
            expression += (spin_z(site) * spin_z(next)).scale(self.j);
        }
        Hamiltonian::Expression(expression)
    }
}

fn fermion_one_body(coefficient: f64, spin: Spin, from: usize, to: usize) -> Term {
    one_body(coefficient, Statistics::Fermion, spin, from, spin, to)
}

/// Declarative choice of a reference model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum ModelSpec {
    /// See [`LinearChain`].
    LinearChain(LinearChain),
    /// See [`HubbardChain`].
    HubbardChain(HubbardChain),
    /// See [`HeisenbergChain`].
    HeisenbergChain(HeisenbergChain),
}

impl ModelSpec {
    /// Instantiates the described model.
    pub fn build(&self) -> Box<dyn Model + Send> {
        match self {
            ModelSpec::LinearChain(model) => Box::new(model.clone()),
            ModelSpec::HubbardChain(model) => Box::new(model.clone()),
            ModelSpec::HeisenbergChain(model) => Box::new(model.clone()),
        }
    }
}
