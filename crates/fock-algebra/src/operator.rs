use std::fmt;

use fock_core::{ErrorInfo, FockError};
use serde::{Deserialize, Serialize};

const TYPE_MASK: u8 = 0b0000_0001;
const STATISTICS_MASK: u8 = 0b0000_0010;
const SPIN_MASK: u8 = 0b0000_0100;
const ORBITAL_SHIFT: u32 = 3;

/// Largest orbital index representable in the packed encoding.
pub const MAX_ORBITAL: usize = 31;

/// Whether the operator creates or destroys a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperatorType {
    /// Raising operator.
    Creation = 0,
    /// Lowering operator.
    Annihilation = 1,
}

/// Exchange statistics of the mode the operator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Statistics {
    /// Commuting modes.
    Boson = 0,
    /// Anticommuting modes.
    Fermion = 1,
}

/// Spin projection of a spin-1/2 mode. `Up` orders before `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Spin {
    /// Spin projection +1/2.
    Up = 0,
    /// Spin projection -1/2.
    Down = 1,
}

impl Spin {
    /// Both projections in canonical order.
    pub const ALL: [Spin; 2] = [Spin::Up, Spin::Down];
}

/// A single ladder operator packed into one byte.
///
/// Layout, least significant bit first:
///
/// ```text
/// bit 0     type        (0 creation, 1 annihilation)
/// bit 1     statistics  (0 boson, 1 fermion)
/// bit 2     spin        (0 up, 1 down)
/// bits 3-7  orbital     (0..=31)
/// ```
///
/// The [`identifier`](Operator::identifier) drops the type bit, so two
/// operators share an identifier exactly when they act on the same mode.
/// Because the orbital sits in the high bits, identifiers order modes by
/// orbital first and spin second.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Operator(u8);

impl Operator {
    /// Packs an operator.
    ///
    /// # Panics
    ///
    /// Panics when `orbital` exceeds [`MAX_ORBITAL`]; use
    /// [`Operator::try_new`] for a fallible variant.
    pub fn new(op_type: OperatorType, statistics: Statistics, spin: Spin, orbital: usize) -> Self {
        assert!(
            orbital <= MAX_ORBITAL,
            "orbital {orbital} exceeds the packed range 0..={MAX_ORBITAL}"
        );
        Self::pack(op_type, statistics, spin, orbital as u8)
    }

    /// Packs an operator, rejecting orbitals outside the packed range.
    pub fn try_new(
        op_type: OperatorType,
        statistics: Statistics,
        spin: Spin,
        orbital: usize,
    ) -> Result<Self, FockError> {
        if orbital > MAX_ORBITAL {
            return Err(FockError::Operator(
                ErrorInfo::new("orbital-out-of-range", "orbital exceeds the packed range")
                    .with_context("orbital", orbital)
                    .with_context("max", MAX_ORBITAL),
            ));
        }
        Ok(Self::pack(op_type, statistics, spin, orbital as u8))
    }

    fn pack(op_type: OperatorType, statistics: Statistics, spin: Spin, orbital: u8) -> Self {
        Self(
            orbital << ORBITAL_SHIFT
                | (spin as u8) << 2
                | (statistics as u8) << 1
                | op_type as u8,
        )
    }

    /// Creation operator on the given mode.
    pub fn creation(statistics: Statistics, spin: Spin, orbital: usize) -> Self {
        Self::new(OperatorType::Creation, statistics, spin, orbital)
    }

    /// Annihilation operator on the given mode.
    pub fn annihilation(statistics: Statistics, spin: Spin, orbital: usize) -> Self {
        Self::new(OperatorType::Annihilation, statistics, spin, orbital)
    }

    /// Reinterprets a raw encoded byte. Every byte is a valid operator.
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw encoded byte.
    pub fn raw(self) -> u8 {
        self.0
    }

    /// Encoding without the type bit; identifies the mode.
    pub fn identifier(self) -> u8 {
        self.0 >> 1
    }

    /// Creation or annihilation, read from bit 0.
    pub fn op_type(self) -> OperatorType {
        if self.0 & TYPE_MASK == 0 {
            OperatorType::Creation
        } else {
            OperatorType::Annihilation
        }
    }

    /// Boson or fermion, read from bit 1.
    pub fn statistics(self) -> Statistics {
        if self.0 & STATISTICS_MASK == 0 {
            Statistics::Boson
        } else {
            Statistics::Fermion
        }
    }

    /// Spin projection, read from bit 2.
    pub fn spin(self) -> Spin {
        if self.0 & SPIN_MASK == 0 {
            Spin::Up
        } else {
            Spin::Down
        }
    }

    /// Orbital index, read from bits 3-7.
    pub fn orbital(self) -> usize {
        (self.0 >> ORBITAL_SHIFT) as usize
    }

    /// True for raising operators.
    pub fn is_creation(self) -> bool {
        self.op_type() == OperatorType::Creation
    }

    /// True for lowering operators.
    pub fn is_annihilation(self) -> bool {
        self.op_type() == OperatorType::Annihilation
    }

    /// True for anticommuting modes.
    pub fn is_fermion(self) -> bool {
        self.statistics() == Statistics::Fermion
    }

    /// True for commuting modes.
    pub fn is_boson(self) -> bool {
        self.statistics() == Statistics::Boson
    }

    /// Hermitian adjoint: flips the type, keeps the mode.
    pub fn adjoint(self) -> Self {
        Self(self.0 ^ TYPE_MASK)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("type", &self.op_type())
            .field("statistics", &self.statistics())
            .field("spin", &self.spin())
            .field("orbital", &self.orbital())
            .finish()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.statistics() {
            Statistics::Fermion => "c",
            Statistics::Boson => "b",
        };
        let dagger = if self.is_creation() { "†" } else { "" };
        let arrow = match self.spin() {
            Spin::Up => '↑',
            Spin::Down => '↓',
        };
        write!(f, "{symbol}{dagger}({}{arrow})", self.orbital())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_round_trip_through_the_encoding() {
        for op_type in [OperatorType::Creation, OperatorType::Annihilation] {
            for statistics in [Statistics::Boson, Statistics::Fermion] {
                for spin in Spin::ALL {
                    for orbital in [0, 1, 17, MAX_ORBITAL] {
                        let op = Operator::new(op_type, statistics, spin, orbital);
                        assert_eq!(op.op_type(), op_type);
                        assert_eq!(op.statistics(), statistics);
                        assert_eq!(op.spin(), spin);
                        assert_eq!(op.orbital(), orbital);
                        assert_eq!(op.is_boson(), statistics == Statistics::Boson);
                        assert_ne!(op.is_boson(), op.is_fermion());
                    }
                }
            }
        }
    }

    #[test]
    fn raw_layout_is_stable() {
        let op = Operator::creation(Statistics::Fermion, Spin::Up, 5);
        assert_eq!(op.raw(), 0b0010_1010);
        assert_eq!(op.identifier(), 0b0001_0101);

        let op = Operator::annihilation(Statistics::Fermion, Spin::Down, 31);
        assert_eq!(op.raw(), 0b1111_1111);
        assert_eq!(op.identifier(), 0b0111_1111);
    }

    #[test]
    fn adjoint_only_flips_type() {
        let op = Operator::creation(Statistics::Boson, Spin::Down, 9);
        let adj = op.adjoint();
        assert!(adj.is_annihilation());
        assert_eq!(adj.identifier(), op.identifier());
        assert_eq!(adj.adjoint(), op);
    }

    #[test]
    fn identifiers_order_by_orbital_then_spin() {
        let a = Operator::creation(Statistics::Fermion, Spin::Down, 0);
        let b = Operator::creation(Statistics::Fermion, Spin::Up, 1);
        let c = Operator::creation(Statistics::Fermion, Spin::Down, 1);
        assert!(a.identifier() < b.identifier());
        assert!(b.identifier() < c.identifier());
    }

    #[test]
    #[should_panic(expected = "exceeds the packed range")]
    fn orbital_overflow_panics() {
        let _ = Operator::creation(Statistics::Fermion, Spin::Up, 32);
    }

    #[test]
    fn try_new_reports_overflow() {
        let err = Operator::try_new(OperatorType::Creation, Statistics::Boson, Spin::Up, 40)
            .expect_err("orbital 40 is out of range");
        assert_eq!(err.code(), "orbital-out-of-range");
    }

    #[test]
    fn display_uses_compact_notation() {
        let op = Operator::creation(Statistics::Fermion, Spin::Up, 3);
        assert_eq!(op.to_string(), "c†(3↑)");
        let op = Operator::annihilation(Statistics::Boson, Spin::Down, 0);
        assert_eq!(op.to_string(), "b(0↓)");
    }
}
