//! Provinces: connected same-owner territory with its own treasury.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::coord::AxialCoord;
use super::player::PlayerId;

/// Province identifier, unique within its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvinceId(pub u32);

impl fmt::Display for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A maximal connected set of one player's tiles.
///
/// `income` is the per-turn delta (+1 per tile plus resident unit incomes);
/// `money` is the accumulated treasury and may go negative. An enclave is a
/// province reduced to a single isolated tile: its ledger is pinned at zero
/// until it gains tiles again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    pub owner: PlayerId,
    pub money: i64,
    pub income: i64,
    pub tiles: BTreeSet<AxialCoord>,
    pub enclave: bool,
}

impl Province {
    pub fn new(id: ProvinceId, owner: PlayerId, money: i64) -> Self {
        Province {
            id,
            owner,
            money,
            income: 0,
            tiles: BTreeSet::new(),
            enclave: false,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, coord: AxialCoord) -> bool {
        self.tiles.contains(&coord)
    }

    /// Books an income change. Ignored while the province is an enclave.
    pub fn add_income(&mut self, delta: i64) {
        if !self.enclave {
            self.income += delta;
        }
    }

    /// Credits money to the treasury. Ignored while the province is an enclave.
    pub fn credit(&mut self, amount: i64) {
        if !self.enclave {
            self.money += amount;
        }
    }

    /// Applies the enclave rule: zero the ledger and pin it.
    pub fn make_enclave(&mut self) {
        self.enclave = true;
        self.income = 0;
        self.money = 0;
    }
}
