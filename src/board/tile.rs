//! Land tiles.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::province::ProvinceId;
use super::unit::UnitKind;

/// Which player and province a tile belongs to.
///
/// Owner and province are stored together, so a tile can never have one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ownership {
    pub player: PlayerId,
    pub province: ProvinceId,
}

impl Ownership {
    pub fn new(player: PlayerId, province: ProvinceId) -> Self {
        Ownership { player, province }
    }
}

/// A land tile. Created at game start and never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub owner: Option<Ownership>,
    pub unit: Option<UnitKind>,
}

impl Tile {
    pub fn owner_id(&self) -> Option<&PlayerId> {
        self.owner.as_ref().map(|o| &o.player)
    }

    pub fn province_id(&self) -> Option<ProvinceId> {
        self.owner.as_ref().map(|o| o.province)
    }

    pub fn is_owned_by(&self, player: &PlayerId) -> bool {
        self.owner_id() == Some(player)
    }

    /// Income this tile's unit contributes, or zero if empty.
    pub fn unit_income(&self) -> i64 {
        self.unit.map_or(0, UnitKind::income)
    }
}
