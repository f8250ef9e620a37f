//! Purchase validation and enumeration.

use crate::board::{AxialCoord, Board, Ownership, PlayerId, ProvinceId, UnitKind, ALL_UNIT_KINDS};
use crate::config::{FarmCost, GameConfig};
use crate::error::RuleViolation;
use crate::resolve::placement::resolve_placement;

use super::movement::{check_target, Landing, Target};

/// A purchase that has passed every rule check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchasePlan {
    /// The province paying for the unit.
    pub buyer: Ownership,
    pub coord: AxialCoord,
    pub kind: UnitKind,
    pub cost: i64,
    pub landing: Landing,
}

/// Price of `kind` for the given province.
pub fn purchase_cost(board: &Board, owner: &Ownership, kind: UnitKind, farm_cost: &FarmCost) -> i64 {
    if kind != UnitKind::Farm {
        return kind.cost();
    }
    let farms = board
        .province(&owner.player, owner.province)
        .map_or(0, |p| {
            p.tiles
                .iter()
                .filter(|&&c| board.tile(c).and_then(|t| t.unit) == Some(UnitKind::Farm))
                .count()
        });
    farm_cost.cost(farms)
}

/// Checks a purchase request against the board without changing it.
///
/// The target must be land the player owns or a tile next to the paying
/// province. Any purchasable kind may be bought onto land the player does
/// not own, provided it could capture the tile at its level.
pub fn validate_purchase(
    board: &Board,
    config: &GameConfig,
    player: &PlayerId,
    province: ProvinceId,
    coord: AxialCoord,
    kind: UnitKind,
) -> Result<PurchasePlan, RuleViolation> {
    if !kind.is_purchasable() {
        return Err(RuleViolation::NotPurchasable(kind));
    }
    let buyer = Ownership::new(player.clone(), province);
    let paying = board
        .province(player, province)
        .ok_or_else(|| RuleViolation::UnknownProvince { player: player.clone(), province })?;
    let tile = board.tile(coord).ok_or(RuleViolation::NoSuchTile(coord))?;

    let owned = tile.is_owned_by(player);
    if !owned && !board.land_neighbors(coord).any(|n| paying.contains(n)) {
        return Err(RuleViolation::NotAdjacent { coord, province });
    }

    let landing = match check_target(board, player, coord, kind.level())? {
        Target::Capture => Landing::Capture,
        Target::Own => Landing::Place(resolve_placement(tile.unit, kind)?),
    };

    let cost = purchase_cost(board, &buyer, kind, &config.farm_cost);
    if paying.money < cost {
        return Err(RuleViolation::InsufficientFunds { needed: cost, available: paying.money });
    }
    Ok(PurchasePlan { buyer, coord, kind, cost, landing })
}

/// Every `(coord, kind)` the province could buy right now.
pub fn legal_purchases(
    board: &Board,
    config: &GameConfig,
    player: &PlayerId,
    province: ProvinceId,
) -> Vec<(AxialCoord, UnitKind)> {
    let mut legal = Vec::new();
    for &coord in board.tiles.keys() {
        for kind in ALL_UNIT_KINDS {
            if validate_purchase(board, config, player, province, coord, kind).is_ok() {
                legal.push((coord, kind));
            }
        }
    }
    legal
}
