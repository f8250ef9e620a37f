//! Turn-start economy: income collection and tree growth.

use crate::board::{AxialCoord, Board, UnitKind};
use crate::error::InvariantViolation;

use super::placement::{apply_placement, Placement};

/// Credits each province of the player numbered `player_number` with its
/// income. Returns the total credited.
pub fn collect_income(board: &mut Board, player_number: u32) -> i64 {
    let Some(player) = board
        .players
        .values_mut()
        .find(|p| p.player_number == player_number)
    else {
        return 0;
    };

    let mut total = 0;
    for province in player.provinces.values_mut() {
        province.money += province.income;
        total += province.income;
    }
    tracing::debug!(player = %player.id, total, "collected income");
    total
}

/// Spreads every pine onto each empty, owned neighbor. Palms stay put.
///
/// Pines are snapshotted first, so a sapling planted this round does not
/// spread again until the next one. Returns the newly planted tiles.
pub fn spread_trees(board: &mut Board) -> Result<Vec<AxialCoord>, InvariantViolation> {
    let pines: Vec<AxialCoord> = board
        .tiles
        .iter()
        .filter(|(_, tile)| tile.unit == Some(UnitKind::Pine))
        .map(|(&coord, _)| coord)
        .collect();

    let mut planted = Vec::new();
    for coord in pines {
        let targets: Vec<AxialCoord> = board
            .land_neighbors(coord)
            .filter(|&n| {
                board
                    .tile(n)
                    .is_some_and(|t| t.owner.is_some() && t.unit.is_none())
            })
            .collect();
        for target in targets {
            apply_placement(board, target, Placement::fresh(UnitKind::Pine), 0)?;
            planted.push(target);
        }
    }

    if !planted.is_empty() {
        tracing::debug!(count = planted.len(), "trees spread");
    }
    Ok(planted)
}
