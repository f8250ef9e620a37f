//! Ownership transfer of a single tile.
//!
//! A capture clears the defender, pulls the tile out of its old province
//! (which may split), adds it to the attacker's province (which may merge),
//! and finally stands the attacking unit on it.

use crate::board::{AxialCoord, Board, Ownership, PlayerId, ProvinceId, UnitKind};
use crate::error::InvariantViolation;

use super::connectivity::{add_tile, remove_tile, SplitOutcome};
use super::placement::{apply_placement, Placement};

/// Summary of a completed capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReport {
    pub coord: AxialCoord,
    /// The unit destroyed on the captured tile.
    pub destroyed: Option<UnitKind>,
    pub previous_owner: Option<PlayerId>,
    /// How the previous owner's province reacted, if there was one.
    pub split: Option<SplitOutcome>,
    /// Provinces of the capturer that merged into its province.
    pub absorbed: Vec<ProvinceId>,
}

/// Takes a unit off a tile, debiting its income from the tile's province.
pub fn remove_unit(
    board: &mut Board,
    coord: AxialCoord,
) -> Result<Option<UnitKind>, InvariantViolation> {
    let tile = board.expect_tile_mut(coord)?;
    let Some(unit) = tile.unit.take() else {
        return Ok(None);
    };
    if let Some(owner) = tile.owner.clone() {
        board.expect_province_mut(&owner)?.add_income(-unit.income());
    }
    Ok(Some(unit))
}

/// Transfers `coord` to `new_owner`'s province and places `unit` there.
///
/// The caller has already checked that the capture is legal.
pub fn capture_tile(
    board: &mut Board,
    coord: AxialCoord,
    new_owner: &Ownership,
    unit: UnitKind,
) -> Result<CaptureReport, InvariantViolation> {
    let destroyed = remove_unit(board, coord)?;
    let previous = board.expect_tile(coord)?.owner.clone();

    let split = match &previous {
        Some(prev) => Some(remove_tile(board, coord, prev)?),
        None => None,
    };
    let absorbed = add_tile(board, coord, new_owner)?;
    apply_placement(board, coord, Placement::fresh(unit), 0)?;

    tracing::debug!(
        %coord,
        by = %new_owner.player,
        from = ?previous.as_ref().map(|p| p.player.as_str()),
        "tile captured"
    );
    Ok(CaptureReport {
        coord,
        destroyed,
        previous_owner: previous.map(|p| p.player),
        split,
        absorbed,
    })
}

/// Removes a player from the board, returning their land to neutral.
///
/// Trees and graves stay where they are; every other unit the player owned
/// is removed with the player. Returns the number of tiles released.
pub fn release_player(board: &mut Board, player: &PlayerId) -> Result<usize, InvariantViolation> {
    let Some(removed) = board.players.remove(player) else {
        return Err(InvariantViolation::MissingPlayer(player.clone()));
    };

    let mut released = 0;
    for province in removed.provinces.values() {
        for &coord in &province.tiles {
            let tile = board.expect_tile_mut(coord)?;
            tile.owner = None;
            if tile.unit.is_some_and(|u| !u.is_tree() && u != UnitKind::Grave) {
                tile.unit = None;
            }
            released += 1;
        }
    }
    tracing::debug!(%player, released, "released player land");
    Ok(released)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(q: i32, r: i32) -> AxialCoord {
        AxialCoord::new(q, r)
    }

    #[test]
    fn capture_neutral_tile_with_tree() {
        let mut board = Board::new([c(0, 0), c(1, 0)]);
        let a = PlayerId::new("a");
        board.add_player(a.clone());
        let id = board.found_province(&a, &[c(0, 0)], 10).unwrap();
        board.spawn_unit(c(1, 0), UnitKind::Pine).unwrap();

        let owner = Ownership::new(a.clone(), id);
        let report = capture_tile(&mut board, c(1, 0), &owner, UnitKind::Soldier1).unwrap();
        assert_eq!(report.destroyed, Some(UnitKind::Pine));
        assert_eq!(report.previous_owner, None);
        assert_eq!(report.split, None);

        let province = board.province(&a, id).unwrap();
        assert_eq!(province.income, 2 + UnitKind::Soldier1.income());
        assert_eq!(board.tile(c(1, 0)).unwrap().unit, Some(UnitKind::Soldier1));
        assert!(board.verify().is_ok());
    }

    #[test]
    fn capture_enemy_tile_splits_and_debits() {
        // b holds a line (1,0)-(2,0)-(3,0) with a farm at (2,0); a cuts the middle.
        let land = [c(0, 0), c(1, 0), c(2, 0), c(3, 0), c(2, -1)];
        let mut board = Board::new(land);
        let a = PlayerId::new("a");
        let b = PlayerId::new("b");
        board.add_player(a.clone());
        board.add_player(b.clone());
        let pa = board.found_province(&a, &[c(2, -1)], 10).unwrap();
        let pb = board.found_province(&b, &[c(1, 0), c(2, 0), c(3, 0)], 6).unwrap();
        board.spawn_unit(c(2, 0), UnitKind::Farm).unwrap();
        assert_eq!(board.province(&b, pb).unwrap().income, 3 + 4);

        let owner = Ownership::new(a.clone(), pa);
        let report = capture_tile(&mut board, c(2, 0), &owner, UnitKind::Soldier1).unwrap();
        assert_eq!(report.destroyed, Some(UnitKind::Farm));
        assert_eq!(report.previous_owner, Some(b.clone()));
        assert!(matches!(report.split, Some(SplitOutcome::Split { .. })));

        // b is left with two enclaves.
        let player_b = board.player(&b).unwrap();
        assert_eq!(player_b.provinces.len(), 2);
        assert!(player_b.provinces.values().all(|p| p.enclave && p.money == 0));

        let province_a = board.province(&a, pa).unwrap();
        assert_eq!(province_a.len(), 2);
        assert_eq!(province_a.income, 2 + UnitKind::Soldier1.income());
        assert!(board.verify().is_ok());
    }

    #[test]
    fn released_land_keeps_terrain_only() {
        let mut board = Board::new([c(0, 0), c(1, 0), c(2, 0)]);
        let a = PlayerId::new("a");
        board.add_player(a.clone());
        board.spawn_unit(c(2, 0), UnitKind::Palm).unwrap();
        board.found_province(&a, &[c(0, 0), c(1, 0), c(2, 0)], 4).unwrap();
        board.spawn_unit(c(0, 0), UnitKind::Soldier2).unwrap();
        board.spawn_unit(c(1, 0), UnitKind::Farm).unwrap();

        assert_eq!(release_player(&mut board, &a), Ok(3));
        assert!(board.player(&a).is_none());
        assert!(board.tiles.values().all(|t| t.owner.is_none()));
        assert_eq!(board.tile(c(0, 0)).unwrap().unit, None);
        assert_eq!(board.tile(c(1, 0)).unwrap().unit, None);
        assert_eq!(board.tile(c(2, 0)).unwrap().unit, Some(UnitKind::Palm));
        assert!(board.verify().is_ok());
    }
}
