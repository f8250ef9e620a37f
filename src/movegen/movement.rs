//! Move range and target validity.
//!
//! A unit walks through its owner's land and may step one tile beyond it.
//! The last step is a capture, which enemy units adjacent to the target can
//! block.

use std::collections::BTreeSet;

use crate::board::{breadth_first, AxialCoord, Board, Ownership, PlayerId, UnitKind, MAX_LEVEL};
use crate::error::RuleViolation;
use crate::resolve::placement::{resolve_placement, Placement};

/// How a destination relates to the unit's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The destination already belongs to the player.
    Own,
    /// The destination can be taken.
    Capture,
}

/// What happens when the unit lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Capture,
    Place(Placement),
}

/// A move that has passed every rule check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub src: AxialCoord,
    pub dest: AxialCoord,
    pub unit: UnitKind,
    /// The province the unit moves from.
    pub owner: Ownership,
    pub landing: Landing,
}

/// Tiles within `range` hops of `src`, walking only through `player`'s land.
///
/// Tiles not owned by `player` are reached but not expanded. `src` itself is
/// included.
pub fn reachable_tiles(
    board: &Board,
    src: AxialCoord,
    range: u32,
    player: &PlayerId,
) -> Vec<AxialCoord> {
    breadth_first(
        src,
        |c| board.land_neighbors(c),
        |c, depth| depth >= range || board.owner_of(c) != Some(player),
    )
}

/// The first tile whose unit stops a level-`level` attacker from taking `dest`.
///
/// Defenders stand on `dest` or its neighbors, on land owned by `dest`'s
/// owner. Unowned destinations are never defended, and a max-level attacker
/// ignores every defender.
pub fn defending_tile(board: &Board, dest: AxialCoord, level: u8) -> Option<AxialCoord> {
    if level >= MAX_LEVEL {
        return None;
    }
    let defender = board.owner_of(dest)?;
    std::iter::once(dest)
        .chain(board.land_neighbors(dest))
        .find(|&c| {
            board.tile(c).is_some_and(|t| {
                t.is_owned_by(defender) && t.unit.is_some_and(|u| u.level() >= level && u.level() > 0)
            })
        })
}

/// Classifies `dest` for a level-`level` unit of `player`.
pub fn check_target(
    board: &Board,
    player: &PlayerId,
    dest: AxialCoord,
    level: u8,
) -> Result<Target, RuleViolation> {
    let tile = board.tile(dest).ok_or(RuleViolation::NoSuchTile(dest))?;
    if tile.is_owned_by(player) {
        return Ok(Target::Own);
    }
    match defending_tile(board, dest, level) {
        Some(by) => Err(RuleViolation::Defended { dest, by }),
        None => Ok(Target::Capture),
    }
}

/// Every tile the unit at `src` could legally move to.
pub fn valid_moves(board: &Board, src: AxialCoord) -> BTreeSet<AxialCoord> {
    let Some(tile) = board.tile(src) else {
        return BTreeSet::new();
    };
    let (Some(unit), Some(player)) = (tile.unit, tile.owner_id()) else {
        return BTreeSet::new();
    };
    if unit.move_range() == 0 {
        return BTreeSet::new();
    }

    reachable_tiles(board, src, unit.move_range(), player)
        .into_iter()
        .filter(|&dest| dest != src)
        .filter(|&dest| match check_target(board, player, dest, unit.level()) {
            Ok(Target::Capture) => true,
            Ok(Target::Own) => {
                let existing = board.tile(dest).and_then(|t| t.unit);
                resolve_placement(existing, unit).is_ok()
            }
            Err(_) => false,
        })
        .collect()
}

/// Checks a move request against the board without changing it.
pub fn validate_move(
    board: &Board,
    player: &PlayerId,
    src: AxialCoord,
    dest: AxialCoord,
) -> Result<MovePlan, RuleViolation> {
    let tile = board.tile(src).ok_or(RuleViolation::NoSuchTile(src))?;
    if !board.contains(dest) {
        return Err(RuleViolation::NoSuchTile(dest));
    }
    let unit = tile.unit.ok_or(RuleViolation::NoUnit(src))?;
    let owner = match &tile.owner {
        Some(o) if &o.player == player => o.clone(),
        _ => return Err(RuleViolation::NotYourUnit(src)),
    };
    if unit.move_range() == 0 {
        return Err(RuleViolation::Immobile(src));
    }
    if src == dest {
        return Err(RuleViolation::SameTile(src));
    }
    if !reachable_tiles(board, src, unit.move_range(), player).contains(&dest) {
        return Err(RuleViolation::OutOfRange { src, dest });
    }

    let landing = match check_target(board, player, dest, unit.level())? {
        Target::Capture => Landing::Capture,
        Target::Own => {
            let existing = board.tile(dest).and_then(|t| t.unit);
            Landing::Place(resolve_placement(existing, unit)?)
        }
    };
    Ok(MovePlan { src, dest, unit, owner, landing })
}
