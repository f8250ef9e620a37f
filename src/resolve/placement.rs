//! Unit placement onto a tile its owner already holds.
//!
//! `resolve_placement` decides, without touching the board, what happens when
//! a unit lands on an occupied friendly tile. `apply_placement` writes the
//! decision and books the income difference.

use crate::board::{AxialCoord, Board, UnitClass, UnitKind, MAX_LEVEL};
use crate::error::{InvariantViolation, RuleViolation};

/// The outcome of placing a unit on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The unit standing on the tile afterwards.
    pub result: UnitKind,
    /// The occupant that was replaced, if any.
    pub replaced: Option<UnitKind>,
    /// True when a soldier cleared a tree or grave.
    pub clearing: bool,
}

impl Placement {
    /// Placement onto an empty tile.
    pub fn fresh(unit: UnitKind) -> Self {
        Placement { result: unit, replaced: None, clearing: false }
    }

    /// Net change to the province's income.
    pub fn income_delta(&self) -> i64 {
        self.result.income() - self.replaced.map_or(0, UnitKind::income)
    }
}

/// Applies the placement table for a friendly (or vacated) tile.
///
/// | existing | incoming | result |
/// |---|---|---|
/// | none | any | placed |
/// | soldier | soldier | combined, level `min(a + b - 1, MAX_LEVEL)` |
/// | tree or grave | soldier | replaced, clearing bonus |
/// | lower tower | tower | replaced |
///
/// Every other pairing is rejected.
pub fn resolve_placement(
    existing: Option<UnitKind>,
    incoming: UnitKind,
) -> Result<Placement, RuleViolation> {
    let Some(existing) = existing else {
        return Ok(Placement::fresh(incoming));
    };
    let rejected = RuleViolation::PlacementRejected { existing, incoming };

    match (existing.class(), incoming.class()) {
        (UnitClass::Soldier, UnitClass::Soldier) => {
            let level = (existing.level() + incoming.level() - 1).min(MAX_LEVEL);
            let result = UnitKind::soldier(level).ok_or(rejected)?;
            Ok(Placement { result, replaced: Some(existing), clearing: false })
        }
        (UnitClass::Tree | UnitClass::Grave, UnitClass::Soldier) => Ok(Placement {
            result: incoming,
            replaced: Some(existing),
            clearing: true,
        }),
        (UnitClass::Tower, UnitClass::Tower) if existing.level() < incoming.level() => {
            Ok(Placement { result: incoming, replaced: Some(existing), clearing: false })
        }
        _ => Err(rejected),
    }
}

/// Writes a resolved placement to the board.
///
/// The tile's province (if the tile is owned) books the income delta, and a
/// clearing placement credits `clearing_bonus` to its treasury.
pub fn apply_placement(
    board: &mut Board,
    coord: AxialCoord,
    placement: Placement,
    clearing_bonus: i64,
) -> Result<(), InvariantViolation> {
    let tile = board.expect_tile_mut(coord)?;
    tile.unit = Some(placement.result);
    let owner = tile.owner.clone();

    if let Some(owner) = owner {
        let province = board.expect_province_mut(&owner)?;
        province.add_income(placement.income_delta());
        if placement.clearing {
            province.credit(clearing_bonus);
        }
        tracing::debug!(
            %coord,
            unit = placement.result.name(),
            income = province.income,
            "placed unit"
        );
    }
    Ok(())
}
