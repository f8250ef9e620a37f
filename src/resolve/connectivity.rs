//! Province connectivity maintenance.
//!
//! Ownership changes one tile at a time. Removing a tile may split its
//! province into several regions; adding a tile may join it with other
//! provinces of the same owner. Both are detected locally from the changed
//! tile's neighbors.

use std::collections::BTreeSet;

use crate::board::{flood_fill, AxialCoord, Board, Ownership, PlayerId, ProvinceId};
use crate::error::InvariantViolation;

/// What happened to a province after it lost a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    /// Still one connected region.
    Intact,
    /// The province lost its last tile and was deleted.
    Deleted,
    /// The province fractured. `survivor` is the original id if it kept
    /// the largest region; `created` lists the new provinces.
    Split {
        survivor: Option<ProvinceId>,
        created: Vec<ProvinceId>,
    },
}

/// Removes `coord` from `owner`'s province, then runs split detection.
pub fn remove_tile(
    board: &mut Board,
    coord: AxialCoord,
    owner: &Ownership,
) -> Result<SplitOutcome, InvariantViolation> {
    board.expect_tile_mut(coord)?.owner = None;
    let province = board.expect_province_mut(owner)?;
    if !province.tiles.remove(&coord) {
        return Err(InvariantViolation::MembershipMismatch {
            coord,
            player: owner.player.clone(),
            province: owner.province,
        });
    }
    province.add_income(-1);
    check_split(board, coord, owner)
}

/// Detects and applies a split of `owner`'s province around `removed`.
///
/// Each unclaimed neighbor of the removed tile seeds a flood fill over the
/// province's remaining members. With two or more regions, the largest
/// (first found on ties) keeps the original id and treasury and every other
/// region becomes a new province with no money. Incomes are recomputed from
/// scratch. A region of one tile is an enclave: its ledger is zeroed. When
/// even the largest region is a single tile, no region keeps the original id.
pub fn check_split(
    board: &mut Board,
    removed: AxialCoord,
    owner: &Ownership,
) -> Result<SplitOutcome, InvariantViolation> {
    let province = board.expect_province(owner)?;
    if province.is_empty() {
        board
            .expect_player_mut(&owner.player)?
            .provinces
            .remove(&owner.province);
        tracing::debug!(player = %owner.player, province = %owner.province, "province emptied");
        return Ok(SplitOutcome::Deleted);
    }

    let mut regions: Vec<BTreeSet<AxialCoord>> = Vec::new();
    for neighbor in removed.neighbors() {
        if !province.contains(neighbor) || regions.iter().any(|r| r.contains(&neighbor)) {
            continue;
        }
        regions.push(flood_fill(neighbor, |c| province.contains(c)));
    }

    if regions.is_empty() {
        return Err(InvariantViolation::NoRegions {
            player: owner.player.clone(),
            province: owner.province,
        });
    }
    let covered: usize = regions.iter().map(BTreeSet::len).sum();
    if covered != province.len() {
        return Err(InvariantViolation::Disconnected {
            player: owner.player.clone(),
            province: owner.province,
        });
    }

    if regions.len() == 1 {
        if province.len() == 1 {
            board.expect_province_mut(owner)?.make_enclave();
            tracing::debug!(player = %owner.player, province = %owner.province, "province reduced to enclave");
        }
        return Ok(SplitOutcome::Intact);
    }

    let mut largest = 0;
    for (i, region) in regions.iter().enumerate() {
        if region.len() > regions[largest].len() {
            largest = i;
        }
    }
    let keep_original = regions[largest].len() > 1;

    let mut created = Vec::new();
    for (i, region) in regions.into_iter().enumerate() {
        let id = if i == largest && keep_original {
            owner.province
        } else {
            let id = board.expect_player_mut(&owner.player)?.create_province(0);
            created.push(id);
            id
        };
        assign_region(board, &owner.player, id, region)?;
    }
    if !keep_original {
        board
            .expect_player_mut(&owner.player)?
            .provinces
            .remove(&owner.province);
    }

    tracing::debug!(
        player = %owner.player,
        province = %owner.province,
        created = created.len(),
        kept = keep_original,
        "province split"
    );
    Ok(SplitOutcome::Split {
        survivor: keep_original.then_some(owner.province),
        created,
    })
}

/// Makes `region` the complete membership of `player`'s province `id`,
/// repoints the tiles, and recomputes income.
fn assign_region(
    board: &mut Board,
    player: &PlayerId,
    id: ProvinceId,
    region: BTreeSet<AxialCoord>,
) -> Result<(), InvariantViolation> {
    let owner = Ownership::new(player.clone(), id);
    for &coord in &region {
        board.expect_tile_mut(coord)?.owner = Some(owner.clone());
    }
    let income = board.income_of(&region);
    let province = board.expect_province_mut(&owner)?;
    province.tiles = region;
    province.enclave = false;
    province.income = income;
    if province.len() == 1 {
        province.make_enclave();
    }
    Ok(())
}

/// Adds `coord` to `owner`'s province, then runs merge detection.
///
/// Returns the ids of provinces absorbed by the merge.
pub fn add_tile(
    board: &mut Board,
    coord: AxialCoord,
    owner: &Ownership,
) -> Result<Vec<ProvinceId>, InvariantViolation> {
    board.expect_tile_mut(coord)?.owner = Some(owner.clone());
    let province = board.expect_province_mut(owner)?;
    province.tiles.insert(coord);

    if province.enclave {
        // An enclave that grows is live again; rebuild its ledger.
        let income = board.income_of(&board.expect_province(owner)?.tiles);
        let province = board.expect_province_mut(owner)?;
        province.enclave = false;
        province.income = income;
    } else {
        province.add_income(1);
    }

    check_merge(board, coord, owner)
}

/// Absorbs every other province of the same player that touches `coord`
/// into `owner`'s province.
///
/// The absorbed treasury and income are added to the survivor. An absorbed
/// enclave contributes its real income (its tile plus resident unit), which
/// reverses the zeroing it got when it was cut off.
pub fn check_merge(
    board: &mut Board,
    coord: AxialCoord,
    owner: &Ownership,
) -> Result<Vec<ProvinceId>, InvariantViolation> {
    let mut absorbed = Vec::new();

    for neighbor in coord.neighbors() {
        let Some(other) = board.tile(neighbor).and_then(|t| t.owner.clone()) else {
            continue;
        };
        if other.player != owner.player || other.province == owner.province {
            continue;
        }

        let province = board
            .expect_player_mut(&owner.player)?
            .provinces
            .remove(&other.province)
            .ok_or_else(|| InvariantViolation::MissingProvince {
                player: other.player.clone(),
                province: other.province,
            })?;
        let income = if province.enclave {
            board.income_of(&province.tiles)
        } else {
            province.income
        };
        for &c in &province.tiles {
            board.expect_tile_mut(c)?.owner = Some(owner.clone());
        }

        let survivor = board.expect_province_mut(owner)?;
        survivor.tiles.extend(province.tiles);
        survivor.add_income(income);
        survivor.credit(province.money);
        absorbed.push(other.province);
    }

    if !absorbed.is_empty() {
        tracing::debug!(
            player = %owner.player,
            province = %owner.province,
            absorbed = ?absorbed,
            "provinces merged"
        );
    }
    Ok(absorbed)
}
