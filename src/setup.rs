//! Initial territory and terrain.
//!
//! Scripted setups use `Board::found_province` and `Board::spawn_unit`
//! directly. At game start, `assign_start_territories` gives each player
//! without land a two-tile province guarded by a level-1 soldier.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{flood_fill, AxialCoord, Board, Ownership, PlayerId, ProvinceId, UnitKind};
use crate::config::GameConfig;
use crate::error::InvariantViolation;
use crate::resolve::placement::{apply_placement, Placement};

/// Errors from scripted board setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("unknown player '{0}'")]
    UnknownPlayer(PlayerId),

    #[error("no tile at {0}")]
    NoSuchTile(AxialCoord),

    #[error("tile {0} is already owned")]
    AlreadyOwned(AxialCoord),

    #[error("tile {0} is already occupied")]
    Occupied(AxialCoord),

    #[error("a province needs at least one tile")]
    Empty,

    #[error("province tiles are not connected")]
    Disconnected,

    #[error("tile {0} touches another province of the same player")]
    TouchesOwnProvince(AxialCoord),

    #[error("{0:?} is not neutral terrain")]
    NotTerrain(UnitKind),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl Board {
    /// Creates a province for `player` over `coords` with the given treasury.
    ///
    /// The tiles must exist, be unowned, form one connected region, and not
    /// touch any other province of the same player. Income is booked from the
    /// tiles and any units already standing on them.
    pub fn found_province(
        &mut self,
        player: &PlayerId,
        coords: &[AxialCoord],
        money: i64,
    ) -> Result<ProvinceId, SetupError> {
        let Some(&seed) = coords.first() else {
            return Err(SetupError::Empty);
        };
        if !self.players.contains_key(player) {
            return Err(SetupError::UnknownPlayer(player.clone()));
        }
        for &coord in coords {
            let tile = self.tile(coord).ok_or(SetupError::NoSuchTile(coord))?;
            if tile.owner.is_some() {
                return Err(SetupError::AlreadyOwned(coord));
            }
            if self.land_neighbors(coord).any(|n| self.owner_of(n) == Some(player)) {
                return Err(SetupError::TouchesOwnProvince(coord));
            }
        }
        let region = flood_fill(seed, |c| coords.contains(&c));
        if region.len() != coords.len() {
            return Err(SetupError::Disconnected);
        }

        let income = self.income_of(&region);
        let player_entry = self.expect_player_mut(player)?;
        let id = player_entry.create_province(money);
        let owner = Ownership::new(player.clone(), id);
        for &coord in &region {
            self.expect_tile_mut(coord)?.owner = Some(owner.clone());
        }
        let province = self.expect_province_mut(&owner)?;
        province.tiles = region;
        province.income = income;
        Ok(id)
    }

    /// Seeds a tree or grave on an empty tile.
    pub fn plant_terrain(&mut self, coord: AxialCoord, kind: UnitKind) -> Result<(), SetupError> {
        if !kind.is_tree() && kind != UnitKind::Grave {
            return Err(SetupError::NotTerrain(kind));
        }
        self.spawn_unit(coord, kind)
    }

    /// Places a unit on an empty tile, booking its income if the tile is owned.
    pub fn spawn_unit(&mut self, coord: AxialCoord, kind: UnitKind) -> Result<(), SetupError> {
        let tile = self.tile(coord).ok_or(SetupError::NoSuchTile(coord))?;
        if tile.unit.is_some() {
            return Err(SetupError::Occupied(coord));
        }
        apply_placement(self, coord, Placement::fresh(kind), 0)?;
        Ok(())
    }
}

/// Gives every player that owns no land a starting province.
///
/// Each start is a random empty, unowned tile with at least one empty,
/// unowned neighbor that does not touch another player's start. Candidates
/// within `start_radius_scale` of the map's center are preferred; if none
/// remain, the whole map is used. The start tile receives a level-1 soldier;
/// the neighbor is the first free one in clockwise order. Players that cannot
/// be placed are skipped with a warning.
pub fn assign_start_territories(
    board: &mut Board,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Result<Vec<PlayerId>, InvariantViolation> {
    let landless: Vec<PlayerId> = board
        .players
        .values()
        .filter(|p| p.provinces.is_empty())
        .map(|p| p.id.clone())
        .collect();
    let (center, radius) = map_extent(board, config.start_radius_scale);

    let mut placed = Vec::new();
    for player in landless {
        let candidates: Vec<AxialCoord> = board
            .tiles
            .keys()
            .copied()
            .filter(|&c| is_free_start(board, c))
            .collect();
        let central: Vec<AxialCoord> = candidates
            .iter()
            .copied()
            .filter(|c| c.distance(center) <= radius)
            .collect();
        let pool = if central.is_empty() { &candidates } else { &central };

        let Some(&start) = pool.choose(rng) else {
            tracing::warn!(%player, "no room left for a starting province");
            continue;
        };
        let Some(partner) = board.land_neighbors(start).find(|&n| is_free(board, n)) else {
            continue;
        };

        let placement = board
            .found_province(&player, &[start, partner], config.starting_money)
            .and_then(|_| board.spawn_unit(start, UnitKind::Soldier1));
        if let Err(err) = placement {
            return Err(match err {
                SetupError::Invariant(v) => v,
                other => InvariantViolation::StartPlacement {
                    player,
                    reason: other.to_string(),
                },
            });
        }
        tracing::info!(%player, %start, %partner, "assigned starting province");
        placed.push(player);
    }
    Ok(placed)
}

/// Empty, unowned, and not touching any owned tile.
fn is_free(board: &Board, coord: AxialCoord) -> bool {
    board
        .tile(coord)
        .is_some_and(|t| t.owner.is_none() && t.unit.is_none())
        && board.land_neighbors(coord).all(|n| board.owner_of(n).is_none())
}

fn is_free_start(board: &Board, coord: AxialCoord) -> bool {
    is_free(board, coord) && board.land_neighbors(coord).any(|n| is_free(board, n))
}

/// Center of the land's bounding box and the sampling radius around it.
fn map_extent(board: &Board, scale: f64) -> (AxialCoord, i32) {
    let mut coords = board.tiles.keys();
    let Some(first) = coords.next() else {
        return (AxialCoord::new(0, 0), 0);
    };
    let (mut min_q, mut max_q, mut min_r, mut max_r) = (first.q, first.q, first.r, first.r);
    for c in coords {
        min_q = min_q.min(c.q);
        max_q = max_q.max(c.q);
        min_r = min_r.min(c.r);
        max_r = max_r.max(c.r);
    }
    let center = AxialCoord::new((min_q + max_q) / 2, (min_r + max_r) / 2);
    let half_extent = ((max_q - min_q).max(max_r - min_r) + 1) / 2;
    let radius = (f64::from(half_extent) * scale).round() as i32;
    (center, radius)
}
