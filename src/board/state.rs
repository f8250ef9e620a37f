//! The board: root aggregate of tiles, players and turn state.
//!
//! All cross-entity links are key lookups. A tile names its owner and
//! province by id; a province lists its member coordinates. Nothing holds a
//! reference to anything else, so there are no ownership cycles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::coord::AxialCoord;
use super::player::{Player, PlayerId};
use super::province::{Province, ProvinceId};
use super::search::flood_fill;
use super::tile::{Ownership, Tile};
use crate::error::InvariantViolation;

/// Complete authoritative game state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Land tiles only; water is simply absent.
    pub tiles: BTreeMap<AxialCoord, Tile>,
    pub players: BTreeMap<PlayerId, Player>,
    pub current_player_number: u32,
    pub game_started: bool,
    next_player_number: u32,
}

impl Board {
    /// Creates a board with one unowned, empty tile per coordinate.
    pub fn new(land: impl IntoIterator<Item = AxialCoord>) -> Self {
        Board {
            tiles: land.into_iter().map(|c| (c, Tile::default())).collect(),
            ..Board::default()
        }
    }

    pub fn tile(&self, coord: AxialCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn tile_mut(&mut self, coord: AxialCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    /// Looks up a tile that the engine expects to exist.
    pub(crate) fn expect_tile(&self, coord: AxialCoord) -> Result<&Tile, InvariantViolation> {
        self.tiles
            .get(&coord)
            .ok_or(InvariantViolation::MissingTile(coord))
    }

    pub(crate) fn expect_tile_mut(
        &mut self,
        coord: AxialCoord,
    ) -> Result<&mut Tile, InvariantViolation> {
        self.tiles
            .get_mut(&coord)
            .ok_or(InvariantViolation::MissingTile(coord))
    }

    pub fn contains(&self, coord: AxialCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Neighboring coordinates that are land, in clockwise order.
    pub fn land_neighbors(&self, coord: AxialCoord) -> impl Iterator<Item = AxialCoord> + '_ {
        coord.neighbors().filter(move |n| self.tiles.contains_key(n))
    }

    pub fn owner_of(&self, coord: AxialCoord) -> Option<&PlayerId> {
        self.tiles.get(&coord).and_then(Tile::owner_id)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub(crate) fn expect_player_mut(
        &mut self,
        id: &PlayerId,
    ) -> Result<&mut Player, InvariantViolation> {
        self.players
            .get_mut(id)
            .ok_or_else(|| InvariantViolation::MissingPlayer(id.clone()))
    }

    pub fn province(&self, player: &PlayerId, id: ProvinceId) -> Option<&Province> {
        self.players.get(player).and_then(|p| p.province(id))
    }

    pub(crate) fn expect_province(
        &self,
        owner: &Ownership,
    ) -> Result<&Province, InvariantViolation> {
        self.province(&owner.player, owner.province)
            .ok_or_else(|| InvariantViolation::MissingProvince {
                player: owner.player.clone(),
                province: owner.province,
            })
    }

    pub(crate) fn expect_province_mut(
        &mut self,
        owner: &Ownership,
    ) -> Result<&mut Province, InvariantViolation> {
        self.players
            .get_mut(&owner.player)
            .and_then(|p| p.province_mut(owner.province))
            .ok_or_else(|| InvariantViolation::MissingProvince {
                player: owner.player.clone(),
                province: owner.province,
            })
    }

    /// The province that owns the tile at `coord`, if any.
    pub fn province_at(&self, coord: AxialCoord) -> Option<&Province> {
        let owner = self.tiles.get(&coord)?.owner.as_ref()?;
        self.province(&owner.player, owner.province)
    }

    /// Registers a player with the next unused player number.
    pub fn add_player(&mut self, id: PlayerId) -> u32 {
        let number = self.next_player_number;
        self.next_player_number += 1;
        self.players.insert(id.clone(), Player::new(id, number));
        number
    }

    pub fn player_by_number(&self, number: u32) -> Option<&Player> {
        self.players.values().find(|p| p.player_number == number)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.player_by_number(self.current_player_number)
    }

    /// Player numbers in turn order.
    pub fn turn_order(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.players.values().map(|p| p.player_number).collect();
        numbers.sort_unstable();
        numbers
    }

    /// The player number that follows `number` in turn order, wrapping.
    pub fn next_in_turn(&self, number: u32) -> Option<u32> {
        let order = self.turn_order();
        order
            .iter()
            .copied()
            .find(|&n| n > number)
            .or_else(|| order.first().copied())
    }

    /// Income a set of tiles would book: one per tile plus unit incomes.
    pub fn income_of<'a>(&self, tiles: impl IntoIterator<Item = &'a AxialCoord>) -> i64 {
        tiles
            .into_iter()
            .map(|c| 1 + self.tiles.get(c).map_or(0, Tile::unit_income))
            .sum()
    }

    /// Checks every structural invariant of the board.
    ///
    /// - every owned tile's province exists and lists the tile;
    /// - touching tiles of one player share a province;
    /// - every province member is a tile owned by that province;
    /// - no province is empty, and every province is connected;
    /// - every non-enclave province books exactly its tile and unit income.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        for (&coord, tile) in &self.tiles {
            if let Some(owner) = &tile.owner {
                let province = self.expect_province(owner)?;
                if !province.contains(coord) {
                    return Err(InvariantViolation::MembershipMismatch {
                        coord,
                        player: owner.player.clone(),
                        province: owner.province,
                    });
                }
                for neighbor in coord.neighbors() {
                    let Some(other) = self.tiles.get(&neighbor).and_then(|t| t.owner.as_ref()) else {
                        continue;
                    };
                    if other.player == owner.player && other.province != owner.province {
                        return Err(InvariantViolation::Unmerged {
                            player: owner.player.clone(),
                            a: coord,
                            b: neighbor,
                        });
                    }
                }
            }
        }

        for player in self.players.values() {
            for province in player.provinces.values() {
                let Some(&seed) = province.tiles.iter().next() else {
                    return Err(InvariantViolation::EmptyProvince {
                        player: player.id.clone(),
                        province: province.id,
                    });
                };
                for &coord in &province.tiles {
                    let tile = self.expect_tile(coord)?;
                    let owned_here = tile.owner.as_ref().is_some_and(|o| {
                        o.player == player.id && o.province == province.id
                    });
                    if !owned_here {
                        return Err(InvariantViolation::MembershipMismatch {
                            coord,
                            player: player.id.clone(),
                            province: province.id,
                        });
                    }
                }
                let region = flood_fill(seed, |c| province.contains(c));
                if region.len() != province.len() {
                    return Err(InvariantViolation::Disconnected {
                        player: player.id.clone(),
                        province: province.id,
                    });
                }
                if !province.enclave {
                    let expected = self.income_of(&province.tiles);
                    if province.income != expected {
                        return Err(InvariantViolation::IncomeDrift {
                            player: player.id.clone(),
                            province: province.id,
                            booked: province.income,
                            expected,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
