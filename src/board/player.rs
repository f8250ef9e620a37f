//! Players and their province registries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::province::{Province, ProvinceId};

/// Opaque player identifier supplied by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        PlayerId(s)
    }
}

/// A participant in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub connected: bool,
    pub ready_to_start: bool,
    /// Fixed at join time; determines turn order. Never reused.
    pub player_number: u32,
    pub provinces: BTreeMap<ProvinceId, Province>,
    next_province_id: u32,
}

impl Player {
    pub fn new(id: PlayerId, player_number: u32) -> Self {
        Player {
            name: id.0.clone(),
            id,
            connected: true,
            ready_to_start: false,
            player_number,
            provinces: BTreeMap::new(),
            next_province_id: 0,
        }
    }

    /// Registers an empty province under a fresh id and returns the id.
    ///
    /// The caller must add tiles before the action completes; empty
    /// provinces are an invariant violation.
    pub fn create_province(&mut self, money: i64) -> ProvinceId {
        let id = ProvinceId(self.next_province_id);
        self.next_province_id += 1;
        self.provinces
            .insert(id, Province::new(id, self.id.clone(), money));
        id
    }

    pub fn province(&self, id: ProvinceId) -> Option<&Province> {
        self.provinces.get(&id)
    }

    pub fn province_mut(&mut self, id: ProvinceId) -> Option<&mut Province> {
        self.provinces.get_mut(&id)
    }

    pub fn tile_count(&self) -> usize {
        self.provinces.values().map(Province::len).sum()
    }
}
