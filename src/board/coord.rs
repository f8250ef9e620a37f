//! Axial hex coordinates.
//!
//! Tiles are addressed by `(q, r)` axial coordinates. The six neighbor
//! offsets are listed in a fixed clockwise order, and every adjacency scan
//! in the engine enumerates neighbors in that order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Neighbor offsets in clockwise order.
pub const HEX_NEIGHBORS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// A hex tile address.
///
/// Serializes as the string `"q,r"` so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The six surrounding coordinates, in `HEX_NEIGHBORS` order.
    ///
    /// Coordinates are returned whether or not a tile exists there; callers
    /// filter against the board.
    pub fn neighbors(self) -> impl Iterator<Item = AxialCoord> {
        HEX_NEIGHBORS
            .iter()
            .map(move |&(dq, dr)| AxialCoord::new(self.q + dq, self.r + dr))
    }

    /// Returns true if `other` differs from `self` by one of the six offsets.
    pub fn is_adjacent(self, other: AxialCoord) -> bool {
        let delta = (other.q - self.q, other.r - self.r);
        HEX_NEIGHBORS.contains(&delta)
    }

    /// Hex distance in steps, ignoring which tiles exist.
    pub fn distance(self, other: AxialCoord) -> i32 {
        let dq = other.q - self.q;
        let dr = other.r - self.r;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }
}

impl From<(i32, i32)> for AxialCoord {
    fn from((q, r): (i32, i32)) -> Self {
        AxialCoord::new(q, r)
    }
}

impl fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Error returned when a `"q,r"` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed coordinate: '{0}'")]
pub struct CoordParseError(pub String);

impl FromStr for AxialCoord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (q, r) = s
            .split_once(',')
            .ok_or_else(|| CoordParseError(s.to_string()))?;
        let q = q.trim().parse().map_err(|_| CoordParseError(s.to_string()))?;
        let r = r.trim().parse().map_err(|_| CoordParseError(s.to_string()))?;
        Ok(AxialCoord::new(q, r))
    }
}

impl From<AxialCoord> for String {
    fn from(coord: AxialCoord) -> Self {
        coord.to_string()
    }
}

impl TryFrom<String> for AxialCoord {
    type Error = CoordParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
