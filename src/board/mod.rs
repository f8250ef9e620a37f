//! Board representation and game-state types.
//!
//! Contains the hex coordinate system, traversal helpers, the unit catalog,
//! and the tile/province/player entities held by the `Board` aggregate.

pub mod coord;
pub mod player;
pub mod province;
pub mod search;
pub mod state;
pub mod tile;
pub mod unit;

pub use coord::{AxialCoord, CoordParseError, HEX_NEIGHBORS};
pub use player::{Player, PlayerId};
pub use province::{Province, ProvinceId};
pub use search::{breadth_first, flood_fill};
pub use state::Board;
pub use tile::{Ownership, Tile};
pub use unit::{UnitClass, UnitKind, UnitStats, ALL_UNIT_KINDS, MAX_LEVEL, UNIT_STATS};
