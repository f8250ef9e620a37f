//! Tilewar engine library.
//!
//! A turn-based territory game on a hex grid: players own provinces of
//! connected tiles, move and buy units, and capture each other's land. The
//! `Game` type is the entry point; the other modules expose the board model
//! and the rule checks it is built from.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod movegen;
pub mod resolve;
pub mod setup;

pub use board::{AxialCoord, Board, PlayerId, ProvinceId, UnitKind};
pub use config::{ConfigError, FarmCost, GameConfig};
pub use error::{ActionError, InvariantViolation, RuleViolation};
pub use game::{Action, Game, Outcome, PlayerHandle};
pub use setup::SetupError;
