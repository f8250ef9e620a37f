//! Error types for game actions.
//!
//! Rule violations are expected player mistakes: the action is refused and
//! the board is untouched. Invariant violations mean the engine's own
//! bookkeeping is broken; they halt the game instance.

use crate::board::{AxialCoord, PlayerId, ProvinceId, UnitKind};

/// A player action that the rules do not allow. State is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("the game has not started")]
    NotStarted,

    #[error("the game has already started")]
    AlreadyStarted,

    #[error("player '{0}' does not hold the turn")]
    NotYourTurn(PlayerId),

    #[error("unknown player '{0}'")]
    UnknownPlayer(PlayerId),

    #[error("player '{0}' has already joined")]
    DuplicatePlayer(PlayerId),

    #[error("the game is full ({0} players)")]
    LobbyFull(usize),

    #[error("no tile at {0}")]
    NoSuchTile(AxialCoord),

    #[error("no unit at {0}")]
    NoUnit(AxialCoord),

    #[error("the unit at {0} belongs to another player")]
    NotYourUnit(AxialCoord),

    #[error("the unit at {0} cannot move")]
    Immobile(AxialCoord),

    #[error("source and destination are both {0}")]
    SameTile(AxialCoord),

    #[error("{dest} is not within reach of the unit at {src}")]
    OutOfRange { src: AxialCoord, dest: AxialCoord },

    #[error("{dest} is defended by the unit at {by}")]
    Defended { dest: AxialCoord, by: AxialCoord },

    #[error("{incoming:?} cannot be placed onto {existing:?}")]
    PlacementRejected { existing: UnitKind, incoming: UnitKind },

    #[error("player '{player}' has no province {province}")]
    UnknownProvince { player: PlayerId, province: ProvinceId },

    #[error("{coord} is neither owned by the buyer nor adjacent to province {province}")]
    NotAdjacent { coord: AxialCoord, province: ProvinceId },

    #[error("{0:?} cannot be purchased")]
    NotPurchasable(UnitKind),

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },
}

/// A broken engine invariant. Fatal to the game instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("expected a tile at {0}")]
    MissingTile(AxialCoord),

    #[error("expected player '{0}' to exist")]
    MissingPlayer(PlayerId),

    #[error("player '{player}' has no province {province}")]
    MissingProvince { player: PlayerId, province: ProvinceId },

    #[error("tile {coord} and province {province} of '{player}' disagree on membership")]
    MembershipMismatch { coord: AxialCoord, player: PlayerId, province: ProvinceId },

    #[error("province {province} of '{player}' has no tiles")]
    EmptyProvince { player: PlayerId, province: ProvinceId },

    #[error("province {province} of '{player}' lost a tile but no region remains")]
    NoRegions { player: PlayerId, province: ProvinceId },

    #[error("province {province} of '{player}' is not connected")]
    Disconnected { player: PlayerId, province: ProvinceId },

    #[error("province {province} of '{player}' books income {booked}, expected {expected}")]
    IncomeDrift { player: PlayerId, province: ProvinceId, booked: i64, expected: i64 },

    #[error("tiles {a} and {b} of '{player}' touch but sit in different provinces")]
    Unmerged { player: PlayerId, a: AxialCoord, b: AxialCoord },

    #[error("could not place the starting province of '{player}': {reason}")]
    StartPlacement { player: PlayerId, reason: String },
}

/// The result of a refused or failed action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error("engine invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("the game was halted after an invariant violation")]
    Halted,
}

impl ActionError {
    /// Returns the rule violation, if this is one.
    pub fn rule(&self) -> Option<&RuleViolation> {
        match self {
            ActionError::Rule(v) => Some(v),
            _ => None,
        }
    }
}
