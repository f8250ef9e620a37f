//! Legal action generation.
//!
//! Read-only checks that turn a player's request into a plan the game can
//! apply, or a `RuleViolation` explaining why it is refused.

pub mod movement;
pub mod purchase;

pub use movement::{
    check_target, defending_tile, reachable_tiles, valid_moves, validate_move, Landing, MovePlan,
    Target,
};
pub use purchase::{legal_purchases, purchase_cost, validate_purchase, PurchasePlan};
