//! Board mutation.
//!
//! Every function here assumes the action was already validated. Failures
//! are `InvariantViolation`s: the board's own bookkeeping disagrees with
//! itself.

pub mod capture;
pub mod connectivity;
pub mod economy;
pub mod placement;

pub use capture::{capture_tile, release_player, remove_unit, CaptureReport};
pub use connectivity::{add_tile, check_merge, check_split, remove_tile, SplitOutcome};
pub use economy::{collect_income, spread_trees};
pub use placement::{apply_placement, resolve_placement, Placement};
